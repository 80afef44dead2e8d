use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::answers::AnswerSet;

/// A completed assessment as persisted. Append-only and owned by
/// `user_email`; severity bands are never stored alongside the scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MentalHealthResult {
    pub id: Uuid,
    pub user_email: String,
    pub answers: AnswerSet,
    pub depression_score: u32,
    pub anxiety_score: u32,
    pub stress_score: u32,
    pub timestamp: jiff::Timestamp,
}
