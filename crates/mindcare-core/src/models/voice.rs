use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Output of the external audio analyzer, stored per owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VoiceAnalysis {
    pub id: Uuid,
    pub user_email: String,
    /// Mean detected pitch in Hz.
    pub pitch: f64,
    /// Estimated tempo in beats per minute.
    pub speed: f64,
    pub emotion: String,
    pub mood: String,
    pub timestamp: jiff::Timestamp,
}
