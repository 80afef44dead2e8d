use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use mindcare_audit::events::{Action, AuditEvent};
use mindcare_auth::session::ensure_owner;
use mindcare_core::keys;
use mindcare_core::models::answers::AnswerSet;
use mindcare_core::models::result::MentalHealthResult;
use mindcare_instruments::Instrument;
use mindcare_instruments::instruments::dass21::Dass21;
use mindcare_instruments::scoring::{Dimension, ResultSummary, ScoreResult};
use mindcare_storage::json::{create_json, load_all_json};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResult {
    pub user_email: String,
    pub answers: AnswerSet,
    #[serde(default)]
    pub depression_score: Option<u32>,
    #[serde(default)]
    pub anxiety_score: Option<u32>,
    #[serde(default)]
    pub stress_score: Option<u32>,
}

impl NewResult {
    fn supplied(&self, dimension: Dimension) -> Option<u32> {
        match dimension {
            Dimension::Depression => self.depression_score,
            Dimension::Anxiety => self.anxiety_score,
            Dimension::Stress => self.stress_score,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SavedResponse {
    pub message: String,
    pub id: Uuid,
}

/// A stored result plus its severity view, derived on every read.
#[derive(Debug, Serialize)]
pub struct ResultView {
    #[serde(flatten)]
    pub result: MentalHealthResult,
    pub summary: ResultSummary,
}

/// Client-supplied scores are optional. When present they must match what
/// the answers score to; the stored scores are always the recomputed ones.
fn check_supplied_scores(body: &NewResult, computed: &ScoreResult) -> Result<(), ApiError> {
    for dimension in Dimension::ALL {
        if let Some(supplied) = body.supplied(dimension)
            && supplied != computed.get(dimension)
        {
            return Err(ApiError::BadRequest(format!(
                "{} score {supplied} does not match the answers (expected {})",
                dimension.label(),
                computed.get(dimension)
            )));
        }
    }
    Ok(())
}

pub async fn create_result(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(body): ApiJson<NewResult>,
) -> Result<Json<SavedResponse>, ApiError> {
    ensure_owner(&user.claims, &body.user_email)?;

    let scores = Dass21.score(&body.answers)?;
    check_supplied_scores(&body, &scores)?;

    let record = MentalHealthResult {
        id: Uuid::now_v7(),
        user_email: body.user_email,
        answers: body.answers,
        depression_score: scores.depression_score,
        anxiety_score: scores.anxiety_score,
        stress_score: scores.stress_score,
        timestamp: state.clock.now(),
    };

    create_json(
        state.store.as_ref(),
        &keys::result(&record.user_email, record.id),
        &record,
    )
    .await?;

    AuditEvent::new(
        Action::ResultCreated,
        "mental_health_result",
        record.id.to_string(),
        user.email(),
    )
    .with_details(json!({ "instrument": Dass21.id() }))
    .emit();

    Ok(Json(SavedResponse {
        message: "Saved Successfully".to_string(),
        id: record.id,
    }))
}

pub async fn list_results(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(email): Path<String>,
) -> Result<Json<Vec<ResultView>>, ApiError> {
    ensure_owner(&user.claims, &email)?;

    let mut results: Vec<MentalHealthResult> =
        load_all_json(state.store.as_ref(), &keys::results_prefix(&email)).await?;
    results.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));

    AuditEvent::new(Action::ResultsRead, "mental_health_result", "*", user.email())
        .with_details(json!({ "count": results.len() }))
        .emit();

    let views = results
        .into_iter()
        .map(|result| {
            let summary = ResultSummary::from_scores(&ScoreResult {
                depression_score: result.depression_score,
                anxiety_score: result.anxiety_score,
                stress_score: result.stress_score,
            });
            ResultView { result, summary }
        })
        .collect();

    Ok(Json(views))
}
