use axum::extract::{Path, State};
use axum::{Extension, Json};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mindcare_audit::events::{Action, AuditEvent};
use mindcare_auth::session::ensure_owner;
use mindcare_core::keys;
use mindcare_core::models::voice::VoiceAnalysis;
use mindcare_storage::json::{create_json, load_all_json};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Most analyses returned by a listing.
pub const LIST_LIMIT: usize = 20;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVoiceAnalysis {
    pub user_email: String,
    pub pitch: f64,
    pub speed: f64,
    pub emotion: String,
    pub mood: String,
    /// Analyzer-side capture time. Defaults to receipt time.
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

#[derive(Debug, Serialize)]
pub struct VoiceSavedResponse {
    pub message: String,
    pub data: VoiceAnalysis,
}

pub async fn create_voice_analysis(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(body): ApiJson<NewVoiceAnalysis>,
) -> Result<Json<VoiceSavedResponse>, ApiError> {
    ensure_owner(&user.claims, &body.user_email)?;

    if body.pitch < 0.0 || body.speed < 0.0 {
        return Err(ApiError::BadRequest(
            "pitch and speed must be non-negative".to_string(),
        ));
    }

    let analysis = VoiceAnalysis {
        id: Uuid::now_v7(),
        user_email: body.user_email,
        pitch: body.pitch,
        speed: body.speed,
        emotion: body.emotion,
        mood: body.mood,
        timestamp: body.timestamp.unwrap_or_else(|| state.clock.now()),
    };

    create_json(
        state.store.as_ref(),
        &keys::voice(&analysis.user_email, analysis.id),
        &analysis,
    )
    .await?;

    AuditEvent::new(
        Action::VoiceAnalysisCreated,
        "voice_analysis",
        analysis.id.to_string(),
        user.email(),
    )
    .emit();

    Ok(Json(VoiceSavedResponse {
        message: "Voice analysis saved".to_string(),
        data: analysis,
    }))
}

pub async fn list_voice_analyses(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(email): Path<String>,
) -> Result<Json<Vec<VoiceAnalysis>>, ApiError> {
    ensure_owner(&user.claims, &email)?;

    let mut analyses: Vec<VoiceAnalysis> =
        load_all_json(state.store.as_ref(), &keys::voice_prefix(&email)).await?;
    analyses.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
    analyses.truncate(LIST_LIMIT);

    AuditEvent::new(Action::VoiceAnalysesRead, "voice_analysis", "*", user.email()).emit();

    Ok(Json(analyses))
}
