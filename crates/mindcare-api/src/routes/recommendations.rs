use axum::Json;
use axum::extract::State;

use mindcare_core::models::wellness::{RecommendationRequest, WellnessContent};

use crate::extract::ApiJson;
use crate::state::AppState;

/// Always 200: the coach substitutes fallback content for any model failure.
pub async fn recommend(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RecommendationRequest>,
) -> Json<WellnessContent> {
    Json(state.coach.recommend(&request).await)
}
