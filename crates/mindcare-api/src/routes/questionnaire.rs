use axum::Json;
use serde::{Deserialize, Serialize};

use mindcare_core::models::answers::AnswerSet;
use mindcare_instruments::get_instrument;
use mindcare_instruments::instruments::dass21::Dass21;
use mindcare_instruments::scoring::{Question, ResultSummary, ScoreResult};
use mindcare_instruments::Instrument;

use crate::error::ApiError;
use crate::extract::ApiJson;

#[derive(Debug, Serialize)]
pub struct QuestionnaireResponse {
    pub id: String,
    pub name: String,
    pub questions: Vec<Question>,
}

pub async fn get_questionnaire() -> Result<Json<QuestionnaireResponse>, ApiError> {
    let instrument = get_instrument(Dass21.id())
        .ok_or_else(|| ApiError::Internal("DASS-21 is not registered".to_string()))?;

    Ok(Json(QuestionnaireResponse {
        id: instrument.id().to_string(),
        name: instrument.name().to_string(),
        questions: instrument.questions().to_vec(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub answers: AnswerSet,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub scores: ScoreResult,
    pub summary: ResultSummary,
}

pub async fn score_assessment(
    ApiJson(request): ApiJson<ScoreRequest>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let scores = Dass21.score(&request.answers)?;
    Ok(Json(ScoreResponse {
        summary: ResultSummary::from_scores(&scores),
        scores,
    }))
}
