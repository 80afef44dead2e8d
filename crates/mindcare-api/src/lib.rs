//! mindcare-api
//!
//! HTTP surface of the MindCare backend: account and session endpoints,
//! DASS-21 scoring and result history, voice-analysis results, and
//! wellness recommendations. Runs behind API Gateway on Lambda or as a
//! plain TCP server.

pub mod activity;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/logout", post(routes::auth::logout))
        .route("/mentalhealthresults", post(routes::results::create_result))
        .route(
            "/mentalhealthresults/{email}",
            get(routes::results::list_results),
        )
        .route("/voice-analysis", post(routes::voice::create_voice_analysis))
        .route(
            "/voice-analysis/{email}",
            get(routes::voice::list_voice_analyses),
        )
        .route("/recommendations", post(routes::recommendations::recommend))
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        // Public
        .route("/health", get(routes::health::health_check))
        .route("/questionnaire", get(routes::questionnaire::get_questionnaire))
        .route(
            "/assessments/score",
            post(routes::questionnaire::score_assessment),
        )
        .route("/signup", post(routes::auth::signup))
        .route("/login", post(routes::auth::login))
        .route("/reset-password", post(routes::auth::reset_password))
        .route("/session", get(routes::auth::session_state))
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
