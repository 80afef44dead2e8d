use axum::extract::State;
use axum::http::HeaderMap;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use mindcare_audit::events::{Action, AuditEvent};
use mindcare_auth::password::{spawn_hash_password, spawn_verify_password};
use mindcare_auth::session::SessionState;
use mindcare_auth::validate::{validate_email, validate_password};
use mindcare_core::keys;
use mindcare_core::models::user::UserRecord;
use mindcare_storage::error::StorageError;
use mindcare_storage::json::{create_json, load_json_opt, save_json};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::middleware::auth::{AuthUser, bearer_token};
use crate::routes::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub message: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub state: SessionState,
}

async fn load_user(state: &AppState, email: &str) -> Result<Option<UserRecord>, ApiError> {
    Ok(load_json_opt(state.store.as_ref(), &keys::user(email)).await?)
}

pub async fn signup(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Credentials>,
) -> Result<Json<TokenResponse>, ApiError> {
    let email = body.email.trim();
    if email.is_empty() || body.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required.".to_string(),
        ));
    }
    validate_email(email)?;
    validate_password(&body.password)?;

    if load_user(&state, email).await?.is_some() {
        return Err(ApiError::BadRequest("User already exists.".to_string()));
    }

    let hash = spawn_hash_password(body.password).await?;
    let user = UserRecord::new(email, hash, state.clock.now());

    match create_json(state.store.as_ref(), &keys::user(email), &user).await {
        Ok(()) => {}
        Err(StorageError::AlreadyExists { .. }) => {
            return Err(ApiError::BadRequest("User already exists.".to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    let issued = state.sessions.issue(email).await?;
    AuditEvent::new(Action::Signup, "user", email, email).emit();

    Ok(Json(TokenResponse {
        message: "Account created!".to_string(),
        token: issued.token,
    }))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Credentials>,
) -> Result<Json<TokenResponse>, ApiError> {
    let email = body.email.trim();
    if email.is_empty() || body.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required.".to_string(),
        ));
    }

    let user = load_user(&state, email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if !spawn_verify_password(body.password, user.password_hash).await? {
        info!("login rejected: password mismatch");
        return Err(ApiError::Unauthorized("Password incorrect".to_string()));
    }

    let issued = state.sessions.issue(email).await?;
    AuditEvent::new(Action::Login, "user", email, email).emit();

    Ok(Json(TokenResponse {
        message: "Login successful!".to_string(),
        token: issued.token,
    }))
}

pub async fn reset_password(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let email = body.email.trim();
    if email.is_empty() || body.new_password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and new password are required.".to_string(),
        ));
    }
    validate_email(email)?;
    validate_password(&body.new_password)?;

    let mut user = load_user(&state, email).await?.ok_or_else(|| {
        ApiError::NotFound("User not found. Please create an account.".to_string())
    })?;

    let hash = spawn_hash_password(body.new_password).await?;
    user.set_password_hash(hash, state.clock.now());
    save_json(state.store.as_ref(), &keys::user(email), &user).await?;

    AuditEvent::new(Action::PasswordReset, "user", email, email).emit();

    Ok(Json(MessageResponse::new(
        "Password reset successful! You can now login.",
    )))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.sessions.end(&user.token).await?;
    AuditEvent::new(Action::Logout, "session", &user.claims.jti, user.email()).emit();
    Ok(Json(MessageResponse::new("Logged out.")))
}

/// Report the caller's session state without refreshing it.
pub async fn session_state(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, ApiError> {
    let token = bearer_token(&headers)?;
    let session = state.sessions.state_of(token).await?;
    Ok(Json(SessionResponse { state: session }))
}
