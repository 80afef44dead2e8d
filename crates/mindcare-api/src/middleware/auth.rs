use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use mindcare_auth::error::AuthError;
use mindcare_auth::jwt::Claims;

use crate::error::ApiError;
use crate::state::AppState;

/// Bearer-token middleware.
///
/// Extracts the `Authorization: Bearer <token>` header and runs it through
/// the session manager, which checks the signature, absolute expiry and
/// inactivity, and refreshes the activity marker. On success, inserts
/// [`AuthUser`] into request extensions for handlers to use.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?.to_string();
    let claims = state.sessions.authorize(&token).await?;

    req.extensions_mut().insert(AuthUser { claims, token });

    Ok(next.run(req).await)
}

/// The raw bearer token from the request headers.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)
}

/// Authenticated caller, as established by [`require_auth`].
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub claims: Claims,
    pub token: String,
}

impl AuthUser {
    pub fn email(&self) -> &str {
        &self.claims.sub
    }
}
