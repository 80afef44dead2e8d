use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    TokenExpired,

    #[error("session expired due to inactivity")]
    SessionInactive,

    #[error("token subject does not match {requested}")]
    Forbidden { requested: String },

    /// A credential precondition failed. The message is user-facing.
    #[error("{0}")]
    Validation(String),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("activity store error: {0}")]
    ActivityStore(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("auth config error: {0}")]
    Config(String),
}

impl AuthError {
    /// True for every condition that should send the client back to login.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken
                | AuthError::InvalidToken(_)
                | AuthError::TokenExpired
                | AuthError::SessionInactive
        )
    }
}
