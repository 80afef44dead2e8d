use std::sync::LazyLock;

use regex::Regex;

use crate::error::AuthError;

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    // Literal pattern; failure here is a programming error.
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Basic `local@domain.tld` shape check. Not an RFC 5322 parser.
pub fn validate_email(email: &str) -> Result<(), AuthError> {
    if EMAIL_SHAPE.is_match(email) {
        Ok(())
    } else {
        Err(AuthError::Validation("Please enter a valid email.".to_string()))
    }
}

/// Minimum length, counted in characters rather than bytes.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(AuthError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters."
        )))
    }
}
