use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoachError {
    #[error("provider request failed: {0}")]
    Request(String),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("provider did not answer within {0:?}")]
    Timeout(Duration),
}
