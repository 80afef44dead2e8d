pub mod auth;
pub mod health;
pub mod questionnaire;
pub mod recommendations;
pub mod results;
pub mod voice;

use serde::Serialize;

/// Body of every plain acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
