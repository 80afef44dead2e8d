//! mindcare-coach
//!
//! Wellness recommendations from a chat-completion model. The model call is
//! bounded by a timeout and every failure is absorbed into a fixed fallback
//! payload, so callers always get content back.

pub mod bedrock;
pub mod content;
pub mod error;
pub mod extract;
pub mod openrouter;
pub mod prompt;
pub mod provider;

use std::sync::Arc;
use std::time::Duration;

use mindcare_core::models::wellness::{RecommendationRequest, WellnessContent};
use tracing::{info, warn};

use crate::error::CoachError;
use crate::provider::ChatProvider;

/// Default wall-clock budget for one recommendation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

pub struct Coach {
    provider: Arc<dyn ChatProvider>,
    timeout: Duration,
}

impl Coach {
    pub fn new(provider: Arc<dyn ChatProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Ask the model for content. Never fails: timeouts, provider errors and
    /// malformed output all yield [`content::fallback_content`].
    pub async fn recommend(&self, request: &RecommendationRequest) -> WellnessContent {
        match self.try_recommend(request).await {
            Ok(content) => {
                info!(provider = self.provider.name(), "recommendations generated");
                content
            }
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "recommendation provider failed, serving fallback"
                );
                content::fallback_content()
            }
        }
    }

    async fn try_recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<WellnessContent, CoachError> {
        let user_prompt = prompt::build_prompt(request);
        let reply = tokio::time::timeout(
            self.timeout,
            self.provider.complete(prompt::SYSTEM_PROMPT, &user_prompt),
        )
        .await
        .map_err(|_| CoachError::Timeout(self.timeout))??;

        extract::extract_content(&reply)
    }
}
