use std::sync::Arc;

use mindcare_auth::clock::{Clock, SystemClock};
use mindcare_auth::jwt::TokenSigner;
use mindcare_auth::session::{SessionManager, SessionPolicy};
use mindcare_coach::Coach;
use mindcare_coach::bedrock::BedrockProvider;
use mindcare_coach::openrouter::OpenRouterProvider;
use mindcare_coach::provider::ChatProvider;
use mindcare_storage::memory::MemoryStore;
use mindcare_storage::store::{DocumentStore, S3Store};

use crate::activity::DocumentActivityStore;
use crate::config::{CoachBackend, ServerConfig, StoreBackend};

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub sessions: Arc<SessionManager>,
    pub coach: Arc<Coach>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        sessions: Arc<SessionManager>,
        coach: Arc<Coach>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            sessions,
            coach,
            clock,
        }
    }

    /// Wire the production collaborators named by `config`.
    pub async fn from_config(config: &ServerConfig) -> eyre::Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let store: Arc<dyn DocumentStore> = match config.store {
            StoreBackend::Memory => {
                tracing::warn!("using in-memory store, data will not persist");
                Arc::new(MemoryStore::new())
            }
            StoreBackend::S3 => {
                let client = match &config.s3_region {
                    Some(region) => {
                        mindcare_storage::client::build_client_with_region(region).await
                    }
                    None => mindcare_storage::client::build_client().await,
                };
                Arc::new(S3Store::new(client, config.bucket.clone()))
            }
        };

        let signer = TokenSigner::from_secret(config.jwt_secret.as_bytes())?;
        let policy = SessionPolicy {
            token_lifetime: config.token_ttl,
            inactivity_timeout: config.inactivity_timeout,
        };
        let sessions = SessionManager::new(
            signer,
            policy,
            clock.clone(),
            Arc::new(DocumentActivityStore::new(store.clone())),
        );

        let provider: Arc<dyn ChatProvider> = match config.coach_provider {
            CoachBackend::OpenRouter => {
                if config.openrouter_key.is_empty() {
                    tracing::warn!("OPENROUTER_KEY is empty, recommendations will use fallback content");
                }
                Arc::new(OpenRouterProvider::new(
                    config.openrouter_key.clone(),
                    config.openrouter_model.clone(),
                    config.recommendation_timeout,
                )?)
            }
            CoachBackend::Bedrock => {
                let sdk_config =
                    aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
                Arc::new(BedrockProvider::new(&sdk_config, config.bedrock_model_id.clone()))
            }
        };
        let coach = Coach::new(provider, config.recommendation_timeout);

        tracing::info!(
            store = ?config.store,
            coach = ?config.coach_provider,
            "application state ready"
        );

        Ok(Self::new(store, Arc::new(sessions), Arc::new(coach), clock))
    }
}
