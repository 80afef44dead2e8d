//! Session activity markers kept in the document store, so the inactivity
//! timeout survives cold starts.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use mindcare_auth::activity::ActivityStore;
use mindcare_auth::error::AuthError;
use mindcare_auth::session::SessionManager;
use mindcare_core::keys;
use mindcare_storage::json::{load_json_opt, save_json};
use mindcare_storage::store::DocumentStore;

/// How often idle session markers are swept.
pub const PRUNE_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivityMarker {
    last_active: Timestamp,
}

pub struct DocumentActivityStore {
    store: Arc<dyn DocumentStore>,
}

impl DocumentActivityStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

fn store_error(e: mindcare_storage::error::StorageError) -> AuthError {
    AuthError::ActivityStore(e.to_string())
}

#[async_trait]
impl ActivityStore for DocumentActivityStore {
    async fn last_active(&self, token_id: &str) -> Result<Option<Timestamp>, AuthError> {
        let marker: Option<ActivityMarker> =
            load_json_opt(self.store.as_ref(), &keys::session(token_id))
                .await
                .map_err(store_error)?;
        Ok(marker.map(|m| m.last_active))
    }

    async fn record_activity(&self, token_id: &str, at: Timestamp) -> Result<(), AuthError> {
        save_json(
            self.store.as_ref(),
            &keys::session(token_id),
            &ActivityMarker { last_active: at },
        )
        .await
        .map_err(store_error)
    }

    /// Read-then-write: the document store has no compare-and-swap, so a
    /// delete landing between the two is overwritten.
    async fn refresh_activity(&self, token_id: &str, at: Timestamp) -> Result<bool, AuthError> {
        if self.last_active(token_id).await?.is_none() {
            return Ok(false);
        }
        self.record_activity(token_id, at).await?;
        Ok(true)
    }

    async fn forget(&self, token_id: &str) -> Result<(), AuthError> {
        self.store
            .delete(&keys::session(token_id))
            .await
            .map_err(store_error)
    }

    async fn prune_before(&self, cutoff: Timestamp) -> Result<usize, AuthError> {
        let keys = self
            .store
            .list(keys::SESSIONS_PREFIX)
            .await
            .map_err(store_error)?;

        let mut removed = 0;
        for key in &keys {
            let marker: Option<ActivityMarker> = load_json_opt(self.store.as_ref(), key)
                .await
                .map_err(store_error)?;
            if let Some(marker) = marker
                && marker.last_active < cutoff
            {
                self.store.delete(key).await.map_err(store_error)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// Sweep idle markers every `every` for as long as the process lives.
pub fn spawn_session_pruner(
    sessions: Arc<SessionManager>,
    every: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = sessions.prune_idle().await {
                tracing::warn!(error = %e, "session marker sweep failed");
            }
        }
    })
}
