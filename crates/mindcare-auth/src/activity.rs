use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::error::AuthError;

/// Persistent key-value store for session activity markers, keyed by token id.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn last_active(&self, token_id: &str) -> Result<Option<Timestamp>, AuthError>;

    /// Create or overwrite the marker for `token_id`.
    async fn record_activity(&self, token_id: &str, at: Timestamp) -> Result<(), AuthError>;

    /// Move an existing marker to `at`. Returns `false` without writing
    /// anything when the marker is gone.
    async fn refresh_activity(&self, token_id: &str, at: Timestamp) -> Result<bool, AuthError>;

    async fn forget(&self, token_id: &str) -> Result<(), AuthError>;

    /// Drop every marker last active strictly before `cutoff`. Returns how
    /// many were removed.
    async fn prune_before(&self, cutoff: Timestamp) -> Result<usize, AuthError>;
}

/// Process-local marker store. Markers are lost on restart, which forces
/// every outstanding token through re-authentication.
#[derive(Debug, Default)]
pub struct MemoryActivityStore {
    markers: RwLock<HashMap<String, Timestamp>>,
}

impl MemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.markers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.markers.read().await.is_empty()
    }
}

#[async_trait]
impl ActivityStore for MemoryActivityStore {
    async fn last_active(&self, token_id: &str) -> Result<Option<Timestamp>, AuthError> {
        Ok(self.markers.read().await.get(token_id).copied())
    }

    async fn record_activity(&self, token_id: &str, at: Timestamp) -> Result<(), AuthError> {
        self.markers.write().await.insert(token_id.to_string(), at);
        Ok(())
    }

    async fn refresh_activity(&self, token_id: &str, at: Timestamp) -> Result<bool, AuthError> {
        match self.markers.write().await.entry(token_id.to_string()) {
            Entry::Occupied(mut marker) => {
                marker.insert(at);
                Ok(true)
            }
            Entry::Vacant(_) => Ok(false),
        }
    }

    async fn forget(&self, token_id: &str) -> Result<(), AuthError> {
        self.markers.write().await.remove(token_id);
        Ok(())
    }

    async fn prune_before(&self, cutoff: Timestamp) -> Result<usize, AuthError> {
        let mut markers = self.markers.write().await;
        let before = markers.len();
        markers.retain(|_, last_active| *last_active >= cutoff);
        Ok(before - markers.len())
    }
}
