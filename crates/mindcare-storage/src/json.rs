use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::store::DocumentStore;

/// Load and deserialize a JSON document.
pub async fn load_json<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    key: &str,
) -> Result<T, StorageError> {
    let body = store.get(key).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Load a JSON document, mapping `NotFound` to `None`.
pub async fn load_json_opt<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match load_json(store, key).await {
        Ok(value) => Ok(Some(value)),
        Err(StorageError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Serialize and write a JSON document, replacing any existing one.
pub async fn save_json<T: Serialize>(
    store: &dyn DocumentStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec(value)?;
    store.put(key, body).await
}

/// Serialize and write a JSON document only if the key is free.
pub async fn create_json<T: Serialize>(
    store: &dyn DocumentStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec(value)?;
    store.create(key, body).await
}

/// Load every JSON document under `prefix`.
pub async fn load_all_json<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    prefix: &str,
) -> Result<Vec<T>, StorageError> {
    let keys = store.list(prefix).await?;

    let mut values = Vec::with_capacity(keys.len());
    for key in &keys {
        values.push(load_json(store, key).await?);
    }
    Ok(values)
}
