use async_trait::async_trait;
use aws_sdk_s3::Client;

use crate::error::StorageError;
use crate::objects;

/// Whole-document key/value persistence.
///
/// No ordering is promised between concurrent writers, and reads see
/// whatever the backend has durably written at read time.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document. Missing keys are `StorageError::NotFound`.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Write a document, replacing any existing one.
    async fn put(&self, key: &str, body: Vec<u8>) -> Result<(), StorageError>;

    /// Write a document only if the key is free.
    async fn create(&self, key: &str, body: Vec<u8>) -> Result<(), StorageError>;

    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Keys under `prefix`, in no particular order.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}

const JSON: Option<&str> = Some("application/json");

/// [`DocumentStore`] backed by a single S3 bucket.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl DocumentStore for S3Store {
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        objects::get_object(&self.client, &self.bucket, key).await
    }

    async fn put(&self, key: &str, body: Vec<u8>) -> Result<(), StorageError> {
        objects::put_object(&self.client, &self.bucket, key, body, JSON).await
    }

    async fn create(&self, key: &str, body: Vec<u8>) -> Result<(), StorageError> {
        objects::create_object(&self.client, &self.bucket, key, body, JSON).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        objects::delete_object(&self.client, &self.bucket, key).await
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        objects::list_objects(&self.client, &self.bucket, prefix).await
    }
}
