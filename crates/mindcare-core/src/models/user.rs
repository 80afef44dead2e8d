use serde::{Deserialize, Serialize};

/// A registered account. The password is only ever held as an Argon2id PHC
/// string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub email: String,
    pub password_hash: String,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl UserRecord {
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        now: jiff::Timestamp,
    ) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the stored hash, bumping `updated_at`.
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>, now: jiff::Timestamp) {
        self.password_hash = password_hash.into();
        self.updated_at = now;
    }
}
