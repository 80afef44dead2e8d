//! Storage key conventions.
//!
//! Pure string functions, no AWS SDK dependency. These define the canonical
//! layout of documents in the MindCare bucket. Per-owner prefixes use a
//! UUIDv5 of the email address so that characters allowed in addresses
//! (`/`, `+`, `%`) never leak into the key hierarchy.

use uuid::Uuid;

/// Stable key segment for an email address.
pub fn owner_segment(email: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, format!("mailto:{email}").as_bytes())
}

pub fn user(email: &str) -> String {
    format!("users/{}.json", owner_segment(email))
}

pub fn results_prefix(email: &str) -> String {
    format!("results/{}/", owner_segment(email))
}

pub fn result(email: &str, id: Uuid) -> String {
    format!("results/{}/{id}.json", owner_segment(email))
}

pub fn voice_prefix(email: &str) -> String {
    format!("voice/{}/", owner_segment(email))
}

pub fn voice(email: &str, id: Uuid) -> String {
    format!("voice/{}/{id}.json", owner_segment(email))
}

pub const SESSIONS_PREFIX: &str = "_sessions/";

pub fn session(token_id: &str) -> String {
    format!("{SESSIONS_PREFIX}{token_id}.json")
}
