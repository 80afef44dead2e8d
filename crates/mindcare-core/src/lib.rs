//! mindcare-core
//!
//! Pure domain records and storage key conventions. No AWS SDK dependency.
//! This is the shared vocabulary of the MindCare backend and, through the
//! `ts-rs` exports, of the mobile client.

pub mod keys;
pub mod models;
