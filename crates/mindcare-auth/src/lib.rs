//! mindcare-auth
//!
//! Credential lifecycle for the MindCare API: HS256 bearer tokens, absolute
//! expiry, sliding inactivity timeout, owner checks, and password hashing.

pub mod activity;
pub mod clock;
pub mod error;
pub mod jwt;
pub mod password;
pub mod session;
pub mod validate;
