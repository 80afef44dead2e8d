//! mindcare-storage
//!
//! Document persistence. A small async trait over whole-object reads and
//! writes, implemented on S3 for deployments and in memory for local runs
//! and tests.

pub mod client;
pub mod error;
pub mod json;
pub mod memory;
pub mod objects;
pub mod store;
