//! mindcare-audit
//!
//! Application-level audit events. Emitted through `tracing` so they land in
//! the same structured log stream as request logs.

pub mod events;
