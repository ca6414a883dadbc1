//! Scheduled background jobs.
//!
//! - `snapshot` - Daily per-guild snapshot captures

pub mod snapshot;
