//! Persistence layer.
//!
//! - `guild` - Registry of guilds the bot has joined, in the SQL database
//! - `snapshot` - Snapshot artifacts on the local filesystem

pub mod guild;
pub mod snapshot;
