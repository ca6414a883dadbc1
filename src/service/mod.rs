//! Service layer for snapshot and restore orchestration.
//!
//! This module sits between the bot (Discord interaction) layer and the data layer:
//!
//! - **target**: The `GuildTarget` boundary every service talks to the live guild through
//! - **capture**: Reads a live guild into a `GuildSnapshot`
//! - **restore**: Rebuilds a guild from a `GuildSnapshot` in a fixed step order
//! - **gate**: Precondition check and operator confirmation before a restore
//! - **snapshot**: Capture + store + registry bookkeeping, and confirmed restores

pub mod capture;
pub mod gate;
pub mod restore;
pub mod snapshot;
pub mod target;
