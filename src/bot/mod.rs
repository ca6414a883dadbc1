//! Discord bot surface: gateway events, slash commands and confirmation buttons.
//!
//! The bot keeps the guild registry and the per-guild snapshot jobs in step with the
//! guilds it is in, and exposes two administrator-only slash commands:
//! - `/save_snapshot` - Capture the guild and write an artifact now
//! - `/load_snapshot file:<name>` - Restore an artifact after explicit confirmation
//!
//! # Gateway Intents
//!
//! Only `GUILDS` is required. Guild join/leave events drive job registration, and every
//! read during capture or restore goes through the HTTP API rather than the cache.

pub mod command;
pub mod handler;
pub mod start;
