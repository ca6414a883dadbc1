//! Shared state handed to every gateway event handler.
//!
//! Initialized once during startup. All fields are cheap to clone:
//! - `DatabaseConnection` is a connection pool (clones share the pool)
//! - `reqwest::Client` uses an `Arc` internally
//! - `ConfirmationGate` and `SnapshotScheduler` share their maps through `Arc`

use sea_orm::DatabaseConnection;
use serenity::all::{Context, GuildId};
use std::time::Duration;

use crate::{
    data::snapshot::SnapshotStore,
    scheduler::snapshot::SnapshotScheduler,
    service::{gate::ConfirmationGate, target::SerenityGuild},
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub store: SnapshotStore,
    /// Client for CDN downloads (attachments, role icons).
    pub downloader: reqwest::Client,
    pub gate: ConfirmationGate,
    pub scheduler: SnapshotScheduler,
    /// Delay after each remote call during capture and restore.
    pub pacing: Duration,
    pub retention_days: Option<u32>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        store: SnapshotStore,
        downloader: reqwest::Client,
        gate: ConfirmationGate,
        scheduler: SnapshotScheduler,
        pacing: Duration,
        retention_days: Option<u32>,
    ) -> Self {
        Self {
            db,
            store,
            downloader,
            gate,
            scheduler,
            pacing,
            retention_days,
        }
    }

    /// The live guild `guild_id`, acted on as the bot user of `ctx`.
    pub fn target(&self, ctx: &Context, guild_id: GuildId) -> SerenityGuild {
        SerenityGuild::new(
            ctx.http.clone(),
            self.downloader.clone(),
            guild_id,
            ctx.cache.current_user().id,
        )
    }
}
