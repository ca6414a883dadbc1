//! Snapshot orchestration.
//!
//! Glues the capture pipeline, the snapshot store, the guild registry and the restore
//! orchestrator together for one guild. Both the slash commands and the scheduler go
//! through this service.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use std::time::Duration;

use crate::{
    data::{guild::DiscordGuildRepository, snapshot::SnapshotStore},
    error::AppError,
    model::{restore::RestoreReport, snapshot::GuildSnapshot},
    service::{
        capture::CaptureService, gate::check_preconditions, restore::RestoreService,
        target::GuildTarget,
    },
};

pub struct SnapshotService<'a> {
    db: &'a DatabaseConnection,
    store: &'a SnapshotStore,
    target: &'a dyn GuildTarget,
    /// Delay after each remote call during capture and restore.
    pacing: Duration,
}

impl<'a> SnapshotService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        store: &'a SnapshotStore,
        target: &'a dyn GuildTarget,
        pacing: Duration,
    ) -> Self {
        Self {
            db,
            store,
            target,
            pacing,
        }
    }

    /// Captures the guild, saves the artifact and records it in the registry.
    ///
    /// When `retention_days` is set, the guild's artifacts older than that many days are
    /// pruned afterwards. Pruning failures are logged and do not fail the save.
    ///
    /// # Returns
    /// - `Ok(String)` - Name of the saved artifact
    /// - `Err(AppError::TargetErr)` - The guild could not be read
    /// - `Err(AppError::SnapshotErr)` - The artifact could not be written
    /// - `Err(AppError::DbErr)` - The registry could not be updated
    pub async fn save(&self, retention_days: Option<u32>) -> Result<String, AppError> {
        let snapshot = CaptureService::new(self.target, self.pacing)
            .capture()
            .await?;
        let name = self.store.save(&snapshot).await?;

        let guild_repo = DiscordGuildRepository::new(self.db);
        let recorded = guild_repo
            .record_snapshot(snapshot.guild_id, &name, Utc::now())
            .await?;
        if !recorded {
            tracing::debug!(
                "Guild {} is not registered, snapshot {} not recorded",
                snapshot.guild_id,
                name
            );
        }

        if let Some(days) = retention_days {
            let cutoff = snapshot
                .captured_at
                .date_naive()
                .checked_sub_days(chrono::Days::new(days.into()));
            match cutoff {
                Some(cutoff) => {
                    if let Err(e) = self.store.prune_before(&snapshot.guild_name, cutoff).await {
                        tracing::warn!(
                            "Failed to prune snapshots of {}: {}",
                            snapshot.guild_name,
                            e
                        );
                    }
                }
                // Retention reaches past the earliest representable date, nothing is old enough
                None => tracing::debug!("Retention of {} days keeps every snapshot", days),
            }
        }

        Ok(name)
    }

    /// Restores a confirmed snapshot after re-checking the preconditions.
    ///
    /// The guild may have changed while the request was pending, so the bot's authority is
    /// verified again before the first destructive call.
    ///
    /// # Returns
    /// - `Ok(RestoreReport)` - The restore ran; per-call failures are in the report
    /// - `Err(AppError::PreconditionErr)` - The bot lost its authority; nothing was changed
    /// - `Err(AppError::TargetErr)` - The guild could not be read; nothing was changed
    pub async fn restore(&self, snapshot: &GuildSnapshot) -> Result<RestoreReport, AppError> {
        if let Some(failure) = check_preconditions(self.target).await? {
            return Err(failure.into());
        }

        let report = RestoreService::new(self.target, self.pacing)
            .restore(snapshot)
            .await?;

        Ok(report)
    }
}
