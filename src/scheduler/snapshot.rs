use sea_orm::DatabaseConnection;
use serenity::all::{GuildId, UserId};
use serenity::http::Http;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

use crate::{
    data::{guild::DiscordGuildRepository, snapshot::SnapshotStore},
    error::AppError,
    service::{
        snapshot::SnapshotService,
        target::{GuildTarget, SerenityGuild},
    },
};

/// Minimum time between two snapshots of the same guild.
///
/// Keeps restarts and manual saves shortly before the scheduled run from producing
/// back-to-back captures.
static SNAPSHOT_BACKOFF_HOURS: i64 = 20;

/// Everything a scheduled capture needs besides the guild itself.
#[derive(Clone)]
pub struct SnapshotJobContext {
    pub db: DatabaseConnection,
    pub store: SnapshotStore,
    pub downloader: reqwest::Client,
    pub pacing: Duration,
    pub retention_days: Option<u32>,
}

/// One cron job per guild, keyed by guild id.
///
/// Jobs are added when the bot sees a guild and removed when it leaves, so no job ever
/// iterates over guilds it does not own.
#[derive(Clone)]
pub struct SnapshotScheduler {
    scheduler: JobScheduler,
    jobs: Arc<RwLock<HashMap<GuildId, Uuid>>>,
    cron: String,
    context: SnapshotJobContext,
}

impl SnapshotScheduler {
    /// Creates and starts an empty scheduler.
    ///
    /// # Arguments
    /// - `cron` - Schedule for every guild's job
    /// - `context` - Shared resources handed to each job run
    pub async fn start(cron: String, context: SnapshotJobContext) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new().await?;
        scheduler.start().await?;

        tracing::info!("Snapshot scheduler started with schedule {}", cron);

        Ok(Self {
            scheduler,
            jobs: Arc::new(RwLock::new(HashMap::new())),
            cron,
            context,
        })
    }

    /// Schedules daily snapshots of a guild, replacing any job it already has.
    pub async fn register(
        &self,
        guild_id: GuildId,
        http: Arc<Http>,
        bot_user_id: UserId,
    ) -> Result<(), AppError> {
        let context = self.context.clone();

        let job = Job::new_async(self.cron.as_str(), move |_uuid, _lock| {
            let context = context.clone();
            let http = http.clone();

            Box::pin(async move {
                let target = SerenityGuild::new(
                    http,
                    context.downloader.clone(),
                    guild_id,
                    bot_user_id,
                );

                match snapshot_guild(&context, &target).await {
                    Ok(Some(name)) => tracing::info!("Scheduled snapshot {} saved", name),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::error!("Scheduled snapshot of guild {} failed: {}", guild_id, e)
                    }
                }
            })
        })?;

        let mut jobs = self.jobs.write().await;
        if let Some(previous) = jobs.remove(&guild_id) {
            self.scheduler.remove(&previous).await?;
        }
        let uuid = self.scheduler.add(job).await?;
        jobs.insert(guild_id, uuid);

        tracing::debug!("Registered snapshot job {} for guild {}", uuid, guild_id);

        Ok(())
    }

    /// Removes a guild's job. Unknown guilds are ignored.
    pub async fn unregister(&self, guild_id: GuildId) -> Result<(), AppError> {
        if let Some(uuid) = self.jobs.write().await.remove(&guild_id) {
            self.scheduler.remove(&uuid).await?;
            tracing::debug!("Removed snapshot job {} for guild {}", uuid, guild_id);
        }

        Ok(())
    }

    pub async fn job_count(&self) -> usize {
        self.jobs.read().await.len()
    }
}

/// Captures and saves a guild unless it was snapshotted within the backoff window.
///
/// # Returns
/// - `Ok(Some(name))` - Artifact saved
/// - `Ok(None)` - Skipped, a recent snapshot exists
/// - `Err(AppError)` - Registry, capture or store failure
pub async fn snapshot_guild(
    context: &SnapshotJobContext,
    target: &dyn GuildTarget,
) -> Result<Option<String>, AppError> {
    let guild_id = target.guild_id();
    let guild_repo = DiscordGuildRepository::new(&context.db);

    let backoff = chrono::Duration::hours(SNAPSHOT_BACKOFF_HOURS);
    if !guild_repo.needs_snapshot(guild_id.get(), backoff).await? {
        tracing::debug!(
            "Skipping scheduled snapshot of guild {}: last snapshot less than {}h ago",
            guild_id,
            SNAPSHOT_BACKOFF_HOURS
        );
        return Ok(None);
    }

    let name = SnapshotService::new(&context.db, &context.store, target, context.pacing)
        .save(context.retention_days)
        .await?;

    Ok(Some(name))
}
