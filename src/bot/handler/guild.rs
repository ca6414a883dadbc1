//! Guild event handlers keeping the registry and snapshot jobs in step with the bot's guilds.
//!
//! `guild_create` fires on startup for every guild the bot is already in, when it joins a
//! new guild, and when a guild comes back after an outage. Each time the guild row is
//! upserted and its snapshot job (re-)registered, so a restart never leaves a guild without
//! its daily capture.
//!
//! `guild_delete` fires both when the bot is removed and when a guild becomes unavailable.
//! Only removal drops the job and the registry row; an outage keeps both so the schedule
//! resumes once the guild is back.

use serenity::all::{Context, Guild, UnavailableGuild};

use crate::{data::guild::DiscordGuildRepository, state::AppState};

/// Handles the guild_create event.
///
/// # Arguments
/// - `state` - Shared state for the registry and the scheduler
/// - `ctx` - Discord context whose HTTP client the snapshot job will use
/// - `guild` - Guild data from Discord
/// - `_is_new` - Whether this is a new guild join (unused)
pub async fn handle_guild_create(
    state: &AppState,
    ctx: Context,
    guild: Guild,
    _is_new: Option<bool>,
) {
    tracing::debug!("Guild create event: {} ({})", guild.name, guild.id);

    let guild_repo = DiscordGuildRepository::new(&state.db);

    if let Err(e) = guild_repo.upsert(&guild).await {
        tracing::error!(
            "Failed to upsert guild {} ({}): {:?}",
            guild.id,
            guild.name,
            e
        );
        return;
    }

    let bot_user_id = ctx.cache.current_user().id;

    if let Err(e) = state
        .scheduler
        .register(guild.id, ctx.http.clone(), bot_user_id)
        .await
    {
        tracing::error!(
            "Failed to schedule snapshots for guild {}: {:?}",
            guild.id,
            e
        );
    }
}

/// Handles the guild_delete event.
///
/// # Arguments
/// - `state` - Shared state for the registry and the scheduler
/// - `_ctx` - Discord context (unused)
/// - `incomplete` - Id of the guild and whether it merely became unavailable
/// - `_full` - Cached guild data if available (unused)
pub async fn handle_guild_delete(
    state: &AppState,
    _ctx: Context,
    incomplete: UnavailableGuild,
    _full: Option<Guild>,
) {
    let guild_id = incomplete.id;

    if incomplete.unavailable {
        tracing::warn!(
            "Guild {} became unavailable, keeping its snapshot job",
            guild_id
        );
        return;
    }

    if let Err(e) = state.scheduler.unregister(guild_id).await {
        tracing::error!(
            "Failed to remove snapshot job for guild {}: {:?}",
            guild_id,
            e
        );
    }

    let guild_repo = DiscordGuildRepository::new(&state.db);

    match guild_repo.delete(guild_id.get()).await {
        Ok(true) => tracing::info!("Bot removed from guild {}", guild_id),
        Ok(false) => tracing::debug!("Removed from unregistered guild {}", guild_id),
        Err(e) => tracing::error!("Failed to delete guild {}: {:?}", guild_id, e),
    }
}
