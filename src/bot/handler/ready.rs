//! Ready event handler.
//!
//! Fired once per gateway connection after the handshake. Registers the bot's slash
//! commands globally; Discord replaces the previous set, so re-registering on every
//! reconnect is idempotent. Registry rows of guilds that are not part of the handshake
//! are dropped, as the bot left them while offline.

use serenity::all::{Command, Context, Ready};

use crate::{bot::command, data::guild::DiscordGuildRepository, state::AppState};

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `state` - Shared state for the guild registry
/// - `ctx` - Discord context used to register commands
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(state: &AppState, ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord ({} guilds)",
        ready.user.name,
        ready.guilds.len()
    );

    match Command::set_global_commands(&ctx.http, command::definitions()).await {
        Ok(commands) => tracing::debug!("Registered {} slash commands", commands.len()),
        Err(e) => tracing::error!("Failed to register slash commands: {:?}", e),
    }

    // A sharded ready lists only the guilds of its own shard
    if ready.shard.is_some_and(|shard| shard.total > 1) {
        return;
    }

    let present: Vec<u64> = ready.guilds.iter().map(|guild| guild.id.get()).collect();
    match DiscordGuildRepository::new(&state.db)
        .delete_absent(&present)
        .await
    {
        Ok(removed) => {
            for guild in removed {
                tracing::info!(
                    "Forgot guild {} ({}), the bot is no longer in it",
                    guild.name,
                    guild.guild_id
                );
            }
        }
        Err(e) => tracing::error!("Failed to prune the guild registry: {:?}", e),
    }
}
