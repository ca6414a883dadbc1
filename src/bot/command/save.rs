//! `/save_snapshot`: capture the guild and write an artifact immediately.

use serenity::all::{
    CommandInteraction, Context, CreateCommand, EditInteractionResponse, Permissions,
};

use crate::{
    bot::command::{finish, is_administrator, reply},
    service::snapshot::SnapshotService,
    state::AppState,
};

pub const NAME: &str = "save_snapshot";

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Capture this server's roles, channels and pins into a snapshot")
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .dm_permission(false)
}

/// Captures the invoking guild and replies with the artifact name.
///
/// Capture paces its calls and downloads attachments, so the reply is deferred first and
/// edited once the artifact is written.
pub async fn run(state: &AppState, ctx: &Context, command: &CommandInteraction) {
    let Some(guild_id) = command.guild_id else {
        reply(ctx, command, "This command can only be used in a server.").await;
        return;
    };
    if !is_administrator(command) {
        reply(ctx, command, "Only administrators can save snapshots.").await;
        return;
    }

    if let Err(e) = command.defer_ephemeral(&ctx.http).await {
        tracing::error!("Failed to defer /{} reply: {:?}", NAME, e);
        return;
    }

    tracing::info!(
        "{} requested a snapshot of guild {}",
        command.user.name,
        guild_id
    );

    let target = state.target(ctx, guild_id);
    let result = SnapshotService::new(&state.db, &state.store, &target, state.pacing)
        .save(state.retention_days)
        .await
        .map(|name| {
            EditInteractionResponse::new().content(format!("Snapshot saved as `{}`.", name))
        });

    finish(ctx, command, result).await;
}
