//! Restore and Cancel buttons of a pending restore.
//!
//! Confirming takes the request out of the gate and runs the restore in a background task.
//! A restore deletes every channel, including the one holding the prompt, so the outcome
//! is logged rather than replied. The completion notice posted by the restore tells the
//! guild when it is done. A restore that fails before touching the guild (for example a
//! precondition that no longer holds) still edits the prompt with the reason.

use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    EditInteractionResponse,
};

use crate::{
    bot::command::RestoreAction,
    service::{
        gate::{ConfirmOutcome, PendingRestore},
        snapshot::SnapshotService,
    },
    state::AppState,
};

/// Handles a press of either button.
///
/// # Arguments
/// - `state` - Shared state holding the gate
/// - `ctx` - Discord context for responding and restoring
/// - `component` - The button interaction
/// - `action` - Which button was pressed
/// - `token` - Token of the pending request, from the button's custom id
pub async fn run(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
    action: RestoreAction,
    token: &str,
) {
    let operator = component.user.id;
    let outcome = match action {
        RestoreAction::Confirm => state.gate.confirm(token, operator).await,
        RestoreAction::Deny => state.gate.deny(token, operator).await,
    };

    let content = match outcome {
        ConfirmOutcome::WrongOperator => {
            let response = CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content("Only the administrator who requested this restore can answer it.")
                    .ephemeral(true),
            );
            if let Err(e) = component.create_response(&ctx.http, response).await {
                tracing::error!("Failed to reply to restore button: {:?}", e);
            }
            return;
        }
        ConfirmOutcome::Unknown => {
            "This restore request has expired or was already answered.".to_string()
        }
        ConfirmOutcome::Accepted(pending) => match action {
            RestoreAction::Deny => {
                tracing::info!(
                    "Restore of {} into guild {} cancelled",
                    pending.snapshot_name,
                    pending.guild_id
                );
                format!("Restore of `{}` cancelled.", pending.snapshot_name)
            }
            RestoreAction::Confirm => {
                let content = format!(
                    "Restoring `{}`. This takes a while; a notice is posted in the server once it is done.",
                    pending.snapshot_name
                );
                spawn_restore(state.clone(), ctx.clone(), component.clone(), pending);
                content
            }
        },
    };

    let response = CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new()
            .content(content)
            .components(Vec::new()),
    );
    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::error!("Failed to update restore prompt: {:?}", e);
    }
}

/// Runs a confirmed restore and returns its guild to `Idle` afterwards.
fn spawn_restore(
    state: AppState,
    ctx: Context,
    component: ComponentInteraction,
    pending: PendingRestore,
) {
    tokio::spawn(async move {
        let guild_id = pending.guild_id;
        let target = state.target(&ctx, guild_id);

        tracing::info!(
            "Restoring {} into guild {} for {}",
            pending.snapshot_name,
            guild_id,
            pending.operator
        );

        let result = SnapshotService::new(&state.db, &state.store, &target, state.pacing)
            .restore(&pending.snapshot)
            .await;

        match result {
            Ok(report) => tracing::info!(
                "Restored {} into guild {} with {} failed calls",
                pending.snapshot_name,
                guild_id,
                report.failure_count()
            ),
            Err(e) => {
                tracing::error!(
                    "Restore of {} into guild {} failed: {}",
                    pending.snapshot_name,
                    guild_id,
                    e
                );

                let response = EditInteractionResponse::new()
                    .content(format!("Restore failed: {}", e.operator_message()));
                if let Err(e) = component.edit_response(&ctx.http, response).await {
                    tracing::debug!("Could not report restore failure to operator: {:?}", e);
                }
            }
        }

        state.gate.finish(guild_id).await;
    });
}
