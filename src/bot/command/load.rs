//! `/load_snapshot file:<name>`: request a restore and show what it would destroy.
//!
//! The command never changes the guild itself. It loads the artifact, runs the request
//! through the confirmation gate and answers with either the precondition that failed or a
//! preview with Restore and Cancel buttons. The buttons are handled in `confirm`.

use serenity::all::{
    ButtonStyle, CommandInteraction, CommandOptionType, Context, CreateActionRow,
    CreateAutocompleteResponse, CreateButton, CreateCommand, CreateCommandOption,
    CreateInteractionResponse, EditInteractionResponse, GuildId, Permissions, UserId,
};
use std::time::Duration;

use crate::{
    bot::command::{finish, is_administrator, reply, restore_button_id, RestoreAction},
    error::AppError,
    model::restore::RestorePreview,
    service::gate::GateDecision,
    state::AppState,
};

pub const NAME: &str = "load_snapshot";
const FILE_OPTION: &str = "file";

/// Discord accepts at most 25 autocomplete choices.
const MAX_CHOICES: usize = 25;
/// Names listed per preview section before the rest is summarized as a count.
const PREVIEW_LIST_LIMIT: usize = 15;
/// Discord rejects messages longer than this many characters.
const MAX_CONTENT_LENGTH: usize = 2000;

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Restore this server from a snapshot, replacing its roles and channels")
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .dm_permission(false)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                FILE_OPTION,
                "Snapshot to restore",
            )
            .required(true)
            .set_autocomplete(true),
        )
}

/// Handles the command: load the artifact and park the restore for confirmation.
pub async fn run(state: &AppState, ctx: &Context, command: &CommandInteraction) {
    let Some(guild_id) = command.guild_id else {
        reply(ctx, command, "This command can only be used in a server.").await;
        return;
    };
    if !is_administrator(command) {
        reply(ctx, command, "Only administrators can restore snapshots.").await;
        return;
    }
    let Some(file) = command
        .data
        .options
        .iter()
        .find(|option| option.name == FILE_OPTION)
        .and_then(|option| option.value.as_str())
    else {
        reply(ctx, command, "Choose a snapshot to restore.").await;
        return;
    };

    if let Err(e) = command.defer_ephemeral(&ctx.http).await {
        tracing::error!("Failed to defer /{} reply: {:?}", NAME, e);
        return;
    }

    let result = request_restore(state, ctx, guild_id, command.user.id, file).await;

    finish(ctx, command, result).await;
}

/// Offers stored artifact names containing what the operator has typed so far.
pub async fn autocomplete(state: &AppState, ctx: &Context, autocomplete: &CommandInteraction) {
    let typed = autocomplete
        .data
        .autocomplete()
        .map(|option| option.value.to_string())
        .unwrap_or_default();

    let names = match state.store.list(&typed).await {
        Ok(names) => names,
        Err(e) => {
            tracing::error!("Failed to list snapshots for autocomplete: {:?}", e);
            Vec::new()
        }
    };

    let choices = names
        .into_iter()
        .take(MAX_CHOICES)
        .fold(CreateAutocompleteResponse::new(), |choices, name| {
            choices.add_string_choice(name.clone(), name)
        });

    if let Err(e) = autocomplete
        .create_response(&ctx.http, CreateInteractionResponse::Autocomplete(choices))
        .await
    {
        tracing::error!("Failed to answer autocomplete: {:?}", e);
    }
}

async fn request_restore(
    state: &AppState,
    ctx: &Context,
    guild_id: GuildId,
    operator: UserId,
    file: &str,
) -> Result<EditInteractionResponse, AppError> {
    let snapshot = state.store.load(file).await?;
    let target = state.target(ctx, guild_id);

    let decision = state
        .gate
        .request(&target, operator, file.to_string(), snapshot)
        .await?;

    let response = match decision {
        GateDecision::Aborted(failure) => {
            EditInteractionResponse::new().content(format!("Restore aborted: {}", failure))
        }
        GateDecision::Pending { token, preview } => {
            tracing::info!(
                "Restore of {} into guild {} awaiting confirmation from {}",
                file,
                guild_id,
                operator
            );

            let buttons = CreateActionRow::Buttons(vec![
                CreateButton::new(restore_button_id(RestoreAction::Confirm, &token))
                    .label("Confirm")
                    .style(ButtonStyle::Danger),
                CreateButton::new(restore_button_id(RestoreAction::Deny, &token))
                    .label("Cancel")
                    .style(ButtonStyle::Secondary),
            ]);

            EditInteractionResponse::new()
                .content(preview_message(file, &preview, state.gate.window()))
                .components(vec![buttons])
        }
    };

    Ok(response)
}

/// Renders the preview shown above the confirmation buttons.
///
/// Long names can push the lists past Discord's message limit, so the header and the lists
/// are cut to fit while the expiry line is always kept.
fn preview_message(file: &str, preview: &RestorePreview, window: Duration) -> String {
    let header = format!(
        "**Restore `{}`?**\nThis deletes {} roles and {} channels, then rebuilds the server from the snapshot.\n",
        file,
        preview.roles_to_delete.len(),
        preview.channels_to_delete.len()
    );

    let mut lists = format!(
        "Roles to delete: {}\n",
        summarize(&preview.roles_to_delete)
    );
    lists.push_str(&format!(
        "Channels to delete: {}\n",
        summarize(&preview.channels_to_delete)
    ));
    if !preview.missing_bots.is_empty() {
        lists.push_str(&format!(
            "Bots not in this server, their roles are skipped: {}\n",
            summarize(&preview.missing_bots)
        ));
    }

    let minutes = window.as_secs().div_ceil(60);
    let footer = format!(
        "This request expires in {} minute{}.",
        minutes,
        if minutes == 1 { "" } else { "s" }
    );

    let mut budget = MAX_CONTENT_LENGTH.saturating_sub(footer.chars().count());
    let header = truncate_line(&header, budget);
    budget = budget.saturating_sub(header.chars().count());
    let lists = truncate_line(&lists, budget);

    format!("{}{}{}", header, lists, footer)
}

/// Cuts newline-terminated `text` to at most `limit` characters, marking the cut with an
/// ellipsis and keeping the final newline.
fn truncate_line(text: &str, limit: usize) -> String {
    const MARKER: &str = "…\n";

    if text.chars().count() <= limit {
        return text.to_string();
    }

    let marker_length = MARKER.chars().count();
    if limit < marker_length {
        return String::new();
    }

    let mut cut: String = text.chars().take(limit - marker_length).collect();
    cut.push_str(MARKER);
    cut
}

fn summarize(names: &[String]) -> String {
    if names.is_empty() {
        return "none".to_string();
    }

    let shown = names
        .iter()
        .take(PREVIEW_LIST_LIMIT)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");

    match names.len().saturating_sub(PREVIEW_LIST_LIMIT) {
        0 => shown,
        rest => format!("{} and {} more", shown, rest),
    }
}
