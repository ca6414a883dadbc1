//! Slash commands and the restore confirmation buttons.
//!
//! - `save` - `/save_snapshot`
//! - `load` - `/load_snapshot` and its autocomplete
//! - `confirm` - Confirm and Cancel buttons of a pending restore
//!
//! Both commands require the Administrator permission and are only available in guilds.
//! Every reply is ephemeral so restore previews stay with the operator.

use serenity::all::{
    CommandInteraction, Context, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditInteractionResponse,
};

use crate::error::AppError;

pub mod confirm;
pub mod load;
pub mod save;

/// Prefix of the custom ids on restore confirmation buttons.
const RESTORE_BUTTON_PREFIX: &str = "snapshot_restore";

/// Which button of a restore prompt was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreAction {
    Confirm,
    Deny,
}

impl RestoreAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Deny => "deny",
        }
    }
}

/// All slash commands the bot registers.
pub fn definitions() -> Vec<CreateCommand> {
    vec![save::definition(), load::definition()]
}

/// Custom id of a restore prompt button, e.g. `snapshot_restore:confirm:<token>`.
pub fn restore_button_id(action: RestoreAction, token: &str) -> String {
    format!("{}:{}:{}", RESTORE_BUTTON_PREFIX, action.as_str(), token)
}

/// Splits a restore button custom id into its action and token.
///
/// # Returns
/// - `Some((action, token))` - A restore prompt button
/// - `None` - Any other custom id
pub fn parse_restore_button(custom_id: &str) -> Option<(RestoreAction, &str)> {
    let mut parts = custom_id.splitn(3, ':');
    if parts.next()? != RESTORE_BUTTON_PREFIX {
        return None;
    }

    let action = match parts.next()? {
        "confirm" => RestoreAction::Confirm,
        "deny" => RestoreAction::Deny,
        _ => return None,
    };
    let token = parts.next().filter(|token| !token.is_empty())?;

    Some((action, token))
}

/// Whether the invoking member holds the Administrator permission.
///
/// Discord hides the commands from other members by default, but server admins can
/// override command permissions, so the check is repeated here.
pub fn is_administrator(command: &CommandInteraction) -> bool {
    command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|permissions| permissions.administrator())
}

/// Replies to a command with an ephemeral message.
pub async fn reply(ctx: &Context, command: &CommandInteraction, content: impl Into<String>) {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );

    if let Err(e) = command.create_response(&ctx.http, response).await {
        tracing::error!("Failed to reply to /{}: {:?}", command.data.name, e);
    }
}

/// Replaces the deferred reply of a command with the outcome of its work.
pub async fn finish(
    ctx: &Context,
    command: &CommandInteraction,
    result: Result<EditInteractionResponse, AppError>,
) {
    let response = result
        .unwrap_or_else(|e| EditInteractionResponse::new().content(e.operator_message()));

    if let Err(e) = command.edit_response(&ctx.http, response).await {
        tracing::error!("Failed to edit reply to /{}: {:?}", command.data.name, e);
    }
}
