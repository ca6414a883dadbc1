//! Routes interactions to the command that owns them.
//!
//! Slash commands are matched by name, autocomplete requests by the command they complete,
//! and button presses by the prefix of their custom id. Unknown interactions are logged and
//! ignored.

use serenity::all::{Context, Interaction};

use crate::{
    bot::command::{self, confirm, load, save},
    state::AppState,
};

/// Handles the interaction_create event.
///
/// # Arguments
/// - `state` - Shared state handed to the command
/// - `ctx` - Discord context for responding
/// - `interaction` - The command, autocomplete request or component press
pub async fn handle_interaction(state: &AppState, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => match command.data.name.as_str() {
            save::NAME => save::run(state, &ctx, &command).await,
            load::NAME => load::run(state, &ctx, &command).await,
            other => tracing::warn!("Received unknown command /{}", other),
        },
        Interaction::Autocomplete(autocomplete) => {
            if autocomplete.data.name == load::NAME {
                load::autocomplete(state, &ctx, &autocomplete).await;
            }
        }
        Interaction::Component(component) => {
            match command::parse_restore_button(&component.data.custom_id) {
                Some((action, token)) => {
                    confirm::run(state, &ctx, &component, action, token).await
                }
                None => tracing::debug!(
                    "Ignoring component with custom id {}",
                    component.data.custom_id
                ),
            }
        }
        _ => {}
    }
}
