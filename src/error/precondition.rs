use thiserror::Error;

/// Reasons a restore is refused before any destructive call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreconditionFailure {
    /// Another role sits above every role the bot holds.
    #[error("Bot does not have the top role. Please ensure that it does before loading a snapshot.")]
    NotTopRole,

    /// The bot has no role managed by its own integration, so it cannot be kept on top.
    #[error("Bot has no integration role in this server.")]
    MissingManagedRole,

    /// The bot's integration role lacks the administrator permission.
    #[error("Bot does not have administrator privileges.")]
    NotAdministrator,
}
