//! Error types and operator-facing error rendering.
//!
//! This module provides the application's error hierarchy. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors. Since the only user
//! surface is Discord interactions, errors are rendered into short operator messages via
//! `AppError::operator_message` instead of HTTP responses.

pub mod config;
pub mod precondition;
pub mod snapshot;
pub mod target;

use thiserror::Error;

use crate::error::{
    config::ConfigError, precondition::PreconditionFailure, snapshot::SnapshotError,
    target::TargetError,
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application. Most variants
/// use `#[from]` for automatic error conversion.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Snapshot artifact could not be read, written or validated.
    #[error(transparent)]
    SnapshotErr(#[from] SnapshotError),

    /// A call against the live guild failed.
    #[error(transparent)]
    TargetErr(#[from] TargetError),

    /// The bot may not restore into the guild.
    #[error(transparent)]
    PreconditionErr(#[from] PreconditionFailure),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Renders the error as a message suitable for an interaction reply.
    ///
    /// Errors the operator can act on (missing or unreadable snapshots, refused preconditions)
    /// are shown verbatim. Everything else is logged in full and replaced with a generic message to
    /// avoid leaking internals into the guild.
    pub fn operator_message(&self) -> String {
        match self {
            Self::SnapshotErr(err) => err.to_string(),
            Self::PreconditionErr(err) => err.to_string(),
            err => {
                tracing::error!("Internal error: {}", err);
                "Something went wrong, please check the bot logs.".to_string()
            }
        }
    }
}
