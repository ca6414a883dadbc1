//! Registered guild domain model.
//!
//! Tracks the guilds the bot has joined and when each was last snapshotted. Handles
//! conversion between entity models from the database and domain models used in the
//! service layer.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

/// A guild the bot is in, with its snapshot bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredGuild {
    /// Discord guild ID as a u64.
    pub guild_id: u64,
    /// Guild display name at the time of the last sync.
    pub name: String,
    /// When the last scheduled or manual snapshot was saved.
    pub last_snapshot_at: Option<DateTime<Utc>>,
    /// Artifact name of the last saved snapshot.
    pub last_snapshot_file: Option<String>,
}

impl RegisteredGuild {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The database entity model to convert
    ///
    /// # Returns
    /// - `Ok(RegisteredGuild)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Failed to parse guild_id as u64
    pub fn from_entity(entity: entity::discord_guild::Model) -> Result<Self, DbErr> {
        let guild_id = entity
            .guild_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse guild_id: {}", e)))?;

        Ok(Self {
            guild_id,
            name: entity.name,
            last_snapshot_at: entity.last_snapshot_at,
            last_snapshot_file: entity.last_snapshot_file,
        })
    }
}
