//! Discord guild factory for creating registry rows.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating registered guilds with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::discord_guild::DiscordGuildFactory;
///
/// let guild = DiscordGuildFactory::new(&db)
///     .guild_id("987654321")
///     .name("CustomGuild")
///     .build()
///     .await?;
/// ```
pub struct DiscordGuildFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    name: String,
    last_snapshot_at: Option<DateTime<Utc>>,
    last_snapshot_file: Option<String>,
}

impl<'a> DiscordGuildFactory<'a> {
    /// Creates a new DiscordGuildFactory with default values.
    ///
    /// Defaults:
    /// - guild_id: auto-incremented id
    /// - name: `"Guild {id}"`
    /// - never snapshotted
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: id.to_string(),
            name: format!("Guild {}", id),
            last_snapshot_at: None,
            last_snapshot_file: None,
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Marks the guild as snapshotted at `at` into the artifact `file`.
    pub fn last_snapshot(mut self, at: DateTime<Utc>, file: impl Into<String>) -> Self {
        self.last_snapshot_at = Some(at);
        self.last_snapshot_file = Some(file.into());
        self
    }

    /// Builds and inserts the guild row.
    ///
    /// # Returns
    /// - `Ok(entity::discord_guild::Model)` - Created guild row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::discord_guild::Model, DbErr> {
        entity::discord_guild::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            name: ActiveValue::Set(self.name),
            last_snapshot_at: ActiveValue::Set(self.last_snapshot_at),
            last_snapshot_file: ActiveValue::Set(self.last_snapshot_file),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a registered guild with default values.
///
/// Shorthand for `DiscordGuildFactory::new(db).build().await`.
pub async fn create_guild(db: &DatabaseConnection) -> Result<entity::discord_guild::Model, DbErr> {
    DiscordGuildFactory::new(db).build().await
}
