use chrono::{DateTime, Duration, Utc};
use migration::OnConflict;
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};
use serenity::all::Guild;

use crate::model::guild::RegisteredGuild;

pub struct DiscordGuildRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DiscordGuildRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts the guild or refreshes its name, keeping snapshot bookkeeping intact.
    pub async fn upsert(&self, guild: &Guild) -> Result<RegisteredGuild, DbErr> {
        let model = entity::prelude::DiscordGuild::insert(entity::discord_guild::ActiveModel {
            guild_id: ActiveValue::Set(guild.id.get().to_string()),
            name: ActiveValue::Set(guild.name.clone()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::discord_guild::Column::GuildId)
                .update_columns([entity::discord_guild::Column::Name])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        RegisteredGuild::from_entity(model)
    }

    pub async fn get_all(&self) -> Result<Vec<RegisteredGuild>, DbErr> {
        entity::prelude::DiscordGuild::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(RegisteredGuild::from_entity)
            .collect()
    }

    /// Finds a guild by its Discord guild ID
    ///
    /// # Arguments
    /// - `guild_id`: Discord's unique identifier for the guild (u64)
    ///
    /// # Returns
    /// - `Ok(Some(RegisteredGuild))`: Guild found in database
    /// - `Ok(None)`: Guild not found (bot not in this guild)
    /// - `Err(DbErr)`: Database error during query
    pub async fn find_by_guild_id(&self, guild_id: u64) -> Result<Option<RegisteredGuild>, DbErr> {
        entity::prelude::DiscordGuild::find()
            .filter(entity::discord_guild::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?
            .map(RegisteredGuild::from_entity)
            .transpose()
    }

    /// Removes a guild the bot has left.
    ///
    /// # Returns
    /// - `Ok(true)`: Guild was registered and has been removed
    /// - `Ok(false)`: Guild was not registered
    pub async fn delete(&self, guild_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::DiscordGuild::delete_many()
            .filter(entity::discord_guild::Column::GuildId.eq(guild_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Removes every registered guild missing from `present`.
    ///
    /// Used on ready to forget guilds the bot was removed from while it was offline, since
    /// no `guild_delete` arrives for those.
    ///
    /// # Returns
    /// - `Ok(Vec<RegisteredGuild>)`: The guilds that were removed
    /// - `Err(DbErr)`: Database error, or a stored guild id could not be parsed
    pub async fn delete_absent(&self, present: &[u64]) -> Result<Vec<RegisteredGuild>, DbErr> {
        let mut removed = Vec::new();
        for guild in self.get_all().await? {
            if !present.contains(&guild.guild_id) && self.delete(guild.guild_id).await? {
                removed.push(guild);
            }
        }

        Ok(removed)
    }

    /// Checks whether a scheduled snapshot is due for the guild.
    ///
    /// A guild needs a snapshot when it is unknown, has never been snapshotted, or its last
    /// snapshot is at least `backoff` old. The backoff keeps restarts of the bot from
    /// producing several snapshots of the same guild in one day.
    ///
    /// # Arguments
    /// - `guild_id`: Discord's unique identifier for the guild (u64)
    /// - `backoff`: Minimum age of the previous snapshot
    ///
    /// # Returns
    /// - `Ok(true)`: A snapshot should be taken
    /// - `Ok(false)`: A recent snapshot exists
    /// - `Err(DbErr)`: Database error during query
    pub async fn needs_snapshot(&self, guild_id: u64, backoff: Duration) -> Result<bool, DbErr> {
        let guild = self.find_by_guild_id(guild_id).await?;

        Ok(match guild.and_then(|g| g.last_snapshot_at) {
            Some(last) => Utc::now() - last >= backoff,
            None => true,
        })
    }

    /// Records a saved snapshot artifact for the guild.
    ///
    /// # Returns
    /// - `Ok(true)`: Guild row updated
    /// - `Ok(false)`: Guild is not registered, nothing recorded
    pub async fn record_snapshot(
        &self,
        guild_id: u64,
        file_name: &str,
        saved_at: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::DiscordGuild::update_many()
            .col_expr(
                entity::discord_guild::Column::LastSnapshotAt,
                Expr::value(saved_at),
            )
            .col_expr(
                entity::discord_guild::Column::LastSnapshotFile,
                Expr::value(file_name.to_string()),
            )
            .filter(entity::discord_guild::Column::GuildId.eq(guild_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
