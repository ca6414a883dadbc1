use sea_orm_migration::{prelude::*, schema::*};

/// Registry of guilds the bot is in, with when and where each was last snapshotted.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DiscordGuild::Table)
                    .if_not_exists()
                    .col(pk_auto(DiscordGuild::Id))
                    .col(string_uniq(DiscordGuild::GuildId))
                    .col(string(DiscordGuild::Name))
                    .col(timestamp_with_time_zone_null(DiscordGuild::LastSnapshotAt))
                    .col(string_null(DiscordGuild::LastSnapshotFile))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DiscordGuild::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DiscordGuild {
    Table,
    Id,
    GuildId,
    Name,
    LastSnapshotAt,
    LastSnapshotFile,
}
