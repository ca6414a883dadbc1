use super::*;

/// Tests finding a registered guild.
///
/// Expected: Ok(Some) with the matching guild
#[tokio::test]
async fn finds_registered_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_registry_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_guild(db).await?;
    let guild_id = created.guild_id.parse::<u64>().unwrap();

    let repo = DiscordGuildRepository::new(db);
    let found = repo.find_by_guild_id(guild_id).await?;

    assert!(found.is_some());
    assert_eq!(found.unwrap().name, created.name);

    Ok(())
}

/// Tests looking up a guild the bot is not in.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_registry_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_guild(db).await?;

    let repo = DiscordGuildRepository::new(db);
    let found = repo.find_by_guild_id(999999999).await?;

    assert!(found.is_none());

    Ok(())
}

/// Tests that a corrupt guild id surfaces as a database error.
///
/// Expected: Err(DbErr::Custom)
#[tokio::test]
async fn fails_on_unparseable_guild_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_registry_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::discord_guild::DiscordGuildFactory::new(db)
        .guild_id("not-a-snowflake")
        .build()
        .await?;

    let repo = DiscordGuildRepository::new(db);
    let result = repo.get_all().await;

    assert!(matches!(result, Err(DbErr::Custom(_))));

    Ok(())
}
