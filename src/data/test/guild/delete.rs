use super::*;

/// Tests removing a guild the bot left.
///
/// Expected: Ok(true) and the guild is gone
#[tokio::test]
async fn deletes_registered_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_registry_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::discord_guild::DiscordGuildFactory::new(db)
        .guild_id("123456789")
        .build()
        .await?;

    let repo = DiscordGuildRepository::new(db);

    assert!(repo.delete(123456789).await?);
    assert!(repo.find_by_guild_id(123456789).await?.is_none());

    Ok(())
}

/// Tests removing a guild that was never registered.
///
/// Expected: Ok(false)
#[tokio::test]
async fn reports_unknown_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_registry_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DiscordGuildRepository::new(db);

    assert!(!repo.delete(123456789).await?);

    Ok(())
}
