use super::*;

/// Tests forgetting guilds the bot left while offline.
///
/// Expected: only the guild missing from the present list removed and returned
#[tokio::test]
async fn deletes_guilds_not_present() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_registry_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for guild_id in ["111", "222"] {
        factory::discord_guild::DiscordGuildFactory::new(db)
            .guild_id(guild_id)
            .build()
            .await?;
    }

    let repo = DiscordGuildRepository::new(db);
    let removed = repo.delete_absent(&[111, 333]).await?;

    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].guild_id, 222);
    assert!(repo.find_by_guild_id(111).await?.is_some());
    assert!(repo.find_by_guild_id(222).await?.is_none());

    Ok(())
}

/// Tests pruning when every registered guild is still present.
///
/// Expected: Ok with nothing removed
#[tokio::test]
async fn keeps_present_guilds() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_registry_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::discord_guild::DiscordGuildFactory::new(db)
        .guild_id("111")
        .build()
        .await?;

    let repo = DiscordGuildRepository::new(db);

    assert!(repo.delete_absent(&[111]).await?.is_empty());
    assert_eq!(repo.get_all().await?.len(), 1);

    Ok(())
}
