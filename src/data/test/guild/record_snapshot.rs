use super::*;

/// Tests recording a saved artifact against a registered guild.
///
/// Expected: Ok(true) and both bookkeeping columns updated
#[tokio::test]
async fn records_snapshot_for_registered_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_registry_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::discord_guild::DiscordGuildFactory::new(db)
        .guild_id("123456789")
        .build()
        .await?;

    let repo = DiscordGuildRepository::new(db);
    let saved_at = Utc::now();
    let recorded = repo
        .record_snapshot(123456789, "2025-01-01_guild_snapshot", saved_at)
        .await?;

    assert!(recorded);

    let guild = repo.find_by_guild_id(123456789).await?.unwrap();
    assert_eq!(
        guild.last_snapshot_file.as_deref(),
        Some("2025-01-01_guild_snapshot")
    );
    let stored_at = guild.last_snapshot_at.unwrap();
    assert!((stored_at - saved_at).num_seconds().abs() < 1);
    assert!(!repo.needs_snapshot(123456789, Duration::hours(20)).await?);

    Ok(())
}

/// Tests recording against a guild that is not registered.
///
/// Expected: Ok(false)
#[tokio::test]
async fn ignores_unknown_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_registry_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DiscordGuildRepository::new(db);
    let recorded = repo
        .record_snapshot(123456789, "2025-01-01_guild_snapshot", Utc::now())
        .await?;

    assert!(!recorded);

    Ok(())
}
