use super::*;

/// Tests that an unregistered guild needs a snapshot.
///
/// Expected: Ok(true)
#[tokio::test]
async fn needs_snapshot_for_unknown_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_registry_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DiscordGuildRepository::new(db);

    assert!(repo.needs_snapshot(123456789, Duration::hours(20)).await?);

    Ok(())
}

/// Tests that a registered guild without any snapshot needs one.
///
/// Expected: Ok(true)
#[tokio::test]
async fn needs_snapshot_when_never_snapshotted() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_registry_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::discord_guild::DiscordGuildFactory::new(db)
        .guild_id("123456789")
        .build()
        .await?;

    let repo = DiscordGuildRepository::new(db);

    assert!(repo.needs_snapshot(123456789, Duration::hours(20)).await?);

    Ok(())
}

/// Tests that a snapshot taken an hour ago suppresses another one.
///
/// Expected: Ok(false)
#[tokio::test]
async fn no_snapshot_needed_after_recent_snapshot() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_registry_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::discord_guild::DiscordGuildFactory::new(db)
        .guild_id("123456789")
        .last_snapshot(Utc::now() - Duration::hours(1), "recent_snapshot")
        .build()
        .await?;

    let repo = DiscordGuildRepository::new(db);

    assert!(!repo.needs_snapshot(123456789, Duration::hours(20)).await?);

    Ok(())
}

/// Tests that yesterday's snapshot is old enough for a new one.
///
/// Expected: Ok(true)
#[tokio::test]
async fn needs_snapshot_after_backoff_elapsed() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_registry_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::discord_guild::DiscordGuildFactory::new(db)
        .guild_id("123456789")
        .last_snapshot(Utc::now() - Duration::hours(24), "old_snapshot")
        .build()
        .await?;

    let repo = DiscordGuildRepository::new(db);

    assert!(repo.needs_snapshot(123456789, Duration::hours(20)).await?);

    Ok(())
}
