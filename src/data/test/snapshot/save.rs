use super::*;

/// Tests the artifact name derived from capture date and guild name.
///
/// Expected: `<YYYY-MM-DD>_<lowercase name with underscores>_snapshot`
#[tokio::test]
async fn names_artifact_by_date_and_guild() {
    let (_dir, store) = temp_store().await;

    let name = store.save(&sample_snapshot()).await.unwrap();

    assert_eq!(name, "2025-06-01_test_guild_snapshot");
    assert!(store.root().join(&name).exists());
}

/// Tests that path separators in guild names cannot escape the store directory.
///
/// Expected: separators replaced by underscores
#[test]
fn slug_replaces_path_separators() {
    assert_eq!(SnapshotStore::guild_slug("My/Guild\\Name"), "my_guild_name");
    assert_eq!(
        SnapshotStore::artifact_name(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(), "A B"),
        "2025-01-02_a_b_snapshot"
    );
}

/// Tests that two saves on the same day replace one another.
///
/// Expected: one artifact holding the later snapshot
#[tokio::test]
async fn same_day_save_overwrites() {
    let (_dir, store) = temp_store().await;

    let first = snapshot_on("Guild", 2025, 6, 1);
    let mut second = snapshot_on("Guild", 2025, 6, 1);
    second.guild_id = 2;

    store.save(&first).await.unwrap();
    let name = store.save(&second).await.unwrap();

    assert_eq!(store.list("").await.unwrap().len(), 1);
    assert_eq!(store.load(&name).await.unwrap().guild_id, 2);
}

/// Tests that a snapshot breaking the role invariant is never written.
///
/// Expected: Err(MissingDefaultRole) and no artifact on disk
#[tokio::test]
async fn rejects_snapshot_without_default_role() {
    let (_dir, store) = temp_store().await;

    let snapshot = GuildSnapshot::new(1, "Guild", Utc::now());
    let result = store.save(&snapshot).await;

    assert!(matches!(result, Err(SnapshotError::MissingDefaultRole)));
    assert!(store.list("").await.unwrap().is_empty());
}
