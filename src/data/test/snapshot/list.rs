use super::*;

/// Tests that listing returns newest artifacts first.
///
/// Expected: artifacts sorted by capture date, descending
#[tokio::test]
async fn lists_newest_first() {
    let (_dir, store) = temp_store().await;

    store.save(&snapshot_on("Guild", 2025, 5, 30)).await.unwrap();
    store.save(&snapshot_on("Guild", 2025, 6, 1)).await.unwrap();
    store.save(&snapshot_on("Guild", 2025, 5, 31)).await.unwrap();

    let names = store.list("").await.unwrap();

    assert_eq!(
        names,
        vec![
            "2025-06-01_guild_snapshot",
            "2025-05-31_guild_snapshot",
            "2025-05-30_guild_snapshot",
        ]
    );
}

/// Tests substring filtering by guild slug or date fragment.
///
/// Expected: only matching artifacts
#[tokio::test]
async fn filters_by_substring() {
    let (_dir, store) = temp_store().await;

    store.save(&snapshot_on("Alpha", 2025, 6, 1)).await.unwrap();
    store.save(&snapshot_on("Beta", 2025, 6, 1)).await.unwrap();
    store.save(&snapshot_on("Alpha", 2025, 5, 1)).await.unwrap();

    assert_eq!(store.list("alpha").await.unwrap().len(), 2);
    assert_eq!(
        store.list("2025-06").await.unwrap(),
        vec!["2025-06-01_beta_snapshot", "2025-06-01_alpha_snapshot"]
    );
    assert!(store.list("gamma").await.unwrap().is_empty());
}

/// Tests that stray files in the snapshot directory are not listed.
///
/// Expected: only artifacts
#[tokio::test]
async fn ignores_foreign_files() {
    let (_dir, store) = temp_store().await;

    store.save(&snapshot_on("Guild", 2025, 6, 1)).await.unwrap();
    std::fs::write(store.root().join("notes.txt"), b"hello").unwrap();
    std::fs::write(
        store.root().join("2025-06-02_guild_snapshot.tmp"),
        b"partial",
    )
    .unwrap();

    assert_eq!(
        store.list("").await.unwrap(),
        vec!["2025-06-01_guild_snapshot"]
    );
}

/// Tests listing before the directory exists.
///
/// Expected: empty list
#[tokio::test]
async fn missing_directory_lists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("absent"));

    assert!(store.list("").await.unwrap().is_empty());
}
