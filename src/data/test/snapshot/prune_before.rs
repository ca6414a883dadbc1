use super::*;

/// Tests pruning artifacts older than the retention cutoff.
///
/// Expected: older artifacts of the guild removed, the cutoff day kept
#[tokio::test]
async fn prunes_artifacts_before_cutoff() {
    let (_dir, store) = temp_store().await;

    store.save(&snapshot_on("Guild", 2025, 5, 1)).await.unwrap();
    store.save(&snapshot_on("Guild", 2025, 5, 15)).await.unwrap();
    store.save(&snapshot_on("Guild", 2025, 6, 1)).await.unwrap();

    let removed = store
        .prune_before("Guild", NaiveDate::from_ymd_opt(2025, 5, 15).unwrap())
        .await
        .unwrap();

    assert_eq!(removed, vec!["2025-05-01_guild_snapshot"]);
    assert_eq!(
        store.list("").await.unwrap(),
        vec!["2025-06-01_guild_snapshot", "2025-05-15_guild_snapshot"]
    );
}

/// Tests that pruning one guild leaves other guilds alone, even with overlapping names.
///
/// Expected: only the exact guild slug is pruned
#[tokio::test]
async fn leaves_other_guilds_untouched() {
    let (_dir, store) = temp_store().await;

    store.save(&snapshot_on("Guild", 2025, 5, 1)).await.unwrap();
    store.save(&snapshot_on("Big Guild", 2025, 5, 1)).await.unwrap();

    let removed = store
        .prune_before("Guild", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
        .await
        .unwrap();

    assert_eq!(removed, vec!["2025-05-01_guild_snapshot"]);
    assert_eq!(
        store.list("").await.unwrap(),
        vec!["2025-05-01_big_guild_snapshot"]
    );
}
