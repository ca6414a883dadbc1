use super::*;

/// Tests that every captured field survives a save and load.
///
/// Expected: loaded snapshot equals the saved one
#[tokio::test]
async fn loads_saved_snapshot() {
    let (_dir, store) = temp_store().await;
    let snapshot = sample_snapshot();

    let name = store.save(&snapshot).await.unwrap();
    let loaded = store.load(&name).await.unwrap();

    assert_eq!(loaded, snapshot);
}

/// Tests loading an artifact that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn missing_artifact_is_not_found() {
    let (_dir, store) = temp_store().await;

    let result = store.load("2025-06-01_nowhere_snapshot").await;

    assert!(matches!(result, Err(SnapshotError::NotFound(_))));
}

/// Tests that names with path components are rejected before touching the filesystem.
///
/// Expected: Err(InvalidName) for each traversal attempt
#[tokio::test]
async fn rejects_path_traversal() {
    let (_dir, store) = temp_store().await;

    for name in ["../secret", "a/b", "a\\b", ".hidden", ""] {
        let result = store.load(name).await;
        assert!(
            matches!(result, Err(SnapshotError::InvalidName(_))),
            "accepted {:?}",
            name
        );
    }
}

/// Tests that an artifact written by a different format version is refused.
///
/// Expected: Err(UnsupportedVersion) naming both versions
#[tokio::test]
async fn rejects_unknown_format_version() {
    let (_dir, store) = temp_store().await;

    let bytes = bincode::serde::encode_to_vec(
        (SNAPSHOT_FORMAT_VERSION + 1, sample_snapshot()),
        bincode::config::standard(),
    )
    .unwrap();
    let name = "2025-06-01_future_snapshot";
    std::fs::write(store.root().join(name), bytes).unwrap();

    match store.load(name).await {
        Err(SnapshotError::UnsupportedVersion { found, expected }) => {
            assert_eq!(found, SNAPSHOT_FORMAT_VERSION + 1);
            assert_eq!(expected, SNAPSHOT_FORMAT_VERSION);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

/// Tests that a truncated artifact fails to decode instead of loading partially.
///
/// Expected: Err(Decode)
#[tokio::test]
async fn rejects_truncated_artifact() {
    let (_dir, store) = temp_store().await;

    let name = store.save(&sample_snapshot()).await.unwrap();
    let path = store.root().join(&name);
    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    assert!(matches!(
        store.load(&name).await,
        Err(SnapshotError::Decode(_))
    ));
}
