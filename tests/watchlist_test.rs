use mangawatch::{error::WatchlistError, management::WatchlistManager};

fn urls(urls: &[&str]) -> Vec<String> {
    urls.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_missing_file_is_an_empty_watchlist() {
    let dir = tempfile::tempdir().unwrap();
    let watchlist = WatchlistManager::new(dir.path().join("watchlist.json"))
        .load()
        .await
        .unwrap();

    assert!(watchlist.urls().is_empty());
}

#[tokio::test]
async fn test_persist_and_load_keep_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/dir/watchlist.json");

    let mut watchlist = WatchlistManager::new(path.clone());
    assert!(watchlist.add("https://example.org/c"));
    assert!(watchlist.add(" https://example.org/a "));
    assert!(watchlist.add("https://example.org/b"));
    watchlist.persist().await.unwrap();

    let loaded = WatchlistManager::new(path).load().await.unwrap();
    assert_eq!(
        loaded.urls(),
        urls(&[
            "https://example.org/c",
            "https://example.org/a",
            "https://example.org/b",
        ])
    );
}

#[tokio::test]
async fn test_add_rejects_blank_and_duplicate_links() {
    let dir = tempfile::tempdir().unwrap();
    let mut watchlist = WatchlistManager::new(dir.path().join("watchlist.json"));

    assert!(watchlist.add("https://example.org/a"));
    assert!(!watchlist.add("https://example.org/a"));
    assert!(!watchlist.add("  https://example.org/a"));
    assert!(!watchlist.add("   "));

    assert_eq!(watchlist.urls().len(), 1);
}

#[tokio::test]
async fn test_remove_replace_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let mut watchlist = WatchlistManager::new(dir.path().join("watchlist.json"));
    watchlist.replace(urls(&["a", "b", "a", "", "c"]));
    assert_eq!(watchlist.urls(), urls(&["a", "b", "c"]));

    assert!(watchlist.remove("b"));
    assert!(!watchlist.remove("b"));
    assert_eq!(watchlist.urls(), urls(&["a", "c"]));
    assert!(watchlist.has("c"));

    watchlist.clear();
    assert!(watchlist.urls().is_empty());
}

#[tokio::test]
async fn test_load_dedups_hand_edited_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watchlist.json");
    std::fs::write(&path, r#"["a", "b", "a", "  "]"#).unwrap();

    let watchlist = WatchlistManager::new(path).load().await.unwrap();

    assert_eq!(watchlist.urls(), urls(&["a", "b"]));
}

#[tokio::test]
async fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watchlist.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = WatchlistManager::new(path).load().await;

    assert!(matches!(result, Err(WatchlistError::Serde(_))));
}
