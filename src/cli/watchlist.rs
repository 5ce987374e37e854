use std::path::PathBuf;

use tabled::Table;

use crate::{
    error, info, management::WatchlistManager, success, types::WatchlistTableRow, utils, warning,
};

pub async fn list_watchlist() {
    let watchlist = load().await;
    if watchlist.urls().is_empty() {
        warning!("The watchlist is empty. Add series with `mangawatch list add <URL>`.");
        return;
    }

    let rows: Vec<WatchlistTableRow> = watchlist
        .urls()
        .iter()
        .enumerate()
        .map(|(i, url)| WatchlistTableRow {
            index: i + 1,
            url: url.clone(),
        })
        .collect();

    println!("{}", Table::new(rows));
    info!("{} series in {}", watchlist.urls().len(), watchlist.path().display());
}

pub async fn add_to_watchlist(urls: Vec<String>) {
    let mut watchlist = load().await;

    let added = utils::dedup_ids(urls)
        .iter()
        .filter(|url| watchlist.add(url))
        .count();

    if added == 0 {
        warning!("Nothing new to add.");
        return;
    }

    save(&watchlist).await;
    success!("Added {} series.", added);
}

pub async fn remove_from_watchlist(url: String) {
    let mut watchlist = load().await;
    if !watchlist.remove(&url) {
        warning!("{} is not on the watchlist.", url);
        return;
    }

    save(&watchlist).await;
    success!("Removed {}.", url);
}

/// Replaces the watchlist with the links found in a text file.
pub async fn import_watchlist(file: PathBuf) {
    let content = match async_fs::read_to_string(&file).await {
        Ok(content) => content,
        Err(e) => error!("Cannot read {}. Err: {}", file.display(), e),
    };

    let urls = utils::parse_url_list(&content);
    if urls.is_empty() {
        warning!("No links found in {}.", file.display());
        return;
    }

    let mut watchlist = WatchlistManager::at_default_location();
    let count = urls.len();
    watchlist.replace(urls);
    save(&watchlist).await;
    success!("Imported {} series from {}.", count, file.display());
}

pub async fn clear_watchlist() {
    let mut watchlist = load().await;
    watchlist.clear();
    save(&watchlist).await;
    success!("Watchlist cleared.");
}

async fn load() -> WatchlistManager {
    match WatchlistManager::at_default_location().load().await {
        Ok(watchlist) => watchlist,
        Err(e) => error!("Cannot load watchlist. Err: {}", e),
    }
}

async fn save(watchlist: &WatchlistManager) {
    if let Err(e) = watchlist.persist().await {
        error!("Cannot save watchlist. Err: {}", e);
    }
}
