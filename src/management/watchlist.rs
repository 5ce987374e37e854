use std::{io::ErrorKind, path::PathBuf};

use tracing::debug;

use crate::{config, error::WatchlistError, utils};

pub const WATCHLIST_FILE: &str = "watchlist.json";

/// The ordered list of series links the user follows, persisted as JSON.
pub struct WatchlistManager {
    path: PathBuf,
    urls: Vec<String>,
}

impl WatchlistManager {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            urls: Vec::new(),
        }
    }

    pub fn at_default_location() -> Self {
        Self::new(config::data_dir().join(WATCHLIST_FILE))
    }

    /// Loads the list from disk. A missing file is an empty watchlist.
    pub async fn load(mut self) -> Result<Self, WatchlistError> {
        let json = match async_fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no watchlist on disk yet");
                self.urls.clear();
                return Ok(self);
            }
            Err(e) => return Err(e.into()),
        };

        let urls: Vec<String> = serde_json::from_str(&json)?;
        self.urls = utils::dedup_ids(urls);
        Ok(self)
    }

    pub async fn persist(&self) -> Result<(), WatchlistError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.urls)?;
        async_fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), count = self.urls.len(), "watchlist persisted");
        Ok(())
    }

    /// Adds a link unless it is blank or already followed.
    pub fn add(&mut self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() || self.has(url) {
            return false;
        }
        self.urls.push(url.to_string());
        true
    }

    pub fn remove(&mut self, url: &str) -> bool {
        let url = url.trim();
        let before = self.urls.len();
        self.urls.retain(|u| u != url);
        self.urls.len() != before
    }

    pub fn replace(&mut self, urls: Vec<String>) {
        self.urls = utils::dedup_ids(urls);
    }

    pub fn clear(&mut self) {
        self.urls.clear();
    }

    pub fn has(&self, url: &str) -> bool {
        self.urls.iter().any(|u| u == url)
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
