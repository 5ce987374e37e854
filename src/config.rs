//! Configuration management for mangawatch.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Every value has a default, so a fresh
//! install works against a scraper running on localhost.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults

use std::{env, io::ErrorKind, path::PathBuf, time::Duration};

use crate::types::GroupPreference;

pub const DEFAULT_SCRAPER_URL: &str = "http://localhost:8000/api/scrape-manga";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 90;

/// Loads environment variables from `<data_local_dir>/mangawatch/.env`.
///
/// The data directory is created when missing. A missing `.env` file is not
/// an error; a malformed one is.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/mangawatch/.env`
/// - macOS: `~/Library/Application Support/mangawatch/.env`
/// - Windows: `%LOCALAPPDATA%/mangawatch/.env`
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(format!("{}: {}", path.display(), e)),
    }
}

/// Directory holding the `.env` file and the persisted watchlist.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("mangawatch");
    path
}

/// Endpoint of the scraper service (`MANGAWATCH_SCRAPER_URL`).
pub fn scraper_url() -> String {
    env::var("MANGAWATCH_SCRAPER_URL")
        .ok()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_SCRAPER_URL.to_string())
}

/// Group preference used when `check` is called without one
/// (`MANGAWATCH_GROUP`). `any` or `*` means no preference.
pub fn preferred_group() -> Option<GroupPreference> {
    env::var("MANGAWATCH_GROUP")
        .ok()
        .and_then(|raw| raw.parse().ok())
}

/// Per-request timeout of the scraper client
/// (`MANGAWATCH_REQUEST_TIMEOUT_SECS`).
pub fn request_timeout() -> Option<Duration> {
    parse_timeout(env::var("MANGAWATCH_REQUEST_TIMEOUT_SECS").ok().as_deref())
}

/// `0` disables the timeout, unset or garbage falls back to the default.
pub fn parse_timeout(raw: Option<&str>) -> Option<Duration> {
    let secs = raw
        .and_then(|r| r.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

    if secs == 0 {
        None
    } else {
        Some(Duration::from_secs(secs))
    }
}
