//! # Scraper Integration Module
//!
//! This module is the boundary between mangawatch and the scraping service
//! that renders series pages and extracts the newest chapter. The rest of
//! the crate only sees the [`FetchGateway`] trait: one series link in, one
//! [`Snapshot`] or [`FetchError`] out.
//!
//! ## Architecture
//!
//! ```text
//! Orchestrator (windows of concurrent fetches)
//!          ↓
//! FetchGateway trait
//!          ↓
//! HttpGateway (reqwest, JSON)
//!          ↓
//! Scraper service  POST /api/scrape-manga {"url": ...}
//! ```
//!
//! ## Error Mapping
//!
//! - connection failures and client timeouts become [`FetchError::Transport`]
//! - non-success statuses become [`FetchError::Server`], carrying the
//!   `detail` string of the error body when one can be decoded
//! - success statuses with an undecodable body become [`FetchError::Parse`]
//!
//! A gateway never retries on its own. Retrying is a user decision taken
//! through the orchestrator.

mod http;

use async_trait::async_trait;

use crate::{error::FetchError, types::Snapshot};

pub use http::HttpGateway;

#[async_trait]
pub trait FetchGateway: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<Snapshot, FetchError>;
}
