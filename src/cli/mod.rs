//! # CLI Module
//!
//! User-facing commands of mangawatch. Each command loads what it needs
//! from the management layer, drives the orchestrator where remote work is
//! involved and reports back with the console macros, progress bars and
//! tables.
//!
//! ## Commands
//!
//! - [`check`] - Scrapes every followed series and prints its freshness,
//!   then offers to retry failures
//! - [`list_watchlist`], [`add_to_watchlist`], [`remove_from_watchlist`],
//!   [`import_watchlist`], [`clear_watchlist`] - Maintain the persisted list
//!   of followed series
//!
//! ## Layers
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Orchestrator / Management Layer
//!     ↓
//! Scraper Gateway
//!     ↓
//! Scraper Service (HTTP)
//! ```
//!
//! ## Usage
//!
//! ```bash
//! mangawatch list import series.txt          # Follow every link in a file
//! mangawatch check --group "Bokugen"         # Check against a scan group
//! mangawatch check --any-group               # Only look at freshness
//! ```

mod check;
mod watchlist;

pub use check::PromptAction;
pub use check::check;
pub use check::parse_prompt;
pub use watchlist::add_to_watchlist;
pub use watchlist::clear_watchlist;
pub use watchlist::import_watchlist;
pub use watchlist::list_watchlist;
pub use watchlist::remove_from_watchlist;
