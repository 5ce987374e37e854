use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::utils;

/// One release of the newest chapter by a given scan group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationEvent {
    #[serde(alias = "grupo")]
    pub group: String,
    /// Raw upload date as reported by the scraper. Upstream pages sometimes
    /// carry placeholders such as `N/A`, so this is kept unparsed.
    #[serde(alias = "fecha", default)]
    pub date: Option<String>,
}

impl PublicationEvent {
    pub fn published_on(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(utils::parse_publication_date)
    }
}

/// Result of one successful scrape of a series page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(alias = "titulo")]
    pub title: String,
    #[serde(alias = "imagen", default)]
    pub cover_image_url: Option<String>,
    #[serde(alias = "ultimo_capitulo")]
    pub latest_chapter_label: String,
    /// Newest first. Index 0 is the authoritative latest upload.
    #[serde(alias = "opciones", default)]
    pub publications: Vec<PublicationEvent>,
    #[serde(alias = "url")]
    pub source_url: String,
}

impl Snapshot {
    pub fn cover(&self) -> Option<&str> {
        self.cover_image_url
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Cover link for display, `-` when the page has none.
    pub fn cover_label(&self) -> &str {
        self.cover().unwrap_or("-")
    }

    pub fn latest(&self) -> Option<&PublicationEvent> {
        self.publications.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    Pending,
    Loading,
    Success(Snapshot),
    Failed(String),
}

impl Lifecycle {
    pub fn label(&self) -> &'static str {
        match self {
            Lifecycle::Pending => "pending",
            Lifecycle::Loading => "loading",
            Lifecycle::Success(_) => "success",
            Lifecycle::Failed(_) => "failed",
        }
    }
}

/// Lifecycle record of one watched series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub lifecycle: Lifecycle,
}

impl Entry {
    pub fn pending(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lifecycle: Lifecycle::Pending,
        }
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        match &self.lifecycle {
            Lifecycle::Success(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.lifecycle {
            Lifecycle::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Failed(_))
    }

    pub fn is_settled(&self) -> bool {
        matches!(
            self.lifecycle,
            Lifecycle::Success(_) | Lifecycle::Failed(_)
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn start(total: usize) -> Self {
        Self {
            completed: 0,
            total,
        }
    }

    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

/// Which scan group is expected to publish the latest chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupPreference {
    Any,
    Group(String),
}

impl GroupPreference {
    /// Case-insensitive substring match against a group name.
    pub fn matches(&self, group: &str) -> bool {
        match self {
            GroupPreference::Any => true,
            GroupPreference::Group(name) => group.to_lowercase().contains(&name.to_lowercase()),
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, GroupPreference::Group(_))
    }
}

impl FromStr for GroupPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err("group name cannot be empty".to_string());
        }

        if name == "*" || name.eq_ignore_ascii_case("any") {
            return Ok(GroupPreference::Any);
        }

        Ok(GroupPreference::Group(name.to_string()))
    }
}

impl fmt::Display for GroupPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupPreference::Any => write!(f, "any group"),
            GroupPreference::Group(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FreshnessStatus {
    Green,
    Yellow,
    Red,
    Unknown,
}

impl FreshnessStatus {
    pub const ALL: [FreshnessStatus; 4] = [
        FreshnessStatus::Green,
        FreshnessStatus::Yellow,
        FreshnessStatus::Red,
        FreshnessStatus::Unknown,
    ];

    pub fn colored(&self) -> ColoredString {
        let label = self.to_string();
        match self {
            FreshnessStatus::Green => label.green().bold(),
            FreshnessStatus::Yellow => label.yellow().bold(),
            FreshnessStatus::Red => label.red().bold(),
            FreshnessStatus::Unknown => label.dimmed(),
        }
    }
}

impl fmt::Display for FreshnessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FreshnessStatus::Green => "green",
            FreshnessStatus::Yellow => "yellow",
            FreshnessStatus::Red => "red",
            FreshnessStatus::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

/// Error payload of the scraper. `detail` is usually a string but the
/// framework behind it emits a list for request validation errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapeErrorBody {
    #[serde(default)]
    pub detail: serde_json::Value,
}

impl ScrapeErrorBody {
    pub fn detail_message(&self) -> Option<String> {
        self.detail
            .as_str()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
    }
}

#[derive(Tabled)]
pub struct EntryTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub status: String,
    pub title: String,
    pub latest: String,
    pub groups: String,
    pub cover: String,
    pub link: String,
}

#[derive(Tabled)]
pub struct WatchlistTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub url: String,
}
