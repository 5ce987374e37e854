use thiserror::Error;

/// Message stored for failures that carry no usable server detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

#[derive(Debug, Error)]
pub enum FetchError {
    /// No response from the scraper: connection refused, DNS, client timeout.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("scraper responded with status {status}")]
    Server { status: u16, detail: Option<String> },

    #[error("undecodable scraper response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    /// Text recorded into a failed entry. A server-supplied detail wins,
    /// everything else collapses to [`INTERNAL_ERROR_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("watchlist I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("watchlist file is malformed: {0}")]
    Serde(#[from] serde_json::Error),
}
