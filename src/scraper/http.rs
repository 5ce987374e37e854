use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::{
    error::FetchError,
    scraper::FetchGateway,
    types::{ScrapeErrorBody, ScrapeRequest, Snapshot},
};

/// Talks to the scraper service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    endpoint: String,
}

impl HttpGateway {
    /// `timeout` bounds every single request. `None` waits forever, which
    /// also lets one stuck page hold back its whole window.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl FetchGateway for HttpGateway {
    async fn fetch(&self, id: &str) -> Result<Snapshot, FetchError> {
        debug!(id, endpoint = %self.endpoint, "requesting scrape");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ScrapeRequest {
                url: id.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // the body is optional; anything unreadable just loses the detail
            let detail = match response.bytes().await {
                Ok(body) => serde_json::from_slice::<ScrapeErrorBody>(&body)
                    .ok()
                    .and_then(|b| b.detail_message()),
                Err(_) => None,
            };
            warn!(id, status = status.as_u16(), detail = ?detail, "scrape rejected");
            return Err(FetchError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response.bytes().await?;
        let snapshot: Snapshot = serde_json::from_slice(&body)?;
        debug!(id, publications = snapshot.publications.len(), "scrape succeeded");
        Ok(snapshot)
    }
}
