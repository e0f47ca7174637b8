//! Overseerr REST API integration.
//!
//! All reads go through `/api/v1` with the `x-api-key` header, and decode the
//! JSON body straight into the typed items in [`crate::base::types`].

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::base::{
    config::Config,
    types::{IssueItem, MediaDetails, MediaType, Page, RequestItem, Res},
};

use super::{GenericMediaClient, MediaClient};

// Extra methods on `MediaClient` applied by the overseerr implementation.

impl MediaClient {
    /// Creates a new Overseerr media client.
    pub fn overseerr(config: &Config) -> Res<Self> {
        let client = OverseerrMediaClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Structs.

/// Overseerr client implementation.
#[derive(Clone)]
pub struct OverseerrMediaClient {
    client: reqwest::Client,
    host: String,
    token: String,
}

impl OverseerrMediaClient {
    /// Create a new Overseerr client.
    pub fn new(config: &Config) -> Res<Self> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            host: config.overseerr_host.clone(),
            token: config.overseerr_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.host, path)
    }

    /// Perform an authenticated read and decode the body.
    async fn get<T>(&self, path: &str) -> Res<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);

        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header("x-api-key", &self.token)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl GenericMediaClient for OverseerrMediaClient {
    #[instrument(name = "OverseerrMediaClient::get_pending_requests", skip(self))]
    async fn get_pending_requests(&self, take: u32) -> Res<Vec<RequestItem>> {
        let page: Page<RequestItem> = self.get(&format!("request?take={take}&filter=pending")).await?;
        Ok(page.results)
    }

    #[instrument(name = "OverseerrMediaClient::get_issues", skip(self))]
    async fn get_issues(&self) -> Res<Vec<IssueItem>> {
        let page: Page<IssueItem> = self.get("issue").await?;
        Ok(page.results)
    }

    #[instrument(name = "OverseerrMediaClient::get_issue", skip(self))]
    async fn get_issue(&self, id: u64) -> Res<IssueItem> {
        self.get(&format!("issue/{id}")).await
    }

    #[instrument(name = "OverseerrMediaClient::get_media_details", skip(self))]
    async fn get_media_details(&self, media_type: MediaType, tmdb_id: u64) -> Res<MediaDetails> {
        self.get(&format!("{media_type}/{tmdb_id}")).await
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::config::ConfigInner;

    #[test]
    fn test_url_joins_normalized_host() {
        let config = Config::new(ConfigInner {
            overseerr_host: "http://overseerr.local:5055/".into(),
            overseerr_token: "token".into(),
            discord_webhook: "http://hook".into(),
            ..Default::default()
        })
        .unwrap();

        let client = OverseerrMediaClient::new(&config).unwrap();

        assert_eq!(client.url("request?take=20&filter=pending"), "http://overseerr.local:5055/api/v1/request?take=20&filter=pending");
        assert_eq!(client.url(&format!("{}/{}", MediaType::Tv, 1399)), "http://overseerr.local:5055/api/v1/tv/1399");
    }
}
