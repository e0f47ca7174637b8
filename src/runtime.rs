//! Runtime services and shared state for overseerr-notify.

use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    pipeline,
    service::{media::MediaClient, webhook::WebhookClient},
};

/// Runtime service context for a single run.
///
/// This struct holds the media client, webhook client, and configuration.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The media request service client instance.
    pub media: MediaClient,
    /// The webhook client instance.
    pub webhook: WebhookClient,
}

impl Runtime {
    /// Create a new runtime instance backed by Overseerr and Discord.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        let media = MediaClient::overseerr(&config)?;
        let webhook = WebhookClient::discord(&config)?;

        Ok(Self { config, media, webhook })
    }

    /// Run the pipeline once, now.
    pub async fn start(&self) -> Void {
        self.run_at(Utc::now()).await
    }

    /// Run the pipeline once, as of `now`.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Void {
        pipeline::run(&self.config, &self.media, &self.webhook, now).await
    }
}
