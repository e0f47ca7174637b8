//! Discord webhook integration.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::base::{
    config::Config,
    types::{Res, Void},
};

use super::{GenericWebhookClient, WebhookClient, WebhookMessage};

// Extra methods on `WebhookClient` applied by the discord implementation.

impl WebhookClient {
    /// Creates a new Discord webhook client.
    pub fn discord(config: &Config) -> Res<Self> {
        let client = DiscordWebhookClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Structs.

/// Discord webhook client implementation.
#[derive(Clone)]
pub struct DiscordWebhookClient {
    client: reqwest::Client,
    url: String,
}

impl DiscordWebhookClient {
    /// Create a new Discord webhook client.
    pub fn new(config: &Config) -> Res<Self> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            url: config.discord_webhook.clone(),
        })
    }
}

#[async_trait]
impl GenericWebhookClient for DiscordWebhookClient {
    #[instrument(name = "DiscordWebhookClient::post", skip_all)]
    async fn post(&self, message: &WebhookMessage) -> Void {
        let response = self.client.post(&self.url).json(message).send().await?;

        let status = response.status();
        debug!("Webhook responded with {}", status);

        if !status.is_success() {
            warn!("Webhook responded with non-success status {}.", status);
        }

        Ok(())
    }
}
