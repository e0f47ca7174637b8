pub mod discord;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use serde::Serialize;

use crate::base::types::Void;

// Types.

/// Webhook message payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookMessage {
    pub embeds: Vec<Embed>,
}

/// A titled, colored, timestamped card.
///
/// Carries either a list of fields or a single description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    pub color: u32,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

/// Key-value field of an embed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

// Traits.

/// Generic "webhook" trait that clients must implement.
///
/// A single fire-and-forget post; implementations do not verify delivery
/// beyond the call completing.
#[async_trait]
pub trait GenericWebhookClient: Send + Sync + 'static {
    /// Post a message to the webhook.
    async fn post(&self, message: &WebhookMessage) -> Void;
}

// Structs.

/// Webhook client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct WebhookClient {
    inner: Arc<dyn GenericWebhookClient>,
}

impl Deref for WebhookClient {
    type Target = dyn GenericWebhookClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl WebhookClient {
    pub fn new(inner: Arc<dyn GenericWebhookClient>) -> Self {
        Self { inner }
    }
}
