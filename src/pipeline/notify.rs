use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    base::{
        config::Config,
        types::{Entry, Layout, Void},
    },
    service::webhook::{Embed, EmbedField, WebhookClient, WebhookMessage},
};

/// Embed color (red).
pub const EMBED_COLOR: u32 = 16711680;

/// The kinds of items a run reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    PendingRequests,
    OpenIssues,
}

impl Resource {
    /// Embed title of the notification.
    pub fn title(&self) -> &'static str {
        match self {
            Resource::PendingRequests => "The following requests are in the 'Pending' state",
            Resource::OpenIssues => "The following media issues are open:",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Resource::PendingRequests => "pending requests",
            Resource::OpenIssues => "open issues",
        }
    }

    fn notification_name(&self) -> &'static str {
        match self {
            Resource::PendingRequests => "pending requests",
            Resource::OpenIssues => "open problems",
        }
    }
}

/// Post the entries for a resource, unless there are none.
pub async fn notify(config: &Config, webhook: &WebhookClient, resource: Resource, entries: Vec<Entry>, now: DateTime<Utc>) -> Void {
    if entries.is_empty() {
        info!("No {} found :)", resource.label());
        return Ok(());
    }

    info!("Preparing \"{}\" discord notification...", resource.notification_name());

    let message = build_webhook_message(config.layout, resource.title(), entries, now);
    webhook.post(&message).await?;

    info!("Notification sent!");

    Ok(())
}

/// Build the single-embed message for a set of entries.
pub fn build_webhook_message(layout: Layout, title: &str, entries: Vec<Entry>, now: DateTime<Utc>) -> WebhookMessage {
    let (description, fields) = match layout {
        Layout::Fields => (
            None,
            entries
                .into_iter()
                .map(|e| EmbedField {
                    name: e.name,
                    value: e.value,
                    inline: false,
                })
                .collect(),
        ),
        Layout::Description => {
            let description = entries.iter().map(|e| format!("**{}**\n{}", e.name, e.value)).collect::<Vec<_>>().join("\n");
            (Some(description), Vec::new())
        }
    };

    WebhookMessage {
        embeds: vec![Embed {
            title: title.to_string(),
            color: EMBED_COLOR,
            timestamp: format_timestamp(now),
            description,
            fields,
        }],
    }
}

/// ISO-8601 UTC with millisecond precision and an explicit offset.
fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.3f+00:00").to_string()
}

// Tests.
