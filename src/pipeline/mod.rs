//! The fetch, filter, format and notify pipeline.
//!
//! Stages run strictly one after the other:
//! - Fetch pending requests (and issues, when enabled) from the media service
//! - Drop anything younger than the age cutoff
//! - Resolve titles and build one entry per item
//! - Post one webhook message per non-empty resource

pub mod filter;
pub mod message;
pub mod notify;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    base::{config::Config, types::Void},
    service::{media::MediaClient, webhook::WebhookClient},
};

use self::{
    filter::filter_by_age,
    message::{build_issue_entries, build_request_entries},
    notify::{Resource, notify},
};

/// Run a single pass of the pipeline as of `now`.
pub async fn run(config: &Config, media: &MediaClient, webhook: &WebhookClient, now: DateTime<Utc>) -> Void {
    // Fetch and filter.

    let requests = media.get_pending_requests(config.num_requests).await?;
    let requests = filter_by_age(requests, config.cutoff(), now);

    let issues = if config.check_issues {
        filter_by_age(media.get_issues().await?, config.cutoff(), now)
    } else {
        Vec::new()
    };

    // Format and notify.

    if !requests.is_empty() {
        info!("{} pending requests found.", requests.len());
    }

    let entries = build_request_entries(config, media, &requests).await?;
    notify(config, webhook, Resource::PendingRequests, entries, now).await?;

    if config.check_issues {
        if !issues.is_empty() {
            info!("{} open issues found.", issues.len());
        }

        let entries = build_issue_entries(config, media, &issues).await?;
        notify(config, webhook, Resource::OpenIssues, entries, now).await?;
    }

    Ok(())
}
