//! Turn filtered items into notification entries.
//!
//! Each item costs one title lookup against the media service (and, for issues
//! listed without comments, one detail lookup). Lookups run with at most
//! `lookup_concurrency` in flight; output order always matches input order.

use futures::{StreamExt, TryStreamExt, stream};
use tracing::instrument;

use crate::{
    base::{
        config::Config,
        types::{Entry, IssueItem, MediaType, RequestItem, Res},
    },
    service::media::MediaClient,
};

/// Build one entry per pending request.
#[instrument(skip_all)]
pub async fn build_request_entries(config: &Config, media: &MediaClient, requests: &[RequestItem]) -> Res<Vec<Entry>> {
    stream::iter(requests.iter().map(|request| request_entry(config, media, request)))
        .buffered(config.lookup_concurrency)
        .try_collect()
        .await
}

/// Build one entry per open issue.
#[instrument(skip_all)]
pub async fn build_issue_entries(config: &Config, media: &MediaClient, issues: &[IssueItem]) -> Res<Vec<Entry>> {
    stream::iter(issues.iter().map(|issue| issue_entry(config, media, issue)))
        .buffered(config.lookup_concurrency)
        .try_collect()
        .await
}

async fn request_entry(config: &Config, media: &MediaClient, request: &RequestItem) -> Res<Entry> {
    let name = resolve_title(media, request.media_type, request.media.tmdb_id).await?;
    let value = format!("- {}/{}/{}", config.overseerr_host, request.media_type, request.media.tmdb_id);

    Ok(Entry { name, value })
}

async fn issue_entry(config: &Config, media: &MediaClient, issue: &IssueItem) -> Res<Entry> {
    // The listing may leave comments out.
    let message = match issue.first_comment() {
        Some(message) => message.to_string(),
        None => media
            .get_issue(issue.id)
            .await?
            .first_comment()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Issue {} has no comments.", issue.id))?,
    };

    let name = resolve_title(media, issue.media.media_type, issue.media.tmdb_id).await?;
    let value = format!("- {}/issues/{}\n - {}", config.overseerr_host, issue.id, message);

    Ok(Entry { name, value })
}

async fn resolve_title(media: &MediaClient, media_type: MediaType, tmdb_id: u64) -> Res<String> {
    let details = media.get_media_details(media_type, tmdb_id).await?;
    Ok(details.display_title()?.to_string())
}
