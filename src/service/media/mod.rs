pub mod overseerr;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{IssueItem, MediaDetails, MediaType, RequestItem, Res};

// Traits.

/// Generic "media request service" trait that clients must implement.
///
/// This trait defines the reads the notifier needs from a media request
/// manager like Overseerr. Every call is a single authenticated read; errors
/// are propagated as-is and never retried.
#[async_trait]
pub trait GenericMediaClient: Send + Sync + 'static {
    /// List pending requests, at most `take` of them.
    async fn get_pending_requests(&self, take: u32) -> Res<Vec<RequestItem>>;

    /// List issues.
    async fn get_issues(&self) -> Res<Vec<IssueItem>>;

    /// Fetch a single issue, including its comments.
    async fn get_issue(&self, id: u64) -> Res<IssueItem>;

    /// Look up the details of a movie or show, used to resolve its title.
    async fn get_media_details(&self, media_type: MediaType, tmdb_id: u64) -> Res<MediaDetails>;
}

// Structs.

/// Media request service client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct MediaClient {
    inner: Arc<dyn GenericMediaClient>,
}

impl Deref for MediaClient {
    type Target = dyn GenericMediaClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl MediaClient {
    pub fn new(inner: Arc<dyn GenericMediaClient>) -> Self {
        Self { inner }
    }
}
