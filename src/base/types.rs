use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

// Upstream media types.

/// Kind of media an Overseerr item points at.
///
/// Serialized the way Overseerr spells it, which is also the path segment used
/// for both the web UI and the `/api/v1/{mediaType}/{tmdbId}` lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything carrying an upstream creation timestamp.
pub trait Created {
    fn created_at(&self) -> DateTime<Utc>;
}

/// Paged list envelope returned by the Overseerr list endpoints.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
}

/// A media request, as listed by `/api/v1/request`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestItem {
    pub id: u64,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub media: RequestMedia,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMedia {
    pub tmdb_id: u64,
}

impl Created for RequestItem {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A media issue, as listed by `/api/v1/issue` or fetched by `/api/v1/issue/{id}`.
///
/// The list endpoint may omit comments; the detail endpoint always carries them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueItem {
    pub id: u64,
    pub media: IssueMedia,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub comments: Vec<IssueComment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueMedia {
    pub media_type: MediaType,
    pub tmdb_id: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssueComment {
    pub message: String,
}

impl IssueItem {
    /// The text the reporter opened the issue with.
    pub fn first_comment(&self) -> Option<&str> {
        self.comments.first().map(|c| c.message.as_str())
    }
}

impl Created for IssueItem {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Media detail lookup; movies carry a `title`, shows a `name`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaDetails {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl MediaDetails {
    /// Resolve the human title, preferring `title` over `name`.
    pub fn display_title(&self) -> Res<&str> {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .ok_or_else(|| anyhow::anyhow!("Media details carry neither a `title` nor a `name`."))
    }
}

// Pipeline types.

/// One formatted line of a notification: a display title and its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub value: String,
}

/// How entries are laid out in the webhook embed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// One embed field per entry.
    #[default]
    Fields,
    /// All entries joined into the embed description.
    Description,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Fields => "fields",
            Layout::Description => "description",
        }
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_pending_request_page() {
        let page: Page<RequestItem> = serde_json::from_value(json!({
            "pageInfo": { "pages": 1, "pageSize": 20, "results": 1, "page": 1 },
            "results": [{
                "id": 7,
                "status": 1,
                "type": "tv",
                "createdAt": "2024-03-01T12:30:45.123Z",
                "media": { "id": 3, "tmdbId": 1399, "mediaType": "tv" }
            }]
        }))
        .unwrap();

        let request = &page.results[0];
        assert_eq!(request.id, 7);
        assert_eq!(request.media_type, MediaType::Tv);
        assert_eq!(request.media.tmdb_id, 1399);
        assert_eq!(request.created_at, Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap() + chrono::Duration::milliseconds(123));
    }

    #[test]
    fn test_decode_issue_without_comments() {
        let issue: IssueItem = serde_json::from_value(json!({
            "id": 12,
            "createdAt": "2024-03-01T00:00:00.000Z",
            "media": { "mediaType": "movie", "tmdbId": 603 }
        }))
        .unwrap();

        assert!(issue.comments.is_empty());
        assert_eq!(issue.first_comment(), None);
        assert_eq!(issue.media.media_type, MediaType::Movie);
    }

    #[test]
    fn test_first_comment_is_the_opening_message() {
        let issue: IssueItem = serde_json::from_value(json!({
            "id": 12,
            "createdAt": "2024-03-01T00:00:00.000Z",
            "media": { "mediaType": "movie", "tmdbId": 603 },
            "comments": [{ "message": "No audio" }, { "message": "Still broken" }]
        }))
        .unwrap();

        assert_eq!(issue.first_comment(), Some("No audio"));
    }

    #[test]
    fn test_display_title_prefers_title() {
        let details = MediaDetails {
            title: Some("The Matrix".into()),
            name: Some("Ignored".into()),
        };

        assert_eq!(details.display_title().unwrap(), "The Matrix");
    }

    #[test]
    fn test_display_title_falls_back_to_name() {
        let details: MediaDetails = serde_json::from_value(json!({ "id": 1399, "name": "Game of Thrones" })).unwrap();

        assert_eq!(details.display_title().unwrap(), "Game of Thrones");
    }

    #[test]
    fn test_display_title_missing_is_an_error() {
        let details: MediaDetails = serde_json::from_value(json!({ "id": 1 })).unwrap();

        assert!(details.display_title().is_err());
    }

    #[test]
    fn test_unknown_media_type_is_rejected() {
        let result = serde_json::from_value::<MediaType>(json!("music"));

        assert!(result.is_err());
    }
}
