//! Content item domain types
//!
//! A content item is an external media reference (url + metadata). Inbox and
//! playlist items diverge in shape: only playlist items carry a position.
//! That divergence is a tagged variant ([`Placement`]) so code handling both
//! shapes is exhaustive rather than convention-based.

use super::ids::{ContentId, PlaylistId};
use super::playlist::Container;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel title for content created with a blank title
pub const UNTITLED: &str = "untitled";

/// Sentinel author for content created with a blank author
pub const UNKNOWN_AUTHOR: &str = "unknown author";

/// Where a content item lives, and the fields that existence implies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Placement {
    /// In the inbox: no position, ordered by `added_at` descending
    Inbox,
    /// In a playlist at a dense zero-based position
    Playlist { playlist: PlaylistId, position: u32 },
}

/// A single external media reference belonging to exactly one container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique content identifier
    pub id: ContentId,

    /// Media URL (http or https)
    pub url: String,

    /// Title, `UNTITLED` when the user left it blank
    pub title: String,

    /// Author, `UNKNOWN_AUTHOR` when the user left it blank
    pub author: String,

    /// Provider label derived from the url, never edited directly
    pub platform: String,

    /// Set on creation and again on re-creation via move
    pub added_at: DateTime<Utc>,

    /// Container membership and per-container fields
    pub placement: Placement,
}

impl ContentItem {
    /// The container this item lives in
    pub fn container(&self) -> Container {
        match &self.placement {
            Placement::Inbox => Container::Inbox,
            Placement::Playlist { playlist, .. } => Container::Playlist(playlist.clone()),
        }
    }

    /// Position within the parent playlist, `None` for inbox items
    pub fn position(&self) -> Option<u32> {
        match &self.placement {
            Placement::Inbox => None,
            Placement::Playlist { position, .. } => Some(*position),
        }
    }
}

/// User input for creating a content item, before validation and
/// sentinel substitution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateContent {
    /// Media url as typed
    pub url: String,
    /// Title as typed; blank becomes `UNTITLED`
    pub title: String,
    /// Author as typed; blank becomes `UNKNOWN_AUTHOR`
    pub author: String,
}

/// Title with the `UNTITLED` sentinel applied to blank input
pub fn title_or_sentinel(title: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title.to_string()
    }
}

/// Author with the `UNKNOWN_AUTHOR` sentinel applied to blank input
pub fn author_or_sentinel(author: &str) -> String {
    let author = author.trim();
    if author.is_empty() {
        UNKNOWN_AUTHOR.to_string()
    } else {
        author.to_string()
    }
}
