/// Playlist domain types
use super::ids::{PlaylistId, UserId};
use super::tags::TagSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named, tagged, user-owned ordered collection of content items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Owner user ID
    pub owner_id: UserId,

    /// Playlist name (non-empty)
    pub name: String,

    /// Tags (never empty, see [`TagSet`])
    pub tags: TagSet,

    /// Zero-based position within the owner's playlist list
    pub position: u32,

    /// Whether the playlist is readable through a share link
    pub is_public: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    /// Create a new playlist appended at `position`
    pub fn new(owner_id: UserId, name: impl Into<String>, tags: TagSet, position: u32) -> Self {
        Self {
            id: PlaylistId::generate(),
            owner_id,
            name: name.into(),
            tags,
            position,
            is_public: false,
            created_at: Utc::now(),
        }
    }

    /// Create a playlist with known fields (for database loading)
    #[allow(clippy::too_many_arguments)]
    pub fn with_id(
        id: PlaylistId,
        owner_id: UserId,
        name: impl Into<String>,
        tags: TagSet,
        position: u32,
        is_public: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            name: name.into(),
            tags,
            position,
            is_public,
            created_at,
        }
    }
}

/// A container a content item can live in: one of the user's playlists, or
/// the distinguished inbox.
///
/// The inbox is a literal, not a stored row. It has a fixed id and display
/// name and its contents carry no position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Container {
    /// The per-user "later" container; unordered by position
    Inbox,
    /// One of the user's playlists
    Playlist(PlaylistId),
}

impl Container {
    /// Fixed identifier of the inbox container
    pub const INBOX_ID: &'static str = "inbox";

    /// Fixed display name of the inbox container
    pub const INBOX_NAME: &'static str = "Inbox";

    /// Parse a container id; the literal `"inbox"` maps to [`Container::Inbox`]
    pub fn from_id(id: &str) -> Self {
        if id == Self::INBOX_ID {
            Self::Inbox
        } else {
            Self::Playlist(PlaylistId::new(id))
        }
    }

    pub fn is_inbox(&self) -> bool {
        matches!(self, Self::Inbox)
    }

    /// The playlist id, when this container is a playlist
    pub fn playlist_id(&self) -> Option<&PlaylistId> {
        match self {
            Self::Inbox => None,
            Self::Playlist(id) => Some(id),
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inbox => write!(f, "{}", Self::INBOX_ID),
            Self::Playlist(id) => write!(f, "{}", id),
        }
    }
}
