//! Store trait and batch model
//!
//! Persistence is delegated to an external document store reached through
//! the [`Store`] trait. All writes go through [`Store::commit`], which
//! applies a batch of [`WriteOp`]s atomically: either every operation in the
//! batch is persisted or none is. The move and reorder engines rely on that
//! guarantee instead of any explicit locking.
//!
//! Reads come in two flavors: one-shot queries, and [`Subscription`]s that
//! push a full snapshot of a collection on every change to it.

use crate::error::{CuelistError, Result};
use crate::types::{
    AuthorEntry, Container, ContentId, ContentItem, Playlist, PlaylistId, TagEntry, TagSet, UserId,
};
use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A single mutation inside an atomic batch.
///
/// The set is closed on purpose: every write the engines can issue is
/// enumerated here, so a store implementation handles all of them or none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Create or overwrite a playlist row
    PutPlaylist(Playlist),
    /// Update name and visibility
    SetPlaylistMeta {
        id: PlaylistId,
        name: String,
        is_public: bool,
    },
    /// Replace the tag set
    SetPlaylistTags { id: PlaylistId, tags: TagSet },
    /// Move the playlist within the owner's ordering
    SetPlaylistPosition { id: PlaylistId, position: u32 },
    /// Delete the playlist row (contents are deleted by their own ops)
    DeletePlaylist { id: PlaylistId },

    /// Create a content item in the container its placement names
    PutContent(ContentItem),
    /// Update the user-editable fields plus the derived platform
    SetContentFields {
        container: Container,
        id: ContentId,
        url: String,
        title: String,
        author: String,
        platform: String,
    },
    /// Move the item within its playlist's ordering
    SetContentPosition {
        container: Container,
        id: ContentId,
        position: u32,
    },
    /// Delete the item from its container
    DeleteContent { container: Container, id: ContentId },

    /// Idempotent tag registry upsert
    PutTag { name: String },
    /// Remove a tag registry entry
    DeleteTag { name: String },
    /// Idempotent author registry upsert
    PutAuthor { name: String },
}

/// Handle to a live push subscription.
///
/// Holds the receiving end of a snapshot channel plus the feeder task that
/// keeps it fresh. Dropping the handle aborts the feeder: release is scoped
/// to ownership, which is what lets a session swap its selected-container
/// subscription without stale deliveries racing the new one.
pub struct Subscription<T> {
    rx: watch::Receiver<T>,
    feeder: JoinHandle<()>,
}

impl<T: Clone> Subscription<T> {
    /// Wrap a snapshot channel and its feeder task
    pub fn new(rx: watch::Receiver<T>, feeder: JoinHandle<()>) -> Self {
        Self { rx, feeder }
    }

    /// The latest snapshot
    pub fn current(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Wait until a snapshot newer than the last observed one arrives
    pub async fn changed(&mut self) -> Result<()> {
        self.rx
            .changed()
            .await
            .map_err(|_| CuelistError::storage("subscription closed"))
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.feeder.abort();
    }
}

/// Document store capability set, scoped per owning user.
///
/// Playlists are returned in position order; playlist contents in position
/// order; inbox contents by `added_at` descending. Registries are returned
/// in name order.
#[async_trait]
pub trait Store: Send + Sync {
    /// All of the user's playlists
    async fn playlists(&self, user: &UserId) -> Result<Vec<Playlist>>;

    /// One playlist by id
    async fn playlist(&self, user: &UserId, id: &PlaylistId) -> Result<Option<Playlist>>;

    /// All content in one container
    async fn contents(&self, user: &UserId, container: &Container) -> Result<Vec<ContentItem>>;

    /// One content item by container and id
    async fn content(
        &self,
        user: &UserId,
        container: &Container,
        id: &ContentId,
    ) -> Result<Option<ContentItem>>;

    /// Number of items in one container
    async fn content_count(&self, user: &UserId, container: &Container) -> Result<u32>;

    /// The user's tag registry
    async fn tags(&self, user: &UserId) -> Result<Vec<TagEntry>>;

    /// The user's author registry
    async fn authors(&self, user: &UserId) -> Result<Vec<AuthorEntry>>;

    /// Apply a batch of writes atomically
    async fn commit(&self, user: &UserId, batch: Vec<WriteOp>) -> Result<()>;

    /// Subscribe to the user's playlist list
    async fn watch_playlists(&self, user: &UserId) -> Result<Subscription<Vec<Playlist>>>;

    /// Subscribe to one container's contents
    async fn watch_contents(
        &self,
        user: &UserId,
        container: &Container,
    ) -> Result<Subscription<Vec<ContentItem>>>;

    /// Subscribe to the tag registry
    async fn watch_tags(&self, user: &UserId) -> Result<Subscription<Vec<TagEntry>>>;

    /// Subscribe to the author registry
    async fn watch_authors(&self, user: &UserId) -> Result<Subscription<Vec<AuthorEntry>>>;
}
