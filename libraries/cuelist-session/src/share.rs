//! Share link resolution
//!
//! Resolving a link is the one unauthenticated read path. A playlist that is
//! missing and a playlist that exists but is private are indistinguishable
//! to the caller: both come back as the same not-found error.

use cuelist_core::types::{Container, ContentItem};
use cuelist_core::{CuelistError, Result, ShareLink, Store};

/// The read-only view a share link resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedPlaylist {
    pub name: String,
    pub contents: Vec<ContentItem>,
}

/// Resolve a parsed share link against the store
pub async fn resolve<S: Store + ?Sized>(store: &S, link: &ShareLink) -> Result<SharedPlaylist> {
    let playlist = store
        .playlist(&link.owner, &link.playlist)
        .await?
        .filter(|playlist| playlist.is_public)
        .ok_or_else(|| CuelistError::not_found("shared playlist", link.playlist.as_str()))?;

    let contents = store
        .contents(&link.owner, &Container::Playlist(link.playlist.clone()))
        .await?;

    Ok(SharedPlaylist {
        name: playlist.name,
        contents,
    })
}
