//! Search aggregator
//!
//! Fans out over the inbox and every playlist concurrently, filters by a
//! case-insensitive substring match on title or author, and flattens the
//! hits with their source container attached. Fetches join in registration
//! order, so hits group stably per source.

use cuelist_core::types::{Container, ContentItem, UserId};
use cuelist_core::{CuelistError, Result, Store};
use futures::future;

/// One search match with its provenance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub item: ContentItem,
    /// Container the item was found in
    pub source: Container,
    /// Display name of that container ("Inbox" for the inbox)
    pub source_name: String,
}

/// Search all of a user's content.
///
/// Blank queries are rejected; callers treat blank input as "clear search"
/// and never get here with one. A user with zero playlists searches only the
/// inbox and an empty store yields an empty result, not an error.
pub async fn search<S: Store + ?Sized>(
    store: &S,
    user: &UserId,
    query: &str,
) -> Result<Vec<SearchHit>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Err(CuelistError::validation("search query must not be blank"));
    }

    let mut sources = vec![(Container::Inbox, Container::INBOX_NAME.to_string())];
    for playlist in store.playlists(user).await? {
        sources.push((Container::Playlist(playlist.id), playlist.name));
    }

    let fetches = sources
        .iter()
        .map(|(container, _)| store.contents(user, container));
    let collections = future::try_join_all(fetches).await?;

    let mut hits = Vec::new();
    for ((source, source_name), items) in sources.iter().zip(collections) {
        for item in items {
            if matches(&item, &needle) {
                hits.push(SearchHit {
                    item,
                    source: source.clone(),
                    source_name: source_name.clone(),
                });
            }
        }
    }
    Ok(hits)
}

fn matches(item: &ContentItem, needle: &str) -> bool {
    item.title.to_lowercase().contains(needle) || item.author.to_lowercase().contains(needle)
}
