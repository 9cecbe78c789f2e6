//! Tag consistency engine
//!
//! Keeps the per-user tag registry a superset of every tag attached to any
//! playlist, and cascades explicit tag deletion so no playlist is ever left
//! with an empty tag set.

use cuelist_core::types::{TagSet, UserId};
use cuelist_core::{Result, Store, WriteOp};
use std::collections::HashSet;
use tracing::debug;

/// Registry upserts for the tags in `tags` that are not registered yet.
///
/// Callers append these to the batch that writes the owning playlist, so
/// registration commits atomically with the document that introduced the
/// tags. The upsert is idempotent, so a concurrent registration of the same
/// tag cannot fail the commit.
pub async fn registration_ops<S: Store + ?Sized>(
    store: &S,
    user: &UserId,
    tags: &TagSet,
) -> Result<Vec<WriteOp>> {
    let existing: HashSet<String> = store
        .tags(user)
        .await?
        .into_iter()
        .map(|entry| entry.name)
        .collect();

    Ok(tags
        .iter()
        .filter(|tag| !existing.contains(*tag))
        .map(|tag| WriteOp::PutTag {
            name: tag.to_string(),
        })
        .collect())
}

/// Register any unknown tags from `tags` as a standalone commit
pub async fn register<S: Store + ?Sized>(store: &S, user: &UserId, tags: &TagSet) -> Result<()> {
    let ops = registration_ops(store, user, tags).await?;
    if ops.is_empty() {
        return Ok(());
    }
    debug!(user = %user, count = ops.len(), "registering new tags");
    store.commit(user, ops).await
}

/// Delete `tag` from the registry and from every playlist carrying it.
///
/// A playlist whose only tag was `tag` reverts to the untagged sentinel.
/// Registry removal and all playlist updates are one atomic commit.
pub async fn delete_tag<S: Store + ?Sized>(store: &S, user: &UserId, tag: &str) -> Result<()> {
    let mut batch = vec![WriteOp::DeleteTag {
        name: tag.to_string(),
    }];

    for playlist in store.playlists(user).await? {
        if playlist.tags.contains(tag) {
            batch.push(WriteOp::SetPlaylistTags {
                id: playlist.id.clone(),
                tags: playlist.tags.without(tag),
            });
        }
    }

    store.commit(user, batch).await
}
