//! Move engine
//!
//! Relocates one content item between containers as an atomic
//! create-in-target + delete-from-source batch. The two content shapes make
//! the field mapping explicit: entering the inbox drops the position,
//! entering a playlist appends at the end. Either way the item gets a fresh
//! id and a fresh `added_at`, and the source playlist's surviving positions
//! are re-packed in the same batch so they stay dense.

use chrono::Utc;
use cuelist_core::types::{Container, ContentId, ContentItem, Placement, UserId};
use cuelist_core::{CuelistError, Result, Store, WriteOp};
use tracing::debug;

/// Move `id` from `from` to `to` atomically.
///
/// Moving an item to the container it is already in is an explicit no-op:
/// no write is issued, so no duplicate can appear.
pub async fn move_content<S: Store + ?Sized>(
    store: &S,
    user: &UserId,
    from: &Container,
    to: &Container,
    id: &ContentId,
) -> Result<()> {
    if from == to {
        debug!(content = %id, container = %from, "same-container move, nothing to do");
        return Ok(());
    }

    let source_items = store.contents(user, from).await?;
    let item = source_items
        .iter()
        .find(|i| &i.id == id)
        .cloned()
        .ok_or_else(|| CuelistError::not_found("content", id.as_str()))?;

    let placement = match to {
        Container::Inbox => Placement::Inbox,
        Container::Playlist(playlist) => Placement::Playlist {
            playlist: playlist.clone(),
            position: store.content_count(user, to).await?,
        },
    };

    let relocated = ContentItem {
        id: ContentId::generate(),
        added_at: Utc::now(),
        placement,
        ..item.clone()
    };

    let mut batch = vec![
        WriteOp::PutContent(relocated),
        WriteOp::DeleteContent {
            container: from.clone(),
            id: id.clone(),
        },
    ];

    // re-pack the source playlist so positions stay dense
    if let Some(removed_position) = item.position() {
        for sibling in &source_items {
            if let Some(position) = sibling.position() {
                if position > removed_position {
                    batch.push(WriteOp::SetContentPosition {
                        container: from.clone(),
                        id: sibling.id.clone(),
                        position: position - 1,
                    });
                }
            }
        }
    }

    store.commit(user, batch).await
}
