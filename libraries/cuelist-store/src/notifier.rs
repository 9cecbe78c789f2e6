//! Collection change bus
//!
//! Every successful commit publishes one [`Change`] per touched collection.
//! Subscription feeders listen on the bus and re-fetch a full snapshot when
//! a change for their (user, collection) pair arrives.

use cuelist_core::types::{Container, UserId};
use tokio::sync::broadcast;

/// A store collection, as the unit of change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    /// The user's playlist list
    Playlists,
    /// One container's contents
    Contents(Container),
    /// The tag registry
    Tags,
    /// The author registry
    Authors,
}

/// One collection of one user changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub user: UserId,
    pub collection: Collection,
}

/// Broadcast sender fanning commit notifications out to all feeders
#[derive(Debug, Clone)]
pub(crate) struct ChangeNotifier {
    tx: broadcast::Sender<Change>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    /// Publish a change; lack of listeners is not an error
    pub fn publish(&self, change: Change) {
        let _ = self.tx.send(change);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Change> {
        self.tx.subscribe()
    }

    /// Number of live listeners (exposed for tests through the store)
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
