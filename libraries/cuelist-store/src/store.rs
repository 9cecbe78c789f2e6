//! SQLite-backed implementation of the `Store` trait
//!
//! Batches map onto one SQLite transaction, which is what makes
//! `commit` all-or-nothing. Subscriptions pair a watch channel with a
//! feeder task listening on the change bus; a feeder re-fetches the full
//! collection snapshot whenever a commit touches it.

use crate::error::{Result, StoreError};
use crate::notifier::{Change, ChangeNotifier, Collection};
use crate::{authors, contents, playlists, schema, tags};
use async_trait::async_trait;
use cuelist_core::types::{
    AuthorEntry, Container, ContentId, ContentItem, Playlist, PlaylistId, TagEntry, UserId,
};
use cuelist_core::{CuelistError, Store, Subscription, WriteOp};
use sqlx::{SqliteConnection, SqlitePool};
use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

/// SQLite document store with per-commit change notification
pub struct SqliteStore {
    pool: SqlitePool,
    notifier: ChangeNotifier,
}

impl SqliteStore {
    /// Connect to a database url, creating the file and schema as needed
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = crate::create_pool(database_url).await?;
        schema::run_migrations(&pool).await?;
        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool (schema must already be in place)
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Get a reference to the underlying pool (for testing)
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Number of live subscription feeders (for testing)
    pub fn change_listeners(&self) -> usize {
        self.notifier.receiver_count()
    }
}

async fn apply_op(conn: &mut SqliteConnection, user: &UserId, op: &WriteOp) -> Result<()> {
    match op {
        WriteOp::PutPlaylist(playlist) => playlists::put(conn, playlist).await,
        WriteOp::SetPlaylistMeta {
            id,
            name,
            is_public,
        } => playlists::update_meta(conn, user, id, name, *is_public).await,
        WriteOp::SetPlaylistTags { id, tags } => playlists::update_tags(conn, user, id, tags).await,
        WriteOp::SetPlaylistPosition { id, position } => {
            playlists::update_position(conn, user, id, *position).await
        }
        WriteOp::DeletePlaylist { id } => playlists::delete(conn, user, id).await,
        WriteOp::PutContent(item) => contents::insert(conn, user, item).await,
        WriteOp::SetContentFields {
            container,
            id,
            url,
            title,
            author,
            platform,
        } => contents::update_fields(conn, user, container, id, url, title, author, platform).await,
        WriteOp::SetContentPosition {
            container,
            id,
            position,
        } => contents::update_position(conn, user, container, id, *position).await,
        WriteOp::DeleteContent { container, id } => contents::delete(conn, user, container, id).await,
        WriteOp::PutTag { name } => tags::upsert(conn, user, name).await,
        WriteOp::DeleteTag { name } => tags::delete(conn, user, name).await,
        WriteOp::PutAuthor { name } => authors::upsert(conn, user, name).await,
    }
}

/// The collection a write invalidates, for change notification
fn touched_collection(op: &WriteOp) -> Collection {
    match op {
        WriteOp::PutPlaylist(_)
        | WriteOp::SetPlaylistMeta { .. }
        | WriteOp::SetPlaylistTags { .. }
        | WriteOp::SetPlaylistPosition { .. }
        | WriteOp::DeletePlaylist { .. } => Collection::Playlists,
        WriteOp::PutContent(item) => Collection::Contents(item.container()),
        WriteOp::SetContentFields { container, .. }
        | WriteOp::SetContentPosition { container, .. }
        | WriteOp::DeleteContent { container, .. } => Collection::Contents(container.clone()),
        WriteOp::PutTag { .. } | WriteOp::DeleteTag { .. } => Collection::Tags,
        WriteOp::PutAuthor { .. } => Collection::Authors,
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn playlists(&self, user: &UserId) -> cuelist_core::Result<Vec<Playlist>> {
        Ok(playlists::for_user(&self.pool, user).await?)
    }

    async fn playlist(
        &self,
        user: &UserId,
        id: &PlaylistId,
    ) -> cuelist_core::Result<Option<Playlist>> {
        Ok(playlists::get(&self.pool, user, id).await?)
    }

    async fn contents(
        &self,
        user: &UserId,
        container: &Container,
    ) -> cuelist_core::Result<Vec<ContentItem>> {
        Ok(contents::in_container(&self.pool, user, container).await?)
    }

    async fn content(
        &self,
        user: &UserId,
        container: &Container,
        id: &ContentId,
    ) -> cuelist_core::Result<Option<ContentItem>> {
        Ok(contents::get(&self.pool, user, container, id).await?)
    }

    async fn content_count(
        &self,
        user: &UserId,
        container: &Container,
    ) -> cuelist_core::Result<u32> {
        Ok(contents::count(&self.pool, user, container).await?)
    }

    async fn tags(&self, user: &UserId) -> cuelist_core::Result<Vec<TagEntry>> {
        Ok(tags::for_user(&self.pool, user).await?)
    }

    async fn authors(&self, user: &UserId) -> cuelist_core::Result<Vec<AuthorEntry>> {
        Ok(authors::for_user(&self.pool, user).await?)
    }

    async fn commit(&self, user: &UserId, batch: Vec<WriteOp>) -> cuelist_core::Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(StoreError::from)?;
        let mut touched: Vec<Collection> = Vec::new();

        for op in &batch {
            apply_op(&mut tx, user, op).await?;
            let collection = touched_collection(op);
            if !touched.contains(&collection) {
                touched.push(collection);
            }
        }

        tx.commit()
            .await
            .map_err(|e| CuelistError::CommitRejected(e.to_string()))?;

        debug!(user = %user, ops = batch.len(), "committed batch");

        for collection in touched {
            self.notifier.publish(Change {
                user: user.clone(),
                collection,
            });
        }
        Ok(())
    }

    async fn watch_playlists(
        &self,
        user: &UserId,
    ) -> cuelist_core::Result<Subscription<Vec<Playlist>>> {
        let initial = playlists::for_user(&self.pool, user).await?;
        let (tx, rx) = watch::channel(initial);
        let mut changes = self.notifier.subscribe();
        let pool = self.pool.clone();
        let user = user.clone();

        let feeder = tokio::spawn(async move {
            loop {
                let relevant = match changes.recv().await {
                    Ok(change) => change.user == user && change.collection == Collection::Playlists,
                    // missed notifications; the snapshot re-fetch self-heals
                    Err(broadcast::error::RecvError::Lagged(_)) => true,
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                if !relevant {
                    continue;
                }
                match playlists::for_user(&pool, &user).await {
                    Ok(snapshot) => {
                        if tx.send(snapshot).is_err() {
                            break;
                        }
                    }
                    Err(err) => warn!(user = %user, "playlist snapshot refresh failed: {err}"),
                }
            }
        });

        Ok(Subscription::new(rx, feeder))
    }

    async fn watch_contents(
        &self,
        user: &UserId,
        container: &Container,
    ) -> cuelist_core::Result<Subscription<Vec<ContentItem>>> {
        let initial = contents::in_container(&self.pool, user, container).await?;
        let (tx, rx) = watch::channel(initial);
        let mut changes = self.notifier.subscribe();
        let pool = self.pool.clone();
        let user = user.clone();
        let container = container.clone();

        let feeder = tokio::spawn(async move {
            let watched = Collection::Contents(container.clone());
            loop {
                let relevant = match changes.recv().await {
                    Ok(change) => change.user == user && change.collection == watched,
                    Err(broadcast::error::RecvError::Lagged(_)) => true,
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                if !relevant {
                    continue;
                }
                match contents::in_container(&pool, &user, &container).await {
                    Ok(snapshot) => {
                        if tx.send(snapshot).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(user = %user, container = %container, "content snapshot refresh failed: {err}");
                    }
                }
            }
        });

        Ok(Subscription::new(rx, feeder))
    }

    async fn watch_tags(&self, user: &UserId) -> cuelist_core::Result<Subscription<Vec<TagEntry>>> {
        let initial = tags::for_user(&self.pool, user).await?;
        let (tx, rx) = watch::channel(initial);
        let mut changes = self.notifier.subscribe();
        let pool = self.pool.clone();
        let user = user.clone();

        let feeder = tokio::spawn(async move {
            loop {
                let relevant = match changes.recv().await {
                    Ok(change) => change.user == user && change.collection == Collection::Tags,
                    Err(broadcast::error::RecvError::Lagged(_)) => true,
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                if !relevant {
                    continue;
                }
                match tags::for_user(&pool, &user).await {
                    Ok(snapshot) => {
                        if tx.send(snapshot).is_err() {
                            break;
                        }
                    }
                    Err(err) => warn!(user = %user, "tag snapshot refresh failed: {err}"),
                }
            }
        });

        Ok(Subscription::new(rx, feeder))
    }

    async fn watch_authors(
        &self,
        user: &UserId,
    ) -> cuelist_core::Result<Subscription<Vec<AuthorEntry>>> {
        let initial = authors::for_user(&self.pool, user).await?;
        let (tx, rx) = watch::channel(initial);
        let mut changes = self.notifier.subscribe();
        let pool = self.pool.clone();
        let user = user.clone();

        let feeder = tokio::spawn(async move {
            loop {
                let relevant = match changes.recv().await {
                    Ok(change) => change.user == user && change.collection == Collection::Authors,
                    Err(broadcast::error::RecvError::Lagged(_)) => true,
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                if !relevant {
                    continue;
                }
                match authors::for_user(&pool, &user).await {
                    Ok(snapshot) => {
                        if tx.send(snapshot).is_err() {
                            break;
                        }
                    }
                    Err(err) => warn!(user = %user, "author snapshot refresh failed: {err}"),
                }
            }
        });

        Ok(Subscription::new(rx, feeder))
    }
}
