//! Per-user session orchestration
//!
//! A [`Session`] owns the signed-in user's live subscriptions and exposes
//! the command surface the presentation layer drives. State flows one way:
//! commands issue atomic batches, subscriptions push fresh snapshots back,
//! and [`Session::sync`] folds the latest snapshots into the working state.
//! The one exception is reordering, which applies its transition to the
//! working state optimistically and restores the captured snapshot if the
//! commit is rejected.

use crate::{moves, ordering, search, tags};
use chrono::Utc;
use cuelist_core::types::{
    author_or_sentinel, title_or_sentinel, Container, ContentId, ContentItem, CreateContent,
    Placement, Playlist, PlaylistId, TagSet, UNKNOWN_AUTHOR,
};
use cuelist_core::{
    detect_platform, validate, CuelistError, Identity, Result, ShareLink, Store, Subscription,
    UserId, WriteOp,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// The selected container and its live content subscription.
///
/// Owning the subscription here is what scopes its lifetime: replacing or
/// clearing the selection drops the handle, which cancels the feed before
/// any new one is acquired.
struct Selection {
    container: Container,
    sub: Subscription<Vec<ContentItem>>,
    items: Vec<ContentItem>,
}

/// A signed-in user's live view of the store
pub struct Session<S: Store> {
    store: Arc<S>,
    identity: Identity,
    playlists_sub: Subscription<Vec<Playlist>>,
    tags_sub: Subscription<Vec<cuelist_core::TagEntry>>,
    authors_sub: Subscription<Vec<cuelist_core::AuthorEntry>>,
    playlists: Vec<Playlist>,
    selection: Option<Selection>,
}

impl<S: Store> Session<S> {
    /// Establish a session for `identity`, acquiring the long-lived
    /// playlist/tag/author subscriptions.
    pub async fn start(store: Arc<S>, identity: Identity) -> Result<Self> {
        let user = identity.uid.clone();
        let playlists_sub = store.watch_playlists(&user).await?;
        let tags_sub = store.watch_tags(&user).await?;
        let authors_sub = store.watch_authors(&user).await?;
        let playlists = playlists_sub.current();
        debug!(user = %user, playlists = playlists.len(), "session started");

        Ok(Self {
            store,
            identity,
            playlists_sub,
            tags_sub,
            authors_sub,
            playlists,
            selection: None,
        })
    }

    pub fn user(&self) -> &UserId {
        &self.identity.uid
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Fold the latest subscription snapshots into the working state,
    /// replacing it wholesale.
    pub fn sync(&mut self) {
        self.playlists = self.playlists_sub.current();
        if let Some(selection) = self.selection.as_mut() {
            selection.items = selection.sub.current();
        }
    }

    /// Wait for the next playlist snapshot, then sync it
    pub async fn playlists_changed(&mut self) -> Result<()> {
        self.playlists_sub.changed().await?;
        self.playlists = self.playlists_sub.current();
        Ok(())
    }

    /// Wait for the next snapshot of the selected container, then sync it
    pub async fn contents_changed(&mut self) -> Result<()> {
        let selection = self
            .selection
            .as_mut()
            .ok_or_else(|| CuelistError::validation("no container selected"))?;
        selection.sub.changed().await?;
        selection.items = selection.sub.current();
        Ok(())
    }

    // ========================================================================
    // Working state
    // ========================================================================

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Playlists carrying `tag` (the tag filter facet)
    pub fn playlists_tagged(&self, tag: &str) -> Vec<&Playlist> {
        self.playlists
            .iter()
            .filter(|playlist| playlist.tags.contains(tag))
            .collect()
    }

    /// Registry-backed datalist suggestions for tag input
    pub fn tag_suggestions(&self) -> Vec<String> {
        self.tags_sub
            .current()
            .into_iter()
            .map(|entry| entry.name)
            .collect()
    }

    /// Registry-backed datalist suggestions for author input
    pub fn author_suggestions(&self) -> Vec<String> {
        self.authors_sub
            .current()
            .into_iter()
            .map(|entry| entry.name)
            .collect()
    }

    pub fn selected(&self) -> Option<&Container> {
        self.selection.as_ref().map(|selection| &selection.container)
    }

    /// Contents of the selected container; empty when nothing is selected
    pub fn selected_items(&self) -> &[ContentItem] {
        self.selection
            .as_ref()
            .map(|selection| selection.items.as_slice())
            .unwrap_or(&[])
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Select a container to browse.
    ///
    /// The previous content subscription is released before the new one is
    /// acquired, so a late delivery from the old feed cannot overwrite the
    /// new container's state.
    pub async fn select(&mut self, container: Container) -> Result<()> {
        self.selection = None;
        let sub = self
            .store
            .watch_contents(&self.identity.uid, &container)
            .await?;
        let items = sub.current();
        self.selection = Some(Selection {
            container,
            sub,
            items,
        });
        Ok(())
    }

    /// Drop the selection and its subscription
    pub fn deselect(&mut self) {
        self.selection = None;
    }

    // ========================================================================
    // Playlists
    // ========================================================================

    /// Create a playlist appended at the end of the user's list. New tags
    /// are registered in the same commit as the playlist itself.
    pub async fn create_playlist(&self, name: &str, tags_text: &str) -> Result<Playlist> {
        let name = validate::non_empty("playlist name", name)?;
        let tags = TagSet::parse(tags_text);
        let position = self.store.playlists(self.user()).await?.len() as u32;

        let playlist = Playlist::new(self.user().clone(), name, tags.clone(), position);
        let mut batch = vec![WriteOp::PutPlaylist(playlist.clone())];
        batch.extend(tags::registration_ops(self.store.as_ref(), self.user(), &tags).await?);

        self.store.commit(self.user(), batch).await?;
        Ok(playlist)
    }

    /// Rename a playlist and replace its tags, registering any new ones
    pub async fn rename_playlist(
        &self,
        id: &PlaylistId,
        name: &str,
        tags_text: &str,
    ) -> Result<()> {
        let name = validate::non_empty("playlist name", name)?;
        let tags = TagSet::parse(tags_text);
        let playlist = self
            .store
            .playlist(self.user(), id)
            .await?
            .ok_or_else(|| CuelistError::not_found("playlist", id.as_str()))?;

        let mut batch = vec![
            WriteOp::SetPlaylistMeta {
                id: id.clone(),
                name,
                is_public: playlist.is_public,
            },
            WriteOp::SetPlaylistTags {
                id: id.clone(),
                tags: tags.clone(),
            },
        ];
        batch.extend(tags::registration_ops(self.store.as_ref(), self.user(), &tags).await?);

        self.store.commit(self.user(), batch).await
    }

    /// Publish or unpublish the playlist's share view
    pub async fn set_playlist_public(&self, id: &PlaylistId, is_public: bool) -> Result<()> {
        let playlist = self
            .store
            .playlist(self.user(), id)
            .await?
            .ok_or_else(|| CuelistError::not_found("playlist", id.as_str()))?;

        self.store
            .commit(
                self.user(),
                vec![WriteOp::SetPlaylistMeta {
                    id: id.clone(),
                    name: playlist.name,
                    is_public,
                }],
            )
            .await
    }

    /// The share link for a playlist (only resolvable while it is public)
    pub fn share_link(&self, id: &PlaylistId) -> ShareLink {
        ShareLink::new(self.user().clone(), id.clone())
    }

    /// Delete a playlist together with its contents, keeping the surviving
    /// playlists' positions dense.
    pub async fn delete_playlist(&mut self, id: &PlaylistId) -> Result<()> {
        let playlists = self.store.playlists(self.user()).await?;
        let target = playlists
            .iter()
            .find(|playlist| &playlist.id == id)
            .ok_or_else(|| CuelistError::not_found("playlist", id.as_str()))?;

        let container = Container::Playlist(id.clone());
        let mut batch: Vec<WriteOp> = self
            .store
            .contents(self.user(), &container)
            .await?
            .into_iter()
            .map(|item| WriteOp::DeleteContent {
                container: container.clone(),
                id: item.id,
            })
            .collect();
        batch.push(WriteOp::DeletePlaylist { id: id.clone() });
        for playlist in &playlists {
            if playlist.position > target.position {
                batch.push(WriteOp::SetPlaylistPosition {
                    id: playlist.id.clone(),
                    position: playlist.position - 1,
                });
            }
        }

        self.store.commit(self.user(), batch).await?;

        if self
            .selection
            .as_ref()
            .is_some_and(|selection| selection.container == container)
        {
            self.selection = None;
        }
        Ok(())
    }

    // ========================================================================
    // Content
    // ========================================================================

    /// Add a content item to a container.
    ///
    /// Blank title/author become their sentinels, the platform is derived
    /// from the url, and a non-sentinel author is upserted into the author
    /// registry inside the same commit.
    pub async fn add_content(
        &self,
        container: &Container,
        input: CreateContent,
    ) -> Result<ContentItem> {
        let url = validate::http_url(&input.url)?;
        let title = title_or_sentinel(&input.title);
        let author = author_or_sentinel(&input.author);
        let platform = detect_platform(&url);

        let placement = match container {
            Container::Inbox => Placement::Inbox,
            Container::Playlist(playlist) => Placement::Playlist {
                playlist: playlist.clone(),
                position: self.store.content_count(self.user(), container).await?,
            },
        };

        let item = ContentItem {
            id: ContentId::generate(),
            url,
            title,
            author: author.clone(),
            platform,
            added_at: Utc::now(),
            placement,
        };

        let mut batch = vec![WriteOp::PutContent(item.clone())];
        if author != UNKNOWN_AUTHOR {
            batch.push(WriteOp::PutAuthor { name: author });
        }

        self.store.commit(self.user(), batch).await?;
        Ok(item)
    }

    /// Edit a content item's url/title/author; the platform follows the url
    pub async fn edit_content(
        &self,
        container: &Container,
        id: &ContentId,
        input: CreateContent,
    ) -> Result<()> {
        let url = validate::http_url(&input.url)?;
        let title = title_or_sentinel(&input.title);
        let author = author_or_sentinel(&input.author);
        let platform = detect_platform(&url);

        self.store
            .commit(
                self.user(),
                vec![WriteOp::SetContentFields {
                    container: container.clone(),
                    id: id.clone(),
                    url,
                    title,
                    author,
                    platform,
                }],
            )
            .await
    }

    /// Remove a content item, re-packing playlist positions to stay dense
    pub async fn remove_content(&self, container: &Container, id: &ContentId) -> Result<()> {
        let mut batch = vec![WriteOp::DeleteContent {
            container: container.clone(),
            id: id.clone(),
        }];

        if !container.is_inbox() {
            let items = self.store.contents(self.user(), container).await?;
            let removed = items
                .iter()
                .find(|item| &item.id == id)
                .ok_or_else(|| CuelistError::not_found("content", id.as_str()))?;
            let removed_position = removed.position().unwrap_or(0);
            for item in &items {
                if let Some(position) = item.position() {
                    if position > removed_position {
                        batch.push(WriteOp::SetContentPosition {
                            container: container.clone(),
                            id: item.id.clone(),
                            position: position - 1,
                        });
                    }
                }
            }
        }

        self.store.commit(self.user(), batch).await
    }

    /// Move a content item between containers (see [`moves::move_content`])
    pub async fn move_content(
        &self,
        from: &Container,
        to: &Container,
        id: &ContentId,
    ) -> Result<()> {
        moves::move_content(self.store.as_ref(), self.user(), from, to, id).await
    }

    // ========================================================================
    // Reordering (optimistic with rollback)
    // ========================================================================

    /// Relocate a playlist within the user's list
    pub async fn reorder_playlists(&mut self, from: usize, to: usize) -> Result<()> {
        let snapshot = self.playlists.clone();
        let ids: Vec<PlaylistId> = snapshot.iter().map(|playlist| playlist.id.clone()).collect();
        let plan = ordering::plan_reorder(&ids, from, to)?;
        if plan.updates.is_empty() {
            return Ok(());
        }

        // tentative local transition; the captured snapshot is the rollback
        self.playlists = plan
            .order
            .iter()
            .enumerate()
            .filter_map(|(position, id)| {
                snapshot.iter().find(|p| &p.id == id).cloned().map(|mut playlist| {
                    playlist.position = position as u32;
                    playlist
                })
            })
            .collect();

        let batch = plan
            .updates
            .iter()
            .map(|(id, position)| WriteOp::SetPlaylistPosition {
                id: id.clone(),
                position: *position,
            })
            .collect();

        if let Err(err) = self.store.commit(&self.identity.uid, batch).await {
            warn!(user = %self.identity.uid, "playlist reorder rejected, rolling back: {err}");
            self.playlists = snapshot;
            return Err(err);
        }
        Ok(())
    }

    /// Relocate a content item within the selected playlist
    pub async fn reorder_contents(&mut self, from: usize, to: usize) -> Result<()> {
        let user = self.identity.uid.clone();
        let selection = self
            .selection
            .as_mut()
            .ok_or_else(|| CuelistError::validation("no container selected"))?;
        if selection.container.is_inbox() {
            return Err(CuelistError::validation("the inbox has no manual order"));
        }

        let snapshot = selection.items.clone();
        let ids: Vec<ContentId> = snapshot.iter().map(|item| item.id.clone()).collect();
        let plan = ordering::plan_reorder(&ids, from, to)?;
        if plan.updates.is_empty() {
            return Ok(());
        }

        selection.items = plan
            .order
            .iter()
            .enumerate()
            .filter_map(|(position, id)| {
                snapshot.iter().find(|i| &i.id == id).cloned().map(|mut item| {
                    if let Placement::Playlist { position: p, .. } = &mut item.placement {
                        *p = position as u32;
                    }
                    item
                })
            })
            .collect();

        let container = selection.container.clone();
        let batch = plan
            .updates
            .iter()
            .map(|(id, position)| WriteOp::SetContentPosition {
                container: container.clone(),
                id: id.clone(),
                position: *position,
            })
            .collect();

        if let Err(err) = self.store.commit(&user, batch).await {
            warn!(user = %user, container = %container, "reorder rejected, rolling back: {err}");
            if let Some(selection) = self.selection.as_mut() {
                selection.items = snapshot;
            }
            return Err(err);
        }
        Ok(())
    }

    // ========================================================================
    // Engines
    // ========================================================================

    /// Search all content (see [`search::search`])
    pub async fn search(&self, query: &str) -> Result<Vec<search::SearchHit>> {
        search::search(self.store.as_ref(), self.user(), query).await
    }

    /// Delete a tag everywhere (see [`tags::delete_tag`])
    pub async fn delete_tag(&self, tag: &str) -> Result<()> {
        tags::delete_tag(self.store.as_ref(), self.user(), tag).await
    }
}
