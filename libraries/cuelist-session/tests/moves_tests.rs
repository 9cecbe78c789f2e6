//! Integration tests for the move engine


use cuelist_core::types::*;
use cuelist_core::{CuelistError, Store};
use test_helpers::*;

#[tokio::test]
async fn move_playlist_item_to_inbox() {
    let env = TestEnv::new().await;
    let session = env.session("mover").await;
    let user = session.user().clone();

    let playlist = session.create_playlist("Queue", "misc").await.unwrap();
    let source = Container::Playlist(playlist.id.clone());
    let item = session
        .add_content(&source, content("https://example.com/ep1", "Episode", "NPR"))
        .await
        .unwrap();

    session
        .move_content(&source, &Container::Inbox, &item.id)
        .await
        .unwrap();

    // source no longer holds the original id
    assert!(env
        .store
        .content(&user, &source, &item.id)
        .await
        .unwrap()
        .is_none());

    // the inbox holds one new item: fresh id, no position, fresh added_at,
    // all other fields carried over
    let inbox = env.store.contents(&user, &Container::Inbox).await.unwrap();
    assert_eq!(inbox.len(), 1);
    let moved = &inbox[0];
    assert_ne!(moved.id, item.id);
    assert_eq!(moved.position(), None);
    assert!(moved.added_at.timestamp_millis() >= item.added_at.timestamp_millis());
    assert_eq!(moved.url, item.url);
    assert_eq!(moved.title, "Episode");
    assert_eq!(moved.author, "NPR");
    assert_eq!(moved.platform, item.platform);

    // total item count across the store is unchanged
    assert_eq!(env.store.content_count(&user, &source).await.unwrap(), 0);
    assert_eq!(
        env.store
            .content_count(&user, &Container::Inbox)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn move_inbox_item_appends_to_playlist() {
    let env = TestEnv::new().await;
    let session = env.session("mover").await;
    let user = session.user().clone();

    let playlist = session.create_playlist("Queue", "misc").await.unwrap();
    let target = Container::Playlist(playlist.id.clone());
    session
        .add_content(&target, content("https://example.com/old", "Already Here", ""))
        .await
        .unwrap();
    let item = session
        .add_content(
            &Container::Inbox,
            content("https://example.com/new", "Incoming", ""),
        )
        .await
        .unwrap();

    session
        .move_content(&Container::Inbox, &target, &item.id)
        .await
        .unwrap();

    let contents = env.store.contents(&user, &target).await.unwrap();
    assert_eq!(contents.len(), 2);
    // append-at-end placement
    assert_eq!(contents[1].title, "Incoming");
    assert_eq!(contents[1].position(), Some(1));
    assert!(env.store.contents(&user, &Container::Inbox).await.unwrap().is_empty());
}

#[tokio::test]
async fn move_between_playlists() {
    let env = TestEnv::new().await;
    let session = env.session("mover").await;
    let user = session.user().clone();

    let a = session.create_playlist("A", "misc").await.unwrap();
    let b = session.create_playlist("B", "misc").await.unwrap();
    let from = Container::Playlist(a.id.clone());
    let to = Container::Playlist(b.id.clone());

    let item = session
        .add_content(&from, content("https://example.com/x", "Crosser", ""))
        .await
        .unwrap();

    session.move_content(&from, &to, &item.id).await.unwrap();

    assert_eq!(env.store.content_count(&user, &from).await.unwrap(), 0);
    let moved = env.store.contents(&user, &to).await.unwrap();
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].title, "Crosser");
    assert_eq!(moved[0].position(), Some(0));
}

#[tokio::test]
async fn move_repacks_source_positions() {
    let env = TestEnv::new().await;
    let session = env.session("mover").await;
    let user = session.user().clone();

    let playlist = session.create_playlist("Queue", "misc").await.unwrap();
    let source = Container::Playlist(playlist.id.clone());
    let first = session
        .add_content(&source, content("https://example.com/1", "First", ""))
        .await
        .unwrap();
    let second = session
        .add_content(&source, content("https://example.com/2", "Second", ""))
        .await
        .unwrap();
    let third = session
        .add_content(&source, content("https://example.com/3", "Third", ""))
        .await
        .unwrap();

    session
        .move_content(&source, &Container::Inbox, &second.id)
        .await
        .unwrap();

    let remaining = env.store.contents(&user, &source).await.unwrap();
    assert_eq!(remaining.len(), 2);
    assert_eq!(remaining[0].id, first.id);
    assert_eq!(remaining[0].position(), Some(0));
    assert_eq!(remaining[1].id, third.id);
    assert_eq!(remaining[1].position(), Some(1));
}

#[tokio::test]
async fn same_container_move_is_a_no_op() {
    let env = TestEnv::new().await;
    let session = env.session("mover").await;
    let user = session.user().clone();

    let item = session
        .add_content(
            &Container::Inbox,
            content("https://example.com/a", "Stays", ""),
        )
        .await
        .unwrap();

    session
        .move_content(&Container::Inbox, &Container::Inbox, &item.id)
        .await
        .unwrap();

    // no duplicate, same id, same item
    let inbox = env.store.contents(&user, &Container::Inbox).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].id, item.id);
}

#[tokio::test]
async fn moving_a_missing_item_is_not_found() {
    let env = TestEnv::new().await;
    let session = env.session("mover").await;

    let playlist = session.create_playlist("Queue", "misc").await.unwrap();
    let result = session
        .move_content(
            &Container::Inbox,
            &Container::Playlist(playlist.id.clone()),
            &ContentId::new("ghost"),
        )
        .await;

    assert!(matches!(result, Err(CuelistError::NotFound { .. })));
}
