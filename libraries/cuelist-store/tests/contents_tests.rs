//! Integration tests for the contents slice
//!
//! Covers the two container shapes (inbox vs playlist), their orderings,
//! per-container scoping of reads and writes, and batch atomicity.


use cuelist_core::types::*;
use cuelist_core::{Store, WriteOp};
use test_helpers::*;

#[tokio::test]
async fn inbox_orders_by_added_at_descending() {
    let test = TestStore::new().await;
    let user = test_user();

    let oldest = inbox_item("https://example.com/a", "Oldest", "", 3000);
    let newest = inbox_item("https://example.com/b", "Newest", "", 0);
    let middle = inbox_item("https://example.com/c", "Middle", "", 1500);

    for item in [&oldest, &newest, &middle] {
        test.store
            .commit(&user, vec![WriteOp::PutContent((*item).clone())])
            .await
            .unwrap();
    }

    let inbox = test.store.contents(&user, &Container::Inbox).await.unwrap();
    let titles: Vec<&str> = inbox.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["Newest", "Middle", "Oldest"]);
    assert!(inbox.iter().all(|i| i.position().is_none()));
}

#[tokio::test]
async fn playlist_contents_order_by_position() {
    let test = TestStore::new().await;
    let user = test_user();
    let playlist = sample_playlist(&user, "Queue", 0);

    test.store
        .commit(&user, vec![WriteOp::PutPlaylist(playlist.clone())])
        .await
        .unwrap();

    let second = playlist_item(&playlist.id, 1, "https://example.com/2", "Second");
    let first = playlist_item(&playlist.id, 0, "https://example.com/1", "First");
    test.store
        .commit(
            &user,
            vec![
                WriteOp::PutContent(second),
                WriteOp::PutContent(first),
            ],
        )
        .await
        .unwrap();

    let container = Container::Playlist(playlist.id.clone());
    let contents = test.store.contents(&user, &container).await.unwrap();
    let titles: Vec<&str> = contents.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["First", "Second"]);
    assert_eq!(test.store.content_count(&user, &container).await.unwrap(), 2);
}

#[tokio::test]
async fn reads_are_scoped_to_the_container() {
    let test = TestStore::new().await;
    let user = test_user();
    let playlist = sample_playlist(&user, "Queue", 0);

    let in_playlist = playlist_item(&playlist.id, 0, "https://example.com/1", "Placed");
    let in_inbox = inbox_item("https://example.com/2", "Loose", "", 0);

    test.store
        .commit(
            &user,
            vec![
                WriteOp::PutPlaylist(playlist.clone()),
                WriteOp::PutContent(in_playlist.clone()),
                WriteOp::PutContent(in_inbox.clone()),
            ],
        )
        .await
        .unwrap();

    let container = Container::Playlist(playlist.id.clone());

    // each item is only visible through its own container
    assert!(test
        .store
        .content(&user, &container, &in_playlist.id)
        .await
        .unwrap()
        .is_some());
    assert!(test
        .store
        .content(&user, &Container::Inbox, &in_playlist.id)
        .await
        .unwrap()
        .is_none());
    assert!(test
        .store
        .content(&user, &Container::Inbox, &in_inbox.id)
        .await
        .unwrap()
        .is_some());
    assert!(test
        .store
        .content(&user, &container, &in_inbox.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn update_fields_rewrites_platform() {
    let test = TestStore::new().await;
    let user = test_user();
    let item = inbox_item("https://example.com/old", "Old", "Someone", 0);

    test.store
        .commit(&user, vec![WriteOp::PutContent(item.clone())])
        .await
        .unwrap();

    test.store
        .commit(
            &user,
            vec![WriteOp::SetContentFields {
                container: Container::Inbox,
                id: item.id.clone(),
                url: "https://youtu.be/xyz".to_string(),
                title: "New".to_string(),
                author: "Someone".to_string(),
                platform: "YouTube".to_string(),
            }],
        )
        .await
        .unwrap();

    let updated = test
        .store
        .content(&user, &Container::Inbox, &item.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.url, "https://youtu.be/xyz");
    assert_eq!(updated.title, "New");
    assert_eq!(updated.platform, "YouTube");
    // added_at is a creation marker, not a modification time
    assert_eq!(
        updated.added_at.timestamp_millis(),
        item.added_at.timestamp_millis()
    );
}

#[tokio::test]
async fn delete_content_from_container() {
    let test = TestStore::new().await;
    let user = test_user();
    let item = inbox_item("https://example.com/a", "Gone Soon", "", 0);

    test.store
        .commit(&user, vec![WriteOp::PutContent(item.clone())])
        .await
        .unwrap();
    test.store
        .commit(
            &user,
            vec![WriteOp::DeleteContent {
                container: Container::Inbox,
                id: item.id.clone(),
            }],
        )
        .await
        .unwrap();

    assert!(test
        .store
        .content(&user, &Container::Inbox, &item.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn failing_op_rolls_back_the_whole_batch() {
    let test = TestStore::new().await;
    let user = test_user();
    let item = inbox_item("https://example.com/a", "Survivor", "", 0);

    // second op targets a missing row, so the insert must not stick
    let result = test
        .store
        .commit(
            &user,
            vec![
                WriteOp::PutContent(item.clone()),
                WriteOp::DeleteContent {
                    container: Container::Inbox,
                    id: ContentId::new("missing"),
                },
            ],
        )
        .await;

    assert!(result.is_err());
    assert!(test
        .store
        .contents(&user, &Container::Inbox)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn atomic_move_between_containers() {
    let test = TestStore::new().await;
    let user = test_user();
    let playlist = sample_playlist(&user, "Queue", 0);
    let item = playlist_item(&playlist.id, 0, "https://example.com/ep1", "Episode");

    test.store
        .commit(
            &user,
            vec![
                WriteOp::PutPlaylist(playlist.clone()),
                WriteOp::PutContent(item.clone()),
            ],
        )
        .await
        .unwrap();

    // create-in-target plus delete-from-source as one batch
    let relocated = ContentItem {
        id: ContentId::generate(),
        placement: Placement::Inbox,
        ..item.clone()
    };
    test.store
        .commit(
            &user,
            vec![
                WriteOp::PutContent(relocated.clone()),
                WriteOp::DeleteContent {
                    container: Container::Playlist(playlist.id.clone()),
                    id: item.id.clone(),
                },
            ],
        )
        .await
        .unwrap();

    let source = Container::Playlist(playlist.id.clone());
    assert_eq!(test.store.content_count(&user, &source).await.unwrap(), 0);
    let inbox = test.store.contents(&user, &Container::Inbox).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].id, relocated.id);
    assert_eq!(inbox[0].title, "Episode");
}
