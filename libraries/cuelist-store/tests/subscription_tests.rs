//! Integration tests for push subscriptions
//!
//! A subscription delivers a full snapshot on every change to its
//! (user, collection) pair and stops feeding once its handle is dropped.


use cuelist_core::types::*;
use cuelist_core::{Store, WriteOp};
use cuelist_store::SqliteStore;
use std::time::Duration;
use test_helpers::*;

async fn wait_for_listener_count(store: &SqliteStore, expected: usize) {
    for _ in 0..200 {
        if store.change_listeners() == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "listener count never reached {expected}, still {}",
        store.change_listeners()
    );
}

async fn next_snapshot<T: Clone>(sub: &mut cuelist_core::Subscription<T>) -> T {
    tokio::time::timeout(Duration::from_secs(5), sub.changed())
        .await
        .expect("no snapshot within 5s")
        .expect("subscription closed");
    sub.current()
}

#[tokio::test]
async fn playlist_subscription_delivers_full_snapshots() {
    let test = TestStore::new().await;
    let user = test_user();

    let mut sub = test.store.watch_playlists(&user).await.unwrap();
    assert!(sub.current().is_empty());

    test.store
        .commit(
            &user,
            vec![WriteOp::PutPlaylist(sample_playlist(&user, "First", 0))],
        )
        .await
        .unwrap();
    let snapshot = next_snapshot(&mut sub).await;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "First");

    test.store
        .commit(
            &user,
            vec![WriteOp::PutPlaylist(sample_playlist(&user, "Second", 1))],
        )
        .await
        .unwrap();
    // snapshots replace wholesale, they do not patch
    let snapshot = next_snapshot(&mut sub).await;
    assert_eq!(snapshot.len(), 2);
}

#[tokio::test]
async fn content_subscription_is_scoped_to_its_container() {
    let test = TestStore::new().await;
    let user = test_user();
    let playlist = sample_playlist(&user, "Watched", 0);
    test.store
        .commit(&user, vec![WriteOp::PutPlaylist(playlist.clone())])
        .await
        .unwrap();

    let container = Container::Playlist(playlist.id.clone());
    let mut sub = test.store.watch_contents(&user, &container).await.unwrap();

    // a commit to a different container leaves this snapshot alone
    test.store
        .commit(
            &user,
            vec![WriteOp::PutContent(inbox_item(
                "https://example.com/x",
                "Elsewhere",
                "",
                0,
            ))],
        )
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(sub.current().is_empty());

    test.store
        .commit(
            &user,
            vec![WriteOp::PutContent(playlist_item(
                &playlist.id,
                0,
                "https://example.com/y",
                "Here",
            ))],
        )
        .await
        .unwrap();
    let snapshot = next_snapshot(&mut sub).await;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].title, "Here");
}

#[tokio::test]
async fn subscriptions_are_scoped_per_user() {
    let test = TestStore::new().await;
    let alice = UserId::new("alice");
    let bob = UserId::new("bob");

    let mut alice_sub = test.store.watch_playlists(&alice).await.unwrap();

    test.store
        .commit(
            &bob,
            vec![WriteOp::PutPlaylist(sample_playlist(&bob, "Bob's", 0))],
        )
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(alice_sub.current().is_empty());

    test.store
        .commit(
            &alice,
            vec![WriteOp::PutPlaylist(sample_playlist(&alice, "Alice's", 0))],
        )
        .await
        .unwrap();
    let snapshot = next_snapshot(&mut alice_sub).await;
    assert_eq!(snapshot[0].name, "Alice's");
}

#[tokio::test]
async fn dropping_the_handle_releases_the_feeder() {
    let test = TestStore::new().await;
    let user = test_user();

    let sub = test.store.watch_tags(&user).await.unwrap();
    wait_for_listener_count(&test.store, 1).await;

    drop(sub);
    wait_for_listener_count(&test.store, 0).await;
}

#[tokio::test]
async fn registry_subscriptions_track_commits() {
    let test = TestStore::new().await;
    let user = test_user();

    let mut tags_sub = test.store.watch_tags(&user).await.unwrap();
    let mut authors_sub = test.store.watch_authors(&user).await.unwrap();

    test.store
        .commit(
            &user,
            vec![
                WriteOp::PutTag {
                    name: "news".to_string(),
                },
                WriteOp::PutAuthor {
                    name: "NPR".to_string(),
                },
            ],
        )
        .await
        .unwrap();

    let tags = next_snapshot(&mut tags_sub).await;
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, "news");

    let authors = next_snapshot(&mut authors_sub).await;
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].name, "NPR");
}
