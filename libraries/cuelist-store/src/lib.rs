//! Cuelist Storage
//!
//! SQLite-backed document store for Cuelist. Implements the
//! `cuelist_core::Store` trait: per-collection queries, atomic multi-document
//! batch commits (one SQLite transaction per batch), and push subscriptions
//! that deliver a full collection snapshot on every change.
//!
//! # Example
//!
//! ```rust,no_run
//! use cuelist_core::types::{Container, UserId};
//! use cuelist_core::Store;
//! use cuelist_store::SqliteStore;
//!
//! # async fn example() -> cuelist_core::Result<()> {
//! let store = SqliteStore::connect("sqlite://cuelist.db").await?;
//! let user = UserId::new("user-1");
//! let _inbox = store.contents(&user, &Container::Inbox).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod notifier;
mod schema;
mod store;

// Vertical slices
pub mod authors;
pub mod contents;
pub mod playlists;
pub mod tags;

pub use error::StoreError;
pub use notifier::{Change, Collection};
pub use schema::run_migrations;
pub use store::SqliteStore;

use sqlx::sqlite::SqlitePool;

/// Create a new `SQLite` pool
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}
