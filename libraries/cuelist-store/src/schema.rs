//! Embedded database schema
//!
//! Statements are executed in order on startup; every statement is
//! idempotent so re-running against an existing database is safe.

use crate::error::{Result, StoreError};
use sqlx::SqlitePool;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS playlists (
        id         TEXT PRIMARY KEY,
        owner_id   TEXT NOT NULL,
        name       TEXT NOT NULL,
        tags       TEXT NOT NULL,
        position   INTEGER NOT NULL,
        is_public  INTEGER NOT NULL DEFAULT 0,
        created_at INTEGER NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_playlists_owner ON playlists(owner_id, position)",
    // playlist_id NULL marks an inbox item; exactly then position is NULL too
    "CREATE TABLE IF NOT EXISTS contents (
        id          TEXT PRIMARY KEY,
        owner_id    TEXT NOT NULL,
        playlist_id TEXT,
        position    INTEGER,
        url         TEXT NOT NULL,
        title       TEXT NOT NULL,
        author      TEXT NOT NULL,
        platform    TEXT NOT NULL,
        added_at    INTEGER NOT NULL,
        CHECK ((playlist_id IS NULL) = (position IS NULL))
    )",
    "CREATE INDEX IF NOT EXISTS idx_contents_container
        ON contents(owner_id, playlist_id, position)",
    "CREATE TABLE IF NOT EXISTS tags (
        owner_id   TEXT NOT NULL,
        name       TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        PRIMARY KEY (owner_id, name)
    )",
    "CREATE TABLE IF NOT EXISTS authors (
        owner_id   TEXT NOT NULL,
        name       TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        PRIMARY KEY (owner_id, name)
    )",
];

/// Run schema statements against a pool
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;
    }
    Ok(())
}
