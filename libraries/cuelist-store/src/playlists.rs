use crate::error::{Result, StoreError};
use chrono::DateTime;
use cuelist_core::types::{Playlist, PlaylistId, TagSet, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

/// Get a user's playlists in position order
pub async fn for_user(pool: &SqlitePool, user: &UserId) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        "SELECT id, owner_id, name, tags, position, is_public, created_at
         FROM playlists WHERE owner_id = ? ORDER BY position",
    )
    .bind(user.as_str())
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Get one playlist by id
pub async fn get(pool: &SqlitePool, user: &UserId, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query(
        "SELECT id, owner_id, name, tags, position, is_public, created_at
         FROM playlists WHERE owner_id = ? AND id = ?",
    )
    .bind(user.as_str())
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Create or overwrite a playlist row (document-store `set` semantics)
pub(crate) async fn put(conn: &mut SqliteConnection, playlist: &Playlist) -> Result<()> {
    sqlx::query(
        "INSERT OR REPLACE INTO playlists (id, owner_id, name, tags, position, is_public, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(playlist.id.as_str())
    .bind(playlist.owner_id.as_str())
    .bind(&playlist.name)
    .bind(encode_tags(&playlist.tags)?)
    .bind(i64::from(playlist.position))
    .bind(i64::from(playlist.is_public))
    .bind(playlist.created_at.timestamp_millis())
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub(crate) async fn update_meta(
    conn: &mut SqliteConnection,
    user: &UserId,
    id: &PlaylistId,
    name: &str,
    is_public: bool,
) -> Result<()> {
    let result = sqlx::query(
        "UPDATE playlists SET name = ?, is_public = ? WHERE owner_id = ? AND id = ?",
    )
    .bind(name)
    .bind(i64::from(is_public))
    .bind(user.as_str())
    .bind(id.as_str())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("playlist", id.as_str()));
    }
    Ok(())
}

pub(crate) async fn update_tags(
    conn: &mut SqliteConnection,
    user: &UserId,
    id: &PlaylistId,
    tags: &TagSet,
) -> Result<()> {
    let result = sqlx::query("UPDATE playlists SET tags = ? WHERE owner_id = ? AND id = ?")
        .bind(encode_tags(tags)?)
        .bind(user.as_str())
        .bind(id.as_str())
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("playlist", id.as_str()));
    }
    Ok(())
}

pub(crate) async fn update_position(
    conn: &mut SqliteConnection,
    user: &UserId,
    id: &PlaylistId,
    position: u32,
) -> Result<()> {
    let result = sqlx::query("UPDATE playlists SET position = ? WHERE owner_id = ? AND id = ?")
        .bind(i64::from(position))
        .bind(user.as_str())
        .bind(id.as_str())
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("playlist", id.as_str()));
    }
    Ok(())
}

pub(crate) async fn delete(
    conn: &mut SqliteConnection,
    user: &UserId,
    id: &PlaylistId,
) -> Result<()> {
    let result = sqlx::query("DELETE FROM playlists WHERE owner_id = ? AND id = ?")
        .bind(user.as_str())
        .bind(id.as_str())
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("playlist", id.as_str()));
    }
    Ok(())
}

fn encode_tags(tags: &TagSet) -> Result<String> {
    serde_json::to_string(tags.names())
        .map_err(|e| StoreError::Corrupt(format!("tag encoding: {e}")))
}

fn from_row(row: &SqliteRow) -> Result<Playlist> {
    let names: Vec<String> = serde_json::from_str(row.get::<String, _>("tags").as_str())
        .map_err(|e| StoreError::Corrupt(format!("tag encoding: {e}")))?;
    let created_at = DateTime::from_timestamp_millis(row.get::<i64, _>("created_at"))
        .ok_or_else(|| StoreError::Corrupt("invalid created_at timestamp".to_string()))?;

    Ok(Playlist::with_id(
        row.get::<PlaylistId, _>("id"),
        row.get::<UserId, _>("owner_id"),
        row.get::<String, _>("name"),
        TagSet::from_tags(names),
        row.get::<i64, _>("position") as u32,
        row.get::<i64, _>("is_public") != 0,
        created_at,
    ))
}
