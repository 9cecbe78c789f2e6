use crate::error::{Result, StoreError};
use chrono::{DateTime, Utc};
use cuelist_core::types::{TagEntry, UserId};
use sqlx::{Row, SqliteConnection, SqlitePool};

/// Get a user's tag registry in name order
pub async fn for_user(pool: &SqlitePool, user: &UserId) -> Result<Vec<TagEntry>> {
    let rows = sqlx::query(
        "SELECT name, created_at FROM tags WHERE owner_id = ? ORDER BY name",
    )
    .bind(user.as_str())
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(TagEntry {
                name: row.get("name"),
                created_at: decode_timestamp(row.get("created_at"))?,
            })
        })
        .collect()
}

/// Idempotent upsert; registering an existing tag is a no-op
pub(crate) async fn upsert(conn: &mut SqliteConnection, user: &UserId, name: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO tags (owner_id, name, created_at) VALUES (?, ?, ?)
         ON CONFLICT(owner_id, name) DO NOTHING",
    )
    .bind(user.as_str())
    .bind(name)
    .bind(Utc::now().timestamp_millis())
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub(crate) async fn delete(conn: &mut SqliteConnection, user: &UserId, name: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM tags WHERE owner_id = ? AND name = ?")
        .bind(user.as_str())
        .bind(name)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("tag", name));
    }
    Ok(())
}

pub(crate) fn decode_timestamp(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| StoreError::Corrupt("invalid registry timestamp".to_string()))
}
