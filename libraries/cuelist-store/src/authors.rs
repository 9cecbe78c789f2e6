use crate::error::Result;
use crate::tags::decode_timestamp;
use chrono::Utc;
use cuelist_core::types::{AuthorEntry, UserId};
use sqlx::{Row, SqliteConnection, SqlitePool};

/// Get a user's author registry in name order
pub async fn for_user(pool: &SqlitePool, user: &UserId) -> Result<Vec<AuthorEntry>> {
    let rows = sqlx::query(
        "SELECT name, created_at FROM authors WHERE owner_id = ? ORDER BY name",
    )
    .bind(user.as_str())
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(AuthorEntry {
                name: row.get("name"),
                created_at: decode_timestamp(row.get("created_at"))?,
            })
        })
        .collect()
}

/// Idempotent upsert; registering an existing author is a no-op
pub(crate) async fn upsert(conn: &mut SqliteConnection, user: &UserId, name: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO authors (owner_id, name, created_at) VALUES (?, ?, ?)
         ON CONFLICT(owner_id, name) DO NOTHING",
    )
    .bind(user.as_str())
    .bind(name)
    .bind(Utc::now().timestamp_millis())
    .execute(&mut *conn)
    .await?;

    Ok(())
}
