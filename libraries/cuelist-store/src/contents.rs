use crate::error::{Result, StoreError};
use chrono::DateTime;
use cuelist_core::types::{Container, ContentId, ContentItem, Placement, PlaylistId, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, owner_id, playlist_id, position, url, title, author, platform, added_at";

/// Get the contents of one container.
///
/// Playlist contents come back in position order, inbox contents by
/// `added_at` descending (id as a tiebreak so the order is total).
pub async fn in_container(
    pool: &SqlitePool,
    user: &UserId,
    container: &Container,
) -> Result<Vec<ContentItem>> {
    let rows = match container {
        Container::Inbox => {
            sqlx::query(&format!(
                "SELECT {COLUMNS} FROM contents
                 WHERE owner_id = ? AND playlist_id IS NULL
                 ORDER BY added_at DESC, id"
            ))
            .bind(user.as_str())
            .fetch_all(pool)
            .await?
        }
        Container::Playlist(id) => {
            sqlx::query(&format!(
                "SELECT {COLUMNS} FROM contents
                 WHERE owner_id = ? AND playlist_id = ?
                 ORDER BY position"
            ))
            .bind(user.as_str())
            .bind(id.as_str())
            .fetch_all(pool)
            .await?
        }
    };

    rows.iter().map(from_row).collect()
}

/// Get one content item by container and id
pub async fn get(
    pool: &SqlitePool,
    user: &UserId,
    container: &Container,
    id: &ContentId,
) -> Result<Option<ContentItem>> {
    let row = match container {
        Container::Inbox => {
            sqlx::query(&format!(
                "SELECT {COLUMNS} FROM contents
                 WHERE owner_id = ? AND playlist_id IS NULL AND id = ?"
            ))
            .bind(user.as_str())
            .bind(id.as_str())
            .fetch_optional(pool)
            .await?
        }
        Container::Playlist(playlist) => {
            sqlx::query(&format!(
                "SELECT {COLUMNS} FROM contents
                 WHERE owner_id = ? AND playlist_id = ? AND id = ?"
            ))
            .bind(user.as_str())
            .bind(playlist.as_str())
            .bind(id.as_str())
            .fetch_optional(pool)
            .await?
        }
    };

    row.as_ref().map(from_row).transpose()
}

/// Number of items in one container
pub async fn count(pool: &SqlitePool, user: &UserId, container: &Container) -> Result<u32> {
    let count: i64 = match container {
        Container::Inbox => {
            sqlx::query_scalar(
                "SELECT COUNT(*) FROM contents WHERE owner_id = ? AND playlist_id IS NULL",
            )
            .bind(user.as_str())
            .fetch_one(pool)
            .await?
        }
        Container::Playlist(id) => {
            sqlx::query_scalar(
                "SELECT COUNT(*) FROM contents WHERE owner_id = ? AND playlist_id = ?",
            )
            .bind(user.as_str())
            .bind(id.as_str())
            .fetch_one(pool)
            .await?
        }
    };

    Ok(count as u32)
}

/// Insert a content item into the container its placement names
pub(crate) async fn insert(
    conn: &mut SqliteConnection,
    user: &UserId,
    item: &ContentItem,
) -> Result<()> {
    let (playlist_id, position) = match &item.placement {
        Placement::Inbox => (None, None),
        Placement::Playlist { playlist, position } => {
            (Some(playlist.as_str()), Some(i64::from(*position)))
        }
    };

    sqlx::query(
        "INSERT INTO contents (id, owner_id, playlist_id, position, url, title, author, platform, added_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(item.id.as_str())
    .bind(user.as_str())
    .bind(playlist_id)
    .bind(position)
    .bind(&item.url)
    .bind(&item.title)
    .bind(&item.author)
    .bind(&item.platform)
    .bind(item.added_at.timestamp_millis())
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub(crate) async fn update_fields(
    conn: &mut SqliteConnection,
    user: &UserId,
    container: &Container,
    id: &ContentId,
    url: &str,
    title: &str,
    author: &str,
    platform: &str,
) -> Result<()> {
    let result = match container {
        Container::Inbox => {
            sqlx::query(
                "UPDATE contents SET url = ?, title = ?, author = ?, platform = ?
                 WHERE owner_id = ? AND playlist_id IS NULL AND id = ?",
            )
            .bind(url)
            .bind(title)
            .bind(author)
            .bind(platform)
            .bind(user.as_str())
            .bind(id.as_str())
            .execute(&mut *conn)
            .await?
        }
        Container::Playlist(playlist) => {
            sqlx::query(
                "UPDATE contents SET url = ?, title = ?, author = ?, platform = ?
                 WHERE owner_id = ? AND playlist_id = ? AND id = ?",
            )
            .bind(url)
            .bind(title)
            .bind(author)
            .bind(platform)
            .bind(user.as_str())
            .bind(playlist.as_str())
            .bind(id.as_str())
            .execute(&mut *conn)
            .await?
        }
    };

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("content", id.as_str()));
    }
    Ok(())
}

pub(crate) async fn update_position(
    conn: &mut SqliteConnection,
    user: &UserId,
    container: &Container,
    id: &ContentId,
    position: u32,
) -> Result<()> {
    let Container::Playlist(playlist) = container else {
        return Err(StoreError::Unsupported(
            "inbox items carry no position".to_string(),
        ));
    };

    let result = sqlx::query(
        "UPDATE contents SET position = ?
         WHERE owner_id = ? AND playlist_id = ? AND id = ?",
    )
    .bind(i64::from(position))
    .bind(user.as_str())
    .bind(playlist.as_str())
    .bind(id.as_str())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("content", id.as_str()));
    }
    Ok(())
}

pub(crate) async fn delete(
    conn: &mut SqliteConnection,
    user: &UserId,
    container: &Container,
    id: &ContentId,
) -> Result<()> {
    let result = match container {
        Container::Inbox => {
            sqlx::query("DELETE FROM contents WHERE owner_id = ? AND playlist_id IS NULL AND id = ?")
                .bind(user.as_str())
                .bind(id.as_str())
                .execute(&mut *conn)
                .await?
        }
        Container::Playlist(playlist) => {
            sqlx::query("DELETE FROM contents WHERE owner_id = ? AND playlist_id = ? AND id = ?")
                .bind(user.as_str())
                .bind(playlist.as_str())
                .bind(id.as_str())
                .execute(&mut *conn)
                .await?
        }
    };

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("content", id.as_str()));
    }
    Ok(())
}

fn from_row(row: &SqliteRow) -> Result<ContentItem> {
    let playlist_id: Option<String> = row.get("playlist_id");
    let position: Option<i64> = row.get("position");

    let placement = match (playlist_id, position) {
        (None, None) => Placement::Inbox,
        (Some(playlist), Some(position)) => Placement::Playlist {
            playlist: PlaylistId::new(playlist),
            position: position as u32,
        },
        (playlist, position) => {
            return Err(StoreError::Corrupt(format!(
                "content row with playlist_id {playlist:?} but position {position:?}"
            )));
        }
    };

    let added_at = DateTime::from_timestamp_millis(row.get::<i64, _>("added_at"))
        .ok_or_else(|| StoreError::Corrupt("invalid added_at timestamp".to_string()))?;

    Ok(ContentItem {
        id: row.get::<ContentId, _>("id"),
        url: row.get("url"),
        title: row.get("title"),
        author: row.get("author"),
        platform: row.get("platform"),
        added_at,
        placement,
    })
}
