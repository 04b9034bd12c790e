//! Track comments

use crate::error::Result;
use crate::{datetime_from_millis, now_millis};
use chorus_core::types::{Comment, TrackId, UserId};
use sqlx::{Row, SqlitePool};

/// Post a comment, returning its id
pub async fn add(
    pool: &SqlitePool,
    track_id: TrackId,
    user_id: UserId,
    content: &str,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO comments (track_id, user_id, content, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(track_id)
    .bind(user_id)
    .bind(content)
    .bind(now_millis())
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Comments on a track, newest first, with author names
pub async fn for_track(pool: &SqlitePool, track_id: TrackId) -> Result<Vec<Comment>> {
    let rows = sqlx::query(
        r#"
        SELECT c.id, c.track_id, c.user_id, c.content, c.created_at,
               u.display_name AS author_name
        FROM comments c
        INNER JOIN users u ON c.user_id = u.id
        WHERE c.track_id = ?
        ORDER BY c.created_at DESC
        "#,
    )
    .bind(track_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| Comment {
            id: row.get("id"),
            track_id: row.get("track_id"),
            user_id: row.get("user_id"),
            author_name: row.get("author_name"),
            content: row.get("content"),
            created_at: datetime_from_millis(row.get("created_at")),
        })
        .collect())
}

/// Delete a comment
pub async fn delete(pool: &SqlitePool, comment_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(comment_id)
        .execute(pool)
        .await?;
    Ok(())
}
