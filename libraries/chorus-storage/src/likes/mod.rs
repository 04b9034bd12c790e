//! Track likes

use crate::error::Result;
use crate::now_millis;
use crate::tracks::{from_row as track_from_row, TRACK_COLUMNS};
use chorus_core::types::{Track, TrackId, UserId};
use sqlx::{Row, SqlitePool};

/// Flip a user's like on a track; returns the new state (true = now liked)
pub async fn toggle(pool: &SqlitePool, track_id: TrackId, user_id: UserId) -> Result<bool> {
    if is_liked(pool, track_id, user_id).await? {
        sqlx::query("DELETE FROM track_likes WHERE track_id = ? AND user_id = ?")
            .bind(track_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(false)
    } else {
        sqlx::query("INSERT INTO track_likes (track_id, user_id, created_at) VALUES (?, ?, ?)")
            .bind(track_id)
            .bind(user_id)
            .bind(now_millis())
            .execute(pool)
            .await?;
        Ok(true)
    }
}

/// Whether a user has liked a track
pub async fn is_liked(pool: &SqlitePool, track_id: TrackId, user_id: UserId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM track_likes WHERE track_id = ? AND user_id = ?")
        .bind(track_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// Number of likes on a track
pub async fn count_for_track(pool: &SqlitePool, track_id: TrackId) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM track_likes WHERE track_id = ?")
        .bind(track_id)
        .fetch_one(pool)
        .await?;
    Ok(row.get("n"))
}

/// Tracks a user has liked, most recently liked first
pub async fn liked_tracks(pool: &SqlitePool, user_id: UserId) -> Result<Vec<Track>> {
    let sql = format!(
        "SELECT {TRACK_COLUMNS} FROM track_likes tl \
         INNER JOIN tracks t ON tl.track_id = t.id \
         INNER JOIN users u ON t.uploader_id = u.id \
         WHERE tl.user_id = ? ORDER BY tl.created_at DESC"
    );
    let rows = sqlx::query(&sql).bind(user_id).fetch_all(pool).await?;
    Ok(rows.iter().map(track_from_row).collect())
}
