//! Per-user listening history
//!
//! Append-only rows keyed by (user, track, timestamp), trimmed on every
//! write so the table never bloats past the retention cap.

use crate::error::Result;
use crate::now_millis;
use crate::tracks::{from_row as track_from_row, TRACK_COLUMNS};
use chorus_core::types::{Track, TrackId, UserId};
use sqlx::{Row, SqlitePool};
use tracing::trace;

/// Rows kept per user
pub const RETENTION_PER_USER: i64 = 20;

/// Rows the home screen asks for
pub const HOME_SCREEN_LIMIT: i64 = 6;

/// Record a play and trim the user's history to the retention cap
pub async fn record(pool: &SqlitePool, user_id: UserId, track_id: TrackId) -> Result<()> {
    sqlx::query("INSERT INTO recently_played (user_id, track_id, played_at) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(track_id)
        .bind(now_millis())
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        DELETE FROM recently_played
        WHERE user_id = ? AND id NOT IN (
            SELECT id FROM recently_played
            WHERE user_id = ?
            ORDER BY played_at DESC, id DESC
            LIMIT ?
        )
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .bind(RETENTION_PER_USER)
    .execute(pool)
    .await?;

    trace!(user_id, track_id, "recorded play");
    Ok(())
}

/// A user's most recently played tracks, newest first, deduplicated
pub async fn recent_tracks(pool: &SqlitePool, user_id: UserId, limit: i64) -> Result<Vec<Track>> {
    let sql = format!(
        "SELECT {TRACK_COLUMNS}, MAX(rp.played_at) AS last_played \
         FROM recently_played rp \
         INNER JOIN tracks t ON rp.track_id = t.id \
         INNER JOIN users u ON t.uploader_id = u.id \
         WHERE rp.user_id = ? \
         GROUP BY t.id \
         ORDER BY last_played DESC \
         LIMIT ?"
    );
    let rows = sqlx::query(&sql)
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(track_from_row).collect())
}

/// Number of history rows a user currently has
pub async fn count_for_user(pool: &SqlitePool, user_id: UserId) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM recently_played WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(row.get("n"))
}
