//! Track queries

use crate::error::Result;
use crate::{datetime_from_millis, now_millis};
use chorus_core::types::{Track, TrackId, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;

/// Shared select list: track columns plus the uploader display name
pub(crate) const TRACK_COLUMNS: &str = "\
    t.id, t.uploader_id, t.title, t.description, t.audio_url, t.cover_art_url, \
    t.genre, t.duration_ms, t.is_public, t.created_at, \
    u.display_name AS uploader_name";

/// Map a joined track row into the domain type
pub(crate) fn from_row(row: &SqliteRow) -> Track {
    Track {
        id: row.get("id"),
        uploader_id: row.get("uploader_id"),
        uploader_name: row.get("uploader_name"),
        title: row.get("title"),
        description: row.get("description"),
        audio_url: row.get("audio_url"),
        cover_art_url: row.get("cover_art_url"),
        genre: row.get("genre"),
        duration_ms: row.get::<Option<i64>, _>("duration_ms").map(|v| v as u64),
        is_public: row.get::<i64, _>("is_public") != 0,
        created_at: datetime_from_millis(row.get("created_at")),
    }
}

/// Insert a track, returning it with its assigned id
pub async fn create(pool: &SqlitePool, track: &Track) -> Result<Track> {
    let created_at = now_millis();
    let result = sqlx::query(
        r#"
        INSERT INTO tracks (uploader_id, title, description, audio_url, cover_art_url,
                            genre, duration_ms, is_public, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(track.uploader_id)
    .bind(&track.title)
    .bind(&track.description)
    .bind(&track.audio_url)
    .bind(&track.cover_art_url)
    .bind(&track.genre)
    .bind(track.duration_ms.map(|v| v as i64))
    .bind(i64::from(track.is_public))
    .bind(created_at)
    .execute(pool)
    .await?;

    let mut created = track.clone();
    created.id = result.last_insert_rowid();
    created.created_at = datetime_from_millis(created_at);
    Ok(created)
}

/// Get a track by id
pub async fn get_by_id(pool: &SqlitePool, id: TrackId) -> Result<Option<Track>> {
    let sql = format!(
        "SELECT {TRACK_COLUMNS} FROM tracks t INNER JOIN users u ON t.uploader_id = u.id \
         WHERE t.id = ?"
    );
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;
    Ok(row.as_ref().map(from_row))
}

/// Get several tracks, preserving the order of `ids`
///
/// Unknown ids are skipped.
pub async fn get_by_ids(pool: &SqlitePool, ids: &[TrackId]) -> Result<Vec<Track>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "SELECT {TRACK_COLUMNS} FROM tracks t INNER JOIN users u ON t.uploader_id = u.id \
         WHERE t.id IN ({placeholders})"
    );
    let mut query = sqlx::query(&sql);
    for id in ids {
        query = query.bind(*id);
    }
    let rows = query.fetch_all(pool).await?;

    let by_id: HashMap<TrackId, Track> = rows
        .iter()
        .map(from_row)
        .map(|track| (track.id, track))
        .collect();
    Ok(ids.iter().filter_map(|id| by_id.get(id).cloned()).collect())
}

/// An uploader's public tracks, newest first
pub async fn public_by_uploader(pool: &SqlitePool, uploader_id: UserId) -> Result<Vec<Track>> {
    let sql = format!(
        "SELECT {TRACK_COLUMNS} FROM tracks t INNER JOIN users u ON t.uploader_id = u.id \
         WHERE t.uploader_id = ? AND t.is_public = 1 ORDER BY t.created_at DESC"
    );
    let rows = sqlx::query(&sql).bind(uploader_id).fetch_all(pool).await?;
    Ok(rows.iter().map(from_row).collect())
}

/// Public tracks matching a query in title or genre, newest first
pub async fn search(pool: &SqlitePool, query: &str) -> Result<Vec<Track>> {
    let pattern = format!("%{query}%");
    let sql = format!(
        "SELECT {TRACK_COLUMNS} FROM tracks t INNER JOIN users u ON t.uploader_id = u.id \
         WHERE t.is_public = 1 AND (t.title LIKE ? OR t.genre LIKE ?) \
         ORDER BY t.created_at DESC"
    );
    let rows = sqlx::query(&sql)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(from_row).collect())
}

/// The newest public tracks (home feed)
pub async fn recent_public(pool: &SqlitePool, limit: i64) -> Result<Vec<Track>> {
    let sql = format!(
        "SELECT {TRACK_COLUMNS} FROM tracks t INNER JOIN users u ON t.uploader_id = u.id \
         WHERE t.is_public = 1 ORDER BY t.created_at DESC LIMIT ?"
    );
    let rows = sqlx::query(&sql).bind(limit).fetch_all(pool).await?;
    Ok(rows.iter().map(from_row).collect())
}

/// Delete a track
pub async fn delete(pool: &SqlitePool, id: TrackId) -> Result<()> {
    sqlx::query("DELETE FROM tracks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
