//! Playlist queries
//!
//! Membership keeps an explicit position column so playlist order is stable
//! and editable.

use crate::error::Result;
use crate::tracks::{from_row as track_from_row, TRACK_COLUMNS};
use crate::{datetime_from_millis, now_millis};
use chorus_core::types::{Playlist, PlaylistId, Track, TrackId, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn from_row(row: &SqliteRow) -> Playlist {
    Playlist {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        name: row.get("name"),
        description: row.get("description"),
        is_public: row.get::<i64, _>("is_public") != 0,
        created_at: datetime_from_millis(row.get("created_at")),
    }
}

/// Create a playlist, returning it with its assigned id
pub async fn create(pool: &SqlitePool, playlist: &Playlist) -> Result<Playlist> {
    let created_at = now_millis();
    let result = sqlx::query(
        "INSERT INTO playlists (owner_id, name, description, is_public, created_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(playlist.owner_id)
    .bind(&playlist.name)
    .bind(&playlist.description)
    .bind(i64::from(playlist.is_public))
    .bind(created_at)
    .execute(pool)
    .await?;

    let mut created = playlist.clone();
    created.id = result.last_insert_rowid();
    created.created_at = datetime_from_millis(created_at);
    Ok(created)
}

/// Get a playlist header by id
pub async fn get_by_id(pool: &SqlitePool, id: PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query(
        "SELECT id, owner_id, name, description, is_public, created_at \
         FROM playlists WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.as_ref().map(from_row))
}

/// Playlists owned by a user, newest first
pub async fn by_owner(pool: &SqlitePool, owner_id: UserId) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        "SELECT id, owner_id, name, description, is_public, created_at \
         FROM playlists WHERE owner_id = ? ORDER BY created_at DESC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(from_row).collect())
}

/// Append a track to the end of a playlist
///
/// Re-adding a member is a no-op.
pub async fn add_track(pool: &SqlitePool, playlist_id: PlaylistId, track_id: TrackId) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO playlist_tracks (playlist_id, track_id, position, added_at)
        VALUES (
            ?, ?,
            COALESCE((SELECT MAX(position) + 1 FROM playlist_tracks WHERE playlist_id = ?), 0),
            ?
        )
        "#,
    )
    .bind(playlist_id)
    .bind(track_id)
    .bind(playlist_id)
    .bind(now_millis())
    .execute(pool)
    .await?;
    Ok(())
}

/// Remove a track from a playlist
pub async fn remove_track(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    track_id: TrackId,
) -> Result<()> {
    sqlx::query("DELETE FROM playlist_tracks WHERE playlist_id = ? AND track_id = ?")
        .bind(playlist_id)
        .bind(track_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// All tracks in a playlist, ordered by position
pub async fn tracks_in(pool: &SqlitePool, playlist_id: PlaylistId) -> Result<Vec<Track>> {
    let sql = format!(
        "SELECT {TRACK_COLUMNS} FROM playlist_tracks pt \
         INNER JOIN tracks t ON pt.track_id = t.id \
         INNER JOIN users u ON t.uploader_id = u.id \
         WHERE pt.playlist_id = ? ORDER BY pt.position"
    );
    let rows = sqlx::query(&sql).bind(playlist_id).fetch_all(pool).await?;
    Ok(rows.iter().map(track_from_row).collect())
}

/// Delete a playlist (membership cascades)
pub async fn delete(pool: &SqlitePool, id: PlaylistId) -> Result<()> {
    sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
