//! `MediaLibrary` implementation over `SQLite`
//!
//! The playback core sees durable storage only through
//! `chorus_core::MediaLibrary`; this adapter routes each call to the
//! owning vertical slice.

use crate::{likes, playlists, recently_played, tracks, users};
use async_trait::async_trait;
use chorus_core::error::Result;
use chorus_core::types::{PlaylistId, Track, TrackId, User, UserId};
use chorus_core::MediaLibrary;
use sqlx::SqlitePool;

/// `SQLite`-backed media library
#[derive(Clone)]
pub struct SqliteLibrary {
    pool: SqlitePool,
}

impl SqliteLibrary {
    /// Wrap an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for callers that need slice functions directly
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl MediaLibrary for SqliteLibrary {
    async fn track_by_id(&self, id: TrackId) -> Result<Option<Track>> {
        Ok(tracks::get_by_id(&self.pool, id).await?)
    }

    async fn tracks_by_ids(&self, ids: &[TrackId]) -> Result<Vec<Track>> {
        Ok(tracks::get_by_ids(&self.pool, ids).await?)
    }

    async fn playlist_tracks(&self, playlist_id: PlaylistId) -> Result<Vec<Track>> {
        Ok(playlists::tracks_in(&self.pool, playlist_id).await?)
    }

    async fn public_tracks_by_uploader(&self, uploader_id: UserId) -> Result<Vec<Track>> {
        Ok(tracks::public_by_uploader(&self.pool, uploader_id).await?)
    }

    async fn liked_tracks(&self, user_id: UserId) -> Result<Vec<Track>> {
        Ok(likes::liked_tracks(&self.pool, user_id).await?)
    }

    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>> {
        Ok(tracks::search(&self.pool, query).await?)
    }

    async fn user_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(users::get_by_id(&self.pool, id).await?)
    }

    async fn record_recently_played(&self, user_id: UserId, track_id: TrackId) -> Result<()> {
        Ok(recently_played::record(&self.pool, user_id, track_id).await?)
    }
}
