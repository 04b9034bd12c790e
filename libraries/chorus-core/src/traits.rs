/// Collaborator traits for Chorus
use crate::error::Result;
use crate::types::{PlaylistId, Track, TrackId, User, UserId};
use async_trait::async_trait;

/// Media library trait
///
/// The read surface the playback core consumes from durable storage, plus
/// the single write it emits ("track considered recently played"). The
/// playback crates depend only on this trait; `chorus-storage` provides the
/// `SQLite` implementation.
///
/// Implementations must be cheap to share (`Arc<dyn MediaLibrary>`): the
/// session coordinator clones the handle into short-lived background tasks.
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    /// Look up a single track by id
    async fn track_by_id(&self, id: TrackId) -> Result<Option<Track>>;

    /// Look up several tracks, preserving the order of `ids`
    ///
    /// Unknown ids are skipped, not errors.
    async fn tracks_by_ids(&self, ids: &[TrackId]) -> Result<Vec<Track>>;

    /// All tracks in a playlist, ordered by playlist position
    async fn playlist_tracks(&self, playlist_id: PlaylistId) -> Result<Vec<Track>>;

    /// An uploader's public tracks, newest first
    async fn public_tracks_by_uploader(&self, uploader_id: UserId) -> Result<Vec<Track>>;

    /// Tracks a user has liked, most recently liked first
    async fn liked_tracks(&self, user_id: UserId) -> Result<Vec<Track>>;

    /// Public tracks matching a search query, newest first
    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>>;

    /// Look up a user profile by id
    async fn user_by_id(&self, id: UserId) -> Result<Option<User>>;

    /// Record that a user played a track
    ///
    /// Storage trims the per-user history to its retention cap.
    async fn record_recently_played(&self, user_id: UserId, track_id: TrackId) -> Result<()>;
}
