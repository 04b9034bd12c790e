/// Playlist domain type
use crate::types::{PlaylistId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-curated ordered collection of tracks
///
/// Track membership lives in the storage layer (explicit position column);
/// this type carries the playlist header only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier (assigned by storage)
    pub id: PlaylistId,

    /// Owning user
    pub owner_id: UserId,

    /// Playlist name
    pub name: String,

    /// Free-form description
    pub description: Option<String>,

    /// Whether other users can see the playlist
    pub is_public: bool,

    /// When the playlist was created
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    /// Create a new playlist header
    pub fn new(owner_id: UserId, name: impl Into<String>) -> Self {
        Self {
            id: 0,
            owner_id,
            name: name.into(),
            description: None,
            is_public: false,
            created_at: Utc::now(),
        }
    }
}
