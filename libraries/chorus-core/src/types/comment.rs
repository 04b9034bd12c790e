/// Comment domain type
use crate::types::{TrackId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment left on a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier (assigned by storage)
    pub id: i64,

    /// Track the comment belongs to
    pub track_id: TrackId,

    /// Author of the comment
    pub user_id: UserId,

    /// Author display name (populated via join)
    pub author_name: Option<String>,

    /// Comment text
    pub content: String,

    /// When the comment was posted
    pub created_at: DateTime<Utc>,
}
