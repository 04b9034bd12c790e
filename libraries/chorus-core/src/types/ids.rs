//! Identifier aliases
//!
//! All entities use stable integer identifiers assigned by the storage layer.

/// Track identifier
pub type TrackId = i64;

/// User identifier
pub type UserId = i64;

/// Playlist identifier
pub type PlaylistId = i64;
