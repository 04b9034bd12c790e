//! Domain types shared across the Chorus workspace

mod comment;
mod ids;
mod playlist;
mod track;
mod user;

pub use comment::Comment;
pub use ids::{PlaylistId, TrackId, UserId};
pub use playlist::Playlist;
pub use track::Track;
pub use user::User;
