//! Chorus Storage
//!
//! `SQLite` persistence layer for the Chorus player: tracks, users,
//! playlists, likes, follows, comments, listening history, and auth session
//! bookkeeping.
//!
//! # Architecture
//!
//! - **Vertical slicing**: each feature owns its own queries ([`tracks`],
//!   [`playlists`], [`likes`], ...)
//! - **Collaborator surface**: [`SqliteLibrary`] implements
//!   `chorus_core::MediaLibrary`, the only interface the playback core sees
//! - **Millisecond timestamps**: all times are unix epoch milliseconds
//!
//! # Example
//!
//! ```rust,no_run
//! use chorus_storage::{create_pool, run_migrations, SqliteLibrary};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://chorus.db").await?;
//! run_migrations(&pool).await?;
//!
//! let library = SqliteLibrary::new(pool);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;
mod library;

// Vertical slices
pub mod comments;
pub mod follows;
pub mod likes;
pub mod playlists;
pub mod recently_played;
pub mod sessions;
pub mod tracks;
pub mod users;

pub use error::{Result, StorageError};
pub use library::SqliteLibrary;

use chrono::{DateTime, Utc};
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

// Embed migrations into the binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup to bring the schema up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g. `sqlite://chorus.db`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))
}

/// Current time as unix epoch milliseconds
pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Decode an epoch-milliseconds column into a `DateTime<Utc>`
pub(crate) fn datetime_from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}
