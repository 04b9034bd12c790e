//! Error types for playback coordination

use thiserror::Error;

/// Playback errors
///
/// Navigation misses (index/id not in the queue) are `None` returns, not
/// errors. Nothing in this crate panics across a component boundary.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Track has no audio locator; rejected before any engine call
    #[error("Track has no audio locator")]
    InvalidTrack,

    /// The rendering engine reported a failure
    #[error("Engine failure: {0}")]
    EngineFailure(String),

    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    OutOfRange(usize),

    /// The coordinator task is no longer running
    #[error("Player is shut down")]
    ChannelClosed,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
