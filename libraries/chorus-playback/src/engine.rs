//! Audio engine collaborator interface
//!
//! The rendering engine is an external collaborator. Commands are
//! fire-and-forget and must never block; outcomes come back asynchronously
//! as [`EngineEvent`]s on the channel handed to the engine at construction.
//! Every event names the track it belongs to so a superseded load can be
//! recognized and discarded.

use chorus_core::types::TrackId;

/// Handle to the audio rendering engine
///
/// Only the playback session may hold this handle. Implementations marshal
/// their internal worker threads however they like; events must be delivered
/// through the `EngineEvent` sender, never by touching shared state.
pub trait PlayerEngine: Send + Sync {
    /// Begin preparing a media locator
    ///
    /// Implementations answer with [`EngineEvent::Prepared`] once the media
    /// is ready (resolving the duration), or [`EngineEvent::Failed`].
    fn load(&mut self, track_id: TrackId, url: &str);

    /// Start or resume rendering
    fn play(&mut self);

    /// Pause rendering, keeping the position
    fn pause(&mut self);

    /// Stop rendering
    fn stop(&mut self);

    /// Drop any loaded media
    fn clear(&mut self);

    /// Move the playback position
    fn seek_to(&mut self, position_ms: u64);
}

/// Asynchronous reports from the engine
///
/// Delivered on the engine's worker context and marshaled into the session
/// coordinator's command queue before touching any shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Media is prepared; the duration is now known
    Prepared {
        /// Track the prepared media belongs to
        track_id: TrackId,
        /// Resolved duration in milliseconds
        duration_ms: u64,
    },

    /// Rendering started or resumed
    Playing {
        /// Track being rendered
        track_id: TrackId,
    },

    /// Rendering paused
    Paused {
        /// Track being rendered
        track_id: TrackId,
    },

    /// Periodic position report while rendering
    Progress {
        /// Track being rendered
        track_id: TrackId,
        /// Current position in milliseconds
        position_ms: u64,
        /// Duration in milliseconds (0 while unknown)
        duration_ms: u64,
    },

    /// The track played to its natural end
    Completed {
        /// Track that finished
        track_id: TrackId,
    },

    /// The engine failed during load or playback
    Failed {
        /// Track the failure belongs to
        track_id: TrackId,
        /// Human-readable failure description
        message: String,
    },
}

impl EngineEvent {
    /// The track this event belongs to
    pub fn track_id(&self) -> TrackId {
        match self {
            EngineEvent::Prepared { track_id, .. }
            | EngineEvent::Playing { track_id }
            | EngineEvent::Paused { track_id }
            | EngineEvent::Progress { track_id, .. }
            | EngineEvent::Completed { track_id }
            | EngineEvent::Failed { track_id, .. } => *track_id,
        }
    }
}
