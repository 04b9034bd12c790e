//! Playback session
//!
//! Sole owner of the audio engine handle. Translates play/pause/seek/stop
//! commands into engine calls and normalizes asynchronous engine callbacks
//! into the playback-phase state machine:
//!
//! `Idle → Loading → Ready → Playing ↔ Paused → Stopped`, with `Error`
//! reachable from anywhere on an engine failure and left only by a new play
//! command.
//!
//! Engine failures become state (`PlaybackPhase::Error` plus a message) and
//! a log line — they never cross this boundary as a panic, so a media
//! failure cannot take the host down.

use crate::engine::{EngineEvent, PlayerEngine};
use crate::error::{PlaybackError, Result};
use crate::types::{PendingSeekPolicy, PlaybackPhase};
use chorus_core::types::Track;
use tracing::{debug, trace, warn};

/// What an engine event meant for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    /// Event belonged to a superseded load and was discarded
    Stale,

    /// State was refreshed
    Updated,

    /// The current track played to its natural end
    Completed,
}

/// Engine-facing playback state machine
pub struct PlaybackSession {
    engine: Box<dyn PlayerEngine>,
    phase: PlaybackPhase,
    loaded: Option<Track>,
    position_ms: u64,
    duration_ms: u64,
    pending_seek: Option<u64>,
    seek_policy: PendingSeekPolicy,
    last_error: Option<String>,
}

impl PlaybackSession {
    /// Create a session around the engine handle
    pub fn new(engine: Box<dyn PlayerEngine>, seek_policy: PendingSeekPolicy) -> Self {
        Self {
            engine,
            phase: PlaybackPhase::Idle,
            loaded: None,
            position_ms: 0,
            duration_ms: 0,
            pending_seek: None,
            seek_policy,
            last_error: None,
        }
    }

    // ===== Commands =====

    /// Load and play a track, always restarting from zero
    ///
    /// The engine is unconditionally stopped and cleared first — even when
    /// the requested track is the one already loaded. There is no implicit
    /// resume-in-place; requesting the same track twice restarts it.
    ///
    /// A track without an audio locator is rejected before any engine call.
    pub fn play_track(&mut self, track: &Track) -> Result<()> {
        if !track.has_audio() {
            warn!(track_id = track.id, title = %track.title, "rejecting track without audio locator");
            return Err(PlaybackError::InvalidTrack);
        }

        debug!(track_id = track.id, title = %track.title, "loading track");

        self.engine.stop();
        self.engine.clear();
        self.engine.load(track.id, &track.audio_url);
        self.engine.seek_to(0);
        self.engine.play();

        self.phase = PlaybackPhase::Loading;
        self.loaded = Some(track.clone());
        self.position_ms = 0;
        self.duration_ms = track.duration_ms.unwrap_or(0);
        self.pending_seek = None;
        self.last_error = None;
        Ok(())
    }

    /// Pause when playing, otherwise play/resume
    pub fn toggle_play_pause(&mut self) {
        match self.phase {
            PlaybackPhase::Playing => self.engine.pause(),
            PlaybackPhase::Paused | PlaybackPhase::Ready | PlaybackPhase::Stopped
                if self.loaded.is_some() =>
            {
                self.engine.play();
            }
            // Loading already carries intent-to-play; Idle has nothing to
            // resume; Error only recovers through a new play command.
            _ => {}
        }
    }

    /// Stop rendering, keeping the loaded track
    pub fn stop(&mut self) {
        if self.loaded.is_some() {
            self.engine.stop();
            self.phase = PlaybackPhase::Stopped;
            self.position_ms = 0;
        }
    }

    /// Stop and drop any loaded media
    pub fn clear(&mut self) {
        self.engine.stop();
        self.engine.clear();
        self.phase = PlaybackPhase::Idle;
        self.loaded = None;
        self.position_ms = 0;
        self.duration_ms = 0;
        self.pending_seek = None;
        self.last_error = None;
    }

    /// Seek to a position
    ///
    /// Clamps into `[0, duration]` when the duration is known. While the
    /// duration is still unresolved the configured [`PendingSeekPolicy`]
    /// applies: `Deferred` issues the seek optimistically and re-validates it
    /// once the engine reports the duration; `Dropped` ignores the request.
    pub fn seek_to(&mut self, position_ms: u64) {
        if self.loaded.is_none() {
            return;
        }

        if self.duration_ms > 0 {
            let clamped = position_ms.min(self.duration_ms);
            self.engine.seek_to(clamped);
            self.position_ms = clamped;
        } else {
            match self.seek_policy {
                PendingSeekPolicy::Deferred => {
                    trace!(position_ms, "duration unknown, deferring seek validation");
                    self.engine.seek_to(position_ms);
                    self.pending_seek = Some(position_ms);
                }
                PendingSeekPolicy::Dropped => {
                    trace!(position_ms, "duration unknown, dropping seek");
                }
            }
        }
    }

    // ===== Engine callbacks =====

    /// Apply an engine event
    ///
    /// Events are matched against the currently loaded track; anything from
    /// a superseded load is discarded.
    pub fn handle_event(&mut self, event: &EngineEvent) -> SessionSignal {
        let Some(loaded_id) = self.loaded.as_ref().map(|t| t.id) else {
            trace!(?event, "discarding engine event with nothing loaded");
            return SessionSignal::Stale;
        };
        if event.track_id() != loaded_id {
            trace!(
                ?event,
                loaded_id,
                "discarding engine event for superseded load"
            );
            return SessionSignal::Stale;
        }

        match event {
            EngineEvent::Prepared { duration_ms, .. } => {
                self.duration_ms = *duration_ms;
                if self.phase == PlaybackPhase::Loading {
                    self.phase = PlaybackPhase::Ready;
                }
                if let Some(target) = self.pending_seek.take() {
                    let clamped = target.min(self.duration_ms);
                    if clamped != target {
                        self.engine.seek_to(clamped);
                    }
                    self.position_ms = clamped;
                }
                SessionSignal::Updated
            }
            EngineEvent::Playing { .. } => {
                self.phase = PlaybackPhase::Playing;
                SessionSignal::Updated
            }
            EngineEvent::Paused { .. } => {
                self.phase = PlaybackPhase::Paused;
                SessionSignal::Updated
            }
            EngineEvent::Progress {
                position_ms,
                duration_ms,
                ..
            } => {
                self.position_ms = *position_ms;
                if *duration_ms > 0 {
                    self.duration_ms = *duration_ms;
                }
                SessionSignal::Updated
            }
            EngineEvent::Completed { .. } => {
                self.position_ms = self.duration_ms;
                self.phase = PlaybackPhase::Stopped;
                SessionSignal::Completed
            }
            EngineEvent::Failed { message, .. } => {
                warn!(track_id = loaded_id, %message, "engine failure");
                self.phase = PlaybackPhase::Error;
                self.last_error = Some(message.clone());
                SessionSignal::Updated
            }
        }
    }

    // ===== Getters =====

    /// Current phase
    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    /// Track currently loaded
    pub fn loaded_track(&self) -> Option<&Track> {
        self.loaded.as_ref()
    }

    /// Current position in milliseconds
    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    /// Duration in milliseconds (0 while unknown)
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Message from the most recent engine failure
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_core::types::TrackId;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Command {
        Load(TrackId, String),
        Play,
        Pause,
        Stop,
        Clear,
        Seek(u64),
    }

    #[derive(Default)]
    struct RecordingEngine {
        commands: Arc<Mutex<Vec<Command>>>,
    }

    impl RecordingEngine {
        fn new() -> (Self, Arc<Mutex<Vec<Command>>>) {
            let commands = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    commands: Arc::clone(&commands),
                },
                commands,
            )
        }
    }

    impl PlayerEngine for RecordingEngine {
        fn load(&mut self, track_id: TrackId, url: &str) {
            self.commands
                .lock()
                .unwrap()
                .push(Command::Load(track_id, url.to_string()));
        }

        fn play(&mut self) {
            self.commands.lock().unwrap().push(Command::Play);
        }

        fn pause(&mut self) {
            self.commands.lock().unwrap().push(Command::Pause);
        }

        fn stop(&mut self) {
            self.commands.lock().unwrap().push(Command::Stop);
        }

        fn clear(&mut self) {
            self.commands.lock().unwrap().push(Command::Clear);
        }

        fn seek_to(&mut self, position_ms: u64) {
            self.commands.lock().unwrap().push(Command::Seek(position_ms));
        }
    }

    fn create_track(id: TrackId) -> Track {
        let mut track = Track::new(1, format!("Track {id}"), format!("https://cdn.example/{id}.mp3"));
        track.id = id;
        track
    }

    fn session_with_policy(policy: PendingSeekPolicy) -> (PlaybackSession, Arc<Mutex<Vec<Command>>>) {
        let (engine, commands) = RecordingEngine::new();
        (PlaybackSession::new(Box::new(engine), policy), commands)
    }

    fn session() -> (PlaybackSession, Arc<Mutex<Vec<Command>>>) {
        session_with_policy(PendingSeekPolicy::Deferred)
    }

    #[test]
    fn invalid_track_never_reaches_the_engine() {
        let (mut session, commands) = session();
        let mut track = create_track(1);
        track.audio_url = "  ".to_string();

        let result = session.play_track(&track);
        assert!(matches!(result, Err(PlaybackError::InvalidTrack)));
        assert!(commands.lock().unwrap().is_empty());
        assert_eq!(session.phase(), PlaybackPhase::Idle);
    }

    #[test]
    fn play_track_issues_restart_sequence() {
        let (mut session, commands) = session();
        let track = create_track(1);

        session.play_track(&track).unwrap();
        assert_eq!(
            *commands.lock().unwrap(),
            vec![
                Command::Stop,
                Command::Clear,
                Command::Load(1, "https://cdn.example/1.mp3".to_string()),
                Command::Seek(0),
                Command::Play,
            ]
        );
        assert_eq!(session.phase(), PlaybackPhase::Loading);
    }

    #[test]
    fn replaying_the_same_track_restarts_from_zero() {
        let (mut session, commands) = session();
        let track = create_track(1);

        session.play_track(&track).unwrap();
        session.handle_event(&EngineEvent::Prepared {
            track_id: 1,
            duration_ms: 60_000,
        });
        session.handle_event(&EngineEvent::Playing { track_id: 1 });
        session.handle_event(&EngineEvent::Progress {
            track_id: 1,
            position_ms: 30_000,
            duration_ms: 60_000,
        });
        commands.lock().unwrap().clear();

        // Same track again: full stop → clear → load → seek(0) → play
        session.play_track(&track).unwrap();
        assert_eq!(
            *commands.lock().unwrap(),
            vec![
                Command::Stop,
                Command::Clear,
                Command::Load(1, "https://cdn.example/1.mp3".to_string()),
                Command::Seek(0),
                Command::Play,
            ]
        );
        assert_eq!(session.position_ms(), 0);
        assert_eq!(session.phase(), PlaybackPhase::Loading);
    }

    #[test]
    fn phase_machine_follows_engine_events() {
        let (mut session, _commands) = session();
        session.play_track(&create_track(1)).unwrap();

        session.handle_event(&EngineEvent::Prepared {
            track_id: 1,
            duration_ms: 90_000,
        });
        assert_eq!(session.phase(), PlaybackPhase::Ready);
        assert_eq!(session.duration_ms(), 90_000);

        session.handle_event(&EngineEvent::Playing { track_id: 1 });
        assert_eq!(session.phase(), PlaybackPhase::Playing);

        session.handle_event(&EngineEvent::Paused { track_id: 1 });
        assert_eq!(session.phase(), PlaybackPhase::Paused);

        let signal = session.handle_event(&EngineEvent::Completed { track_id: 1 });
        assert_eq!(signal, SessionSignal::Completed);
        assert_eq!(session.phase(), PlaybackPhase::Stopped);
        assert_eq!(session.position_ms(), 90_000);
    }

    #[test]
    fn stale_callbacks_are_discarded() {
        let (mut session, _commands) = session();
        session.play_track(&create_track(1)).unwrap();
        session.play_track(&create_track(2)).unwrap();

        // Late callbacks from the superseded load of track 1
        let signal = session.handle_event(&EngineEvent::Prepared {
            track_id: 1,
            duration_ms: 90_000,
        });
        assert_eq!(signal, SessionSignal::Stale);
        assert_eq!(session.duration_ms(), 0);
        assert_eq!(session.phase(), PlaybackPhase::Loading);

        let signal = session.handle_event(&EngineEvent::Failed {
            track_id: 1,
            message: "decoder blew up".to_string(),
        });
        assert_eq!(signal, SessionSignal::Stale);
        assert_ne!(session.phase(), PlaybackPhase::Error);

        // Track 2's callbacks land normally
        let signal = session.handle_event(&EngineEvent::Playing { track_id: 2 });
        assert_eq!(signal, SessionSignal::Updated);
        assert_eq!(session.phase(), PlaybackPhase::Playing);
    }

    #[test]
    fn engine_failure_becomes_error_state_not_panic() {
        let (mut session, _commands) = session();
        session.play_track(&create_track(1)).unwrap();

        session.handle_event(&EngineEvent::Failed {
            track_id: 1,
            message: "network stream dropped".to_string(),
        });
        assert_eq!(session.phase(), PlaybackPhase::Error);
        assert_eq!(session.last_error(), Some("network stream dropped"));

        // Toggling play/pause does not leave Error
        session.toggle_play_pause();
        assert_eq!(session.phase(), PlaybackPhase::Error);

        // A new play command does
        session.play_track(&create_track(2)).unwrap();
        assert_eq!(session.phase(), PlaybackPhase::Loading);
        assert_eq!(session.last_error(), None);
    }

    #[test]
    fn seek_clamps_when_duration_is_known() {
        let (mut session, commands) = session();
        session.play_track(&create_track(1)).unwrap();
        session.handle_event(&EngineEvent::Prepared {
            track_id: 1,
            duration_ms: 60_000,
        });
        commands.lock().unwrap().clear();

        session.seek_to(90_000);
        assert_eq!(*commands.lock().unwrap(), vec![Command::Seek(60_000)]);
        assert_eq!(session.position_ms(), 60_000);
    }

    #[test]
    fn deferred_seek_revalidates_on_prepared() {
        let (mut session, commands) = session();
        let mut track = create_track(1);
        track.duration_ms = None;
        session.play_track(&track).unwrap();
        commands.lock().unwrap().clear();

        // Duration unknown: optimistic issue, remembered for validation
        session.seek_to(90_000);
        assert_eq!(*commands.lock().unwrap(), vec![Command::Seek(90_000)]);

        // Duration resolves smaller: the seek is re-issued clamped
        session.handle_event(&EngineEvent::Prepared {
            track_id: 1,
            duration_ms: 60_000,
        });
        assert_eq!(
            *commands.lock().unwrap(),
            vec![Command::Seek(90_000), Command::Seek(60_000)]
        );
        assert_eq!(session.position_ms(), 60_000);
    }

    #[test]
    fn deferred_seek_within_duration_is_not_reissued() {
        let (mut session, commands) = session();
        let mut track = create_track(1);
        track.duration_ms = None;
        session.play_track(&track).unwrap();
        commands.lock().unwrap().clear();

        session.seek_to(30_000);
        session.handle_event(&EngineEvent::Prepared {
            track_id: 1,
            duration_ms: 60_000,
        });
        assert_eq!(*commands.lock().unwrap(), vec![Command::Seek(30_000)]);
        assert_eq!(session.position_ms(), 30_000);
    }

    #[test]
    fn dropped_policy_ignores_seek_while_loading() {
        let (mut session, commands) = session_with_policy(PendingSeekPolicy::Dropped);
        let mut track = create_track(1);
        track.duration_ms = None;
        session.play_track(&track).unwrap();
        commands.lock().unwrap().clear();

        session.seek_to(90_000);
        assert!(commands.lock().unwrap().is_empty());
        assert_eq!(session.position_ms(), 0);

        // Position state stays consistent once the duration arrives
        session.handle_event(&EngineEvent::Prepared {
            track_id: 1,
            duration_ms: 60_000,
        });
        assert_eq!(session.position_ms(), 0);
    }

    #[test]
    fn toggle_play_pause_routes_by_phase() {
        let (mut session, commands) = session();
        session.play_track(&create_track(1)).unwrap();
        session.handle_event(&EngineEvent::Prepared {
            track_id: 1,
            duration_ms: 60_000,
        });
        session.handle_event(&EngineEvent::Playing { track_id: 1 });
        commands.lock().unwrap().clear();

        session.toggle_play_pause();
        assert_eq!(*commands.lock().unwrap(), vec![Command::Pause]);
        session.handle_event(&EngineEvent::Paused { track_id: 1 });
        commands.lock().unwrap().clear();

        session.toggle_play_pause();
        assert_eq!(*commands.lock().unwrap(), vec![Command::Play]);
    }

    #[test]
    fn seek_with_nothing_loaded_is_a_noop() {
        let (mut session, commands) = session();
        session.seek_to(5_000);
        assert!(commands.lock().unwrap().is_empty());
    }
}
