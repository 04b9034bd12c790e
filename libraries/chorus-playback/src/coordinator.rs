//! Session coordinator
//!
//! The single process-wide broker between UI and the queue/session pair.
//! One actor task owns the [`PlayQueue`], the [`PlaybackSession`], and every
//! published stream; commands and engine callbacks share one mpsc queue, so
//! state transitions apply strictly in arrival order and there is exactly
//! one writer of the snapshot.
//!
//! UI code holds a cloneable [`PlayerHandle`], injected explicitly at
//! startup — no ambient globals. Observers are read-only `watch` receivers:
//! late subscribers immediately see the current value.

use crate::engine::{EngineEvent, PlayerEngine};
use crate::error::{PlaybackError, Result};
use crate::navigation::{ContextKind, NavigationContext};
use crate::notify::{NowPlayingContent, NowPlayingNotifier};
use crate::queue::PlayQueue;
use crate::session::{PlaybackSession, SessionSignal};
use crate::snapshot::{PlaybackSnapshot, QueueInfo};
use crate::types::{PlaybackConfig, PlaybackPhase};
use chorus_core::types::{Track, TrackId, User, UserId};
use chorus_core::MediaLibrary;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

/// Everything the coordinator can be asked to do
///
/// Engine callbacks ride the same queue as UI commands; that shared queue is
/// what marshals engine worker threads onto the coordinator context.
#[derive(Debug)]
enum PlayerCommand {
    PlayWithContext {
        track: Track,
        uploader: Option<User>,
        context: NavigationContext,
    },
    PlayFromView {
        tracks: Vec<Track>,
        title: String,
        position: usize,
    },
    Next,
    Previous,
    JumpToIndex(usize),
    TogglePlayPause,
    SeekTo(u64),
    Stop,
    Clear,
    ToggleShuffle,
    CycleRepeat,
    AddToQueue(Track),
    RemoveItem(usize),
    MoveItem { from: usize, to: usize },
    SetActiveUser(Option<UserId>),
    Engine(EngineEvent),
}

/// Cloneable handle UI code uses to reach the coordinator
///
/// Every mutation routes through here; the observable streams are the only
/// way state comes back out.
#[derive(Clone)]
pub struct PlayerHandle {
    commands: mpsc::UnboundedSender<PlayerCommand>,
    snapshot_rx: watch::Receiver<PlaybackSnapshot>,
    queue_info_rx: watch::Receiver<QueueInfo>,
    visible_rx: watch::Receiver<bool>,
}

impl PlayerHandle {
    fn send(&self, command: PlayerCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| PlaybackError::ChannelClosed)
    }

    /// Play a track out of a browsing context
    ///
    /// The candidate list resolves from the context (playlist contents,
    /// uploader discography, or the id list itself), the queue is rebuilt,
    /// and playback starts at the requested track.
    pub fn play_with_context(
        &self,
        track: Track,
        uploader: Option<User>,
        context: NavigationContext,
    ) -> Result<()> {
        self.send(PlayerCommand::PlayWithContext {
            track,
            uploader,
            context,
        })
    }

    /// Play position `position` of a plain track list (simple list screens)
    pub fn play_from_view(
        &self,
        tracks: Vec<Track>,
        title: impl Into<String>,
        position: usize,
    ) -> Result<()> {
        self.send(PlayerCommand::PlayFromView {
            tracks,
            title: title.into(),
            position,
        })
    }

    /// Advance to the next track under the repeat policy
    pub fn next(&self) -> Result<()> {
        self.send(PlayerCommand::Next)
    }

    /// Retreat to the previous track under the repeat policy
    pub fn previous(&self) -> Result<()> {
        self.send(PlayerCommand::Previous)
    }

    /// Jump to a queue position and play it
    pub fn jump_to_index(&self, index: usize) -> Result<()> {
        self.send(PlayerCommand::JumpToIndex(index))
    }

    /// Pause when playing, else play/resume
    pub fn toggle_play_pause(&self) -> Result<()> {
        self.send(PlayerCommand::TogglePlayPause)
    }

    /// Seek within the current track
    pub fn seek_to(&self, position_ms: u64) -> Result<()> {
        self.send(PlayerCommand::SeekTo(position_ms))
    }

    /// Stop playback, keeping the queue position
    pub fn stop(&self) -> Result<()> {
        self.send(PlayerCommand::Stop)
    }

    /// Stop playback and clear the queue
    pub fn clear(&self) -> Result<()> {
        self.send(PlayerCommand::Clear)
    }

    /// Flip shuffle
    pub fn toggle_shuffle(&self) -> Result<()> {
        self.send(PlayerCommand::ToggleShuffle)
    }

    /// Cycle the repeat mode: Off → All → One → Off
    pub fn cycle_repeat_mode(&self) -> Result<()> {
        self.send(PlayerCommand::CycleRepeat)
    }

    /// Append a track to the queue without interrupting playback
    pub fn add_to_queue(&self, track: Track) -> Result<()> {
        self.send(PlayerCommand::AddToQueue(track))
    }

    /// Remove a queued track by canonical position
    pub fn remove_item(&self, index: usize) -> Result<()> {
        self.send(PlayerCommand::RemoveItem(index))
    }

    /// Reorder the queue without interrupting playback
    pub fn move_item(&self, from: usize, to: usize) -> Result<()> {
        self.send(PlayerCommand::MoveItem { from, to })
    }

    /// Set the user that recently-played writes are recorded against
    pub fn set_active_user(&self, user_id: Option<UserId>) -> Result<()> {
        self.send(PlayerCommand::SetActiveUser(user_id))
    }

    /// Subscribe to the playback snapshot stream
    pub fn snapshot(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.snapshot_rx.clone()
    }

    /// The current snapshot value
    pub fn current_snapshot(&self) -> PlaybackSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Subscribe to the queue-info stream
    pub fn queue_info(&self) -> watch::Receiver<QueueInfo> {
        self.queue_info_rx.clone()
    }

    /// The current queue-info value
    pub fn current_queue_info(&self) -> QueueInfo {
        self.queue_info_rx.borrow().clone()
    }

    /// Subscribe to the mini-player visibility flag
    pub fn player_visible(&self) -> watch::Receiver<bool> {
        self.visible_rx.clone()
    }
}

/// Process-wide owner of playback state
///
/// Constructed once at startup via [`SessionCoordinator::spawn`]; lives for
/// the application's lifetime. The engine binds on construction and is
/// released when the task ends (every handle dropped and the engine event
/// stream closed).
pub struct SessionCoordinator {
    queue: PlayQueue,
    session: PlaybackSession,
    library: Arc<dyn MediaLibrary>,
    notifier: Box<dyn NowPlayingNotifier>,
    active_user: Option<UserId>,
    uploader: Option<User>,
    snapshot_tx: watch::Sender<PlaybackSnapshot>,
    queue_info_tx: watch::Sender<QueueInfo>,
    visible_tx: watch::Sender<bool>,
}

impl SessionCoordinator {
    /// Spawn the coordinator task and return the handle UI code keeps
    ///
    /// `engine_events` is the stream the engine implementation reports into;
    /// the coordinator forwards it onto its own command queue so callbacks
    /// apply in arrival order, serialized with UI commands.
    pub fn spawn(
        engine: Box<dyn PlayerEngine>,
        mut engine_events: mpsc::UnboundedReceiver<EngineEvent>,
        notifier: Box<dyn NowPlayingNotifier>,
        library: Arc<dyn MediaLibrary>,
        config: PlaybackConfig,
    ) -> PlayerHandle {
        let (command_tx, mut command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(PlaybackSnapshot::default());
        let (queue_info_tx, queue_info_rx) = watch::channel(QueueInfo::default());
        let (visible_tx, visible_rx) = watch::channel(false);

        let mut queue = PlayQueue::new();
        queue.set_repeat(config.repeat);
        queue.set_shuffle(config.shuffle);

        let mut coordinator = Self {
            queue,
            session: PlaybackSession::new(engine, config.seek_policy),
            library,
            notifier,
            active_user: None,
            uploader: None,
            snapshot_tx,
            queue_info_tx,
            visible_tx,
        };

        // Marshal engine callbacks onto the command queue
        let forward_tx = command_tx.clone();
        tokio::spawn(async move {
            while let Some(event) = engine_events.recv().await {
                if forward_tx.send(PlayerCommand::Engine(event)).is_err() {
                    break;
                }
            }
        });

        tokio::spawn(async move {
            while let Some(command) = command_rx.recv().await {
                coordinator.handle_command(command).await;
            }
            debug!("session coordinator shutting down");
        });

        PlayerHandle {
            commands: command_tx,
            snapshot_rx,
            queue_info_rx,
            visible_rx,
        }
    }

    async fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::PlayWithContext {
                track,
                uploader,
                context,
            } => {
                self.play_with_context(track, uploader, context).await;
            }
            PlayerCommand::PlayFromView {
                tracks,
                title,
                position,
            } => {
                self.play_from_view(tracks, title, position).await;
            }
            PlayerCommand::Next => {
                if let Some(track) = self.queue.next() {
                    self.start_track(track).await;
                }
            }
            PlayerCommand::Previous => {
                if let Some(track) = self.queue.previous() {
                    self.start_track(track).await;
                }
            }
            PlayerCommand::JumpToIndex(index) => {
                if let Some(track) = self.queue.jump_to_index(index) {
                    self.start_track(track).await;
                }
            }
            PlayerCommand::TogglePlayPause => self.session.toggle_play_pause(),
            PlayerCommand::SeekTo(position_ms) => self.session.seek_to(position_ms),
            PlayerCommand::Stop => {
                self.session.stop();
                self.push_notification();
            }
            PlayerCommand::Clear => {
                self.session.clear();
                self.queue.clear();
                self.uploader = None;
                self.notifier.clear();
                self.visible_tx.send_replace(false);
            }
            PlayerCommand::ToggleShuffle => {
                self.queue.toggle_shuffle();
            }
            PlayerCommand::CycleRepeat => {
                self.queue.cycle_repeat_mode();
            }
            PlayerCommand::AddToQueue(track) => self.queue.add_track(track),
            PlayerCommand::RemoveItem(index) => self.remove_item(index).await,
            PlayerCommand::MoveItem { from, to } => {
                // Reordering never interrupts the current playback
                self.queue.move_track(from, to);
            }
            PlayerCommand::SetActiveUser(user_id) => self.active_user = user_id,
            PlayerCommand::Engine(event) => self.handle_engine_event(event).await,
        }
        self.publish();
    }

    async fn play_with_context(
        &mut self,
        track: Track,
        uploader: Option<User>,
        context: NavigationContext,
    ) {
        let mut tracks = self.resolve_context_tracks(&context).await;
        if tracks.is_empty() {
            // Degenerate context: fall back to a single-track queue
            tracks = vec![track.clone()];
        }

        self.queue.set_queue(tracks, context);
        let target = self.queue.jump_to_track(track.id).unwrap_or(track);

        if let Some(uploader) = uploader {
            self.uploader = Some(uploader);
        }
        self.start_track(target).await;
    }

    async fn play_from_view(&mut self, tracks: Vec<Track>, title: String, position: usize) {
        let ids: Vec<TrackId> = tracks.iter().map(|t| t.id).collect();
        let context = NavigationContext::from_general(title, ids, position);
        self.queue.set_queue(tracks, context);

        if let Some(track) = self.queue.current_track().cloned() {
            self.start_track(track).await;
        }
    }

    async fn remove_item(&mut self, index: usize) {
        let Some(removed) = self.queue.remove_track(index) else {
            return;
        };
        let removed_is_loaded = self
            .session
            .loaded_track()
            .is_some_and(|t| t.id == removed.id);
        if !removed_is_loaded {
            return;
        }

        // The playing track left the queue: move on to whatever now sits at
        // the current position, or go quiet when the queue emptied.
        if let Some(track) = self.queue.current_track().cloned() {
            self.start_track(track).await;
        } else {
            self.session.clear();
            self.uploader = None;
            self.notifier.clear();
            self.visible_tx.send_replace(false);
        }
    }

    async fn handle_engine_event(&mut self, event: EngineEvent) {
        match self.session.handle_event(&event) {
            SessionSignal::Stale => {}
            SessionSignal::Updated => {
                if matches!(
                    event,
                    EngineEvent::Playing { .. }
                        | EngineEvent::Paused { .. }
                        | EngineEvent::Failed { .. }
                ) {
                    self.push_notification();
                }
            }
            SessionSignal::Completed => self.auto_advance().await,
        }
    }

    /// Natural end of a track: advance under the repeat policy; Off at the
    /// tail stops cleanly without losing the queue position.
    async fn auto_advance(&mut self) {
        if let Some(track) = self.queue.next() {
            self.start_track(track).await;
        } else {
            self.session.stop();
            self.push_notification();
        }
    }

    async fn start_track(&mut self, track: Track) {
        match self.session.play_track(&track) {
            Ok(()) => {
                self.refresh_uploader(&track).await;
                self.visible_tx.send_replace(true);
                self.push_notification();
                self.record_recent(track.id);
            }
            Err(err) => {
                // InvalidTrack is a silent no-op for the user; the queue
                // position already moved, so the next command still works.
                warn!(track_id = track.id, %err, "skipping unplayable track");
            }
        }
    }

    async fn resolve_context_tracks(&self, context: &NavigationContext) -> Vec<Track> {
        let result = match (context.kind(), context.context_id()) {
            (ContextKind::Playlist, Some(playlist_id)) => {
                self.library.playlist_tracks(playlist_id).await
            }
            (ContextKind::Artist, Some(artist_id)) => {
                self.library.public_tracks_by_uploader(artist_id).await
            }
            _ => self.library.tracks_by_ids(context.track_ids()).await,
        };

        match result {
            Ok(tracks) => {
                debug!(
                    kind = ?context.kind(),
                    title = context.title(),
                    count = tracks.len(),
                    "resolved context tracks"
                );
                tracks
            }
            Err(err) => {
                warn!(%err, title = context.title(), "failed to resolve context tracks");
                Vec::new()
            }
        }
    }

    async fn refresh_uploader(&mut self, track: &Track) {
        if self.uploader.as_ref().is_some_and(|u| u.id == track.uploader_id) {
            return;
        }
        self.uploader = match self.library.user_by_id(track.uploader_id).await {
            Ok(user) => user,
            Err(err) => {
                warn!(%err, uploader_id = track.uploader_id, "failed to resolve uploader");
                None
            }
        };
    }

    /// Persist "recently played" off the coordinator context; storage
    /// workers must never block command handling.
    fn record_recent(&self, track_id: TrackId) {
        let Some(user_id) = self.active_user else {
            return;
        };
        let library = Arc::clone(&self.library);
        tokio::spawn(async move {
            if let Err(err) = library.record_recently_played(user_id, track_id).await {
                warn!(%err, user_id, track_id, "failed to record recently played");
            }
        });
    }

    fn push_notification(&mut self) {
        match self.session.loaded_track() {
            Some(track) => {
                let content = NowPlayingContent {
                    title: track.title.clone(),
                    artist: self
                        .uploader
                        .as_ref()
                        .map(|u| u.display_name.clone())
                        .or_else(|| track.uploader_name.clone())
                        .unwrap_or_default(),
                    playing: self.session.phase() == PlaybackPhase::Playing,
                };
                self.notifier.update(&content);
            }
            None => self.notifier.clear(),
        }
    }

    fn publish(&mut self) {
        let snapshot = PlaybackSnapshot {
            track: self.session.loaded_track().cloned(),
            uploader: self.uploader.clone(),
            phase: self.session.phase(),
            position_ms: self.session.position_ms(),
            duration_ms: self.session.duration_ms(),
            shuffle: self.queue.is_shuffled(),
            repeat: self.queue.repeat_mode(),
            queue_index: self.queue.current_index(),
            error: self.session.last_error().map(str::to_string),
        };
        self.snapshot_tx.send_replace(snapshot);
        self.queue_info_tx.send_replace(self.queue.queue_info());
    }
}
