//! Now-playing notification collaborator
//!
//! The OS/presentation layer renders the persistent status surface; this
//! crate only decides its content. The coordinator pushes an update on every
//! track change and play/pause flip, and clears it on full stop.

use serde::{Deserialize, Serialize};

/// Content of the persistent now-playing notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlayingContent {
    /// Current track title
    pub title: String,

    /// Current artist display name
    pub artist: String,

    /// Whether audio is rendering right now
    pub playing: bool,
}

/// Renderer of the persistent status surface
pub trait NowPlayingNotifier: Send + Sync {
    /// Show or refresh the notification
    fn update(&mut self, content: &NowPlayingContent);

    /// Remove the notification
    fn clear(&mut self);
}

/// Notifier that renders nothing (headless hosts, tests)
#[derive(Debug, Default)]
pub struct NullNotifier;

impl NowPlayingNotifier for NullNotifier {
    fn update(&mut self, _content: &NowPlayingContent) {}

    fn clear(&mut self) {}
}
