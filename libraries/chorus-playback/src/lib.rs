//! Chorus - Playback Coordination
//!
//! The playback-queue and session-coordination core of the Chorus player.
//!
//! This crate provides:
//! - Queue model with canonical + active orderings (shuffle permutations)
//! - Repeat modes (Off, All, One) governing navigation edges
//! - Navigation contexts ("how did the user arrive at this track")
//! - Engine-facing playback session with a phase state machine
//! - A single-writer session coordinator fanning state out to UI observers
//!
//! # Architecture
//!
//! `chorus-playback` owns no durable state and renders no audio: the engine
//! ([`PlayerEngine`]) and the status surface ([`NowPlayingNotifier`]) are
//! trait collaborators, and storage is reached only through
//! `chorus_core::MediaLibrary`. One coordinator task serializes every
//! mutation; UI code keeps a cloneable [`PlayerHandle`] and watches the
//! published streams.
//!
//! # Example: queue navigation
//!
//! ```rust
//! use chorus_playback::{NavigationContext, PlayQueue, RepeatMode};
//! use chorus_core::types::Track;
//!
//! fn track(id: i64) -> Track {
//!     let mut t = Track::new(1, format!("Track {id}"), format!("https://cdn.example/{id}.mp3"));
//!     t.id = id;
//!     t
//! }
//!
//! let mut queue = PlayQueue::new();
//! let context = NavigationContext::from_general("Feed", vec![1, 2, 3], 0);
//! queue.set_queue(vec![track(1), track(2), track(3)], context);
//!
//! assert_eq!(queue.next().unwrap().id, 2);
//!
//! queue.set_repeat(RepeatMode::One);
//! assert_eq!(queue.next().unwrap().id, 2);
//! ```

#![forbid(unsafe_code)]

mod coordinator;
mod engine;
mod error;
mod navigation;
mod notify;
mod queue;
mod session;
mod snapshot;
pub mod types;

// Public exports
pub use coordinator::{PlayerHandle, SessionCoordinator};
pub use engine::{EngineEvent, PlayerEngine};
pub use error::{PlaybackError, Result};
pub use navigation::{ContextKind, NavigationContext};
pub use notify::{NowPlayingContent, NowPlayingNotifier, NullNotifier};
pub use queue::PlayQueue;
pub use session::{PlaybackSession, SessionSignal};
pub use snapshot::{PlaybackSnapshot, QueueInfo};
pub use types::{PendingSeekPolicy, PlaybackConfig, PlaybackPhase, RepeatMode};
