//! External player and media-session capabilities
//!
//! The orchestrator never decodes audio or renders notifications itself. It
//! drives a [`PlayerAdapter`] (load, volume, transport, position) and pushes
//! state into a [`MediaSession`]. The player reports back through the
//! [`PlayerEventSender`] it receives in [`PlayerAdapter::attach`].

use crate::error::Result;
use crate::orchestrator::Internal;
use crate::types::CoverArt;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

/// Audio backend driven by the orchestrator
///
/// All calls happen on the orchestrator task, one at a time. Implementations
/// must not block for long; loading should only hand the locator to the backend.
pub trait PlayerAdapter: Send + 'static {
    /// Receive the channel used to report playback callbacks
    ///
    /// Called once, before any other method.
    fn attach(&mut self, events: PlayerEventSender);

    /// Replace the current media item with `locator` and prepare it
    fn load_track(&mut self, locator: &str) -> Result<()>;

    /// Set output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32);

    /// Start or resume playback of the loaded item
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Stop playback and drop the loaded item
    fn stop(&mut self);

    /// Position inside the current item in milliseconds
    fn current_position_ms(&self) -> u64;

    /// Whether audio is currently playing
    fn is_playing(&self) -> bool;

    /// Free backend resources; must tolerate repeated calls
    fn release(&mut self) {}
}

/// Callbacks a player reports to the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The current item reached its end
    PlaybackEnded,

    /// Audible playback started or stopped
    PlayingChanged(bool),
}

/// Sender half handed to the player for its callbacks
///
/// Cheap to clone; sends after the service ended are dropped.
#[derive(Debug, Clone)]
pub struct PlayerEventSender {
    tx: UnboundedSender<Internal>,
}

impl PlayerEventSender {
    pub(crate) fn new(tx: UnboundedSender<Internal>) -> Self {
        Self { tx }
    }

    /// Report that the current item finished
    pub fn playback_ended(&self) {
        self.send(PlayerEvent::PlaybackEnded);
    }

    /// Report a change of the playing state
    pub fn playing_changed(&self, is_playing: bool) {
        self.send(PlayerEvent::PlayingChanged(is_playing));
    }

    /// Report an arbitrary player event
    pub fn send(&self, event: PlayerEvent) {
        if self.tx.send(Internal::Player(event)).is_err() {
            tracing::trace!(?event, "Player event dropped, playback service has ended");
        }
    }
}

/// Transport controls advertised on the media session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransportAction {
    Play,
    Pause,
    PlayPause,
    Stop,
}

/// Controls the orchestrator always advertises
pub const TRANSPORT_ACTIONS: [TransportAction; 4] = [
    TransportAction::Play,
    TransportAction::Pause,
    TransportAction::PlayPause,
    TransportAction::Stop,
];

/// Playlist-level metadata for the media session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionMetadata {
    pub title: String,
    pub duration_ms: u64,
    pub cover: Option<CoverArt>,
}

/// Playback state for the media session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlaybackState {
    pub playing: bool,

    /// Aggregate playlist position
    pub position_ms: u64,

    /// 1.0 while playing, 0.0 otherwise
    pub speed: f32,

    pub actions: Vec<TransportAction>,
}

/// Content of the ongoing playback notification
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationInfo {
    pub title: String,

    /// Notification cannot be dismissed while playing
    pub ongoing: bool,

    pub cover: Option<CoverArt>,
}

/// System media-session / notification surface
///
/// The orchestrator only supplies data; rendering is up to the host. Errors
/// are logged and never interrupt playback.
#[cfg_attr(test, mockall::automock)]
pub trait MediaSession: Send + 'static {
    /// Publish playlist title, duration and cover
    fn set_metadata(&mut self, metadata: &SessionMetadata) -> Result<()>;

    /// Publish playing flag, position and available actions
    fn set_playback_state(&mut self, state: &SessionPlaybackState) -> Result<()>;

    /// Show or refresh the playback notification
    fn update_notification(&mut self, notification: &NotificationInfo) -> Result<()>;

    /// Activate or deactivate the session
    fn set_active(&mut self, active: bool) -> Result<()>;

    /// Free session resources; must tolerate repeated calls
    fn release(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Media session for hosts without a system surface
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSession;

impl MediaSession for NullSession {
    fn set_metadata(&mut self, _metadata: &SessionMetadata) -> Result<()> {
        Ok(())
    }

    fn set_playback_state(&mut self, _state: &SessionPlaybackState) -> Result<()> {
        Ok(())
    }

    fn update_notification(&mut self, _notification: &NotificationInfo) -> Result<()> {
        Ok(())
    }

    fn set_active(&mut self, _active: bool) -> Result<()> {
        Ok(())
    }
}
