//! Playback events
//!
//! Notifications pushed to the host application. Every event has a stable
//! host-facing name and serializes as `{"event": <name>, "data": <payload>}`.
//! Events are emitted at key points:
//! - Play state changes (only once audio is actually silent for "paused")
//! - Aggregate position (periodic while playing)
//! - Embedded cover of the current track
//! - Per-track adapter failures

use serde::{Deserialize, Serialize};

/// Events emitted by the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// Audible playback started or stopped
    #[serde(rename_all = "camelCase")]
    PlayStateChanged {
        /// Whether audio is playing
        is_playing: bool,
    },

    /// Aggregate playlist position update
    ProgressChanged {
        /// Playlist-wide position in milliseconds
        position: u64,
        /// Total playlist duration in milliseconds (0 = unknown)
        duration: u64,
    },

    /// Embedded cover of the track that just started
    MetadataChanged {
        /// Base64 image bytes, or null when the track has no picture
        cover: Option<String>,
    },

    /// The player could not load or start a track
    TrackFailed {
        /// Playlist index of the failed track
        index: usize,
        /// Locator of the failed track
        locator: String,
        /// Failure reason
        message: String,
    },
}

impl PlaybackEvent {
    /// Host-facing event name
    pub fn name(&self) -> &'static str {
        match self {
            PlaybackEvent::PlayStateChanged { .. } => "playStateChanged",
            PlaybackEvent::ProgressChanged { .. } => "progressChanged",
            PlaybackEvent::MetadataChanged { .. } => "metadataChanged",
            PlaybackEvent::TrackFailed { .. } => "trackFailed",
        }
    }
}
