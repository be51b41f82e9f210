//! Error types for playback orchestration

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Track selection attempted on a playlist with no tracks
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// Load request is missing required fields
    #[error("Invalid load request: {0}")]
    InvalidLoadRequest(String),

    /// External player could not load or start a track
    #[error("Failed to load track {locator}: {reason}")]
    AdapterLoadFailure {
        /// Locator of the track that failed
        locator: String,
        /// Reason reported by the player
        reason: String,
    },

    /// Media session rejected an update
    #[error("Media session error: {0}")]
    Session(String),

    /// Cover image or embedded picture could not be read
    #[error("Artwork error: {0}")]
    Artwork(String),

    /// The playback service has shut down (after `stop()` or when all handles dropped)
    #[error("Playback service stopped")]
    ServiceStopped,
}

impl PlaybackError {
    /// Build an adapter load failure
    pub fn adapter_load(locator: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::AdapterLoadFailure {
            locator: locator.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
