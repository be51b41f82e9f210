//! Core types for playback orchestration

use crate::error::{PlaybackError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A single playable entry of a loaded playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Opaque locator handed to the external player (URI or path)
    pub locator: String,

    /// Known duration in milliseconds (0 = unknown)
    pub duration_ms: u64,
}

/// Inbound `loadPlaylist` request as sent by the host application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistRequest {
    /// Track locators, in playlist order
    pub tracks: Vec<String>,

    /// Playlist title shown on the media session
    #[serde(default)]
    pub title: Option<String>,

    /// Cover image locator
    #[serde(default)]
    pub cover: Option<String>,

    /// Per-track durations in milliseconds, parallel to `tracks`
    #[serde(default)]
    pub durations: Option<Vec<u64>>,

    /// Total playlist duration in milliseconds
    #[serde(default)]
    pub total_duration: Option<u64>,
}

impl PlaylistRequest {
    /// Create a request for the given locators
    pub fn new<I, S>(tracks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tracks: tracks.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the playlist title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the cover image locator
    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }

    /// Set per-track durations and the playlist total
    pub fn with_durations(mut self, durations: Vec<u64>, total_duration: u64) -> Self {
        self.durations = Some(durations);
        self.total_duration = Some(total_duration);
        self
    }

    /// Reject requests the orchestrator cannot act on
    ///
    /// Duration problems are not rejected here; they degrade in [`Playlist::from_request`].
    pub fn validate(&self) -> Result<()> {
        if self.tracks.is_empty() {
            return Err(PlaybackError::InvalidLoadRequest(
                "playlist has no tracks".to_string(),
            ));
        }

        if let Some(index) = self.tracks.iter().position(|t| t.trim().is_empty()) {
            return Err(PlaybackError::InvalidLoadRequest(format!(
                "track {} has an empty locator",
                index
            )));
        }

        Ok(())
    }
}

/// A loaded playlist
///
/// Immutable once loaded; the orchestrator replaces it wholesale on the next load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    /// Tracks in playlist order
    pub tracks: Vec<Track>,

    /// Title shown on the media session
    pub title: String,

    /// Cover image locator
    pub cover: Option<String>,

    /// Total duration in milliseconds (0 = unknown)
    pub total_duration_ms: u64,
}

impl Playlist {
    /// Build a playlist from a validated request
    ///
    /// A missing durations array, or one whose length does not match the track
    /// count, is not fatal: every track gets an unknown duration and the total
    /// becomes 0.
    pub fn from_request(request: PlaylistRequest, default_title: &str) -> Result<Self> {
        request.validate()?;

        let PlaylistRequest {
            tracks,
            title,
            cover,
            durations,
            total_duration,
        } = request;

        let (durations, total_duration_ms) = match durations {
            Some(durations) if durations.len() == tracks.len() => {
                let total = total_duration.unwrap_or_else(|| durations.iter().sum());
                (durations, total)
            }
            Some(durations) => {
                warn!(
                    tracks = tracks.len(),
                    durations = durations.len(),
                    "Duration count mismatch, treating all durations as unknown"
                );
                (vec![0; tracks.len()], 0)
            }
            None => {
                debug!(tracks = tracks.len(), "No durations given, treating all as unknown");
                (vec![0; tracks.len()], 0)
            }
        };

        let tracks = tracks
            .into_iter()
            .zip(durations)
            .map(|(locator, duration_ms)| Track {
                locator,
                duration_ms,
            })
            .collect();

        Ok(Self {
            tracks,
            title: title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| default_title.to_string()),
            cover: cover.filter(|c| !c.trim().is_empty()),
            total_duration_ms,
        })
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Per-track durations in playlist order
    pub fn durations(&self) -> Vec<u64> {
        self.tracks.iter().map(|t| t.duration_ms).collect()
    }
}

/// Orchestrator lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackState {
    /// No playlist loaded yet
    Idle,

    /// Playlist loaded, nothing audible
    Loaded,

    /// A track is playing
    Playing,

    /// Paused mid-track
    Paused,

    /// Fading out before a track switch
    Transitioning,

    /// Service ended; no further commands are accepted
    Stopped,
}

/// Direction of the active fade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FadeDirection {
    /// No fade running
    #[default]
    None,

    /// Ramping up to the target volume
    In,

    /// Ramping down to silence
    Out,
}

/// Hardware/headset media keys delivered through the media session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaButton {
    Play,
    Pause,
    PlayPause,
    HeadsetHook,
    Stop,
    Next,
    Previous,
}

/// Image bytes for the media session and `metadataChanged` events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverArt {
    /// Raw image bytes
    pub data: Vec<u8>,

    /// MIME type (e.g., "image/jpeg")
    pub mime_type: String,
}

impl CoverArt {
    /// Create cover art from raw bytes
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }

    /// Encode as unwrapped standard base64
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

/// Read-only view of the session, returned by state queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Lifecycle state
    pub state: PlaybackState,

    /// Index of the current track, if any
    pub current_index: Option<usize>,

    /// Indices played in the current shuffle cycle (sorted)
    pub played_indices: Vec<usize>,

    /// Last volume applied to the player
    pub volume: f32,

    /// Direction of the running fade
    pub fade: FadeDirection,

    /// Aggregate playlist position in milliseconds
    pub position_ms: u64,

    /// Total playlist duration in milliseconds
    pub duration_ms: u64,

    /// Playlist title
    pub title: Option<String>,

    /// Number of tracks in the playlist
    pub track_count: usize,
}

/// Configuration for the playback orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Fade-in duration in milliseconds; fade-out uses half (default: 800)
    #[serde(default = "default_fade_duration_ms")]
    pub fade_duration_ms: u64,

    /// Number of volume steps per fade (default: 20)
    #[serde(default = "default_fade_steps")]
    pub fade_steps: u32,

    /// Volume reached at the end of a fade-in, 0.0-1.0 (default: 1.0)
    #[serde(default = "default_target_volume")]
    pub target_volume: f32,

    /// Silence between the end of a track and the next one (default: 2000)
    #[serde(default = "default_track_gap_ms")]
    pub track_gap_ms: u64,

    /// Period of `progressChanged` events while playing (default: 1000)
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,

    /// Consecutive track failures tolerated before auto-advance stops (default: 3)
    #[serde(default = "default_max_consecutive_failures")]
    pub max_consecutive_failures: u32,

    /// Title used when a playlist is loaded without one (default: "VNL Player")
    #[serde(default = "default_title")]
    pub default_title: String,

    /// Capacity of the event broadcast channel (default: 256)
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    /// Fixed shuffle seed for reproducible track order
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

fn default_fade_duration_ms() -> u64 {
    800
}

fn default_fade_steps() -> u32 {
    20
}

fn default_target_volume() -> f32 {
    1.0
}

fn default_track_gap_ms() -> u64 {
    2000
}

fn default_progress_interval_ms() -> u64 {
    1000
}

fn default_max_consecutive_failures() -> u32 {
    3
}

fn default_title() -> String {
    "VNL Player".to_string()
}

fn default_event_capacity() -> usize {
    256
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            fade_duration_ms: default_fade_duration_ms(),
            fade_steps: default_fade_steps(),
            target_volume: default_target_volume(),
            track_gap_ms: default_track_gap_ms(),
            progress_interval_ms: default_progress_interval_ms(),
            max_consecutive_failures: default_max_consecutive_failures(),
            default_title: default_title(),
            event_capacity: default_event_capacity(),
            shuffle_seed: None,
        }
    }
}
