//! VNL Player - Playlist Playback Orchestration
//!
//! Drives an external audio player through a shuffled playlist.
//!
//! This crate provides:
//! - Shuffle selection without repetition until every track was played
//! - Stepped volume fades (fade-in on start/resume, fade-out on pause/skip)
//! - Playlist-wide position across played tracks
//! - A fixed silence gap between tracks
//! - Media-session and notification synchronization
//! - Cover and embedded-picture lookup on background threads
//!
//! # Architecture
//!
//! `vnl-playback` decodes nothing and renders nothing:
//! - Audio output is a [`PlayerAdapter`] supplied by the host
//! - The system media surface is a [`MediaSession`] supplied by the host
//! - Artwork comes from an [`ArtworkSource`] (`vnl-artwork` with the default
//!   `artwork` feature)
//!
//! All state lives in one tokio task. [`PlaybackHandle`] methods enqueue
//! commands; results come back as [`PlaybackEvent`]s on a broadcast channel.
//!
//! # Example: Implementing a player
//!
//! ```rust
//! use vnl_playback::{PlayerAdapter, PlayerEventSender, Result};
//!
//! #[derive(Default)]
//! struct Speaker {
//!     events: Option<PlayerEventSender>,
//!     playing: bool,
//! }
//!
//! impl PlayerAdapter for Speaker {
//!     fn attach(&mut self, events: PlayerEventSender) {
//!         self.events = Some(events);
//!     }
//!
//!     fn load_track(&mut self, _locator: &str) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn set_volume(&mut self, _volume: f32) {}
//!
//!     fn play(&mut self) -> Result<()> {
//!         self.playing = true;
//!         if let Some(events) = &self.events {
//!             events.playing_changed(true);
//!         }
//!         Ok(())
//!     }
//!
//!     fn pause(&mut self) {
//!         self.playing = false;
//!     }
//!
//!     fn stop(&mut self) {
//!         self.playing = false;
//!     }
//!
//!     fn current_position_ms(&self) -> u64 {
//!         0
//!     }
//!
//!     fn is_playing(&self) -> bool {
//!         self.playing
//!     }
//! }
//! ```
//!
//! # Example: Running the service
//!
//! ```rust,no_run
//! use vnl_playback::{NullSession, PlaybackConfig, PlaybackService, PlaylistRequest};
//!
//! # async fn demo(player: impl vnl_playback::PlayerAdapter) -> vnl_playback::Result<()> {
//! let handle = PlaybackService::new(PlaybackConfig::default(), player, NullSession).spawn();
//!
//! handle.load_playlist(
//!     PlaylistRequest::new(["file:///music/a.mp3", "file:///music/b.mp3"])
//!         .with_title("Evening")
//!         .with_durations(vec![180_000, 240_000], 420_000),
//! )?;
//!
//! handle.pause()?;
//! handle.play()?;
//! handle.next()?;
//!
//! let snapshot = handle.snapshot().await?;
//! println!("{:?} at {} ms", snapshot.state, snapshot.position_ms);
//!
//! handle.stop()?;
//! # Ok(())
//! # }
//! ```

mod adapter;
mod artwork;
mod error;
pub mod events;
mod fade;
mod orchestrator;
mod position;
mod shuffle;
pub mod types;

// Public exports
pub use adapter::{
    MediaSession, NotificationInfo, NullSession, PlayerAdapter, PlayerEvent, PlayerEventSender,
    SessionMetadata, SessionPlaybackState, TransportAction, TRANSPORT_ACTIONS,
};
pub use artwork::ArtworkSource;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use fade::{FadeCompletion, FadeController, FadeStart, FadeStep};
pub use orchestrator::{PlaybackHandle, PlaybackService};
pub use position::aggregate_position;
pub use shuffle::ShuffleSelector;
pub use types::{
    CoverArt, FadeDirection, MediaButton, PlaybackConfig, PlaybackState, Playlist,
    PlaylistRequest, SessionSnapshot, Track,
};

#[cfg(feature = "artwork")]
pub use vnl_artwork::ArtworkExtractor;
