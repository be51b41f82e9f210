//! VNL headless playback host
//!
//! Drives the playback orchestrator from a terminal with a simulated player.
//!
//! This library exposes the host components for testing purposes.

pub mod args;
pub mod config;
pub mod console;
pub mod error;
pub mod host;
pub mod player;
pub mod session;

// Re-export commonly used types for convenience
pub use args::PlayArgs;
pub use config::{AppConfig, ArtworkSettings, LoggingSettings, SimulationSettings};
pub use console::{ConsoleCommand, Outcome};
pub use error::{CliError, Result};
pub use host::{run_play, spawn_event_printer, spawn_service};
pub use player::SimulatedPlayer;
pub use session::LoggingSession;
