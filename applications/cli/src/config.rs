//! Host configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vnl_playback::PlaybackConfig;

/// Default configuration file, read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "vnl.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub artwork: ArtworkSettings,

    #[serde(default)]
    pub simulation: SimulationSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,

    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtworkSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Number of audio files whose artwork lookup is remembered
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Length of tracks without a known duration
    #[serde(default = "default_track_ms")]
    pub default_track_ms: u64,

    /// Refuse `file://` and path locators that don't exist
    #[serde(default)]
    pub require_existing_files: bool,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `vnl.toml` is used if present.
    /// Environment variables override both, e.g. `VNL_PLAYBACK__TRACK_GAP_MS=500`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with VNL_)
        settings = settings.add_source(
            config::Environment::with_prefix("VNL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let playback = &self.playback;

        if playback.fade_steps == 0 {
            return Err(CliError::Config(
                "playback.fade_steps must be greater than 0".to_string(),
            ));
        }

        if !(playback.target_volume > 0.0 && playback.target_volume <= 1.0) {
            return Err(CliError::Config(format!(
                "playback.target_volume must be in (0, 1], got {}",
                playback.target_volume
            )));
        }

        if playback.progress_interval_ms == 0 {
            return Err(CliError::Config(
                "playback.progress_interval_ms must be greater than 0".to_string(),
            ));
        }

        if playback.event_capacity == 0 {
            return Err(CliError::Config(
                "playback.event_capacity must be greater than 0".to_string(),
            ));
        }

        if self.simulation.default_track_ms == 0 {
            return Err(CliError::Config(
                "simulation.default_track_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            ansi: default_ansi(),
        }
    }
}

impl Default for ArtworkSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            cache_size: default_cache_size(),
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            default_track_ms: default_track_ms(),
            require_existing_files: false,
        }
    }
}

fn default_filter() -> String {
    "vnl_playback=info,vnl_cli=info".to_string()
}

fn default_ansi() -> bool {
    true
}

fn default_enabled() -> bool {
    true
}

fn default_cache_size() -> usize {
    32
}

fn default_track_ms() -> u64 {
    30_000
}
