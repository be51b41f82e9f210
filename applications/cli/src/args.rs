//! Command-line arguments of the `play` command

use clap::Args;
use std::collections::HashMap;
use vnl_playback::PlaylistRequest;

#[derive(Debug, Clone, Args)]
pub struct PlayArgs {
    /// Track locators (paths or file:// URIs)
    #[arg(required = true)]
    pub tracks: Vec<String>,

    /// Playlist title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Cover image locator
    #[arg(long)]
    pub cover: Option<String>,

    /// Per-track durations in milliseconds, comma separated
    #[arg(long, value_delimiter = ',')]
    pub durations: Option<Vec<u64>>,

    /// Total playlist duration in milliseconds
    #[arg(long)]
    pub total_duration: Option<u64>,
}

impl PlayArgs {
    /// Build the load request sent to the orchestrator
    pub fn to_request(&self) -> PlaylistRequest {
        PlaylistRequest {
            tracks: self.tracks.clone(),
            title: self.title.clone(),
            cover: self.cover.clone(),
            durations: self.durations.clone(),
            total_duration: self.total_duration,
        }
    }

    /// Track lengths for the simulated player
    ///
    /// Empty when the duration count doesn't match the track count.
    pub fn track_lengths(&self) -> HashMap<String, u64> {
        match &self.durations {
            Some(durations) if durations.len() == self.tracks.len() => self
                .tracks
                .iter()
                .cloned()
                .zip(durations.iter().copied())
                .collect(),
            _ => HashMap::new(),
        }
    }
}
