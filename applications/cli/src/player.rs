//! Simulated audio output
//!
//! Plays nothing. Each track "runs" for its known duration (or the configured
//! default) on the tokio clock and then reports its end, which is enough to
//! exercise fades, gaps and progress from a terminal.

use crate::config::SimulationSettings;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::time::{Duration, Instant};
use tracing::{debug, trace};
use vnl_playback::{PlaybackError, PlayerAdapter, PlayerEventSender, Result};

#[derive(Debug, Default)]
struct Transport {
    events: Option<PlayerEventSender>,
    current: Option<String>,
    track_ms: u64,
    offset_ms: u64,
    started_at: Option<Instant>,
    /// Bumped whenever the end timer must be re-armed
    run: u64,
}

impl Transport {
    fn position_ms(&self) -> u64 {
        let running = self
            .started_at
            .map(|start| start.elapsed().as_millis() as u64)
            .unwrap_or(0);
        (self.offset_ms + running).min(self.track_ms)
    }

    /// Freeze the position; returns true if audio was running
    fn halt(&mut self) -> bool {
        if self.started_at.is_none() {
            return false;
        }
        self.offset_ms = self.position_ms();
        self.started_at = None;
        self.run += 1;
        true
    }

    fn report_playing(&self, is_playing: bool) {
        if let Some(events) = &self.events {
            events.playing_changed(is_playing);
        }
    }
}

/// Player that advances on the tokio clock
#[derive(Debug, Clone)]
pub struct SimulatedPlayer {
    transport: Arc<Mutex<Transport>>,
    settings: SimulationSettings,
    durations: HashMap<String, u64>,
}

impl SimulatedPlayer {
    /// Create a player; `durations` maps locators to their length in ms
    pub fn new(settings: SimulationSettings, durations: HashMap<String, u64>) -> Self {
        Self {
            transport: Arc::new(Mutex::new(Transport::default())),
            settings,
            durations,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Transport> {
        self.transport.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn track_length(&self, locator: &str) -> u64 {
        match self.durations.get(locator) {
            Some(&ms) if ms > 0 => ms,
            _ => self.settings.default_track_ms,
        }
    }

    /// Start the clock and arm the end-of-track timer
    fn start(&self, transport: &mut Transport) {
        transport.started_at = Some(Instant::now());
        transport.run += 1;

        let run = transport.run;
        let remaining = transport.track_ms.saturating_sub(transport.offset_ms);
        let shared = Arc::clone(&self.transport);

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(remaining)).await;

            let mut transport = shared.lock().unwrap_or_else(PoisonError::into_inner);
            if transport.run != run {
                trace!(run, "End timer superseded");
                return;
            }

            transport.halt();
            debug!(locator = ?transport.current, "Simulated track finished");
            transport.report_playing(false);
            if let Some(events) = &transport.events {
                events.playback_ended();
            }
        });
    }
}

impl PlayerAdapter for SimulatedPlayer {
    fn attach(&mut self, events: PlayerEventSender) {
        self.lock().events = Some(events);
    }

    fn load_track(&mut self, locator: &str) -> Result<()> {
        if self.settings.require_existing_files {
            let path = vnl_artwork::resolve(locator)
                .map_err(|e| PlaybackError::adapter_load(locator, e))?;
            if !path.exists() {
                return Err(PlaybackError::adapter_load(locator, "file not found"));
            }
        }

        let track_ms = self.track_length(locator);
        let mut transport = self.lock();
        let was_playing = transport.halt();

        transport.current = Some(locator.to_string());
        transport.track_ms = track_ms;
        transport.offset_ms = 0;
        debug!(locator, track_ms, "Simulated track loaded");

        if was_playing {
            self.start(&mut transport);
        }
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        trace!(volume, "Simulated volume");
    }

    fn play(&mut self) -> Result<()> {
        let mut transport = self.lock();

        if transport.current.is_none() {
            return Err(PlaybackError::adapter_load("<none>", "no track loaded"));
        }

        if transport.started_at.is_some() {
            return Ok(());
        }

        self.start(&mut transport);
        transport.report_playing(true);
        Ok(())
    }

    fn pause(&mut self) {
        let mut transport = self.lock();
        if transport.halt() {
            transport.report_playing(false);
        }
    }

    fn stop(&mut self) {
        let mut transport = self.lock();
        if transport.halt() {
            transport.report_playing(false);
        }
        transport.current = None;
        transport.offset_ms = 0;
    }

    fn current_position_ms(&self) -> u64 {
        self.lock().position_ms()
    }

    fn is_playing(&self) -> bool {
        self.lock().started_at.is_some()
    }
}
