//! Shared fixtures for orchestrator integration tests
//!
//! The fake player keeps its state behind a mutex so a test can inspect it
//! (and drive end-of-track) after the player was moved into the service.
//! Timestamps come from `tokio::time`, so paused-clock tests see exact values.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tokio::time::{Duration, Instant};
use vnl_playback::{
    MediaSession, NotificationInfo, PlaybackConfig, PlaybackError, PlaybackEvent, PlaybackHandle,
    PlaybackService, PlayerAdapter, PlayerEventSender, Result, SessionMetadata,
    SessionPlaybackState,
};

// ===== Fake player =====

#[derive(Debug, Default)]
struct PlayerState {
    events: Option<PlayerEventSender>,
    failing: HashSet<String>,
    current: Option<String>,
    playing: bool,
    started_at: Option<Instant>,
    offset_ms: u64,

    loads: Vec<(Instant, String)>,
    volumes: Vec<(Instant, f32)>,
    pauses: Vec<Instant>,
    stops: usize,
    releases: usize,
}

impl PlayerState {
    fn elapsed_ms(&self) -> u64 {
        self.started_at
            .map(|start| start.elapsed().as_millis() as u64)
            .unwrap_or(0)
    }

    fn halt(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        self.offset_ms += self.elapsed_ms();
        self.started_at = None;
        self.playing = false;
        true
    }

    fn emit_playing(&self, is_playing: bool) {
        if let Some(events) = &self.events {
            events.playing_changed(is_playing);
        }
    }
}

/// Player whose clock is the tokio clock
pub struct FakePlayer {
    state: Arc<Mutex<PlayerState>>,
}

/// Test-side view of a [`FakePlayer`]
#[derive(Clone)]
pub struct PlayerProbe {
    state: Arc<Mutex<PlayerState>>,
}

/// Create a player and its probe
pub fn fake_player() -> (FakePlayer, PlayerProbe) {
    failing_player(&[])
}

/// Create a player that refuses to load the given locators
pub fn failing_player(locators: &[&str]) -> (FakePlayer, PlayerProbe) {
    let state = Arc::new(Mutex::new(PlayerState {
        failing: locators.iter().map(|l| l.to_string()).collect(),
        ..PlayerState::default()
    }));

    (
        FakePlayer {
            state: Arc::clone(&state),
        },
        PlayerProbe { state },
    )
}

impl PlayerAdapter for FakePlayer {
    fn attach(&mut self, events: PlayerEventSender) {
        self.state.lock().unwrap().events = Some(events);
    }

    fn load_track(&mut self, locator: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.loads.push((Instant::now(), locator.to_string()));

        if state.failing.contains(locator) {
            if state.halt() {
                state.emit_playing(false);
            }
            state.current = None;
            return Err(PlaybackError::adapter_load(locator, "unsupported format"));
        }

        state.current = Some(locator.to_string());
        state.offset_ms = 0;
        if state.playing {
            state.started_at = Some(Instant::now());
        }
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.state
            .lock()
            .unwrap()
            .volumes
            .push((Instant::now(), volume));
    }

    fn play(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.current.is_none() {
            return Err(PlaybackError::adapter_load("<none>", "nothing loaded"));
        }
        if !state.playing {
            state.playing = true;
            state.started_at = Some(Instant::now());
            state.emit_playing(true);
        }
        Ok(())
    }

    fn pause(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.pauses.push(Instant::now());
        if state.halt() {
            state.emit_playing(false);
        }
    }

    fn stop(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.stops += 1;
        if state.halt() {
            state.emit_playing(false);
        }
        state.current = None;
        state.offset_ms = 0;
    }

    fn current_position_ms(&self) -> u64 {
        let state = self.state.lock().unwrap();
        state.offset_ms + state.elapsed_ms()
    }

    fn is_playing(&self) -> bool {
        self.state.lock().unwrap().playing
    }

    fn release(&mut self) {
        self.state.lock().unwrap().releases += 1;
    }
}

impl PlayerProbe {
    /// Locators passed to `load_track`, in order
    pub fn loads(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.loads.iter().map(|(_, l)| l.clone()).collect()
    }

    /// Instants of every `load_track` call
    pub fn load_times(&self) -> Vec<Instant> {
        let state = self.state.lock().unwrap();
        state.loads.iter().map(|(t, _)| *t).collect()
    }

    /// Every `set_volume` call with its instant
    pub fn volumes(&self) -> Vec<(Instant, f32)> {
        self.state.lock().unwrap().volumes.clone()
    }

    /// Last volume applied
    pub fn volume(&self) -> Option<f32> {
        self.state.lock().unwrap().volumes.last().map(|(_, v)| *v)
    }

    pub fn pause_times(&self) -> Vec<Instant> {
        self.state.lock().unwrap().pauses.clone()
    }

    pub fn current(&self) -> Option<String> {
        self.state.lock().unwrap().current.clone()
    }

    pub fn is_playing(&self) -> bool {
        self.state.lock().unwrap().playing
    }

    pub fn stops(&self) -> usize {
        self.state.lock().unwrap().stops
    }

    pub fn releases(&self) -> usize {
        self.state.lock().unwrap().releases
    }

    /// Simulate the current item reaching its end
    pub fn finish_track(&self) {
        let mut state = self.state.lock().unwrap();
        if state.halt() {
            state.emit_playing(false);
        }
        if let Some(events) = &state.events {
            events.playback_ended();
        }
    }

    /// Send an end-of-track callback without stopping audio
    pub fn report_ended(&self) {
        if let Some(events) = &self.state.lock().unwrap().events {
            events.playback_ended();
        }
    }
}

// ===== Recording session =====

#[derive(Debug, Default)]
pub struct SessionLog {
    pub metadata: Vec<SessionMetadata>,
    pub playback_states: Vec<SessionPlaybackState>,
    pub notifications: Vec<NotificationInfo>,
    pub active: Vec<bool>,
    pub releases: usize,
}

/// Media session that records every update
#[derive(Clone, Default)]
pub struct RecordingSession {
    log: Arc<Mutex<SessionLog>>,
}

impl RecordingSession {
    pub fn with_log<T>(&self, f: impl FnOnce(&SessionLog) -> T) -> T {
        f(&self.log.lock().unwrap())
    }
}

impl MediaSession for RecordingSession {
    fn set_metadata(&mut self, metadata: &SessionMetadata) -> Result<()> {
        self.log.lock().unwrap().metadata.push(metadata.clone());
        Ok(())
    }

    fn set_playback_state(&mut self, state: &SessionPlaybackState) -> Result<()> {
        self.log.lock().unwrap().playback_states.push(state.clone());
        Ok(())
    }

    fn update_notification(&mut self, notification: &NotificationInfo) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .notifications
            .push(notification.clone());
        Ok(())
    }

    fn set_active(&mut self, active: bool) -> Result<()> {
        self.log.lock().unwrap().active.push(active);
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        self.log.lock().unwrap().releases += 1;
        Ok(())
    }
}

// ===== Harness =====

/// A running service with its probes
pub struct Harness {
    pub handle: PlaybackHandle,
    pub player: PlayerProbe,
    pub session: RecordingSession,
    pub events: broadcast::Receiver<PlaybackEvent>,
}

impl Harness {
    /// Spawn a service with default config and a well-behaved player
    pub fn start() -> Self {
        Self::with(PlaybackConfig::default(), fake_player())
    }

    /// Spawn a service with the given config and player
    pub fn with(config: PlaybackConfig, (player, probe): (FakePlayer, PlayerProbe)) -> Self {
        let session = RecordingSession::default();
        let handle = PlaybackService::new(config, player, session.clone()).spawn();
        let events = handle.subscribe();

        Self {
            handle,
            player: probe,
            session,
            events,
        }
    }

    /// Take every event emitted so far
    pub fn drain(&mut self) -> Vec<PlaybackEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

/// Values of the `playStateChanged` events, in order
pub fn play_states(events: &[PlaybackEvent]) -> Vec<bool> {
    events
        .iter()
        .filter_map(|e| match e {
            PlaybackEvent::PlayStateChanged { is_playing } => Some(*is_playing),
            _ => None,
        })
        .collect()
}

/// `(position, duration)` of the `progressChanged` events, in order
pub fn progress(events: &[PlaybackEvent]) -> Vec<(u64, u64)> {
    events
        .iter()
        .filter_map(|e| match e {
            PlaybackEvent::ProgressChanged { position, duration } => Some((*position, *duration)),
            _ => None,
        })
        .collect()
}

/// `(index, locator)` of the `trackFailed` events, in order
pub fn failures(events: &[PlaybackEvent]) -> Vec<(usize, String)> {
    events
        .iter()
        .filter_map(|e| match e {
            PlaybackEvent::TrackFailed { index, locator, .. } => Some((*index, locator.clone())),
            _ => None,
        })
        .collect()
}

/// Let the actor settle for `ms` of (virtual) time
pub async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
