//! Playback orchestrator
//!
//! A single tokio task owns the playlist and session state. Everything that
//! can change that state arrives as a message:
//! - commands from [`PlaybackHandle`]s,
//! - player callbacks sent through [`PlayerEventSender`],
//! - timer expiries (fade steps, progress ticks, the inter-track gap),
//! - artwork loaded on blocking worker threads.
//!
//! Timers and background work never touch state directly. They post a message
//! stamped with the generation they were started under, and the actor drops
//! the message when that generation has been superseded.
//!
//! The task ends on `stop()` or once every handle is dropped.

use crate::adapter::{
    MediaSession, NotificationInfo, PlayerAdapter, PlayerEvent, PlayerEventSender, SessionMetadata,
    SessionPlaybackState, TRANSPORT_ACTIONS,
};
use crate::artwork::ArtworkSource;
use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::fade::{FadeCompletion, FadeController, FadeStep};
use crate::position::aggregate_position;
use crate::shuffle::ShuffleSelector;
use crate::types::{
    CoverArt, MediaButton, PlaybackConfig, PlaybackState, Playlist, PlaylistRequest,
    SessionSnapshot,
};
use std::collections::HashSet;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, error, info, trace, warn};

/// Messages produced inside the service (player, timers, background work)
#[derive(Debug)]
pub(crate) enum Internal {
    Player(PlayerEvent),
    Timer(Timer),
    Cover {
        generation: u64,
        cover: Option<CoverArt>,
    },
    TrackArtwork {
        generation: u64,
        cover: Option<CoverArt>,
    },
}

/// Timer expiries, stamped with the generation they were scheduled under
#[derive(Debug, Clone, Copy)]
pub(crate) enum Timer {
    Fade(u64),
    Progress(u64),
    Gap(u64),
}

/// Commands sent by handles
#[derive(Debug)]
enum Command {
    Load(Playlist),
    Play,
    Pause,
    Stop,
    Next,
    MediaButton(MediaButton),
    Snapshot(oneshot::Sender<SessionSnapshot>),
}

/// Builder for the playback actor
///
/// # Example
///
/// ```rust,no_run
/// # use vnl_playback::{PlaybackService, PlaybackConfig, NullSession, PlaylistRequest};
/// # async fn demo(player: impl vnl_playback::PlayerAdapter) -> vnl_playback::Result<()> {
/// let handle = PlaybackService::new(PlaybackConfig::default(), player, NullSession).spawn();
///
/// let mut events = handle.subscribe();
/// handle.load_playlist(PlaylistRequest::new(["file:///music/a.mp3", "file:///music/b.mp3"]))?;
///
/// while let Ok(event) = events.recv().await {
///     println!("{}", event.name());
/// }
/// # Ok(())
/// # }
/// ```
pub struct PlaybackService<P, S> {
    config: PlaybackConfig,
    player: P,
    session: S,
    artwork: Option<Arc<dyn ArtworkSource>>,
}

impl<P, S> PlaybackService<P, S>
where
    P: PlayerAdapter,
    S: MediaSession,
{
    /// Create a service around a player and a media session
    pub fn new(config: PlaybackConfig, player: P, session: S) -> Self {
        Self {
            config,
            player,
            session,
            artwork: None,
        }
    }

    /// Load covers and embedded pictures from `artwork`
    ///
    /// Without a source every track reports `metadataChanged { cover: null }`.
    pub fn with_artwork(mut self, artwork: Arc<dyn ArtworkSource>) -> Self {
        self.artwork = Some(artwork);
        self
    }

    /// Start the actor on the current tokio runtime
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn(self) -> PlaybackHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();
        let (events_tx, _) = broadcast::channel(self.config.event_capacity.max(1));

        let Self {
            config,
            mut player,
            session,
            artwork,
        } = self;

        player.attach(PlayerEventSender::new(internal_tx.clone()));

        let handle = PlaybackHandle {
            commands: command_tx,
            internal: internal_tx.clone(),
            events: events_tx.clone(),
            default_title: config.default_title.clone(),
        };

        let orchestrator = Orchestrator::new(config, player, session, artwork, events_tx, internal_tx);
        tokio::spawn(orchestrator.run(command_rx, internal_rx));

        handle
    }
}

/// Cloneable control surface of a running service
///
/// Command methods only enqueue; they never wait for the actor.
#[derive(Debug, Clone)]
pub struct PlaybackHandle {
    commands: mpsc::UnboundedSender<Command>,
    internal: mpsc::UnboundedSender<Internal>,
    events: broadcast::Sender<PlaybackEvent>,
    default_title: String,
}

impl PlaybackHandle {
    /// Replace the playlist and start playing a random track
    ///
    /// Malformed requests (no tracks, empty locator) are rejected here.
    pub fn load_playlist(&self, request: PlaylistRequest) -> Result<()> {
        let playlist = Playlist::from_request(request, &self.default_title)?;
        self.send(Command::Load(playlist))
    }

    /// Resume playback, or start the playlist when nothing was picked yet
    pub fn play(&self) -> Result<()> {
        self.send(Command::Play)
    }

    /// Fade out and pause
    pub fn pause(&self) -> Result<()> {
        self.send(Command::Pause)
    }

    /// Stop playback and shut the service down
    pub fn stop(&self) -> Result<()> {
        self.send(Command::Stop)
    }

    /// Skip to another track, fading the current one out first
    pub fn next(&self) -> Result<()> {
        self.send(Command::Next)
    }

    /// Deliver a hardware or headset key
    pub fn media_button(&self, button: MediaButton) -> Result<()> {
        self.send(Command::MediaButton(button))
    }

    /// Query the current session state
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx))?;
        rx.await.map_err(|_| PlaybackError::ServiceStopped)
    }

    /// Subscribe to playback events
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    /// Sender for reporting player callbacks from outside the adapter
    pub fn player_events(&self) -> PlayerEventSender {
        PlayerEventSender::new(self.internal.clone())
    }

    /// Check if the service has shut down
    pub fn is_stopped(&self) -> bool {
        self.commands.is_closed()
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| PlaybackError::ServiceStopped)
    }
}

/// Actor state; lives inside the spawned task
struct Orchestrator<P, S>
where
    P: PlayerAdapter,
    S: MediaSession,
{
    config: PlaybackConfig,
    player: P,
    session: S,
    artwork: Option<Arc<dyn ArtworkSource>>,
    events: broadcast::Sender<PlaybackEvent>,
    internal: mpsc::UnboundedSender<Internal>,

    shuffle: ShuffleSelector,
    fade: FadeController,

    playlist: Option<Playlist>,
    played: HashSet<usize>,
    current_index: Option<usize>,
    volume: f32,
    state: PlaybackState,
    cover: Option<CoverArt>,

    /// Bumped on every load; stamps cover results
    playlist_generation: u64,
    /// Bumped on every track start; stamps embedded-picture results
    track_generation: u64,
    /// Source of progress and gap generations
    timer_generation: u64,
    /// Generation of the running progress chain
    progress: Option<u64>,
    /// Generation of the pending inter-track gap
    gap: Option<u64>,

    /// Last value sent as `playStateChanged`
    reported_playing: Option<bool>,
    consecutive_failures: u32,
    torn_down: bool,
}

impl<P, S> Orchestrator<P, S>
where
    P: PlayerAdapter,
    S: MediaSession,
{
    fn new(
        config: PlaybackConfig,
        player: P,
        session: S,
        artwork: Option<Arc<dyn ArtworkSource>>,
        events: broadcast::Sender<PlaybackEvent>,
        internal: mpsc::UnboundedSender<Internal>,
    ) -> Self {
        Self {
            shuffle: ShuffleSelector::from_seed(config.shuffle_seed),
            fade: FadeController::new(config.fade_duration_ms, config.fade_steps),
            config,
            player,
            session,
            artwork,
            events,
            internal,
            playlist: None,
            played: HashSet::new(),
            current_index: None,
            volume: 0.0,
            state: PlaybackState::Idle,
            cover: None,
            playlist_generation: 0,
            track_generation: 0,
            timer_generation: 0,
            progress: None,
            gap: None,
            reported_playing: None,
            consecutive_failures: 0,
            torn_down: false,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut internal: mpsc::UnboundedReceiver<Internal>,
    ) {
        info!("Playback service started");
        if let Err(e) = self.session.set_active(true) {
            warn!(error = %e, "Failed to activate media session");
        }

        loop {
            tokio::select! {
                biased;

                command = commands.recv() => {
                    let Some(command) = command else {
                        debug!("All playback handles dropped");
                        break;
                    };
                    if self.handle_command(command).is_break() {
                        break;
                    }
                }

                Some(message) = internal.recv() => self.handle_internal(message),
            }
        }

        self.teardown();
        info!("Playback service stopped");
    }

    fn handle_command(&mut self, command: Command) -> ControlFlow<()> {
        trace!(?command, "Command received");

        match command {
            Command::Load(playlist) => self.load(playlist),
            Command::Play => self.play(),
            Command::Pause => self.pause(),
            Command::Stop => {
                self.stop();
                return ControlFlow::Break(());
            }
            Command::Next => self.skip(),
            Command::MediaButton(button) => return self.media_button(button),
            Command::Snapshot(reply) => {
                // Caller may have given up waiting
                let _ = reply.send(self.snapshot());
            }
        }

        ControlFlow::Continue(())
    }

    fn handle_internal(&mut self, message: Internal) {
        match message {
            Internal::Player(PlayerEvent::PlaybackEnded) => self.on_track_ended(),
            Internal::Player(PlayerEvent::PlayingChanged(is_playing)) => {
                self.on_playing_changed(is_playing);
            }
            Internal::Timer(Timer::Fade(generation)) => self.on_fade_step(generation),
            Internal::Timer(Timer::Progress(generation)) => self.on_progress_tick(generation),
            Internal::Timer(Timer::Gap(generation)) => self.on_gap_elapsed(generation),
            Internal::Cover { generation, cover } => self.on_cover_loaded(generation, cover),
            Internal::TrackArtwork { generation, cover } => {
                self.on_track_artwork(generation, cover);
            }
        }
    }

    // ===== Commands =====

    fn load(&mut self, playlist: Playlist) {
        info!(
            title = %playlist.title,
            tracks = playlist.len(),
            total_duration_ms = playlist.total_duration_ms,
            "Loading playlist"
        );

        self.cancel_gap();
        self.playlist_generation += 1;
        self.played.clear();
        self.current_index = None;
        self.consecutive_failures = 0;
        self.cover = None;
        self.state = PlaybackState::Loaded;

        if let Some(cover) = playlist.cover.clone() {
            self.request_cover(cover);
        }

        self.playlist = Some(playlist);
        self.push_metadata();
        self.play_next();
    }

    fn play(&mut self) {
        if self.playlist.is_none() {
            debug!("Play requested without a playlist");
            return;
        }

        let Some(index) = self.current_index else {
            self.play_next();
            return;
        };

        if self.gap.is_some() || self.state == PlaybackState::Transitioning {
            debug!("Track transition pending, play ignored");
            return;
        }

        if self.player.is_playing() && !self.fade.is_fading_out() {
            trace!("Already playing");
            return;
        }

        if let Err(e) = self.player.play() {
            let locator = self.locator(index).unwrap_or_default();
            self.on_track_failed(index, locator, e);
            return;
        }

        debug!(index, "Resuming playback");
        self.state = PlaybackState::Playing;
        self.start_fade_in();
    }

    fn pause(&mut self) {
        if !self.player.is_playing() {
            debug!("Pause requested while not playing");
            return;
        }

        if self.fade.is_fading_out() {
            trace!("Fade-out already running");
            return;
        }

        debug!("Pausing with fade-out");
        self.start_fade_out(FadeCompletion::Pause);
    }

    fn stop(&mut self) {
        info!("Stopping playback");
        self.fade.cancel();
        self.stop_progress();
        self.cancel_gap();
        self.player.stop();
        self.report_playing(false);
        self.teardown();
    }

    fn skip(&mut self) {
        if self.playlist.is_none() {
            debug!("Skip requested without a playlist");
            return;
        }

        self.cancel_gap();

        if self.player.is_playing() {
            debug!("Skipping with fade-out");
            self.state = PlaybackState::Transitioning;
            self.start_fade_out(FadeCompletion::Advance);
        } else {
            self.play_next();
        }
    }

    fn media_button(&mut self, button: MediaButton) -> ControlFlow<()> {
        debug!(?button, "Media button");

        match button {
            MediaButton::Play => self.play(),
            MediaButton::Pause => self.pause(),
            MediaButton::PlayPause | MediaButton::HeadsetHook => {
                if self.player.is_playing() && !self.fade.is_fading_out() {
                    self.pause();
                } else {
                    self.play();
                }
            }
            MediaButton::Stop => {
                self.stop();
                return ControlFlow::Break(());
            }
            MediaButton::Next => self.skip(),
            // No history to go back to; consume the key
            MediaButton::Previous => {}
        }

        ControlFlow::Continue(())
    }

    fn snapshot(&self) -> SessionSnapshot {
        let mut played_indices: Vec<usize> = self.played.iter().copied().collect();
        played_indices.sort_unstable();

        SessionSnapshot {
            state: self.state,
            current_index: self.current_index,
            played_indices,
            volume: self.volume,
            fade: self.fade.direction(),
            position_ms: self.position_ms(),
            duration_ms: self.total_duration_ms(),
            title: self.playlist.as_ref().map(|p| p.title.clone()),
            track_count: self.playlist.as_ref().map_or(0, Playlist::len),
        }
    }

    // ===== Track transitions =====

    fn play_next(&mut self) {
        self.cancel_gap();

        let Some(track_count) = self.playlist.as_ref().map(Playlist::len) else {
            warn!("No playlist loaded");
            return;
        };

        match self.shuffle.select_next(track_count, &mut self.played) {
            Ok(index) => self.play_track(index),
            Err(e) => warn!(error = %e, "Cannot select next track"),
        }
    }

    fn play_track(&mut self, index: usize) {
        let Some(locator) = self.locator(index) else {
            warn!(index, "Invalid track index");
            return;
        };

        self.fade.cancel();
        self.current_index = Some(index);
        self.played.insert(index);
        self.track_generation += 1;

        info!(
            index,
            played = self.played.len(),
            track_count = self.playlist.as_ref().map_or(0, Playlist::len),
            "Playing track"
        );

        self.apply_volume(0.0);
        let started = self
            .player
            .load_track(&locator)
            .and_then(|()| self.player.play());

        if let Err(e) = started {
            self.on_track_failed(index, locator, e);
            return;
        }

        self.state = PlaybackState::Playing;
        self.start_fade_in();
        self.update_notification();
        self.request_track_artwork(locator);
    }

    fn on_track_failed(&mut self, index: usize, locator: String, error: PlaybackError) {
        self.consecutive_failures += 1;
        error!(
            index,
            %locator,
            error = %error,
            failures = self.consecutive_failures,
            "Track failed"
        );

        let message = match error {
            PlaybackError::AdapterLoadFailure { reason, .. } => reason,
            other => other.to_string(),
        };
        self.emit(PlaybackEvent::TrackFailed {
            index,
            locator,
            message,
        });

        self.fade.cancel();
        self.state = PlaybackState::Loaded;

        let limit = self.config.max_consecutive_failures;
        if limit > 0 && self.consecutive_failures >= limit {
            warn!(
                failures = self.consecutive_failures,
                "Too many consecutive failures, no longer advancing"
            );
            self.player.stop();
            self.current_index = None;
            self.stop_progress();
            self.report_playing(false);
            self.refresh_playback_state();
            return;
        }

        self.schedule_gap();
    }

    fn on_track_ended(&mut self) {
        // The player may report the end of an item it already replaced
        if self.player.is_playing() {
            trace!("Ignoring end-of-track while playing");
            return;
        }

        let Some(index) = self.current_index else {
            trace!("Ignoring end-of-track without a current track");
            return;
        };

        debug!(index, gap_ms = self.config.track_gap_ms, "Track ended");
        self.state = PlaybackState::Loaded;
        self.stop_progress();
        self.schedule_gap();
        self.refresh_playback_state();
    }

    fn on_playing_changed(&mut self, is_playing: bool) {
        debug!(is_playing, "Player state changed");
        self.update_notification();
        self.refresh_playback_state();

        // Listeners hear "paused" only once the fade-out reached silence
        if !self.fade.is_fading_out() {
            self.report_playing(is_playing);
        }

        if is_playing {
            self.consecutive_failures = 0;
            self.start_progress();
        } else {
            self.stop_progress();
        }
    }

    // ===== Fades =====

    fn start_fade_in(&mut self) {
        let target = self.config.target_volume.clamp(0.0, 1.0);
        let start = self.fade.fade_in(self.volume, target);
        self.schedule(start.delay, Internal::Timer(Timer::Fade(start.generation)));
    }

    fn start_fade_out(&mut self, completion: FadeCompletion) {
        if !self.player.is_playing() {
            self.fade.cancel();
            self.complete_fade(completion);
            return;
        }

        let start = self.fade.fade_out(self.volume, completion);
        self.schedule(start.delay, Internal::Timer(Timer::Fade(start.generation)));
    }

    fn on_fade_step(&mut self, generation: u64) {
        match self.fade.advance(generation) {
            FadeStep::Stale => trace!(generation, "Dropping stale fade step"),
            FadeStep::Continue { volume, delay } => {
                self.apply_volume(volume);
                self.schedule(delay, Internal::Timer(Timer::Fade(generation)));
            }
            FadeStep::Finished {
                volume,
                direction,
                completion,
            } => {
                self.apply_volume(volume);
                trace!(?direction, volume, "Fade finished");
                self.complete_fade(completion);
            }
        }
    }

    fn complete_fade(&mut self, completion: FadeCompletion) {
        match completion {
            FadeCompletion::None => {}
            FadeCompletion::Pause => {
                self.player.pause();
                self.state = PlaybackState::Paused;
                self.stop_progress();
                self.report_playing(false);
                self.refresh_playback_state();
                self.update_notification();
            }
            FadeCompletion::Advance => self.play_next(),
        }
    }

    fn apply_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.player.set_volume(volume);
    }

    // ===== Timers =====

    fn next_timer_generation(&mut self) -> u64 {
        self.timer_generation += 1;
        self.timer_generation
    }

    fn schedule(&self, delay: Duration, message: Internal) {
        let tx = self.internal.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Fails only once the service has ended
            let _ = tx.send(message);
        });
    }

    fn start_progress(&mut self) {
        let generation = self.next_timer_generation();
        self.progress = Some(generation);
        self.on_progress_tick(generation);
    }

    fn stop_progress(&mut self) {
        self.progress = None;
    }

    fn on_progress_tick(&mut self, generation: u64) {
        if self.progress != Some(generation) {
            trace!(generation, "Dropping stale progress tick");
            return;
        }

        if !self.player.is_playing() {
            self.progress = None;
            return;
        }

        self.emit(PlaybackEvent::ProgressChanged {
            position: self.position_ms(),
            duration: self.total_duration_ms(),
        });
        self.refresh_playback_state();

        let interval = Duration::from_millis(self.config.progress_interval_ms.max(1));
        self.schedule(interval, Internal::Timer(Timer::Progress(generation)));
    }

    fn schedule_gap(&mut self) {
        let generation = self.next_timer_generation();
        self.gap = Some(generation);

        let delay = Duration::from_millis(self.config.track_gap_ms);
        self.schedule(delay, Internal::Timer(Timer::Gap(generation)));
    }

    fn cancel_gap(&mut self) {
        if self.gap.take().is_some() {
            debug!("Cancelled pending track transition");
        }
    }

    fn on_gap_elapsed(&mut self, generation: u64) {
        if self.gap != Some(generation) {
            trace!(generation, "Dropping stale gap timer");
            return;
        }

        self.gap = None;
        self.play_next();
    }

    // ===== Artwork =====

    fn request_cover(&self, locator: String) {
        let Some(artwork) = self.artwork.clone() else {
            return;
        };

        let generation = self.playlist_generation;
        let tx = self.internal.clone();

        tokio::task::spawn_blocking(move || {
            let cover = artwork.cover_image(&locator).unwrap_or_else(|e| {
                warn!(%locator, error = %e, "Failed to load cover image");
                None
            });
            let _ = tx.send(Internal::Cover { generation, cover });
        });
    }

    fn on_cover_loaded(&mut self, generation: u64, cover: Option<CoverArt>) {
        if generation != self.playlist_generation {
            trace!(generation, "Dropping cover of a replaced playlist");
            return;
        }

        let Some(cover) = cover else {
            return;
        };

        debug!(bytes = cover.data.len(), mime_type = %cover.mime_type, "Cover image loaded");
        self.cover = Some(cover);
        self.push_metadata();
        self.update_notification();
    }

    fn request_track_artwork(&self, locator: String) {
        let generation = self.track_generation;

        let Some(artwork) = self.artwork.clone() else {
            self.emit(PlaybackEvent::MetadataChanged { cover: None });
            return;
        };

        let tx = self.internal.clone();
        tokio::task::spawn_blocking(move || {
            let cover = artwork.embedded_picture(&locator).unwrap_or_else(|e| {
                warn!(%locator, error = %e, "Failed to extract embedded picture");
                None
            });
            let _ = tx.send(Internal::TrackArtwork { generation, cover });
        });
    }

    fn on_track_artwork(&mut self, generation: u64, cover: Option<CoverArt>) {
        if generation != self.track_generation {
            trace!(generation, "Dropping artwork of a replaced track");
            return;
        }

        self.emit(PlaybackEvent::MetadataChanged {
            cover: cover.map(|c| c.to_base64()),
        });
    }

    // ===== Media session =====

    fn push_metadata(&mut self) {
        let Some(playlist) = &self.playlist else {
            return;
        };

        let metadata = SessionMetadata {
            title: playlist.title.clone(),
            duration_ms: playlist.total_duration_ms,
            cover: self.cover.clone(),
        };

        if let Err(e) = self.session.set_metadata(&metadata) {
            warn!(error = %e, "Failed to update session metadata");
        }
    }

    fn refresh_playback_state(&mut self) {
        let playing = self.player.is_playing();
        let state = SessionPlaybackState {
            playing,
            position_ms: self.position_ms(),
            speed: if playing { 1.0 } else { 0.0 },
            actions: TRANSPORT_ACTIONS.to_vec(),
        };

        if let Err(e) = self.session.set_playback_state(&state) {
            warn!(error = %e, "Failed to update session playback state");
        }
    }

    fn update_notification(&mut self) {
        let title = self
            .playlist
            .as_ref()
            .map_or_else(|| self.config.default_title.clone(), |p| p.title.clone());

        let notification = NotificationInfo {
            title,
            ongoing: self.player.is_playing(),
            cover: self.cover.clone(),
        };

        if let Err(e) = self.session.update_notification(&notification) {
            warn!(error = %e, "Failed to update notification");
        }
    }

    // ===== Helpers =====

    fn locator(&self, index: usize) -> Option<String> {
        self.playlist
            .as_ref()
            .and_then(|p| p.tracks.get(index))
            .map(|t| t.locator.clone())
    }

    fn position_ms(&self) -> u64 {
        let Some(playlist) = &self.playlist else {
            return 0;
        };

        let in_track = if self.current_index.is_some() {
            self.player.current_position_ms()
        } else {
            0
        };

        aggregate_position(
            &self.played,
            self.current_index,
            &playlist.durations(),
            in_track,
        )
    }

    fn total_duration_ms(&self) -> u64 {
        self.playlist.as_ref().map_or(0, |p| p.total_duration_ms)
    }

    fn report_playing(&mut self, is_playing: bool) {
        if self.reported_playing == Some(is_playing) {
            return;
        }

        self.reported_playing = Some(is_playing);
        self.emit(PlaybackEvent::PlayStateChanged { is_playing });
    }

    fn emit(&self, event: PlaybackEvent) {
        trace!(event = event.name(), "Emitting event");
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Release collaborators; runs at most once
    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        self.fade.cancel();
        self.stop_progress();
        self.cancel_gap();
        self.state = PlaybackState::Stopped;

        if let Err(e) = self.session.set_active(false) {
            warn!(error = %e, "Failed to deactivate media session");
        }
        if let Err(e) = self.session.release() {
            warn!(error = %e, "Failed to release media session");
        }
        self.player.release();
    }
}

impl<P, S> Drop for Orchestrator<P, S>
where
    P: PlayerAdapter,
    S: MediaSession,
{
    fn drop(&mut self) {
        self.teardown();
    }
}
