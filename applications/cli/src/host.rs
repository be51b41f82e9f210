//! Wires the orchestrator to the terminal
//!
//! Events go to stdout as JSON lines; logs go to stderr.

use crate::args::PlayArgs;
use crate::config::AppConfig;
use crate::console::{self, ConsoleCommand, Outcome};
use crate::error::Result;
use crate::player::SimulatedPlayer;
use crate::session::LoggingSession;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use vnl_artwork::ArtworkExtractor;
use vnl_playback::{PlaybackEvent, PlaybackHandle, PlaybackService};

/// Spawn a playback service with the simulated player
pub fn spawn_service(config: &AppConfig, args: &PlayArgs) -> PlaybackHandle {
    let player = SimulatedPlayer::new(config.simulation.clone(), args.track_lengths());
    let mut service = PlaybackService::new(config.playback.clone(), player, LoggingSession::new());

    if config.artwork.enabled {
        service = service.with_artwork(Arc::new(ArtworkExtractor::new(config.artwork.cache_size)));
    }

    service.spawn()
}

/// Print every event as a JSON line until the service ends
pub fn spawn_event_printer(mut events: broadcast::Receiver<PlaybackEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(line) => println!("{}", line),
                    Err(e) => warn!(error = %e, "Failed to serialize event"),
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event printer fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// Run the `play` command until stdin closes, `quit`, or Ctrl-C
pub async fn run_play(config: AppConfig, args: PlayArgs) -> Result<()> {
    let handle = spawn_service(&config, &args);
    let printer = spawn_event_printer(handle.subscribe());

    handle.load_playlist(args.to_request())?;
    info!(tracks = args.tracks.len(), "Playlist loaded, reading commands from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let command = tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) if line.trim().is_empty() => None,
                Some(line) => match line.parse::<ConsoleCommand>() {
                    Ok(command) => Some(command),
                    Err(e) => {
                        warn!(error = %e, "Ignoring input");
                        None
                    }
                },
                None => {
                    debug!("Input closed");
                    Some(ConsoleCommand::Quit)
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                Some(ConsoleCommand::Quit)
            }
        };

        let Some(command) = command else {
            continue;
        };

        match console::execute(&handle, command).await {
            Ok(Outcome::Exit) => break,
            Ok(Outcome::Continue) => {}
            Err(e) => {
                warn!(error = %e, "Command failed");
                if handle.is_stopped() {
                    break;
                }
            }
        }
    }

    drop(handle);
    if tokio::time::timeout(Duration::from_secs(1), printer).await.is_err() {
        debug!("Event printer did not finish in time");
    }

    info!("Bye");
    Ok(())
}
