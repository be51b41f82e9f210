//! Interactive commands read from stdin, one per line

use crate::error::{CliError, Result};
use std::str::FromStr;
use tracing::warn;
use vnl_playback::{MediaButton, PlaybackError, PlaybackHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Play,
    Pause,
    Next,
    Stop,
    Toggle,
    Status,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "play" | "resume" => Ok(Self::Play),
            "pause" => Ok(Self::Pause),
            "next" | "skip" => Ok(Self::Next),
            "stop" => Ok(Self::Stop),
            "toggle" | "t" => Ok(Self::Toggle),
            "status" | "s" => Ok(Self::Status),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CliError::UnknownCommand(other.to_string())),
        }
    }
}

/// What the input loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// Apply one console command to the service
///
/// `status` prints the snapshot as a JSON line on stdout.
pub async fn execute(handle: &PlaybackHandle, command: ConsoleCommand) -> Result<Outcome> {
    match command {
        ConsoleCommand::Play => handle.play()?,
        ConsoleCommand::Pause => handle.pause()?,
        ConsoleCommand::Next => handle.next()?,
        ConsoleCommand::Toggle => handle.media_button(MediaButton::PlayPause)?,
        ConsoleCommand::Status => {
            let snapshot = handle.snapshot().await?;
            println!("{}", serde_json::to_string(&snapshot)?);
        }
        ConsoleCommand::Stop | ConsoleCommand::Quit => {
            match handle.stop() {
                Ok(()) | Err(PlaybackError::ServiceStopped) => {}
                Err(e) => warn!(error = %e, "Stop failed"),
            }
            return Ok(Outcome::Exit);
        }
    }

    Ok(Outcome::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!("play".parse::<ConsoleCommand>().unwrap(), ConsoleCommand::Play);
        assert_eq!(" PAUSE \n".parse::<ConsoleCommand>().unwrap(), ConsoleCommand::Pause);
        assert_eq!("skip".parse::<ConsoleCommand>().unwrap(), ConsoleCommand::Next);
        assert_eq!("t".parse::<ConsoleCommand>().unwrap(), ConsoleCommand::Toggle);
        assert_eq!("q".parse::<ConsoleCommand>().unwrap(), ConsoleCommand::Quit);
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert!(matches!(
            "rewind".parse::<ConsoleCommand>(),
            Err(CliError::UnknownCommand(c)) if c == "rewind"
        ));
    }
}
