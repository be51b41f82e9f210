//! Media session that writes to the log
//!
//! A terminal has no lock screen; metadata and notification updates are
//! logged instead, playback-state refreshes (one per progress tick) at debug.

use tracing::{debug, info};
use vnl_playback::{
    MediaSession, NotificationInfo, Result, SessionMetadata, SessionPlaybackState,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSession;

impl LoggingSession {
    pub fn new() -> Self {
        Self
    }
}

impl MediaSession for LoggingSession {
    fn set_metadata(&mut self, metadata: &SessionMetadata) -> Result<()> {
        info!(
            title = %metadata.title,
            duration_ms = metadata.duration_ms,
            cover = metadata.cover.as_ref().map(|c| c.mime_type.as_str()),
            "Session metadata"
        );
        Ok(())
    }

    fn set_playback_state(&mut self, state: &SessionPlaybackState) -> Result<()> {
        debug!(
            playing = state.playing,
            position_ms = state.position_ms,
            speed = state.speed,
            "Session playback state"
        );
        Ok(())
    }

    fn update_notification(&mut self, notification: &NotificationInfo) -> Result<()> {
        debug!(
            title = %notification.title,
            ongoing = notification.ongoing,
            "Notification"
        );
        Ok(())
    }

    fn set_active(&mut self, active: bool) -> Result<()> {
        info!(active, "Session activation changed");
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        debug!("Session released");
        Ok(())
    }
}
