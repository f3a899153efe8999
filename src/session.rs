//! Foreground session: keeps the engine alive and publishes what is playing
//!
//! The host owns the playback engine for the lifetime of the process. A
//! persistent status line ("notification") is published through a
//! [`Notifier`]; in a terminal that is the window title. External controllers
//! reach the player through Unix signals, which are turned into
//! [`RemoteCommand`]s on a channel drained by the event loop.

use std::io;

use crossterm::{execute, terminal::SetTitle};
use tokio::sync::mpsc;

use crate::audio::PlaybackEngine;
use crate::model::Track;

const APP_TITLE: &str = "bubble-player";

/// Commands arriving from outside the terminal UI
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoteCommand {
    TogglePlayPause,
    Next,
}

/// Destination of the persistent now-playing line
pub trait Notifier {
    fn publish(&mut self, line: &str);
    fn clear(&mut self);
}

/// Writes the now-playing line into the terminal title
#[derive(Debug, Default)]
pub struct TerminalTitle;

impl Notifier for TerminalTitle {
    fn publish(&mut self, line: &str) {
        let title = format!("{APP_TITLE} - {line}");
        if let Err(e) = execute!(io::stdout(), SetTitle(title)) {
            tracing::warn!(error = %e, "Failed to set terminal title");
        }
    }

    fn clear(&mut self) {
        if let Err(e) = execute!(io::stdout(), SetTitle("")) {
            tracing::warn!(error = %e, "Failed to reset terminal title");
        }
    }
}

pub struct SessionHost {
    engine: Box<dyn PlaybackEngine>,
    notifier: Box<dyn Notifier>,
    published: Option<String>,
    running: bool,
}

impl SessionHost {
    /// Take ownership of the engine and publish the initial notification
    pub fn start(engine: Box<dyn PlaybackEngine>, notifier: Box<dyn Notifier>) -> Self {
        let mut host = Self {
            engine,
            notifier,
            published: None,
            running: true,
        };
        host.publish(None, false);
        tracing::info!("Session started");
        host
    }

    pub fn engine(&mut self) -> &mut dyn PlaybackEngine {
        self.engine.as_mut()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Republish the notification if the now-playing line changed
    pub fn publish(&mut self, track: Option<&Track>, is_playing: bool) {
        if !self.is_running() {
            return;
        }
        let line = now_playing_line(track, is_playing);
        if self.published.as_deref() == Some(line.as_str()) {
            return;
        }
        tracing::debug!(line = %line, "Publishing now playing");
        self.notifier.publish(&line);
        self.published = Some(line);
    }

    /// Release the engine and clear the notification. Idempotent.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.running = false;
        self.engine.release();
        self.notifier.clear();
        self.published = None;
        tracing::info!("Session stopped");
    }
}

impl Drop for SessionHost {
    fn drop(&mut self) {
        self.stop();
    }
}

pub fn now_playing_line(track: Option<&Track>, is_playing: bool) -> String {
    match track {
        None => "Nothing playing".to_string(),
        Some(track) => {
            let icon = if is_playing { "▶" } else { "⏸" };
            format!("{icon} {} - {}", track.title, track.artist)
        }
    }
}

/// Forward SIGUSR1 (play/pause) and SIGUSR2 (next) into `tx`
#[cfg(unix)]
pub fn spawn_remote_listener(tx: mpsc::UnboundedSender<RemoteCommand>) -> anyhow::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut toggle = signal(SignalKind::user_defined1())?;
    let mut next = signal(SignalKind::user_defined2())?;

    tokio::spawn(async move {
        loop {
            let command = tokio::select! {
                Some(()) = toggle.recv() => RemoteCommand::TogglePlayPause,
                Some(()) = next.recv() => RemoteCommand::Next,
                else => break,
            };
            tracing::debug!(?command, "Remote command received");
            if tx.send(command).is_err() {
                break;
            }
        }
        tracing::debug!("Remote listener shutting down");
    });
    Ok(())
}

#[cfg(not(unix))]
pub fn spawn_remote_listener(_tx: mpsc::UnboundedSender<RemoteCommand>) -> anyhow::Result<()> {
    tracing::info!("Remote commands are not supported on this platform");
    Ok(())
}
