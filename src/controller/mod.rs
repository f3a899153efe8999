//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and the playback engine, and reacts to
//! engine notifications. It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `mouse`: Mouse hit-testing for the list, gauge and bubble
//! - `playback`: Playback coordinator operations
//! - `library`: Catalog scans and permission grants
//! - `player_events`: Engine notification dispatch
//! - `ticker`: Periodic progress updates

mod input;
mod library;
mod mouse;
mod playback;
mod player_events;
mod ticker;

use std::io;
use std::time::Duration;

use ratatui::layout::Position;

use crate::audio::LoadId;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::model::AppModel;
use crate::session::{RemoteCommand, SessionHost};

use ticker::ProgressTicker;

pub struct AppController {
    pub(crate) model: AppModel,
    pub(crate) session: SessionHost,
    pub(crate) ticker: ProgressTicker,
    catalog: Catalog,
    restart_threshold: Duration,
    bubble_origin: Position,
    /// Load generation of the current track; events from older loads are stale
    load_id: Option<LoadId>,
}

impl AppController {
    pub fn new(model: AppModel, session: SessionHost, catalog: Catalog, config: &Config) -> Self {
        Self {
            model,
            session,
            ticker: ProgressTicker::new(config.playback.progress_interval),
            catalog,
            restart_threshold: config.playback.restart_threshold,
            bubble_origin: Position::new(config.bubble.x, config.bubble.y),
            load_id: None,
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn should_quit(&self) -> bool {
        self.model.should_quit()
    }

    /// Apply the grants known at startup and ask about the rest
    pub fn start(&mut self) {
        self.apply_grants();
        self.model.permissions.prompt = self.model.permissions.next_undetermined();
    }

    pub fn handle_remote_command(&mut self, command: RemoteCommand) {
        tracing::info!(?command, "Handling remote command");
        match command {
            RemoteCommand::TogglePlayPause => self.toggle_play_pause(),
            RemoteCommand::Next => self.skip_next(),
        }
    }

    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.model.set_screen(width, height);
    }

    /// Wait for the next progress tick; pending forever while stopped
    pub async fn next_tick(&mut self) {
        self.ticker.tick().await;
    }

    /// Stop playback and release the engine before the terminal is restored
    pub fn shutdown(&mut self) {
        self.ticker.stop();
        self.load_id = None;
        self.session.stop();
    }

    pub(crate) fn publish_now_playing(&mut self) {
        let is_playing = self.model.playback.is_playing();
        self.session
            .publish(self.model.playback.current.as_deref(), is_playing);
    }

    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        let io_kind = error
            .chain()
            .find_map(|cause| cause.downcast_ref::<io::Error>())
            .map(io::Error::kind);

        match io_kind {
            Some(io::ErrorKind::NotFound) => {
                "File not found. Press F5 to rescan the library.".to_string()
            }
            Some(io::ErrorKind::PermissionDenied) => {
                "Permission denied while reading the file.".to_string()
            }
            _ => format!("Error: {}", error),
        }
    }
}
