//! Playback coordinator operations
//!
//! Every operation updates the model synchronously. The engine is driven
//! through the session host; its notifications are picked up later by
//! [`AppController::poll_engine`].

use std::sync::Arc;

use crate::model::{EngineStatus, Track};

use super::AppController;

impl AppController {
    /// Play `track`. If it is already loaded, resume where it is instead of
    /// reloading.
    pub fn load_and_play(&mut self, track: Arc<Track>) {
        if self.model.playlist.is_empty() {
            return;
        }
        let playback = &self.model.playback;
        if playback.is_loaded(&track) && playback.status != EngineStatus::Ended {
            tracing::debug!(track = %track.title, "Track already loaded, resuming");
            self.model.select_current_song();
            self.resume();
            return;
        }
        self.start_track(track, true);
    }

    pub fn toggle_play_pause(&mut self) {
        let Some(current) = self.model.playback.current.clone() else {
            return;
        };
        if self.model.playback.status == EngineStatus::Ended {
            self.start_track(current, true);
        } else if self.model.playback.is_playing() {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Next entry in the active ordering, wrapping after the last.
    /// Starts the first entry when nothing is current.
    pub fn skip_next(&mut self) {
        let target = match self.current_position() {
            Some(position) => self.model.playlist.next_position(position),
            None => Some(0),
        };
        if let Some(track) = target.and_then(|p| self.model.playlist.get(p).cloned()) {
            tracing::debug!(track = %track.title, "Skipping to next track");
            self.start_track(track, true);
        }
    }

    /// Previous entry, wrapping before the first. Past the restart threshold
    /// the current track starts over instead.
    pub fn skip_previous(&mut self) {
        if self.model.playlist.is_empty() {
            return;
        }
        let position = self.model.playback.timing.current_position();
        if position > self.restart_threshold
            && let Some(current) = self.model.playback.current.clone()
        {
            tracing::debug!(track = %current.title, "Restarting current track");
            self.start_track(current, true);
            return;
        }

        let target = match self.current_position() {
            Some(position) => self.model.playlist.previous_position(position),
            None => self.model.playlist.len().checked_sub(1),
        };
        if let Some(track) = target.and_then(|p| self.model.playlist.get(p).cloned()) {
            tracing::debug!(track = %track.title, "Skipping to previous track");
            self.start_track(track, true);
        }
    }

    pub fn cycle_repeat_mode(&mut self) {
        if self.model.playlist.is_empty() {
            return;
        }
        let repeat = self.model.playback.repeat.cycle();
        self.model.playback.repeat = repeat;
        tracing::info!(?repeat, "Repeat mode changed");
        self.model.show_notice(repeat.label());
    }

    pub fn toggle_shuffle(&mut self) {
        if self.model.playlist.is_empty() {
            return;
        }
        let enabled = if self.model.playlist.is_shuffled() {
            self.model.playlist.unshuffle();
            false
        } else {
            self.model.playlist.shuffle();
            true
        };

        if self.model.playback.current.is_some() {
            self.model.select_current_song();
        } else {
            self.model.ui.song_selected = 0;
        }
        tracing::info!(enabled, "Shuffle toggled");
        self.model
            .show_notice(if enabled { "Shuffle on" } else { "Shuffle off" });
    }

    /// Seek to `fraction` of the current track's duration
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        if fraction.is_nan() {
            return;
        }
        let Some(current) = self.model.playback.current.clone() else {
            return;
        };
        let Some(duration) = self.model.playback.timing.duration.filter(|d| !d.is_zero()) else {
            return;
        };
        let target = duration.mul_f64(fraction.clamp(0.0, 1.0));

        // An ended source has nothing left to seek in; load it again paused.
        if self.model.playback.status == EngineStatus::Ended && !self.start_track(current, false) {
            return;
        }

        if let Err(e) = self.session.engine().seek(target) {
            tracing::error!(error = %e, "Seek failed");
            self.model.set_error(Self::format_error(&e));
            return;
        }
        tracing::debug!(position_ms = target.as_millis() as u64, "Seeked");
        let is_playing = self.model.playback.is_playing();
        self.model.playback.timing.update_position(target, is_playing);
    }

    /// Refresh the position from the engine and handle its notifications
    pub fn poll_engine(&mut self) {
        let events = self.session.engine().poll_events();
        for event in events {
            self.dispatch_engine_event(event);
        }

        let playback = &self.model.playback;
        if playback.current.is_some() && playback.status != EngineStatus::Ended {
            let position = self.session.engine().position();
            let is_playing = playback.is_playing();
            self.model.playback.timing.update_position(position, is_playing);
        }
    }

    pub fn on_progress_tick(&mut self) {
        self.poll_engine();
    }

    /// Replace the engine source with `track` and start it from zero.
    /// Returns false when the engine could not load it.
    pub(crate) fn start_track(&mut self, track: Arc<Track>, autoplay: bool) -> bool {
        let load_id = match self.session.engine().load(&track.source) {
            Ok(load_id) => load_id,
            Err(e) => {
                tracing::error!(error = %e, path = %track.source.display(), "Failed to load track");
                self.model.set_error(Self::format_error(&e));
                return false;
            }
        };

        tracing::info!(track = %track.title, artist = %track.artist, load_id, "Track loaded");
        self.load_id = Some(load_id);
        let playback = &mut self.model.playback;
        playback.status = EngineStatus::Idle;
        playback.timing.reset(track.duration);
        playback.timing.is_playing = false;
        playback.current = Some(track);
        self.model.select_current_song();

        if autoplay {
            self.resume();
        } else {
            self.ticker.stop();
            self.publish_now_playing();
        }
        true
    }

    pub(crate) fn resume(&mut self) {
        self.session.engine().play();
        self.model.playback.timing.set_playing(true);
        self.ticker.start();
        self.publish_now_playing();
    }

    pub(crate) fn pause(&mut self) {
        self.session.engine().pause();
        let position = self.session.engine().position();
        self.model.playback.timing.update_position(position, false);
        self.ticker.stop();
        self.publish_now_playing();
    }

    /// Halt at the end of the current track without advancing
    pub(crate) fn stop_at_end(&mut self) {
        self.session.engine().pause();
        let timing = &mut self.model.playback.timing;
        let end = timing.duration.unwrap_or_else(|| timing.current_position());
        timing.update_position(end, false);
        self.model.playback.status = EngineStatus::Ended;
        self.ticker.stop();
        self.publish_now_playing();
    }

    /// Drop the current track, e.g. before the catalog is replaced
    pub(crate) fn halt(&mut self) {
        self.session.engine().pause();
        self.load_id = None;
        self.ticker.stop();
    }

    fn current_position(&self) -> Option<usize> {
        self.model
            .playback
            .current
            .as_ref()
            .and_then(|track| self.model.playlist.position_of(track.id))
    }
}
