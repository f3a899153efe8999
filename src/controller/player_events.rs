//! Engine notification dispatch
//!
//! [`transition`] decides what an engine event means for the coordinator;
//! [`AppController::dispatch_engine_event`] carries it out.

use std::time::Duration;

use crate::audio::{EngineEvent, EngineEventKind};
use crate::model::{EngineStatus, RepeatMode};

use super::AppController;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reaction {
    /// Source decoded; record its duration if the engine knows it
    MarkReady(Option<Duration>),
    /// Play the current track again from zero
    Restart,
    /// Move to the next entry, wrapping after the last
    Advance,
    /// Stay on the current track, not playing, at its end
    Stop,
    /// Engine switched to the newly loaded source; state was set on load
    Transitioned,
}

pub fn transition(kind: EngineEventKind, repeat: RepeatMode, on_last: bool) -> Reaction {
    match (kind, repeat) {
        (EngineEventKind::Ready { duration }, _) => Reaction::MarkReady(duration),
        (EngineEventKind::ItemTransitioned, _) => Reaction::Transitioned,
        (EngineEventKind::Ended, RepeatMode::One) => Reaction::Restart,
        (EngineEventKind::Ended, RepeatMode::All) => Reaction::Advance,
        (EngineEventKind::Ended, RepeatMode::Off) if on_last => Reaction::Stop,
        (EngineEventKind::Ended, RepeatMode::Off) => Reaction::Advance,
    }
}

impl AppController {
    pub fn dispatch_engine_event(&mut self, event: EngineEvent) {
        if self.load_id != Some(event.load_id) {
            tracing::debug!(
                load_id = event.load_id,
                current = ?self.load_id,
                kind = ?event.kind,
                "Ignoring stale engine event"
            );
            return;
        }

        let repeat = self.model.playback.repeat;
        let on_last = self
            .model
            .playback
            .current
            .as_ref()
            .and_then(|track| self.model.playlist.position_of(track.id))
            .is_some_and(|position| self.model.playlist.is_last(position));

        let reaction = transition(event.kind, repeat, on_last);
        tracing::debug!(kind = ?event.kind, ?repeat, on_last, ?reaction, "Engine event");

        match reaction {
            Reaction::MarkReady(duration) => {
                self.model.playback.status = EngineStatus::Ready;
                if duration.is_some() {
                    self.model.playback.timing.duration = duration;
                }
            }
            Reaction::Restart => {
                if let Some(current) = self.model.playback.current.clone() {
                    self.start_track(current, true);
                }
            }
            Reaction::Advance => {
                // Stays stopped on the ended track if the next load fails.
                self.stop_at_end();
                self.skip_next();
            }
            Reaction::Stop => {
                tracing::info!("Reached end of playlist");
                self.stop_at_end();
            }
            Reaction::Transitioned => {
                tracing::trace!(load_id = event.load_id, "Engine switched source");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::harness;
    use super::*;
    use crate::audio::fake::FAKE_DURATION;

    #[test]
    fn ended_reaction_depends_on_repeat_and_position() {
        let ended = EngineEventKind::Ended;
        assert_eq!(transition(ended, RepeatMode::One, true), Reaction::Restart);
        assert_eq!(transition(ended, RepeatMode::All, true), Reaction::Advance);
        assert_eq!(transition(ended, RepeatMode::Off, false), Reaction::Advance);
        assert_eq!(transition(ended, RepeatMode::Off, true), Reaction::Stop);
        assert_eq!(
            transition(EngineEventKind::ItemTransitioned, RepeatMode::Off, false),
            Reaction::Transitioned
        );
    }

    #[tokio::test]
    async fn item_transition_leaves_playback_untouched() {
        let mut h = harness(3);
        h.controller.skip_next();
        h.controller.poll_engine();
        let load = h.engine.current_load();
        h.engine.clear_calls();

        h.engine.emit(load, EngineEventKind::ItemTransitioned);
        h.controller.poll_engine();

        let playback = &h.controller.model.playback;
        assert_eq!(playback.current.as_ref().unwrap().id.0, 0);
        assert_eq!(playback.status, EngineStatus::Ready);
        assert!(playback.is_playing());
        assert!(h.engine.loads().is_empty());
    }

    #[tokio::test]
    async fn repeat_one_restarts_current_track() {
        let mut h = harness(3);
        h.controller.model.playback.repeat = RepeatMode::One;
        h.controller.skip_next();
        h.controller.poll_engine();

        h.engine.finish_current();
        h.controller.poll_engine();

        assert_eq!(h.controller.model.playback.current.as_ref().unwrap().id.0, 0);
        assert_eq!(h.engine.loads().len(), 2);
        assert!(h.controller.model.playback.is_playing());
    }

    #[tokio::test]
    async fn repeat_all_wraps_from_last_to_first() {
        let mut h = harness(3);
        h.controller.model.playback.repeat = RepeatMode::All;
        h.controller.skip_previous();
        assert_eq!(h.controller.model.playback.current.as_ref().unwrap().id.0, 2);

        h.engine.finish_current();
        h.controller.poll_engine();

        assert_eq!(h.controller.model.playback.current.as_ref().unwrap().id.0, 0);
        assert!(h.controller.model.playback.is_playing());
    }

    #[tokio::test]
    async fn repeat_off_advances_then_stops_at_last() {
        let mut h = harness(2);
        h.controller.skip_next();

        h.engine.finish_current();
        h.controller.poll_engine();
        assert_eq!(h.controller.model.playback.current.as_ref().unwrap().id.0, 1);

        h.engine.finish_current();
        h.controller.poll_engine();

        let playback = &h.controller.model.playback;
        assert_eq!(playback.current.as_ref().unwrap().id.0, 1);
        assert!(!playback.is_playing());
        assert_eq!(playback.status, EngineStatus::Ended);
        assert_eq!(playback.timing.current_position(), FAKE_DURATION);
        assert!(!h.controller.ticker.is_running());
    }

    #[tokio::test]
    async fn play_after_end_starts_over() {
        let mut h = harness(1);
        h.controller.skip_next();
        h.engine.finish_current();
        h.controller.poll_engine();
        assert_eq!(h.controller.model.playback.status, EngineStatus::Ended);

        h.controller.toggle_play_pause();

        assert_eq!(h.engine.loads().len(), 2);
        assert!(h.controller.model.playback.is_playing());
    }

    #[tokio::test]
    async fn events_from_superseded_load_are_ignored() {
        let mut h = harness(3);
        h.controller.skip_next();
        let old_load = h.engine.current_load();
        h.controller.skip_next();

        h.engine.emit(old_load, EngineEventKind::Ended);
        h.controller.poll_engine();

        assert_eq!(h.controller.model.playback.current.as_ref().unwrap().id.0, 1);
        assert_eq!(h.engine.loads().len(), 2);
        assert!(h.controller.model.playback.is_playing());
    }
}
