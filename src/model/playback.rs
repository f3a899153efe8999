//! Playback-related types and state management

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::types::{RepeatMode, Track};

/// Last lifecycle state reported by the engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EngineStatus {
    #[default]
    Idle,
    Ready,
    Ended,
}

/// Timing state for the progress bar.
///
/// Between engine updates the position is extrapolated from the wall clock
/// while playing.
#[derive(Clone, Debug)]
pub struct PlaybackTiming {
    pub position: Duration,
    pub last_update: Instant,
    pub is_playing: bool,
    pub duration: Option<Duration>,
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            position: Duration::ZERO,
            last_update: Instant::now(),
            is_playing: false,
            duration: None,
        }
    }
}

impl PlaybackTiming {
    pub fn current_position(&self) -> Duration {
        let position = if self.is_playing {
            self.position + self.last_update.elapsed()
        } else {
            self.position
        };
        match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        }
    }

    pub fn update_position(&mut self, position: Duration, is_playing: bool) {
        self.position = position;
        self.is_playing = is_playing;
        self.last_update = Instant::now();
    }

    pub fn set_playing(&mut self, is_playing: bool) {
        self.position = self.current_position();
        self.is_playing = is_playing;
        self.last_update = Instant::now();
    }

    pub fn reset(&mut self, duration: Option<Duration>) {
        self.position = Duration::ZERO;
        self.duration = duration;
        self.last_update = Instant::now();
    }

    /// Played fraction in `[0, 1]`, zero when the duration is unknown
    pub fn ratio(&self) -> f64 {
        match self.duration {
            Some(duration) if !duration.is_zero() => {
                (self.current_position().as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }
}

/// Everything the coordinator knows about what is playing
#[derive(Clone, Debug, Default)]
pub struct PlaybackState {
    pub current: Option<Arc<Track>>,
    pub timing: PlaybackTiming,
    pub repeat: RepeatMode,
    pub status: EngineStatus,
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.timing.is_playing
    }

    pub fn is_loaded(&self, track: &Track) -> bool {
        self.current
            .as_ref()
            .is_some_and(|current| current.source == track.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_position_does_not_advance() {
        let mut timing = PlaybackTiming::default();
        timing.duration = Some(Duration::from_secs(100));
        timing.update_position(Duration::from_secs(10), false);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(timing.current_position(), Duration::from_secs(10));
    }

    #[test]
    fn playing_position_is_capped_at_duration() {
        let mut timing = PlaybackTiming::default();
        timing.duration = Some(Duration::from_secs(1));
        timing.update_position(Duration::from_secs(5), true);
        assert_eq!(timing.current_position(), Duration::from_secs(1));
    }

    #[test]
    fn ratio_is_zero_without_duration() {
        let mut timing = PlaybackTiming::default();
        timing.update_position(Duration::from_secs(5), false);
        assert_eq!(timing.ratio(), 0.0);

        timing.duration = Some(Duration::from_secs(20));
        assert_eq!(timing.ratio(), 0.25);
    }
}
