//! Audio module - the playback engine boundary
//!
//! The coordinator talks to audio output only through [`PlaybackEngine`].
//! An engine plays one source at a time; ordering, repeat and shuffle are
//! decided by the coordinator. Engines report lifecycle changes as
//! [`EngineEvent`]s tagged with the load that produced them, which lets the
//! coordinator drop notifications about a source it has already replaced.

mod output;

#[cfg(test)]
pub mod fake;

use std::path::Path;
use std::time::Duration;

pub use output::RodioEngine;

/// Identifies one `load` call on an engine
pub type LoadId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineEventKind {
    /// The source is decoded and can play
    Ready { duration: Option<Duration> },
    /// The engine switched to a new item
    ItemTransitioned,
    /// The item played to its end
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineEvent {
    pub load_id: LoadId,
    pub kind: EngineEventKind,
}

pub trait PlaybackEngine {
    /// Replace the loaded source. The new source is paused at zero until
    /// [`play`](Self::play) is called.
    fn load(&mut self, source: &Path) -> anyhow::Result<LoadId>;

    fn play(&mut self);

    fn pause(&mut self);

    fn seek(&mut self, position: Duration) -> anyhow::Result<()>;

    fn position(&self) -> Duration;

    /// Length of the loaded source, when the decoder knows it
    fn duration(&self) -> Option<Duration>;

    /// Drain notifications produced since the last call
    fn poll_events(&mut self) -> Vec<EngineEvent>;

    /// Stop output and drop the loaded source
    fn release(&mut self);
}
