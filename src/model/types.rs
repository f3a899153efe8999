//! Core type definitions for the application

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Identifier of a catalog entry, unique within one catalog scan
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub u32);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the artwork for a track can be found
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Artwork {
    /// Picture embedded in the audio file's tags
    Embedded,
    /// Cover image next to the audio file
    File(PathBuf),
}

/// A playable catalog entry. Immutable once built by the catalog scan.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub artwork: Option<Artwork>,
    pub source: PathBuf,
    pub duration: Option<Duration>,
}

/// Repeat mode state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RepeatMode {
    #[default]
    Off,
    All,
    One,
}

impl RepeatMode {
    /// Off → All → One → Off
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RepeatMode::Off => "Repeat off",
            RepeatMode::All => "Repeat all",
            RepeatMode::One => "Repeat one",
        }
    }
}

/// Which section of the UI is currently focused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveSection {
    Search,
    #[default]
    Songs,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Songs,
            ActiveSection::Songs => ActiveSection::Search,
        }
    }
}

/// A transient message shown for a fixed time
#[derive(Clone, Debug)]
pub struct Notice {
    pub message: String,
    pub shown_at: Instant,
    pub ttl: Duration,
}

impl Notice {
    pub fn new(message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            shown_at: Instant::now(),
            ttl,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.shown_at + self.ttl
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.deadline()
    }
}

/// UI state for the application
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    /// Selected row in the song list (index into the active ordering)
    pub song_selected: usize,
    /// Selected row in the search results overlay
    pub search_selected: usize,
    pub error: Option<Notice>,
    pub notice: Option<Notice>,
    pub show_help_popup: bool,
    /// Terminal size as of the last draw or resize event
    pub screen: (u16, u16),
}
