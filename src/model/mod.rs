//! Model module - Application state and data types
//!
//! - `types`: Core type definitions (tracks, repeat mode, UI state)
//! - `playlist`: Canonical and shuffled track ordering
//! - `playback`: Playback-related state (current track, timing, engine status)
//! - `search`: Search filter over the catalog
//! - `overlay`: Floating bubble state machine and positions
//! - `permissions`: Library and overlay grants
//! - `app_model`: Main application model with state management methods

mod types;
mod playlist;
mod playback;
mod search;
mod overlay;
mod permissions;
mod app_model;

pub use types::{ActiveSection, Artwork, Notice, RepeatMode, Track, TrackId};

pub use playlist::Playlist;

pub use playback::{EngineStatus, PlaybackState};

pub use overlay::{BubbleState, Overlay, StripButton};

pub use permissions::{Grant, Permission, Permissions, MEDIA_DENIED, OVERLAY_DENIED};

pub use app_model::{AppModel, LibraryStatus};

#[cfg(test)]
pub(crate) use playlist::tests as fixtures;
