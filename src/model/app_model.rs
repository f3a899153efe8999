//! Main application model with state management

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::overlay::Overlay;
use super::permissions::Permissions;
use super::playback::PlaybackState;
use super::playlist::Playlist;
use super::search::{self, SearchView};
use super::types::{ActiveSection, Notice, Track, UiState};

const ERROR_TTL: Duration = Duration::from_secs(5);
const NOTICE_TTL: Duration = Duration::from_secs(2);

/// Outcome of the last library scan
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum LibraryStatus {
    #[default]
    NotScanned,
    Ready,
    Failed(String),
}

/// Main application model containing all state.
///
/// Owned by the controller and only touched from the event loop.
#[derive(Debug, Default)]
pub struct AppModel {
    pub playlist: Playlist,
    pub playback: PlaybackState,
    pub search: SearchView,
    pub ui: UiState,
    pub permissions: Permissions,
    /// Present only while the overlay permission is granted
    pub overlay: Option<Overlay>,
    pub library: LibraryStatus,
    should_quit: bool,
}

impl AppModel {
    pub fn new(permissions: Permissions) -> Self {
        Self {
            permissions,
            ..Default::default()
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self, quit: bool) {
        self.should_quit = quit;
    }

    // ========================================================================
    // Catalog & Playlist
    // ========================================================================

    /// Replace the catalog. Nothing is current afterwards.
    pub fn set_catalog(&mut self, tracks: Vec<Arc<Track>>) {
        self.playlist = Playlist::new(tracks);
        self.playback = PlaybackState {
            repeat: self.playback.repeat,
            ..Default::default()
        };
        self.ui.song_selected = 0;
        self.library = LibraryStatus::Ready;
        self.refresh_search();
    }

    pub fn clear_catalog(&mut self, status: LibraryStatus) {
        self.playlist = Playlist::default();
        self.playback = PlaybackState {
            repeat: self.playback.repeat,
            ..Default::default()
        };
        self.ui.song_selected = 0;
        self.library = status;
        self.refresh_search();
    }

    pub fn selected_song(&self) -> Option<Arc<Track>> {
        self.playlist.get(self.ui.song_selected).cloned()
    }

    /// Move the list selection onto the current track
    pub fn select_current_song(&mut self) {
        if let Some(position) = self
            .playback
            .current
            .as_ref()
            .and_then(|track| self.playlist.position_of(track.id))
        {
            self.ui.song_selected = position;
        }
    }

    pub fn move_selection_up(&mut self) {
        match self.ui.active_section {
            ActiveSection::Songs => {
                self.ui.song_selected = self.ui.song_selected.saturating_sub(1);
            }
            ActiveSection::Search => {
                self.ui.search_selected = self.ui.search_selected.saturating_sub(1);
            }
        }
    }

    pub fn move_selection_down(&mut self) {
        match self.ui.active_section {
            ActiveSection::Songs => {
                if self.ui.song_selected < self.playlist.len().saturating_sub(1) {
                    self.ui.song_selected += 1;
                }
            }
            ActiveSection::Search => {
                if self.ui.search_selected < self.search.tracks().len().saturating_sub(1) {
                    self.ui.search_selected += 1;
                }
            }
        }
    }

    pub fn set_active_section(&mut self, section: ActiveSection) {
        self.ui.active_section = section;
    }

    pub fn cycle_section(&mut self) {
        self.ui.active_section = self.ui.active_section.next();
    }

    // ========================================================================
    // Search
    // ========================================================================

    pub fn append_to_search(&mut self, c: char) {
        self.ui.search_query.push(c);
        self.refresh_search();
    }

    pub fn backspace_search(&mut self) {
        self.ui.search_query.pop();
        self.refresh_search();
    }

    pub fn clear_search(&mut self) {
        self.ui.search_query.clear();
        self.refresh_search();
    }

    fn refresh_search(&mut self) {
        self.search = search::filter(self.playlist.canonical(), &self.ui.search_query);
        self.ui.search_selected = 0;
    }

    pub fn selected_search_result(&self) -> Option<Arc<Track>> {
        self.search.tracks().get(self.ui.search_selected).cloned()
    }

    // ========================================================================
    // Errors, notices, popups
    // ========================================================================

    pub fn set_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(message = %message, "Showing error");
        self.ui.error = Some(Notice::new(message, ERROR_TTL));
    }

    pub fn clear_error(&mut self) {
        self.ui.error = None;
    }

    pub fn has_error(&self) -> bool {
        self.ui.error.is_some()
    }

    pub fn show_notice(&mut self, message: impl Into<String>) {
        self.ui.notice = Some(Notice::new(message, NOTICE_TTL));
    }

    pub fn auto_clear_expired(&mut self, now: Instant) {
        if self.ui.error.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.ui.error = None;
        }
        if self.ui.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.ui.notice = None;
        }
    }

    /// Earliest moment an error or notice should disappear
    pub fn next_expiry(&self) -> Option<Instant> {
        [self.ui.error.as_ref(), self.ui.notice.as_ref()]
            .into_iter()
            .flatten()
            .map(Notice::deadline)
            .min()
    }

    pub fn toggle_help_popup(&mut self) {
        self.ui.show_help_popup = !self.ui.show_help_popup;
    }

    pub fn is_help_popup_open(&self) -> bool {
        self.ui.show_help_popup
    }

    pub fn set_screen(&mut self, width: u16, height: u16) {
        self.ui.screen = (width, height);
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.resize(width, height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::playlist::tests::{sample_tracks, track};

    #[test]
    fn set_catalog_clears_current_and_keeps_repeat() {
        let mut model = AppModel::default();
        model.playback.repeat = crate::model::RepeatMode::All;
        model.playback.current = Some(track(9, "Old", "Someone"));

        model.set_catalog(sample_tracks(3));

        assert!(model.playback.current.is_none());
        assert_eq!(model.playback.repeat, crate::model::RepeatMode::All);
        assert_eq!(model.library, LibraryStatus::Ready);
        assert_eq!(model.playlist.len(), 3);
    }

    #[test]
    fn typing_updates_search_results() {
        let mut model = AppModel::default();
        model.set_catalog(sample_tracks(12));

        assert!(!model.search.is_visible());
        model.append_to_search('1');
        assert!(model.search.is_visible());
        // titles 1, 10, 11 plus "Artist 1" on 4 and 7
        assert_eq!(model.search.tracks().len(), 5);

        model.backspace_search();
        assert!(!model.search.is_visible());
    }

    #[test]
    fn selection_is_bounded() {
        let mut model = AppModel::default();
        model.set_catalog(sample_tracks(2));

        model.move_selection_up();
        assert_eq!(model.ui.song_selected, 0);
        model.move_selection_down();
        model.move_selection_down();
        assert_eq!(model.ui.song_selected, 1);
    }

    #[test]
    fn expired_messages_are_cleared() {
        let mut model = AppModel::default();
        model.set_error("boom");
        model.show_notice("Shuffle on");

        let notice_deadline = model.ui.notice.as_ref().unwrap().deadline();
        assert_eq!(model.next_expiry(), Some(notice_deadline));

        model.auto_clear_expired(notice_deadline);
        assert!(model.ui.notice.is_none());
        assert!(model.has_error());

        model.auto_clear_expired(notice_deadline + ERROR_TTL);
        assert!(!model.has_error());
    }
}
