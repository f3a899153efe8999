//! Mouse handling: bubble gestures, strip buttons, list rows and the gauge

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::model::{ActiveSection, StripButton};
use crate::view::{gauge_fraction, row_at, ScreenLayout};

use super::AppController;

impl AppController {
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.on_press(column, row),
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(overlay) = self.model.overlay.as_mut() {
                    overlay.drag_to(column, row);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let gesture = self
                    .model
                    .overlay
                    .as_mut()
                    .and_then(|overlay| overlay.release(column, row));
                if let Some(gesture) = gesture {
                    tracing::debug!(?gesture, "Bubble gesture");
                }
            }
            _ => {}
        }
    }

    fn on_press(&mut self, column: u16, row: u16) {
        // Popups are dismissed with the keyboard
        if self.model.permissions.prompt.is_some()
            || self.model.has_error()
            || self.model.is_help_popup_open()
        {
            return;
        }

        if let Some(overlay) = self.model.overlay.as_mut() {
            if let Some(button) = overlay.button_at(column, row) {
                self.press_strip_button(button);
                return;
            }
            if overlay.press(column, row) || overlay.hit(column, row) {
                return;
            }
        }

        let (width, height) = self.model.ui.screen;
        let layout = ScreenLayout::new(Rect::new(0, 0, width, height));

        if self.model.search.is_visible() {
            let tracks = self.model.search.tracks();
            let area = layout.search_results(tracks.len());
            if area.contains((column, row).into()) {
                let index = row_at(area, column, row, self.model.ui.search_selected, tracks.len());
                if let Some(track) = index.and_then(|i| tracks.get(i).cloned()) {
                    self.model.clear_search();
                    self.model.set_active_section(ActiveSection::Songs);
                    self.load_and_play(track);
                }
                return;
            }
        }

        let song_count = self.model.playlist.len();
        if let Some(index) = row_at(layout.songs, column, row, self.model.ui.song_selected, song_count) {
            self.model.set_active_section(ActiveSection::Songs);
            self.model.ui.song_selected = index;
            if let Some(track) = self.model.selected_song() {
                self.load_and_play(track);
            }
        } else if let Some(fraction) = gauge_fraction(layout.progress, column, row) {
            self.seek_to_fraction(fraction);
        } else if layout.search_bar.contains((column, row).into()) {
            self.model.set_active_section(ActiveSection::Search);
        }
    }

    fn press_strip_button(&mut self, button: StripButton) {
        tracing::debug!(?button, "Strip button pressed");
        match button {
            StripButton::Shuffle => self.toggle_shuffle(),
            StripButton::Previous => self.skip_previous(),
            StripButton::PlayPause => {
                if self.model.playback.current.is_some() {
                    self.toggle_play_pause();
                } else {
                    self.skip_next();
                }
            }
            StripButton::Next => self.skip_next(),
            StripButton::Repeat => self.cycle_repeat_mode(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::super::test_support::harness;
    use super::*;
    use crate::model::{BubbleState, Permission};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn click(controller: &mut AppController, column: u16, row: u16) {
        controller.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), column, row));
        controller.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), column, row));
    }

    fn songs_area(controller: &AppController) -> Rect {
        let (width, height) = controller.model.ui.screen;
        ScreenLayout::new(Rect::new(0, 0, width, height)).songs
    }

    #[tokio::test]
    async fn clicking_a_row_plays_it() {
        let mut h = harness(10);
        let songs = songs_area(&h.controller);

        click(&mut h.controller, songs.x + 5, songs.y + 1 + 3);

        assert_eq!(h.controller.model.playback.current.as_ref().unwrap().id.0, 3);
        assert_eq!(h.controller.model.ui.song_selected, 3);
    }

    #[tokio::test]
    async fn clicking_the_gauge_seeks() {
        let mut h = harness(3);
        h.controller.skip_next();
        h.controller.poll_engine();
        let (width, height) = h.controller.model.ui.screen;
        let progress = ScreenLayout::new(Rect::new(0, 0, width, height)).progress;

        let middle = progress.x + 1 + (progress.width - 2) / 2;
        click(&mut h.controller, middle, progress.y + 1);

        let position = h.controller.model.playback.timing.position;
        let duration = crate::audio::fake::FAKE_DURATION;
        assert!(position >= duration / 2 - std::time::Duration::from_secs(2));
        assert!(position <= duration / 2 + std::time::Duration::from_secs(2));
    }

    #[tokio::test]
    async fn bubble_tap_drag_and_strip_buttons() {
        let mut h = harness(3);
        h.controller.resolve_prompt(Permission::Overlay, true);
        let origin = h.controller.model.overlay.as_ref().unwrap().position();

        // tap expands
        click(&mut h.controller, origin.x + 1, origin.y + 1);
        assert_eq!(
            h.controller.model.overlay.as_ref().unwrap().state(),
            BubbleState::Expanded
        );

        // the strip's next button plays the first track
        let next = h
            .controller
            .model
            .overlay
            .as_ref()
            .and_then(|o| o.button_rect(StripButton::Next))
            .unwrap();
        click(&mut h.controller, next.x, next.y);
        assert_eq!(h.controller.model.playback.current.as_ref().unwrap().id.0, 0);

        // drag moves without collapsing
        h.controller
            .handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), origin.x + 1, origin.y + 1));
        h.controller
            .handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), origin.x + 11, origin.y + 6));
        h.controller
            .handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), origin.x + 11, origin.y + 6));

        let overlay = h.controller.model.overlay.as_ref().unwrap();
        assert_eq!(overlay.position().x, origin.x + 10);
        assert_eq!(overlay.position().y, origin.y + 5);
        assert!(overlay.is_expanded());
    }

    #[tokio::test]
    async fn clicks_on_bubble_do_not_reach_the_list() {
        let mut h = harness(10);
        let songs = songs_area(&h.controller);
        h.controller.bubble_origin = ratatui::layout::Position::new(songs.x + 2, songs.y + 2);
        h.controller.resolve_prompt(Permission::Overlay, true);

        click(&mut h.controller, songs.x + 3, songs.y + 3);

        assert!(h.controller.model.playback.current.is_none());
        assert!(h.controller.model.overlay.as_ref().unwrap().is_expanded());
    }

    #[tokio::test]
    async fn clicking_a_search_result_plays_it() {
        let mut h = harness(12);
        h.controller.model.set_active_section(ActiveSection::Search);
        for c in "artist 2".chars() {
            h.controller.model.append_to_search(c);
        }
        // Song 2, Song 5, Song 8, Song 11
        let (width, height) = h.controller.model.ui.screen;
        let area = ScreenLayout::new(Rect::new(0, 0, width, height)).search_results(4);

        click(&mut h.controller, area.x + 3, area.y + 2);

        assert_eq!(h.controller.model.playback.current.as_ref().unwrap().title, "Song 5");
        assert!(!h.controller.model.search.is_visible());
    }
}
