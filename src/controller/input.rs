//! Key event handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::ActiveSection;
use super::AppController;

impl AppController {
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Permission prompt blocks everything until answered
        if let Some(permission) = self.model.permissions.prompt {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.resolve_prompt(permission, true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.resolve_prompt(permission, false);
                }
                _ => {}
            }
            return;
        }

        // Handle error message first (blocks all other interactions)
        if self.model.has_error() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.model.clear_error();
            }
            return;
        }

        // Handle help popup
        if self.model.is_help_popup_open() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                self.model.toggle_help_popup();
            }
            return;
        }

        // Handle search input when in search section
        if self.model.ui.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Tab | KeyCode::BackTab => {
                    self.model.cycle_section();
                }
                KeyCode::Up => self.model.move_selection_up(),
                KeyCode::Down => self.model.move_selection_down(),
                KeyCode::Enter => {
                    if let Some(track) = self.model.selected_search_result() {
                        self.model.clear_search();
                        self.model.set_active_section(ActiveSection::Songs);
                        self.load_and_play(track);
                    }
                }
                KeyCode::Esc => {
                    self.model.clear_search();
                    self.model.set_active_section(ActiveSection::Songs);
                }
                KeyCode::Backspace => self.model.backspace_search(),
                KeyCode::Char(c) => {
                    // Q still quits even in search mode when Ctrl is pressed
                    if (c == 'q' || c == 'Q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        self.model.set_should_quit(true);
                        return;
                    }
                    self.model.append_to_search(c);
                }
                _ => {}
            }
            return;
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.model.set_should_quit(true);
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('/') => {
                self.model.set_active_section(ActiveSection::Search);
            }
            KeyCode::Up => self.model.move_selection_up(),
            KeyCode::Down => self.model.move_selection_down(),
            KeyCode::Enter => {
                if let Some(track) = self.model.selected_song() {
                    self.load_and_play(track);
                }
            }
            KeyCode::Esc if self.model.search.is_visible() => {
                self.model.clear_search();
            }
            // Play/Pause toggle
            KeyCode::Char(' ') => self.toggle_play_pause(),
            // Next track
            KeyCode::Char('n') | KeyCode::Char('N') => self.skip_next(),
            // Previous track
            KeyCode::Char('p') | KeyCode::Char('P') => self.skip_previous(),
            // Toggle shuffle
            KeyCode::Char('s') | KeyCode::Char('S') => self.toggle_shuffle(),
            // Cycle repeat mode
            KeyCode::Char('r') | KeyCode::Char('R') => self.cycle_repeat_mode(),
            // Seek to tenths of the track
            KeyCode::Char(c @ '0'..='9') => {
                let tenth = c.to_digit(10).unwrap_or(0);
                self.seek_to_fraction(f64::from(tenth) / 10.0);
            }
            // Floating player
            KeyCode::Char('o') | KeyCode::Char('O') => self.tap_bubble(),
            KeyCode::F(5) => self.request_library(),
            // Show help popup
            KeyCode::Char('h') | KeyCode::Char('H') => self.model.toggle_help_popup(),
            _ => {}
        }
    }
}
