//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! Everything is drawn from the model on every frame. It is organized into
//! submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Screen geometry shared with mouse hit-testing, top bar
//! - `content`: Now playing panel, song list, search results
//! - `progress`: Progress bar rendering
//! - `overlays`: Popups and the floating bubble

mod utils;
mod layout;
mod content;
mod progress;
mod overlays;

use ratatui::Frame;

use crate::model::AppModel;

pub use layout::{gauge_fraction, row_at, ScreenLayout};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, model: &AppModel) {
        let layout = ScreenLayout::new(frame.area());

        // Top bar: Search + library size
        layout::render_top_bar(frame, &layout, model);

        // Middle: Now playing panel and the song list
        content::render_now_playing(frame, layout.now_playing, &model.playback);
        content::render_library(frame, layout.songs, model);

        // Bottom: Progress bar with track info and controls
        progress::render_progress_bar(frame, layout.progress, model);

        if model.search.is_visible() {
            let area = layout.search_results(model.search.tracks().len());
            content::render_search_results(frame, area, model);
        }

        if let Some(overlay) = &model.overlay {
            overlays::render_bubble(frame, overlay, &model.playback, model.playlist.is_shuffled());
        }

        if let Some(notice) = &model.ui.notice {
            overlays::render_notice(frame, notice);
        }

        if let Some(error) = &model.ui.error {
            overlays::render_error_notification(frame, error);
        }

        if model.ui.show_help_popup {
            overlays::render_help_popup(frame);
        }

        if let Some(permission) = model.permissions.prompt {
            overlays::render_permission_prompt(frame, permission);
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Position;
    use ratatui::style::Color;
    use ratatui::Terminal;

    use super::*;
    use crate::model::fixtures::sample_tracks;
    use crate::model::{
        Grant, Overlay, Permission, Permissions, MEDIA_DENIED, OVERLAY_DENIED,
    };

    const WIDTH: u16 = 120;
    const HEIGHT: u16 = 30;

    fn draw(model: &AppModel) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
        terminal.draw(|frame| AppView::render(frame, model)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn rows(buffer: &Buffer) -> Vec<String> {
        (0..HEIGHT)
            .map(|y| (0..WIDTH).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    fn find(buffer: &Buffer, needle: &str) -> Option<(u16, u16)> {
        rows(buffer).iter().enumerate().find_map(|(y, row)| {
            row.find(needle)
                .map(|byte| (row[..byte].chars().count() as u16, y as u16))
        })
    }

    fn granted_model(count: u32) -> AppModel {
        let mut permissions = Permissions::default();
        permissions.media = Grant::Granted;
        permissions.overlay = Grant::Granted;
        let mut model = AppModel::new(permissions);
        model.set_screen(WIDTH, HEIGHT);
        model.set_catalog(sample_tracks(count));
        model
    }

    #[test]
    fn current_track_row_is_marked() {
        let mut model = granted_model(5);
        model.playback.current = model.playlist.get(2).cloned();
        model.ui.song_selected = 0;

        let buffer = draw(&model);
        let (x, y) = find(&buffer, "▶3").expect("marker on the third row");
        assert_eq!(buffer[(x, y)].fg, Color::Cyan);
        assert!(rows(&buffer)[y as usize].contains("Song 2"));
        assert!(find(&buffer, "▶1").is_none());
    }

    #[test]
    fn denied_library_shows_explanation() {
        let mut model = AppModel::new(Permissions {
            media: Grant::Denied(MEDIA_DENIED.to_string()),
            ..Default::default()
        });
        model.set_screen(WIDTH, HEIGHT);

        let buffer = draw(&model);
        assert!(find(&buffer, "Music library access was denied").is_some());
    }

    #[test]
    fn denied_overlay_shows_status_line_and_no_bubble() {
        let mut model = granted_model(3);
        model.permissions.overlay = Grant::Denied(OVERLAY_DENIED.to_string());

        let buffer = draw(&model);
        let (_, y) = find(&buffer, "Floating player disabled").unwrap();
        assert_eq!(y, HEIGHT - 1);
        assert!(find(&buffer, "♪").is_none());
    }

    #[test]
    fn bubble_is_drawn_where_the_overlay_is() {
        let mut model = granted_model(3);
        model.overlay = Some(Overlay::new(Position::new(40, 10), (WIDTH, HEIGHT)));

        let buffer = draw(&model);
        assert_eq!(find(&buffer, "♪"), Some((43, 11)));
        assert!(find(&buffer, "|<<").is_none());
        assert!(find(&buffer, ">>|").is_none());

        if let Some(overlay) = model.overlay.as_mut() {
            overlay.tap();
        }
        let buffer = draw(&model);
        assert!(find(&buffer, "|<<").is_some());
        assert!(find(&buffer, ">>|").is_some());
        assert!(find(&buffer, "Nothing playing").is_some());
    }

    #[test]
    fn unmatched_search_shows_empty_results() {
        let mut model = granted_model(3);
        for c in "zzz".chars() {
            model.append_to_search(c);
        }

        let buffer = draw(&model);
        assert!(find(&buffer, "No songs found").is_some());
    }

    #[test]
    fn permission_prompt_is_drawn_on_top() {
        let mut model = granted_model(3);
        model.permissions.prompt = Some(Permission::Overlay);

        let buffer = draw(&model);
        assert!(find(&buffer, "[Y] Allow").is_some());
    }
}
