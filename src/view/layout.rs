//! Screen geometry and the top bar
//!
//! [`ScreenLayout`] is computed from the terminal area both when drawing and
//! when hit-testing mouse clicks, so a click always lands on what was drawn.

use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Position, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, AppModel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    pub search_bar: Rect,
    pub library_info: Rect,
    pub now_playing: Rect,
    pub songs: Rect,
    pub progress: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar + library info
                Constraint::Min(0),    // Now playing + song list
                Constraint::Length(3), // Progress bar with playback info
            ])
            .split(area);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(25)])
            .split(chunks[0]);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(chunks[1]);

        Self {
            search_bar: top[0],
            library_info: top[1],
            now_playing: middle[0],
            songs: middle[1],
            progress: chunks[2],
        }
    }

    /// Dropdown under the search bar, sized for `result_count` rows
    pub fn search_results(&self, result_count: usize) -> Rect {
        let available = self.progress.y.saturating_sub(self.search_bar.bottom());
        let wanted = result_count.max(1) as u16 + 2;
        Rect::new(
            self.search_bar.x,
            self.search_bar.bottom(),
            self.search_bar.width,
            wanted.min(available),
        )
    }
}

/// First visible row of a list so that `selected` stays in view
pub fn list_offset(selected: usize, visible_rows: usize) -> usize {
    if selected < visible_rows {
        0
    } else {
        selected + 1 - visible_rows
    }
}

/// Index of the list entry drawn at (`column`, `row`) inside a bordered list
pub fn row_at(area: Rect, column: u16, row: u16, selected: usize, len: usize) -> Option<usize> {
    let inner = area.inner(Margin::new(1, 1));
    if !inner.contains(Position::new(column, row)) {
        return None;
    }
    let offset = list_offset(selected, inner.height as usize);
    let index = offset + (row - inner.y) as usize;
    (index < len).then_some(index)
}

/// Fraction of the gauge width at `column`, if the point is on the gauge
pub fn gauge_fraction(area: Rect, column: u16, row: u16) -> Option<f64> {
    let inner = area.inner(Margin::new(1, 1));
    if inner.width == 0 || !inner.contains(Position::new(column, row)) {
        return None;
    }
    Some((column - inner.x) as f64 / inner.width as f64)
}

pub fn render_top_bar(frame: &mut Frame, layout: &ScreenLayout, model: &AppModel) {
    let ui_state = &model.ui;
    let search_focused = ui_state.active_section == ActiveSection::Search;
    let search_style = if search_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = if ui_state.search_query.is_empty() {
        "Type / to search..."
    } else {
        &ui_state.search_query
    };

    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(if search_focused {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                }),
        );
    frame.render_widget(search, layout.search_bar);

    let count = model.playlist.len();
    let info = Paragraph::new(format!("🎵 {} song{}", count, if count == 1 { "" } else { "s" }))
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Library "));
    frame.render_widget(info, layout.library_info);
}
