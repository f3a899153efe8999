//! Progress bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::model::{AppModel, Grant, RepeatMode};
use super::utils::format_duration;

pub fn render_progress_bar(frame: &mut Frame, area: Rect, model: &AppModel) {
    let playback = &model.playback;

    let status_text = match playback.current.as_ref() {
        None => " No track playing".to_string(),
        Some(track) => {
            let icon = if playback.is_playing() { " ▶" } else { "⏸ " };
            match &track.album {
                Some(album) => format!("{} {} | {} ({})", icon, track.title, track.artist, album),
                None => format!("{} {} | {}", icon, track.title, track.artist),
            }
        }
    };

    let shuffle_text = if model.playlist.is_shuffled() { "Shuffle: On" } else { "Shuffle: Off" };
    let repeat_text = match playback.repeat {
        RepeatMode::Off => "Repeat: Off",
        RepeatMode::All => "Repeat: All",
        RepeatMode::One => "Repeat: One",
    };

    let time_str = format!(
        "{} / {}",
        format_duration(playback.timing.current_position()),
        playback
            .timing
            .duration
            .map(format_duration)
            .unwrap_or_else(|| "--:--".to_string())
    );

    let title = format!("{} ", status_text);
    let controls_info = format!(" {} | {} | H: Help ", shuffle_text, repeat_text);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(Line::from(controls_info).right_aligned());

    // Overlay denial is reported here rather than in a popup.
    if let Grant::Denied(reason) = &model.permissions.overlay {
        block = block.title_bottom(
            Line::from(format!(" {} ", reason))
                .left_aligned()
                .style(Style::default().fg(Color::Yellow)),
        );
    }

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(playback.timing.ratio())
        .label(time_str);

    frame.render_widget(gauge, area);
}
