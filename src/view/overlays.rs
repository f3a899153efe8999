//! Overlay rendering (error notification, notices, help, permission prompt,
//! floating bubble)

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{Notice, Overlay, Permission, PlaybackState, RepeatMode, StripButton};
use super::utils::truncate_string;

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn render_error_notification(frame: &mut Frame, error: &Notice) {
    let area = frame.area();

    // Fixed width popup (responsive to screen size)
    let popup_width = 52.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(4).max(1) as usize;

    let error_line_count = error.message.chars().count().div_ceil(inner_width) as u16;

    // Height: top border (1) + error lines + bottom border (1)
    let popup_height = (2 + error_line_count.max(1)).min(area.height.saturating_sub(4));
    let popup_area = centered(area, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let error_widget = Paragraph::new(error.message.clone())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error (Esc to dismiss) ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(error_widget, popup_area);
}

/// Short-lived status message in the top right corner
pub fn render_notice(frame: &mut Frame, notice: &Notice) {
    let area = frame.area();
    let width = (notice.message.chars().count() as u16 + 4).min(area.width);
    let popup_area = Rect {
        x: area.right().saturating_sub(width + 1),
        y: area.y + 3,
        width,
        height: 3.min(area.height),
    };

    frame.render_widget(Clear, popup_area);
    let widget = Paragraph::new(notice.message.clone())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(widget, popup_area);
}

pub fn render_permission_prompt(frame: &mut Frame, permission: Permission) {
    let area = frame.area();
    let popup_area = centered(area, 50, 7);

    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(permission.prompt()),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y] Allow", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw("     "),
            Span::styled("[N] Deny", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        ]),
    ];

    let prompt = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Permission ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(prompt, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    // Define keybindings organized by category
    let keybindings = vec![
        ("", "── Navigation ──"),
        ("/ or Tab", "Focus search"),
        ("↑ / ↓", "Move selection"),
        ("Enter", "Play selected song"),
        ("Esc", "Clear search"),
        ("", ""),
        ("", "── Playback ──"),
        ("Space", "Play / Pause"),
        ("N", "Next track"),
        ("P", "Previous track"),
        ("S", "Toggle shuffle"),
        ("R", "Cycle repeat (off → all → one)"),
        ("0-9", "Seek to 0% … 90%"),
        ("", ""),
        ("", "── Player ──"),
        ("O", "Open / close floating player"),
        ("F5", "Rescan music library"),
        ("Mouse", "Click songs, bar, bubble"),
        ("", ""),
        ("", "── General ──"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));
    let popup_area = centered(area, 62, popup_height);

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}

/// Floating bubble, plus the control strip when expanded
pub fn render_bubble(frame: &mut Frame, overlay: &Overlay, playback: &PlaybackState, shuffled: bool) {
    let accent = if overlay.is_dragging() { Color::Yellow } else { Color::Magenta };

    let icon = match (&playback.current, playback.is_playing()) {
        (None, _) => "♪",
        (Some(_), true) => "▶",
        (Some(_), false) => "■",
    };
    let bubble_area = overlay.bubble_rect();
    frame.render_widget(Clear, bubble_area);
    let bubble = Paragraph::new(icon)
        .alignment(Alignment::Center)
        .style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(accent))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(bubble, bubble_area);

    let Some(strip_area) = overlay.strip_rect() else {
        return;
    };
    frame.render_widget(Clear, strip_area);

    let inner_width = strip_area.width.saturating_sub(2) as usize;
    let now_playing = match &playback.current {
        Some(track) => format!("{} - {}", track.title, track.artist),
        None => "Nothing playing".to_string(),
    };
    let strip = Paragraph::new(truncate_string(&now_playing, inner_width))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(accent))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(strip, strip_area);

    for &button in StripButton::all() {
        let Some(button_area) = overlay.button_rect(button) else {
            continue;
        };
        let (label, active) = match button {
            StripButton::Shuffle => ("Shuf", shuffled),
            StripButton::Previous => ("|<<", false),
            StripButton::PlayPause if playback.is_playing() => ("||", true),
            StripButton::PlayPause => (">", false),
            StripButton::Next => (">>|", false),
            StripButton::Repeat => match playback.repeat {
                RepeatMode::Off => ("Rpt", false),
                RepeatMode::All => ("Rpt", true),
                RepeatMode::One => ("Rpt1", true),
            },
        };
        let style = if active {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let widget = Paragraph::new(label).alignment(Alignment::Center).style(style);
        frame.render_widget(widget, button_area);
    }
}
