//! Main content area rendering (now playing, song list, search results)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{
    ActiveSection, AppModel, Artwork, Grant, LibraryStatus, PlaybackState, Track, TrackId,
};
use super::utils::{format_duration, render_scrollable_list, track_column_widths, truncate_string};

pub fn render_now_playing(frame: &mut Frame, area: Rect, playback: &PlaybackState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Now Playing ")
        .padding(Padding::horizontal(1));

    let Some(track) = playback.current.as_ref() else {
        let idle = Paragraph::new("Nothing playing\n\nSelect a song and press Enter")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(idle, area);
        return;
    };

    let artwork = match &track.artwork {
        Some(Artwork::Embedded) => "Embedded cover".to_string(),
        Some(Artwork::File(path)) => path
            .file_name()
            .map(|name| format!("Cover: {}", name.to_string_lossy()))
            .unwrap_or_else(|| "Cover image".to_string()),
        None => "No artwork".to_string(),
    };
    let state = if playback.is_playing() { "▶ Playing" } else { "⏸ Paused" };

    let mut lines = vec![
        Line::from(Span::styled(
            track.title.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(track.artist.clone()),
    ];
    if let Some(album) = &track.album {
        lines.push(Line::from(Span::styled(
            album.clone(),
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(artwork, Style::default().fg(Color::DarkGray))));
    lines.push(Line::from(Span::styled(state, Style::default().fg(Color::Green))));

    let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(panel, area);
}

/// Song list, or an explanation of why there is none
pub fn render_library(frame: &mut Frame, area: Rect, model: &AppModel) {
    let is_focused = model.ui.active_section == ActiveSection::Songs;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let explanation = match (&model.permissions.media, &model.library) {
        (Grant::Denied(reason), _) => Some((reason.clone(), Color::Yellow)),
        (Grant::Undetermined, _) => Some((
            "Waiting for permission to read your music library...".to_string(),
            Color::DarkGray,
        )),
        (Grant::Granted, LibraryStatus::Failed(error)) => Some((
            format!("Could not read the music library:\n{}\n\nPress F5 to try again.", error),
            Color::Red,
        )),
        (Grant::Granted, LibraryStatus::NotScanned) => Some((
            "Library not scanned yet. Press F5 to scan it.".to_string(),
            Color::DarkGray,
        )),
        (Grant::Granted, LibraryStatus::Ready) if model.playlist.is_empty() => Some((
            "No songs in your music library.\n\nAdd audio files and press F5 to rescan.".to_string(),
            Color::DarkGray,
        )),
        (Grant::Granted, LibraryStatus::Ready) => None,
    };

    if let Some((text, color)) = explanation {
        let panel = Paragraph::new(text)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Songs ")
                    .padding(Padding::horizontal(1))
                    .border_style(border_style),
            );
        frame.render_widget(panel, area);
        return;
    }

    let title = if model.playlist.is_shuffled() {
        format!(" Songs ({}) · Shuffled ", model.playlist.len())
    } else {
        format!(" Songs ({}) ", model.playlist.len())
    };
    let current = model.playback.current.as_ref().map(|t| t.id);
    let content_width = area.width.saturating_sub(4) as usize;
    let items = track_items(
        model.playlist.iter().map(|t| t.as_ref()),
        model.playlist.len(),
        model.ui.song_selected,
        is_focused,
        current,
        content_width,
    );

    render_scrollable_list(
        frame,
        area,
        items,
        model.ui.song_selected,
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .padding(Padding::horizontal(1))
            .border_style(border_style),
    );
}

/// Dropdown with the tracks matching the search query
pub fn render_search_results(frame: &mut Frame, area: Rect, model: &AppModel) {
    frame.render_widget(Clear, area);

    let tracks = model.search.tracks();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            " Results for \"{}\" ({}) ",
            model.ui.search_query.trim(),
            tracks.len()
        ))
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(Color::Green))
        .style(Style::default().bg(Color::Black));

    if tracks.is_empty() {
        let empty = Paragraph::new("No songs found")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let is_focused = model.ui.active_section == ActiveSection::Search;
    let current = model.playback.current.as_ref().map(|t| t.id);
    let content_width = area.width.saturating_sub(4) as usize;
    let items = track_items(
        tracks.iter().map(|t| t.as_ref()),
        tracks.len(),
        model.ui.search_selected,
        is_focused,
        current,
        content_width,
    );
    render_scrollable_list(frame, area, items, model.ui.search_selected, block);
}

fn track_items<'a>(
    tracks: impl Iterator<Item = &'a Track>,
    total_count: usize,
    selected_index: usize,
    is_focused: bool,
    current: Option<TrackId>,
    content_width: usize,
) -> Vec<ListItem<'static>> {
    let (num_width, title_width, artist_width, _) = track_column_widths(content_width, total_count);

    tracks
        .enumerate()
        .map(|(i, track)| {
            let is_current = current == Some(track.id);
            let style = if i == selected_index && is_focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if i == selected_index {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let playing_indicator = if is_current { "▶" } else { " " };
            let track_num = format!("{}{:<num_width$}", playing_indicator, i + 1, num_width = num_width);
            let duration = track.duration.map(format_duration).unwrap_or_else(|| "--:--".to_string());

            ListItem::new(format!(
                "{}   {}   {}   {}",
                track_num,
                truncate_string(&track.title, title_width),
                truncate_string(&track.artist, artist_width),
                duration
            ))
            .style(style)
        })
        .collect()
}
