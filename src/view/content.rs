//! Playlist content rendering (loading indicator, header, track list)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{AppState, Playlist, Track, ViewState};
use super::utils::{calculate_track_column_widths, format_duration, render_scrollable_list, truncate_string};

const TYPE_LABEL: &str = "PLAYLIST";
const DURATION_HEADER: &str = "◷";
const THUMBNAIL_MARKER: &str = "▪ ";
const NO_THUMBNAIL: &str = "  ";

pub fn render_main_content(frame: &mut Frame, area: Rect, state: &AppState, view_state: &ViewState) {
    if view_state.loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).padding(Padding::horizontal(1)));
        frame.render_widget(loading, area);
        return;
    }

    match &state.selected_playlist {
        Some(playlist) => {
            let playing_id = state.currently_playing.as_ref().map(|p| p.id.as_str());
            render_playlist(frame, area, playlist, view_state.selected_index, playing_id);
        }
        None => {
            frame.render_widget(Block::default().borders(Borders::ALL), area);
        }
    }
}

fn render_playlist(
    frame: &mut Frame,
    area: Rect,
    playlist: &Playlist,
    selected_index: usize,
    playing_id: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Header
            Constraint::Min(0),    // Tracks
        ])
        .split(area);

    render_header(frame, chunks[0], playlist);

    let tracks_block = Block::default()
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(Color::Green));
    let inner = tracks_block.inner(chunks[1]);
    frame.render_widget(tracks_block, chunks[1]);

    // Column header stays put while the rows scroll
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let widths = calculate_track_column_widths(inner.width as usize, playlist.tracks.len());
    frame.render_widget(Paragraph::new(column_header(widths)), rows[0]);

    let items = render_track_items(&playlist.tracks, selected_index, playing_id, widths);
    render_scrollable_list(frame, rows[1], items, selected_index, Block::default());
}

fn render_header(frame: &mut Frame, area: Rect, playlist: &Playlist) {
    let mut lines = vec![
        Line::from(Span::styled(TYPE_LABEL, Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(
            playlist.name.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(playlist.description.clone()),
    ];
    if !playlist.image.is_empty() {
        lines.push(Line::from(Span::styled(
            playlist.image.clone(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let header = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).padding(Padding::horizontal(1)));
    frame.render_widget(header, area);
}

type ColumnWidths = (usize, usize, usize, usize);

fn column_header((num_width, title_width, album_width, duration_width): ColumnWidths) -> Line<'static> {
    Line::from(Span::styled(
        format!(
            " {:<num_width$}   {:<title_width$}   {:<album_width$}   {:>duration_width$}",
            "#", "TITLE", "ALBUM", DURATION_HEADER,
        ),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn render_track_items(
    tracks: &[Track],
    selected_index: usize,
    playing_id: Option<&str>,
    (num_width, title_width, album_width, duration_width): ColumnWidths,
) -> Vec<ListItem<'static>> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_playing = playing_id == Some(track.id.as_str());
            let style = if i == selected_index {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if is_playing {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let marker = if track.image.is_empty() { NO_THUMBNAIL } else { THUMBNAIL_MARKER };
            let title = truncate_string(&format!("{}{}", marker, track.name), title_width);
            let album = truncate_string(&track.album, album_width);
            let duration = format_duration(track.duration_ms);

            let title_line = Line::from(format!(
                " {:<num_width$}   {}   {}   {:>duration_width$}",
                i + 1,
                title,
                album,
                duration,
            ));
            let artists_line = Line::from(Span::styled(
                format!(
                    " {:<num_width$}   {}{}",
                    "",
                    NO_THUMBNAIL,
                    truncate_string(&track.artists.join(", "), title_width.saturating_sub(2)),
                ),
                Style::default().fg(Color::DarkGray),
            ));

            ListItem::new(vec![title_line, artists_line]).style(style)
        })
        .collect()
}
