//! Now playing bar

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::CurrentlyPlaying;

const KEY_HINTS: &str = " ↑/↓: select | Enter: play | r: reload | q: quit ";

fn status_text(currently_playing: Option<&CurrentlyPlaying>, player_state: bool) -> String {
    match (currently_playing, player_state) {
        (Some(track), true) => format!(" ▶ {} | {}", track.name, track.artists.join(", ")),
        (Some(track), false) => format!(" ⏸ {} | {}", track.name, track.artists.join(", ")),
        (None, true) => " ▶ Playing".to_string(),
        (None, false) => " No track playing".to_string(),
    }
}

pub fn render_now_playing(
    frame: &mut Frame,
    area: Rect,
    currently_playing: Option<&CurrentlyPlaying>,
    player_state: bool,
) {
    let style = if player_state {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let thumbnail = currently_playing
        .map(|track| track.image.as_str())
        .filter(|image| !image.is_empty())
        .unwrap_or_default();

    let bar = Paragraph::new(format!(" {}", thumbnail))
        .style(Style::default().fg(Color::DarkGray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(status_text(currently_playing, player_state))
                .title_bottom(Line::from(KEY_HINTS).right_aligned()),
        );

    frame.render_widget(bar, area);
}
