//! View module - UI rendering
//!
//! Renders the playlist view with ratatui:
//!
//! - `utils`: Shared helpers (duration formatting, scrollable lists, column widths)
//! - `content`: Loading indicator, playlist header and track list
//! - `now_playing`: Bottom bar with the current track and key hints

mod utils;
mod content;
mod now_playing;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{AppState, ViewState};

pub struct PlaylistView;

impl PlaylistView {
    pub fn render(frame: &mut Frame, state: &AppState, view_state: &ViewState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Playlist
                Constraint::Length(3), // Now playing
            ])
            .split(frame.area());

        content::render_main_content(frame, chunks[0], state, view_state);
        now_playing::render_now_playing(
            frame,
            chunks[1],
            state.currently_playing.as_ref(),
            state.player_state,
        );
    }
}
