//! Shared application state and the actions that change it
//!
//! The store stands in for the application-wide state container the view is
//! embedded in. Other parts of the application (auth, sidebar) dispatch
//! `SetToken` / `SetPlaylistId`; the playlist view dispatches the rest.

use std::sync::Arc;
use rspotify::Token;
use tokio::sync::RwLock;

use super::types::{CurrentlyPlaying, Playlist};

/// Snapshot of the shared state
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub token: Option<Token>,
    pub selected_playlist_id: Option<String>,
    pub selected_playlist: Option<Playlist>,
    pub currently_playing: Option<CurrentlyPlaying>,
    pub player_state: bool,
}

#[derive(Clone, Debug)]
pub enum Action {
    SetToken(Token),
    SetPlaylistId(String),
    SetPlaylist(Playlist),
    SetPlaying(CurrentlyPlaying),
    SetPlayerState(bool),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetToken(_) => "SET_TOKEN",
            Action::SetPlaylistId(_) => "SET_PLAYLIST_ID",
            Action::SetPlaylist(_) => "SET_PLAYLIST",
            Action::SetPlaying(_) => "SET_PLAYING",
            Action::SetPlayerState(_) => "SET_PLAYER_STATE",
        }
    }
}

impl AppState {
    /// Apply an action. Every action replaces its slice of state wholesale.
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::SetToken(token) => self.token = Some(token),
            Action::SetPlaylistId(id) => self.selected_playlist_id = Some(id),
            Action::SetPlaylist(playlist) => self.selected_playlist = Some(playlist),
            Action::SetPlaying(playing) => self.currently_playing = Some(playing),
            Action::SetPlayerState(active) => self.player_state = active,
        }
    }
}

/// Cloneable handle to the shared state
#[derive(Clone, Default)]
pub struct Store {
    state: Arc<RwLock<AppState>>,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
        }
    }

    pub async fn state(&self) -> AppState {
        self.state.read().await.clone()
    }

    pub async fn dispatch(&self, action: Action) {
        tracing::debug!(action = action.name(), "Dispatching action");
        self.state.write().await.reduce(action);
    }
}
