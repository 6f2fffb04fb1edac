//! Controller module - Playlist view logic and event handling
//!
//! - `load`: Fetching the selected playlist and re-fetching when the token or
//!   selection changes
//! - `playback`: Starting playback of a track
//! - `input`: Key event handling

mod load;
mod playback;
mod input;

use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio::sync::Mutex;

use crate::model::{PlaylistApi, Store, ViewState};

#[derive(Clone)]
pub struct PlaylistController {
    pub(crate) store: Store,
    pub(crate) api: Arc<dyn PlaylistApi>,
    pub(crate) view_state: Arc<Mutex<ViewState>>,
    /// Bumped by every load; only the newest load may publish
    load_generation: Arc<AtomicU64>,
    /// (token, playlist id) the last load was started for
    last_requested: Arc<Mutex<Option<(String, String)>>>,
}

impl PlaylistController {
    pub fn new(store: Store, api: Arc<dyn PlaylistApi>) -> Self {
        Self {
            store,
            api,
            view_state: Arc::new(Mutex::new(ViewState::default())),
            load_generation: Arc::new(AtomicU64::new(0)),
            last_requested: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn get_view_state(&self) -> ViewState {
        self.view_state.lock().await.clone()
    }

    pub async fn should_quit(&self) -> bool {
        self.view_state.lock().await.should_quit
    }
}
