//! Loading the selected playlist

use std::sync::atomic::Ordering;
use rspotify::model::PlaylistId;
use rspotify::prelude::Id;
use rspotify::Token;

use crate::error::{ApiError, ApiResult};
use crate::model::{Action, Playlist};
use super::PlaylistController;

impl PlaylistController {
    /// Start a load if the token or selected playlist changed since the last
    /// one. Called from the UI loop; the load itself runs in the background.
    pub async fn sync(&self) {
        let state = self.store.state().await;
        let (Some(token), Some(playlist_id)) = (state.token, state.selected_playlist_id) else {
            return;
        };

        let key = (token.access_token.clone(), playlist_id.clone());
        {
            let mut last = self.last_requested.lock().await;
            if last.as_ref() == Some(&key) {
                return;
            }
            *last = Some(key);
        }

        // The generation is taken here, in request order, not when the
        // spawned task happens to run
        let generation = self.begin_load().await;
        tracing::debug!(playlist_id = %playlist_id, generation, "Token or playlist changed, loading");
        let controller = self.clone();
        tokio::spawn(async move {
            controller.load_playlist(&token, &playlist_id, generation).await;
        });
    }

    /// Forget the last request so the next `sync` loads again
    pub async fn reload(&self) {
        *self.last_requested.lock().await = None;
        self.sync().await;
    }

    /// Claim the next load generation and show the loading indicator
    async fn begin_load(&self) -> u64 {
        let generation = self.load_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.view_state.lock().await.loading = true;
        generation
    }

    /// Fetch the playlist and publish it with `SET_PLAYLIST`. `generation`
    /// comes from `begin_load`.
    ///
    /// Failures are logged and leave the shared state untouched. A response
    /// that arrives after a newer load has started is dropped. The loading
    /// flag is cleared by the newest load whatever its outcome.
    pub async fn load_playlist(&self, token: &Token, playlist_id: &str, generation: u64) -> Option<Playlist> {
        crate::log_api_request!("get_playlist", playlist_id, generation);
        let result = self.fetch_playlist(token, playlist_id).await;
        crate::log_api_result!("get_playlist", result);

        let is_current = self.load_generation.load(Ordering::SeqCst) == generation;
        let published = match result {
            Ok(playlist) if is_current => {
                tracing::info!(
                    playlist_id = %playlist.id,
                    tracks = playlist.tracks.len(),
                    "Playlist loaded"
                );
                self.store.dispatch(Action::SetPlaylist(playlist.clone())).await;
                Some(playlist)
            }
            Ok(_) => {
                tracing::debug!(playlist_id, generation, "Discarding stale playlist response");
                None
            }
            Err(_) => None,
        };

        if is_current {
            let mut view_state = self.view_state.lock().await;
            view_state.loading = false;
            if let Some(playlist) = &published {
                view_state.clamp_selection(playlist.tracks.len());
            }
        }

        published
    }

    async fn fetch_playlist(&self, token: &Token, playlist_id: &str) -> ApiResult<Playlist> {
        if token.access_token.is_empty() {
            return Err(ApiError::MissingToken);
        }
        if token.is_expired() {
            tracing::warn!("Bearer token looks expired, sending anyway");
        }

        let id = PlaylistId::from_id_or_uri(playlist_id)?;
        let raw = self.api.get_playlist(&token.access_token, id.id()).await?;
        Ok(Playlist::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::Value;
    use tokio::sync::Notify;

    use super::*;
    use crate::config::Config;
    use crate::model::test_support::{dead_base_url, local_client, playlist_json, serve_once, track_json};
    use crate::model::{PlayRequest, PlaylistApi, RawPlaylist, Store, AppState};

    fn token(access: &str) -> Token {
        Config {
            access_token: access.to_string(),
            token_expires_in: 3600,
            playlist_id: String::new(),
            api_base: String::new(),
            log_dir: Default::default(),
        }
        .token()
        .unwrap()
    }

    impl PlaylistController {
        async fn load_fresh(&self, token: &Token, playlist_id: &str) -> Option<Playlist> {
            let generation = self.begin_load().await;
            self.load_playlist(token, playlist_id, generation).await
        }
    }

    /// Answers per playlist ID; IDs with a gate wait for it to open
    #[derive(Default)]
    struct FakeApi {
        playlists: HashMap<String, Value>,
        gates: HashMap<String, Arc<Notify>>,
    }

    #[async_trait]
    impl PlaylistApi for FakeApi {
        async fn get_playlist(&self, _token: &str, playlist_id: &str) -> ApiResult<RawPlaylist> {
            if let Some(gate) = self.gates.get(playlist_id) {
                gate.notified().await;
            }
            match self.playlists.get(playlist_id) {
                Some(value) => Ok(serde_json::from_value(value.clone())?),
                None => Err(ApiError::Status {
                    status: StatusCode::NOT_FOUND,
                    body: String::new(),
                }),
            }
        }

        async fn start_playback(&self, _token: &str, _request: &PlayRequest) -> ApiResult<StatusCode> {
            Ok(StatusCode::NO_CONTENT)
        }
    }

    fn fake(ids: &[&str]) -> FakeApi {
        let mut api = FakeApi::default();
        for id in ids {
            api.playlists.insert(
                id.to_string(),
                playlist_json(id, "", vec![track_json(&format!("{id}t1"), "One", 3)]),
            );
        }
        api
    }

    #[tokio::test]
    async fn publishes_loaded_playlist() {
        let store = Store::default();
        let controller = PlaylistController::new(store.clone(), Arc::new(fake(&["p1"])));

        let loaded = controller.load_fresh(&token("tok"), "p1").await.unwrap();
        assert_eq!(loaded.id, "p1");

        assert_eq!(store.state().await.selected_playlist, Some(loaded));
        assert!(!controller.get_view_state().await.loading);
    }

    #[tokio::test]
    async fn accepts_playlist_uri() {
        let store = Store::default();
        let controller = PlaylistController::new(store.clone(), Arc::new(fake(&["p1"])));

        assert!(controller.load_fresh(&token("tok"), "spotify:playlist:p1").await.is_some());
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_playlist() {
        let store = Store::default();
        let controller = PlaylistController::new(store.clone(), Arc::new(fake(&["p1"])));
        let first = controller.load_fresh(&token("tok"), "p1").await.unwrap();

        assert!(controller.load_fresh(&token("tok"), "missing").await.is_none());
        assert!(controller.load_fresh(&token(""), "p1").await.is_none());
        assert!(controller.load_fresh(&token("tok"), "not a valid id!").await.is_none());

        assert_eq!(store.state().await.selected_playlist, Some(first));
        assert!(!controller.get_view_state().await.loading);
    }

    #[tokio::test]
    async fn transport_error_keeps_previous_playlist() {
        let previous = Playlist::from(
            serde_json::from_value::<RawPlaylist>(playlist_json("old", "", vec![])).unwrap(),
        );
        let store = Store::new(AppState {
            selected_playlist: Some(previous.clone()),
            ..AppState::default()
        });
        let api = local_client(dead_base_url().await);
        let controller = PlaylistController::new(store.clone(), Arc::new(api));

        assert!(controller.load_fresh(&token("tok"), "p1").await.is_none());

        assert_eq!(store.state().await.selected_playlist, Some(previous));
        assert!(!controller.get_view_state().await.loading);
    }

    #[tokio::test]
    async fn loads_over_http() {
        let payload = playlist_json(
            "p1",
            "<a href=\"https://example.com\">promo</a>",
            vec![track_json("t1", "One", 1), track_json("t2", "Two", 3)],
        );
        let (base, _server) = serve_once("200 OK", payload.to_string()).await;
        let store = Store::default();
        let controller = PlaylistController::new(store.clone(), Arc::new(local_client(base)));

        let playlist = controller.load_fresh(&token("tok"), "p1").await.unwrap();
        assert_eq!(playlist.description, "");
        assert_eq!(playlist.tracks[0].image, "");
        assert_eq!(playlist.tracks[1].image, "https://i.scdn.co/t2/2");
    }

    #[tokio::test]
    async fn stale_response_is_discarded() {
        let gate = Arc::new(Notify::new());
        let mut api = fake(&["old", "new"]);
        api.gates.insert("old".to_string(), gate.clone());

        let store = Store::default();
        let controller = PlaylistController::new(store.clone(), Arc::new(api));

        let slow = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.load_fresh(&token("tok"), "old").await })
        };
        // Let the slow load register its generation before the newer one starts
        tokio::time::sleep(Duration::from_millis(20)).await;

        let newer = controller.load_fresh(&token("tok"), "new").await;
        assert_eq!(newer.map(|p| p.id), Some("new".to_string()));

        gate.notify_one();
        assert!(slow.await.unwrap().is_none());

        let state = store.state().await;
        assert_eq!(state.selected_playlist.map(|p| p.id), Some("new".to_string()));
        assert!(!controller.get_view_state().await.loading);
    }

    #[tokio::test]
    async fn sync_loads_once_per_change() {
        let store = Store::default();
        let controller = PlaylistController::new(store.clone(), Arc::new(fake(&["p1", "p2"])));

        // Nothing selected yet
        controller.sync().await;
        assert!(controller.last_requested.lock().await.is_none());

        store.dispatch(Action::SetToken(token("tok"))).await;
        store.dispatch(Action::SetPlaylistId("p1".to_string())).await;
        controller.sync().await;
        controller.sync().await;
        assert_eq!(controller.load_generation.load(Ordering::SeqCst), 1);

        wait_for_playlist(&store, "p1").await;
        assert_eq!(controller.load_generation.load(Ordering::SeqCst), 1);

        store.dispatch(Action::SetPlaylistId("p2".to_string())).await;
        controller.sync().await;
        wait_for_playlist(&store, "p2").await;

        controller.reload().await;
        wait_for_generation(&controller, 3).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn latest_selection_wins_when_loads_run_out_of_order() {
        let p1_gate = Arc::new(Notify::new());
        let p2_gate = Arc::new(Notify::new());
        let mut api = fake(&["p1", "p2"]);
        api.gates.insert("p1".to_string(), p1_gate.clone());
        api.gates.insert("p2".to_string(), p2_gate.clone());

        let store = Store::default();
        store.dispatch(Action::SetToken(token("tok"))).await;
        let controller = PlaylistController::new(store.clone(), Arc::new(api));

        let selecting = {
            let store = store.clone();
            let controller = controller.clone();
            tokio::spawn(async move {
                store.dispatch(Action::SetPlaylistId("p1".to_string())).await;
                controller.sync().await;
                store.dispatch(Action::SetPlaylistId("p2".to_string())).await;
                controller.sync().await;
            })
        };
        selecting.await.unwrap();
        assert_eq!(controller.load_generation.load(Ordering::SeqCst), 2);

        // The older selection answers first and must not be shown
        p1_gate.notify_one();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(store.state().await.selected_playlist.is_none());
        assert!(controller.get_view_state().await.loading);

        p2_gate.notify_one();
        wait_for_playlist(&store, "p2").await;
        tokio::time::sleep(Duration::from_millis(20)).await;

        let state = store.state().await;
        assert_eq!(state.selected_playlist_id.as_deref(), Some("p2"));
        assert_eq!(state.selected_playlist.map(|p| p.id), Some("p2".to_string()));
        assert!(!controller.get_view_state().await.loading);
    }

    async fn wait_for_playlist(store: &Store, id: &str) {
        for _ in 0..100 {
            if store.state().await.selected_playlist.map(|p| p.id).as_deref() == Some(id) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("playlist {id} was never published");
    }

    async fn wait_for_generation(controller: &PlaylistController, generation: u64) {
        for _ in 0..100 {
            if controller.load_generation.load(Ordering::SeqCst) == generation {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("load generation never reached {generation}");
    }
}
