//! Starting playback of a playlist track

use reqwest::StatusCode;

use crate::error::{ApiError, ApiResult};
use crate::model::{Action, CurrentlyPlaying, PlayRequest, Track};
use super::PlaylistController;

/// Build the play command for `track`: its context (the album) sent as-is,
/// offset at the track's position within it
fn play_request(track: &Track) -> ApiResult<PlayRequest> {
    if track.context_uri.trim().is_empty() {
        return Err(ApiError::MissingContext);
    }
    let position = track
        .track_number
        .checked_sub(1)
        .ok_or(ApiError::InvalidTrackNumber)?;
    Ok(PlayRequest::new(track.context_uri.clone(), position))
}

impl PlaylistController {
    /// Ask Spotify to play `track` and publish the new player state.
    ///
    /// 204 publishes `SET_PLAYING` and `SET_PLAYER_STATE`. Other success
    /// codes only publish `SET_PLAYER_STATE`. Failures change nothing.
    pub async fn play_track(&self, track: &Track) {
        let Some(token) = self.store.state().await.token else {
            tracing::warn!(track_id = %track.id, "Cannot start playback: no token");
            return;
        };

        crate::log_api_request!("start_playback", track_id = %track.id, context_uri = %track.context_uri);
        let result = self.start_playback(&token.access_token, track).await;
        crate::log_api_result!("start_playback", result);

        match result {
            Ok(status) if status == StatusCode::NO_CONTENT => {
                self.store
                    .dispatch(Action::SetPlaying(CurrentlyPlaying::from(track)))
                    .await;
                self.store.dispatch(Action::SetPlayerState(true)).await;
            }
            Ok(status) => {
                // Accepted but not confirmed; the now-playing entry is left as it was
                tracing::warn!(%status, track_id = %track.id, "Playback started without 204, now playing not updated");
                self.store.dispatch(Action::SetPlayerState(true)).await;
            }
            Err(_) => {}
        }
    }

    async fn start_playback(&self, token: &str, track: &Track) -> ApiResult<StatusCode> {
        if token.is_empty() {
            return Err(ApiError::MissingToken);
        }
        let request = play_request(track)?;
        self.api.start_playback(token, &request).await
    }

    /// Play the track under the selection cursor
    pub async fn play_selected(&self) {
        let selected_index = self.view_state.lock().await.selected_index;
        let track = self
            .store
            .state()
            .await
            .selected_playlist
            .and_then(|playlist| playlist.tracks.into_iter().nth(selected_index));

        match track {
            Some(track) => self.play_track(&track).await,
            None => tracing::debug!(selected_index, "No track at selection"),
        }
    }
}
