//! Spotify Web API client for the two calls the playlist view makes

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::error::{ApiError, ApiResult};
use super::schema::{PlayRequest, RawPlaylist};

pub const DEFAULT_API_BASE: &str = "https://api.spotify.com";

/// The remote calls the view depends on
#[async_trait]
pub trait PlaylistApi: Send + Sync {
    /// `GET /v1/playlists/{playlist_id}`
    async fn get_playlist(&self, token: &str, playlist_id: &str) -> ApiResult<RawPlaylist>;

    /// `PUT /v1/me/player/play`. Any 2xx status is returned as-is so the
    /// caller can tell 204 apart from the other success codes.
    async fn start_playback(&self, token: &str, request: &PlayRequest) -> ApiResult<StatusCode>;
}

/// Client talking to the Spotify Web API over reqwest
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: String,
}

impl SpotifyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(Client::new(), base_url)
    }

    pub fn with_http(http: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json")
    }

    async fn check_status(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Status { status, body })
        }
    }
}

#[async_trait]
impl PlaylistApi for SpotifyClient {
    async fn get_playlist(&self, token: &str, playlist_id: &str) -> ApiResult<RawPlaylist> {
        let url = self.url(&format!("/v1/playlists/{playlist_id}"));
        tracing::trace!(%url, "GET playlist");

        let response = self.authorized(self.http.get(url), token).send().await?;
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn start_playback(&self, token: &str, request: &PlayRequest) -> ApiResult<StatusCode> {
        let url = self.url("/v1/me/player/play");
        tracing::trace!(%url, context_uri = %request.context_uri, position = request.offset.position, "PUT play");

        let response = self
            .authorized(self.http.put(url), token)
            .json(request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.status())
    }
}
