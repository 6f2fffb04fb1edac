//! Errors raised by the Spotify Web API calls

use reqwest::StatusCode;
use rspotify::model::IdError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no bearer token available")]
    MissingToken,

    #[error("invalid Spotify identifier: {0}")]
    InvalidId(#[from] IdError),

    #[error("track has no playback context")]
    MissingContext,

    #[error("track number must be at least 1")]
    InvalidTrackNumber,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Spotify returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected response shape: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Short human-readable hint for the common API status codes
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ApiError::Status { status, .. } => match status.as_u16() {
                401 => Some("token expired or revoked"),
                403 => Some("action forbidden, check Premium status"),
                404 => Some("not found or no active device"),
                429 => Some("rate limited"),
                _ => None,
            },
            _ => None,
        }
    }
}
