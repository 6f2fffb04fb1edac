//! Wire payloads of the Spotify Web API and their mapping into view types
//!
//! Only the fields the view reads are declared. A payload missing any of
//! them fails to deserialize with a `serde_json::Error`, which surfaces as
//! `ApiError::Parse`.

use serde::{Deserialize, Serialize};

use super::types::{Playlist, Track};

/// Image variant used for the playlist cover (the largest one)
pub const PLAYLIST_IMAGE_TIER: usize = 0;
/// Image variant used for track thumbnails (the third one, usually 64px)
pub const TRACK_IMAGE_TIER: usize = 2;

const ANCHOR_PREFIX: &str = "<a";

#[derive(Debug, Clone, Deserialize)]
pub struct RawImage {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAlbum {
    pub name: String,
    pub uri: String,
    pub images: Option<Vec<RawImage>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<RawArtist>,
    pub duration_ms: u32,
    pub album: RawAlbum,
    pub track_number: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPlaylistItem {
    pub track: RawTrack,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTrackPage {
    pub items: Vec<RawPlaylistItem>,
}

/// Response of `GET /v1/playlists/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlaylist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub images: Option<Vec<RawImage>>,
    pub tracks: RawTrackPage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayOffset {
    pub position: u32,
}

/// Body of `PUT /v1/me/player/play`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayRequest {
    pub context_uri: String,
    pub offset: PlayOffset,
    pub position_ms: u32,
}

impl PlayRequest {
    /// Start `context_uri` at the given 0-based position, from the beginning
    pub fn new(context_uri: impl Into<String>, position: u32) -> Self {
        Self {
            context_uri: context_uri.into(),
            offset: PlayOffset { position },
            position_ms: 0,
        }
    }
}

fn pick_image(images: Option<Vec<RawImage>>, tier: usize) -> String {
    images
        .and_then(|images| images.into_iter().nth(tier))
        .map(|image| image.url)
        .unwrap_or_default()
}

/// Descriptions that open with a link are promotional markup, not text
fn clean_description(description: String) -> String {
    if description.starts_with(ANCHOR_PREFIX) {
        String::new()
    } else {
        description
    }
}

impl From<RawTrack> for Track {
    fn from(raw: RawTrack) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            artists: raw.artists.into_iter().map(|a| a.name).collect(),
            image: pick_image(raw.album.images, TRACK_IMAGE_TIER),
            duration_ms: raw.duration_ms,
            album: raw.album.name,
            context_uri: raw.album.uri,
            track_number: raw.track_number,
        }
    }
}

impl From<RawPlaylist> for Playlist {
    fn from(raw: RawPlaylist) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            description: clean_description(raw.description),
            image: pick_image(raw.images, PLAYLIST_IMAGE_TIER),
            tracks: raw
                .tracks
                .items
                .into_iter()
                .map(|item| Track::from(item.track))
                .collect(),
        }
    }
}
