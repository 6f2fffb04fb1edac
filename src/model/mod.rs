//! Model module - Playlist data, wire schema and shared state
//!
//! - `types`: View-facing data (Playlist, Track, CurrentlyPlaying, ViewState)
//! - `schema`: Spotify Web API payloads and their mapping into `types`
//! - `store`: Shared application state and its actions
//! - `spotify_client`: The remote calls behind the `PlaylistApi` seam

mod types;
mod schema;
mod store;
mod spotify_client;

pub use types::{CurrentlyPlaying, Playlist, Track, ViewState};

pub use schema::{PlayRequest, RawPlaylist};

pub use store::{Action, AppState, Store};

pub use spotify_client::{PlaylistApi, SpotifyClient, DEFAULT_API_BASE};
