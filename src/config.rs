//! Runtime configuration read from the environment (and an optional `.env`)

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use rspotify::model::PlaylistId;
use rspotify::prelude::Id;
use rspotify::Token;

use crate::model::DEFAULT_API_BASE;

pub const ENV_ACCESS_TOKEN: &str = "SPOTIFY_ACCESS_TOKEN";
pub const ENV_TOKEN_EXPIRES_IN: &str = "SPOTIFY_TOKEN_EXPIRES_IN";
pub const ENV_PLAYLIST_ID: &str = "SPOTIFY_PLAYLIST_ID";
pub const ENV_API_BASE: &str = "SPOTIFY_API_BASE";
pub const ENV_LOG_DIR: &str = "PLAYLIST_VIEW_LOG_DIR";

const DEFAULT_TOKEN_EXPIRES_IN: i64 = 3600;
const DEFAULT_LOG_DIR: &str = ".logs";
const SCOPES: &str = "playlist-read-private playlist-read-collaborative user-modify-playback-state";

#[derive(Clone, Debug)]
pub struct Config {
    pub access_token: String,
    pub token_expires_in: i64,
    pub playlist_id: String,
    pub api_base: String,
    pub log_dir: PathBuf,
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    /// A playlist given on the command line wins over the environment.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        let cli_playlist = std::env::args().nth(1);
        Self::from_lookup(|key| std::env::var(key).ok(), cli_playlist)
    }

    pub fn from_lookup<F>(lookup: F, cli_playlist: Option<String>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token = lookup(ENV_ACCESS_TOKEN)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| anyhow!("{ENV_ACCESS_TOKEN} must be set"))?;

        let token_expires_in = match lookup(ENV_TOKEN_EXPIRES_IN) {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .with_context(|| format!("{ENV_TOKEN_EXPIRES_IN} must be a number of seconds"))?,
            None => DEFAULT_TOKEN_EXPIRES_IN,
        };
        token_expiry(token_expires_in)?;

        let raw_playlist = cli_playlist
            .or_else(|| lookup(ENV_PLAYLIST_ID))
            .ok_or_else(|| anyhow!("{ENV_PLAYLIST_ID} must be set or a playlist given as argument"))?;
        let playlist_id = normalize_playlist_id(&raw_playlist)?;

        Ok(Self {
            access_token: access_token.trim().to_string(),
            token_expires_in,
            playlist_id,
            api_base: lookup(ENV_API_BASE).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            log_dir: lookup(ENV_LOG_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
        })
    }

    /// The bearer token as the store holds it, expiring `token_expires_in`
    /// seconds from now
    pub fn token(&self) -> Result<Token> {
        let (expires_in, expires_at) = token_expiry(self.token_expires_in)?;
        Ok(Token {
            access_token: self.access_token.clone(),
            expires_in,
            expires_at: Some(expires_at),
            scopes: SCOPES
                .split_whitespace()
                .map(|s| s.to_string())
                .collect::<HashSet<String>>(),
            refresh_token: None,
        })
    }
}

fn token_expiry(seconds: i64) -> Result<(TimeDelta, DateTime<Utc>)> {
    let expires_in = TimeDelta::try_seconds(seconds)
        .ok_or_else(|| anyhow!("{ENV_TOKEN_EXPIRES_IN} is out of range: {seconds}"))?;
    let expires_at = Utc::now()
        .checked_add_signed(expires_in)
        .ok_or_else(|| anyhow!("{ENV_TOKEN_EXPIRES_IN} is out of range: {seconds}"))?;
    Ok((expires_in, expires_at))
}

/// Accept a bare playlist ID or a `spotify:playlist:` URI
pub fn normalize_playlist_id(raw: &str) -> Result<String> {
    let id = PlaylistId::from_id_or_uri(raw.trim())
        .with_context(|| format!("'{raw}' is not a Spotify playlist ID or URI"))?;
    Ok(id.id().to_string())
}
