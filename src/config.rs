//! Configuration management for nowplaying.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::{
    Res,
    common::{DEFAULT_CACHE_DURATION_MS, SPOTIFY_API_TOKEN_URL, SPOTIFY_API_URL},
    error::NowPlayingError,
    types::Credentials,
};

/// Base URLs of the Spotify services a streamer talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyEndpoints {
    /// Web API root, e.g. `https://api.spotify.com/v1`.
    pub api_url: String,
    /// Token exchange endpoint, e.g. `https://accounts.spotify.com/api/token`.
    pub token_url: String,
}

impl Default for SpotifyEndpoints {
    fn default() -> Self {
        Self {
            api_url: SPOTIFY_API_URL.to_string(),
            token_url: SPOTIFY_API_TOKEN_URL.to_string(),
        }
    }
}

impl SpotifyEndpoints {
    /// Points both services at one base URL, as a local mock server would
    /// serve them.
    pub fn with_base_url(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            api_url: format!("{base_url}/v1"),
            token_url: format!("{base_url}/api/token"),
        }
    }
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives at:
/// - Linux: `~/.local/share/nowplaying/.env`
/// - macOS: `~/Library/Application Support/nowplaying/.env`
/// - Windows: `%LOCALAPPDATA%/nowplaying/.env`
///
/// A missing file is not an error, the process environment is used as is.
///
/// # Errors
///
/// Returns a message when the file exists but cannot be parsed.
pub fn load_env() -> Result<(), String> {
    let path = env_path();
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Location of the `.env` file read by [`load_env`].
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("nowplaying/.env");
    path
}

/// Reads the Spotify credentials from `SPOTIFY_CLIENT_ID`,
/// `SPOTIFY_CLIENT_SECRET` and `SPOTIFY_REFRESH_TOKEN`.
///
/// # Errors
///
/// Returns [`NowPlayingError::Configuration`] naming the first missing
/// variable.
pub fn spotify_credentials() -> Res<Credentials> {
    Ok(Credentials {
        client_id: required("SPOTIFY_CLIENT_ID")?,
        client_secret: required("SPOTIFY_CLIENT_SECRET")?,
        refresh_token: required("SPOTIFY_REFRESH_TOKEN")?,
    })
}

/// Returns the Spotify endpoints, honouring `SPOTIFY_API_URL` and
/// `SPOTIFY_API_TOKEN_URL` overrides.
pub fn spotify_endpoints() -> SpotifyEndpoints {
    let defaults = SpotifyEndpoints::default();
    SpotifyEndpoints {
        api_url: env::var("SPOTIFY_API_URL").unwrap_or(defaults.api_url),
        token_url: env::var("SPOTIFY_API_TOKEN_URL").unwrap_or(defaults.token_url),
    }
}

/// Song cache lifetime from `NOWPLAYING_CACHE_DURATION_MS`, falling back to
/// [`DEFAULT_CACHE_DURATION_MS`].
///
/// # Errors
///
/// Returns [`NowPlayingError::Configuration`] when the variable is set but is
/// not an integer.
pub fn cache_duration_ms() -> Res<i64> {
    match env::var("NOWPLAYING_CACHE_DURATION_MS") {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            NowPlayingError::configuration(format!(
                "NOWPLAYING_CACHE_DURATION_MS must be an integer, got '{raw}'"
            ))
        }),
        Err(_) => Ok(DEFAULT_CACHE_DURATION_MS),
    }
}

fn required(name: &str) -> Res<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(NowPlayingError::configuration(format!("{name} must be set"))),
    }
}
