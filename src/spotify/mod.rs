//! # Spotify Integration Module
//!
//! Implements the Spotify side of [`crate::streamer::Streamer`]: turning a
//! long-lived refresh token into short-lived access tokens and asking the Web
//! API what the user is listening to.
//!
//! ## Architecture
//!
//! ```text
//! fetch_currently_playing()
//!     ├── song cache hit ─────────────────────────▶ cached Song
//!     ├── get_access_token()  (token cache / POST /api/token)
//!     ├── GET /me/player/currently-playing
//!     │       ├── 401 ─▶ forced token refresh, one retry
//!     │       ├── 204 / error / not a track ─▶ fetch_last_played()
//!     │       └── 200 track ─▶ Song { is_playing: true }
//!     └── fetch_last_played()
//!             └── GET /me/player/recently-played?limit=1
//! ```
//!
//! ## Submodules
//!
//! - [`auth`] - Refresh token exchange and access token caching
//! - [`player`] - Currently playing and recently played lookups
//!
//! ## Caching
//!
//! Two fixed keys live in the shared [`Storer`]: the access token
//! ([`SPOTIFY_ACCESS_TOKEN_KEY`](crate::common::SPOTIFY_ACCESS_TOKEN_KEY)) and the
//! last normalized song ([`SPOTIFY_TRACK_KEY`](crate::common::SPOTIFY_TRACK_KEY)).
//! Each has its own switch, so disabling the song cache still lets the token be
//! reused between calls.
//!
//! ## Thread Safety
//!
//! The streamer is `Send + Sync`; the cache switches are atomics so they can be
//! flipped through a shared reference. Concurrent fetches are not serialized
//! and may race on cache writes, the last writer wins.

pub mod auth;
pub mod player;

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use reqwest::Client;

use crate::{
    Res,
    common::{DEFAULT_CACHE_DURATION_MS, SPOTIFY_TRACK_KEY},
    config::SpotifyEndpoints,
    error::NowPlayingError,
    storage::{Storer, StorerExt},
    types::{Credentials, Song},
};

pub struct SpotifyStreamer {
    credentials: Credentials,
    storer: Arc<dyn Storer>,
    endpoints: SpotifyEndpoints,
    client: Client,
    use_cache: AtomicBool,
    cache_access_token: AtomicBool,
    cache_duration_ms: i64,
}

impl SpotifyStreamer {
    /// Creates a streamer talking to the public Spotify endpoints.
    ///
    /// Song and token caching both start enabled, songs stay cached for
    /// [`DEFAULT_CACHE_DURATION_MS`].
    ///
    /// # Errors
    ///
    /// Returns [`NowPlayingError::Configuration`] when any credential field is
    /// empty.
    pub fn new(storer: Arc<dyn Storer>, credentials: Credentials) -> Res<Self> {
        validate_credentials(&credentials)?;

        Ok(Self {
            credentials,
            storer,
            endpoints: SpotifyEndpoints::default(),
            client: Client::new(),
            use_cache: AtomicBool::new(true),
            cache_access_token: AtomicBool::new(true),
            cache_duration_ms: DEFAULT_CACHE_DURATION_MS,
        })
    }

    pub fn with_endpoints(mut self, endpoints: SpotifyEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_cache_duration(mut self, cache_duration_ms: i64) -> Self {
        self.cache_duration_ms = cache_duration_ms;
        self
    }

    pub fn with_use_cache(self, use_cache: bool) -> Self {
        self.set_use_cache(use_cache);
        self
    }

    /// Toggles reading and writing the song cache for subsequent calls.
    /// Entries already stored are left alone.
    pub fn set_use_cache(&self, use_cache: bool) {
        self.use_cache.store(use_cache, Ordering::Relaxed);
    }

    pub fn use_cache(&self) -> bool {
        self.use_cache.load(Ordering::Relaxed)
    }

    /// Toggles reusing (and storing) access tokens between calls.
    pub fn set_cache_access_token(&self, cache_access_token: bool) {
        self.cache_access_token
            .store(cache_access_token, Ordering::Relaxed);
    }

    pub fn cache_access_token(&self) -> bool {
        self.cache_access_token.load(Ordering::Relaxed)
    }

    pub fn cache_duration_ms(&self) -> i64 {
        self.cache_duration_ms
    }

    pub fn storer(&self) -> &Arc<dyn Storer> {
        &self.storer
    }

    pub fn refresh_token(&self) -> &str {
        &self.credentials.refresh_token
    }

    fn cache_song(&self, song: &Song) -> Res<()> {
        if self.use_cache() {
            self.storer
                .set(SPOTIFY_TRACK_KEY, song, Some(self.cache_duration_ms))?;
        }
        Ok(())
    }
}

fn validate_credentials(credentials: &Credentials) -> Res<()> {
    let fields = [
        ("clientId", &credentials.client_id),
        ("clientSecret", &credentials.client_secret),
        ("refreshToken", &credentials.refresh_token),
    ];

    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(NowPlayingError::configuration(format!(
                "Spotify credential ({name}) is required"
            )));
        }
    }

    Ok(())
}
