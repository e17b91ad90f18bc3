//! Single entry point for callers that only want "the current song".

use std::{str::FromStr, sync::Arc};

use tracing::debug;

use crate::{
    Res,
    common::DEFAULT_CACHE_DURATION_MS,
    config::SpotifyEndpoints,
    error::NowPlayingError,
    spotify::SpotifyStreamer,
    storage::{InMemoryStorage, StorageKind, Storer},
    streamer::{NoopStreamer, ProviderStreamer, Streamer},
    types::{Credentials, Song},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Spotify,
    /// Fixed song, no network. Mostly useful for tests and demos.
    Noop,
}

impl FromStr for Provider {
    type Err = NowPlayingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spotify" => Ok(Provider::Spotify),
            "noop" => Ok(Provider::Noop),
            other => Err(NowPlayingError::configuration(format!(
                "unsupported provider '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NowPlayingArgs {
    pub storage_kind: StorageKind,
    pub use_cache: bool,
    pub cache_duration_ms: i64,
    /// Required for [`Provider::Spotify`], ignored otherwise.
    pub streamer_args: Option<Credentials>,
    pub endpoints: SpotifyEndpoints,
}

impl Default for NowPlayingArgs {
    fn default() -> Self {
        Self {
            storage_kind: StorageKind::default(),
            use_cache: true,
            cache_duration_ms: DEFAULT_CACHE_DURATION_MS,
            streamer_args: None,
            endpoints: SpotifyEndpoints::default(),
        }
    }
}

impl NowPlayingArgs {
    pub fn spotify(credentials: Credentials) -> Self {
        Self {
            streamer_args: Some(credentials),
            ..Self::default()
        }
    }
}

/// Fetches the currently playing (or last played) song of one user on one
/// provider.
///
/// # Example
///
/// ```
/// let np = NowPlaying::new(Provider::Spotify, NowPlayingArgs::spotify(credentials))?;
/// if let Some(song) = np.fetch_currently_playing_or_last_played().await? {
///     println!("{} - {}", song.artist, song.title);
/// }
/// ```
pub struct NowPlaying {
    provider: Provider,
    storer: Arc<dyn Storer>,
    streamer: ProviderStreamer,
}

impl NowPlaying {
    /// Validates `args` and builds the storage backend and the streamer.
    ///
    /// # Errors
    ///
    /// [`NowPlayingError::Configuration`] when Spotify credentials are missing
    /// or incomplete, or when the cache duration is not positive.
    pub fn new(provider: Provider, args: NowPlayingArgs) -> Res<Self> {
        let storer = storer_for(args.storage_kind);
        Self::with_storer(provider, args, storer)
    }

    /// Same as [`NowPlaying::new`] with a caller supplied storage backend. The
    /// `storage_kind` of `args` is ignored.
    pub fn with_storer(provider: Provider, args: NowPlayingArgs, storer: Arc<dyn Storer>) -> Res<Self> {
        if args.cache_duration_ms <= 0 {
            return Err(NowPlayingError::configuration(format!(
                "cache duration must be positive, got {}ms",
                args.cache_duration_ms
            )));
        }

        let streamer = match provider {
            Provider::Spotify => {
                let credentials = args.streamer_args.ok_or_else(|| {
                    NowPlayingError::configuration("Spotify provider requires streamer credentials")
                })?;
                let streamer = SpotifyStreamer::new(Arc::clone(&storer), credentials)?
                    .with_endpoints(args.endpoints)
                    .with_cache_duration(args.cache_duration_ms)
                    .with_use_cache(args.use_cache);
                ProviderStreamer::Spotify(streamer)
            }
            Provider::Noop => ProviderStreamer::Noop(NoopStreamer::new()),
        };

        debug!(?provider, use_cache = args.use_cache, "now playing client ready");

        Ok(Self {
            provider,
            storer,
            streamer,
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn storer(&self) -> &Arc<dyn Storer> {
        &self.storer
    }

    pub fn streamer(&self) -> &ProviderStreamer {
        &self.streamer
    }

    pub async fn fetch_currently_playing_or_last_played(&self) -> Res<Option<Song>> {
        self.streamer.fetch_currently_playing().await
    }
}

fn storer_for(kind: StorageKind) -> Arc<dyn Storer> {
    match kind {
        StorageKind::InMemory => Arc::new(InMemoryStorage::new()),
    }
}
