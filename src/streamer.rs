//! Provider-independent access to the current song.

use async_trait::async_trait;

use crate::{Res, spotify::SpotifyStreamer, types::Song};

/// One streaming provider's way of answering "what is this user listening to".
///
/// Returns `Ok(None)` when nothing is playing and there is no play history.
#[async_trait]
pub trait Streamer: Send + Sync {
    async fn fetch_currently_playing(&self) -> Res<Option<Song>>;
}

/// Stand-in provider for demos and tests. Never touches the network or a
/// cache and always reports the same song.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStreamer;

impl NoopStreamer {
    pub fn new() -> Self {
        NoopStreamer
    }

    pub fn song() -> Song {
        Song {
            title: "The title".to_string(),
            artist: "The artist".to_string(),
            image_url: "https://the.image.url".to_string(),
            preview_url: Some("https://the.preview.url".to_string()),
            page_url: "https://the.page.url".to_string(),
            is_playing: true,
        }
    }
}

#[async_trait]
impl Streamer for NoopStreamer {
    async fn fetch_currently_playing(&self) -> Res<Option<Song>> {
        Ok(Some(Self::song()))
    }
}

/// Streamer picked once at construction time.
pub enum ProviderStreamer {
    Spotify(SpotifyStreamer),
    Noop(NoopStreamer),
}

#[async_trait]
impl Streamer for ProviderStreamer {
    async fn fetch_currently_playing(&self) -> Res<Option<Song>> {
        match self {
            ProviderStreamer::Spotify(streamer) => streamer.fetch_currently_playing().await,
            ProviderStreamer::Noop(streamer) => streamer.fetch_currently_playing().await,
        }
    }
}
