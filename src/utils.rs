use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::StatusCode;

use crate::{
    Res,
    error::NowPlayingError,
    types::{OAuthErrorResponse, Song, SpotifyArtist, SpotifyErrorResponse, SpotifyTrack},
};

/// Builds the value of the `Authorization` header used by the client
/// credentials part of the refresh token exchange.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{client_id}:{client_secret}"));
    format!("Basic {encoded}")
}

pub fn join_artists(artists: &[SpotifyArtist]) -> String {
    artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Turns a provider track into a `Song`.
///
/// The cover is the first album image. Tracks without any image are rejected
/// rather than handed out with a made-up URL.
pub fn normalize_track(track: &SpotifyTrack, is_playing: bool) -> Res<Song> {
    let image_url = track
        .album
        .images
        .first()
        .map(|image| image.url.clone())
        .ok_or_else(|| {
            NowPlayingError::InvalidTrack(format!("track '{}' has no album image", track.name))
        })?;

    Ok(Song {
        title: track.name.clone(),
        artist: join_artists(&track.artists),
        image_url,
        preview_url: track.preview_url.clone(),
        page_url: track.external_urls.spotify.clone(),
        is_playing,
    })
}

/// Maps a failed provider response body to an `UpstreamAuth` error.
///
/// The Web API answers with `{"error": {"status", "message"}}` while the
/// accounts service uses the OAuth `{"error", "error_description"}` shape.
/// Anything else falls back to the HTTP status and the raw body.
pub fn upstream_error(status: StatusCode, body: &str) -> NowPlayingError {
    if let Ok(payload) = serde_json::from_str::<SpotifyErrorResponse>(body) {
        return NowPlayingError::upstream(payload.error.status, payload.error.message);
    }

    match serde_json::from_str::<OAuthErrorResponse>(body) {
        Ok(payload) => NowPlayingError::upstream(
            status.as_u16(),
            payload.error_description.unwrap_or(payload.error),
        ),
        Err(_) => {
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body.trim().to_string()
            };
            NowPlayingError::upstream(status.as_u16(), message)
        }
    }
}
