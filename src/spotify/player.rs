use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use tracing::{debug, warn};

use crate::{
    Res,
    common::SPOTIFY_TRACK_KEY,
    storage::StorerExt,
    streamer::Streamer,
    types::{AccessToken, CurrentlyPlayingResponse, RecentlyPlayedResponse, Song, SpotifyTrack},
    utils,
};

use super::SpotifyStreamer;

impl SpotifyStreamer {
    /// Returns the track the user is listening to, or the last one they
    /// played when nothing is active.
    ///
    /// # Flow
    ///
    /// 1. With the song cache enabled a cached song is returned right away.
    /// 2. An access token is obtained through [`SpotifyStreamer::get_access_token`].
    /// 3. The currently playing endpoint is queried. A `401` forces one token
    ///    refresh and exactly one retry.
    /// 4. A `204`, any other non-success status, a paused player or an item
    ///    that is not a track hands over to [`SpotifyStreamer::fetch_last_played`].
    /// 5. A playing track becomes a `Song` with `is_playing` set and is cached
    ///    when the song cache is enabled.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when nothing is playing and there is no play history.
    pub async fn fetch_currently_playing(&self) -> Res<Option<Song>> {
        if self.use_cache() {
            if let Some(song) = self.storer.get::<Song>(SPOTIFY_TRACK_KEY) {
                debug!(title = %song.title, "serving song from cache");
                return Ok(Some(song));
            }
        }

        let refresh_token = self.credentials.refresh_token.as_str();
        let mut access_token = self.get_access_token(refresh_token, false).await?;
        let mut response = self.request_currently_playing(&access_token).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("access token rejected, refreshing it and retrying once");
            access_token = self.get_access_token(refresh_token, true).await?;
            response = self.request_currently_playing(&access_token).await?;
        }

        let status = response.status();
        if status == StatusCode::NO_CONTENT || !status.is_success() {
            debug!(%status, "no currently playing track, falling back to last played");
            return self.fetch_last_played(&access_token).await;
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return self.fetch_last_played(&access_token).await;
        }

        let playing: CurrentlyPlayingResponse = serde_json::from_str(&body)?;
        let is_track = playing.currently_playing_type.as_deref() == Some("track");
        let item = match playing.item {
            Some(item) if playing.is_playing && is_track && !item.is_null() => item,
            _ => {
                debug!(
                    is_playing = playing.is_playing,
                    kind = playing.currently_playing_type.as_deref().unwrap_or("none"),
                    "player is not playing a track, falling back to last played"
                );
                return self.fetch_last_played(&access_token).await;
            }
        };

        let track: SpotifyTrack = serde_json::from_value(item)?;
        let song = utils::normalize_track(&track, true)?;
        self.cache_song(&song)?;

        Ok(Some(song))
    }

    /// Returns the most recently played track, flagged as not playing.
    ///
    /// Used as the fallback of [`SpotifyStreamer::fetch_currently_playing`].
    /// This call never re-authenticates: a rejected `access_token` is reported
    /// as [`crate::error::NowPlayingError::UpstreamAuth`].
    ///
    /// An empty play history yields `Ok(None)` and leaves the song cache as it
    /// was.
    pub async fn fetch_last_played(&self, access_token: &AccessToken) -> Res<Option<Song>> {
        let res = self
            .client
            .get(format!(
                "{uri}/me/player/recently-played",
                uri = self.endpoints.api_url
            ))
            .query(&[("limit", "1")])
            .bearer_auth(&access_token.access_token)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await?;
            return Err(utils::upstream_error(status, &body));
        }

        let played: RecentlyPlayedResponse = res.json().await?;
        if played.total == Some(0) {
            return Ok(None);
        }

        let Some(item) = played.items.into_iter().next() else {
            return Ok(None);
        };

        let song = utils::normalize_track(&item.track, false)?;
        self.cache_song(&song)?;

        Ok(Some(song))
    }

    async fn request_currently_playing(&self, access_token: &AccessToken) -> Res<Response> {
        let res = self
            .client
            .get(format!(
                "{uri}/me/player/currently-playing",
                uri = self.endpoints.api_url
            ))
            .bearer_auth(&access_token.access_token)
            .send()
            .await?;

        Ok(res)
    }
}

#[async_trait]
impl Streamer for SpotifyStreamer {
    async fn fetch_currently_playing(&self) -> Res<Option<Song>> {
        SpotifyStreamer::fetch_currently_playing(self).await
    }
}
