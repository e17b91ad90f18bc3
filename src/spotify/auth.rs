use reqwest::header::AUTHORIZATION;
use tracing::{debug, info};

use crate::{
    Res,
    common::{ACCESS_TOKEN_EXPIRY_MARGIN_MS, SPOTIFY_ACCESS_TOKEN_KEY},
    storage::StorerExt,
    types::AccessToken,
    utils,
};

use super::SpotifyStreamer;

impl SpotifyStreamer {
    /// Returns an access token for the Spotify Web API.
    ///
    /// A cached token is returned as is, without any network traffic, unless
    /// `force_refresh` is set or token caching is disabled. Otherwise the
    /// refresh token is exchanged at the accounts service using the client
    /// credentials as basic auth.
    ///
    /// # Caching
    ///
    /// A freshly obtained token is stored under
    /// [`SPOTIFY_ACCESS_TOKEN_KEY`] for its advertised lifetime minus
    /// [`ACCESS_TOKEN_EXPIRY_MARGIN_MS`]. Failed exchanges leave the cache
    /// untouched.
    ///
    /// # Errors
    ///
    /// - [`crate::error::NowPlayingError::UpstreamAuth`] carrying the
    ///   provider's status and message on a non-success response
    /// - [`crate::error::NowPlayingError::Http`] on transport failures
    pub async fn get_access_token(
        &self,
        refresh_token: &str,
        force_refresh: bool,
    ) -> Res<AccessToken> {
        if !force_refresh && self.cache_access_token() {
            if let Some(token) = self.storer.get::<AccessToken>(SPOTIFY_ACCESS_TOKEN_KEY) {
                debug!("using cached Spotify access token");
                return Ok(token);
            }
        }

        info!(force_refresh, "requesting a new Spotify access token");

        let res = self
            .client
            .post(&self.endpoints.token_url)
            .header(
                AUTHORIZATION,
                utils::basic_auth_header(
                    &self.credentials.client_id,
                    &self.credentials.client_secret,
                ),
            )
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await?;
            return Err(utils::upstream_error(status, &body));
        }

        let token: AccessToken = res.json().await?;

        if self.cache_access_token() {
            let ttl_ms = token
                .expires_in
                .saturating_mul(1000)
                .saturating_sub(ACCESS_TOKEN_EXPIRY_MARGIN_MS);
            self.storer
                .set(SPOTIFY_ACCESS_TOKEN_KEY, &token, Some(ttl_ms))?;
        }

        Ok(token)
    }
}
