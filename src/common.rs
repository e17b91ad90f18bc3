//! Process-wide constants.

/// Cache key holding the Spotify access token.
pub const SPOTIFY_ACCESS_TOKEN_KEY: &str = "spotify_access_token";

/// Cache key holding the last normalized song.
pub const SPOTIFY_TRACK_KEY: &str = "spotify_track";

pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Time subtracted from the provider's token lifetime before caching it, so a
/// token is never served right at its expiry boundary.
pub const ACCESS_TOKEN_EXPIRY_MARGIN_MS: i64 = 1000;

/// Default time a normalized song stays cached.
pub const DEFAULT_CACHE_DURATION_MS: i64 = 60_000;
