use std::sync::Arc;

use mockito::Server;
use nowplaying::{
    NowPlaying, NowPlayingArgs, NowPlayingError, Provider, Song,
    common::SPOTIFY_TRACK_KEY,
    config::SpotifyEndpoints,
    storage::{InMemoryStorage, Storer, StorerExt},
    streamer::{NoopStreamer, ProviderStreamer, Streamer},
    types::Credentials,
};

fn credentials() -> Credentials {
    Credentials {
        client_id: "foo".to_string(),
        client_secret: "bar".to_string(),
        refresh_token: "baz".to_string(),
    }
}

const PLAYING_BODY: &str = r#"{
    "is_playing": true,
    "currently_playing_type": "track",
    "item": {
        "name": "Kolwa",
        "artists": [{"name": "Euggy"}, {"name": "Suraj"}],
        "external_urls": {"spotify": "https://open.spotify.com/track/4U6zIONOpmnby5fvOM6han"},
        "album": {"images": [{"url": "https://i.scdn.co/image/ab67616d0000b273712549143"}]},
        "preview_url": null
    }
}"#;

#[tokio::test]
async fn test_noop_provider_returns_fixed_song() {
    let np = NowPlaying::new(Provider::Noop, NowPlayingArgs::default()).unwrap();

    let song = np.fetch_currently_playing_or_last_played().await.unwrap();

    assert_eq!(song, Some(NoopStreamer::song()));
    assert!(matches!(np.streamer(), ProviderStreamer::Noop(_)));
    assert!(np.storer().keys().is_empty());
}

#[tokio::test]
async fn test_noop_streamer_is_deterministic() {
    let streamer = NoopStreamer::new();

    let first = streamer.fetch_currently_playing().await.unwrap();
    let second = streamer.fetch_currently_playing().await.unwrap();

    assert_eq!(first, second);
    assert!(first.unwrap().is_playing);
}

#[test]
fn test_spotify_requires_credentials() {
    let result = NowPlaying::new(Provider::Spotify, NowPlayingArgs::default());

    assert!(matches!(result, Err(NowPlayingError::Configuration(_))));
}

#[test]
fn test_spotify_rejects_blank_credentials() {
    let mut creds = credentials();
    creds.refresh_token = "  ".to_string();

    let result = NowPlaying::new(Provider::Spotify, NowPlayingArgs::spotify(creds));

    match result {
        Err(NowPlayingError::Configuration(message)) => assert!(message.contains("refreshToken")),
        Err(other) => panic!("unexpected error: {other:?}"),
        Ok(_) => panic!("blank refresh token was accepted"),
    }
}

#[test]
fn test_cache_duration_must_be_positive() {
    let args = NowPlayingArgs {
        cache_duration_ms: 0,
        ..NowPlayingArgs::spotify(credentials())
    };

    let result = NowPlaying::new(Provider::Spotify, args);

    assert!(matches!(result, Err(NowPlayingError::Configuration(_))));
}

#[test]
fn test_spotify_streamer_gets_facade_settings() {
    let args = NowPlayingArgs {
        use_cache: false,
        cache_duration_ms: 1234,
        ..NowPlayingArgs::spotify(credentials())
    };

    let np = NowPlaying::new(Provider::Spotify, args).unwrap();

    assert_eq!(np.provider(), Provider::Spotify);
    match np.streamer() {
        ProviderStreamer::Spotify(streamer) => {
            assert!(!streamer.use_cache());
            assert!(streamer.cache_access_token());
            assert_eq!(streamer.cache_duration_ms(), 1234);
            assert_eq!(streamer.refresh_token(), "baz");
        }
        ProviderStreamer::Noop(_) => panic!("expected the Spotify streamer"),
    }
}

#[test]
fn test_provider_from_str() {
    assert_eq!("SPOTIFY".parse::<Provider>().unwrap(), Provider::Spotify);
    assert_eq!("noop".parse::<Provider>().unwrap(), Provider::Noop);
    assert!(matches!(
        "deezer".parse::<Provider>(),
        Err(NowPlayingError::Configuration(_))
    ));
}

#[test]
fn test_credentials_debug_hides_secrets() {
    let out = format!("{:?}", credentials());

    assert!(out.contains("foo"));
    assert!(!out.contains("bar"));
    assert!(!out.contains("baz"));
}

#[tokio::test]
async fn test_facade_with_injected_storer() {
    let mut server = Server::new_async().await;
    let token_mock = server
        .mock("POST", "/api/token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "tok", "token_type": "Bearer", "expires_in": 3600, "scope": ""}"#)
        .expect(1)
        .create_async()
        .await;
    let playing_mock = server
        .mock("GET", "/v1/me/player/currently-playing")
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PLAYING_BODY)
        .expect(1)
        .create_async()
        .await;

    let storage = Arc::new(InMemoryStorage::new());
    let args = NowPlayingArgs {
        endpoints: SpotifyEndpoints::with_base_url(&server.url()),
        ..NowPlayingArgs::spotify(credentials())
    };
    let np = NowPlaying::with_storer(Provider::Spotify, args, storage.clone()).unwrap();

    let expected = Song {
        title: "Kolwa".to_string(),
        artist: "Euggy, Suraj".to_string(),
        image_url: "https://i.scdn.co/image/ab67616d0000b273712549143".to_string(),
        preview_url: None,
        page_url: "https://open.spotify.com/track/4U6zIONOpmnby5fvOM6han".to_string(),
        is_playing: true,
    };

    let first = np.fetch_currently_playing_or_last_played().await.unwrap();
    // second call is served by the song cache
    let second = np.fetch_currently_playing_or_last_played().await.unwrap();

    assert_eq!(first, Some(expected.clone()));
    assert_eq!(second, Some(expected.clone()));
    assert_eq!(storage.get::<Song>(SPOTIFY_TRACK_KEY), Some(expected));
    token_mock.assert_async().await;
    playing_mock.assert_async().await;
}
