use nowplaying::error::NowPlayingError;
use nowplaying::types::{ExternalUrls, SpotifyAlbum, SpotifyArtist, SpotifyImage, SpotifyTrack};
use nowplaying::utils::*;
use reqwest::StatusCode;

// Helper function to create a test track
fn create_test_track(name: &str, artists: &[&str], images: &[&str]) -> SpotifyTrack {
    SpotifyTrack {
        name: name.to_string(),
        artists: artists
            .iter()
            .map(|a| SpotifyArtist {
                name: a.to_string(),
            })
            .collect(),
        external_urls: ExternalUrls {
            spotify: format!("https://open.spotify.com/track/{}", name.to_lowercase()),
        },
        album: SpotifyAlbum {
            images: images
                .iter()
                .map(|url| SpotifyImage {
                    url: url.to_string(),
                })
                .collect(),
        },
        preview_url: Some("https://p.scdn.co/mp3-preview/abc".to_string()),
    }
}

#[test]
fn test_basic_auth_header() {
    let header = basic_auth_header("test-client-id", "test-client-secret");
    assert_eq!(header, "Basic dGVzdC1jbGllbnQtaWQ6dGVzdC1jbGllbnQtc2VjcmV0");
}

#[test]
fn test_join_artists_keeps_provider_order() {
    let track = create_test_track("Kolwa", &["Euggy", "Suraj", "Mumba Yachi"], &["img"]);
    assert_eq!(join_artists(&track.artists), "Euggy, Suraj, Mumba Yachi");

    let solo = create_test_track("Coming Home", &["Kanye West"], &["img"]);
    assert_eq!(join_artists(&solo.artists), "Kanye West");

    assert_eq!(join_artists(&[]), "");
}

#[test]
fn test_normalize_track() {
    let track = create_test_track(
        "Kolwa",
        &["Euggy", "Suraj"],
        &["https://i.scdn.co/image/first", "https://i.scdn.co/image/second"],
    );

    let song = normalize_track(&track, true).unwrap();

    assert_eq!(song.title, "Kolwa");
    assert_eq!(song.artist, "Euggy, Suraj");
    // first image wins
    assert_eq!(song.image_url, "https://i.scdn.co/image/first");
    assert_eq!(
        song.preview_url.as_deref(),
        Some("https://p.scdn.co/mp3-preview/abc")
    );
    assert_eq!(song.page_url, "https://open.spotify.com/track/kolwa");
    assert!(song.is_playing);

    let last_played = normalize_track(&track, false).unwrap();
    assert!(!last_played.is_playing);
}

#[test]
fn test_normalize_track_without_image_fails() {
    let track = create_test_track("Imageless", &["Nobody"], &[]);

    let err = normalize_track(&track, true).unwrap_err();
    assert!(matches!(err, NowPlayingError::InvalidTrack(_)));
}

#[test]
fn test_upstream_error_from_web_api_payload() {
    let body = r#"{"error": {"status": 400, "message": "something went wrong"}}"#;
    let err = upstream_error(StatusCode::BAD_REQUEST, body);

    match err {
        NowPlayingError::UpstreamAuth { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "something went wrong");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_upstream_error_from_oauth_payload() {
    let body = r#"{"error": "invalid_grant", "error_description": "Invalid refresh token"}"#;
    let err = upstream_error(StatusCode::BAD_REQUEST, body);

    assert_eq!(err.status(), Some(400));
    assert_eq!(
        err.to_string(),
        "Upstream error (status 400): Invalid refresh token"
    );
}

#[test]
fn test_upstream_error_from_unstructured_body() {
    let err = upstream_error(StatusCode::BAD_GATEWAY, "");
    assert_eq!(err.to_string(), "Upstream error (status 502): Bad Gateway");

    let err = upstream_error(StatusCode::INTERNAL_SERVER_ERROR, "  oops  ");
    assert_eq!(err.to_string(), "Upstream error (status 500): oops");
}
