use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config, error, info,
    now_playing::{NowPlaying, NowPlayingArgs, Provider},
    success,
    types::{Song, SongTableRow},
    warning,
};

/// Prints the song the user is listening to, or the last one they played.
///
/// Builds a [`NowPlaying`] client from the environment (see [`crate::config`]),
/// fetches the song behind a spinner and prints it as a table, or as JSON when
/// `json` is set.
///
/// # Arguments
///
/// * `provider` - Streaming provider to ask
/// * `no_cache` - Skip the song cache for this run
/// * `json` - Print the song as JSON instead of a table
///
/// # Error Handling
///
/// Configuration and upstream failures terminate the program with an error
/// message. An empty play history is reported as a warning.
pub async fn current(provider: Provider, no_cache: bool, json: bool) {
    let args = match build_args(provider, no_cache) {
        Ok(args) => args,
        Err(e) => error!("{}", e),
    };

    let now_playing = match NowPlaying::new(provider, args) {
        Ok(np) => np,
        Err(e) => error!("Cannot set up the {:?} provider. Err: {}", provider, e),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching currently playing song...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = now_playing.fetch_currently_playing_or_last_played().await;
    pb.finish_and_clear();

    match result {
        Ok(Some(song)) => print_song(&song, json),
        Ok(None) => warning!("Nothing is playing and there is no play history."),
        Err(e) => error!("Failed to fetch the current song. Err: {}", e),
    }
}

fn build_args(provider: Provider, no_cache: bool) -> crate::Res<NowPlayingArgs> {
    let mut args = NowPlayingArgs {
        use_cache: !no_cache,
        cache_duration_ms: config::cache_duration_ms()?,
        ..NowPlayingArgs::default()
    };

    if provider == Provider::Spotify {
        args.streamer_args = Some(config::spotify_credentials()?);
        args.endpoints = config::spotify_endpoints();
    }

    Ok(args)
}

fn print_song(song: &Song, json: bool) {
    if json {
        match serde_json::to_string_pretty(song) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Cannot serialize song. Err: {}", e),
        }
        return;
    }

    if song.is_playing {
        success!("Now playing: {} - {}", song.artist, song.title);
    } else {
        info!("Last played: {} - {}", song.artist, song.title);
    }

    let table = Table::new(vec![SongTableRow::from(song)]);
    println!("{}", table);
}
