//! Now Playing Library
//!
//! This library answers one question for a music streaming user: what are they
//! listening to right now, or what did they play last. It hides token exchange,
//! HTTP calls, response normalization and short-lived caching behind
//! [`NowPlaying`], which hands back a provider-independent [`Song`].
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `common` - Fixed cache keys, endpoints and defaults
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy
//! - `now_playing` - Facade selecting a provider and a storage backend
//! - `spotify` - Spotify streamer (token exchange, player lookups)
//! - `storage` - Expiring key-value stores
//! - `streamer` - Provider capability trait and the no-op provider
//! - `types` - Data structures and type definitions
//! - `utils` - Normalization and HTTP helpers
//!
//! # Example
//!
//! ```
//! use nowplaying::{NowPlaying, NowPlayingArgs, Provider, config};
//!
//! #[tokio::main]
//! async fn main() -> nowplaying::Res<()> {
//!     let credentials = config::spotify_credentials()?;
//!     let np = NowPlaying::new(Provider::Spotify, NowPlayingArgs::spotify(credentials))?;
//!     println!("{:?}", np.fetch_currently_playing_or_last_played().await?);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod common;
pub mod config;
pub mod error;
pub mod now_playing;
pub mod spotify;
pub mod storage;
pub mod streamer;
pub mod types;
pub mod utils;

pub use error::NowPlayingError;
pub use now_playing::{NowPlaying, NowPlayingArgs, Provider};
pub use types::Song;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation of the crate reports a [`NowPlayingError`].
///
/// # Example
///
/// ```
/// use nowplaying::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, NowPlayingError>;

/// Prints a status line with a blue bullet point.
///
/// Console output for the CLI. Library code reports through `tracing`.
///
/// ```
/// info!("Last played: {} - {}", song.artist, song.title);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a status line with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red error line to stderr and exits with code 1.
///
/// Only for failures the CLI cannot recover from; the expansion diverges, so
/// it can stand in any `match` arm.
///
/// ```
/// let np = match NowPlaying::new(provider, args) {
///     Ok(np) => np,
///     Err(e) => error!("Cannot set up the provider. Err: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow notice for conditions worth seeing but not fatal.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
