//! # CLI Module
//!
//! User-facing commands of the `nowplaying` binary. Each command builds what it
//! needs from the environment, talks to the library through
//! [`crate::NowPlaying`] and reports through the colored output macros.
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! NowPlaying facade
//!     ↓
//! Streamer (Spotify, Noop) + Storer
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! ## Usage
//!
//! ```bash
//! nowplaying current                     # Current or last played song
//! nowplaying current --json --no-cache   # Fresh lookup, JSON output
//! nowplaying current --provider noop     # Demo provider, no network
//! ```

mod current;

pub use current::current;
