//! Client for the TVShowTime REST API.
//!
//! Wraps the `https://api.tvshowtime.com/v1` endpoints: OAuth code exchange,
//! episode lookup, and watched-state checkins by filename, TVDB id, or
//! IMDb id.

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use client::TvstClient;
pub use error::TvstError;
pub use types::EpisodeId;
