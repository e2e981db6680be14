//! # PLC Common Library
//!
//! Shared code for the playlist continuation workspace:
//! - Data models (corpus playlists, song metadata, queries, result records)
//! - Error type
//! - JSON file loading and result writing
//! - Root folder and TOML configuration resolution

pub mod config;
pub mod error;
pub mod io;
pub mod models;

pub use error::{Error, Result};
pub use models::{ArtistId, Playlist, PlaylistId, Query, RecommendationRecord, SongId, SongMeta, TagId};
