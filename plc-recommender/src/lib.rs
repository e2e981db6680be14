//! plc-recommender library interface
//!
//! Playlist continuation: for each query playlist, recommend songs and tags
//! from the neighbor playlists of a training corpus. The binary in `main.rs`
//! wires configuration, data loading and result writing around
//! [`Recommender`].

pub mod aggregator;
pub mod catalog;
pub mod cold_start;
pub mod config;
pub mod diversity;
pub mod logging;
pub mod neighbors;
pub mod orchestrator;
pub mod padding;
pub mod params;
pub mod scores;
pub mod status;

pub use catalog::Catalog;
pub use config::AppConfig;
pub use neighbors::{NeighborSource, NeighborSources, SourceKind};
pub use orchestrator::Recommender;
pub use params::RecommenderParams;
pub use status::QueryStatus;
