//! Neighbor playlist retrieval
//!
//! A [`NeighborSource`] answers "which corpus playlists resemble this query,
//! best first". The recommender holds three of them (plain embedding,
//! genre-augmented embedding, title embedding) and the [`selector`] decides
//! which one feeds each aggregation role.
//!
//! Implementations must be immutable after construction; they are shared by
//! reference across worker threads.

pub mod cosine;
pub mod precomputed;
pub mod selector;

pub use cosine::{CosineNeighbors, EmbeddingTable};
pub use precomputed::PrecomputedNeighbors;
pub use selector::{NeighborSelection, Route};

use plc_common::PlaylistId;
use std::cmp::Ordering;

/// One similar corpus playlist
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub playlist: PlaylistId,
    pub score: f64,
}

impl Neighbor {
    pub fn new(playlist: PlaylistId, score: f64) -> Self {
        Self { playlist, score }
    }

    /// Descending score, ascending playlist id on ties
    pub(crate) fn rank_order(a: &Neighbor, b: &Neighbor) -> Ordering {
        b.score.total_cmp(&a.score).then_with(|| a.playlist.cmp(&b.playlist))
    }
}

/// Neighbors of one query, best first
pub type NeighborResult = Vec<Neighbor>;

/// Similarity lookup consumed by the aggregation pipeline
pub trait NeighborSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Up to `k` neighbors of `query`, descending by score
    ///
    /// Unknown queries yield an empty result.
    fn neighbors(&self, query: PlaylistId, k: usize) -> NeighborResult;
}

/// Which of the three configured sources to consult
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Autoencoder embedding of songs and tags
    Plain,
    /// Autoencoder embedding concatenated with genre features
    Genre,
    /// Word-vector embedding of title, tags and update month
    Title,
}

/// The three sources, one per [`SourceKind`]
pub struct NeighborSources {
    plain: Box<dyn NeighborSource>,
    genre: Box<dyn NeighborSource>,
    title: Box<dyn NeighborSource>,
}

impl NeighborSources {
    pub fn new(
        plain: Box<dyn NeighborSource>,
        genre: Box<dyn NeighborSource>,
        title: Box<dyn NeighborSource>,
    ) -> Self {
        Self { plain, genre, title }
    }

    pub fn get(&self, kind: SourceKind) -> &dyn NeighborSource {
        match kind {
            SourceKind::Plain => self.plain.as_ref(),
            SourceKind::Genre => self.genre.as_ref(),
            SourceKind::Title => self.title.as_ref(),
        }
    }
}
