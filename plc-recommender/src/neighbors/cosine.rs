//! Brute-force cosine similarity over precomputed embedding tables
//!
//! Both the corpus and the queries are embedded offline (the models live
//! outside this workspace). Each file is a JSON object mapping playlist id to
//! a vector of floats. Scoring is a full scan of the corpus, parallelized
//! across corpus rows.

use super::{Neighbor, NeighborResult, NeighborSource};
use plc_common::io::load_json;
use plc_common::{Error, PlaylistId, Result};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Embedding vectors keyed by playlist id
#[derive(Debug, Clone)]
pub struct EmbeddingTable {
    dim: usize,
    rows: HashMap<PlaylistId, Vec<f32>>,
}

impl EmbeddingTable {
    /// Validate that every row has the same dimension
    pub fn new(rows: HashMap<PlaylistId, Vec<f32>>) -> Result<Self> {
        let dim = rows.values().next().map(Vec::len).unwrap_or(0);
        if let Some((id, row)) = rows.iter().find(|(_, row)| row.len() != dim) {
            return Err(Error::InvalidInput(format!(
                "embedding for playlist {} has dimension {}, expected {}",
                id,
                row.len(),
                dim
            )));
        }
        Ok(Self { dim, rows })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let rows: HashMap<PlaylistId, Vec<f32>> = load_json(path)?;
        let table = Self::new(rows)?;
        info!("Loaded {} embeddings (dim {}) from {}", table.len(), table.dim, path.display());
        Ok(table)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: PlaylistId) -> Option<&[f32]> {
        self.rows.get(&id).map(Vec::as_slice)
    }
}

/// Cosine similarity, 0 when either vector has zero norm
pub fn cosine(a: &[f32], b: &[f32]) -> f64 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Nearest corpus playlists by cosine similarity of embeddings
pub struct CosineNeighbors {
    name: String,
    corpus: Vec<(PlaylistId, Vec<f32>)>,
    queries: EmbeddingTable,
}

impl CosineNeighbors {
    pub fn new(name: impl Into<String>, corpus: EmbeddingTable, queries: EmbeddingTable) -> Result<Self> {
        let name = name.into();
        if !corpus.is_empty() && !queries.is_empty() && corpus.dim() != queries.dim() {
            return Err(Error::InvalidInput(format!(
                "source '{}': corpus dimension {} differs from query dimension {}",
                name,
                corpus.dim(),
                queries.dim()
            )));
        }

        let mut rows: Vec<(PlaylistId, Vec<f32>)> = corpus.rows.into_iter().collect();
        rows.sort_by_key(|(id, _)| *id);

        Ok(Self {
            name,
            corpus: rows,
            queries,
        })
    }
}

impl NeighborSource for CosineNeighbors {
    fn name(&self) -> &str {
        &self.name
    }

    fn neighbors(&self, query: PlaylistId, k: usize) -> NeighborResult {
        let Some(vector) = self.queries.get(query) else {
            warn!(query, source = %self.name, "No query embedding");
            return Vec::new();
        };

        let mut scored: NeighborResult = self
            .corpus
            .par_iter()
            .map(|(id, row)| Neighbor::new(*id, cosine(vector, row)))
            .collect();

        if scored.len() > k && k > 0 {
            scored.select_nth_unstable_by(k - 1, Neighbor::rank_order);
        }
        scored.truncate(k);
        scored.sort_by(Neighbor::rank_order);
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(PlaylistId, [f32; 2])]) -> EmbeddingTable {
        EmbeddingTable::new(rows.iter().map(|(id, v)| (*id, v.to_vec())).collect()).unwrap()
    }

    #[test]
    fn test_cosine_values() {
        assert!((cosine(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-12);
        assert!(cosine(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-12);
        assert!((cosine(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-12);
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_neighbors_ranked_best_first() {
        let corpus = table(&[(1, [1.0, 0.0]), (2, [0.0, 1.0]), (3, [1.0, 1.0]), (4, [2.0, 0.0])]);
        let queries = table(&[(100, [1.0, 0.1])]);
        let source = CosineNeighbors::new("plain", corpus, queries).unwrap();

        let result = source.neighbors(100, 3);
        let ids: Vec<_> = result.iter().map(|n| n.playlist).collect();
        // 1 and 4 point the same way: tie broken by id
        assert_eq!(ids, vec![1, 4, 3]);
        assert!(result[0].score >= result[1].score && result[1].score >= result[2].score);
    }

    #[test]
    fn test_unknown_query_and_zero_k() {
        let corpus = table(&[(1, [1.0, 0.0])]);
        let queries = table(&[(100, [1.0, 0.0])]);
        let source = CosineNeighbors::new("genre", corpus, queries).unwrap();

        assert!(source.neighbors(999, 5).is_empty());
        assert!(source.neighbors(100, 0).is_empty());
        assert_eq!(source.neighbors(100, 5).len(), 1);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let mut rows = HashMap::new();
        rows.insert(1, vec![1.0, 0.0]);
        rows.insert(2, vec![1.0]);
        assert!(EmbeddingTable::new(rows).is_err());

        let corpus = table(&[(1, [1.0, 0.0])]);
        let mut query_rows = HashMap::new();
        query_rows.insert(5, vec![1.0, 0.0, 0.0]);
        let queries = EmbeddingTable::new(query_rows).unwrap();
        assert!(CosineNeighbors::new("plain", corpus, queries).is_err());
    }
}
