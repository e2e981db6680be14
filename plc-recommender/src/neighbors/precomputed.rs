//! Neighbor lists computed offline and loaded from disk
//!
//! File format: a JSON object keyed by query id, each value a list of
//! `[playlist_id, score]` pairs:
//!
//! ```json
//! { "61281": [[1021, 0.93], [88, 0.91]], "7": [] }
//! ```

use super::{Neighbor, NeighborResult, NeighborSource};
use plc_common::io::load_json;
use plc_common::{PlaylistId, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// In-memory table of ranked neighbors per query
pub struct PrecomputedNeighbors {
    name: String,
    table: HashMap<PlaylistId, NeighborResult>,
}

impl PrecomputedNeighbors {
    /// Build from raw pairs; each list is re-sorted best first
    pub fn from_pairs(name: impl Into<String>, pairs: HashMap<PlaylistId, Vec<(PlaylistId, f64)>>) -> Self {
        let table = pairs
            .into_iter()
            .map(|(query, list)| {
                let mut neighbors: NeighborResult =
                    list.into_iter().map(|(playlist, score)| Neighbor::new(playlist, score)).collect();
                neighbors.sort_by(Neighbor::rank_order);
                (query, neighbors)
            })
            .collect();

        Self {
            name: name.into(),
            table,
        }
    }

    pub fn load(name: impl Into<String>, path: &Path) -> Result<Self> {
        let name = name.into();
        let pairs: HashMap<PlaylistId, Vec<(PlaylistId, f64)>> = load_json(path)?;
        info!("Loaded {} neighbor lists for source '{}' from {}", pairs.len(), name, path.display());
        Ok(Self::from_pairs(name, pairs))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl NeighborSource for PrecomputedNeighbors {
    fn name(&self) -> &str {
        &self.name
    }

    fn neighbors(&self, query: PlaylistId, k: usize) -> NeighborResult {
        match self.table.get(&query) {
            Some(list) => list.iter().take(k).copied().collect(),
            None => {
                warn!(query, source = %self.name, "No precomputed neighbors for query");
                Vec::new()
            }
        }
    }
}
