//! Routing of neighbor sources to aggregation roles

use super::{NeighborResult, NeighborSources, SourceKind};
use crate::params::RecommenderParams;
use crate::status::QueryStatus;
use plc_common::PlaylistId;
use tracing::debug;

/// Source assigned to each of the three roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub primary_song: SourceKind,
    pub primary_tag: SourceKind,
    pub auxiliary: SourceKind,
}

impl Route {
    /// Fixed routing table
    ///
    /// | Status | primary-song | primary-tag | auxiliary |
    /// |--------|--------------|-------------|-----------|
    /// | Empty  | title        | title       | plain     |
    /// | Sparse | plain        | title       | genre     |
    /// | Rich   | plain        | genre       | title     |
    pub fn for_status(status: QueryStatus) -> Self {
        match status {
            QueryStatus::Empty => Self {
                primary_song: SourceKind::Title,
                primary_tag: SourceKind::Title,
                auxiliary: SourceKind::Plain,
            },
            QueryStatus::Sparse => Self {
                primary_song: SourceKind::Plain,
                primary_tag: SourceKind::Title,
                auxiliary: SourceKind::Genre,
            },
            QueryStatus::Rich => Self {
                primary_song: SourceKind::Plain,
                primary_tag: SourceKind::Genre,
                auxiliary: SourceKind::Title,
            },
        }
    }
}

/// Neighbor lists for the three roles of one query
#[derive(Debug, Clone, Default)]
pub struct NeighborSelection {
    /// At most `n_msp` entries
    pub primary_song: NeighborResult,
    /// At most `n_mtp` entries
    pub primary_tag: NeighborResult,
    /// At most `n_mtp` entries
    pub auxiliary: NeighborResult,
}

impl NeighborSelection {
    /// Fetch the three lists for `query` following the route for `status`
    pub fn fetch(
        status: QueryStatus,
        query: PlaylistId,
        sources: &NeighborSources,
        params: &RecommenderParams,
    ) -> Self {
        let route = Route::for_status(status);

        let fetch = |kind: SourceKind, k: usize| {
            let source = sources.get(kind);
            let mut result = source.neighbors(query, k);
            result.truncate(k);
            debug!(
                query,
                source = source.name(),
                requested = k,
                returned = result.len(),
                "Fetched neighbors"
            );
            result
        };

        Self {
            primary_song: fetch(route.primary_song, params.n_msp),
            primary_tag: fetch(route.primary_tag, params.n_mtp),
            auxiliary: fetch(route.auxiliary, params.n_mtp),
        }
    }
}
