//! Per-query pipeline and batch driver
//!
//! `classify → select neighbors → aggregate → (cold start) → diversity →
//! song slate → tag slate`. Every record carries exactly
//! `song_output_size` distinct songs and `tag_output_size` distinct tags.

use crate::aggregator::{tag_cooccurrence_songs, ScoreAggregator};
use crate::catalog::Catalog;
use crate::cold_start::{fill_seeds, EffectiveSeeds};
use crate::diversity::{diversity_picks, splice_picks};
use crate::neighbors::{NeighborSelection, NeighborSources};
use crate::padding::{remove_seen, PopularityPadder};
use crate::params::RecommenderParams;
use crate::scores::top_ids;
use crate::status::QueryStatus;
use plc_common::{Query, RecommendationRecord, SongId, TagId};
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Immutable recommender state shared by all worker threads
pub struct Recommender {
    catalog: Arc<Catalog>,
    sources: NeighborSources,
    params: RecommenderParams,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>, sources: NeighborSources, params: RecommenderParams) -> Self {
        Self {
            catalog,
            sources,
            params,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn params(&self) -> &RecommenderParams {
        &self.params
    }

    /// Recommend songs and tags for one query
    pub fn recommend(&self, query: &Query) -> RecommendationRecord {
        let status = QueryStatus::classify(query.songs.len(), query.tags.len());
        let selection = NeighborSelection::fetch(status, query.id, &self.sources, &self.params);
        let aggregated = ScoreAggregator::new(&self.catalog, &self.params).aggregate(&query.songs, &selection);

        let seeds = if status == QueryStatus::Empty {
            fill_seeds(&aggregated, &self.catalog, &self.params)
        } else {
            EffectiveSeeds {
                songs: query.songs.clone(),
                tags: query.tags.clone(),
            }
        };

        let picks = diversity_picks(&self.catalog, &seeds.songs, status, &aggregated.songs, &self.params);

        let songs = {
            let candidates = if seeds.songs.is_empty() {
                tag_cooccurrence_songs(&self.catalog, &seeds.tags, self.params.song_candidate_pool)
            } else {
                top_ids(&aggregated.songs, self.params.song_candidate_pool)
            };
            let mut slate = self.song_slate(status, &seeds.songs, candidates);
            splice_picks(&mut slate, &picks, self.params.song_output_size);
            slate
        };

        let tags = self.tag_slate(status, &seeds.tags, top_ids(&aggregated.tags, self.params.tag_candidate_pool));

        if songs.len() != self.params.song_output_size || tags.len() != self.params.tag_output_size {
            warn!(
                query = query.id,
                songs = songs.len(),
                tags = tags.len(),
                "Recommendation record is short"
            );
        }

        debug!(
            query = query.id,
            status = status.as_str(),
            seed_songs = seeds.songs.len(),
            seed_tags = seeds.tags.len(),
            picks = picks.len(),
            "Recommended"
        );

        RecommendationRecord {
            id: query.id,
            songs,
            tags,
        }
    }

    /// Recommend for a whole question set on the rayon pool, in input order
    pub fn recommend_all(&self, queries: &[Query]) -> Vec<RecommendationRecord> {
        let started = Instant::now();
        info!("Recommending for {} queries", queries.len());

        let records: Vec<RecommendationRecord> = queries.par_iter().map(|query| self.recommend(query)).collect();

        let elapsed = started.elapsed();
        info!(
            "Recommended for {} queries in {:.2}s ({:.1} queries/s)",
            records.len(),
            elapsed.as_secs_f64(),
            records.len() as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
        );
        records
    }

    fn song_slate(&self, status: QueryStatus, seeds: &[SongId], candidates: Vec<SongId>) -> Vec<SongId> {
        let excluded: HashSet<SongId> = match status {
            QueryStatus::Empty => HashSet::new(),
            _ => seeds.iter().copied().collect(),
        };
        let candidates = match status {
            QueryStatus::Empty => candidates,
            _ => remove_seen(seeds, &candidates),
        };

        let padder = PopularityPadder::new(self.catalog.popular_songs(), self.catalog.song_ranking());
        let mut slate = padder.pad(candidates, self.params.song_output_size, &excluded);
        slate.truncate(self.params.song_output_size);
        slate
    }

    fn tag_slate(&self, status: QueryStatus, seeds: &[TagId], candidates: Vec<TagId>) -> Vec<TagId> {
        let excluded: HashSet<TagId> = match status {
            QueryStatus::Empty => HashSet::new(),
            _ => seeds.iter().cloned().collect(),
        };
        let candidates = match status {
            QueryStatus::Empty => candidates,
            _ => remove_seen(seeds, &candidates),
        };

        let padder = PopularityPadder::new(self.catalog.popular_tags(), self.catalog.tag_ranking());
        let mut slate = padder.pad(candidates, self.params.tag_output_size, &excluded);
        slate.truncate(self.params.tag_output_size);
        slate
    }
}
