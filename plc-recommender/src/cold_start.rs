//! Pseudo-seeds for queries without any seeds
//!
//! The top aggregated candidates stand in for the missing seeds so the
//! diversity and slate-building steps have something to work with. The query
//! itself is never touched.

use crate::aggregator::AggregatedScores;
use crate::catalog::Catalog;
use crate::padding::PopularityPadder;
use crate::params::RecommenderParams;
use crate::scores::top_ids;
use plc_common::{SongId, TagId};
use std::collections::HashSet;
use tracing::debug;

/// Seeds used by the steps after aggregation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveSeeds {
    pub songs: Vec<SongId>,
    pub tags: Vec<TagId>,
}

/// Derive pseudo-seeds from aggregated scores, padded by popularity
pub fn fill_seeds(scores: &AggregatedScores, catalog: &Catalog, params: &RecommenderParams) -> EffectiveSeeds {
    let song_padder = PopularityPadder::new(catalog.popular_songs(), catalog.song_ranking());
    let mut songs = song_padder.pad(
        top_ids(&scores.songs, params.song_candidate_pool),
        params.song_output_size,
        &HashSet::new(),
    );
    songs.truncate(params.song_output_size);

    let tag_padder = PopularityPadder::new(catalog.popular_tags(), catalog.tag_ranking());
    let mut tags = tag_padder.pad(
        top_ids(&scores.tags, params.tag_candidate_pool),
        params.tag_output_size,
        &HashSet::new(),
    );
    tags.truncate(params.tag_output_size);

    debug!(songs = songs.len(), tags = tags.len(), "Filled cold-start pseudo-seeds");

    EffectiveSeeds { songs, tags }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plc_common::Playlist;

    fn catalog(params: &RecommenderParams) -> Catalog {
        // Song k appears in k playlists, so popularity runs 6, 5, 4, ...
        let mut corpus = Vec::new();
        let mut id = 0;
        for song in 1..=6u32 {
            for _ in 0..song {
                id += 1;
                corpus.push(Playlist {
                    id,
                    title: String::new(),
                    tags: vec![format!("t{}", song)],
                    songs: vec![song],
                    like_count: 0,
                    updated_at: String::new(),
                });
            }
        }
        Catalog::build(&corpus, &[], params).unwrap()
    }

    fn params() -> RecommenderParams {
        RecommenderParams {
            song_output_size: 4,
            tag_output_size: 2,
            song_candidate_pool: 8,
            tag_candidate_pool: 4,
            popular_song_count: 5,
            popular_tag_count: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_aggregated_candidates_come_first_then_popularity() {
        let params = params();
        let catalog = catalog(&params);
        let scores = AggregatedScores {
            songs: vec![(2, 9.0), (6, 1.0)],
            tags: vec![],
        };

        let seeds = fill_seeds(&scores, &catalog, &params);
        assert_eq!(seeds.songs, vec![2, 6, 5, 4]);
        assert_eq!(seeds.tags, vec!["t6".to_string(), "t5".to_string()]);
    }

    #[test]
    fn test_truncated_to_output_sizes() {
        let params = params();
        let catalog = catalog(&params);
        let scores = AggregatedScores {
            songs: (1..=6).rev().map(|s| (s, f64::from(s))).collect(),
            tags: (1..=6).map(|t| (format!("t{}", t), 1.0)).collect(),
        };

        let seeds = fill_seeds(&scores, &catalog, &params);
        assert_eq!(seeds.songs.len(), 4);
        assert_eq!(seeds.tags.len(), 2);
        assert_eq!(seeds.songs, vec![6, 5, 4, 3]);
    }
}
