//! Neighbor evidence aggregation
//!
//! Turns the three neighbor lists of a query into ranked song and tag scores.
//! Three passes add into the same two score tables:
//!
//! - **Pass A** (primary-song neighbors, rank weight `n_msp - idx`): songs
//!   score by co-occurrence ratio × seed overlap × similarity × rank weight,
//!   boosted for frequent songs; tags score by similarity × rank weight.
//! - **Pass B** (primary-tag neighbors, rank weight `n_mtp - idx`): tags score
//!   by similarity × rank weight; songs get the flat similarity.
//! - **Pass C** (auxiliary neighbors): songs of the *last* Pass A playlist get
//!   similarity × `(n_msp - idx)`; tags of the auxiliary playlist get
//!   similarity × `(n_mtp - idx)`.
//!
//! Rank weights always use the requested list size, so short neighbor lists
//! keep their weighting, and Pass C weights turn negative past `n_msp`.

use crate::catalog::Catalog;
use crate::neighbors::{Neighbor, NeighborSelection};
use crate::params::RecommenderParams;
use crate::scores::{top_ids, ScoreTable};
use plc_common::{PlaylistId, SongId, TagId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Ranked aggregation output for one query
#[derive(Debug, Clone, Default)]
pub struct AggregatedScores {
    /// Descending by score, ascending id on ties
    pub songs: Vec<(SongId, f64)>,
    /// Descending by score, ascending id on ties
    pub tags: Vec<(TagId, f64)>,
}

pub struct ScoreAggregator<'a> {
    catalog: &'a Catalog,
    params: &'a RecommenderParams,
}

impl<'a> ScoreAggregator<'a> {
    pub fn new(catalog: &'a Catalog, params: &'a RecommenderParams) -> Self {
        Self { catalog, params }
    }

    /// Share of each corpus playlist's songs that are seed songs
    ///
    /// Only playlists containing at least one seed appear. A playlist without
    /// songs keeps the raw count.
    pub fn cooccurrence_ratios(&self, seed_songs: &[SongId]) -> HashMap<PlaylistId, f64> {
        let mut counts: HashMap<PlaylistId, usize> = HashMap::new();
        for &seed in seed_songs {
            for playlist in self.catalog.playlists_with_song(seed) {
                *counts.entry(playlist).or_insert(0) += 1;
            }
        }

        counts
            .into_iter()
            .map(|(playlist, count)| {
                let size = self.catalog.songs_of(playlist).len();
                let ratio = if size > 0 {
                    count as f64 / size as f64
                } else {
                    count as f64
                };
                (playlist, ratio)
            })
            .collect()
    }

    /// Run the three passes and rank the results
    pub fn aggregate(&self, seed_songs: &[SongId], selection: &NeighborSelection) -> AggregatedScores {
        let mut song_scores: ScoreTable<SongId> = ScoreTable::new();
        let mut tag_scores: ScoreTable<TagId> = ScoreTable::new();

        let ratios = self.cooccurrence_ratios(seed_songs);
        let overlap = SeedOverlap::new(self.catalog, &selection.primary_song, seed_songs);

        self.pass_primary_song(&selection.primary_song, &ratios, &overlap, &mut song_scores, &mut tag_scores);
        self.pass_primary_tag(&selection.primary_tag, &mut song_scores, &mut tag_scores);
        self.pass_auxiliary(
            &selection.auxiliary,
            selection.primary_song.last(),
            &mut song_scores,
            &mut tag_scores,
        );

        debug!(
            seeds = seed_songs.len(),
            songs = song_scores.len(),
            tags = tag_scores.len(),
            "Aggregated neighbor evidence"
        );

        AggregatedScores {
            songs: song_scores.into_ranked(),
            tags: tag_scores.into_ranked(),
        }
    }

    fn pass_primary_song(
        &self,
        neighbors: &[Neighbor],
        ratios: &HashMap<PlaylistId, f64>,
        overlap: &SeedOverlap,
        song_scores: &mut ScoreTable<SongId>,
        tag_scores: &mut ScoreTable<TagId>,
    ) {
        let n = self.params.n_msp as f64;
        for (idx, neighbor) in neighbors.iter().enumerate() {
            let rank_weight = n - idx as f64;
            let ratio = ratios.get(&neighbor.playlist).copied().unwrap_or(0.0);

            for &song in self.catalog.songs_of(neighbor.playlist) {
                let boost = if self.catalog.is_frequent(song) {
                    self.params.frequent_song_boost
                } else {
                    1.0
                };
                let score = ratio * overlap.score(song) * neighbor.score * rank_weight * boost;
                song_scores.add(song, score);
            }

            for tag in self.catalog.tags_of(neighbor.playlist) {
                tag_scores.add(tag.clone(), neighbor.score * rank_weight);
            }
        }
    }

    fn pass_primary_tag(
        &self,
        neighbors: &[Neighbor],
        song_scores: &mut ScoreTable<SongId>,
        tag_scores: &mut ScoreTable<TagId>,
    ) {
        let n = self.params.n_mtp as f64;
        for (idx, neighbor) in neighbors.iter().enumerate() {
            let rank_weight = n - idx as f64;

            for tag in self.catalog.tags_of(neighbor.playlist) {
                tag_scores.add(tag.clone(), neighbor.score * rank_weight);
            }

            for &song in self.catalog.songs_of(neighbor.playlist) {
                song_scores.add(song, neighbor.score);
            }
        }
    }

    /// Songs are credited to `last_primary`, not to the auxiliary playlist
    fn pass_auxiliary(
        &self,
        neighbors: &[Neighbor],
        last_primary: Option<&Neighbor>,
        song_scores: &mut ScoreTable<SongId>,
        tag_scores: &mut ScoreTable<TagId>,
    ) {
        let n_msp = self.params.n_msp as f64;
        let n_mtp = self.params.n_mtp as f64;
        let correction_songs = last_primary
            .map(|neighbor| self.catalog.songs_of(neighbor.playlist))
            .unwrap_or(&[]);

        for (idx, neighbor) in neighbors.iter().enumerate() {
            let idx = idx as f64;

            for &song in correction_songs {
                song_scores.add(song, neighbor.score * (n_msp - idx));
            }

            for tag in self.catalog.tags_of(neighbor.playlist) {
                tag_scores.add(tag.clone(), neighbor.score * (n_mtp - idx));
            }
        }
    }
}

/// Songs ranked by tag co-occurrence, for queries with tags but no songs
///
/// Each (seed tag, corpus playlist carrying it, song in that playlist) path
/// counts once. Returns the top `n` song ids, ties by ascending id.
pub fn tag_cooccurrence_songs(catalog: &Catalog, seed_tags: &[TagId], n: usize) -> Vec<SongId> {
    let mut counts: ScoreTable<SongId> = ScoreTable::new();
    for tag in seed_tags {
        for playlist in catalog.playlists_with_tag(tag) {
            for &song in catalog.songs_of(playlist) {
                counts.add(song, 1.0);
            }
        }
    }
    top_ids(&counts.into_ranked(), n)
}

/// Seed overlap restricted to the primary-song neighbor set
///
/// `score(s) = Σ_q |N(q) ∩ N(s)| / |N(q)|` over seed songs `q`, where `N(x)`
/// is the set of primary-song neighbor playlists containing `x`. Seeds absent
/// from every neighbor contribute nothing.
struct SeedOverlap {
    membership: HashMap<SongId, HashSet<PlaylistId>>,
    seeds: Vec<SongId>,
}

impl SeedOverlap {
    fn new(catalog: &Catalog, primary_song: &[Neighbor], seed_songs: &[SongId]) -> Self {
        let mut membership: HashMap<SongId, HashSet<PlaylistId>> = HashMap::new();
        for neighbor in primary_song {
            for &song in catalog.songs_of(neighbor.playlist) {
                membership.entry(song).or_default().insert(neighbor.playlist);
            }
        }

        Self {
            membership,
            seeds: seed_songs.to_vec(),
        }
    }

    fn score(&self, song: SongId) -> f64 {
        let Some(song_set) = self.membership.get(&song) else {
            return 0.0;
        };

        self.seeds
            .iter()
            .filter_map(|seed| self.membership.get(seed))
            .filter(|seed_set| !seed_set.is_empty())
            .map(|seed_set| seed_set.intersection(song_set).count() as f64 / seed_set.len() as f64)
            .sum()
    }
}
