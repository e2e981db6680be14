//! Artist diversity re-injection
//!
//! Seed artists that dominate a query should still be represented in the
//! final slate. For each target artist the highest-ranked aggregated
//! candidate by that artist, inside the scan window, is picked and spliced
//! into the tail of the song slate.

use crate::catalog::Catalog;
use crate::params::RecommenderParams;
use crate::status::QueryStatus;
use plc_common::{ArtistId, SongId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Artists to re-inject, most frequent first
///
/// Sparse queries target every seed artist; other queries only artists
/// credited on more than one seed song. Equal counts keep first-appearance
/// order.
pub fn target_artists(catalog: &Catalog, seed_songs: &[SongId], status: QueryStatus) -> Vec<ArtistId> {
    let mut order: Vec<ArtistId> = Vec::new();
    let mut counts: HashMap<ArtistId, usize> = HashMap::new();
    for &song in seed_songs {
        for &artist in catalog.artists_of(song) {
            let count = counts.entry(artist).or_insert(0);
            if *count == 0 {
                order.push(artist);
            }
            *count += 1;
        }
    }

    // Stable: ties stay in first-appearance order
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));

    match status {
        QueryStatus::Sparse => order,
        QueryStatus::Empty | QueryStatus::Rich => order.into_iter().filter(|a| counts[a] > 1).collect(),
    }
}

/// Pick one candidate per target artist from the ranked aggregated songs
///
/// Scans ranks `[song_output_size - k, artist_window_end)` where `k` is the
/// number of target artists. The scan stops once every target is used or at
/// the first candidate that is itself a seed song.
pub fn diversity_picks(
    catalog: &Catalog,
    seed_songs: &[SongId],
    status: QueryStatus,
    ranked_songs: &[(SongId, f64)],
    params: &RecommenderParams,
) -> Vec<SongId> {
    if seed_songs.is_empty() {
        return Vec::new();
    }

    let mut targets = target_artists(catalog, seed_songs, status);
    let start = params.song_output_size.saturating_sub(targets.len());
    let end = params.artist_window_end.min(ranked_songs.len());
    let seeds: HashSet<SongId> = seed_songs.iter().copied().collect();
    let target_count = targets.len();

    let mut picks = Vec::new();
    for &(candidate, _) in ranked_songs.get(start..end).unwrap_or(&[]) {
        if targets.is_empty() || seeds.contains(&candidate) {
            break;
        }
        for artist in catalog.artists_of(candidate) {
            if let Some(pos) = targets.iter().position(|t| t == artist) {
                picks.push(candidate);
                targets.remove(pos);
                break;
            }
        }
    }

    debug!(
        targets = target_count,
        picks = picks.len(),
        window_start = start,
        "Artist diversity picks"
    );
    picks
}

/// Overwrite the tail of `slate` with picks not already in it
///
/// `slate` is expected to hold `size` distinct songs; the result does too.
pub fn splice_picks(slate: &mut Vec<SongId>, picks: &[SongId], size: usize) {
    let fresh: Vec<SongId> = picks.iter().copied().filter(|pick| !slate.contains(pick)).collect();
    if fresh.is_empty() {
        return;
    }
    let cut = size.saturating_sub(fresh.len()).min(slate.len());
    slate.truncate(cut);
    slate.extend(fresh);
}

#[cfg(test)]
mod tests {
    use super::*;
    use plc_common::{Playlist, SongMeta};

    /// Songs 1..=12, artist of song s is 100 + (s % 4) except song 5 (artists 101 and 200)
    fn catalog(params: &RecommenderParams) -> Catalog {
        let corpus = vec![Playlist {
            id: 1,
            title: String::new(),
            tags: vec!["x".to_string()],
            songs: (1..=12).collect(),
            like_count: 0,
            updated_at: String::new(),
        }];
        let meta: Vec<SongMeta> = (1..=12u32)
            .map(|s| SongMeta {
                id: s,
                artist_ids: if s == 5 { vec![200, 101] } else { vec![100 + s % 4] },
                genres: vec![],
                detail_genres: vec![],
            })
            .collect();
        Catalog::build(&corpus, &meta, params).unwrap()
    }

    fn params() -> RecommenderParams {
        RecommenderParams {
            song_output_size: 4,
            tag_output_size: 1,
            popular_song_count: 4,
            popular_tag_count: 1,
            artist_window_end: 10,
            ..Default::default()
        }
    }

    fn ranked(ids: &[SongId]) -> Vec<(SongId, f64)> {
        ids.iter().enumerate().map(|(i, &s)| (s, 100.0 - i as f64)).collect()
    }

    #[test]
    fn test_target_artists_by_status() {
        let params = params();
        let catalog = catalog(&params);
        // Artists: 1->101, 9->101, 2->102, 3->103
        let seeds = [2, 1, 9, 3];

        let sparse = target_artists(&catalog, &seeds, QueryStatus::Sparse);
        assert_eq!(sparse, vec![101, 102, 103]);

        let rich = target_artists(&catalog, &seeds, QueryStatus::Rich);
        assert_eq!(rich, vec![101]);
    }

    #[test]
    fn test_picks_one_song_per_target_artist() {
        let params = params();
        let catalog = catalog(&params);
        // Sparse targets: 101 (song 1), 102 (song 2)
        let seeds = [1, 2];
        // Window starts at 4 - 2 = 2
        let list = ranked(&[11, 12, 6, 10, 7, 5, 9]);

        let picks = diversity_picks(&catalog, &seeds, QueryStatus::Sparse, &list, &params);
        // 6 -> 102, 10 -> 102 (used), 7 -> 103 (not a target), 5 -> 200/101
        assert_eq!(picks, vec![6, 5]);
    }

    #[test]
    fn test_stops_at_seed_song() {
        let params = params();
        let catalog = catalog(&params);
        let seeds = [1, 2];
        let list = ranked(&[11, 12, 1, 6, 5]);

        let picks = diversity_picks(&catalog, &seeds, QueryStatus::Sparse, &list, &params);
        assert!(picks.is_empty());
    }

    #[test]
    fn test_window_end_bounds_scan() {
        let params = RecommenderParams {
            artist_window_end: 3,
            ..params()
        };
        let catalog = catalog(&params);
        let list = ranked(&[11, 12, 7, 6, 5]);

        let picks = diversity_picks(&catalog, &[1, 2], QueryStatus::Sparse, &list, &params);
        assert!(picks.is_empty());
    }

    #[test]
    fn test_picks_never_exceed_target_count() {
        let params = params();
        let catalog = catalog(&params);
        let seeds = [1, 5, 9, 2, 6];
        let targets = target_artists(&catalog, &seeds, QueryStatus::Rich);
        let list = ranked(&(1..=12).rev().collect::<Vec<_>>());

        let picks = diversity_picks(&catalog, &seeds, QueryStatus::Rich, &list, &params);
        assert!(picks.len() <= targets.len());
    }

    #[test]
    fn test_no_seeds_no_picks() {
        let params = params();
        let catalog = catalog(&params);
        let picks = diversity_picks(&catalog, &[], QueryStatus::Sparse, &ranked(&[1, 2, 3]), &params);
        assert!(picks.is_empty());
    }

    #[test]
    fn test_splice_overwrites_tail_and_skips_present() {
        let mut slate = vec![1, 2, 3, 4, 5];
        splice_picks(&mut slate, &[9, 2, 8], 5);
        assert_eq!(slate, vec![1, 2, 3, 9, 8]);

        let mut unchanged = vec![1, 2, 3];
        splice_picks(&mut unchanged, &[3], 3);
        assert_eq!(unchanged, vec![1, 2, 3]);
    }
}
