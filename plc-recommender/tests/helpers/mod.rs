//! Test Helper Utilities
//!
//! Synthetic corpus and stub neighbor sources for pipeline tests

#![allow(dead_code)]

use plc_common::{Playlist, PlaylistId, SongId, SongMeta};
use plc_recommender::neighbors::PrecomputedNeighbors;
use plc_recommender::{Catalog, NeighborSources, Recommender, RecommenderParams};
use std::collections::HashMap;
use std::sync::Arc;

pub const CORPUS_PLAYLISTS: u32 = 60;
pub const CORPUS_SONGS: u32 = 180;
pub const CORPUS_TAGS: u32 = 30;
pub const ARTISTS: u32 = 25;

/// Query ids the stub sources know about
pub const KNOWN_QUERIES: std::ops::RangeInclusive<PlaylistId> = 9001..=9010;

/// Query id no source knows about
pub const UNKNOWN_QUERY: PlaylistId = 9999;

/// 60 playlists over songs 1..=180 and tags tag0..tag29
///
/// Playlist `p` always holds songs `p`, `p + 60` and `p + 120`, so every song
/// appears at least once.
pub fn corpus() -> Vec<Playlist> {
    (1..=CORPUS_PLAYLISTS)
        .map(|p| {
            let mut songs = vec![p, p + 60, p + 120];
            songs.extend((0..12).map(|i| (p * 7 + i * 11) % CORPUS_SONGS + 1));
            let tags = (0..3).map(|j| format!("tag{}", (p + j * 7) % CORPUS_TAGS)).collect();
            Playlist {
                id: p,
                title: format!("playlist {}", p),
                tags,
                songs,
                like_count: p,
                updated_at: "2020-01-01 00:00:00.000".to_string(),
            }
        })
        .collect()
}

/// Song `s` is credited to artist `1000 + s % 25`
pub fn artist_of(song: SongId) -> u32 {
    1000 + song % ARTISTS
}

pub fn song_meta() -> Vec<SongMeta> {
    (1..=CORPUS_SONGS)
        .map(|s| SongMeta {
            id: s,
            artist_ids: vec![artist_of(s)],
            genres: vec![],
            detail_genres: vec![],
        })
        .collect()
}

pub fn catalog(params: &RecommenderParams) -> Catalog {
    Catalog::build(&corpus(), &song_meta(), params).unwrap()
}

/// Neighbor lists for every known query; `offset` makes sources differ
pub fn stub_source(name: &str, offset: u32) -> PrecomputedNeighbors {
    let pairs: HashMap<PlaylistId, Vec<(PlaylistId, f64)>> = KNOWN_QUERIES
        .map(|query| {
            let list = (0..CORPUS_PLAYLISTS)
                .map(|i| {
                    let playlist = (query + offset + i * 13) % CORPUS_PLAYLISTS + 1;
                    (playlist, 1.0 - f64::from(i) / 100.0)
                })
                .collect();
            (query, list)
        })
        .collect();
    PrecomputedNeighbors::from_pairs(name, pairs)
}

pub fn stub_sources() -> NeighborSources {
    NeighborSources::new(
        Box::new(stub_source("plain", 0)),
        Box::new(stub_source("genre", 5)),
        Box::new(stub_source("title", 11)),
    )
}

pub fn recommender(params: RecommenderParams) -> Recommender {
    Recommender::new(Arc::new(catalog(&params)), stub_sources(), params)
}
