//! Read-only lookup tables built once from the training corpus
//!
//! The catalog is constructed at startup and shared (behind an `Arc`) by every
//! query. All lookups are total: unknown ids resolve to empty collections.

use crate::params::RecommenderParams;
use plc_common::{ArtistId, Error, Playlist, PlaylistId, Result, SongId, SongMeta, TagId};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use tracing::{debug, info};

/// Corpus-derived mappings and popularity rankings
#[derive(Debug)]
pub struct Catalog {
    song_playlists: HashMap<SongId, HashSet<PlaylistId>>,
    tag_playlists: HashMap<TagId, HashSet<PlaylistId>>,
    // Deduplicated, corpus order kept so score accumulation is reproducible
    playlist_songs: HashMap<PlaylistId, Vec<SongId>>,
    playlist_tags: HashMap<PlaylistId, Vec<TagId>>,
    song_artists: HashMap<SongId, Vec<ArtistId>>,
    frequent_songs: HashSet<SongId>,
    song_ranking: Vec<SongId>,
    tag_ranking: Vec<TagId>,
    popular_song_count: usize,
    popular_tag_count: usize,
}

impl Catalog {
    /// Build the catalog from the corpus and song metadata
    ///
    /// # Errors
    /// - `InvalidInput` if two corpus playlists share an id
    /// - `Config` if the parameters are invalid or the corpus is too small to
    ///   fill popularity lists of the configured output sizes
    pub fn build(corpus: &[Playlist], song_meta: &[SongMeta], params: &RecommenderParams) -> Result<Self> {
        params.validate()?;

        let mut song_playlists: HashMap<SongId, HashSet<PlaylistId>> = HashMap::new();
        let mut tag_playlists: HashMap<TagId, HashSet<PlaylistId>> = HashMap::new();
        let mut playlist_songs = HashMap::with_capacity(corpus.len());
        let mut playlist_tags = HashMap::with_capacity(corpus.len());

        for playlist in corpus {
            let songs = dedup_in_order(&playlist.songs);
            let tags = dedup_in_order(&playlist.tags);

            for &song in &songs {
                song_playlists.entry(song).or_default().insert(playlist.id);
            }
            for tag in &tags {
                tag_playlists.entry(tag.clone()).or_default().insert(playlist.id);
            }

            if playlist_songs.insert(playlist.id, songs).is_some() {
                return Err(Error::InvalidInput(format!(
                    "duplicate playlist id {} in corpus",
                    playlist.id
                )));
            }
            playlist_tags.insert(playlist.id, tags);
        }

        let song_artists: HashMap<SongId, Vec<ArtistId>> = song_meta
            .iter()
            .filter(|meta| !meta.artist_ids.is_empty())
            .map(|meta| (meta.id, dedup_in_order(&meta.artist_ids)))
            .collect();

        let frequent_songs: HashSet<SongId> = song_playlists
            .iter()
            .filter(|(_, playlists)| playlists.len() >= params.frequent_song_min_count)
            .map(|(&song, _)| song)
            .collect();

        let song_ranking = rank_by_count(&song_playlists);
        let tag_ranking = rank_by_count(&tag_playlists);

        if song_ranking.len() < params.song_output_size {
            return Err(Error::Config(format!(
                "corpus has {} distinct songs, fewer than song_output_size ({})",
                song_ranking.len(),
                params.song_output_size
            )));
        }
        if tag_ranking.len() < params.tag_output_size {
            return Err(Error::Config(format!(
                "corpus has {} distinct tags, fewer than tag_output_size ({})",
                tag_ranking.len(),
                params.tag_output_size
            )));
        }

        info!(
            "Catalog built: {} playlists, {} songs ({} frequent), {} tags, {} songs with artists",
            playlist_songs.len(),
            song_playlists.len(),
            frequent_songs.len(),
            tag_playlists.len(),
            song_artists.len()
        );
        debug!(
            "Top songs: {:?}, top tags: {:?}",
            &song_ranking[..song_ranking.len().min(5)],
            &tag_ranking[..tag_ranking.len().min(5)]
        );

        Ok(Self {
            song_playlists,
            tag_playlists,
            playlist_songs,
            playlist_tags,
            song_artists,
            frequent_songs,
            song_ranking,
            tag_ranking,
            popular_song_count: params.popular_song_count,
            popular_tag_count: params.popular_tag_count,
        })
    }

    /// Songs of a corpus playlist (empty if unknown)
    pub fn songs_of(&self, playlist: PlaylistId) -> &[SongId] {
        self.playlist_songs.get(&playlist).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tags of a corpus playlist (empty if unknown)
    pub fn tags_of(&self, playlist: PlaylistId) -> &[TagId] {
        self.playlist_tags.get(&playlist).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Artists credited on a song (empty if unknown)
    pub fn artists_of(&self, song: SongId) -> &[ArtistId] {
        self.song_artists.get(&song).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Corpus playlists containing a song
    pub fn playlists_with_song(&self, song: SongId) -> impl Iterator<Item = PlaylistId> + '_ {
        self.song_playlists.get(&song).into_iter().flatten().copied()
    }

    /// Corpus playlists carrying a tag
    pub fn playlists_with_tag(&self, tag: &str) -> impl Iterator<Item = PlaylistId> + '_ {
        self.tag_playlists.get(tag).into_iter().flatten().copied()
    }

    pub fn is_frequent(&self, song: SongId) -> bool {
        self.frequent_songs.contains(&song)
    }

    /// Globally most popular songs, at most `popular_song_count` long
    pub fn popular_songs(&self) -> &[SongId] {
        &self.song_ranking[..self.song_ranking.len().min(self.popular_song_count)]
    }

    /// Globally most popular tags, at most `popular_tag_count` long
    pub fn popular_tags(&self) -> &[TagId] {
        &self.tag_ranking[..self.tag_ranking.len().min(self.popular_tag_count)]
    }

    /// Every corpus song by descending playlist count
    pub fn song_ranking(&self) -> &[SongId] {
        &self.song_ranking
    }

    /// Every corpus tag by descending playlist count
    pub fn tag_ranking(&self) -> &[TagId] {
        &self.tag_ranking
    }

    pub fn playlist_count(&self) -> usize {
        self.playlist_songs.len()
    }
}

fn dedup_in_order<T: Clone + Eq + Hash>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().filter(|item| seen.insert(*item)).cloned().collect()
}

/// Keys by descending membership count, ascending key on ties
fn rank_by_count<K: Clone + Ord>(index: &HashMap<K, HashSet<PlaylistId>>) -> Vec<K> {
    let mut counted: Vec<(&K, usize)> = index.iter().map(|(key, set)| (key, set.len())).collect();
    counted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    counted.into_iter().map(|(key, _)| key.clone()).collect()
}
