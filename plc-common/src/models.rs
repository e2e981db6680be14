//! Data models shared between the loaders and the recommender
//!
//! Field names follow the playlist dataset files on disk (`plylst_title`,
//! `updt_date`, `artist_id_basket`, ...); Rust-side names are spelled out.

use serde::{Deserialize, Serialize};

/// Song identifier
pub type SongId = u32;

/// Playlist identifier (corpus playlists and queries share one id space)
pub type PlaylistId = u32;

/// Artist identifier
pub type ArtistId = u32;

/// Tag text
pub type TagId = String;

/// Training corpus playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,

    #[serde(rename = "plylst_title", default)]
    pub title: String,

    #[serde(default)]
    pub tags: Vec<TagId>,

    #[serde(default)]
    pub songs: Vec<SongId>,

    #[serde(rename = "like_cnt", default)]
    pub like_count: u32,

    #[serde(rename = "updt_date", default)]
    pub updated_at: String,
}

/// Song metadata entry
///
/// Genre baskets are parsed for completeness; only the embedding tooling that
/// feeds the genre-augmented neighbor source reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongMeta {
    pub id: SongId,

    #[serde(rename = "artist_id_basket", default)]
    pub artist_ids: Vec<ArtistId>,

    #[serde(rename = "song_gn_gnr_basket", default)]
    pub genres: Vec<String>,

    #[serde(rename = "song_gn_dtl_gnr_basket", default)]
    pub detail_genres: Vec<String>,
}

/// Playlist to be continued
///
/// Seed songs and tags keep their input order. A query is never mutated;
/// cold-start handling works on a derived copy of its seeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub id: PlaylistId,

    #[serde(rename = "plylst_title", default)]
    pub title: String,

    #[serde(default)]
    pub tags: Vec<TagId>,

    #[serde(default)]
    pub songs: Vec<SongId>,

    #[serde(rename = "updt_date", default)]
    pub updated_at: String,
}

impl Query {
    /// Create a query with seeds only (title and date left empty)
    pub fn new(id: PlaylistId, songs: Vec<SongId>, tags: Vec<TagId>) -> Self {
        Self {
            id,
            title: String::new(),
            tags,
            songs,
            updated_at: String::new(),
        }
    }
}

/// Final recommendation for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub id: PlaylistId,
    pub songs: Vec<SongId>,
    pub tags: Vec<TagId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_deserializes_dataset_field_names() {
        let json = r#"{
            "tags": ["여름", "drive"],
            "id": 61281,
            "plylst_title": "여름 드라이브",
            "songs": [525514, 129701],
            "like_cnt": 71,
            "updt_date": "2013-12-19 18:36:19.000"
        }"#;

        let playlist: Playlist = serde_json::from_str(json).unwrap();
        assert_eq!(playlist.id, 61281);
        assert_eq!(playlist.title, "여름 드라이브");
        assert_eq!(playlist.songs, vec![525514, 129701]);
        assert_eq!(playlist.tags, vec!["여름".to_string(), "drive".to_string()]);
        assert_eq!(playlist.like_count, 71);
        assert_eq!(playlist.updated_at, "2013-12-19 18:36:19.000");
    }

    #[test]
    fn test_query_missing_fields_default_to_empty() {
        let query: Query = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(query.id, 7);
        assert!(query.songs.is_empty());
        assert!(query.tags.is_empty());
        assert!(query.title.is_empty());
    }

    #[test]
    fn test_song_meta_ignores_unknown_fields() {
        let json = r#"{
            "song_gn_dtl_gnr_basket": ["GN0901"],
            "issue_date": "20140512",
            "album_name": "불후의 명곡",
            "artist_id_basket": [2727, 3988],
            "song_name": "Feelings",
            "song_gn_gnr_basket": ["GN0900"],
            "id": 0
        }"#;

        let meta: SongMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.id, 0);
        assert_eq!(meta.artist_ids, vec![2727, 3988]);
        assert_eq!(meta.genres, vec!["GN0900".to_string()]);
        assert_eq!(meta.detail_genres, vec!["GN0901".to_string()]);
    }

    #[test]
    fn test_record_serializes_plain_field_names() {
        let record = RecommendationRecord {
            id: 3,
            songs: vec![1, 2],
            tags: vec!["rock".to_string()],
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["songs"][1], 2);
        assert_eq!(value["tags"][0], "rock");
    }
}
