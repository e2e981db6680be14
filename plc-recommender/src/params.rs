//! Recommender tuning parameters
//!
//! Deserialized from the `[recommender]` section of the config file. Every
//! field has a default, so an empty or missing section is valid.

use plc_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parameters consumed by the catalog and the per-query pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommenderParams {
    /// Neighbors requested for the primary-song role (default: 50)
    #[serde(default = "default_n_msp")]
    pub n_msp: usize,

    /// Neighbors requested for the primary-tag and auxiliary roles (default: 90)
    #[serde(default = "default_n_mtp")]
    pub n_mtp: usize,

    /// Songs per recommendation record (default: 100)
    #[serde(default = "default_song_output_size")]
    pub song_output_size: usize,

    /// Tags per recommendation record (default: 10)
    #[serde(default = "default_tag_output_size")]
    pub tag_output_size: usize,

    /// Aggregated songs considered before padding (default: 200)
    #[serde(default = "default_song_candidate_pool")]
    pub song_candidate_pool: usize,

    /// Aggregated tags considered before padding (default: 20)
    #[serde(default = "default_tag_candidate_pool")]
    pub tag_candidate_pool: usize,

    /// Size of the global song popularity list (default: 200)
    #[serde(default = "default_popular_song_count")]
    pub popular_song_count: usize,

    /// Size of the global tag popularity list (default: 20)
    #[serde(default = "default_popular_tag_count")]
    pub popular_tag_count: usize,

    /// Minimum number of corpus playlists a song must appear in to count as
    /// frequent (default: 2)
    #[serde(default = "default_frequent_song_min_count")]
    pub frequent_song_min_count: usize,

    /// Pass A multiplier for frequent songs (default: 4.0)
    #[serde(default = "default_frequent_song_boost")]
    pub frequent_song_boost: f64,

    /// Exclusive end rank of the artist diversity scan window (default: 1000)
    #[serde(default = "default_artist_window_end")]
    pub artist_window_end: usize,
}

fn default_n_msp() -> usize {
    50
}

fn default_n_mtp() -> usize {
    90
}

fn default_song_output_size() -> usize {
    100
}

fn default_tag_output_size() -> usize {
    10
}

fn default_song_candidate_pool() -> usize {
    200
}

fn default_tag_candidate_pool() -> usize {
    20
}

fn default_popular_song_count() -> usize {
    200
}

fn default_popular_tag_count() -> usize {
    20
}

fn default_frequent_song_min_count() -> usize {
    2
}

fn default_frequent_song_boost() -> f64 {
    4.0
}

fn default_artist_window_end() -> usize {
    1000
}

impl Default for RecommenderParams {
    fn default() -> Self {
        Self {
            n_msp: default_n_msp(),
            n_mtp: default_n_mtp(),
            song_output_size: default_song_output_size(),
            tag_output_size: default_tag_output_size(),
            song_candidate_pool: default_song_candidate_pool(),
            tag_candidate_pool: default_tag_candidate_pool(),
            popular_song_count: default_popular_song_count(),
            popular_tag_count: default_popular_tag_count(),
            frequent_song_min_count: default_frequent_song_min_count(),
            frequent_song_boost: default_frequent_song_boost(),
            artist_window_end: default_artist_window_end(),
        }
    }
}

impl RecommenderParams {
    /// Reject parameter combinations that cannot produce full-size records
    pub fn validate(&self) -> Result<()> {
        if self.n_msp == 0 || self.n_mtp == 0 {
            return Err(Error::Config("n_msp and n_mtp must be positive".to_string()));
        }
        if self.song_output_size == 0 || self.tag_output_size == 0 {
            return Err(Error::Config("output sizes must be positive".to_string()));
        }
        if self.song_candidate_pool < self.song_output_size {
            return Err(Error::Config(format!(
                "song_candidate_pool ({}) is smaller than song_output_size ({})",
                self.song_candidate_pool, self.song_output_size
            )));
        }
        if self.tag_candidate_pool < self.tag_output_size {
            return Err(Error::Config(format!(
                "tag_candidate_pool ({}) is smaller than tag_output_size ({})",
                self.tag_candidate_pool, self.tag_output_size
            )));
        }
        if self.popular_song_count < self.song_output_size {
            return Err(Error::Config(format!(
                "popular_song_count ({}) is smaller than song_output_size ({})",
                self.popular_song_count, self.song_output_size
            )));
        }
        if self.popular_tag_count < self.tag_output_size {
            return Err(Error::Config(format!(
                "popular_tag_count ({}) is smaller than tag_output_size ({})",
                self.popular_tag_count, self.tag_output_size
            )));
        }
        if !self.frequent_song_boost.is_finite() || self.frequent_song_boost <= 0.0 {
            return Err(Error::Config(format!(
                "frequent_song_boost must be a positive number, got {}",
                self.frequent_song_boost
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = RecommenderParams::default();
        assert_eq!(params.n_msp, 50);
        assert_eq!(params.n_mtp, 90);
        assert_eq!(params.song_output_size, 100);
        assert_eq!(params.tag_output_size, 10);
        assert_eq!(params.popular_song_count, 200);
        assert_eq!(params.popular_tag_count, 20);
        assert_eq!(params.frequent_song_boost, 4.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let params: RecommenderParams = toml::from_str("n_msp = 30\ntag_output_size = 5").unwrap();
        assert_eq!(params.n_msp, 30);
        assert_eq!(params.tag_output_size, 5);
        assert_eq!(params.n_mtp, 90);
        assert_eq!(params.song_candidate_pool, 200);
    }

    #[test]
    fn test_popularity_smaller_than_output_is_config_error() {
        let params = RecommenderParams {
            popular_song_count: 50,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(Error::Config(_))));

        let params = RecommenderParams {
            popular_tag_count: 9,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_candidate_pool_smaller_than_output_is_config_error() {
        let params = RecommenderParams {
            song_candidate_pool: 0,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(Error::Config(_))));

        let params = RecommenderParams {
            tag_candidate_pool: 3,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(Error::Config(_))));

        let params = RecommenderParams {
            song_candidate_pool: 100,
            tag_candidate_pool: 10,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_zero_neighbor_counts_rejected() {
        let params = RecommenderParams {
            n_msp: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
