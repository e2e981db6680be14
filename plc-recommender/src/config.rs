//! Recommender configuration file
//!
//! One TOML file (`plc.toml` in the root folder unless `--config` is given)
//! carries logging, data locations, the three neighbor sources and the
//! `[recommender]` parameters. Every section is optional.
//!
//! ```toml
//! worker_threads = 8
//! output_dir = "results"
//!
//! [logging]
//! level = "debug"
//!
//! [data]
//! train = "train.json"
//! song_meta = "song_meta.json"
//! questions = "val.json"
//!
//! [sources.plain]
//! kind = "precomputed"
//! path = "neighbors/plain.json"
//!
//! [sources.title]
//! kind = "embedding"
//! corpus = "embeddings/title_train.json"
//! queries = "embeddings/title_val.json"
//!
//! [recommender]
//! n_msp = 50
//! ```
//!
//! Relative paths resolve against the root folder.

use crate::neighbors::{CosineNeighbors, EmbeddingTable, NeighborSource, NeighborSources, PrecomputedNeighbors};
use crate::params::RecommenderParams;
use plc_common::config::{load_toml_or_default, LoggingConfig, RootFolderInitializer};
use plc_common::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Whole config file as seen by the recommender binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_folder: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Rayon worker threads for batch processing (0 = one per core)
    #[serde(default)]
    pub worker_threads: usize,

    /// Directory receiving `results-*.json` files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub data: DataPaths,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub recommender: RecommenderParams,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            logging: LoggingConfig::default(),
            worker_threads: 0,
            output_dir: default_output_dir(),
            data: DataPaths::default(),
            sources: SourcesConfig::default(),
            recommender: RecommenderParams::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path`; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        let config: AppConfig = load_toml_or_default(path)?;
        config.recommender.validate()?;
        Ok(config)
    }
}

/// `[data]` section: corpus, song metadata and question set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPaths {
    #[serde(default = "default_train")]
    pub train: PathBuf,

    #[serde(default = "default_song_meta")]
    pub song_meta: PathBuf,

    #[serde(default = "default_questions")]
    pub questions: PathBuf,
}

fn default_train() -> PathBuf {
    PathBuf::from("train.json")
}

fn default_song_meta() -> PathBuf {
    PathBuf::from("song_meta.json")
}

fn default_questions() -> PathBuf {
    PathBuf::from("val.json")
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            train: default_train(),
            song_meta: default_song_meta(),
            questions: default_questions(),
        }
    }
}

/// Where one neighbor source gets its similarities from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// JSON map of query id to ranked `[playlist_id, score]` pairs
    Precomputed { path: PathBuf },
    /// Corpus and query embedding tables compared by cosine similarity
    Embedding { corpus: PathBuf, queries: PathBuf },
}

impl SourceConfig {
    fn precomputed(file: &str) -> Self {
        SourceConfig::Precomputed {
            path: PathBuf::from("neighbors").join(file),
        }
    }

    pub fn build(&self, name: &str, root: &RootFolderInitializer) -> Result<Box<dyn NeighborSource>> {
        match self {
            SourceConfig::Precomputed { path } => {
                let path = root.resolve_path(path);
                info!("Loading {} neighbors from {}", name, path.display());
                Ok(Box::new(PrecomputedNeighbors::load(name, &path)?))
            }
            SourceConfig::Embedding { corpus, queries } => {
                let corpus = root.resolve_path(corpus);
                let queries = root.resolve_path(queries);
                info!(
                    "Loading {} embeddings from {} and {}",
                    name,
                    corpus.display(),
                    queries.display()
                );
                let source = CosineNeighbors::new(name, EmbeddingTable::load(&corpus)?, EmbeddingTable::load(&queries)?)?;
                Ok(Box::new(source))
            }
        }
    }
}

/// `[sources.*]` sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_plain_source")]
    pub plain: SourceConfig,

    #[serde(default = "default_genre_source")]
    pub genre: SourceConfig,

    #[serde(default = "default_title_source")]
    pub title: SourceConfig,
}

fn default_plain_source() -> SourceConfig {
    SourceConfig::precomputed("plain.json")
}

fn default_genre_source() -> SourceConfig {
    SourceConfig::precomputed("genre.json")
}

fn default_title_source() -> SourceConfig {
    SourceConfig::precomputed("title.json")
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            plain: default_plain_source(),
            genre: default_genre_source(),
            title: default_title_source(),
        }
    }
}

impl SourcesConfig {
    pub fn build(&self, root: &RootFolderInitializer) -> Result<NeighborSources> {
        Ok(NeighborSources::new(
            self.plain.build("plain", root)?,
            self.genre.build("genre", root)?,
            self.title.build("title", root)?,
        ))
    }
}
