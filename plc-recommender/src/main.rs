//! plc-recommender - batch playlist continuation
//!
//! Loads the training corpus, song metadata, neighbor sources and a question
//! set, recommends 100 songs and 10 tags per question, and writes the
//! records to a timestamped `results-*.json` file.

use anyhow::{Context, Result};
use clap::Parser;
use plc_common::config::{RootFolderInitializer, RootFolderResolver};
use plc_common::io::{load_json, write_results};
use plc_common::{Playlist, Query, SongMeta};
use plc_recommender::logging::env_or_level_filter;
use plc_recommender::{AppConfig, Catalog, Recommender};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Command-line arguments for plc-recommender
#[derive(Parser, Debug)]
#[command(name = "plc-recommender")]
#[command(about = "Playlist continuation recommender")]
#[command(version)]
struct Args {
    /// Root folder holding data, config and results (overrides PLC_ROOT_FOLDER)
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Config file (default: <root>/plc.toml)
    #[arg(short, long, env = "PLC_CONFIG")]
    config: Option<PathBuf>,

    /// Question set to answer (overrides [data] questions)
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// Directory for result files (overrides output_dir)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let root_folder = RootFolderResolver::new()
        .with_cli_arg(args.root_folder.clone())
        .with_config_file(args.config.clone())
        .resolve();
    let initializer = RootFolderInitializer::new(root_folder);
    let config_path = args.config.clone().unwrap_or_else(|| initializer.config_path());

    let config = AppConfig::load(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_or_level_filter(&config.logging.level))
        .init();

    info!(
        "Starting plc-recommender v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Root folder: {}", initializer.root().display());
    info!("Config: {}", config_path.display());

    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    if config.worker_threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .build_global()
            .context("Failed to configure worker pool")?;
    }
    info!("Worker threads: {}", rayon::current_num_threads());

    let train_path = initializer.resolve_path(&config.data.train);
    let corpus: Vec<Playlist> =
        load_json(&train_path).with_context(|| format!("Failed to load corpus {}", train_path.display()))?;

    let meta_path = initializer.resolve_path(&config.data.song_meta);
    let song_meta: Vec<SongMeta> = load_json(&meta_path)
        .with_context(|| format!("Failed to load song metadata {}", meta_path.display()))?;

    let catalog = Catalog::build(&corpus, &song_meta, &config.recommender).context("Failed to build catalog")?;
    info!(
        "Corpus: {} playlists, metadata for {} songs",
        catalog.playlist_count(),
        song_meta.len()
    );
    drop(corpus);
    drop(song_meta);

    let sources = config
        .sources
        .build(&initializer)
        .context("Failed to load neighbor sources")?;

    let questions_path = initializer.resolve_path(args.questions.as_ref().unwrap_or(&config.data.questions));
    let questions: Vec<Query> = load_json(&questions_path)
        .with_context(|| format!("Failed to load questions {}", questions_path.display()))?;
    info!("Loaded {} questions from {}", questions.len(), questions_path.display());

    let recommender = Recommender::new(Arc::new(catalog), sources, config.recommender.clone());
    let records = recommender.recommend_all(&questions);

    let output_dir = initializer.resolve_path(args.output_dir.as_ref().unwrap_or(&config.output_dir));
    let path = write_results(&output_dir, &records).context("Failed to write results")?;
    info!("Done: {} records written to {}", records.len(), path.display());

    Ok(())
}
