use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{error, info};

mod config;
mod downloader;
mod error;
mod models;
mod snapshot;
mod sync;
mod utils;

use config::Config;
use downloader::AssetDownloader;
use snapshot::SnapshotStore;
use sync::CatalogSync;
use utils::HttpClient;

#[derive(Parser)]
#[command(name = "ytsync")]
#[command(about = "Incremental YTS catalog mirror and asset downloader")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "ytsync.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Mirror the remote catalog into the snapshot and download assets
    Sync {
        /// Snapshot file path
        snapshot: PathBuf,

        /// Stop after persisting the snapshot, skip asset downloads
        #[arg(long)]
        skip_assets: bool,
    },
    /// Show a summary of the local snapshot
    Status {
        /// Snapshot file path
        snapshot: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config))?;

    match cli.command {
        Commands::Sync { snapshot, skip_assets } => {
            run_sync(&config, &snapshot, skip_assets).await?;
        }
        Commands::Status { snapshot } => {
            show_status(&snapshot)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!("ytsync={}", level))
        .with_target(false)
        .init();
}

async fn run_sync(config: &Config, snapshot: &Path, skip_assets: bool) -> Result<()> {
    let store = SnapshotStore::new(snapshot);
    let movies = store
        .load()
        .with_context(|| format!("Unable to open snapshot file {:?}", snapshot))?;
    info!("📚 Loaded {} movies from snapshot", movies.len());

    let client = HttpClient::new(&config.http).context("Failed to build HTTP client")?;

    info!("📡 Synchronizing catalog from {}", config.api.base_url);
    let engine = CatalogSync::new(client.clone(), config.api.clone());
    let movies = engine.sync(movies).await;

    if let Err(e) = store.save(&movies) {
        // The on-disk snapshot is now stale; downloading against it
        // would let the two drift, so the asset phase is skipped.
        error!("Unable to persist snapshot, skipping asset downloads: {}", e);
        return Ok(());
    }
    info!("💾 Snapshot persisted: {} movies", movies.len());

    if skip_assets {
        return Ok(());
    }

    info!("⬇️ Downloading assets for {} movies...", movies.len());
    let downloader = AssetDownloader::new(client, config.storage.clone());

    let pb = ProgressBar::new(movies.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    // Movies are driven one at a time; only the assets of a single movie
    // are fetched in parallel.
    for movie in &movies {
        pb.set_message(movie.title.clone());
        downloader.download_assets(movie).await;
        pb.inc(1);
    }
    pb.finish_with_message("Download completed");

    info!("✅ Mirror run completed");
    Ok(())
}

fn show_status(snapshot: &Path) -> Result<()> {
    let store = SnapshotStore::new(snapshot);
    let movies = store
        .load()
        .with_context(|| format!("Unable to open snapshot file {:?}", snapshot))?;

    let torrent_count: usize = movies.iter().map(|m| m.torrents.len()).sum();
    let newest = movies.first();
    let year_span = movies
        .iter()
        .filter(|m| m.year > 0)
        .fold(None::<(i32, i32)>, |span, m| match span {
            Some((lo, hi)) => Some((lo.min(m.year), hi.max(m.year))),
            None => Some((m.year, m.year)),
        });

    println!("📚 Snapshot: {}", snapshot.display());
    println!("{:<20} {}", "Movies", movies.len());
    println!("{:<20} {}", "Torrent variants", torrent_count);
    if let Some((lo, hi)) = year_span {
        println!("{:<20} {}-{}", "Year span", lo, hi);
    }
    if let Some(movie) = newest {
        println!("{:<20} {}", "First mirrored", movie.display_title());
    }

    Ok(())
}
