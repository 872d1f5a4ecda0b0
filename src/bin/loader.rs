//! StatsBomb open-data loader CLI.
//!
//! Pulls competitions, matches, lineups, and events from the configured
//! S3 bucket into PostgreSQL. Each subcommand is idempotent: re-running
//! it inserts nothing for rows already present.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use football_analytics::config::AppConfig;
use football_analytics::ingest::{self, DataLoader, LoadReport, OpenDataStore};
use football_analytics::persistence::MatchStore;

#[derive(Debug, Parser)]
#[command(name = "loader", about = "Load StatsBomb open data into PostgreSQL", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load competitions.json into the competitions table.
    Competitions,
    /// Load every season's match file into the matches table.
    Matches,
    /// Load every known match's lineup file into the lineups table.
    Lineups,
    /// Load every known match's event file into the events table.
    Events,
    /// Load one local raw event file into the match_events table.
    LocalEvents {
        /// Path to a StatsBomb events/{match_id}.json file on disk.
        #[arg(long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().await.context("loading configuration")?;

    let store = MatchStore::connect(&config)
        .await
        .context("connecting to postgres")?;
    store.ensure_schema().await.context("ensuring schema")?;

    // The local-file loader needs no bucket; everything else walks S3.
    let report: LoadReport = if let Command::LocalEvents { file } = &cli.command {
        ingest::load_local_events(&store, file).await?
    } else {
        let bucket = config.resolve_bucket().await.context("resolving bucket")?;
        let source = OpenDataStore::connect(&config.aws_region, &bucket, &config.s3_prefix).await;
        let loader = DataLoader::new(store, source);
        match cli.command {
            Command::Competitions => loader.load_competitions().await?,
            Command::Matches => loader.load_matches().await?,
            Command::Lineups => loader.load_lineups().await?,
            Command::Events => loader.load_events().await?,
            Command::LocalEvents { .. } => return Ok(()),
        }
    };

    tracing::info!(
        fetched = report.fetched,
        inserted = report.inserted,
        skipped = report.skipped,
        failed = report.failed,
        "load complete"
    );
    Ok(())
}
