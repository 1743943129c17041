//! Notifier CLI
//!
//! Local execution entry point, meant to be invoked by a scheduler (cron,
//! CI schedule) at most once per interval.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use notifier::{
    error::Result,
    models::Config,
    pipeline,
    services::build_notifier,
    storage::{LocalStorage, SnapshotStore},
    utils::http,
};

/// Kwangwoon University calendar and notice board notifier
#[derive(Parser, Debug)]
#[command(name = "notifier", version, about = "Academic calendar and notice board notifier")]
struct Cli {
    /// Path to storage directory containing config.toml and the board snapshot
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log messages instead of sending them
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send today's academic calendar digest
    Calendar {
        /// Reference date (YYYY-MM-DD); defaults to today in the configured zone
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print the classification payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// Announce new notice board posts
    Board,

    /// Run calendar then board
    Run {
        /// Reference date (YYYY-MM-DD); defaults to today in the configured zone
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Validate configuration
    Validate,

    /// Show current snapshot info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn resolve_today(config: &Config, today: Option<NaiveDate>) -> Result<NaiveDate> {
    match today {
        Some(date) => Ok(date),
        None => config.today(),
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path).with_env_overrides();
    log::info!("Loaded configuration from {}", cli.storage_dir.display());

    let storage = LocalStorage::new(config.snapshot_path(&cli.storage_dir));

    match cli.command {
        Command::Calendar { today, json } => {
            config.validate()?;
            let client = http::create_async_client(&config.crawler)?;
            let notifier = build_notifier(&config.telegram, &client, cli.dry_run);
            let today = resolve_today(&config, today)?;

            let outcome =
                pipeline::run_calendar(&config, &client, notifier.as_ref(), today).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.result)?);
            }
        }

        Command::Board => {
            config.validate()?;
            let client = http::create_async_client(&config.crawler)?;
            let notifier = build_notifier(&config.telegram, &client, cli.dry_run);
            pipeline::run_board(&config, &client, &storage, notifier.as_ref()).await?;
        }

        Command::Run { today } => {
            config.validate()?;
            let client = http::create_async_client(&config.crawler)?;
            let notifier = build_notifier(&config.telegram, &client, cli.dry_run);
            let today = resolve_today(&config, today)?;

            log::info!("Step 1/2: Academic calendar...");
            // A broken calendar page must not block board notifications.
            if let Err(e) =
                pipeline::run_calendar(&config, &client, notifier.as_ref(), today).await
            {
                log::error!("Calendar run failed: {}", e);
            }

            log::info!("Step 2/2: Notice board...");
            pipeline::run_board(&config, &client, &storage, notifier.as_ref()).await?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
            if config.telegram.credentials().is_none() {
                log::warn!("Telegram credentials are not set; messages will only be logged");
            }
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());
            log::info!(
                "Config: {}",
                if config_path.exists() { "exists" } else { "not found (defaults)" }
            );

            let snapshot = storage.load_snapshot().await?;
            if snapshot.is_empty() {
                log::info!(
                    "No snapshot at {}; next board run is a cold start",
                    storage.path().display()
                );
            } else {
                log::info!(
                    "Snapshot {} holds {} posts:",
                    storage.path().display(),
                    snapshot.len()
                );
                for post in &snapshot {
                    log::info!("    {}", post.title);
                }
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
