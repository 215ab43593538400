//! Mileage CLI - vehicle service log
//!
//! Records service events and reports which scheduled procedures are due.

mod logging;
mod render;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use mileage_core::application::{MatchKey, RecordRequest, ServiceLog};
use mileage_core::domain::{Catalog, Mileage};
use mileage_core::port::time_provider::SystemTimeProvider;
use mileage_infra_sqlite::{create_pool, run_migrations, SqliteRecordStore};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

const DEFAULT_DB_PATH: &str = "~/.mileage/service_log.db";

#[derive(Parser)]
#[command(name = "mileage")]
#[command(about = "Vehicle service log and maintenance reminder", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the SQLite service log
    #[arg(long, env = "MILEAGE_DB_PATH", default_value = DEFAULT_DB_PATH)]
    db: String,

    /// JSON catalog replacing the built-in maintenance schedule
    #[arg(long, env = "MILEAGE_CATALOG")]
    catalog: Option<PathBuf>,

    /// How records are matched to catalog tasks (task-id | description)
    #[arg(long, env = "MILEAGE_MATCH_BY", default_value = "task-id")]
    match_by: MatchKey,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which maintenance tasks are due at the current mileage
    Check {
        /// Current odometer reading (km)
        mileage: Mileage,
    },

    /// Add a service record
    Add(AddArgs),

    /// Show the full service history
    History,

    /// List the scheduled maintenance catalog
    Catalog,
}

#[derive(Args)]
struct AddArgs {
    /// Odometer reading at the time of service (km)
    #[arg(short, long, allow_negative_numbers = true)]
    mileage: i64,

    /// Catalog code of the scheduled procedure performed
    #[arg(short, long, conflicts_with = "repair", required_unless_present = "repair")]
    task: Option<u32>,

    /// Description of an unscheduled repair
    #[arg(short, long)]
    repair: Option<String>,

    /// Service date (YYYY-MM-DD, default: today)
    #[arg(short, long)]
    date: Option<NaiveDate>,
}

impl AddArgs {
    fn into_request(self) -> RecordRequest {
        let request = match (self.task, self.repair) {
            (Some(task), _) => RecordRequest::scheduled(self.mileage, task),
            (None, repair) => RecordRequest::repair(self.mileage, repair.unwrap_or_default()),
        };

        match self.date {
            Some(date) => request.on(date),
            None => request,
        }
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        None => Ok(Catalog::standard()),
    }
}

async fn open_service_log(db: &str, match_by: MatchKey, catalog: Catalog) -> Result<ServiceLog> {
    let db_path = shellexpand::tilde(db).into_owned();

    if let Some(parent) = Path::new(&db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    info!(db_path = %db_path, "Opening service log...");

    let pool = create_pool(&db_path)
        .await
        .context("Failed to open the service log database")?;
    run_migrations(&pool)
        .await
        .context("Failed to migrate the service log database")?;

    let store = Arc::new(SqliteRecordStore::new(pool));

    Ok(ServiceLog::new(store, Arc::new(catalog), Arc::new(SystemTimeProvider))
        .with_match_key(match_by))
}

async fn run(cli: Cli) -> Result<()> {
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match cli.command {
        // Listing the catalog never touches the database
        Commands::Catalog => render::catalog(&catalog),

        Commands::Check { mileage } => {
            let service_log = open_service_log(&cli.db, cli.match_by, catalog).await?;
            let report = service_log
                .check(mileage)
                .await
                .context("Unable to check service status")?;
            render::due_report(&report);
        }

        Commands::Add(args) => {
            let service_log = open_service_log(&cli.db, cli.match_by, catalog).await?;
            let record_id = service_log
                .record(args.into_request())
                .await
                .context("Failed to add service record")?;

            println!(
                "{}",
                format!("✓ Record #{} added to the service log", record_id)
                    .green()
                    .bold()
            );
        }

        Commands::History => {
            let service_log = open_service_log(&cli.db, cli.match_by, catalog).await?;
            let records = service_log
                .history()
                .await
                .context("Failed to read service history")?;
            render::history(&records);
        }
    }

    Ok(())
}

/// One-line failure with the full context chain
fn failure_message(err: &anyhow::Error) -> String {
    format!("✗ {:#}", err).red().bold().to_string()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", failure_message(&err));
            ExitCode::FAILURE
        }
    }
}
