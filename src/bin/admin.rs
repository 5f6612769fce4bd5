//! CLI administration tool for shipment-exceptions.
//!
//! Loads prepared shipment and exception files, shows stored exceptions and
//! counts, and checks database connectivity without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Upsert shipments from a JSON array (same rules as POST /api/upload)
//! cargo run --bin admin -- load shipments data/sample_shipments.json
//!
//! # Or straight from a spreadsheet export (first sheet, header row first)
//! cargo run --bin admin -- load shipments data/week01.xlsx
//!
//! # Load exceptions produced by the rule evaluator
//! cargo run --bin admin -- load exceptions data/exceptions.json --yes
//!
//! # List exceptions joined to shipments
//! cargo run --bin admin -- exceptions
//!
//! # Show one stored shipment
//! cargo run --bin admin -- shipment SH-1001
//!
//! # View counts
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL`, or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`.

use shipment_exceptions::application::services::{ExceptionService, IngestService};
use shipment_exceptions::config;
use shipment_exceptions::domain::entities::{RawException, RowOutcome};
use shipment_exceptions::domain::repositories::{ExceptionRepository, ShipmentRepository};
use shipment_exceptions::infrastructure::import::excel;
use shipment_exceptions::infrastructure::persistence::{
    ConnectionProvider, PgExceptionRepository, PgShipmentRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// CLI tool for managing shipment-exceptions.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Load records from a JSON file
    Load {
        #[command(subcommand)]
        target: LoadTarget,
    },

    /// List exceptions joined to shipments
    Exceptions,

    /// Show a stored shipment by reference
    Shipment {
        /// Shipment reference
        shipment_ref: String,
    },

    /// Show record counts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// What to load.
#[derive(Subcommand)]
enum LoadTarget {
    /// Upsert shipments from a JSON array or an .xlsx/.xls sheet
    Shipments {
        /// Path to the JSON or spreadsheet file
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Insert exceptions from a JSON array, matched by shipment_ref
    Exceptions {
        /// Path to the JSON file
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let connections = ConnectionProvider::connect_lazy(&config)
        .context("Failed to configure database connection")?;

    let shipments = Arc::new(PgShipmentRepository::new(connections.clone()));
    let exceptions = Arc::new(PgExceptionRepository::new(connections.clone()));

    match cli.command {
        Commands::Load { target } => match target {
            LoadTarget::Shipments { file, yes } => load_shipments(shipments, &file, yes).await?,
            LoadTarget::Exceptions { file, yes } => {
                load_exceptions(exceptions, shipments, &file, yes).await?
            }
        },
        Commands::Exceptions => list_exceptions(exceptions, shipments).await?,
        Commands::Shipment { shipment_ref } => show_shipment(shipments, &shipment_ref).await?,
        Commands::Stats => handle_stats(shipments, exceptions).await?,
        Commands::Db { action } => handle_db_action(action, &connections).await?,
    }

    Ok(())
}

/// Reads and parses a JSON file.
async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_slice(&bytes).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Reads shipment records from a spreadsheet or a JSON file, by extension.
async fn read_shipment_records(path: &Path) -> Result<Vec<Value>> {
    if !excel::is_spreadsheet(path) {
        return read_json(path).await;
    }

    let path = path.to_path_buf();
    let records = tokio::task::spawn_blocking(move || excel::read_shipment_rows(&path))
        .await
        .context("Spreadsheet reader task failed")??;

    Ok(records)
}

/// Asks for confirmation unless `--yes` was given.
fn confirm(prompt: &str, skip: bool) -> Result<bool> {
    if skip {
        return Ok(true);
    }

    let confirmed = Confirm::new().with_prompt(prompt).default(true).interact()?;
    if !confirmed {
        println!("{}", "❌ Cancelled".red());
    }

    Ok(confirmed)
}

/// Upserts shipments from a file through the same service as the HTTP endpoint.
///
/// # Output Format
///
/// ```text
/// 📦 Load Shipments
///
///   Inserted: 12
///   Updated:  3
///   Failed:   1
///
///   #4  SH-1004   missing field `destination`
/// ```
async fn load_shipments(repo: Arc<PgShipmentRepository>, file: &Path, yes: bool) -> Result<()> {
    println!("{}", "📦 Load Shipments".bright_blue().bold());
    println!();

    let records = read_shipment_records(file).await?;
    println!(
        "  {} records in {}",
        records.len().to_string().bright_white().bold(),
        file.display().to_string().cyan()
    );
    println!();

    if !confirm("Upsert these shipments?", yes)? {
        return Ok(());
    }

    let service = IngestService::new(repo);
    let report = service
        .ingest(records)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load shipments: {}", e))?;

    println!(
        "  Inserted: {}",
        (report.written() - report.updated())
            .to_string()
            .bright_green()
            .bold()
    );
    println!(
        "  Updated:  {}",
        report.updated().to_string().bright_green().bold()
    );
    println!("  Failed:   {}", report.failed().to_string().red().bold());

    let failures: Vec<_> = report
        .rows
        .iter()
        .filter_map(|row| match &row.outcome {
            RowOutcome::Failed(message) => Some((row, message)),
            RowOutcome::Written(_) => None,
        })
        .collect();

    if !failures.is_empty() {
        println!();
        for (row, message) in failures {
            println!(
                "  {:<4} {:<12} {}",
                format!("#{}", row.index).bright_black(),
                row.shipment_ref.as_deref().unwrap_or("-").cyan(),
                message.yellow()
            );
        }
    }
    println!();

    Ok(())
}

/// Loads exceptions from a file, skipping records for unknown shipments.
async fn load_exceptions(
    exceptions: Arc<PgExceptionRepository>,
    shipments: Arc<PgShipmentRepository>,
    file: &Path,
    yes: bool,
) -> Result<()> {
    println!("{}", "⚠️  Load Exceptions".bright_blue().bold());
    println!();

    let records: Vec<RawException> = read_json(file).await?;
    println!(
        "  {} records in {}",
        records.len().to_string().bright_white().bold(),
        file.display().to_string().cyan()
    );
    println!();

    if !confirm("Insert these exceptions?", yes)? {
        return Ok(());
    }

    let service = ExceptionService::new(exceptions, shipments);
    let summary = service
        .load_exceptions(records)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load exceptions: {}", e))?;

    println!(
        "  Recorded: {}",
        summary.recorded.to_string().bright_green().bold()
    );
    println!(
        "  Skipped (unknown shipment): {}",
        summary.skipped.to_string().yellow().bold()
    );
    println!();

    Ok(())
}

/// Lists exceptions joined to shipments.
///
/// # Output Format
///
/// ```text
/// 📋 Exceptions
///
///   Shipment     Rule                 Severity   Value
///   ────────────────────────────────────────────────────────
///   SH-1001      ARRIVAL_LATE         HIGH       2026-01-06
/// ```
async fn list_exceptions(
    exceptions: Arc<PgExceptionRepository>,
    shipments: Arc<PgShipmentRepository>,
) -> Result<()> {
    println!("{}", "📋 Exceptions".bright_blue().bold());
    println!();

    let service = ExceptionService::new(exceptions, shipments);
    let records = service
        .list_exceptions()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list exceptions: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No exceptions found".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<12} {:<20} {:<10} {}",
        "Shipment".bright_white().bold(),
        "Rule".bright_white().bold(),
        "Severity".bright_white().bold(),
        "Value".bright_white().bold()
    );
    println!("  {}", "─".repeat(60).bright_black());

    for record in &records {
        let severity = match record.severity.to_ascii_uppercase().as_str() {
            "HIGH" | "CRITICAL" => record.severity.red(),
            "MEDIUM" => record.severity.yellow(),
            _ => record.severity.normal(),
        };

        println!(
            "  {:<12} {:<20} {:<10} {}",
            record.shipment_ref.cyan(),
            record.rule_code,
            severity,
            record.exception_value.as_deref().unwrap_or("-").bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        records.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Shows one stored shipment.
///
/// # Output Format
///
/// ```text
/// 🚚 Shipment SH-1001
///
///   Origin:            Rotterdam
///   Destination:       Hamburg
///   Planned arrival:   2026-01-05 00:00:00
///   ...
/// ```
async fn show_shipment(repo: Arc<PgShipmentRepository>, shipment_ref: &str) -> Result<()> {
    let shipment = repo
        .find_by_ref(shipment_ref)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let Some(shipment) = shipment else {
        println!(
            "{} {}",
            "❌ Shipment not found:".red(),
            shipment_ref.bright_white()
        );
        return Ok(());
    };

    println!(
        "{} {}",
        "🚚 Shipment".bright_blue().bold(),
        shipment.shipment_ref.cyan().bold()
    );
    println!();

    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    let timestamp = |value: &Option<chrono::NaiveDateTime>| {
        value
            .map(|ts| ts.to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    let fields = [
        ("Origin", text(&shipment.origin)),
        ("Destination", text(&shipment.destination)),
        ("Carrier", text(&shipment.carrier)),
        ("Planned departure", timestamp(&shipment.planned_departure)),
        ("Planned arrival", timestamp(&shipment.planned_arrival)),
        ("Actual arrival", timestamp(&shipment.actual_arrival)),
        ("Status", text(&shipment.status)),
        ("Source file", text(&shipment.source_file)),
    ];

    for (label, value) in fields {
        println!("  {:<18} {}", format!("{}:", label), value.bright_white());
    }
    println!();

    Ok(())
}

/// Displays record counts.
async fn handle_stats(
    shipments: Arc<PgShipmentRepository>,
    exceptions: Arc<PgExceptionRepository>,
) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let shipments_count = shipments
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;
    let exceptions_count = exceptions
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!(
        "  Shipments:  {}",
        shipments_count.to_string().bright_green().bold()
    );
    println!(
        "  Exceptions: {}",
        exceptions_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, connections: &ConnectionProvider) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            connections
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(connections.pool())
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
