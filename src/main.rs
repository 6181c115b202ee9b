//! Catalog Sync - MTG Card Database Reconciliation
//!
//! Batch job: loads one snapshot of the Scryfall bulk card data, diffs it
//! against the database, writes the difference, and exits.

use clap::Parser;
use rusqlite::Connection;
use std::path::PathBuf;

use catalog_sync::{database, reconcile_all, Snapshot};

/// Reconciles Scryfall bulk card data into a SQLite database
#[derive(Parser, Debug)]
#[command(name = "catalog_sync")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    #[arg(short, long, default_value_t = default_db_path())]
    database: String,

    /// Path to a pre-downloaded Scryfall "all cards" bulk JSON file
    /// (default: download the current dump from Scryfall)
    #[arg(short, long)]
    input: Option<PathBuf>,
}

/// Returns the default database path: ~/.local/share/catalog_sync/catalog.db
fn default_db_path() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("catalog_sync")
        .join("catalog.db")
        .to_string_lossy()
        .to_string()
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let db_path = PathBuf::from(&args.database);

    log::info!("Starting catalog_sync...");
    log::info!("Database path: {}", db_path.display());

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        if !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::error!("Failed to create database directory: {}", e);
                std::process::exit(1);
            }
            log::info!("Created directory: {}", parent.display());
        }
    }

    // Open database connection
    let mut conn = match Connection::open(&db_path) {
        Ok(conn) => {
            log::info!("Opened database: {}", db_path.display());
            conn
        }
        Err(e) => {
            log::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize database schema
    if let Err(e) = database::init_schema(&conn) {
        log::error!("Failed to initialize database schema: {}", e);
        std::process::exit(1);
    }

    // Acquire the source snapshot
    let snapshot = match load_snapshot(&args).await {
        Ok(snapshot) => {
            log::info!(
                "Snapshot ready: {} sets, {} printings",
                snapshot.set_count(),
                snapshot.printing_count()
            );
            snapshot
        }
        Err(e) => {
            log::error!("Failed to load bulk card data: {}", e);
            std::process::exit(1);
        }
    };

    // Reconcile sets and cards into the database
    if let Err(e) = reconcile_all(&mut conn, &snapshot) {
        log::error!("Reconciliation failed: {}", e);
        std::process::exit(1);
    }

    if let (Ok(sets), Ok(cards)) = (database::set_count(&conn), database::card_count(&conn)) {
        log::info!("Database now holds {} sets and {} cards", sets, cards);
    }

    log::info!("Sync completed successfully.");
}

async fn load_snapshot(args: &Args) -> catalog_sync::Result<Snapshot> {
    match &args.input {
        Some(path) => Snapshot::load(path),
        None => Snapshot::fetch().await,
    }
}
