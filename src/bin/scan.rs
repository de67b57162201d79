//! Sequential Scanner Binary
//!
//! Opens a record store and displays its records in key order: a bounded
//! preview followed by an independent full count.

use std::path::PathBuf;

use clap::Parser;
use isamlite::{scanner, Config, Schema, StoreReader};
use tracing_subscriber::{fmt, EnvFilter};

/// isamlite scanner
#[derive(Parser, Debug)]
#[command(name = "isamlite-scan")]
#[command(about = "Scan a keyed record store in key order")]
#[command(version)]
struct Args {
    /// Record store data file
    #[arg(short, long, default_value = "customers.isam")]
    store: PathBuf,

    /// Max records to display
    #[arg(short, long, default_value = "20")]
    limit: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,isamlite=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let config = Config::builder()
        .store_path(&args.store)
        .preview_limit(args.limit)
        .build();

    println!("Opening store file: {}", config.store_path.display());
    println!();

    // Fatal: open failure aborts the whole run
    let reader = match StoreReader::open(&config.store_path, Schema::customer()) {
        Ok(reader) => reader,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    println!("========================================");
    println!("Customer Records");
    println!("========================================");
    println!();

    // Fatal: a preview failure here is an initial-positioning or
    // corruption error, not an empty store
    let preview = match scanner::preview(&reader, config.preview_limit) {
        Ok(preview) => preview,
        Err(e) => {
            tracing::error!("Scan failed: {}", e);
            std::process::exit(1);
        }
    };

    for record in &preview.records {
        println!("{}", scanner::render(record));
        println!();
    }

    if preview.truncated {
        println!("... (showing first {} records)", config.preview_limit);
        println!();
    }

    // Independent full count, never sharing the preview's cursor
    let total = match scanner::total_count(&reader) {
        Ok(total) => total,
        Err(e) => {
            tracing::error!("Count failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("========================================");
    println!("Total records: {}", total);
    println!("========================================");
}
