//! Bulk CSV Loader Binary
//!
//! Creates a record store and populates it from a delimited text file.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use isamlite::{loader, Config, Schema, StoreWriter};
use tracing_subscriber::{fmt, EnvFilter};

/// isamlite loader
#[derive(Parser, Debug)]
#[command(name = "isamlite-load")]
#[command(about = "Bulk-load delimited text into a keyed record store")]
#[command(version)]
struct Args {
    /// CSV input file (header line, then id,name,email,phone,registration_date)
    #[arg(short, long, default_value = "customers.csv")]
    csv: PathBuf,

    /// Record store data file
    #[arg(short, long, default_value = "customers.isam")]
    store: PathBuf,

    /// Field separator
    #[arg(short, long, default_value = ",")]
    delimiter: char,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,isamlite=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    tracing::info!("isamlite loader v{}", isamlite::VERSION);

    let config = Config::builder()
        .store_path(&args.store)
        .delimiter(args.delimiter)
        .build();

    println!("Creating store file: {}", config.store_path.display());

    // Fatal: store creation failure aborts the whole run
    let mut writer = match StoreWriter::create(&config.store_path, Schema::customer()) {
        Ok(writer) => writer,
        Err(e) => {
            tracing::error!("Failed to create store: {}", e);
            std::process::exit(1);
        }
    };

    // Fatal: unreadable input aborts the whole run
    let input = match File::open(&args.csv) {
        Ok(file) => BufReader::new(file),
        Err(e) => {
            tracing::error!("Cannot open CSV file {}: {}", args.csv.display(), e);
            std::process::exit(1);
        }
    };

    println!("Loading data from {}...", args.csv.display());

    let report = match loader::load_all(input, &mut writer, &config) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Load failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = writer.finish() {
        tracing::error!("Failed to finish store: {}", e);
        std::process::exit(1);
    }

    println!();
    println!("========================================");
    println!("Loading completed!");
    println!("Total records loaded: {}", report.loaded);
    println!("Errors: {}", report.failed);
    println!("Store file: {}", config.store_path.display());
    println!("========================================");
}
