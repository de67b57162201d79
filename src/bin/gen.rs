//! Sample Data Generator Binary
//!
//! Writes a CSV file of sequential sample customers with randomized phone
//! numbers and registration dates, suitable as loader input.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::{fmt, EnvFilter};

/// isamlite sample-data generator
#[derive(Parser, Debug)]
#[command(name = "isamlite-gen")]
#[command(about = "Generate sample customer CSV data")]
#[command(version)]
struct Args {
    /// Output CSV file
    #[arg(short, long, default_value = "customers.csv")]
    output: PathBuf,

    /// Number of customer rows
    #[arg(short, long, default_value = "1000")]
    count: u32,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,isamlite=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if let Err(e) = write_csv(&args.output, args.count, &mut rng) {
        tracing::error!("Failed to write {}: {}", args.output.display(), e);
        std::process::exit(1);
    }

    println!(
        "Generated {} records to {}",
        args.count,
        args.output.display()
    );
}

/// Write the header plus `count` sample rows
fn write_csv(path: &PathBuf, count: u32, rng: &mut StdRng) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);

    writeln!(out, "customer_id,name,email,phone,registration_date")?;

    for id in 1..=count {
        let phone = format!(
            "010-{:04}-{:04}",
            rng.gen_range(1000..=9999),
            rng.gen_range(1000..=9999)
        );
        // Day capped at 28 so every month is valid
        let date = format!(
            "{:04}-{:02}-{:02}",
            rng.gen_range(2023..=2024),
            rng.gen_range(1..=12),
            rng.gen_range(1..=28)
        );

        writeln!(
            out,
            "{id},Customer_{id:04},customer{id}@example.com,{phone},{date}"
        )?;
    }

    out.flush()
}
