//! Rot128 donations CLI
//!
//! Decrypts a Rot128-encoded donations file, charges every donation through
//! the dry-run gateway and prints a summary to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- data/fng.1000.csv.rot128
//! cargo run -- data/fng.1000.csv.rot128 -o data/fng.1000.csv --decrypt-only
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use clap::Parser;
use log::info;
use rot128_donations::{
    decrypt_file, default_output_path, DonationEngine, DonationError, DryRunGateway, EngineConfig,
    Result, Rotation,
};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

/// Decrypt a Rot128 donations file and run the charges
#[derive(Parser, Debug)]
#[command(name = "rot128-donations", version)]
#[command(about = "Decrypts a Rot128 donations file and charges each donation", long_about = None)]
struct Args {
    /// Encrypted donations file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Where to write the decrypted CSV (defaults to INPUT without `.rot128`)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Rotation offset, wrapped modulo 256
    #[arg(long, default_value_t = 128, allow_negative_numbers = true)]
    offset: i64,

    /// Currency code sent with each charge
    #[arg(long, default_value = "thb")]
    currency: String,

    /// Number of top donors to list
    #[arg(long, default_value_t = 3)]
    top: usize,

    /// Refuse cards that expired before this month (YYYY-MM)
    #[arg(long, value_name = "YYYY-MM", value_parser = parse_year_month)]
    as_of: Option<(u16, u8)>,

    /// Stop after writing the decrypted file
    #[arg(long)]
    decrypt_only: bool,
}

/// Parses `YYYY-MM` into `(year, month)`.
fn parse_year_month(s: &str) -> std::result::Result<(u16, u8), String> {
    let (year, month) = s
        .trim()
        .split_once('-')
        .ok_or_else(|| format!("expected YYYY-MM, got `{}`", s))?;
    let year = year
        .parse::<u16>()
        .map_err(|_| format!("invalid year `{}`", year))?;
    let month = month
        .parse::<u8>()
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| format!("invalid month `{}`", month))?;
    Ok((year, month))
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let rotation = Rotation::normalized(args.offset);
    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input));

    decrypt_file(&args.input, &output, rotation)?;
    println!("Decryption complete.");

    if args.decrypt_only {
        return Ok(());
    }

    let file = File::open(&output).map_err(|source| DonationError::Open {
        path: output.clone(),
        source,
    })?;

    let config = EngineConfig {
        currency: args.currency.to_lowercase(),
        top_donors: args.top,
    };
    let mut gateway = DryRunGateway::new();
    if let Some((year, month)) = args.as_of {
        gateway = gateway.with_reference_month(year, month);
    }
    let mut engine = DonationEngine::new(gateway, config);

    info!("Performing donations from {}", output.display());
    engine.process_csv(BufReader::new(file))?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    engine.write_summary(handle)?;

    Ok(())
}
