// USAGE cargo run --release -- tracking.csv xyz.csv [--scale 10] [--skip-rows 1]

use aer_to_xyz::{config, run, Config, DEFAULT_SCALE};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Convert an AER (azimuth, elevation, range) tracking table into X,Y,Z CSV.
#[derive(Parser, Debug)]
#[command(name = "aer_to_xyz", version, about)]
struct Args {
    /// Input table: [id/time, azimuth_deg, elevation_deg, range, ...]
    #[arg(env = "AER_INPUT", default_value = config::DEFAULT_INPUT)]
    input: PathBuf,

    /// Output CSV (X,Y,Z per row, no header)
    #[arg(env = "AER_OUTPUT", default_value = config::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Divisor applied to every output coordinate
    #[arg(long, env = "AER_SCALE", default_value_t = DEFAULT_SCALE)]
    scale: f64,

    /// Leading header / metadata rows to drop
    #[arg(long, default_value_t = config::DEFAULT_SKIP_ROWS)]
    skip_rows: usize,

    /// Input field separator (`tab` for tab-separated exports)
    #[arg(long, default_value = ",", value_parser = config::parse_delimiter)]
    delimiter: u8,

    /// Map the output back to AER and log the worst range residual
    #[arg(long)]
    verify: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl From<Args> for Config {
    fn from(a: Args) -> Self {
        Config {
            input:     a.input,
            output:    a.output,
            scale:     a.scale,
            skip_rows: a.skip_rows,
            delimiter: a.delimiter,
            verify:    a.verify,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cfg = Config::from(args);
    let summary = run(&cfg).with_context(|| {
        format!("converting {} → {}", cfg.input.display(), cfg.output.display())
    })?;

    eprintln!("Finished OK, wrote {} rows → {}", summary.rows, cfg.output.display());
    Ok(())
}
