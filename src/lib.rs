//! Satellite AER tracking table → scaled X,Y,Z CSV for 3D viewers.
//!
//! Input rows are `[id/time, azimuth_deg, elevation_deg, range, ...]`; output
//! rows are `x, y, z` divided by the configured scale (10 by default).

pub mod config;
pub mod convert;
pub mod error;
pub mod matrix;
pub mod table;


pub use config::Config;
pub use convert::{aer_to_cartesian, cartesian_to_aer, convert, deg_to_rad, Aer, DEFAULT_SCALE};
pub use error::{ConvertError, ConvertResult, Stage};
pub use matrix::Matrix;

use std::time::Instant;
use tracing::{info, warn};

/// What one run converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub rows:          usize,
    pub input_columns: usize,
}

// ─────────────────────────────────────────────────────────────────────
// Simple timing helper
// ─────────────────────────────────────────────────────────────────────
pub fn timeit<T, F: FnOnce() -> T>(label: &str, f: F) -> T {
    let t0 = Instant::now();
    let out = f();
    info!(stage = label, elapsed = ?t0.elapsed(), "stage done");
    out
}

/// load → convert → write. Nothing is written unless every row converts.
pub fn run(cfg: &Config) -> ConvertResult<Summary> {
    cfg.validate()?;

    let mut aer = timeit("load", || table::load_table(&cfg.input, cfg.skip_rows, cfg.delimiter))?;
    let input_columns = aer.cols();

    let xyz = timeit("transform", || convert::convert(&mut aer, cfg.scale))?;

    if cfg.verify {
        let residual = convert::max_range_residual(&aer, &xyz, cfg.scale);
        if residual > 1e-6 * max_abs_range(&aer).max(1.0) {
            warn!(residual, "round-trip range residual is larger than expected");
        } else {
            info!(residual, "round-trip check passed");
        }
    }

    timeit("write", || table::write_table(&cfg.output, &xyz))?;

    let summary = Summary { rows: xyz.rows(), input_columns };
    info!(
        rows = summary.rows,
        input_columns,
        input = %cfg.input.display(),
        output = %cfg.output.display(),
        "conversion finished"
    );
    Ok(summary)
}

fn max_abs_range(aer: &Matrix) -> f64 {
    aer.iter_rows().map(|r| r[convert::COL_RANGE].abs()).fold(0.0, f64::max)
}
