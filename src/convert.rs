use crate::{
    error::{ConvertError, ConvertResult, Stage},
    matrix::Matrix,
};
use std::f64::consts::PI;
use tracing::debug;

// ─────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────
pub const COL_AZIMUTH:   usize = 1;
pub const COL_ELEVATION: usize = 2;
pub const COL_RANGE:     usize = 3;
pub const MIN_COLUMNS:   usize = COL_RANGE + 1;
pub const OUT_COLUMNS:   usize = 3;

/// Divisor applied to every output coordinate to land in the viewer's units.
pub const DEFAULT_SCALE: f64 = 10.0;

// ─────────────────────────────────────────────────────────────────────
// Single-sample transforms
// ─────────────────────────────────────────────────────────────────────
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Azimuth / elevation / range, angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aer {
    pub azimuth:   f64,
    pub elevation: f64,
    pub range:     f64,
}

/// Elevation is measured up from the horizontal plane, not down from the zenith.
pub fn aer_to_cartesian(azimuth: f64, elevation: f64, range: f64) -> [f64; 3] {
    let (sin_el, cos_el) = elevation.sin_cos();
    let (sin_az, cos_az) = azimuth.sin_cos();
    [
        range * cos_el * cos_az,
        range * cos_el * sin_az,
        range * sin_el,
    ]
}

/// Inverse of [`aer_to_cartesian`]. The origin maps to zero azimuth and elevation.
pub fn cartesian_to_aer([x, y, z]: [f64; 3]) -> Aer {
    let range = (x * x + y * y + z * z).sqrt();
    let elevation = if range == 0.0 { 0.0 } else { (z / range).clamp(-1.0, 1.0).asin() };
    Aer { azimuth: y.atan2(x), elevation, range }
}

// ─────────────────────────────────────────────────────────────────────
// Table conversion
// ─────────────────────────────────────────────────────────────────────

/// Converts an `N × ≥4` AER table into an `N × 3` table of `X, Y, Z / scale`.
///
/// Columns 1 and 2 of `table` are rewritten from degrees to radians in place.
/// Column 0 and anything past column 3 are never read. Zero and negative
/// ranges go through the same formula as any other.
pub fn convert(table: &mut Matrix, scale: f64) -> ConvertResult<Matrix> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ConvertError::invalid_config(format!(
            "scale must be a positive finite number, got {scale}"
        )));
    }
    if table.is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    if table.cols() < MIN_COLUMNS {
        return Err(ConvertError::malformed(
            Stage::Transform,
            format!("expected at least {MIN_COLUMNS} columns, got {}", table.cols()),
        ));
    }

    // consumed columns must be finite
    for (i, row) in table.iter_rows().enumerate() {
        for c in COL_AZIMUTH..=COL_RANGE {
            if !row[c].is_finite() {
                return Err(ConvertError::malformed(
                    Stage::Transform,
                    format!("row {}, column {}: {} is not a finite number", i + 1, c + 1, row[c]),
                ));
            }
        }
    }

    table.map_column(COL_AZIMUTH, deg_to_rad);
    table.map_column(COL_ELEVATION, deg_to_rad);

    let mut out = Matrix::zeros(table.rows(), OUT_COLUMNS);
    for (i, row) in table.iter_rows().enumerate() {
        let xyz = aer_to_cartesian(row[COL_AZIMUTH], row[COL_ELEVATION], row[COL_RANGE]);
        out.row_mut(i).copy_from_slice(&xyz);
    }
    out.map_all(|v| v / scale);

    debug!(rows = out.rows(), scale, "converted AER table");
    Ok(out)
}

/// Largest `|r_in - r_out|` after mapping every output row back through
/// [`cartesian_to_aer`] and undoing the scale. `aer_rad` is the converted
/// input table (angles already in radians).
pub fn max_range_residual(aer_rad: &Matrix, xyz: &Matrix, scale: f64) -> f64 {
    aer_rad
        .iter_rows()
        .zip(xyz.iter_rows())
        .map(|(src, out)| {
            let back = cartesian_to_aer([out[0] * scale, out[1] * scale, out[2] * scale]);
            (back.range - src[COL_RANGE].abs()).abs()
        })
        .fold(0.0, f64::max)
}
