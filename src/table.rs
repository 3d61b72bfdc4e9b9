use crate::{
    convert::{COL_AZIMUTH, COL_ELEVATION, COL_RANGE, MIN_COLUMNS},
    error::{ConvertError, ConvertResult, Stage},
    matrix::Matrix,
};
use csv::{ByteRecord, ReaderBuilder, Terminator, Trim, WriterBuilder};
use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

// ─────────────────────────────────────────────────────────────────────
// Spreadsheet export → working matrix
// ─────────────────────────────────────────────────────────────────────

/// Reads a delimited table from `path`, dropping the first `skip_rows` records.
pub fn load_table(path: &Path, skip_rows: usize, delimiter: u8) -> ConvertResult<Matrix> {
    let file = File::open(path).map_err(|source| ConvertError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    read_table(BufReader::new(file), skip_rows, delimiter).map_err(|e| match e {
        ReadError::Io(source) => ConvertError::InputNotFound { path: path.to_path_buf(), source },
        ReadError::Convert(e) => e,
    })
}

enum ReadError {
    Io(io::Error),
    Convert(ConvertError),
}

impl From<ConvertError> for ReadError {
    fn from(e: ConvertError) -> Self { ReadError::Convert(e) }
}

fn read_table<R: Read>(rdr: R, skip_rows: usize, delimiter: u8) -> Result<Matrix, ReadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(delimiter)
        .from_reader(rdr);

    let mut table: Option<Matrix> = None;
    let mut row = Vec::new();
    let mut skipped = 0;

    for result in rdr.byte_records() {
        let rec = result.map_err(|e| {
            let message = e.to_string();
            match e.into_kind() {
                csv::ErrorKind::Io(err) => ReadError::Io(err),
                _ => ReadError::Convert(ConvertError::malformed(Stage::Load, message)),
            }
        })?;
        // whitespace-only lines
        if rec.iter().all(|f| f.is_empty()) {
            continue;
        }
        let line = rec.position().map_or(0, |p| p.line());

        if skipped < skip_rows {
            skipped += 1;
            if looks_like_data(&rec) {
                warn!(line, "dropped row {line} looks like data, not a header (see --skip-rows)");
            }
            continue;
        }

        let width = table.get_or_insert_with(|| Matrix::with_width(rec.len())).cols();
        if width < MIN_COLUMNS {
            return Err(ConvertError::malformed(
                Stage::Load,
                format!("line {line}: expected at least {MIN_COLUMNS} columns, got {width}"),
            )
            .into());
        }
        if rec.len() != width {
            return Err(ConvertError::malformed(
                Stage::Load,
                format!("line {line}: expected {width} fields like the first row, got {}", rec.len()),
            )
            .into());
        }

        parse_record(&rec, line, &mut row)?;
        if let Some(t) = table.as_mut() {
            t.push_row(&row);
        }
    }

    let table = table.unwrap_or_else(|| Matrix::with_width(0));
    debug!(rows = table.rows(), cols = table.cols(), "loaded input table");
    Ok(table)
}

fn is_consumed(c: usize) -> bool {
    matches!(c, COL_AZIMUTH | COL_ELEVATION | COL_RANGE)
}

/// `None` for non-UTF-8 or non-numeric fields.
fn parse_field(field: &[u8]) -> Option<f64> {
    std::str::from_utf8(field).ok()?.parse().ok()
}

/// True when every consumed column of `rec` holds a finite number.
fn looks_like_data(rec: &ByteRecord) -> bool {
    rec.len() >= MIN_COLUMNS
        && (COL_AZIMUTH..=COL_RANGE).all(|c| parse_field(&rec[c]).is_some_and(f64::is_finite))
}

/// Consumed columns must be finite numbers; the rest become NaN when they are not numeric.
fn parse_record(rec: &ByteRecord, line: u64, out: &mut Vec<f64>) -> ConvertResult<()> {
    out.clear();
    for (c, field) in rec.iter().enumerate() {
        let value = match parse_field(field) {
            Some(v) if v.is_finite() || !is_consumed(c) => v,
            _ if is_consumed(c) => {
                return Err(ConvertError::malformed(
                    Stage::Load,
                    format!("line {line}, column {} ({}): {:?} is not a finite number",
                        c + 1, column_name(c), String::from_utf8_lossy(field)),
                ));
            }
            _ => f64::NAN,
        };
        out.push(value);
    }
    Ok(())
}

fn column_name(c: usize) -> &'static str {
    match c {
        COL_AZIMUTH   => "azimuth",
        COL_ELEVATION => "elevation",
        COL_RANGE     => "range",
        _             => "passthrough",
    }
}

// ─────────────────────────────────────────────────────────────────────
// Output matrix → CSV (all or nothing)
// ─────────────────────────────────────────────────────────────────────

/// Writes `table` comma-separated with no header. The file only appears at
/// `path` once every row is on disk.
pub fn write_table(path: &Path, table: &Matrix) -> ConvertResult<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let wrap = |source: io::Error| ConvertError::output_write(path, source);

    let mut tmp = NamedTempFile::new_in(dir).map_err(wrap)?;
    write_rows(tmp.as_file_mut(), table).map_err(wrap)?;
    tmp.as_file().sync_all().map_err(wrap)?;
    tmp.persist(path).map_err(|e| wrap(e.error))?;

    debug!(rows = table.rows(), path = %path.display(), "wrote output table");
    Ok(())
}

fn write_rows<W: io::Write>(w: W, table: &Matrix) -> io::Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(w);
    for row in table.iter_rows() {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()
}
