//! Comma-separated trace tables.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use abif_format::TraceMatrix;
use tempfile::NamedTempFile;

use crate::{Error, Result};

/// Header columns, position first, then the four channels in entry order.
pub const COLUMNS: [&str; 5] = [
    "Position",
    "Footprinted Sample",
    "ddA Ladder",
    "ddC Ladder",
    "Space Measure",
];

/// Suffix replacing the input extension in derived output names.
pub const OUTPUT_SUFFIX: &str = "_raw.csv";

/// Write a trace matrix as a comma-separated table.
pub fn write_table<W: Write>(matrix: &TraceMatrix, writer: W) -> Result<()> {
    let mut out = BufWriter::new(writer);
    writeln!(out, "{}", COLUMNS.join(","))?;
    for (i, [a, b, c, d]) in matrix.rows().enumerate() {
        writeln!(out, "{},{},{},{},{}", i + 1, a, b, c, d)?;
    }
    out.flush()?;
    Ok(())
}

/// Write a trace table to `path`.
///
/// The table is written to a temporary file in the same directory and
/// renamed over `path` only once complete, so a failure never leaves a
/// partial table behind.
pub fn write_table_to_path<P: AsRef<Path>>(matrix: &TraceMatrix, path: P) -> Result<()> {
    let path = path.as_ref();
    if path.file_name().is_none() {
        return Err(Error::InvalidPath(path.to_path_buf()));
    }
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    write_table(matrix, tmp.as_file_mut())?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    log::debug!("wrote {} rows to {}", matrix.len(), path.display());
    Ok(())
}

/// Derive the table path for an input file: `run.fsa` -> `run_raw.csv`.
pub fn output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}", stem, OUTPUT_SUFFIX))
}
