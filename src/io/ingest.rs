//! CSV ingest and normalization for pushover samples.
//!
//! This module turns a headered CSV export (typically a pushover recorder
//! dump) into clean, index-aligned displacement/force vectors that are safe
//! to fit.
//!
//! Design goals:
//! - **Strict schema** for the two required columns (clear errors)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Separation of concerns**: no fitting logic here

use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::SamplePair;
use crate::error::AppError;

/// Column naming for the two required fields.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub d_col: String,
    pub f_col: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            d_col: "disp".to_string(),
            f_col: "force".to_string(),
        }
    }
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: normalized samples + row errors + row accounting.
#[derive(Debug, Clone)]
pub struct IngestedSamples {
    pub samples: SamplePair,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load and normalize a displacement/force CSV.
pub fn load_sample_pairs(path: &Path, options: &IngestOptions) -> Result<IngestedSamples, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::invalid_argument(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::invalid_argument(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let d_idx = find_column(&headers, &options.d_col)?;
    let f_idx = find_column(&headers, &options.f_col)?;

    let mut disp = Vec::new();
    let mut force = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (i, record) in reader.records().enumerate() {
        // Header occupies line 1.
        let line = i + 2;
        rows_read += 1;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("Unreadable row: {e}"),
                });
                continue;
            }
        };
        match parse_row(&record, d_idx, f_idx) {
            Ok((d, f)) => {
                disp.push(d);
                force.push(f);
            }
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    if disp.is_empty() {
        return Err(AppError::invalid_argument(format!(
            "CSV '{}' contained no usable rows ({} rows read, {} rejected).",
            path.display(),
            rows_read,
            row_errors.len()
        )));
    }

    let rows_used = disp.len();
    Ok(IngestedSamples {
        samples: SamplePair { disp, force },
        row_errors,
        rows_read,
        rows_used,
    })
}

fn find_column(headers: &StringRecord, name: &str) -> Result<usize, AppError> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            AppError::invalid_argument(format!(
                "Required column '{name}' not found; headers are [{}].",
                headers.iter().collect::<Vec<_>>().join(", ")
            ))
        })
}

fn parse_row(record: &StringRecord, d_idx: usize, f_idx: usize) -> Result<(f64, f64), String> {
    let d_raw = record.get(d_idx).ok_or("Missing displacement field.")?;
    let f_raw = record.get(f_idx).ok_or("Missing force field.")?;
    let d: f64 = d_raw
        .parse()
        .map_err(|_| format!("Bad displacement value '{d_raw}'."))?;
    let f: f64 = f_raw
        .parse()
        .map_err(|_| format!("Bad force value '{f_raw}'."))?;
    if !d.is_finite() || !f.is_finite() {
        return Err(format!("Non-finite sample ({d_raw}, {f_raw})."));
    }
    Ok((d, f))
}
