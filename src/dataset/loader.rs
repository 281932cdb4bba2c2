//! Reads the benchmark CSV into typed observations.
//!
//! Columns are addressed by header name, so their order in the file does not
//! matter. The Kruskal runner terminates every row with `;` and pads fields
//! with spaces; both are tolerated.

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::types::Observation;
use crate::error::PlotError;

pub const COL_SIZE: &str = "N";
pub const COL_EXTRACTOR: &str = "EdgeExtractorName";
pub const COL_INSERTION: &str = "TimeInsertion";
pub const COL_OPTI_PATH: &str = "KruskalOptiPath";
pub const COL_KRUSKAL: &str = "TimeKruskal";

/// Header positions of the required columns.
struct ColumnIndex {
    size: usize,
    extractor: usize,
    insertion: usize,
    opti_path: usize,
    kruskal: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, PlotError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| clean_field(h) == column)
                .ok_or(PlotError::Schema { column })
        };

        Ok(Self {
            size: find(COL_SIZE)?,
            extractor: find(COL_EXTRACTOR)?,
            insertion: find(COL_INSERTION)?,
            opti_path: find(COL_OPTI_PATH)?,
            kruskal: find(COL_KRUSKAL)?,
        })
    }
}

/// Load every observation from the file at `path`.
pub fn load_observations(path: &Path) -> Result<Vec<Observation>, PlotError> {
    let file = File::open(path).map_err(|e| PlotError::io(path, e))?;
    let observations = read_observations(file)?;
    debug!("Loaded {} observations from {}", observations.len(), path.display());
    Ok(observations)
}

/// Parse observations from any reader holding the CSV text.
pub fn read_observations<R: Read>(reader: R) -> Result<Vec<Observation>, PlotError> {
    let mut reader = ReaderBuilder::new().has_headers(true).trim(Trim::All).from_reader(reader);

    let headers = reader.headers()?.clone();
    let index = ColumnIndex::from_headers(&headers)?;

    let mut observations = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let field = |i: usize| clean_field(record.get(i).unwrap_or(""));

        observations.push(Observation {
            size: parse_size(field(index.size), line)?,
            edge_extractor: parse_extractor(field(index.extractor), line)?,
            uses_optimized_union_find: parse_flag(field(index.opti_path), line)?,
            insertion_time_ms: parse_time(field(index.insertion), COL_INSERTION, line)?,
            kruskal_time_ms: parse_time(field(index.kruskal), COL_KRUSKAL, line)?,
        });
    }

    Ok(observations)
}

/// Strip surrounding whitespace and the runner's `;` row terminator.
fn clean_field(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end()
}

fn parse_error(line: u64, column: &'static str, value: &str) -> PlotError {
    PlotError::Parse {
        line,
        column,
        value: value.to_string(),
    }
}

fn parse_size(value: &str, line: u64) -> Result<u64, PlotError> {
    value.parse().map_err(|_| parse_error(line, COL_SIZE, value))
}

fn parse_extractor(value: &str, line: u64) -> Result<String, PlotError> {
    if value.is_empty() {
        return Err(parse_error(line, COL_EXTRACTOR, value));
    }
    Ok(value.to_string())
}

/// Accepts integers (non-zero means selected) and `true`/`false` literals.
fn parse_flag(value: &str, line: u64) -> Result<bool, PlotError> {
    if let Ok(n) = value.parse::<i64>() {
        return Ok(n != 0);
    }
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(parse_error(line, COL_OPTI_PATH, value))
    }
}

fn parse_time(value: &str, column: &'static str, line: u64) -> Result<f64, PlotError> {
    match value.parse::<f64>() {
        Ok(t) if t.is_finite() && t >= 0.0 => Ok(t),
        _ => Err(parse_error(line, column, value)),
    }
}
