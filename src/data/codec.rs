//! Line-based grid decoding
//!
//! Each non-blank line holds one grid as `<rows>x<columns>:<symbols>`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::MalformedPolicy;
use crate::error::AnalysisError;
use crate::grid::Grid;

/// Grids decoded from one input, in input order
#[derive(Debug, Clone, Default)]
pub struct DecodedGrids {
    pub grids: Vec<Grid>,

    /// Malformed lines dropped under [`MalformedPolicy::Skip`]
    pub skipped: usize,
}

/// Decode a single `<rows>x<columns>:<symbols>` line
pub fn parse_grid_line(line: &str) -> Result<Grid, AnalysisError> {
    let (header, symbols) = line
        .trim()
        .split_once(':')
        .ok_or_else(|| AnalysisError::malformed("missing ':' separator"))?;

    let (rows, columns) = header
        .split_once('x')
        .ok_or_else(|| AnalysisError::malformed(format!("bad dimension header {:?}", header)))?;

    let rows = parse_dimension(rows)?;
    let columns = parse_dimension(columns)?;

    Grid::from_symbols(rows, columns, symbols)
}

/// Dimensions are plain ASCII digits; signs and inner whitespace are rejected
fn parse_dimension(text: &str) -> Result<usize, AnalysisError> {
    let bad = || AnalysisError::malformed(format!("bad dimension {:?}", text));
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    text.parse::<usize>().map_err(|_| bad())
}

/// Decode every grid from a reader, skipping blank lines.
///
/// Read errors fail the whole input; undecodable lines, including invalid
/// UTF-8, follow `policy`.
pub fn decode_grids<R: BufRead>(reader: R, policy: MalformedPolicy) -> Result<DecodedGrids> {
    let mut decoded = DecodedGrids::default();

    for (idx, raw) in reader.split(b'\n').enumerate() {
        let parsed = match String::from_utf8(raw?) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => parse_grid_line(&line),
            Err(_) => Err(AnalysisError::malformed("invalid UTF-8")),
        };

        match parsed {
            Ok(grid) => decoded.grids.push(grid),
            Err(err) => {
                let err = err.at_line(idx + 1);
                match policy {
                    MalformedPolicy::Skip => {
                        log::warn!("Skipping line: {}", err);
                        decoded.skipped += 1;
                    }
                    MalformedPolicy::Abort => return Err(err.into()),
                }
            }
        }
    }

    Ok(decoded)
}

/// Read and decode a matrix file
pub fn read_grids(path: &Path, policy: MalformedPolicy) -> Result<DecodedGrids> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    decode_grids(BufReader::new(file), policy).with_context(|| format!("decoding {}", path.display()))
}
