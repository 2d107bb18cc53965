//! Error types for grid decoding and analysis

use thiserror::Error;

/// Errors produced by the analysis library
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// A grid line could not be decoded
    #[error("malformed input{}: {reason}", line_suffix(.line))]
    MalformedInput {
        /// 1-based line number, when known
        line: Option<usize>,
        reason: String,
    },

    /// A coordinate outside the grid was queried
    #[error("cell ({row}, {column}) is outside a {rows}x{columns} grid")]
    OutOfRange {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
}

impl AnalysisError {
    /// Create a malformed input error without a line number
    pub fn malformed(reason: impl Into<String>) -> Self {
        AnalysisError::MalformedInput {
            line: None,
            reason: reason.into(),
        }
    }

    /// Attach the line number a malformed input error came from
    pub fn at_line(self, line: usize) -> Self {
        match self {
            AnalysisError::MalformedInput { reason, .. } => AnalysisError::MalformedInput {
                line: Some(line),
                reason,
            },
            other => other,
        }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|l| format!(" at line {}", l)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display_includes_line() {
        let err = AnalysisError::malformed("bad header").at_line(7);
        assert_eq!(err.to_string(), "malformed input at line 7: bad header");
    }

    #[test]
    fn malformed_display_without_line() {
        let err = AnalysisError::malformed("bad header");
        assert_eq!(err.to_string(), "malformed input: bad header");
    }

    #[test]
    fn at_line_leaves_out_of_range_alone() {
        let err = AnalysisError::OutOfRange { row: 3, column: 0, rows: 2, columns: 2 };
        assert_eq!(err.clone().at_line(4), err);
    }
}
