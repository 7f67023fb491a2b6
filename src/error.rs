//! Error types for the lookup table generator
//!
//! This module provides the top-level error type returned by synthesis and
//! document I/O. Truth-table validation errors live in [`crate::table`] and are
//! wrapped here so callers can match on a single enum.

use crate::table::TruthTableError;
use std::fmt;
use std::io;
use std::sync::Arc;

/// The main error type for truth-table synthesis
///
/// Every variant is fatal for the run that produced it. Non-fatal decisions
/// (pass-through OR gates, truncated peripheral wiring) are reported through
/// the `log` facade instead.
#[derive(Debug)]
pub enum SynthesisError {
    /// The truth-table document failed validation
    Table(TruthTableError),

    /// A term's first AND stage produced no gate
    ///
    /// The first AND stage always opens at least one gate per term, so this
    /// indicates a broken allocator invariant. Synthesis stops instead of
    /// emitting a circuit with an undriven term.
    EmptyAndStage {
        /// Output whose term failed
        output: Arc<str>,
        /// Position of the term in the output's cover
        term: usize,
    },

    /// An output reached the OR stage without any root AND gate
    EmptyOrStage {
        /// Output that failed
        output: Arc<str>,
    },

    /// A minimizer returned a term whose width differs from the input count
    TermWidth {
        /// Output the cover belongs to
        output: Arc<str>,
        /// Number of table inputs
        expected: usize,
        /// Width of the offending term
        actual: usize,
    },

    /// A minimizer was handed a row index outside the truth table
    RowOutOfRange {
        /// The offending row index
        row: usize,
        /// Number of rows in the table
        rows: usize,
    },

    /// JSON (de)serialization failure
    Json(serde_json::Error),

    /// IO error wrapper
    Io(io::Error),
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthesisError::Table(err) => write!(f, "Invalid truth table: {}", err),
            SynthesisError::EmptyAndStage { output, term } => write!(
                f,
                "First AND stage of term #{} for output '{}' did not use any gate",
                term, output
            ),
            SynthesisError::EmptyOrStage { output } => write!(
                f,
                "No root AND gate available for the OR stage of output '{}'",
                output
            ),
            SynthesisError::TermWidth {
                output,
                expected,
                actual,
            } => write!(
                f,
                "Cover of output '{}' has a term of width {}, expected {}",
                output, actual, expected
            ),
            SynthesisError::RowOutOfRange { row, rows } => write!(
                f,
                "Row {} is outside the truth table (0..{})",
                row, rows
            ),
            SynthesisError::Json(err) => write!(f, "JSON error: {}", err),
            SynthesisError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SynthesisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SynthesisError::Table(err) => Some(err),
            SynthesisError::Json(err) => Some(err),
            SynthesisError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TruthTableError> for SynthesisError {
    fn from(err: TruthTableError) -> Self {
        SynthesisError::Table(err)
    }
}

impl From<serde_json::Error> for SynthesisError {
    fn from(err: serde_json::Error) -> Self {
        SynthesisError::Json(err)
    }
}

impl From<io::Error> for SynthesisError {
    fn from(err: io::Error) -> Self {
        SynthesisError::Io(err)
    }
}

// Conversion to io::Error so binaries can stay on io::Result
impl From<SynthesisError> for io::Error {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::Io(io_err) => io_err,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_malformed_table_display() {
        let err: SynthesisError = TruthTableError::MalformedTable {
            name: Arc::from("S"),
            expected: 4,
            actual: 3,
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("Invalid truth table"));
        assert!(msg.contains("'S'"));
        assert!(msg.contains('4'));
        assert!(msg.contains('3'));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_empty_and_stage_display() {
        let err = SynthesisError::EmptyAndStage {
            output: Arc::from("carry"),
            term: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("term #2"));
        assert!(msg.contains("'carry'"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "logic.json not found");
        let err: SynthesisError = io_err.into();
        assert!(err.to_string().contains("logic.json not found"));

        let back: io::Error = err.into();
        assert_eq!(back.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_non_io_error_maps_to_invalid_data() {
        let err = SynthesisError::EmptyOrStage {
            output: Arc::from("y"),
        };
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
    }
}
