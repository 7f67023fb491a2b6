//! Error types for truth-table validation

use std::fmt;
use std::io;
use std::sync::Arc;

/// Errors raised while building or validating a [`TruthTable`](super::TruthTable)
///
/// All of them are fatal: synthesis never starts on a table that failed
/// validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TruthTableError {
    /// An output's value sequence does not have exactly `2^inputs` entries
    MalformedTable {
        /// The offending output
        name: Arc<str>,
        /// `2^inputs`
        expected: usize,
        /// Number of values found
        actual: usize,
    },
    /// A value other than 0 or 1 was supplied for an output row
    InvalidValue {
        /// The offending output
        name: Arc<str>,
        /// Row index (binary encoding of the input combination)
        row: usize,
        /// The value that was found
        value: u8,
    },
    /// An input or output name appears twice in its list
    DuplicateName {
        /// The repeated name
        name: Arc<str>,
    },
    /// A name is empty or contains a character that cannot appear in a part id
    InvalidName {
        /// The rejected name
        name: Arc<str>,
    },
    /// Two inputs map to the same part id (`not_a` and the NOT gate of `a`)
    IdCollision {
        /// The input whose buffer id is taken
        name: Arc<str>,
        /// The contested part id
        id: String,
    },
    /// More inputs than the minimizer can enumerate
    TooManyInputs {
        /// Number of declared inputs
        count: usize,
        /// Supported maximum
        max: usize,
    },
}

impl fmt::Display for TruthTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruthTableError::MalformedTable {
                name,
                expected,
                actual,
            } => write!(
                f,
                "Output '{}' has {} values but {} are required (2^inputs)",
                name, actual, expected
            ),
            TruthTableError::InvalidValue { name, row, value } => write!(
                f,
                "Output '{}' has invalid value {} in row {}. Expected 0 or 1.",
                name, value, row
            ),
            TruthTableError::DuplicateName { name } => {
                write!(f, "Name '{}' is declared more than once", name)
            }
            TruthTableError::InvalidName { name } => write!(
                f,
                "Invalid name {:?}: names must be non-empty and must not contain ':' or whitespace",
                name
            ),
            TruthTableError::IdCollision { name, id } => write!(
                f,
                "Input '{}' would get part id '{}', which belongs to another input's NOT gate",
                name, id
            ),
            TruthTableError::TooManyInputs { count, max } => write!(
                f,
                "{} inputs declared but at most {} are supported",
                count, max
            ),
        }
    }
}

impl std::error::Error for TruthTableError {}

impl From<TruthTableError> for io::Error {
    fn from(err: TruthTableError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}
