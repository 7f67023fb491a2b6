//! Truth-table input model
//!
//! A [`TruthTable`] holds the ordered input names and, for every output, one
//! value per input combination. Row `k` is the binary encoding of the input
//! combination with input 0 as the most significant bit, so for three inputs
//! the rows are `000, 001, 010, ..., 111`.
//!
//! Tables are validated on construction: every output must carry exactly
//! `2^inputs` values and all names must be unique and usable as part ids.
//!
//! ```
//! use wokwi_lut::TruthTable;
//!
//! # fn main() -> Result<(), wokwi_lut::TruthTableError> {
//! let table = TruthTable::from_rows(&["a", "b"], &[("S", &[0, 1, 1, 0]), ("C", &[0, 0, 0, 1])])?;
//! assert_eq!(table.num_rows(), 4);
//! assert_eq!(table.ones(0), vec![1, 2]);
//! # Ok(())
//! # }
//! ```

mod document;
mod error;


pub use error::TruthTableError;

use crate::error::SynthesisError;
use crate::schematic::{input_buffer_id, input_not_id};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

/// Largest supported number of inputs (4096 truth-table rows)
///
/// Covers of bigger tables take seconds to minimize and need more gates than
/// a Wokwi diagram can reasonably hold.
pub const MAX_INPUTS: usize = 12;

/// One output column of a truth table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputColumn {
    name: Arc<str>,
    values: Vec<bool>,
}

impl OutputColumn {
    /// Create an output column from its name and values
    pub fn new(name: impl Into<Arc<str>>, values: Vec<bool>) -> Self {
        OutputColumn {
            name: name.into(),
            values,
        }
    }

    /// Name of the output
    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    /// Values indexed by row
    pub fn values(&self) -> &[bool] {
        &self.values
    }
}

/// A validated truth table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    inputs: Vec<Arc<str>>,
    outputs: Vec<OutputColumn>,
}

impl TruthTable {
    /// Create a truth table, validating dimensions and names
    pub fn new(
        inputs: Vec<Arc<str>>,
        outputs: Vec<OutputColumn>,
    ) -> Result<Self, TruthTableError> {
        if inputs.len() > MAX_INPUTS {
            return Err(TruthTableError::TooManyInputs {
                count: inputs.len(),
                max: MAX_INPUTS,
            });
        }

        check_names(inputs.iter())?;
        check_part_ids(&inputs)?;
        check_names(outputs.iter().map(|column| &column.name))?;

        let expected = 1usize << inputs.len();
        for column in &outputs {
            if column.values.len() != expected {
                return Err(TruthTableError::MalformedTable {
                    name: Arc::clone(&column.name),
                    expected,
                    actual: column.values.len(),
                });
            }
        }

        Ok(TruthTable { inputs, outputs })
    }

    /// Create a truth table from 0/1 rows
    ///
    /// Any value other than 0 or 1 is rejected with
    /// [`TruthTableError::InvalidValue`].
    pub fn from_rows(inputs: &[&str], outputs: &[(&str, &[u8])]) -> Result<Self, TruthTableError> {
        let inputs = inputs.iter().map(|name| Arc::from(*name)).collect();
        let outputs = outputs
            .iter()
            .map(|(name, rows)| {
                let values = rows
                    .iter()
                    .enumerate()
                    .map(|(row, value)| match value {
                        0 => Ok(false),
                        1 => Ok(true),
                        other => Err(TruthTableError::InvalidValue {
                            name: Arc::from(*name),
                            row,
                            value: *other,
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(OutputColumn::new(*name, values))
            })
            .collect::<Result<Vec<_>, TruthTableError>>()?;
        TruthTable::new(inputs, outputs)
    }

    /// Parse a truth-table JSON document
    ///
    /// The document has the shape
    /// `{"inputs": ["a", "b"], "outputs": {"S": [0, 1, 1, 0]}}`. Output order
    /// follows the order of keys in the document.
    pub fn from_json_str(json: &str) -> Result<Self, SynthesisError> {
        let raw: document::RawDocument = serde_json::from_str(json)?;
        Ok(raw.into_table()?)
    }

    /// Parse a truth-table JSON document from any reader
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, SynthesisError> {
        let raw: document::RawDocument = serde_json::from_reader(reader)?;
        Ok(raw.into_table()?)
    }

    /// Read a truth-table JSON document from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SynthesisError> {
        let file = File::open(path.as_ref())?;
        let table = Self::from_json_reader(BufReader::new(file))?;
        log::info!("Data is read from input file '{}'", path.as_ref().display());
        Ok(table)
    }

    /// Input names in bit order (input 0 is the most significant bit)
    pub fn inputs(&self) -> &[Arc<str>] {
        &self.inputs
    }

    /// Output columns in declaration order
    pub fn outputs(&self) -> &[OutputColumn] {
        &self.outputs
    }

    /// Number of inputs
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Number of outputs
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Number of rows (`2^inputs`)
    pub fn num_rows(&self) -> usize {
        1 << self.inputs.len()
    }

    /// Look up an output column by name
    pub fn output(&self, name: &str) -> Option<&OutputColumn> {
        self.outputs.iter().find(|column| column.name.as_ref() == name)
    }

    /// Row indices where the output at `index` is 1, ascending
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_outputs()`.
    pub fn ones(&self, index: usize) -> Vec<usize> {
        self.outputs[index]
            .values
            .iter()
            .enumerate()
            .filter_map(|(row, value)| value.then_some(row))
            .collect()
    }

    /// Output values for one row, in output declaration order
    pub fn row_outputs(&self, row: usize) -> impl Iterator<Item = bool> + '_ {
        self.outputs.iter().map(move |column| column.values[row])
    }
}

fn check_names<'a>(names: impl Iterator<Item = &'a Arc<str>>) -> Result<(), TruthTableError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() || name.contains(|c: char| c == ':' || c.is_whitespace()) {
            return Err(TruthTableError::InvalidName {
                name: Arc::clone(name),
            });
        }
        if !seen.insert(Arc::clone(name)) {
            return Err(TruthTableError::DuplicateName {
                name: Arc::clone(name),
            });
        }
    }
    Ok(())
}

/// Input buffers and NOT gates share the `input_` id prefix, so an input
/// named `not_<x>` collides with the NOT gate of input `<x>`
fn check_part_ids(inputs: &[Arc<str>]) -> Result<(), TruthTableError> {
    let not_ids: HashSet<String> = inputs.iter().map(|name| input_not_id(name)).collect();
    for name in inputs {
        let id = input_buffer_id(name);
        if not_ids.contains(&id) {
            return Err(TruthTableError::IdCollision {
                name: Arc::clone(name),
                id,
            });
        }
    }
    Ok(())
}
