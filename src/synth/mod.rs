//! Truth table to gate-level schematic synthesis
//!
//! Each output is minimized into a sum of products, every product term becomes
//! a binary tree of two-input AND gates and the terms of an output are OR-ed
//! together by a binary tree of two-input OR gates. The result is a
//! [`Schematic`] plus one [`OutputRecord`] per output describing which gates
//! realize it.
//!
//! ```
//! use wokwi_lut::{synthesize, GeneratorConfig, TruthTable};
//!
//! # fn main() -> Result<(), wokwi_lut::SynthesisError> {
//! let table = TruthTable::from_rows(&["a", "b"], &[("y", &[0, 1, 1, 0])])?;
//! let synthesis = synthesize(&table, &GeneratorConfig::default())?;
//!
//! assert_eq!(synthesis.summary.and_gates, 2);
//! assert_eq!(synthesis.summary.or_gates, 1);
//! assert_eq!(synthesis.records[0].expression, "~ab + a~b");
//! # Ok(())
//! # }
//! ```

pub mod allocator;
pub mod builder;
pub mod layout;
mod sizing;

pub use allocator::{GateAllocator, GateFamily, GateRef, InputPin, PortAllocation, Termination};
pub use builder::{CircuitBuilder, Netlist};
pub use layout::{GatePlan, LayoutConfig, LayoutPlacer};
pub use sizing::size_and_tree;

use crate::config::GeneratorConfig;
use crate::cover::{Cover, Minimizer, QuineMcCluskey, Term};
use crate::error::SynthesisError;
use crate::schematic::Schematic;
use crate::table::TruthTable;
use std::sync::Arc;

/// How one product term was realized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermRecord {
    /// The term as wired
    pub term: Term,
    /// Number of inputs the term uses
    pub literal_count: usize,
    /// `size_and_tree(literal_count)`: gate count and stage count
    pub sizing: (usize, usize),
    /// AND gates of the first stage, ascending
    pub first_stage: Vec<usize>,
    /// AND gate whose output carries the whole term
    pub root: usize,
    /// AND gates opened for this term over all stages
    pub gates_used: usize,
    /// Reduction rounds after the first stage
    pub rounds: usize,
}

/// How one output was realized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    /// Output name
    pub name: Arc<str>,
    /// Cover returned by the minimizer
    pub cover: Cover,
    /// Cover rendered with the configured symbols
    pub expression: String,
    /// Wired terms in cover order
    pub terms: Vec<TermRecord>,
    /// OR gates fed directly by the root AND gates, ascending
    pub or_first_stage: Vec<usize>,
    /// OR reduction rounds after the first stage
    pub or_rounds: usize,
    /// OR gate driving the output buffer
    pub final_or: usize,
}

/// Part counts of a synthesized circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceSummary {
    /// Input and output buffers
    pub buffers: usize,
    /// NOT gates (one per input)
    pub not_gates: usize,
    /// Two-input AND gates
    pub and_gates: usize,
    /// Two-input OR gates
    pub or_gates: usize,
    /// Deepest AND tree
    pub max_and_stages: usize,
    /// OR columns including the first stage
    pub max_or_stages: usize,
}

impl ResourceSummary {
    /// Count the parts described by a plan
    pub fn from_plan(plan: &GatePlan) -> Self {
        ResourceSummary {
            buffers: plan.inputs.len() + plan.outputs.len(),
            not_gates: plan.inputs.len(),
            and_gates: plan.and_depths.len(),
            or_gates: plan.or_depths.len(),
            max_and_stages: plan.max_and_stages,
            max_or_stages: plan.max_or_stages,
        }
    }

    /// Total number of parts
    pub fn total(&self) -> usize {
        self.buffers + self.not_gates + self.and_gates + self.or_gates
    }
}

/// Result of a synthesis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    /// The generated schematic, without peripherals
    pub schematic: Schematic,
    /// One record per output, in table order
    pub records: Vec<OutputRecord>,
    /// Part counts
    pub summary: ResourceSummary,
}

impl Synthesis {
    /// Record of the output called `name`
    pub fn record(&self, name: &str) -> Option<&OutputRecord> {
        self.records.iter().find(|record| &*record.name == name)
    }
}

/// Synthesize `table` with the built-in Quine–McCluskey minimizer
pub fn synthesize(table: &TruthTable, config: &GeneratorConfig) -> Result<Synthesis, SynthesisError> {
    synthesize_with(table, &QuineMcCluskey, config)
}

/// Synthesize `table` with a caller-supplied minimizer
pub fn synthesize_with(
    table: &TruthTable,
    minimizer: &dyn Minimizer,
    config: &GeneratorConfig,
) -> Result<Synthesis, SynthesisError> {
    log::info!(
        "Inputs:  {:2} {:?}",
        table.num_inputs(),
        table.inputs().iter().map(|name| &**name).collect::<Vec<_>>()
    );
    log::info!(
        "Outputs: {:2} {:?}",
        table.num_outputs(),
        table
            .outputs()
            .iter()
            .map(|column| &**column.name())
            .collect::<Vec<_>>()
    );

    let (netlist, records) = CircuitBuilder::new(table, config).build(minimizer)?;
    let summary = ResourceSummary::from_plan(&netlist.plan);

    let mut schematic = Schematic::new(config.author.as_str(), config.editor.as_str());
    for part in netlist.parts {
        schematic.add_part(part);
    }
    for connection in netlist.connections {
        schematic.add_connection(connection);
    }

    log::info!("Parts usage:");
    log::info!("    * {:3} buffers (for the inputs and the outputs)", summary.buffers);
    log::info!("    * {:3} NOT gate(s) (for the negated inputs)", summary.not_gates);
    log::info!(
        "    * {:3} two-input AND gate(s), in max. {} stage(s)",
        summary.and_gates,
        summary.max_and_stages
    );
    log::info!(
        "    * {:3} two-input OR gate(s), in max. {} stage(s)",
        summary.or_gates,
        summary.max_or_stages
    );

    Ok(Synthesis {
        schematic,
        records,
        summary,
    })
}
