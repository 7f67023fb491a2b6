//! Gate-level circuit construction
//!
//! [`CircuitBuilder`] turns the minimized covers of a truth table into wired
//! two-input AND/OR trees. Work is done phase by phase across all outputs:
//!
//! 1. the first AND stage of every term of every output,
//! 2. the AND reduction of every term down to one root gate,
//! 3. the first OR stage of every output,
//! 4. the OR reduction of every output and the wire to its output buffer.
//!
//! Gate numbering depends on this order, so it is part of the output format.
//! Every gate left with open input pins is tied off (`A` to `B`) before the
//! builder moves on, which keeps the circuit free of floating inputs.

use super::allocator::{GateAllocator, GateFamily, GateRef, InputPin, PortAllocation};
use super::layout::{GatePlan, LayoutPlacer};
use super::sizing::size_and_tree;
use super::{OutputRecord, TermRecord};
use crate::config::GeneratorConfig;
use crate::cover::{Cover, Literal, Minimizer, Term};
use crate::error::SynthesisError;
use crate::schematic::{
    input_buffer_id, input_not_id, output_buffer_id, Connection, Endpoint, Part, WireRole,
};
use crate::table::TruthTable;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Parts and connections of a synthesized circuit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Netlist {
    /// Gate counts and depths the parts were placed from
    pub plan: GatePlan,
    /// Parts in role order
    pub parts: Vec<Part>,
    /// Connections in emission order
    pub connections: Vec<Connection>,
}

/// Result of reducing a level of gates down to a single root gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Reduction {
    root: usize,
    rounds: usize,
    gates: usize,
}

/// Per-output state carried between the phases
#[derive(Debug)]
struct OutputWork {
    name: Arc<str>,
    cover: Cover,
    expression: String,
    terms: Vec<TermRecord>,
    or_first_stage: Vec<usize>,
}

/// Builds the gate network for one truth table
///
/// A builder is good for exactly one run: [`CircuitBuilder::build`] consumes
/// it. Gate indices are allocated from zero in every run.
#[derive(Debug)]
pub struct CircuitBuilder<'a> {
    table: &'a TruthTable,
    config: &'a GeneratorConfig,
    and_gates: GateAllocator,
    or_gates: GateAllocator,
    and_depths: Vec<usize>,
    or_depths: Vec<usize>,
    connections: Vec<Connection>,
}

impl<'a> CircuitBuilder<'a> {
    /// Create a builder for `table`
    pub fn new(table: &'a TruthTable, config: &'a GeneratorConfig) -> Self {
        CircuitBuilder {
            table,
            config,
            and_gates: GateAllocator::new(GateFamily::And),
            or_gates: GateAllocator::new(GateFamily::Or),
            and_depths: Vec::new(),
            or_depths: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Minimize every output with `minimizer` and wire the circuit
    pub fn build(
        mut self,
        minimizer: &dyn Minimizer,
    ) -> Result<(Netlist, Vec<OutputRecord>), SynthesisError> {
        self.tie_input_pairs();

        let mut work = self.minimize_outputs(minimizer)?;

        log::info!("Connecting inputs with first stage of AND gates for every output");
        for output in &mut work {
            self.first_and_stage(output);
        }

        log::info!("Merging first stage AND gates down to a single root AND gate per term");
        for output in &mut work {
            self.reduce_and_trees(output)?;
        }

        log::info!("Creating first stage of OR gates to combine the terms of every output");
        for output in &mut work {
            self.first_or_stage(output)?;
        }

        log::info!("Merging first stage OR gates and connecting the output buffers");
        let mut records = Vec::with_capacity(work.len());
        for output in work {
            records.push(self.finish_output(output)?);
        }

        let plan = self.plan(&records);
        log::info!("Max AND gate stages: {}", plan.max_and_stages);
        log::info!("Max  OR gate stages: {}", plan.max_or_stages);

        let parts = LayoutPlacer::new(self.config.layout).place(&plan);
        Ok((
            Netlist {
                plan,
                parts,
                connections: self.connections,
            },
            records,
        ))
    }

    /// Connect each NOT gate's input to its buffer's input
    fn tie_input_pairs(&mut self) {
        for name in self.table.inputs() {
            self.connect(
                Endpoint::new(input_not_id(name), "IN"),
                Endpoint::new(input_buffer_id(name), "IN"),
                WireRole::Termination,
            );
        }
    }

    fn minimize_outputs(
        &self,
        minimizer: &dyn Minimizer,
    ) -> Result<Vec<OutputWork>, SynthesisError> {
        let num_inputs = self.table.num_inputs();
        let mut work = Vec::with_capacity(self.table.num_outputs());
        let mut estimated_and_gates = 0;

        for (index, column) in self.table.outputs().iter().enumerate() {
            let ones = self.table.ones(index);
            log::info!("Output {}: ones {:?}", column.name(), ones);

            let cover = minimizer.minimize(num_inputs, &ones)?;
            if let Some(term) = cover.terms().iter().find(|term| term.width() != num_inputs) {
                return Err(SynthesisError::TermWidth {
                    output: column.name().clone(),
                    expected: num_inputs,
                    actual: term.width(),
                });
            }

            let expression = cover.to_sop(self.table.inputs(), &self.config.symbols);
            log::info!("Calculated function for output {}: {}", column.name(), expression);

            let terms: Vec<Term> = if cover.is_empty() {
                log::warn!(
                    "Output {} is never 1; wiring it from a single term without literals",
                    column.name()
                );
                vec![Term::new(vec![Literal::Unused; num_inputs])]
            } else {
                cover.terms().to_vec()
            };

            let terms = terms
                .into_iter()
                .map(|term| {
                    let literal_count = term.literal_count();
                    let sizing = size_and_tree(literal_count);
                    estimated_and_gates += sizing.0;
                    TermRecord {
                        term,
                        literal_count,
                        sizing,
                        first_stage: Vec::new(),
                        root: 0,
                        gates_used: 0,
                        rounds: 0,
                    }
                })
                .collect();

            work.push(OutputWork {
                name: column.name().clone(),
                cover,
                expression,
                terms,
                or_first_stage: Vec::new(),
            });
        }

        log::info!("Estimated parts usage:");
        log::info!(
            "    * {:3} buffers (for the inputs and the outputs)",
            self.table.num_inputs() + self.table.num_outputs()
        );
        log::info!("    * {:3} NOT gate(s) (for the negated inputs)", num_inputs);
        log::info!("    * {:3} two-input AND gate(s)", estimated_and_gates);
        Ok(work)
    }

    fn first_and_stage(&mut self, output: &mut OutputWork) {
        for (index, record) in output.terms.iter_mut().enumerate() {
            log::debug!(
                "  Processing first AND stage of term #{} of output {}",
                index + 1,
                output.name
            );
            self.terminate(GateFamily::And);
            let fresh = self.advance(GateFamily::And);

            let mut used = BTreeSet::from([fresh.index]);
            for (input, literal) in record.term.present() {
                let port = self.allocate(GateFamily::And, 0);
                let name = &self.table.inputs()[input];
                let (source, role) = match literal {
                    Literal::Negated => (input_not_id(name), WireRole::NegatedInputToAnd),
                    _ => (input_buffer_id(name), WireRole::InputToAnd),
                };
                self.connect(Endpoint::new(source, "OUT"), port.endpoint(), role);
                used.insert(port.gate.index);
            }
            self.terminate(GateFamily::And);

            record.first_stage = used.into_iter().collect();
            log::debug!("  Term #{} used AND gates {:?}", index + 1, record.first_stage);
        }
    }

    fn reduce_and_trees(&mut self, output: &mut OutputWork) -> Result<(), SynthesisError> {
        for (index, record) in output.terms.iter_mut().enumerate() {
            if record.first_stage.len() > 1 {
                log::info!(
                    "Merging AND gates {:?} down to a single AND gate",
                    record.first_stage
                );
            }
            let reduction = self
                .reduce(GateFamily::And, &record.first_stage)
                .ok_or_else(|| SynthesisError::EmptyAndStage {
                    output: output.name.clone(),
                    term: index,
                })?;
            record.root = reduction.root;
            record.rounds = reduction.rounds;
            record.gates_used = record.first_stage.len() + reduction.gates;
        }
        Ok(())
    }

    fn first_or_stage(&mut self, output: &mut OutputWork) -> Result<(), SynthesisError> {
        self.terminate(GateFamily::Or);
        self.advance(GateFamily::Or);

        let roots: Vec<usize> = output.terms.iter().map(|record| record.root).collect();
        let mut used = BTreeSet::new();
        match roots.as_slice() {
            [] => {
                return Err(SynthesisError::EmptyOrStage {
                    output: output.name.clone(),
                })
            }
            [root] => {
                log::warn!(
                    "Single term for output {}: AND gate #{} drives a pass-through OR gate",
                    output.name,
                    root
                );
                used.insert(self.wire_root(*root));
            }
            _ => {
                for &root in &roots {
                    used.insert(self.wire_root(root));
                }
            }
        }
        self.terminate(GateFamily::Or);

        output.or_first_stage = used.into_iter().collect();
        log::info!(
            "First stage of OR gates for output {}: {:?}",
            output.name,
            output.or_first_stage
        );
        Ok(())
    }

    /// Wire a root AND gate to a fresh OR input and return the OR gate index
    fn wire_root(&mut self, root: usize) -> usize {
        let port = self.allocate(GateFamily::Or, 0);
        self.connect(
            GateRef::new(GateFamily::And, root).output(),
            port.endpoint(),
            WireRole::AndToOr,
        );
        port.gate.index
    }

    fn finish_output(&mut self, output: OutputWork) -> Result<OutputRecord, SynthesisError> {
        let reduction = self
            .reduce(GateFamily::Or, &output.or_first_stage)
            .ok_or_else(|| SynthesisError::EmptyOrStage {
                output: output.name.clone(),
            })?;
        log::info!(
            "Gate #{} is the final OR gate of output {}",
            reduction.root,
            output.name
        );

        self.connect(
            GateRef::new(GateFamily::Or, reduction.root).output(),
            Endpoint::new(output_buffer_id(&output.name), "IN"),
            WireRole::OrToOutput,
        );

        Ok(OutputRecord {
            name: output.name,
            cover: output.cover,
            expression: output.expression,
            terms: output.terms,
            or_first_stage: output.or_first_stage,
            or_rounds: reduction.rounds,
            final_or: reduction.root,
        })
    }

    /// Merge `level` pairwise until one gate remains
    ///
    /// Round `d` opens gates at reduction depth `d`. Returns `None` for an
    /// empty level; a single gate is its own root after zero rounds.
    fn reduce(&mut self, family: GateFamily, level: &[usize]) -> Option<Reduction> {
        let role = match family {
            GateFamily::And => WireRole::AndToAnd,
            GateFamily::Or => WireRole::OrToOr,
        };

        self.terminate(family);
        let mut level = level.to_vec();
        let mut rounds = 0;
        let mut gates = 0;
        while level.len() > 1 {
            rounds += 1;
            let mut next = BTreeSet::new();
            for &previous in &level {
                let port = self.allocate(family, rounds);
                self.connect(GateRef::new(family, previous).output(), port.endpoint(), role);
                next.insert(port.gate.index);
            }
            gates += next.len();
            level = next.into_iter().collect();

            if level.len() > 1 {
                log::debug!("  Still {} gates left: {:?}, turning another round", family.as_str(), level);
                self.terminate(family);
            }
        }

        level.first().map(|&root| Reduction {
            root,
            rounds,
            gates,
        })
    }

    fn cursor(&mut self, family: GateFamily) -> (&mut GateAllocator, &mut Vec<usize>) {
        match family {
            GateFamily::And => (&mut self.and_gates, &mut self.and_depths),
            GateFamily::Or => (&mut self.or_gates, &mut self.or_depths),
        }
    }

    fn advance(&mut self, family: GateFamily) -> GateRef {
        let (gates, depths) = self.cursor(family);
        let gate = gates.advance();
        if gate.index == depths.len() {
            depths.push(0);
        }
        gate
    }

    fn allocate(&mut self, family: GateFamily, depth: usize) -> PortAllocation {
        let (gates, depths) = self.cursor(family);
        let port = gates.allocate_port();
        if port.gate.index == depths.len() {
            depths.push(depth);
        }
        log::debug!("    Allocated port '{}' of {}", port.pin.as_str(), port.gate);
        port
    }

    fn terminate(&mut self, family: GateFamily) {
        let (gates, _) = self.cursor(family);
        if let Some(termination) = gates.terminate() {
            log::debug!(
                "    Terminating {}'s {} open input(s)",
                termination.gate,
                termination.open_pins
            );
            self.connect(
                termination.gate.input(InputPin::A),
                termination.gate.input(InputPin::B),
                WireRole::Termination,
            );
        }
    }

    fn connect(&mut self, from: Endpoint, to: Endpoint, role: WireRole) {
        let connection = Connection::new(from, to, role);
        log::debug!("      Connection: {}", connection);
        self.connections.push(connection);
    }

    fn plan(&self, records: &[OutputRecord]) -> GatePlan {
        let max_and_stages = records
            .iter()
            .flat_map(|record| record.terms.iter())
            .map(|term| term.sizing.1)
            .max()
            .unwrap_or(1);
        let max_or_stages = 1 + records
            .iter()
            .map(|record| record.or_rounds)
            .max()
            .unwrap_or(0);

        GatePlan {
            inputs: self.table.inputs().to_vec(),
            outputs: self
                .table
                .outputs()
                .iter()
                .map(|column| column.name().clone())
                .collect(),
            and_depths: self.and_depths.clone(),
            or_depths: self.or_depths.clone(),
            max_and_stages,
            max_or_stages,
        }
    }
}
