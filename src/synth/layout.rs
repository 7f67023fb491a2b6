//! Grid placement of the synthesized parts
//!
//! Parts are placed on a fixed grid: inputs in column 0, AND gates in the
//! columns following it (one column per reduction depth), then OR gates, then
//! the output buffers. Vertical position is the gate index times the gate pitch.

use crate::schematic::{
    input_buffer_id, input_not_id, output_buffer_id, Part, PartKind, Position,
};
use crate::synth::allocator::{GateFamily, GateRef};
use std::sync::Arc;

/// Grid spacing of the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Vertical distance between neighbouring gates
    pub gate_pitch: i32,
    /// Horizontal distance between neighbouring stages
    pub stage_pitch: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            gate_pitch: 60,
            stage_pitch: 120,
        }
    }
}

impl LayoutConfig {
    /// Create a layout with the default pitches
    pub fn new() -> Self {
        Self::default()
    }
}

/// Everything the placer needs to know about a finished circuit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatePlan {
    /// Input names in table order
    pub inputs: Vec<Arc<str>>,
    /// Output names in table order
    pub outputs: Vec<Arc<str>>,
    /// Reduction depth of each AND gate, indexed by gate index
    pub and_depths: Vec<usize>,
    /// Reduction depth of each OR gate, indexed by gate index
    pub or_depths: Vec<usize>,
    /// Deepest AND tree over all terms
    pub max_and_stages: usize,
    /// Number of OR columns (first stage plus the deepest reduction)
    pub max_or_stages: usize,
}

/// Assigns grid coordinates to every part of a circuit
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutPlacer {
    config: LayoutConfig,
}

impl LayoutPlacer {
    /// Create a placer for the given grid
    pub fn new(config: LayoutConfig) -> Self {
        LayoutPlacer { config }
    }

    fn rows(&self, count: usize) -> i32 {
        count as i32 * self.config.gate_pitch
    }

    fn columns(&self, count: usize) -> i32 {
        count as i32 * self.config.stage_pitch
    }

    /// Position of the buffer of input `k`
    pub fn input_buffer(&self, k: usize) -> Position {
        Position::new(self.rows(2 * k), 0)
    }

    /// Position of the NOT gate of input `k`
    pub fn input_not(&self, k: usize) -> Position {
        Position::new(self.rows(2 * k + 1), 0)
    }

    /// Column of the first-stage AND gates
    pub fn and_column(&self) -> i32 {
        self.columns(2)
    }

    /// Column of the first-stage OR gates
    pub fn or_column(&self, max_and_stages: usize) -> i32 {
        self.and_column() + self.columns(max_and_stages)
    }

    /// Column of the output buffers
    pub fn output_column(&self, max_and_stages: usize, max_or_stages: usize) -> i32 {
        self.or_column(max_and_stages) + self.columns(max_or_stages)
    }

    /// Position of AND gate `index` at reduction depth `depth`
    pub fn and_gate(&self, index: usize, depth: usize) -> Position {
        Position::new(self.rows(index), self.and_column() + self.columns(depth))
    }

    /// Position of OR gate `index` at reduction depth `depth`
    pub fn or_gate(&self, index: usize, depth: usize, max_and_stages: usize) -> Position {
        Position::new(
            self.rows(index),
            self.or_column(max_and_stages) + self.columns(depth),
        )
    }

    /// Position of the buffer of output `k`
    pub fn output_buffer(&self, k: usize, max_and_stages: usize, max_or_stages: usize) -> Position {
        Position::new(
            self.rows(2 * k),
            self.output_column(max_and_stages, max_or_stages),
        )
    }

    /// Create every part of the plan in role order
    ///
    /// Input buffer/NOT pairs come first, then AND gates and OR gates by
    /// ascending index, then the output buffers.
    pub fn place(&self, plan: &GatePlan) -> Vec<Part> {
        let mut parts = Vec::with_capacity(
            2 * plan.inputs.len() + plan.and_depths.len() + plan.or_depths.len() + plan.outputs.len(),
        );

        for (k, name) in plan.inputs.iter().enumerate() {
            parts.push(Part::new(
                PartKind::GateBuffer,
                input_buffer_id(name),
                self.input_buffer(k),
            ));
            parts.push(Part::new(
                PartKind::GateNot,
                input_not_id(name),
                self.input_not(k),
            ));
        }

        for (index, &depth) in plan.and_depths.iter().enumerate() {
            parts.push(Part::new(
                PartKind::GateAnd2,
                GateRef::new(GateFamily::And, index).id(),
                self.and_gate(index, depth),
            ));
        }

        for (index, &depth) in plan.or_depths.iter().enumerate() {
            parts.push(Part::new(
                PartKind::GateOr2,
                GateRef::new(GateFamily::Or, index).id(),
                self.or_gate(index, depth, plan.max_and_stages),
            ));
        }

        for (k, name) in plan.outputs.iter().enumerate() {
            parts.push(Part::new(
                PartKind::GateBuffer,
                output_buffer_id(name),
                self.output_buffer(k, plan.max_and_stages, plan.max_or_stages),
            ));
        }

        log::debug!(
            "Placed {} part(s): AND column {}, OR column {}, output column {}",
            parts.len(),
            self.and_column(),
            self.or_column(plan.max_and_stages),
            self.output_column(plan.max_and_stages, plan.max_or_stages)
        );
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> GatePlan {
        GatePlan {
            inputs: vec![Arc::from("a"), Arc::from("b")],
            outputs: vec![Arc::from("y"), Arc::from("z")],
            and_depths: vec![0, 0, 1],
            or_depths: vec![0, 0, 1],
            max_and_stages: 2,
            max_or_stages: 2,
        }
    }

    #[test]
    fn test_input_positions() {
        let placer = LayoutPlacer::default();
        assert_eq!(placer.input_buffer(0), Position::new(0, 0));
        assert_eq!(placer.input_not(0), Position::new(60, 0));
        assert_eq!(placer.input_buffer(2), Position::new(240, 0));
        assert_eq!(placer.input_not(2), Position::new(300, 0));
    }

    #[test]
    fn test_gate_columns_follow_depth() {
        let placer = LayoutPlacer::default();
        assert_eq!(placer.and_gate(0, 0), Position::new(0, 240));
        assert_eq!(placer.and_gate(3, 2), Position::new(180, 480));
        assert_eq!(placer.or_gate(1, 0, 3), Position::new(60, 600));
        assert_eq!(placer.or_gate(1, 1, 3), Position::new(60, 720));
        assert_eq!(placer.output_buffer(1, 3, 2), Position::new(120, 840));
    }

    #[test]
    fn test_place_in_role_order() {
        let parts = LayoutPlacer::default().place(&plan());
        let ids: Vec<&str> = parts.iter().map(Part::id).collect();
        assert_eq!(
            ids,
            vec![
                "input_a",
                "input_not_a",
                "input_b",
                "input_not_b",
                "gate_and_0",
                "gate_and_1",
                "gate_and_2",
                "gate_or_0",
                "gate_or_1",
                "gate_or_2",
                "output_y",
                "output_z",
            ]
        );
        assert_eq!(parts[6].position(), Position::new(120, 360));
        assert_eq!(parts[9].position(), Position::new(120, 600));
        assert_eq!(parts[11].position(), Position::new(120, 720));
        assert_eq!(parts[11].kind(), PartKind::GateBuffer);
    }

    #[test]
    fn test_custom_pitch() {
        let placer = LayoutPlacer::new(LayoutConfig {
            gate_pitch: 10,
            stage_pitch: 100,
        });
        assert_eq!(placer.and_gate(2, 1), Position::new(20, 300));
        assert_eq!(placer.input_not(1), Position::new(30, 0));
    }
}
