//! # Wokwi lookup-table generator
//!
//! This crate turns a truth table into a gate-level circuit for the
//! [Wokwi](https://wokwi.com) simulator, built only from buffers, inverters and
//! two-input AND/OR gates.
//!
//! ## Overview
//!
//! Every output of the truth table goes through the same pipeline:
//!
//! 1. **Minimize** the output's ON-set into a sum of products
//!    ([`QuineMcCluskey`] by default, or any [`Minimizer`])
//! 2. **AND** the literals of each product term with a binary tree of
//!    two-input AND gates
//! 3. **OR** the terms together with a binary tree of two-input OR gates
//! 4. **Place** all parts on a grid and emit the Wokwi `diagram.json`
//!
//! Unused gate inputs are always tied to the gate's other input, so the
//! generated circuit never has floating pins.
//!
//! ## Quick Start
//!
//! ```
//! use wokwi_lut::{synthesize, ExportMode, GeneratorConfig, TruthTable};
//!
//! # fn main() -> Result<(), wokwi_lut::SynthesisError> {
//! let table = TruthTable::from_json_str(r#"{
//!     "inputs": ["a", "b", "cin"],
//!     "outputs": {
//!         "sum":  [0, 1, 1, 0, 1, 0, 0, 1],
//!         "cout": [0, 0, 0, 1, 0, 1, 1, 1]
//!     }
//! }"#)?;
//!
//! let synthesis = synthesize(&table, &GeneratorConfig::default())?;
//! for record in &synthesis.records {
//!     println!("{} = {}", record.name, record.expression);
//! }
//!
//! let json = synthesis.schematic.to_json_string(ExportMode::Full)?;
//! assert!(json.contains("\"wokwi-gate-and-2\""));
//! # Ok(())
//! # }
//! ```
//!
//! ## Peripherals
//!
//! [`schematic::peripherals`] appends an Arduino Mega verification harness or
//! the TinyTapeout demo board to a synthesized schematic, and [`sketch`]
//! renders the Arduino program that checks the circuit against the table.
//!
//! ## Command Line
//!
//! With the `cli` feature the `wokwi-lut` binary wraps the whole flow:
//!
//! ```text
//! wokwi-lut -v -f logic.json -o diagram.json --test
//! ```

// Public modules
pub mod config;
pub mod cover;
pub mod error;
pub mod schematic;
pub mod sketch;
pub mod synth;
pub mod table;

// Re-export high-level public API
pub use config::GeneratorConfig;
pub use cover::{Cover, Literal, Minimizer, QuineMcCluskey, SopSymbols, Term};
pub use error::SynthesisError;
pub use schematic::{ExportMode, Schematic};
pub use sketch::{render_sketch, SketchConfig};
pub use synth::{
    size_and_tree, synthesize, synthesize_with, LayoutConfig, OutputRecord, ResourceSummary,
    Synthesis, TermRecord,
};
pub use table::{TruthTable, TruthTableError};
