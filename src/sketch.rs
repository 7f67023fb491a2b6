//! Arduino verification sketch
//!
//! The test harness wires an Arduino Mega to the design; the sketch rendered
//! here drives every input combination and compares the sampled outputs with
//! the truth table. Rendering is plain placeholder substitution on a template
//! (the embedded [`DEFAULT_TEMPLATE`] or one supplied by the caller).

use crate::schematic::peripherals::{MEGA_INPUT_DRIVE_PINS, MEGA_OUTPUT_SENSE_PINS};
use crate::table::TruthTable;

/// Template shipped with the crate
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/sketch.ino.template");

const NUM_INPUTS_PH: &str = "{DESIGN_NUM_USED_INPUTS_PH}";
const NUM_OUTPUTS_PH: &str = "{DESIGN_NUM_USED_OUTPUTS_PH}";
const EXPECTED_VALUES_PH: &str = "{VERIFICATION_EXPECTED_OUT_VALS_PH}";
const STOP_ON_ERROR_PH: &str = "{VERIFICATION_STOP_ON_ERROR}";
const BAUDRATE_PH: &str = "{SERIAL_BAUDRATE_PH}";
const SETUP_TIME_PH: &str = "{VERIFICATION_SETUP_TIME_MS_PH}";
const HOLD_TIME_PH: &str = "{VERIFICATION_HOLD_TIME_MS_PH}";

/// Values substituted into the sketch that do not come from the truth table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SketchConfig {
    /// Stop at the first mismatching combination
    ///
    /// **Default:** `true`
    pub stop_on_error: bool,

    /// Serial monitor baud rate
    ///
    /// **Default:** 230400
    pub baud_rate: u32,

    /// Delay between applying inputs and sampling outputs, in milliseconds
    ///
    /// **Default:** 50
    pub setup_time_ms: u32,

    /// Delay before the next combination is applied, in milliseconds
    ///
    /// **Default:** 350
    pub hold_time_ms: u32,
}

impl Default for SketchConfig {
    fn default() -> Self {
        SketchConfig {
            stop_on_error: true,
            baud_rate: 230_400,
            setup_time_ms: 50,
            hold_time_ms: 350,
        }
    }
}

impl SketchConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }
}

/// Number of inputs and outputs the test harness can wire
///
/// Anything beyond the Mega's drive and sense pins is left out of the sketch.
pub fn wired_counts(table: &TruthTable) -> (usize, usize) {
    (
        table.num_inputs().min(MEGA_INPUT_DRIVE_PINS.count()),
        table.num_outputs().min(MEGA_OUTPUT_SENSE_PINS.count()),
    )
}

/// Expected output values as C array entries, one line per input combination
///
/// Each line is `\n    0b<bits>,` with the first declared output as the most
/// significant bit. Only [`wired_counts`] inputs and outputs are covered; the
/// inputs the harness cannot drive are taken as low.
///
/// ```
/// use wokwi_lut::{sketch::expected_output_values, TruthTable};
///
/// let table = TruthTable::from_rows(&["a"], &[("y", &[0, 1]), ("z", &[1, 1])]).unwrap();
/// assert_eq!(expected_output_values(&table), "\n    0b01,\n    0b11,");
/// ```
pub fn expected_output_values(table: &TruthTable) -> String {
    let (inputs, outputs) = wired_counts(table);
    let shift = table.num_inputs() - inputs;

    let mut values = String::new();
    for combination in 0..1usize << inputs {
        values.push_str("\n    0b");
        for bit in table.row_outputs(combination << shift).take(outputs) {
            values.push(if bit { '1' } else { '0' });
        }
        values.push(',');
    }
    values
}

/// Substitute every placeholder of `template` for `table`
pub fn render_sketch(template: &str, table: &TruthTable, config: &SketchConfig) -> String {
    let (inputs, outputs) = wired_counts(table);
    log::info!(
        "Rendering verification sketch for {} input(s) and {} output(s)",
        inputs,
        outputs
    );
    if (inputs, outputs) != (table.num_inputs(), table.num_outputs()) {
        log::warn!(
            "Sketch only verifies the {} input(s) and {} output(s) wired to the Arduino MEGA, other inputs are assumed low",
            inputs,
            outputs
        );
    }

    template
        .replace(NUM_INPUTS_PH, &format!("{}u", inputs))
        .replace(NUM_OUTPUTS_PH, &format!("{}u", outputs))
        .replace(EXPECTED_VALUES_PH, &expected_output_values(table))
        .replace(STOP_ON_ERROR_PH, if config.stop_on_error { "true" } else { "false" })
        .replace(BAUDRATE_PH, &format!("{}u", config.baud_rate))
        .replace(SETUP_TIME_PH, &format!("{}u", config.setup_time_ms))
        .replace(HOLD_TIME_PH, &format!("{}u", config.hold_time_ms))
}
