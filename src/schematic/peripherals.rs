//! Peripheral templates appended around a synthesized design
//!
//! Both templates only touch the schematic through its public list API and
//! refer to the design through the input/output buffer part ids, so they work
//! on any synthesized schematic.

use super::{
    input_buffer_id, output_buffer_id, Connection, Endpoint, Part, PartKind, Position, Schematic,
    SerialMonitor, WireColor, WireRole,
};
use crate::table::TruthTable;

/// Arduino Mega digital pins driving the design inputs
pub const MEGA_INPUT_DRIVE_PINS: std::ops::RangeInclusive<u32> = 2..=11;

/// Arduino Mega digital pins sampling the design outputs
pub const MEGA_OUTPUT_SENSE_PINS: std::ops::RangeInclusive<u32> = 12..=21;

/// Number of signals the TinyTapeout input and output chips carry
pub const TINYTAPEOUT_PINS: usize = 8;

/// Append an Arduino Mega that drives every input and samples every output
///
/// Also enables the serial monitor so the verification sketch can report.
/// Inputs or outputs beyond the ten pins reserved for each direction are left
/// unconnected with a warning.
pub fn attach_test_harness(schematic: &mut Schematic, table: &TruthTable) {
    log::info!("Adding Arduino MEGA verification harness");

    schematic.add_part(
        Part::new(PartKind::ArduinoMega, "mega", Position::new(-400, -500)).rotated(90),
    );
    schematic.set_serial_monitor(SerialMonitor::default());

    let drive_pins = MEGA_INPUT_DRIVE_PINS.count();
    if table.num_inputs() > drive_pins {
        log::warn!(
            "Won't be able to drive more than {} inputs from the Arduino MEGA!",
            drive_pins
        );
    }
    for (pin, input) in MEGA_INPUT_DRIVE_PINS.zip(table.inputs()) {
        schematic.add_connection(Connection::new(
            Endpoint::new("mega", pin.to_string()),
            Endpoint::new(input_buffer_id(input), "IN"),
            WireRole::Arduino,
        ));
    }

    let sense_pins = MEGA_OUTPUT_SENSE_PINS.count();
    if table.num_outputs() > sense_pins {
        log::warn!(
            "Won't be able to sample more than {} outputs with the Arduino MEGA!",
            sense_pins
        );
    }
    for (pin, output) in MEGA_OUTPUT_SENSE_PINS.zip(table.outputs()) {
        schematic.add_connection(Connection::new(
            Endpoint::new("mega", pin.to_string()),
            Endpoint::new(output_buffer_id(output.name()), "OUT"),
            WireRole::Arduino,
        ));
    }
}

/// Append the default parts of the TinyTapeout Wokwi template
///
/// Adds the DIP switch, clock, step button, slide switch, the 8-pin input and
/// output chips and a 7-segment display, wires them together, then connects up
/// to eight design inputs and outputs to the chips.
pub fn attach_tinytapeout(schematic: &mut Schematic, table: &TruthTable) {
    log::info!("Adding parts from template for tinytapeout");

    schematic.add_part(
        Part::new(PartKind::DipSwitch8, "sw1", Position::new(-188, -400)).rotated(90),
    );
    schematic.add_part(Part::new(
        PartKind::ClockGenerator,
        "clock1",
        Position::new(-300, -400),
    ));
    schematic.add_part(
        Part::new(PartKind::ChipInput8Pins, "chip1", Position::new(-200, -230))
            .with_attr("verilogRole", "input"),
    );
    schematic.add_part(
        Part::new(PartKind::SlideSwitch, "sw2", Position::new(-320, -300)).with_attr("value", "1"),
    );
    schematic.add_part(
        Part::new(PartKind::Pushbutton, "btn1", Position::new(-410, -400))
            .with_attr("color", "grey")
            .with_attr("label", "Step")
            .with_attr("bounce", "0"),
    );
    schematic.add_part(
        Part::new(PartKind::ChipOutput8Pins, "chip2", Position::new(-200, 900))
            .with_attr("verilogRole", "output"),
    );
    schematic.add_part(
        Part::new(PartKind::SevenSegment, "sevseg1", Position::new(-200, 1100))
            .with_attr("common", "cathode"),
    );
    schematic.add_part(Part::new(PartKind::Vcc, "vcc_btn", Position::new(-450, -320)));
    schematic.add_part(Part::new(PartKind::Vcc, "vcc_dipsw", Position::new(-240, -420)));
    schematic.add_part(Part::new(PartKind::Gnd, "gnd_7seg", Position::new(-70, 1100)));

    for switch in 1..=TINYTAPEOUT_PINS {
        schematic.add_connection(Connection::new(
            Endpoint::new("vcc_dipsw", "VCC"),
            Endpoint::new("sw1", format!("{}a", switch)),
            WireRole::Vcc,
        ));
    }

    let fixed: [(&str, &str, WireColor, &[&str]); 5] = [
        ("btn1:2.r", "sw2:3", WireColor::Orange, &["h90", "*", "v10"]),
        ("vcc_btn:VCC", "btn1:1.r", WireColor::Red, &["v0"]),
        ("sw2:1", "clock1:CLK", WireColor::Green, &["v0"]),
        ("sw2:3", "sw1:1b", WireColor::Violet, &["v0"]),
        ("chip1:EXTIN0", "sw2:2", WireColor::Green, &["h0", "v-40", "h-20"]),
    ];
    for (from, to, color, route) in fixed {
        schematic.add_connection(Connection::with_route(
            parse_endpoint(from),
            parse_endpoint(to),
            color,
            route,
        ));
    }

    for switch in 2..=TINYTAPEOUT_PINS {
        schematic.add_connection(Connection::with_route(
            Endpoint::new("chip1", format!("EXTIN{}", switch - 1)),
            Endpoint::new("sw1", format!("{}b", switch)),
            WireColor::Violet,
            &["h0"],
        ));
    }

    let segments: [(&str, &[&str]); 8] = [
        ("A", &["h21.01", "v-28.8", "h96"]),
        ("B", &["h11.41", "v-48", "h115.2", "v38.4"]),
        ("C", &["h30.61", "v-38.4", "h115.2", "v105.6", "h-28.8"]),
        ("D", &["h49.81", "v57.6", "h48"]),
        ("E", &["v9.6", "h-48", "v-38.4"]),
        ("F", &["h69.01", "v-57.6", "h28.8"]),
        ("G", &["h78.61", "v-57.6"]),
        ("DP", &["v28.8", "h136.21"]),
    ];
    for (index, (segment, route)) in segments.into_iter().enumerate() {
        schematic.add_connection(Connection::with_route(
            Endpoint::new("chip2", format!("EXTOUT{}", index)),
            Endpoint::new("sevseg1", segment),
            WireRole::SevenSegment.color(),
            route,
        ));
    }
    schematic.add_connection(Connection::with_route(
        Endpoint::new("gnd_7seg", "GND"),
        Endpoint::new("sevseg1", "COM.1"),
        WireRole::Gnd.color(),
        &["v0"],
    ));

    if table.num_inputs() > TINYTAPEOUT_PINS {
        log::warn!(
            "Won't be able to connect more than {} inputs!",
            TINYTAPEOUT_PINS
        );
    }
    for (index, input) in table.inputs().iter().take(TINYTAPEOUT_PINS).enumerate() {
        schematic.add_connection(Connection::new(
            Endpoint::new("chip1", format!("IN{}", index)),
            Endpoint::new(input_buffer_id(input), "IN"),
            WireRole::Board,
        ));
    }

    if table.num_outputs() > TINYTAPEOUT_PINS {
        log::warn!(
            "Won't be able to connect more than {} outputs!",
            TINYTAPEOUT_PINS
        );
    }
    for (index, output) in table.outputs().iter().take(TINYTAPEOUT_PINS).enumerate() {
        schematic.add_connection(Connection::new(
            Endpoint::new(output_buffer_id(output.name()), "OUT"),
            Endpoint::new("chip2", format!("OUT{}", index)),
            WireRole::Board,
        ));
    }
}

fn parse_endpoint(text: &str) -> Endpoint {
    match text.split_once(':') {
        Some((part, pin)) => Endpoint::new(part, pin),
        None => Endpoint::new(text, ""),
    }
}
