//! Part instances of a Wokwi schematic

use serde::Serialize;
use std::collections::BTreeMap;

/// Part types known to the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PartKind {
    /// Single-input buffer (input and output stage)
    #[serde(rename = "wokwi-gate-buffer")]
    GateBuffer,
    /// Inverter for negated input literals
    #[serde(rename = "wokwi-gate-not")]
    GateNot,
    /// Two-input AND gate
    #[serde(rename = "wokwi-gate-and-2")]
    GateAnd2,
    /// Two-input OR gate
    #[serde(rename = "wokwi-gate-or-2")]
    GateOr2,
    /// Arduino Mega used as verification harness
    #[serde(rename = "wokwi-arduino-mega")]
    ArduinoMega,
    /// 8-way DIP switch
    #[serde(rename = "wokwi-dip-switch-8")]
    DipSwitch8,
    /// Clock generator
    #[serde(rename = "wokwi-clock-generator")]
    ClockGenerator,
    /// TinyTapeout 8-pin input chip
    #[serde(rename = "chip-input-8-pins")]
    ChipInput8Pins,
    /// TinyTapeout 8-pin output chip
    #[serde(rename = "chip-output-8-pins")]
    ChipOutput8Pins,
    /// 7-segment display
    #[serde(rename = "wokwi-7segment")]
    SevenSegment,
    /// Slide switch
    #[serde(rename = "wokwi-slide-switch")]
    SlideSwitch,
    /// Push button
    #[serde(rename = "wokwi-pushbutton")]
    Pushbutton,
    /// Supply rail
    #[serde(rename = "wokwi-vcc")]
    Vcc,
    /// Ground
    #[serde(rename = "wokwi-gnd")]
    Gnd,
}

/// Grid position of a part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Vertical coordinate
    pub top: i32,
    /// Horizontal coordinate
    pub left: i32,
}

impl Position {
    /// Create a position
    pub fn new(top: i32, left: i32) -> Self {
        Position { top, left }
    }
}

/// A part instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
    #[serde(rename = "type")]
    kind: PartKind,
    id: String,
    top: i32,
    left: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    rotate: Option<i32>,
    attrs: BTreeMap<String, String>,
}

impl Part {
    /// Create a part at a position, without rotation or attributes
    pub fn new(kind: PartKind, id: impl Into<String>, position: Position) -> Self {
        Part {
            kind,
            id: id.into(),
            top: position.top,
            left: position.left,
            rotate: None,
            attrs: BTreeMap::new(),
        }
    }

    /// Set the rotation in degrees
    pub fn rotated(mut self, degrees: i32) -> Self {
        self.rotate = Some(degrees);
        self
    }

    /// Add a device-specific attribute
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Part type
    pub fn kind(&self) -> PartKind {
        self.kind
    }

    /// Unique part id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current position
    pub fn position(&self) -> Position {
        Position::new(self.top, self.left)
    }

    /// Move the part
    pub fn set_position(&mut self, position: Position) {
        self.top = position.top;
        self.left = position.left;
    }

    /// Rotation in degrees, if any
    pub fn rotate(&self) -> Option<i32> {
        self.rotate
    }

    /// Device-specific attributes
    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }
}

/// Part id of the buffer driven by an external input
pub fn input_buffer_id(name: &str) -> String {
    format!("input_{}", name)
}

/// Part id of the NOT gate producing a negated input
pub fn input_not_id(name: &str) -> String {
    format!("input_not_{}", name)
}

/// Part id of the buffer driving an external output
pub fn output_buffer_id(name: &str) -> String {
    format!("output_{}", name)
}
