//! Wires between part pins

use serde::ser::{SerializeTuple, Serializer};
use serde::Serialize;
use std::fmt;

/// One end of a wire: a part id and one of its pins
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    part: String,
    pin: String,
}

impl Endpoint {
    /// Create an endpoint
    pub fn new(part: impl Into<String>, pin: impl Into<String>) -> Self {
        Endpoint {
            part: part.into(),
            pin: pin.into(),
        }
    }

    /// Part id
    pub fn part(&self) -> &str {
        &self.part
    }

    /// Pin name
    pub fn pin(&self) -> &str {
        &self.pin
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.part, self.pin)
    }
}

/// Wire colors understood by the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WireColor {
    Black,
    Blue,
    Brown,
    Cyan,
    Green,
    Orange,
    Purple,
    Red,
    Violet,
}

/// What a wire connects, read left to right along the signal flow
///
/// The role decides the wire's color and default routing hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireRole {
    /// NOT gate output to AND input
    NegatedInputToAnd,
    /// Input buffer output to AND input
    InputToAnd,
    /// AND output to AND input (reduction tree)
    AndToAnd,
    /// Root AND output to OR input
    AndToOr,
    /// OR output to OR input (reduction tree)
    OrToOr,
    /// Root OR output to output buffer
    OrToOutput,
    /// Self-tie of unused gate inputs, or NOT gate input to its buffer input
    Termination,
    /// Verification harness wiring
    Arduino,
    /// Supply wiring
    Vcc,
    /// Ground wiring
    Gnd,
    /// 7-segment display wiring
    SevenSegment,
    /// Demo board chip to design wiring
    Board,
}

impl WireRole {
    /// Color of wires with this role
    pub fn color(self) -> WireColor {
        match self {
            WireRole::NegatedInputToAnd => WireColor::Blue,
            WireRole::InputToAnd => WireColor::Brown,
            WireRole::AndToAnd => WireColor::Orange,
            WireRole::AndToOr => WireColor::Purple,
            WireRole::OrToOr => WireColor::Green,
            WireRole::OrToOutput => WireColor::Cyan,
            WireRole::Termination => WireColor::Black,
            WireRole::Arduino => WireColor::Black,
            WireRole::Vcc => WireColor::Red,
            WireRole::Gnd => WireColor::Black,
            WireRole::SevenSegment => WireColor::Green,
            WireRole::Board => WireColor::Green,
        }
    }

    /// Default routing hint for wires with this role
    pub fn route(self) -> &'static [&'static str] {
        match self {
            WireRole::Termination => &["h-20", "*", "h-20"],
            _ => &["h10", "*", "h-10"],
        }
    }
}

/// A wire between two endpoints
///
/// The direction is documentary (source to sink along the signal flow); the
/// simulator treats wires as undirected nets. Serialized as the 4-element
/// array `["part:pin", "part:pin", "color", [routing hints...]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    from: Endpoint,
    to: Endpoint,
    color: WireColor,
    route: Vec<String>,
}

impl Connection {
    /// Create a wire whose color and routing follow from its role
    pub fn new(from: Endpoint, to: Endpoint, role: WireRole) -> Self {
        Connection::with_route(from, to, role.color(), role.route())
    }

    /// Create a wire with an explicit color and routing hint
    pub fn with_route(from: Endpoint, to: Endpoint, color: WireColor, route: &[&str]) -> Self {
        Connection {
            from,
            to,
            color,
            route: route.iter().map(|step| step.to_string()).collect(),
        }
    }

    /// Source endpoint
    pub fn from(&self) -> &Endpoint {
        &self.from
    }

    /// Sink endpoint
    pub fn to(&self) -> &Endpoint {
        &self.to
    }

    /// Wire color
    pub fn color(&self) -> WireColor {
        self.color
    }

    /// Routing hint (relative move instructions)
    pub fn route(&self) -> &[String] {
        &self.route
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({:?})", self.from, self.to, self.color)
    }
}

impl Serialize for Connection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(4)?;
        tuple.serialize_element(&self.from.to_string())?;
        tuple.serialize_element(&self.to.to_string())?;
        tuple.serialize_element(&self.color)?;
        tuple.serialize_element(&self.route)?;
        tuple.end()
    }
}
