//! Two-input gate allocation
//!
//! A [`GateAllocator`] hands out input pins of two-input gates of one family
//! (AND or OR), opening a new gate whenever the current one is full. Gate
//! indices grow monotonically and are never reused within a run.
//!
//! The allocator never writes connections itself. [`GateAllocator::terminate`]
//! returns a [`Termination`] describing the gate that must be tied off, and the
//! circuit builder turns it into the `A`–`B` self-tie wire.

use crate::schematic::Endpoint;
use std::fmt;

/// Family of two-input gates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateFamily {
    /// Two-input AND (`wokwi-gate-and-2`)
    And,
    /// Two-input OR (`wokwi-gate-or-2`)
    Or,
}

impl GateFamily {
    /// Lower-case name used in part ids
    pub fn as_str(self) -> &'static str {
        match self {
            GateFamily::And => "and",
            GateFamily::Or => "or",
        }
    }
}

/// Input pin of a two-input gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputPin {
    /// First input
    A,
    /// Second input
    B,
}

impl InputPin {
    /// Pin for a slot (0 → `A`, 1 → `B`)
    fn from_slot(slot: u8) -> Self {
        match slot {
            0 => InputPin::A,
            _ => InputPin::B,
        }
    }

    /// Pin name as used in endpoints
    pub fn as_str(self) -> &'static str {
        match self {
            InputPin::A => "A",
            InputPin::B => "B",
        }
    }
}

/// A specific gate instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GateRef {
    /// Gate family
    pub family: GateFamily,
    /// Index within the family
    pub index: usize,
}

impl GateRef {
    /// Create a gate reference
    pub fn new(family: GateFamily, index: usize) -> Self {
        GateRef { family, index }
    }

    /// Part id (`gate_and_<i>` / `gate_or_<i>`)
    pub fn id(&self) -> String {
        self.to_string()
    }

    /// Endpoint of one of the gate's input pins
    pub fn input(&self, pin: InputPin) -> Endpoint {
        Endpoint::new(self.id(), pin.as_str())
    }

    /// Endpoint of the gate's output pin
    pub fn output(&self) -> Endpoint {
        Endpoint::new(self.id(), "OUT")
    }
}

impl fmt::Display for GateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gate_{}_{}", self.family.as_str(), self.index)
    }
}

/// A pin handed out by [`GateAllocator::allocate_port`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortAllocation {
    /// Gate owning the pin
    pub gate: GateRef,
    /// Slot number (0 or 1)
    pub slot: u8,
    /// Pin name for the slot
    pub pin: InputPin,
}

impl PortAllocation {
    /// Endpoint of the allocated pin
    pub fn endpoint(&self) -> Endpoint {
        self.gate.input(self.pin)
    }
}

/// A gate that had open input pins when it was terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Termination {
    /// The terminated gate
    pub gate: GateRef,
    /// How many input pins were still open (1 or 2)
    pub open_pins: u8,
}

/// Allocation cursor for one gate family
#[derive(Debug, Clone)]
pub struct GateAllocator {
    family: GateFamily,
    current: Option<usize>,
    used_pins: u8,
}

impl GateAllocator {
    /// Create an allocator with no gate opened yet
    pub fn new(family: GateFamily) -> Self {
        GateAllocator {
            family,
            current: None,
            used_pins: 0,
        }
    }

    /// Family this allocator hands out
    pub fn family(&self) -> GateFamily {
        self.family
    }

    /// Currently open gate, if any
    pub fn current(&self) -> Option<GateRef> {
        self.current.map(|index| GateRef::new(self.family, index))
    }

    /// Number of input pins used on the current gate
    pub fn used_pins(&self) -> u8 {
        self.used_pins
    }

    /// Number of gates opened so far
    pub fn gate_count(&self) -> usize {
        self.current.map_or(0, |index| index + 1)
    }

    /// Open a fresh gate, leaving the previous one as it is
    ///
    /// Callers terminate the previous gate first if it may be partially used.
    pub fn advance(&mut self) -> GateRef {
        let index = self.current.map_or(0, |index| index + 1);
        self.current = Some(index);
        self.used_pins = 0;
        log::debug!("    Selected next {} gate #{}", self.family.as_str().to_uppercase(), index);
        GateRef::new(self.family, index)
    }

    /// Hand out the next free input pin, opening a new gate when needed
    pub fn allocate_port(&mut self) -> PortAllocation {
        if self.current.is_none() || self.used_pins >= 2 {
            self.advance();
        }
        let gate = GateRef::new(self.family, self.current.unwrap_or_default());
        let slot = self.used_pins;
        self.used_pins += 1;
        PortAllocation {
            gate,
            slot,
            pin: InputPin::from_slot(slot),
        }
    }

    /// Close the current gate if it still has open input pins
    ///
    /// Returns the gate to tie off, or `None` when no gate is open or the
    /// current gate is already full. Calling it twice in a row yields `None`
    /// the second time.
    pub fn terminate(&mut self) -> Option<Termination> {
        let index = self.current?;
        if self.used_pins >= 2 {
            return None;
        }
        let open_pins = 2 - self.used_pins;
        self.used_pins = 2;
        Some(Termination {
            gate: GateRef::new(self.family, index),
            open_pins,
        })
    }
}
