//! Wokwi schematic document
//!
//! A [`Schematic`] is the `diagram.json` document understood by the Wokwi
//! simulator: metadata, a parts list and a connections list, plus an optional
//! serial monitor section. Synthesis fills it through the same small API that
//! peripheral templates use (append part, append connection, look up a part by
//! id), and [`ExportMode`] selects which part of it gets written.
//!
//! ```
//! use wokwi_lut::schematic::{Connection, Endpoint, ExportMode, Part, PartKind, Position, Schematic, WireRole};
//!
//! # fn main() -> Result<(), wokwi_lut::SynthesisError> {
//! let mut schematic = Schematic::new("me", "wokwi");
//! schematic.add_part(Part::new(PartKind::GateBuffer, "input_a", Position::new(0, 0)));
//! schematic.add_part(Part::new(PartKind::GateNot, "input_not_a", Position::new(60, 0)));
//! schematic.add_connection(Connection::new(
//!     Endpoint::new("input_not_a", "IN"),
//!     Endpoint::new("input_a", "IN"),
//!     WireRole::Termination,
//! ));
//!
//! let json = schematic.to_json_string(ExportMode::ConnectionsOnly)?;
//! assert!(json.contains("\"input_not_a:IN\""));
//! # Ok(())
//! # }
//! ```

mod connection;
mod part;
pub mod peripherals;


pub use connection::{Connection, Endpoint, WireColor, WireRole};
pub use part::{input_buffer_id, input_not_id, output_buffer_id, Part, PartKind, Position};

use crate::error::SynthesisError;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Schematic format version written to the document
pub const SCHEMATIC_VERSION: u32 = 1;

/// Which part of the schematic gets written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    /// The complete document
    #[default]
    Full,
    /// Only the `parts` list
    PartsOnly,
    /// Only the `connections` list
    ConnectionsOnly,
}

/// Serial monitor settings of the simulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerialMonitor {
    /// When the monitor is shown (`always`)
    pub display: String,
    /// Line ending (`lf`)
    pub newline: String,
}

impl Default for SerialMonitor {
    fn default() -> Self {
        SerialMonitor {
            display: "always".to_string(),
            newline: "lf".to_string(),
        }
    }
}

/// A Wokwi schematic document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schematic {
    version: u32,
    author: String,
    editor: String,
    parts: Vec<Part>,
    connections: Vec<Connection>,
    #[serde(rename = "serialMonitor", skip_serializing_if = "Option::is_none")]
    serial_monitor: Option<SerialMonitor>,
}

impl Schematic {
    /// Create an empty schematic
    pub fn new(author: impl Into<String>, editor: impl Into<String>) -> Self {
        Schematic {
            version: SCHEMATIC_VERSION,
            author: author.into(),
            editor: editor.into(),
            parts: Vec::new(),
            connections: Vec::new(),
            serial_monitor: None,
        }
    }

    /// Append a part
    pub fn add_part(&mut self, part: Part) {
        log::debug!("    Part: {} ({:?})", part.id(), part.kind());
        self.parts.push(part);
    }

    /// Append a connection
    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    /// Look up a part by id
    pub fn part(&self, id: &str) -> Option<&Part> {
        self.parts.iter().find(|part| part.id() == id)
    }

    /// Look up a part by id for modification
    pub fn part_mut(&mut self, id: &str) -> Option<&mut Part> {
        self.parts.iter_mut().find(|part| part.id() == id)
    }

    /// Parts in document order
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Connections in document order
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Document author
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Editor the document targets
    pub fn editor(&self) -> &str {
        &self.editor
    }

    /// Serial monitor settings, if enabled
    pub fn serial_monitor(&self) -> Option<&SerialMonitor> {
        self.serial_monitor.as_ref()
    }

    /// Enable the serial monitor
    pub fn set_serial_monitor(&mut self, monitor: SerialMonitor) {
        self.serial_monitor = Some(monitor);
    }

    /// Write the selected part of the document as JSON indented by four spaces
    pub fn write_json<W: Write>(&self, writer: W, mode: ExportMode) -> Result<(), SynthesisError> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        match mode {
            ExportMode::Full => self.serialize(&mut serializer)?,
            ExportMode::PartsOnly => self.parts.serialize(&mut serializer)?,
            ExportMode::ConnectionsOnly => self.connections.serialize(&mut serializer)?,
        }
        Ok(())
    }

    /// Render the selected part of the document as a JSON string
    pub fn to_json_string(&self, mode: ExportMode) -> Result<String, SynthesisError> {
        let mut buffer = Vec::new();
        self.write_json(&mut buffer, mode)?;
        String::from_utf8(buffer)
            .map_err(|err| SynthesisError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))
    }

    /// Write the selected part of the document to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P, mode: ExportMode) -> Result<(), SynthesisError> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        self.write_json(&mut writer, mode)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
