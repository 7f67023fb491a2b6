//! Generator configuration

use crate::cover::SopSymbols;
use crate::sketch::SketchConfig;
use crate::synth::LayoutConfig;

/// Author written to generated schematics unless overridden
pub const DEFAULT_AUTHOR: &str = "wokwi-lut";

/// Editor written to generated schematics
pub const DEFAULT_EDITOR: &str = "wokwi";

/// Configuration for a generator run
///
/// Every field has a sensible default, so the usual way to build one is to
/// start from [`GeneratorConfig::default()`] and change what you need:
///
/// ```
/// use wokwi_lut::GeneratorConfig;
///
/// let mut config = GeneratorConfig::default();
/// config.author = "lab-7".to_string();
/// config.layout.stage_pitch = 150;
/// assert_eq!(config.layout.gate_pitch, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Grid spacing of the generated parts
    ///
    /// **Default:** 60 vertical, 120 horizontal
    pub layout: LayoutConfig,

    /// Symbols used for the logged sum-of-products expressions
    ///
    /// **Default:** `~` for negation, juxtaposition for AND, ` + ` for OR
    pub symbols: SopSymbols,

    /// Schematic `author` field
    ///
    /// **Default:** [`DEFAULT_AUTHOR`]
    pub author: String,

    /// Schematic `editor` field
    ///
    /// **Default:** `wokwi`
    pub editor: String,

    /// Timing and reporting values substituted into the verification sketch
    pub sketch: SketchConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            layout: LayoutConfig::default(),
            symbols: SopSymbols::default(),
            author: DEFAULT_AUTHOR.to_string(),
            editor: DEFAULT_EDITOR.to_string(),
            sketch: SketchConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }
}
