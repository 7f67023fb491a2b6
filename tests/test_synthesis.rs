//! End-to-end synthesis tests
//!
//! The generated schematics are simulated gate by gate and compared with the
//! truth table they were generated from.

use std::collections::HashMap;
use wokwi_lut::schematic::{PartKind, Schematic};
use wokwi_lut::*;

/// Evaluates the design part of a schematic for one input combination
struct Simulator<'a> {
    drivers: HashMap<String, String>,
    ties: HashMap<String, String>,
    inputs: HashMap<&'a str, bool>,
}

impl<'a> Simulator<'a> {
    fn new(schematic: &Schematic, table: &'a TruthTable, row: usize) -> Self {
        let mut drivers = HashMap::new();
        let mut ties = HashMap::new();
        for connection in schematic.connections() {
            let (from, to) = (connection.from(), connection.to());
            if from.pin() == "OUT" {
                let previous = drivers.insert(to.to_string(), from.part().to_string());
                assert!(previous.is_none(), "{} has two drivers", to);
            } else if from.part() == to.part() {
                ties.insert(to.to_string(), from.to_string());
            }
        }

        let n = table.num_inputs();
        let inputs = table
            .inputs()
            .iter()
            .enumerate()
            .map(|(k, name)| (&**name, (row >> (n - 1 - k)) & 1 == 1))
            .collect();

        Simulator {
            drivers,
            ties,
            inputs,
        }
    }

    fn pin(&self, part: &str, pin: &str) -> bool {
        let key = format!("{}:{}", part, pin);
        if let Some(source) = self.drivers.get(&key) {
            return self.output(source);
        }
        match self.ties.get(&key) {
            Some(other) => {
                let (part, pin) = other.split_once(':').unwrap();
                self.pin(part, pin)
            }
            None => panic!("{} is floating", key),
        }
    }

    fn output(&self, part: &str) -> bool {
        if let Some(name) = part.strip_prefix("input_not_") {
            !self.inputs[name]
        } else if let Some(name) = part.strip_prefix("input_") {
            self.inputs[name]
        } else if part.starts_with("gate_and_") {
            self.pin(part, "A") && self.pin(part, "B")
        } else if part.starts_with("gate_or_") {
            self.pin(part, "A") || self.pin(part, "B")
        } else if part.starts_with("output_") {
            self.pin(part, "IN")
        } else {
            panic!("unexpected part {}", part)
        }
    }
}

fn assert_circuit_matches(table: &TruthTable, schematic: &Schematic) {
    for row in 0..table.num_rows() {
        let sim = Simulator::new(schematic, table, row);
        for column in table.outputs() {
            let id = format!("output_{}", column.name());
            assert_eq!(
                sim.output(&id),
                column.values()[row],
                "output {} differs in row {}",
                column.name(),
                row
            );
        }
    }
}

fn table_from_fn(inputs: &[&str], outputs: &[(&str, fn(usize) -> bool)]) -> TruthTable {
    let rows = 1usize << inputs.len();
    let columns: Vec<(&str, Vec<u8>)> = outputs
        .iter()
        .map(|(name, f)| (*name, (0..rows).map(|row| f(row) as u8).collect()))
        .collect();
    let borrowed: Vec<(&str, &[u8])> = columns
        .iter()
        .map(|(name, values)| (*name, values.as_slice()))
        .collect();
    TruthTable::from_rows(inputs, &borrowed).unwrap()
}

fn majority(row: usize) -> bool {
    row.count_ones() >= 3
}

fn odd_parity(row: usize) -> bool {
    row.count_ones() % 2 == 1
}

fn any_set(row: usize) -> bool {
    row != 0
}

const SEVEN_SEGMENT: &str = r#"{
    "inputs": ["d3", "d2", "d1", "d0"],
    "outputs": {
        "a": [1,0,1,1,0,1,1,1,1,1,1,0,1,0,1,1],
        "b": [1,1,1,1,1,0,0,1,1,1,1,0,0,1,0,0],
        "c": [1,1,0,1,1,1,1,1,1,1,1,1,0,1,0,0],
        "d": [1,0,1,1,0,1,1,0,1,1,0,1,1,1,1,0],
        "e": [1,0,1,0,0,0,1,0,1,0,1,1,1,1,1,1],
        "f": [1,0,0,0,1,1,1,0,1,1,1,1,1,0,1,1],
        "g": [0,0,1,1,1,1,1,0,1,1,1,1,0,1,1,1]
    }
}"#;

#[test]
fn test_full_adder_circuit() {
    let table = TruthTable::from_rows(
        &["a", "b", "cin"],
        &[
            ("sum", &[0, 1, 1, 0, 1, 0, 0, 1]),
            ("cout", &[0, 0, 0, 1, 0, 1, 1, 1]),
        ],
    )
    .unwrap();
    let synthesis = synthesize(&table, &GeneratorConfig::default()).unwrap();

    assert_circuit_matches(&table, &synthesis.schematic);
    assert_eq!(synthesis.record("cout").unwrap().terms.len(), 3);
    assert_eq!(synthesis.record("sum").unwrap().terms.len(), 4);
}

#[test]
fn test_seven_segment_decoder() {
    let table = TruthTable::from_json_str(SEVEN_SEGMENT).unwrap();
    let synthesis = synthesize(&table, &GeneratorConfig::default()).unwrap();

    let names: Vec<&str> = synthesis.records.iter().map(|r| &*r.name).collect();
    assert_eq!(names, vec!["a", "b", "c", "d", "e", "f", "g"]);
    assert_circuit_matches(&table, &synthesis.schematic);

    let outputs = synthesis
        .schematic
        .parts()
        .iter()
        .filter(|part| part.id().starts_with("output_"))
        .count();
    assert_eq!(outputs, 7);
}

#[test]
fn test_five_input_majority() {
    let table = table_from_fn(
        &["a", "b", "c", "d", "e"],
        &[("maj", majority as fn(usize) -> bool)],
    );
    let synthesis = synthesize(&table, &GeneratorConfig::default()).unwrap();
    let record = &synthesis.records[0];

    assert_eq!(record.terms.len(), 10);
    assert!(record.terms.iter().all(|term| term.literal_count == 3));
    assert!(record.or_rounds >= 2);
    assert_circuit_matches(&table, &synthesis.schematic);
}

#[test]
fn test_unminimized_cover_still_correct() {
    // one term per minterm
    let canonical = |n: usize, ones: &[usize]| -> Result<Cover, SynthesisError> {
        let terms = ones
            .iter()
            .map(|&row| {
                Term::new(
                    (0..n)
                        .map(|k| {
                            if (row >> (n - 1 - k)) & 1 == 1 {
                                Literal::Asserted
                            } else {
                                Literal::Negated
                            }
                        })
                        .collect(),
                )
            })
            .collect();
        Ok(Cover::new(n, terms))
    };
    let table = table_from_fn(
        &["x", "y", "z"],
        &[
            ("odd", odd_parity as fn(usize) -> bool),
            ("any", any_set as fn(usize) -> bool),
        ],
    );

    let canonical_run = synthesize_with(&table, &canonical, &GeneratorConfig::default()).unwrap();
    let minimized_run = synthesize(&table, &GeneratorConfig::default()).unwrap();

    assert_circuit_matches(&table, &canonical_run.schematic);
    assert_circuit_matches(&table, &minimized_run.schematic);
    assert!(canonical_run.summary.and_gates > minimized_run.summary.and_gates);
}

#[test]
fn test_every_gate_input_is_driven_once() {
    let table = TruthTable::from_json_str(SEVEN_SEGMENT).unwrap();
    let synthesis = synthesize(&table, &GeneratorConfig::default()).unwrap();
    let schematic = &synthesis.schematic;

    for part in schematic.parts() {
        if !matches!(part.kind(), PartKind::GateAnd2 | PartKind::GateOr2) {
            continue;
        }
        for pin in ["A", "B"] {
            let sinks = schematic
                .connections()
                .iter()
                .filter(|c| c.to().part() == part.id() && c.to().pin() == pin)
                .count();
            let tied_from = schematic
                .connections()
                .iter()
                .any(|c| c.from().part() == part.id() && c.to().part() == part.id());
            assert!(
                sinks == 1 || (pin == "A" && sinks == 0 && tied_from),
                "{}:{} has {} sink connection(s)",
                part.id(),
                pin,
                sinks
            );
        }
    }
}

#[test]
fn test_synthesis_is_deterministic() {
    let table = TruthTable::from_json_str(SEVEN_SEGMENT).unwrap();
    let first = synthesize(&table, &GeneratorConfig::default()).unwrap();
    let second = synthesize(&table, &GeneratorConfig::default()).unwrap();

    assert_eq!(
        first.schematic.to_json_string(ExportMode::Full).unwrap(),
        second.schematic.to_json_string(ExportMode::Full).unwrap()
    );
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let logic = dir.path().join("logic.json");
    let diagram = dir.path().join("diagram.json");
    std::fs::write(&logic, SEVEN_SEGMENT).unwrap();

    let table = TruthTable::from_file(&logic).unwrap();
    let synthesis = synthesize(&table, &GeneratorConfig::default()).unwrap();
    synthesis.schematic.to_file(&diagram, ExportMode::Full).unwrap();

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&diagram).unwrap()).unwrap();
    assert_eq!(doc["version"], 1);
    assert_eq!(doc["editor"], "wokwi");
    assert_eq!(
        doc["parts"].as_array().unwrap().len(),
        synthesis.summary.total()
    );
    assert_eq!(
        doc["connections"].as_array().unwrap().len(),
        synthesis.schematic.connections().len()
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = TruthTable::from_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, SynthesisError::Io(_)));
}

#[test]
fn test_custom_author_and_pitch() {
    let table = TruthTable::from_rows(&["a", "b"], &[("y", &[0, 1, 1, 1])]).unwrap();
    let mut config = GeneratorConfig::default();
    config.author = "lab".to_string();
    config.layout = LayoutConfig {
        gate_pitch: 30,
        stage_pitch: 100,
    };
    let synthesis = synthesize(&table, &config).unwrap();

    assert_eq!(synthesis.schematic.author(), "lab");
    let not_b = synthesis.schematic.part("input_not_b").unwrap();
    assert_eq!(not_b.position().top, 90);
    let and_0 = synthesis.schematic.part("gate_and_0").unwrap();
    assert_eq!(and_0.position().left, 200);
}

#[test]
fn test_part_ids_are_unique() {
    let table = TruthTable::from_rows(&["a", "nota", "not_b"], &[("y", &[0, 1, 1, 0, 1, 0, 0, 1])]).unwrap();
    let mut synthesis = synthesize(&table, &GeneratorConfig::default()).unwrap();
    wokwi_lut::schematic::peripherals::attach_test_harness(&mut synthesis.schematic, &table);

    let mut ids = std::collections::HashSet::new();
    for part in synthesis.schematic.parts() {
        assert!(ids.insert(part.id().to_string()), "duplicate part id {}", part.id());
    }

    let err = TruthTable::from_rows(&["a", "not_a"], &[("y", &[0, 1, 1, 0])]).unwrap_err();
    assert!(matches!(err, TruthTableError::IdCollision { .. }));
}
