//! Synthesis keeps all state in the builder of a run, so independent runs can
//! happen on different threads and must agree with each other.

use std::sync::Arc;
use std::thread;
use wokwi_lut::{synthesize, ExportMode, GeneratorConfig, TruthTable};

fn parity4() -> TruthTable {
    let values: Vec<u8> = (0..16u32).map(|row| (row.count_ones() % 2) as u8).collect();
    TruthTable::from_rows(&["a", "b", "c", "d"], &[("p", values.as_slice())]).unwrap()
}

#[test]
fn test_concurrent_runs_agree() {
    let table = Arc::new(parity4());
    let expected = synthesize(&table, &GeneratorConfig::default())
        .unwrap()
        .schematic
        .to_json_string(ExportMode::Full)
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                synthesize(&table, &GeneratorConfig::default())
                    .expect("Synthesis failed")
                    .schematic
                    .to_json_string(ExportMode::Full)
                    .expect("Export failed")
            })
        })
        .collect();

    for handle in handles {
        let json = handle.join().expect("Thread panicked");
        assert_eq!(json, expected);
    }
}

#[test]
fn test_gate_numbering_restarts_per_run() {
    let table = parity4();
    for _ in 0..3 {
        let synthesis = synthesize(&table, &GeneratorConfig::default()).unwrap();
        assert!(synthesis.schematic.part("gate_and_0").is_some());
        assert!(synthesis.schematic.part("gate_or_0").is_some());
        assert_eq!(synthesis.summary.and_gates, 8 * 3);
    }
}
