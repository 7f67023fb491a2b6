//! Example: Full adder as a Wokwi schematic
//!
//! This example reads the full adder truth table shipped next to it,
//! synthesizes it into two-input gates and prints the minimized functions,
//! the gate usage and the generated `diagram.json`.

use wokwi_lut::{synthesize, ExportMode, GeneratorConfig, SopSymbols, TruthTable};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let table = TruthTable::from_json_str(include_str!("full_adder.json"))?;

    println!("=== Full Adder ===\n");
    println!("Inputs:  {:?}", table.inputs());
    println!("Outputs: {}", table.num_outputs());
    println!();

    // Spell the operators out in the printed expressions
    let config = GeneratorConfig {
        symbols: SopSymbols {
            negation: "NOT ".to_string(),
            and: " AND ".to_string(),
            or: " OR ".to_string(),
            term_start: "(".to_string(),
            term_end: ")".to_string(),
        },
        ..GeneratorConfig::default()
    };
    let synthesis = synthesize(&table, &config)?;

    for record in &synthesis.records {
        println!("{} = {}", record.name, record.expression);
        for (index, term) in record.terms.iter().enumerate() {
            println!(
                "   term #{} {}: {} literal(s), AND gates {:?} -> root #{}",
                index + 1,
                term.term,
                term.literal_count,
                term.first_stage,
                term.root
            );
        }
        println!("   final OR gate #{}", record.final_or);
    }
    println!();

    let summary = synthesis.summary;
    println!("Parts:");
    println!("   {:3} buffers", summary.buffers);
    println!("   {:3} NOT gates", summary.not_gates);
    println!("   {:3} AND gates in {} stage(s)", summary.and_gates, summary.max_and_stages);
    println!("   {:3} OR gates in {} stage(s)", summary.or_gates, summary.max_or_stages);
    println!();

    println!("{}", synthesis.schematic.to_json_string(ExportMode::Full)?);
    Ok(())
}
