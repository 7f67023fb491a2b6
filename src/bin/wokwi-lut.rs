//! Wokwi lookup-table generator - Command Line Interface
//!
//! Reads a truth table from JSON, synthesizes it into two-input gates and
//! writes the Wokwi schematic to a file or stdout.

use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use wokwi_lut::schematic::peripherals::{attach_test_harness, attach_tinytapeout};
use wokwi_lut::sketch::DEFAULT_TEMPLATE;
use wokwi_lut::{render_sketch, synthesize, ExportMode, GeneratorConfig, TruthTable};

#[derive(Parser, Debug)]
#[command(name = "wokwi-lut")]
#[command(about = "Generate a Wokwi gate-level schematic from a truth table", long_about = None)]
#[command(version)]
struct Args {
    /// Log level (-v: info, -vv: debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Truth table JSON file
    #[arg(short = 'f', long = "file", value_name = "FILE", default_value = "logic.json")]
    in_file: PathBuf,

    /// Output file (writes to stdout if not specified)
    #[arg(short = 'o', long = "outfile", value_name = "FILE")]
    out_file: Option<PathBuf>,

    /// Only write the parts list
    #[arg(short = 'p', long = "parts-only", conflicts_with = "connections_only")]
    parts_only: bool,

    /// Only write the connections list
    #[arg(short = 'c', long = "connections-only")]
    connections_only: bool,

    /// Add an Arduino Mega test harness and generate the verification sketch
    #[arg(short = 't', long = "test")]
    test: bool,

    /// Add the parts of the TinyTapeout demo board
    #[arg(long = "tinytapeout", visible_alias = "tt")]
    tinytapeout: bool,

    /// Sketch template used instead of the built-in one
    #[arg(long = "sketch-template", value_name = "FILE")]
    sketch_template: Option<PathBuf>,

    /// Where the verification sketch is written
    #[arg(long = "sketch-out", value_name = "FILE", default_value = "sketch.ino")]
    sketch_out: PathBuf,

    /// Author written to the schematic
    #[arg(long = "author")]
    author: Option<String>,
}

impl Args {
    fn export_mode(&self) -> ExportMode {
        if self.parts_only {
            ExportMode::PartsOnly
        } else if self.connections_only {
            ExportMode::ConnectionsOnly
        } else {
            ExportMode::Full
        }
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

fn main() {
    let mut args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .format_timestamp(None)
        .init();
    log::info!("Log level: {}", args.log_level());

    if args.test && args.tinytapeout {
        log::warn!("Cannot combine '--test' and '--tinytapeout'; ignoring '--tinytapeout'");
        args.tinytapeout = false;
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> io::Result<()> {
    let table = TruthTable::from_file(&args.in_file).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Cannot read truth table '{}': {}", args.in_file.display(), e),
        )
    })?;

    let mut config = GeneratorConfig::default();
    if let Some(author) = &args.author {
        config.author = author.clone();
    }

    let mut synthesis = synthesize(&table, &config)?;

    if args.test {
        log::info!("Generating verification code and test framework");
        let template = match &args.sketch_template {
            Some(path) => fs::read_to_string(path)?,
            None => DEFAULT_TEMPLATE.to_string(),
        };
        let sketch = render_sketch(&template, &table, &config.sketch);
        fs::write(&args.sketch_out, sketch)?;
        log::info!("Verification sketch written to '{}'", args.sketch_out.display());

        attach_test_harness(&mut synthesis.schematic, &table);
    }

    if args.tinytapeout {
        attach_tinytapeout(&mut synthesis.schematic, &table);
    }

    let mode = args.export_mode();
    match &args.out_file {
        Some(path) => {
            synthesis.schematic.to_file(path, mode)?;
            log::info!("Schematic written to '{}'", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            synthesis.schematic.write_json(&mut handle, mode)?;
            writeln!(handle)?;
        }
    }

    Ok(())
}
