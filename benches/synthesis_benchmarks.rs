//! Benchmark suite for minimization and gate-level synthesis
//!
//! Tables are generated from a few classic functions at increasing input
//! counts, so the numbers show how each stage scales with table size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wokwi_lut::table::MAX_INPUTS;
use wokwi_lut::{synthesize, ExportMode, GeneratorConfig, Minimizer, QuineMcCluskey, TruthTable};

/// Function family used to fill a benchmark table
#[derive(Debug, Clone, Copy)]
enum Family {
    Parity,    // no two minterms merge
    Majority,  // many overlapping primes
    Threshold, // ones above the middle row
    Scrambled, // pseudo-random, half dense
}

impl Family {
    fn as_str(&self) -> &str {
        match self {
            Family::Parity => "parity",
            Family::Majority => "majority",
            Family::Threshold => "threshold",
            Family::Scrambled => "scrambled",
        }
    }

    fn value(&self, inputs: usize, row: usize) -> bool {
        match self {
            Family::Parity => row.count_ones() % 2 == 1,
            Family::Majority => row.count_ones() as usize * 2 > inputs,
            Family::Threshold => row >= (1 << inputs) / 2 + 1,
            Family::Scrambled => {
                let mut x = row as u64 ^ 0x5DEE_CE66;
                x ^= x << 13;
                x ^= x >> 7;
                x ^= x << 17;
                x.count_ones() % 2 == 1
            }
        }
    }
}

fn build_table(family: Family, inputs: usize) -> TruthTable {
    let names: Vec<String> = (0..inputs).map(|k| format!("i{}", k)).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let values: Vec<u8> = (0..1usize << inputs)
        .map(|row| family.value(inputs, row) as u8)
        .collect();
    TruthTable::from_rows(&name_refs, &[("y", values.as_slice())]).unwrap()
}

const FAMILIES: [Family; 3] = [Family::Parity, Family::Majority, Family::Threshold];
const SIZES: [usize; 4] = [3, 5, 7, 9];

/// Benchmark: Quine–McCluskey minimization only
fn bench_minimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize");

    for family in FAMILIES {
        for inputs in SIZES {
            let table = build_table(family, inputs);
            let ones = table.ones(0);
            let param = format!("{}/{}", family.as_str(), inputs);

            group.throughput(Throughput::Elements(ones.len() as u64));
            group.bench_with_input(BenchmarkId::new("quine_mccluskey", &param), &ones, |b, ones| {
                b.iter(|| {
                    let cover = QuineMcCluskey.minimize(inputs, black_box(ones)).unwrap();
                    black_box(cover);
                });
            });
        }
    }

    // worst case the table reader accepts
    let table = build_table(Family::Scrambled, MAX_INPUTS);
    let ones = table.ones(0);
    group.sample_size(10);
    group.throughput(Throughput::Elements(ones.len() as u64));
    group.bench_with_input(
        BenchmarkId::new("quine_mccluskey", format!("scrambled/{}", MAX_INPUTS)),
        &ones,
        |b, ones| {
            b.iter(|| {
                let cover = QuineMcCluskey.minimize(MAX_INPUTS, black_box(ones)).unwrap();
                black_box(cover);
            });
        },
    );

    group.finish();
}

/// Benchmark: Full pipeline (minimize + wire + place)
fn bench_synthesize(c: &mut Criterion) {
    let config = GeneratorConfig::default();
    let mut group = c.benchmark_group("synthesize");

    for family in FAMILIES {
        for inputs in SIZES {
            let table = build_table(family, inputs);
            let param = format!("{}/{}", family.as_str(), inputs);

            group.throughput(Throughput::Elements(table.num_rows() as u64));
            group.bench_with_input(BenchmarkId::new("synthesize", &param), &table, |b, table| {
                b.iter(|| {
                    let synthesis = synthesize(black_box(table), &config).unwrap();
                    black_box(synthesis);
                });
            });
        }
    }

    group.finish();
}

/// Benchmark: JSON export of a synthesized schematic
fn bench_export(c: &mut Criterion) {
    let config = GeneratorConfig::default();
    let mut group = c.benchmark_group("export");

    for inputs in SIZES {
        let table = build_table(Family::Parity, inputs);
        let synthesis = synthesize(&table, &config).unwrap();

        group.throughput(Throughput::Elements(synthesis.schematic.connections().len() as u64));
        group.bench_with_input(
            BenchmarkId::new("full_json", inputs),
            &synthesis.schematic,
            |b, schematic| {
                b.iter(|| {
                    let json = schematic.to_json_string(ExportMode::Full).unwrap();
                    black_box(json);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_minimize, bench_synthesize, bench_export);
criterion_main!(benches);
