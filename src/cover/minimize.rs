//! Two-level minimization of single-output functions
//!
//! The synthesis engine only needs "ON-set rows in, ordered cover out", which
//! is captured by the [`Minimizer`] trait. [`QuineMcCluskey`] is the built-in
//! implementation; callers with their own minimizer (or a fixed cover for
//! testing) can pass a closure instead.

use super::{Cover, Literal, Term};
use crate::error::SynthesisError;
use crate::table::{TruthTableError, MAX_INPUTS};
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

/// A two-level minimizer for single-output boolean functions
///
/// Given the number of inputs and the ascending row indices where the function
/// is 1, returns a cover whose terms are all `num_inputs` wide. An empty ON-set
/// yields an empty cover.
///
/// Closures with the same signature implement the trait:
///
/// ```
/// use wokwi_lut::{Cover, Minimizer, SynthesisError, Term};
///
/// let fixed = |n: usize, _ones: &[usize]| -> Result<Cover, SynthesisError> {
///     Ok(Cover::new(n, vec![Term::parse("11")]))
/// };
/// let cover = fixed.minimize(2, &[3]).unwrap();
/// assert_eq!(cover.num_terms(), 1);
/// ```
pub trait Minimizer {
    /// Minimize the function whose ON-set is `ones`
    fn minimize(&self, num_inputs: usize, ones: &[usize]) -> Result<Cover, SynthesisError>;
}

impl<F> Minimizer for F
where
    F: Fn(usize, &[usize]) -> Result<Cover, SynthesisError>,
{
    fn minimize(&self, num_inputs: usize, ones: &[usize]) -> Result<Cover, SynthesisError> {
        self(num_inputs, ones)
    }
}

/// Quine–McCluskey minimizer
///
/// Computes all prime implicants, keeps the essential ones and covers the
/// remaining rows with the fewest terms (then fewest literals) using a bounded
/// branch and bound seeded by a greedy cover. Terms are returned sorted by
/// their `{-,0,1}` rendering so the result does not depend on set iteration
/// order.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuineMcCluskey;

/// An implicant in bit form: `mask` marks don't-care positions, `value` holds
/// the fixed bits (always zero under the mask)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Implicant {
    mask: u32,
    value: u32,
}

impl Implicant {
    fn covers(self, row: u32) -> bool {
        row & !self.mask == self.value
    }

    /// Every row the implicant covers, enumerated over the subsets of its mask
    fn rows(self) -> impl Iterator<Item = u32> {
        let mut next = Some(self.mask);
        std::iter::from_fn(move || {
            let sub = next?;
            next = if sub == 0 {
                None
            } else {
                Some((sub - 1) & self.mask)
            };
            Some(self.value | sub)
        })
    }

    fn literal_count(self, num_inputs: usize) -> usize {
        num_inputs - self.mask.count_ones() as usize
    }

    fn to_term(self, num_inputs: usize) -> Term {
        let literals = (0..num_inputs)
            .map(|input| {
                let bit = 1u32 << (num_inputs - 1 - input);
                if self.mask & bit != 0 {
                    Literal::Unused
                } else if self.value & bit != 0 {
                    Literal::Asserted
                } else {
                    Literal::Negated
                }
            })
            .collect();
        Term::new(literals)
    }
}

impl Minimizer for QuineMcCluskey {
    fn minimize(&self, num_inputs: usize, ones: &[usize]) -> Result<Cover, SynthesisError> {
        if num_inputs > MAX_INPUTS {
            return Err(TruthTableError::TooManyInputs {
                count: num_inputs,
                max: MAX_INPUTS,
            }
            .into());
        }
        let rows = 1usize << num_inputs;
        if let Some(&row) = ones.iter().find(|&&row| row >= rows) {
            return Err(SynthesisError::RowOutOfRange { row, rows });
        }

        let ones: BTreeSet<u32> = ones.iter().map(|&row| row as u32).collect();
        if ones.is_empty() {
            return Ok(Cover::new(num_inputs, Vec::new()));
        }

        let primes = prime_implicants(num_inputs, &ones);
        log::trace!("{} prime implicant(s) for {} row(s)", primes.len(), ones.len());
        let selected = select_cover(num_inputs, &primes, &ones);

        let mut terms: Vec<Term> = selected
            .into_iter()
            .map(|implicant| implicant.to_term(num_inputs))
            .collect();
        terms.sort();
        Ok(Cover::new(num_inputs, terms))
    }
}

fn prime_implicants(num_inputs: usize, ones: &BTreeSet<u32>) -> Vec<Implicant> {
    let mut current: BTreeSet<Implicant> = ones
        .iter()
        .map(|&value| Implicant { mask: 0, value })
        .collect();
    let mut primes = Vec::new();

    while !current.is_empty() {
        let mut next = BTreeSet::new();
        let mut merged = BTreeSet::new();

        for &implicant in &current {
            for bit in (0..num_inputs).map(|i| 1u32 << i) {
                if (implicant.mask | implicant.value) & bit != 0 {
                    continue;
                }
                let partner = Implicant {
                    mask: implicant.mask,
                    value: implicant.value | bit,
                };
                if current.contains(&partner) {
                    next.insert(Implicant {
                        mask: implicant.mask | bit,
                        value: implicant.value,
                    });
                    merged.insert(implicant);
                    merged.insert(partner);
                }
            }
        }

        primes.extend(current.difference(&merged).copied());
        current = next;
    }

    primes
}

fn select_cover(num_inputs: usize, primes: &[Implicant], ones: &BTreeSet<u32>) -> Vec<Implicant> {
    let coverage = Coverage::new(primes, ones);
    let mut selected: BTreeSet<usize> = BTreeSet::new();

    // Essential primes: the only prime covering some row
    for covering in &coverage.by_row {
        if let [only] = covering.as_slice() {
            selected.insert(*only);
        }
    }

    let mut uncovered = RowSet::full(ones.len());
    for &prime in &selected {
        uncovered.remove_all(&coverage.rows[prime]);
    }

    let mut search = CoverSearch {
        num_inputs,
        coverage: &coverage,
        best: greedy_cover(&coverage, &selected, &uncovered),
        steps: 0,
    };
    search.run(&mut Vec::new(), &uncovered);
    if search.steps >= SEARCH_BUDGET {
        log::debug!("Cover search budget exhausted, keeping best cover found so far");
    }

    selected.extend(search.best);
    selected.into_iter().map(|prime| primes[prime]).collect()
}

/// Which ON rows each prime covers, and which primes cover each ON row
///
/// ON rows are numbered by their position in the ascending ON-set; primes by
/// their position in the prime list.
struct Coverage<'a> {
    primes: &'a [Implicant],
    rows: Vec<Vec<usize>>,
    by_row: Vec<Vec<usize>>,
}

impl<'a> Coverage<'a> {
    fn new(primes: &'a [Implicant], ones: &BTreeSet<u32>) -> Self {
        let position: HashMap<u32, usize> = ones
            .iter()
            .enumerate()
            .map(|(index, &row)| (row, index))
            .collect();

        let mut rows = Vec::with_capacity(primes.len());
        let mut by_row = vec![Vec::new(); ones.len()];
        for (index, prime) in primes.iter().enumerate() {
            let mut covered: Vec<usize> = prime
                .rows()
                .filter_map(|row| position.get(&row).copied())
                .collect();
            covered.sort_unstable();
            for &row in &covered {
                by_row[row].push(index);
            }
            rows.push(covered);
        }

        Coverage {
            primes,
            rows,
            by_row,
        }
    }
}

/// Fixed-size set of ON-row positions
#[derive(Debug, Clone, PartialEq, Eq)]
struct RowSet {
    words: Vec<u64>,
}

impl RowSet {
    fn full(len: usize) -> Self {
        let mut words = vec![u64::MAX; len.div_ceil(64)];
        if len % 64 != 0 {
            if let Some(last) = words.last_mut() {
                *last = (1u64 << (len % 64)) - 1;
            }
        }
        RowSet { words }
    }

    fn contains(&self, row: usize) -> bool {
        (self.words[row / 64] >> (row % 64)) & 1 == 1
    }

    fn remove_all(&mut self, rows: &[usize]) {
        for &row in rows {
            self.words[row / 64] &= !(1u64 << (row % 64));
        }
    }

    fn first(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .find(|(_, word)| **word != 0)
            .map(|(index, word)| index * 64 + word.trailing_zeros() as usize)
    }

    fn is_empty(&self) -> bool {
        self.words.iter().all(|word| *word == 0)
    }
}

/// Cover `uncovered` greedily: most rows gained, then fewest literals, then
/// lowest implicant
fn greedy_cover(coverage: &Coverage<'_>, selected: &BTreeSet<usize>, uncovered: &RowSet) -> Vec<usize> {
    let mut uncovered = uncovered.clone();
    let mut taken: Vec<bool> = (0..coverage.primes.len())
        .map(|prime| selected.contains(&prime))
        .collect();
    let mut chosen = Vec::new();

    while !uncovered.is_empty() {
        let best = (0..coverage.primes.len())
            .filter(|&prime| !taken[prime])
            .map(|prime| {
                let gain = coverage.rows[prime]
                    .iter()
                    .filter(|&&row| uncovered.contains(row))
                    .count();
                let implicant = coverage.primes[prime];
                (gain, implicant.mask.count_ones(), Reverse(implicant), prime)
            })
            .max();
        match best {
            Some((gain, _, _, prime)) if gain > 0 => {
                uncovered.remove_all(&coverage.rows[prime]);
                taken[prime] = true;
                chosen.push(prime);
            }
            // Every ON row is covered by at least one prime
            _ => break,
        }
    }

    chosen
}

/// Upper bound on branch-and-bound steps before settling for the best cover
/// found so far
const SEARCH_BUDGET: usize = 20_000;

/// Branch and bound over the rows left after essential primes, minimizing the
/// number of terms and then the number of literals
struct CoverSearch<'a> {
    num_inputs: usize,
    coverage: &'a Coverage<'a>,
    best: Vec<usize>,
    steps: usize,
}

impl CoverSearch<'_> {
    fn cost(&self, cover: &[usize]) -> (usize, usize) {
        let literals = cover
            .iter()
            .map(|&prime| self.coverage.primes[prime].literal_count(self.num_inputs))
            .sum();
        (cover.len(), literals)
    }

    fn run(&mut self, chosen: &mut Vec<usize>, uncovered: &RowSet) {
        if self.steps >= SEARCH_BUDGET {
            return;
        }
        self.steps += 1;

        let Some(row) = uncovered.first() else {
            if self.cost(chosen) < self.cost(&self.best) {
                self.best = chosen.clone();
            }
            return;
        };
        if chosen.len() + 1 > self.best.len() {
            return;
        }

        let coverage = self.coverage;
        for &prime in &coverage.by_row[row] {
            let mut rest = uncovered.clone();
            rest.remove_all(&coverage.rows[prime]);
            chosen.push(prime);
            self.run(chosen, &rest);
            chosen.pop();
        }
    }
}
