//! Product terms and covers for minimized boolean functions
//!
//! A [`Cover`] is the sum-of-products form of one output: an ordered list of
//! [`Term`]s, each a fixed-width sequence of [`Literal`]s (one per input). The
//! synthesis engine walks terms in cover order and literals left to right, so
//! the order of a cover is part of the contract that makes generated
//! schematics reproducible.

mod display;
mod minimize;

#[cfg(test)]
mod tests;

pub use display::SopSymbols;
pub use minimize::{Minimizer, QuineMcCluskey};

use std::fmt;

/// How an input appears in a product term
///
/// Variants are declared so that the derived ordering matches the ordering of
/// the `{-, 0, 1}` string rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Literal {
    /// The input does not appear in the term
    Unused,
    /// The input appears negated (`0` in string form)
    Negated,
    /// The input appears as-is (`1` in string form)
    Asserted,
}

impl Literal {
    /// Parse one symbol of a term string
    ///
    /// `'0'` is negated, `'1'` is asserted and every other symbol means the
    /// input is not part of the term.
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            '0' => Literal::Negated,
            '1' => Literal::Asserted,
            _ => Literal::Unused,
        }
    }

    /// Symbol used in the string rendering of a term
    pub fn symbol(self) -> char {
        match self {
            Literal::Unused => '-',
            Literal::Negated => '0',
            Literal::Asserted => '1',
        }
    }

    /// Whether the input takes part in the term
    pub fn is_present(self) -> bool {
        self != Literal::Unused
    }
}

/// A product term over a fixed number of inputs
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term {
    literals: Vec<Literal>,
}

impl Term {
    /// Create a term from its literals, one per input
    pub fn new(literals: Vec<Literal>) -> Self {
        Term { literals }
    }

    /// Parse a term from its `{0,1,-}` rendering
    ///
    /// ```
    /// use wokwi_lut::{Literal, Term};
    ///
    /// let term = Term::parse("1-0");
    /// assert_eq!(term.literals(), &[Literal::Asserted, Literal::Unused, Literal::Negated]);
    /// assert_eq!(term.literal_count(), 2);
    /// ```
    pub fn parse(symbols: &str) -> Self {
        Term::new(symbols.chars().map(Literal::from_symbol).collect())
    }

    /// Literals in input order
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Number of inputs the term is defined over
    pub fn width(&self) -> usize {
        self.literals.len()
    }

    /// Number of inputs that take part in the term
    pub fn literal_count(&self) -> usize {
        self.literals.iter().filter(|l| l.is_present()).count()
    }

    /// Present literals as `(input index, literal)`, left to right
    pub fn present(&self) -> impl Iterator<Item = (usize, Literal)> + '_ {
        self.literals
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, literal)| literal.is_present())
    }

    /// Evaluate the term for a truth-table row (input 0 is the MSB)
    pub fn covers(&self, row: usize) -> bool {
        let width = self.width();
        self.present().all(|(input, literal)| {
            let bit = (row >> (width - 1 - input)) & 1 == 1;
            match literal {
                Literal::Asserted => bit,
                Literal::Negated => !bit,
                Literal::Unused => true,
            }
        })
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for literal in &self.literals {
            write!(f, "{}", literal.symbol())?;
        }
        Ok(())
    }
}

/// The minimized sum-of-products form of one output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cover {
    num_inputs: usize,
    terms: Vec<Term>,
}

impl Cover {
    /// Create a cover
    ///
    /// Terms should be `num_inputs` wide; synthesis rejects a cover that mixes
    /// widths with [`SynthesisError::TermWidth`](crate::SynthesisError::TermWidth).
    pub fn new(num_inputs: usize, terms: Vec<Term>) -> Self {
        Cover { num_inputs, terms }
    }

    /// Number of inputs
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Terms in evaluation order
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Number of terms
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// `true` for the constant-false function
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluate the sum of products for a truth-table row
    pub fn evaluate(&self, row: usize) -> bool {
        self.terms.iter().any(|term| term.covers(row))
    }
}
