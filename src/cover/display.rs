//! Human-readable sum-of-products rendering

use super::{Cover, Literal};
use std::sync::Arc;

/// Symbols used when rendering a cover as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SopSymbols {
    /// Prefix for a negated input (`~`, or `NOT `)
    pub negation: String,
    /// Separator between literals of a term (empty, ` AND ` or `*`)
    pub and: String,
    /// Separator between terms (` + ` or ` OR `)
    pub or: String,
    /// Written before each term
    pub term_start: String,
    /// Written after each term
    pub term_end: String,
}

impl Default for SopSymbols {
    fn default() -> Self {
        SopSymbols {
            negation: "~".to_string(),
            and: String::new(),
            or: " + ".to_string(),
            term_start: String::new(),
            term_end: String::new(),
        }
    }
}

impl Cover {
    /// Render the cover using the given input names
    ///
    /// The constant-false cover renders as `0` and a term without literals as
    /// `1`.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use wokwi_lut::{Cover, SopSymbols, Term};
    ///
    /// let names: Vec<Arc<str>> = vec![Arc::from("a"), Arc::from("b")];
    /// let cover = Cover::new(2, vec![Term::parse("10"), Term::parse("01")]);
    /// assert_eq!(cover.to_sop(&names, &SopSymbols::default()), "a~b + ~ab");
    /// ```
    pub fn to_sop(&self, names: &[Arc<str>], symbols: &SopSymbols) -> String {
        if self.terms.is_empty() {
            return "0".to_string();
        }

        let mut out = String::new();
        for (index, term) in self.terms.iter().enumerate() {
            if index > 0 {
                out.push_str(&symbols.or);
            }
            out.push_str(&symbols.term_start);
            if term.literal_count() == 0 {
                out.push('1');
            }
            for (position, (input, literal)) in term.present().enumerate() {
                if position > 0 {
                    out.push_str(&symbols.and);
                }
                if literal == Literal::Negated {
                    out.push_str(&symbols.negation);
                }
                out.push_str(&names[input]);
            }
            out.push_str(&symbols.term_end);
        }
        out
    }
}
