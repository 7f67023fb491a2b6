//! Tests for the cover module

use super::*;
use std::sync::Arc;

fn names(list: &[&str]) -> Vec<Arc<str>> {
    list.iter().map(|n| Arc::from(*n)).collect()
}

fn rendered(cover: &Cover) -> Vec<String> {
    cover.terms().iter().map(|t| t.to_string()).collect()
}

/// The cover must reproduce the truth table exactly
fn assert_equivalent(cover: &Cover, num_inputs: usize, ones: &[usize]) {
    for row in 0..(1usize << num_inputs) {
        assert_eq!(
            cover.evaluate(row),
            ones.contains(&row),
            "row {} of cover {:?}",
            row,
            rendered(cover)
        );
    }
}

#[test]
fn test_literal_symbols() {
    assert_eq!(Literal::from_symbol('0'), Literal::Negated);
    assert_eq!(Literal::from_symbol('1'), Literal::Asserted);
    assert_eq!(Literal::from_symbol('-'), Literal::Unused);
    assert_eq!(Literal::from_symbol('x'), Literal::Unused);
    assert_eq!(Term::parse("01-").to_string(), "01-");
}

#[test]
fn test_term_covers_rows_msb_first() {
    // a·¬b over inputs (a, b): row 0b10 only
    let term = Term::parse("10");
    let covered: Vec<usize> = (0..4).filter(|&r| term.covers(r)).collect();
    assert_eq!(covered, vec![2]);
}

#[test]
fn test_xor_cannot_be_minimized() {
    let cover = QuineMcCluskey.minimize(2, &[1, 2]).unwrap();
    assert_eq!(rendered(&cover), vec!["01", "10"]);
    assert_equivalent(&cover, 2, &[1, 2]);
}

#[test]
fn test_and_is_single_term() {
    let cover = QuineMcCluskey.minimize(2, &[3]).unwrap();
    assert_eq!(rendered(&cover), vec!["11"]);
}

#[test]
fn test_all_zero_gives_empty_cover() {
    let cover = QuineMcCluskey.minimize(3, &[]).unwrap();
    assert!(cover.is_empty());
    assert_eq!(cover.num_inputs(), 3);
}

#[test]
fn test_all_one_gives_literal_free_term() {
    let cover = QuineMcCluskey.minimize(3, &[0, 1, 2, 3, 4, 5, 6, 7]).unwrap();
    assert_eq!(rendered(&cover), vec!["---"]);
    assert_eq!(cover.terms()[0].literal_count(), 0);
}

#[test]
fn test_full_adder_outputs() {
    let sum = [1, 2, 4, 7];
    let carry = [3, 5, 6, 7];

    let sum_cover = QuineMcCluskey.minimize(3, &sum).unwrap();
    assert_eq!(sum_cover.num_terms(), 4);
    assert_equivalent(&sum_cover, 3, &sum);

    let carry_cover = QuineMcCluskey.minimize(3, &carry).unwrap();
    assert_eq!(rendered(&carry_cover), vec!["-11", "1-1", "11-"]);
    assert_equivalent(&carry_cover, 3, &carry);
}

#[test]
fn test_cyclic_core_uses_minimum_cover() {
    // Six primes, none essential; greedy selection needs four terms, three suffice
    let ones = [0, 1, 2, 5, 6, 7];
    let cover = QuineMcCluskey.minimize(3, &ones).unwrap();
    assert_equivalent(&cover, 3, &ones);
    assert_eq!(cover.num_terms(), 3);
}

#[test]
fn test_seven_segment_digit_a() {
    // segment 'a' of a BCD 7-segment decoder, rows 10..15 off
    let ones = [0, 2, 3, 5, 6, 7, 8, 9];
    let cover = QuineMcCluskey.minimize(4, &ones).unwrap();
    assert_equivalent(&cover, 4, &ones);
}

#[test]
fn test_minimizer_is_deterministic() {
    let ones = [0, 1, 3, 4, 9, 11, 12, 14, 15];
    let first = QuineMcCluskey.minimize(4, &ones).unwrap();
    let second = QuineMcCluskey.minimize(4, &ones).unwrap();
    assert_eq!(first, second);
    assert_equivalent(&first, 4, &ones);
}

#[test]
fn test_largest_table_is_minimized() {
    let n = crate::table::MAX_INPUTS;
    // scrambled half-dense ON-set with few mergeable neighbours
    let ones: Vec<usize> = (0..1usize << n)
        .filter(|&row| {
            let mut x = row as u64 ^ 0x5DEE_CE66;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x.count_ones() % 2 == 1
        })
        .collect();

    let cover = QuineMcCluskey.minimize(n, &ones).unwrap();
    assert!(cover.num_terms() <= ones.len());
    let on: std::collections::HashSet<usize> = ones.iter().copied().collect();
    for row in 0..(1usize << n) {
        assert_eq!(cover.evaluate(row), on.contains(&row), "row {}", row);
    }
}

#[test]
fn test_row_out_of_range() {
    let err = QuineMcCluskey.minimize(2, &[4]).unwrap_err();
    assert!(matches!(
        err,
        crate::SynthesisError::RowOutOfRange { row: 4, rows: 4 }
    ));
}

#[test]
fn test_sop_rendering() {
    let cover = Cover::new(3, vec![Term::parse("10-"), Term::parse("-11")]);
    let inputs = names(&["a", "b", "c"]);
    assert_eq!(cover.to_sop(&inputs, &SopSymbols::default()), "a~b + bc");

    let verbose = SopSymbols {
        negation: "NOT ".to_string(),
        and: " AND ".to_string(),
        or: " OR ".to_string(),
        term_start: "(".to_string(),
        term_end: ")".to_string(),
    };
    assert_eq!(
        cover.to_sop(&inputs, &verbose),
        "(a AND NOT b) OR (b AND c)"
    );
}

#[test]
fn test_sop_constants() {
    let inputs = names(&["a"]);
    assert_eq!(
        Cover::new(1, Vec::new()).to_sop(&inputs, &SopSymbols::default()),
        "0"
    );
    assert_eq!(
        Cover::new(1, vec![Term::parse("-")]).to_sop(&inputs, &SopSymbols::default()),
        "1"
    );
}
