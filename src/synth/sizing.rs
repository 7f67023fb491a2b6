//! Gate-tree sizing for two-input AND reduction

/// Number of two-input gates and reduction stages needed to AND together
/// `input_count` signals
///
/// Each stage pairs up the active signals (ceiling division), so a stage with
/// an odd number of signals leaves one gate half used. Terms with fewer than
/// two literals still consume one gate in one stage: a term is never realized
/// as a bare wire.
///
/// ```
/// use wokwi_lut::size_and_tree;
///
/// assert_eq!(size_and_tree(0), (1, 1));
/// assert_eq!(size_and_tree(2), (1, 1));
/// assert_eq!(size_and_tree(5), (6, 3)); // 3 + 2 + 1 gates
/// ```
pub fn size_and_tree(input_count: usize) -> (usize, usize) {
    if input_count < 2 {
        return (1, 1);
    }

    let mut gates = 0;
    let mut stages = 0;
    let mut active = input_count;
    loop {
        stages += 1;
        let stage_gates = active.div_ceil(2);
        gates += stage_gates;
        active = stage_gates;
        if stage_gates == 1 {
            return (gates, stages);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_terms_use_one_gate() {
        assert_eq!(size_and_tree(0), (1, 1));
        assert_eq!(size_and_tree(1), (1, 1));
        assert_eq!(size_and_tree(2), (1, 1));
    }

    #[test]
    fn test_ceiling_halving() {
        assert_eq!(size_and_tree(3), (3, 2));
        assert_eq!(size_and_tree(4), (3, 2));
        assert_eq!(size_and_tree(5), (6, 3));
        assert_eq!(size_and_tree(6), (6, 3));
        assert_eq!(size_and_tree(7), (7, 3));
        assert_eq!(size_and_tree(8), (7, 3));
        assert_eq!(size_and_tree(9), (11, 4));
        assert_eq!(size_and_tree(16), (15, 4));
    }

    #[test]
    fn test_stage_count_is_ceil_log2() {
        for n in 2..=64usize {
            let (_, stages) = size_and_tree(n);
            let expected = usize::BITS - (n - 1).leading_zeros();
            assert_eq!(stages, expected as usize, "n = {}", n);
        }
    }
}
