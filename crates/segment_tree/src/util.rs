/// Smallest `k` with `2^k >= n`.
///
/// Defined as `0` for `n <= 1`, so an empty or single-element tree has one level.
#[inline(always)]
pub(crate) fn ceil_log2(n: usize) -> u32 {
    if n <= 1 {
        return 0;
    }
    usize::BITS - (n - 1).leading_zeros()
}

/// Number of levels of a tree over `n` leaves, root level included.
#[inline(always)]
pub(crate) fn tree_height(n: usize) -> usize {
    ceil_log2(n) as usize + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_log2_known_cases() {
        let cases = [
            (0_usize, 0_u32),
            (1, 0),
            (2, 1),
            (3, 2),
            (4, 2),
            (5, 3),
            (8, 3),
            (9, 4),
            (1 << 20, 20),
            ((1 << 20) + 1, 21),
        ];

        for (n, expected) in cases {
            assert_eq!(ceil_log2(n), expected, "n={n}");
        }
    }

    #[test]
    fn height_matches_repeated_halving() {
        for n in 1..=300_usize {
            let mut levels = 1;
            let mut len = n;
            while len > 1 {
                len = len.div_ceil(2);
                levels += 1;
            }
            assert_eq!(tree_height(n), levels, "n={n}");
        }
        assert_eq!(tree_height(0), 1);
    }
}
