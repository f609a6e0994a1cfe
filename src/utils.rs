//! Assorted utilities and helpers.
//!
//! Overflow bounds for the labeling live here so the builder and the solver
//! share a single definition.

use crate::error::{Error, Result};
use crate::traits::Weight;

/// Largest magnitude any label, slack or total can reach when solving an
/// `n`×`n` instance whose weights lie in `[min, max]`.
///
/// Row labels start at the row maximum and never fall below `min`; column
/// labels start at zero and never exceed `n * (max - min)`, because the dual
/// sum only decreases. Slacks are therefore bounded by `(n + 1) * (max - min)`
/// and totals by `n * max(|min|, |max|)`.
///
/// Returns `None` when the bound itself does not fit in `i128`.
pub fn required_headroom(n: usize, min: i128, max: i128) -> Option<i128> {
    debug_assert!(min <= max, "empty weight range");
    let n = i128::try_from(n).ok()?;
    let span = max.checked_sub(min)?;
    let extreme = min.checked_abs()?.max(max.checked_abs()?);
    let labels = n.checked_add(1)?.checked_mul(span)?.checked_add(extreme)?;
    let totals = n.checked_mul(extreme)?;
    Some(labels.max(totals))
}

/// Fail with [`Error::Overflow`] unless `[min, max]` is safe for `W` at size `n`.
pub fn check_headroom<W: Weight>(n: usize, min: W, max: W) -> Result<()> {
    let (lo, hi) = (min.to_i128(), max.to_i128());
    match required_headroom(n, lo, hi) {
        Some(bound) if bound <= W::MAX_I128 => Ok(()),
        _ => Err(Error::Overflow {
            n,
            min: lo,
            max: hi,
            ty: W::NAME,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_cell_needs_its_magnitude() {
        assert_eq!(required_headroom(1, 5, 5), Some(5));
        assert_eq!(required_headroom(1, -9, -9), Some(9));
    }

    #[test]
    fn span_dominates_for_wide_ranges() {
        // (3 + 1) * 10 + 10 = 50 vs 3 * 10 = 30
        assert_eq!(required_headroom(3, 0, 10), Some(50));
        // (2 + 1) * 20 + 10 = 70 vs 2 * 10 = 20
        assert_eq!(required_headroom(2, -10, 10), Some(70));
    }

    #[test]
    fn totals_dominate_for_flat_ranges() {
        assert_eq!(required_headroom(100, 7, 7), Some(700));
    }

    #[test]
    fn bound_overflowing_i128_is_none() {
        assert_eq!(required_headroom(4, i128::MIN, i128::MAX), None);
        assert_eq!(required_headroom(2, 0, i128::MAX), None);
    }

    #[test]
    fn check_rejects_ranges_too_wide_for_the_type() {
        assert!(check_headroom::<i8>(3, 0, 20).is_ok());
        let err = check_headroom::<i8>(3, 0, 40).unwrap_err();
        assert_eq!(
            err,
            Error::Overflow {
                n: 3,
                min: 0,
                max: 40,
                ty: "i8"
            }
        );
    }

    #[test]
    fn monotonic_in_dimension() {
        let mut prev = 0;
        for n in 1..200 {
            let b = required_headroom(n, -3, 11).unwrap();
            assert!(b >= prev, "bound decreased at n={n}: {b} < {prev}");
            prev = b;
        }
    }
}
