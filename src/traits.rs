//! Core trait definitions for assignment weights.
//!
//! The solver is generic over the integer type stored in the weight matrix.
//! Implement [`Weight`] (or use one of the provided primitive impls) to pick
//! the precision of weights, labels and totals.
//!
//! Requirements on a weight type:
//! - Exact arithmetic: labels are compared for equality to detect tight edges,
//!   so floating-point types are deliberately not supported.
//! - Total order: used for row maxima and the minimum slack.
//! - A lossless (or saturating, for `u128`) mapping into `i128`, which the
//!   boundary checks use to prove that no label or total can overflow.

use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Integer element of a weight matrix.
///
/// All quantities the solver derives (labels, slacks, totals) are stored in
/// the same type, so the admissible weight range depends on `MAX_I128`; see
/// [`crate::utils::required_headroom`].
pub trait Weight:
    Copy
    + Ord
    + Debug
    + Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + AddAssign
    + SubAssign
    + Sum
    + Send
    + Sync
    + 'static
{
    /// Additive identity; the initial column label.
    const ZERO: Self;

    /// Largest representable value, widened to `i128` (saturating for `u128`).
    const MAX_I128: i128;

    /// Type name used in overflow diagnostics.
    const NAME: &'static str;

    /// Widen to `i128`.
    fn to_i128(self) -> i128;
}

macro_rules! impl_weight {
    ($($t:ty),* $(,)?) => {
        $(
            impl Weight for $t {
                const ZERO: Self = 0;
                const MAX_I128: i128 = if (<$t>::MAX as u128) > (i128::MAX as u128) {
                    i128::MAX
                } else {
                    <$t>::MAX as i128
                };
                const NAME: &'static str = stringify!($t);

                #[inline]
                fn to_i128(self) -> i128 {
                    // Only u128 can exceed i128::MAX; saturate it.
                    if (self as u128) > (i128::MAX as u128) && self > Self::ZERO {
                        i128::MAX
                    } else {
                        self as i128
                    }
                }
            }
        )*
    };
}

impl_weight!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
