//! Approximate comparison functions that automatically use [`EPSILON`].

pub use approx::AbsDiffEq;
use num_traits::Zero;

use crate::{Float, EPSILON};

/// Compares two numbers, but considers them equal if they are separated by
/// less than `EPSILON`.
///
/// Handles infinity specially.
pub fn approx_eq<T: AbsDiffEq<Epsilon = Float>>(a: &T, b: &T) -> bool {
    // use native float equality to handle infinities
    a == b || approx::abs_diff_eq!(a, b, epsilon = EPSILON)
}

/// Returns whether `x` has an absolute value greater than `EPSILON`.
pub fn is_approx_nonzero<T: AbsDiffEq<Epsilon = Float> + Zero>(x: &T) -> bool {
    !approx_eq(x, &T::zero())
}

/// Compares two numbers under a combined absolute/relative tolerance, the way
/// [`approx::RelativeEq`] does: `|a − b| ≤ atol + rtol·max(|a|, |b|)`.
pub fn num_eq(a: Float, b: Float, atol: Float, rtol: Float) -> bool {
    a == b || (a - b).abs() <= atol + rtol * Float::max(a.abs(), b.abs())
}
