//! Blades and multivectors stored in factored form.
//!
//! A k-blade is an oriented k-dimensional subspace with a weight. Instead of
//! dense coefficients on 2^n basis blades, each blade carries an orthonormal
//! basis for its subspace plus a signed volume, and each multivector is a sum
//! of blades bucketed by grade. Products and duals then reduce to small
//! Gram–Schmidt factorizations and determinant signs.
//!
//! Scalars and pseudoscalars get their own representations because they
//! behave differently: a scalar has no ambient dimension at all, while a
//! pseudoscalar fills its entire space and so needs no basis.

use thiserror::Error;

use crate::Sign;

mod blade;
mod element;
mod multivector;
mod ops;
mod pseudoscalar;

pub use blade::Blade;
pub use element::Element;
pub use multivector::Multivector;
pub use pseudoscalar::Pseudoscalar;

#[cfg(test)]
mod tests;

/// Error that can occur during blade arithmetic.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Two elements with fixed ambient dimensions disagree about the
    /// dimension of the space they live in.
    #[error("dimension mismatch between {lhs}D and {rhs}D elements")]
    DimensionMismatch {
        /// Ambient dimension of the left-hand operand.
        lhs: u8,
        /// Ambient dimension of the right-hand operand.
        rhs: u8,
    },
    /// The subspace of one blade is not contained in the subspace of another
    /// where the operation requires it.
    #[error("blade is not contained in the reference blade")]
    NotContained,
    /// The operation has no defined result for these operands.
    #[error("undefined operation: {0}")]
    Undefined(&'static str),
}

/// Sign acquired by reversing the factors of a grade-`grade` blade.
///
/// Reversal flips sign exactly when `grade mod 4` is 2 or 3.
pub(crate) fn reverse_sign(grade: u8) -> Sign {
    match grade % 4 < 2 {
        true => Sign::Pos,
        false => Sign::Neg,
    }
}

/// Returns the common ambient dimension of two optional dimensions, or an
/// error if both are fixed and disagree.
pub(crate) fn common_ndim(lhs: Option<u8>, rhs: Option<u8>) -> Result<Option<u8>, Error> {
    match (lhs, rhs) {
        (Some(l), Some(r)) if l != r => Err(Error::DimensionMismatch { lhs: l, rhs: r }),
        (Some(n), _) | (_, Some(n)) => Ok(Some(n)),
        (None, None) => Ok(None),
    }
}
