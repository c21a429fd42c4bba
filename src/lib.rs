//! Blade and multivector arithmetic over factored orthonormal subspaces.
//!
//! Every k-dimensional oriented subspace ("blade") is stored as an orthonormal
//! basis plus a signed volume, so products reduce to small Gram–Schmidt and
//! determinant computations instead of dense coefficient arrays.

pub use {approx, num_traits as num, smallvec};

/// Floating-point type used for geometry (either `f32` or `f64`).
pub type Float = f64;

/// Small floating-point value used for comparisons and degeneracy cutoffs.
pub const EPSILON: Float = 0.000001;

/// Asserts that both arguments are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = $crate::EPSILON)
    };
}

macro_rules! debug_panic {
    ($($tok:tt)*) => {
        match cfg!(debug_assertions) {
            true => panic!($($tok)*),
            false => log::error!($($tok)*),
        }
    };
}

#[macro_use]
mod impl_macros;
#[macro_use]
mod vector;

pub mod approx_cmp;
pub mod ga;
pub mod matrix;
pub mod ortho;
pub mod sign;
pub mod util;

pub use sign::Sign;

/// Structs, traits, and constants.
pub mod prelude {
    pub use crate::approx_cmp::*;
    pub use crate::ga::{Blade, Element, Error, Multivector, Pseudoscalar};
    pub use crate::matrix::Matrix;
    pub use crate::sign::Sign;
    pub use crate::vector::Vector;
    pub use crate::{ga, vector, Float, EPSILON};
}
pub use prelude::*;
