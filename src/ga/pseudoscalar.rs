//! Top-grade elements, which need no basis.

use std::fmt;
use std::ops::{Mul, Neg};

use super::{reverse_sign, Element};
use crate::approx_cmp::num_eq;
use crate::{impl_mul_sign, Float, Sign, EPSILON};

/// Grade-n element of an n-dimensional space.
///
/// The whole space is its subspace, so only the ambient dimension and a
/// nonzero signed value relative to the standard orientation are stored.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pseudoscalar {
    ndim: u8,
    value: Float,
}

impl Pseudoscalar {
    /// Constructs a pseudoscalar of `ndim`-dimensional space.
    ///
    /// Returns [`Element::Zero`] if `value` is exactly zero, and a scalar if
    /// `ndim` is zero, since the pseudoscalar of 0-dimensional space is its
    /// scalar.
    pub fn new(ndim: u8, value: Float) -> Element {
        if value == 0.0 {
            Element::Zero
        } else if ndim == 0 {
            Element::scalar(value)
        } else {
            Element::Pseudoscalar(Self { ndim, value })
        }
    }

    /// Returns the ambient dimension of the pseudoscalar, which equals its
    /// grade.
    pub fn ndim(&self) -> u8 {
        self.ndim
    }
    /// Returns the signed value relative to the standard orientation.
    pub fn value(&self) -> Float {
        self.value
    }
    /// Returns the absolute value of the pseudoscalar.
    pub fn norm(&self) -> Float {
        self.value.abs()
    }
    /// Returns the sign of the pseudoscalar relative to the standard
    /// orientation.
    pub fn sign(&self) -> Sign {
        Sign::from(self.value)
    }

    /// Returns the pseudoscalar scaled by `factor`.
    pub fn scaled(&self, factor: Float) -> Element {
        Self::new(self.ndim, self.value * factor)
    }

    /// Returns the reverse of the pseudoscalar.
    #[must_use]
    pub fn reverse(&self) -> Self {
        *self * reverse_sign(self.ndim)
    }

    /// Returns the inverse of the pseudoscalar with respect to the dot
    /// product.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            ndim: self.ndim,
            value: reverse_sign(self.ndim).to_num::<Float>() / self.value,
        }
    }

    /// Returns whether the two pseudoscalars are approximately equal.
    pub fn approx_eq_with(&self, other: &Pseudoscalar, atol: Float, rtol: Float) -> bool {
        self.ndim == other.ndim && num_eq(self.value, other.value, atol, rtol)
    }
}

impl From<Pseudoscalar> for Element {
    fn from(pseudo: Pseudoscalar) -> Self {
        Element::Pseudoscalar(pseudo)
    }
}

impl Neg for Pseudoscalar {
    type Output = Pseudoscalar;

    fn neg(self) -> Self::Output {
        Self {
            value: -self.value,
            ..self
        }
    }
}
impl_mul_sign!(impl Mul<Sign> for Pseudoscalar);

impl approx::AbsDiffEq for Pseudoscalar {
    type Epsilon = Float;

    fn default_epsilon() -> Self::Epsilon {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.approx_eq_with(other, epsilon, 0.0)
    }
}

impl fmt::Display for Pseudoscalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} * I{}", self.value, self.ndim)
    }
}
