//! Blades of grade strictly between 0 and the ambient dimension.

use std::fmt;
use std::ops::{Mul, Neg};
use std::sync::Arc;

use itertools::Itertools;

use super::{reverse_sign, Element, Pseudoscalar};
use crate::approx_cmp::num_eq;
use crate::{impl_mul_sign, ortho, Float, Matrix, Sign, Vector, EPSILON};

/// Oriented k-dimensional subspace of an n-dimensional space, weighted by a
/// positive volume.
///
/// Invariants: `0 < grade < ndim`, the basis columns are orthonormal, and the
/// norm is strictly positive. Degenerate inputs never produce a `Blade`; the
/// factory methods return [`Element::Zero`], a scalar, or a pseudoscalar
/// instead. The orientation is the orientation of the basis columns, flipped
/// if the sign is negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Blade {
    ndim: u8,
    basis: Arc<[Vector]>,
    norm: Float,
    sign: Sign,
}

impl Blade {
    /// Constructs the blade spanned by `vecs` in `ndim`-dimensional space.
    ///
    /// Returns [`Element::Zero`] if the vectors are linearly dependent (or
    /// nearly so), if there are no vectors, or if there are more vectors than
    /// dimensions. Returns a pseudoscalar if the vectors fill the space.
    pub fn new(ndim: u8, vecs: impl IntoIterator<Item = Vector>) -> Element {
        let vecs = vecs.into_iter().collect_vec();
        if vecs.is_empty() || vecs.len() > ndim as usize {
            return Element::Zero;
        }
        match ortho::orthonormalize(ndim, &vecs, EPSILON) {
            Some((basis, volume)) => Self::assemble(ndim, basis, volume, Sign::Pos),
            None => Element::Zero,
        }
    }

    /// Constructs an element from an orthonormal basis and a signed weight,
    /// canonicalizing by grade.
    ///
    /// Grade 0 becomes a scalar, grade `ndim` becomes a pseudoscalar (picking
    /// up the orientation of `basis` relative to the standard basis), and a
    /// weight of approximately zero becomes [`Element::Zero`].
    pub(super) fn assemble(
        ndim: u8,
        basis: Vec<Vector>,
        norm: Float,
        sign: Sign,
    ) -> Element {
        if !(norm.abs() > EPSILON) {
            return Element::Zero;
        }
        if basis.is_empty() {
            return Element::scalar(norm * sign);
        }
        if basis.len() == ndim as usize {
            let orientation = Sign::from(Matrix::from_cols(basis).determinant());
            return Pseudoscalar::new(ndim, norm * sign * orientation);
        }
        Self {
            ndim,
            basis: basis.into(),
            norm,
            sign,
        }
        .into()
    }

    /// Returns the ambient dimension of the blade.
    pub fn ndim(&self) -> u8 {
        self.ndim
    }
    /// Returns the grade of the blade, which is the dimension of its
    /// subspace.
    pub fn grade(&self) -> u8 {
        self.basis.len() as u8
    }
    /// Returns the positive weight of the blade.
    pub fn norm(&self) -> Float {
        self.norm
    }
    /// Returns the sign of the blade relative to its basis orientation.
    pub fn sign(&self) -> Sign {
        self.sign
    }
    /// Returns the signed volume of the blade.
    pub fn volume(&self) -> Float {
        self.norm * self.sign
    }
    /// Returns the orthonormal basis spanning the blade's subspace.
    ///
    /// Clones of the blade share this basis; see [`Blade::deep_copy`].
    pub fn basis(&self) -> &[Vector] {
        &self.basis
    }

    /// Returns a copy of the blade whose basis does not share storage with
    /// this one.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        Self {
            basis: self.basis.iter().cloned().collect(),
            ..self.clone()
        }
    }

    /// Returns the blade with the same subspace and orientation but norm 1.
    #[must_use]
    pub fn unit(&self) -> Self {
        Self {
            norm: 1.0,
            ..self.clone()
        }
    }

    /// Returns the blade scaled by `factor`, which may flip its orientation
    /// or annihilate it.
    pub fn scaled(&self, factor: Float) -> Element {
        self.with_volume(self.volume() * factor)
    }

    /// Returns the blade with the same subspace but signed volume `volume`.
    pub(super) fn with_volume(&self, volume: Float) -> Element {
        if !(volume.abs() > EPSILON) {
            return Element::Zero;
        }
        Self {
            norm: volume.abs(),
            sign: Sign::from(volume),
            ..self.clone()
        }
        .into()
    }

    /// Returns the reverse of the blade, which has its factors in the
    /// opposite order.
    #[must_use]
    pub fn reverse(&self) -> Self {
        self.clone() * reverse_sign(self.grade())
    }

    /// Returns the inverse of the blade with respect to the dot product.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            norm: 1.0 / self.norm,
            ..self.reverse()
        }
    }

    /// Returns whether every basis vector of `other` lies in this blade's
    /// subspace, within `atol + rtol` of rejection.
    pub fn contains(&self, other: &Blade, atol: Float, rtol: Float) -> bool {
        other
            .basis
            .iter()
            .all(|v| ortho::rejection_mag(v, &self.basis) <= atol + rtol)
    }

    /// Returns the sign of `other`'s basis orientation relative to this
    /// blade's, assuming the two span the same subspace.
    pub(super) fn relative_orientation(&self, other: &Blade) -> Sign {
        let coords = other.basis.iter().map(|v| ortho::coords_in(v, &self.basis));
        Sign::from(Matrix::from_cols(coords.collect_vec()).determinant())
    }

    /// Returns whether the two blades are approximately equal as oriented
    /// weighted subspaces, regardless of the bases chosen to represent them.
    pub fn approx_eq_with(&self, other: &Blade, atol: Float, rtol: Float) -> bool {
        self.ndim == other.ndim
            && self.grade() == other.grade()
            && self.contains(other, atol, rtol)
            && other.contains(self, atol, rtol)
            && num_eq(
                other.volume(),
                self.volume() * self.relative_orientation(other),
                atol,
                rtol,
            )
    }
}

impl From<Blade> for Element {
    fn from(blade: Blade) -> Self {
        Element::Blade(blade)
    }
}

impl Neg for Blade {
    type Output = Blade;

    fn neg(self) -> Self::Output {
        Self {
            sign: -self.sign,
            ..self
        }
    }
}
impl_mul_sign!(impl Mul<Sign> for Blade);

impl approx::AbsDiffEq for Blade {
    type Epsilon = Float;

    fn default_epsilon() -> Self::Epsilon {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.approx_eq_with(other, epsilon, 0.0)
    }
}

impl fmt::Display for Blade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} * {}",
            self.volume(),
            self.basis.iter().join(" ^ "),
        )
    }
}
