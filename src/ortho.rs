//! Gram–Schmidt orthonormalization and orthogonal complements.
//!
//! These are the only linear-algebra primitives the blade algebra needs:
//! factoring a set of spanning vectors into an orthonormal basis (recording
//! the pivot magnitudes, whose product is the spanned volume), rejecting a
//! vector from a subspace, and extending a basis to an orthonormal basis of a
//! containing subspace.

use float_ord::FloatOrd;

use crate::{Float, Vector};

/// Orthonormalizes `cols` (padded to `ndim`) by modified Gram–Schmidt.
///
/// Returns the orthonormal columns together with the product of the pivot
/// magnitudes, which equals the unsigned volume of the parallelepiped spanned
/// by the input columns. Returns `None` if any pivot falls below `atol`,
/// i.e. the input columns are (numerically) linearly dependent.
pub fn orthonormalize(
    ndim: u8,
    cols: &[Vector],
    atol: Float,
) -> Option<(Vec<Vector>, Float)> {
    let mut basis: Vec<Vector> = Vec::with_capacity(cols.len());
    let mut volume = 1.0;
    for col in cols {
        let residual = reject(&col.pad(ndim), &basis);
        let pivot = residual.mag();
        if !(pivot > atol) {
            return None;
        }
        volume *= pivot;
        basis.push(residual / pivot);
    }
    Some((basis, volume))
}

/// Returns the component of `v` orthogonal to the subspace spanned by
/// `basis`, which must be orthonormal.
pub fn reject(v: &Vector, basis: &[Vector]) -> Vector {
    let mut ret = v.clone();
    for b in basis {
        ret = ret - b * v.dot(b);
    }
    ret
}

/// Returns the magnitude of the component of `v` orthogonal to the subspace
/// spanned by `basis`.
pub fn rejection_mag(v: &Vector, basis: &[Vector]) -> Float {
    reject(v, basis).mag()
}

/// Extends the orthonormal set `inner` to an orthonormal basis of the
/// subspace spanned by `inner` together with the orthonormal set `outer`,
/// returning only the `count` new columns.
///
/// Candidates are drawn from `outer` greedily by largest rejection, so the
/// result is numerically well-conditioned whenever `span(inner) ⊆
/// span(outer)` and `count == outer.len() - inner.len()`.
pub fn complement_within(inner: &[Vector], outer: &[Vector], count: usize) -> Vec<Vector> {
    let mut acc = inner.to_vec();
    let mut ret = Vec::with_capacity(count);
    while ret.len() < count {
        let candidate = outer
            .iter()
            .map(|v| reject(v, &acc))
            .max_by_key(|residual| FloatOrd(residual.mag2()));
        let Some(u) = candidate.and_then(|residual| residual.normalize()) else {
            break;
        };
        acc.push(u.clone());
        ret.push(u);
    }
    if ret.len() != count {
        debug_panic!(
            "orthogonal complement has {} columns where {count} were expected",
            ret.len(),
        );
    }
    ret
}

/// Extends the orthonormal set `basis` to a full orthonormal basis of
/// `ndim`-dimensional space, returning only the new columns.
pub fn complement(ndim: u8, basis: &[Vector]) -> Vec<Vector> {
    complement_within(basis, &standard_basis(ndim), ndim as usize - basis.len())
}

/// Returns the standard basis of `ndim`-dimensional space.
pub fn standard_basis(ndim: u8) -> Vec<Vector> {
    (0..ndim).map(|i| Vector::unit(i).pad(ndim)).collect()
}

/// Returns the coordinates of `v` in the orthonormal set `basis`.
pub fn coords_in(v: &Vector, basis: &[Vector]) -> Vector {
    basis.iter().map(|b| v.dot(b)).collect()
}
