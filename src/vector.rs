//! N-dimensional vector math.

use std::fmt;
use std::iter::Sum;
use std::ops::*;

use itertools::Itertools;
use smallvec::SmallVec;

use crate::approx_cmp::is_approx_nonzero;
use crate::Float;

/// Constructs an N-dimensional vector, using the same syntax as `vec![]`.
#[macro_export]
macro_rules! vector {
    [$($tok:tt)*] => {
        $crate::Vector($crate::smallvec::smallvec![$($tok)*])
    };
}

/// N-dimensional vector. Indexing out of bounds returns zero.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Vector(pub SmallVec<[Float; 4]>);

impl Vector {
    /// Zero-dimensional empty vector.
    pub const EMPTY: Self = Self(SmallVec::new_const());

    /// Returns a zero vector.
    pub fn zero(ndim: u8) -> Self {
        vector![0.0; ndim as usize]
    }
    /// Returns a unit vector along an axis.
    pub fn unit(axis: u8) -> Self {
        let mut ret = vector![0.0; axis as usize + 1];
        ret[axis] = 1.0;
        ret
    }

    /// Returns the number of components in the vector.
    pub fn ndim(&self) -> u8 {
        self.0.len() as _
    }
    /// Returns a component of the vector. If the index is out of bounds,
    /// returns zero.
    pub fn get(&self, idx: u8) -> Float {
        self.0.get(idx as usize).copied().unwrap_or(0.0)
    }

    /// Returns an iterator over the components of the vector, padded to
    /// `ndim`.
    pub fn iter_ndim(&self, ndim: u8) -> impl '_ + Iterator<Item = Float> {
        (0..ndim).map(|i| self.get(i))
    }
    /// Returns an iterator over the components of the vector.
    pub fn iter(&self) -> impl '_ + Iterator<Item = Float> {
        self.0.iter().copied()
    }

    /// Pads the vector with zeros up to `ndim`.
    #[must_use]
    pub fn pad(&self, ndim: u8) -> Vector {
        self.iter().pad_using(ndim as usize, |_| 0.0).collect()
    }

    /// Returns the dot product of this vector with another.
    pub fn dot(&self, rhs: &Vector) -> Float {
        std::iter::zip(self.iter(), rhs.iter())
            .map(|(l, r)| l * r)
            .sum()
    }

    /// Returns the squared magnitude of the vector.
    pub fn mag2(&self) -> Float {
        self.dot(self)
    }
    /// Returns the magnitude of the vector.
    pub fn mag(&self) -> Float {
        self.mag2().sqrt()
    }

    /// Returns a normalized copy of the vector, or `None` if the vector is
    /// zero (or too close to it).
    #[must_use]
    pub fn normalize(&self) -> Option<Vector> {
        crate::util::try_div(self, self.mag())
    }

    /// Returns whether the vector is approximately zero.
    pub fn is_approx_zero(&self) -> bool {
        !self.iter().any(|x| is_approx_nonzero(&x))
    }

    /// Returns an iterator over two vectors, both padded to the same length.
    pub fn zip<'a>(
        a: &'a Vector,
        b: &'a Vector,
    ) -> impl 'a + Iterator<Item = (Float, Float)> {
        let ndim = std::cmp::max(a.ndim(), b.ndim());
        std::iter::zip(a.iter_ndim(ndim), b.iter_ndim(ndim))
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.iter().join(", "))
    }
}

impl Index<u8> for Vector {
    type Output = Float;

    fn index(&self, index: u8) -> &Self::Output {
        &self.0[index as usize]
    }
}
impl IndexMut<u8> for Vector {
    fn index_mut(&mut self, index: u8) -> &mut Self::Output {
        &mut self.0[index as usize]
    }
}

impl Add<&Vector> for &Vector {
    type Output = Vector;

    fn add(self, rhs: &Vector) -> Self::Output {
        Vector::zip(self, rhs).map(|(l, r)| l + r).collect()
    }
}
impl Sub<&Vector> for &Vector {
    type Output = Vector;

    fn sub(self, rhs: &Vector) -> Self::Output {
        Vector::zip(self, rhs).map(|(l, r)| l - r).collect()
    }
}
impl_forward_bin_ops_to_ref! {
    impl Add for Vector { fn add() }
    impl Sub for Vector { fn sub() }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        self.iter().map(|x| -x).collect()
    }
}
impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Mul<Float> for &Vector {
    type Output = Vector;

    fn mul(self, rhs: Float) -> Self::Output {
        self.iter().map(|x| x * rhs).collect()
    }
}
impl Mul<Float> for Vector {
    type Output = Vector;

    fn mul(self, rhs: Float) -> Self::Output {
        &self * rhs
    }
}
impl Div<Float> for &Vector {
    type Output = Vector;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, rhs: Float) -> Self::Output {
        self * (1.0 / rhs)
    }
}
impl Div<Float> for Vector {
    type Output = Vector;

    fn div(self, rhs: Float) -> Self::Output {
        &self / rhs
    }
}

impl AddAssign<&Vector> for Vector {
    fn add_assign(&mut self, rhs: &Vector) {
        let ndim = std::cmp::max(self.ndim(), rhs.ndim());
        self.0.resize(ndim as usize, 0.0);
        for i in 0..rhs.ndim() {
            self[i] += rhs.get(i);
        }
    }
}

impl FromIterator<Float> for Vector {
    fn from_iter<T: IntoIterator<Item = Float>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Sum<Vector> for Vector {
    fn sum<I: Iterator<Item = Vector>>(iter: I) -> Self {
        let mut ret = Self::EMPTY;
        for v in iter {
            ret += &v;
        }
        ret
    }
}

impl approx::AbsDiffEq for Vector {
    type Epsilon = Float;

    fn default_epsilon() -> Self::Epsilon {
        crate::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        Vector::zip(self, other).all(|(l, r)| (l - r).abs() <= epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_add() {
        let v1 = vector![1.0, 2.0, -10.0];
        let v2 = vector![-5.0];
        assert_eq!(&v1 + &v2, vector![-4.0, 2.0, -10.0]);
        assert_eq!(v2 + v1, vector![-4.0, 2.0, -10.0]);
    }

    #[test]
    fn test_vector_sub() {
        let v1 = vector![1.0, 2.0, -10.0];
        let v2 = vector![-5.0];
        assert_eq!(&v1 - &v2, vector![6.0, 2.0, -10.0]);
        assert_eq!(v2 - &v1, vector![-6.0, -2.0, 10.0]);
    }

    #[test]
    fn test_dot_product() {
        let v1 = vector![1.0, 2.0, -10.0];
        let v2 = vector![-5.0, 16.0];
        assert_eq!(v1.dot(&v2), 27.0);
    }

    #[test]
    fn test_normalize() {
        assert_approx_eq!(
            vector![3.0, 4.0].normalize().unwrap(),
            vector![0.6, 0.8],
        );
        assert_eq!(Vector::zero(3).normalize(), None);
    }
}
