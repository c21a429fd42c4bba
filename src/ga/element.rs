//! Sum type over every shape a blade computation can produce.

use std::fmt;
use std::ops::{Add, BitXor, Mul, Neg, Shl, Shr, Sub};

use super::{Blade, Error, Multivector, Pseudoscalar};
use crate::approx_cmp::num_eq;
use crate::{Float, Sign, Vector, EPSILON};

/// Blade, multivector, or degenerate value.
///
/// Scalars have no ambient dimension, so the grade-0 elements `Zero`, `One`,
/// and `Scalar` compose with elements of any dimension. The factory methods
/// on [`Blade`], [`Pseudoscalar`], and [`Multivector`] all return `Element`
/// and canonicalize: exact `0.0` is always `Zero`, exact `1.0` is always
/// `One`, a full-grade blade is always a `Pseudoscalar`, and a multivector
/// never has fewer than two terms.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Additive identity.
    Zero,
    /// Multiplicative identity.
    One,
    /// Nonzero grade-0 element with no ambient dimension.
    Scalar(Float),
    /// Grade-k subspace with `0 < k < ndim`.
    Blade(Blade),
    /// Grade-n element of n-dimensional space.
    Pseudoscalar(Pseudoscalar),
    /// Sum of elements of more than one distinct subspace.
    Multivector(Multivector),
}

impl Element {
    /// Constructs a grade-0 element, canonicalizing exact zero and one.
    pub fn scalar(value: Float) -> Element {
        if value == 0.0 {
            Element::Zero
        } else if value == 1.0 {
            Element::One
        } else {
            Element::Scalar(value)
        }
    }

    /// Returns the ambient dimension, or `None` for grade-0 elements, which
    /// live in every dimension.
    pub fn ndim(&self) -> Option<u8> {
        match self {
            Element::Zero | Element::One | Element::Scalar(_) => None,
            Element::Blade(blade) => Some(blade.ndim()),
            Element::Pseudoscalar(pseudo) => Some(pseudo.ndim()),
            Element::Multivector(multivector) => Some(multivector.ndim()),
        }
    }

    /// Returns the grade, or `None` for `Zero` and for multivectors, which
    /// mix grades.
    pub fn grade(&self) -> Option<u8> {
        match self {
            Element::Zero | Element::Multivector(_) => None,
            Element::One | Element::Scalar(_) => Some(0),
            Element::Blade(blade) => Some(blade.grade()),
            Element::Pseudoscalar(pseudo) => Some(pseudo.ndim()),
        }
    }

    /// Returns the norm of the element.
    pub fn norm(&self) -> Float {
        match self {
            Element::Zero => 0.0,
            Element::One => 1.0,
            Element::Scalar(value) => value.abs(),
            Element::Blade(blade) => blade.norm(),
            Element::Pseudoscalar(pseudo) => pseudo.norm(),
            Element::Multivector(multivector) => multivector.norm(),
        }
    }

    /// Returns the additive identity.
    pub fn zero_like(&self) -> Element {
        Element::Zero
    }
    /// Returns the multiplicative identity.
    pub fn one_like(&self) -> Element {
        Element::One
    }

    /// Returns the element scaled by `factor`.
    pub fn scaled(&self, factor: Float) -> Element {
        match self {
            Element::Zero => Element::Zero,
            Element::One => Element::scalar(factor),
            Element::Scalar(value) => Element::scalar(value * factor),
            Element::Blade(blade) => blade.scaled(factor),
            Element::Pseudoscalar(pseudo) => pseudo.scaled(factor),
            Element::Multivector(multivector) => multivector.scaled(factor),
        }
    }

    /// Returns the reverse of the element, which flips the sign of each
    /// grade-k part with k mod 4 equal to 2 or 3.
    #[must_use]
    pub fn reverse(&self) -> Element {
        match self {
            Element::Zero | Element::One | Element::Scalar(_) => self.clone(),
            Element::Blade(blade) => blade.reverse().into(),
            Element::Pseudoscalar(pseudo) => pseudo.reverse().into(),
            Element::Multivector(multivector) => multivector.reverse().into(),
        }
    }

    /// Returns the inverse of the element with respect to the dot product.
    ///
    /// Multivectors and zero have no inverse here.
    pub fn inverse(&self) -> Result<Element, Error> {
        match self {
            Element::Zero => Err(Error::Undefined("inverse of zero")),
            Element::One => Ok(Element::One),
            Element::Scalar(value) => Ok(Element::scalar(1.0 / value)),
            Element::Blade(blade) => Ok(blade.inverse().into()),
            Element::Pseudoscalar(pseudo) => Ok(pseudo.inverse().into()),
            Element::Multivector(_) => Err(Error::Undefined("inverse of multivector")),
        }
    }

    /// Returns whether the two elements are approximately equal under the
    /// tolerances `atol` and `rtol`.
    ///
    /// `Zero` never approximately equals a `Scalar` or `One`, because a
    /// scalar is nonzero by construction; it does approximately equal a blade
    /// or pseudoscalar whose norm is within tolerance of zero, since blade
    /// arithmetic can leave such residues.
    pub fn approx_eq_with(&self, other: &Element, atol: Float, rtol: Float) -> bool {
        match (self, other) {
            (Element::Zero, Element::Zero) | (Element::One, Element::One) => true,
            (Element::One, Element::Scalar(v)) | (Element::Scalar(v), Element::One) => {
                num_eq(*v, 1.0, atol, rtol)
            }
            (Element::Scalar(l), Element::Scalar(r)) => num_eq(*l, *r, atol, rtol),

            (Element::Zero, Element::Blade(b)) | (Element::Blade(b), Element::Zero) => {
                num_eq(b.norm(), 0.0, atol, rtol)
            }
            (Element::Zero, Element::Pseudoscalar(p))
            | (Element::Pseudoscalar(p), Element::Zero) => num_eq(p.norm(), 0.0, atol, rtol),
            (Element::Zero, Element::Multivector(m))
            | (Element::Multivector(m), Element::Zero) => num_eq(m.norm(), 0.0, atol, rtol),

            (Element::Blade(l), Element::Blade(r)) => l.approx_eq_with(r, atol, rtol),
            (Element::Pseudoscalar(l), Element::Pseudoscalar(r)) => {
                l.approx_eq_with(r, atol, rtol)
            }
            (Element::Multivector(l), Element::Multivector(r)) => {
                l.approx_eq_with(r, atol, rtol)
            }

            _ => false,
        }
    }
}

impl From<Float> for Element {
    fn from(value: Float) -> Self {
        Element::scalar(value)
    }
}
impl From<Vector> for Element {
    /// Converts a vector to a grade-1 element of `v.ndim()`-dimensional
    /// space.
    fn from(v: Vector) -> Self {
        let ndim = v.ndim();
        Blade::new(ndim, [v])
    }
}

impl Neg for &Element {
    type Output = Element;

    fn neg(self) -> Self::Output {
        match self {
            Element::Zero => Element::Zero,
            Element::One => Element::Scalar(-1.0),
            Element::Scalar(value) => Element::scalar(-value),
            Element::Blade(blade) => Element::Blade(-blade.clone()),
            Element::Pseudoscalar(pseudo) => Element::Pseudoscalar(-*pseudo),
            Element::Multivector(multivector) => Element::Multivector(-multivector.clone()),
        }
    }
}
impl Neg for Element {
    type Output = Element;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Mul<Float> for &Element {
    type Output = Element;

    fn mul(self, rhs: Float) -> Self::Output {
        self.scaled(rhs)
    }
}
impl Mul<Float> for Element {
    type Output = Element;

    fn mul(self, rhs: Float) -> Self::Output {
        self.scaled(rhs)
    }
}
impl Mul<Sign> for Element {
    type Output = Element;

    fn mul(self, rhs: Sign) -> Self::Output {
        match rhs {
            Sign::Pos => self,
            Sign::Neg => -self,
        }
    }
}

impl Add<&Element> for &Element {
    type Output = Result<Element, Error>;

    fn add(self, rhs: &Element) -> Self::Output {
        Multivector::new([self.clone(), rhs.clone()])
    }
}
impl Sub<&Element> for &Element {
    type Output = Result<Element, Error>;

    fn sub(self, rhs: &Element) -> Self::Output {
        Multivector::new([self.clone(), -rhs])
    }
}
impl_forward_bin_ops_to_ref! {
    impl Add<Element> for Element { fn add() -> Result<Element, Error> }
    impl Sub<Element> for Element { fn sub() -> Result<Element, Error> }
}

impl BitXor<&Element> for &Element {
    type Output = Result<Element, Error>;

    fn bitxor(self, rhs: &Element) -> Self::Output {
        self.wedge(rhs)
    }
}
impl Shl<&Element> for &Element {
    type Output = Result<Element, Error>;

    fn shl(self, rhs: &Element) -> Self::Output {
        self.contract_left(rhs)
    }
}
impl Shr<&Element> for &Element {
    type Output = Result<Element, Error>;

    fn shr(self, rhs: &Element) -> Self::Output {
        self.contract_right(rhs)
    }
}
impl_forward_bin_ops_to_ref! {
    impl BitXor<Element> for Element { fn bitxor() -> Result<Element, Error> }
    impl Shl<Element> for Element { fn shl() -> Result<Element, Error> }
    impl Shr<Element> for Element { fn shr() -> Result<Element, Error> }
}

impl approx::AbsDiffEq for Element {
    type Epsilon = Float;

    fn default_epsilon() -> Self::Epsilon {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.approx_eq_with(other, epsilon, 0.0)
    }
}
impl approx::RelativeEq for Element {
    fn default_max_relative() -> Self::Epsilon {
        EPSILON
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.approx_eq_with(other, epsilon, max_relative)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Zero => write!(f, "0"),
            Element::One => write!(f, "1"),
            Element::Scalar(value) => write!(f, "{value}"),
            Element::Blade(blade) => write!(f, "{blade}"),
            Element::Pseudoscalar(pseudo) => write!(f, "{pseudo}"),
            Element::Multivector(multivector) => write!(f, "{multivector}"),
        }
    }
}
