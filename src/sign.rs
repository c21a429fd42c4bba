//! Simple `Sign` type.

use std::fmt;
use std::ops::{Mul, MulAssign, Neg};

use num_traits::Signed;

/// Positive or negative.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Positive
    #[default]
    Pos = 0,
    /// Negative
    Neg = 1,
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Pos => write!(f, "+"),
            Sign::Neg => write!(f, "-"),
        }
    }
}

impl Neg for Sign {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Sign::Pos => Sign::Neg,
            Sign::Neg => Sign::Pos,
        }
    }
}

impl<T: Signed> From<T> for Sign {
    fn from(value: T) -> Self {
        match value.signum().is_negative() {
            true => Sign::Neg,
            false => Sign::Pos,
        }
    }
}

#[allow(missing_docs)]
impl Sign {
    pub fn to_num<T: Signed>(self) -> T {
        match self {
            Sign::Pos => T::one(),
            Sign::Neg => -T::one(),
        }
    }
}

/// Implements `Mul<Sign>` for a type with a `Neg` impl.
#[macro_export]
macro_rules! impl_mul_sign {
    (impl $($tok:tt)*) => {
        impl $($tok)* {
            type Output = Self;

            fn mul(self, rhs: $crate::Sign) -> Self {
                match rhs {
                    $crate::Sign::Pos => self,
                    $crate::Sign::Neg => -self,
                }
            }
        }
    };
}
/// Implements `MulAssign<Sign>` for a type. See [`impl_mul_sign`].
#[macro_export]
macro_rules! impl_mulassign_sign {
    (impl $($tok:tt)*) => {
        impl $($tok)* {
            fn mul_assign(&mut self, rhs: $crate::Sign) {
                match rhs {
                    $crate::Sign::Pos => (),
                    $crate::Sign::Neg => *self = -self.clone(),
                }
            }
        }
    };
}

impl_mul_sign!(impl Mul<Sign> for Sign);
impl_mulassign_sign!(impl MulAssign<Sign> for Sign);

impl_mul_sign!(impl Mul<Sign> for f32);
impl_mulassign_sign!(impl MulAssign<Sign> for f32);
impl_mul_sign!(impl Mul<Sign> for f64);
impl_mulassign_sign!(impl MulAssign<Sign> for f64);
