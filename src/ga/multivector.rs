//! Sums of blades of distinct subspaces.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Neg;

use itertools::Itertools;

use super::{common_ndim, reverse_sign, Blade, Element, Error, Pseudoscalar};
use crate::approx_cmp::num_eq;
use crate::{Float, Vector, EPSILON};

/// Sum of more than one term of distinct subspaces, bucketed by grade.
///
/// The grade-0 and grade-n parts are bare numbers; everything in between is a
/// list of blades per grade. Construction via [`Multivector::new`] reduces
/// the input so that no two stored blades of the same grade share a subspace
/// and every stored term is nonzero, which is what makes a one-term or
/// zero-term result collapse to a simpler [`Element`].
#[derive(Debug, Clone, PartialEq)]
pub struct Multivector {
    ndim: u8,
    scalar: Float,
    blades: BTreeMap<u8, Vec<Blade>>,
    pseudo: Float,
    norm: Float,
}

impl Multivector {
    /// Sums `terms`, combining terms of the same subspace and canonicalizing
    /// the result.
    ///
    /// Returns an error if two terms live in spaces of different dimensions.
    /// Grade-0 terms have no dimension and mix with anything.
    pub fn new(terms: impl IntoIterator<Item = Element>) -> Result<Element, Error> {
        let mut ndim: Option<u8> = None;
        let mut scalar = 0.0;
        let mut vec_sum = Vector::EMPTY;
        let mut blades: BTreeMap<u8, Vec<Blade>> = BTreeMap::new();
        let mut pseudo = 0.0;

        let mut stack = terms.into_iter().collect_vec();
        while let Some(term) = stack.pop() {
            match term {
                Element::Zero => (),
                Element::One => scalar += 1.0,
                Element::Scalar(value) => scalar += value,
                Element::Blade(blade) => {
                    ndim = common_ndim(ndim, Some(blade.ndim()))?;
                    if blade.grade() == 1 {
                        vec_sum += &(&blade.basis()[0] * blade.volume());
                    } else {
                        merge_blade(blades.entry(blade.grade()).or_default(), blade);
                    }
                }
                Element::Pseudoscalar(p) => {
                    ndim = common_ndim(ndim, Some(p.ndim()))?;
                    pseudo += p.value();
                }
                Element::Multivector(m) => {
                    ndim = common_ndim(ndim, Some(m.ndim()))?;
                    stack.extend(m.terms());
                }
            }
        }

        let Some(ndim) = ndim else {
            // only grade-0 terms
            return Ok(Element::scalar(scalar));
        };

        if !vec_sum.is_approx_zero() {
            match Blade::new(ndim, [vec_sum]) {
                Element::Blade(blade) => blades.entry(1).or_default().push(blade),
                Element::Pseudoscalar(p) => pseudo += p.value(), // only when ndim == 1
                _ => (),
            }
        }
        blades.retain(|_, bucket| !bucket.is_empty());

        let term_count = (scalar != 0.0) as usize
            + blades.values().map(|bucket| bucket.len()).sum::<usize>()
            + (pseudo != 0.0) as usize;
        match term_count {
            0 => Ok(Element::Zero),
            1 if scalar != 0.0 => Ok(Element::scalar(scalar)),
            1 if pseudo != 0.0 => Ok(Pseudoscalar::new(ndim, pseudo)),
            1 => match blades.into_values().flatten().next() {
                Some(blade) => Ok(Element::Blade(blade)),
                None => Ok(Element::Zero),
            },
            _ => {
                let norm2 = scalar * scalar
                    + blades
                        .values()
                        .flatten()
                        .map(|b| b.norm() * b.norm())
                        .sum::<Float>()
                    + pseudo * pseudo;
                Ok(Element::Multivector(Self {
                    ndim,
                    scalar,
                    blades,
                    pseudo,
                    norm: norm2.sqrt(),
                }))
            }
        }
    }

    /// Returns the ambient dimension of the multivector.
    pub fn ndim(&self) -> u8 {
        self.ndim
    }
    /// Returns the norm of the multivector, which is the square root of the
    /// sum of the squared norms of its terms.
    pub fn norm(&self) -> Float {
        self.norm
    }

    /// Returns the grades with a nonzero part, in ascending order.
    pub fn grades(&self) -> Vec<u8> {
        let mut ret = Vec::new();
        if self.scalar != 0.0 {
            ret.push(0);
        }
        ret.extend(self.blades.keys().copied());
        if self.pseudo != 0.0 {
            ret.push(self.ndim);
        }
        ret
    }

    /// Returns the grade-`grade` part of the multivector.
    pub fn grade_part(&self, grade: u8) -> Element {
        if grade == 0 {
            return Element::scalar(self.scalar);
        }
        if grade == self.ndim {
            return Pseudoscalar::new(self.ndim, self.pseudo);
        }
        match self.blades.get(&grade).map_or(&[] as &[Blade], |v| v) {
            [] => Element::Zero,
            [blade] => blade.clone().into(),
            bucket => {
                let norm2 = bucket.iter().map(|b| b.norm() * b.norm()).sum::<Float>();
                Element::Multivector(Self {
                    ndim: self.ndim,
                    scalar: 0.0,
                    blades: [(grade, bucket.to_vec())].into_iter().collect(),
                    pseudo: 0.0,
                    norm: norm2.sqrt(),
                })
            }
        }
    }

    /// Returns the terms of the multivector in ascending grade order.
    pub fn terms(&self) -> Vec<Element> {
        let mut ret = Vec::new();
        if self.scalar != 0.0 {
            ret.push(Element::scalar(self.scalar));
        }
        ret.extend(self.blades.values().flatten().cloned().map(Element::Blade));
        if self.pseudo != 0.0 {
            ret.push(Pseudoscalar::new(self.ndim, self.pseudo));
        }
        ret
    }

    /// Returns the multivector scaled by `factor`.
    pub fn scaled(&self, factor: Float) -> Element {
        let terms = self.terms().into_iter().map(|t| t.scaled(factor));
        match Self::new(terms) {
            Ok(elem) => elem,
            Err(e) => {
                debug_panic!("scaling produced {e}");
                Element::Zero
            }
        }
    }

    /// Returns the reverse of the multivector, which flips the sign of each
    /// grade-k part with k mod 4 equal to 2 or 3.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self {
            blades: self
                .blades
                .iter()
                .map(|(&g, bucket)| (g, bucket.iter().map(Blade::reverse).collect()))
                .collect(),
            pseudo: self.pseudo * reverse_sign(self.ndim),
            ..self.clone()
        }
    }

    /// Returns whether the two multivectors are approximately equal
    /// grade-by-grade.
    pub fn approx_eq_with(&self, other: &Multivector, atol: Float, rtol: Float) -> bool {
        self.ndim == other.ndim
            && num_eq(self.scalar, other.scalar, atol, rtol)
            && num_eq(self.pseudo, other.pseudo, atol, rtol)
            && self.blades.keys().chain(other.blades.keys()).all(|g| {
                let l = self.blades.get(g).map_or(&[] as &[Blade], |v| v);
                let r = other.blades.get(g).map_or(&[] as &[Blade], |v| v);
                buckets_approx_eq(l, r, atol, rtol)
            })
    }
}

/// Adds `blade` into `bucket`, combining it with an existing blade of the
/// same subspace if there is one.
fn merge_blade(bucket: &mut Vec<Blade>, blade: Blade) {
    let same_span = bucket.iter().position(|b| {
        b.contains(&blade, EPSILON, 0.0) && blade.contains(b, EPSILON, 0.0)
    });
    match same_span {
        None => bucket.push(blade),
        Some(i) => {
            let combined = bucket[i].volume()
                + blade.volume() * bucket[i].relative_orientation(&blade);
            match bucket[i].with_volume(combined) {
                Element::Blade(b) => bucket[i] = b,
                _ => {
                    bucket.swap_remove(i);
                }
            }
        }
    }
}

/// Returns whether two same-grade blade lists match pairwise, in any order.
fn buckets_approx_eq(l: &[Blade], r: &[Blade], atol: Float, rtol: Float) -> bool {
    if l.len() != r.len() {
        return false;
    }
    let mut unmatched: Vec<&Blade> = r.iter().collect();
    for blade in l {
        match unmatched.iter().position(|&b| blade.approx_eq_with(b, atol, rtol)) {
            Some(i) => {
                unmatched.swap_remove(i);
            }
            None => return false,
        }
    }
    true
}

impl From<Multivector> for Element {
    fn from(multivector: Multivector) -> Self {
        Element::Multivector(multivector)
    }
}

impl Neg for Multivector {
    type Output = Multivector;

    fn neg(self) -> Self::Output {
        Self {
            scalar: -self.scalar,
            blades: self
                .blades
                .iter()
                .map(|(&g, bucket)| (g, bucket.iter().map(|b| -b.clone()).collect()))
                .collect(),
            pseudo: -self.pseudo,
            ..self
        }
    }
}

impl approx::AbsDiffEq for Multivector {
    type Epsilon = Float;

    fn default_epsilon() -> Self::Epsilon {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.approx_eq_with(other, epsilon, 0.0)
    }
}

impl fmt::Display for Multivector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.terms().iter().join(" + "))
    }
}
