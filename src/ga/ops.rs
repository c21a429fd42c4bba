//! Products, contractions, duals, and projections.
//!
//! Every operation here follows the same plan: peel off the degenerate cases
//! (zero, grade-0 elements, multivectors, which distribute term by term),
//! then hand the two remaining blade-like operands to a worker that computes
//! with orthonormal columns and a signed volume. The workers produce a basis
//! for the result's subspace plus a volume, and [`Blade::assemble`]
//! re-canonicalizes by grade.

use itertools::Itertools;

use super::{common_ndim, reverse_sign, Blade, Element, Error, Multivector, Pseudoscalar};
use crate::{ortho, Float, Matrix, Sign, Vector, EPSILON};

/// Orthonormal factorization of a blade or pseudoscalar: `ndim`-dimensional
/// ambient space, orthonormal spanning columns, and a signed volume.
struct Factors {
    ndim: u8,
    cols: Vec<Vector>,
    volume: Float,
}
impl Factors {
    fn of(elem: &Element) -> Option<Factors> {
        match elem {
            Element::Blade(b) => Some(Self {
                ndim: b.ndim(),
                cols: b.basis().to_vec(),
                volume: b.volume(),
            }),
            Element::Pseudoscalar(p) => Some(Self {
                ndim: p.ndim(),
                cols: ortho::standard_basis(p.ndim()),
                volume: p.value(),
            }),
            _ => None,
        }
    }

    fn grade(&self) -> u8 {
        self.cols.len() as u8
    }
}

/// Projects each of `cols` orthogonally onto the subspace spanned by the
/// orthonormal set `span`.
fn project_cols(cols: &[Vector], span: &[Vector]) -> Vec<Vector> {
    cols.iter()
        .map(|v| span.iter().map(|c| c * v.dot(c)).sum())
        .collect()
}

/// Sign of the orientation of the orthonormal columns `cols` relative to the
/// orthonormal basis `span` of the same subspace.
fn orientation_in(cols: &[Vector], span: &[Vector]) -> Sign {
    let coords = cols.iter().map(|v| ortho::coords_in(v, span)).collect_vec();
    Sign::from(Matrix::from_cols(coords).determinant())
}

impl Element {
    /// Returns the exterior product of the two elements, which spans the
    /// combined subspace and is zero when the subspaces overlap.
    pub fn wedge(&self, other: &Element) -> Result<Element, Error> {
        common_ndim(self.ndim(), other.ndim())?;
        match (self, other) {
            (Element::Zero, _) | (_, Element::Zero) => Ok(Element::Zero),
            (Element::One, e) | (e, Element::One) => Ok(e.clone()),
            (Element::Scalar(s), e) | (e, Element::Scalar(s)) => Ok(e.scaled(*s)),
            (Element::Multivector(m), e) => {
                let terms: Vec<Element> =
                    m.terms().iter().map(|t| t.wedge(e)).try_collect()?;
                Multivector::new(terms)
            }
            (e, Element::Multivector(m)) => {
                let terms: Vec<Element> =
                    m.terms().iter().map(|t| e.wedge(t)).try_collect()?;
                Multivector::new(terms)
            }
            (lhs, rhs) => {
                let (Some(a), Some(b)) = (Factors::of(lhs), Factors::of(rhs)) else {
                    return Err(Error::Undefined("wedge"));
                };
                Ok(wedge_factors(&a, &b))
            }
        }
    }

    /// Returns the left contraction of `other` by `self`, which removes
    /// `self`'s subspace from `other`'s.
    ///
    /// Zero whenever `self` has higher grade than `other` or does not lie in
    /// its subspace.
    pub fn contract_left(&self, other: &Element) -> Result<Element, Error> {
        common_ndim(self.ndim(), other.ndim())?;
        match (self, other) {
            (Element::Zero, _) | (_, Element::Zero) => Ok(Element::Zero),
            (Element::One, e) => Ok(e.clone()),
            (Element::Scalar(s), e) => Ok(e.scaled(*s)),
            (Element::Multivector(m), e) => {
                let terms: Vec<Element> =
                    m.terms().iter().map(|t| t.contract_left(e)).try_collect()?;
                Multivector::new(terms)
            }
            (e, Element::Multivector(m)) => {
                let terms: Vec<Element> =
                    m.terms().iter().map(|t| e.contract_left(t)).try_collect()?;
                Multivector::new(terms)
            }
            // a positive grade contracted onto grade 0 vanishes
            (_, Element::One | Element::Scalar(_)) => Ok(Element::Zero),
            (lhs, rhs) => {
                let (Some(a), Some(b)) = (Factors::of(lhs), Factors::of(rhs)) else {
                    return Err(Error::Undefined("left contraction"));
                };
                Ok(contract_left_factors(&a, &b))
            }
        }
    }

    /// Returns the right contraction of `self` by `other`, which removes
    /// `other`'s subspace from `self`'s.
    pub fn contract_right(&self, other: &Element) -> Result<Element, Error> {
        common_ndim(self.ndim(), other.ndim())?;
        match (self, other) {
            (Element::Zero, _) | (_, Element::Zero) => Ok(Element::Zero),
            (e, Element::One) => Ok(e.clone()),
            (e, Element::Scalar(s)) => Ok(e.scaled(*s)),
            (Element::Multivector(m), e) => {
                let terms: Vec<Element> =
                    m.terms().iter().map(|t| t.contract_right(e)).try_collect()?;
                Multivector::new(terms)
            }
            (e, Element::Multivector(m)) => {
                let terms: Vec<Element> =
                    m.terms().iter().map(|t| e.contract_right(t)).try_collect()?;
                Multivector::new(terms)
            }
            (Element::One | Element::Scalar(_), _) => Ok(Element::Zero),
            (lhs, rhs) => {
                let (Some(a), Some(b)) = (Factors::of(lhs), Factors::of(rhs)) else {
                    return Err(Error::Undefined("right contraction"));
                };
                let (j, k) = (a.grade(), b.grade());
                if j < k {
                    return Ok(Element::Zero);
                }
                let sign = reverse_sign(j) * reverse_sign(k) * reverse_sign(j - k);
                Ok(contract_left_factors(&b, &a) * sign)
            }
        }
    }

    /// Returns the dot product of the two elements: the left contraction
    /// when `self` has the lower grade, otherwise the right contraction.
    pub fn dot(&self, other: &Element) -> Result<Element, Error> {
        match (self, other) {
            (Element::Zero, _) | (_, Element::Zero) => Ok(Element::Zero),
            (Element::Multivector(m), e) => {
                let terms: Vec<Element> =
                    m.terms().iter().map(|t| t.dot(e)).try_collect()?;
                Multivector::new(terms)
            }
            (e, Element::Multivector(m)) => {
                let terms: Vec<Element> =
                    m.terms().iter().map(|t| e.dot(t)).try_collect()?;
                Multivector::new(terms)
            }
            (lhs, rhs) => match (lhs.grade(), rhs.grade()) {
                (Some(j), Some(k)) if j <= k => lhs.contract_left(rhs),
                _ => lhs.contract_right(rhs),
            },
        }
    }

    /// Returns the orthogonal projection of `self` onto the subspace of
    /// `onto`.
    pub fn project(&self, onto: &Element) -> Result<Element, Error> {
        common_ndim(self.ndim(), onto.ndim())?;
        match (self, onto) {
            (Element::Zero, _) | (_, Element::Zero) => Ok(Element::Zero),
            (_, Element::Multivector(_)) => {
                Err(Error::Undefined("projection onto a multivector"))
            }
            (Element::One | Element::Scalar(_), _) => Ok(self.clone()),
            (Element::Blade(_) | Element::Pseudoscalar(_), Element::One | Element::Scalar(_)) => {
                Ok(Element::Zero)
            }
            (Element::Multivector(m), Element::One | Element::Scalar(_)) => {
                Ok(m.grade_part(0))
            }
            (Element::Multivector(m), _) => {
                let terms: Vec<Element> =
                    m.terms().iter().map(|t| t.project(onto)).try_collect()?;
                Multivector::new(terms)
            }
            // the pseudoscalar's subspace is the whole space
            (_, Element::Pseudoscalar(_)) => Ok(self.clone()),
            (Element::Pseudoscalar(_), Element::Blade(_)) => Ok(Element::Zero),
            (Element::Blade(a), Element::Blade(c)) => {
                if a.grade() > c.grade() {
                    return Ok(Element::Zero);
                }
                let projected = project_cols(a.basis(), c.basis());
                Ok(match ortho::orthonormalize(a.ndim(), &projected, EPSILON) {
                    Some((basis, shrinkage)) => {
                        let volume = a.volume() * shrinkage;
                        Blade::assemble(a.ndim(), basis, volume.abs(), Sign::from(volume))
                    }
                    None => Element::Zero,
                })
            }
        }
    }

    /// Returns the dual of the element: the element of complementary grade
    /// spanning the orthogonal complement subspace, with the same norm.
    ///
    /// Taking the dual twice gives back the element times the reversal sign
    /// of the ambient dimension. Grade-0 elements have no ambient dimension
    /// and therefore no dual.
    pub fn dual(&self) -> Result<Element, Error> {
        match self {
            Element::Zero | Element::One | Element::Scalar(_) => {
                Err(Error::Undefined("dual of an element with no ambient dimension"))
            }
            Element::Blade(b) => Ok(blade_dual(b)),
            Element::Pseudoscalar(p) => {
                Ok(Element::scalar(p.value() * reverse_sign(p.ndim())))
            }
            Element::Multivector(m) => {
                let n = m.ndim();
                let terms: Vec<Element> = m
                    .terms()
                    .into_iter()
                    .map(|t| match t {
                        // grade-0 terms dualize against the ambient space
                        Element::One => Ok(Pseudoscalar::new(n, 1.0)),
                        Element::Scalar(s) => Ok(Pseudoscalar::new(n, s)),
                        other => other.dual(),
                    })
                    .try_collect()?;
                Multivector::new(terms)
            }
        }
    }

    /// Returns the dual of `self` taken within the subspace of the blade
    /// `other` rather than the whole space.
    ///
    /// Errors if `self` does not lie in `other`'s subspace.
    pub fn dual_in(&self, other: &Element) -> Result<Element, Error> {
        common_ndim(self.ndim(), other.ndim())?;
        let Some(reference) = Factors::of(other) else {
            return Err(Error::Undefined("dual relative to a non-blade"));
        };
        match self {
            Element::Zero => Err(Error::Undefined("dual of zero")),
            Element::Multivector(m) => {
                let terms: Vec<Element> =
                    m.terms().iter().map(|t| t.dual_in(other)).try_collect()?;
                Multivector::new(terms)
            }
            Element::One => dual_in_factors(&[], 1.0, &reference),
            Element::Scalar(s) => dual_in_factors(&[], *s, &reference),
            Element::Blade(b) => dual_in_factors(b.basis(), b.volume(), &reference),
            Element::Pseudoscalar(p) => {
                dual_in_factors(&ortho::standard_basis(p.ndim()), p.value(), &reference)
            }
        }
    }
}

fn wedge_factors(a: &Factors, b: &Factors) -> Element {
    let n = a.ndim;
    if a.grade() + b.grade() > n {
        return Element::Zero;
    }
    let cat = a.cols.iter().chain(&b.cols).cloned().collect_vec();
    match ortho::orthonormalize(n, &cat, EPSILON) {
        Some((basis, spread)) => {
            let volume = a.volume * b.volume * spread;
            Blade::assemble(n, basis, volume.abs(), Sign::from(volume))
        }
        None => Element::Zero,
    }
}

fn contract_left_factors(a: &Factors, b: &Factors) -> Element {
    let n = b.ndim;
    let (j, k) = (a.grade(), b.grade());
    if j > k {
        return Element::Zero;
    }
    let projected = project_cols(&a.cols, &b.cols);
    let Some((inside, shrinkage)) = ortho::orthonormalize(n, &projected, EPSILON) else {
        return Element::Zero;
    };
    let complement = ortho::complement_within(&inside, &b.cols, (k - j) as usize);
    let oriented = inside.iter().chain(&complement).cloned().collect_vec();
    let twist = orientation_in(&oriented, &b.cols);
    let volume = a.volume * shrinkage * b.volume * reverse_sign(j) * twist;
    Blade::assemble(n, complement, volume.abs(), Sign::from(volume))
}

fn blade_dual(b: &Blade) -> Element {
    let n = b.ndim();
    let complement = ortho::complement(n, b.basis());
    let full = b.basis().iter().chain(&complement).cloned().collect_vec();
    let twist = Sign::from(Matrix::from_cols(full).determinant());
    let volume = b.volume() * twist * reverse_sign(b.grade());
    Blade::assemble(n, complement, volume.abs(), Sign::from(volume))
}

fn dual_in_factors(cols: &[Vector], volume: Float, reference: &Factors) -> Result<Element, Error> {
    let (j, k) = (cols.len() as u8, reference.grade());
    if j > k {
        return Err(Error::NotContained);
    }
    let contained = cols
        .iter()
        .all(|v| ortho::rejection_mag(v, &reference.cols) <= EPSILON);
    if !contained {
        return Err(Error::NotContained);
    }
    let complement = ortho::complement_within(cols, &reference.cols, (k - j) as usize);
    let oriented = cols.iter().chain(&complement).cloned().collect_vec();
    let twist = orientation_in(&oriented, &reference.cols);
    let signed = volume
        * twist
        * reverse_sign(j)
        * reverse_sign(k)
        * Sign::from(reference.volume);
    Ok(Blade::assemble(
        reference.ndim,
        complement,
        signed.abs(),
        Sign::from(signed),
    ))
}
