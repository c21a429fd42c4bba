use super::*;
use crate::{Vector, EPSILON};

fn e(axis: u8, ndim: u8) -> Element {
    Blade::new(ndim, [Vector::unit(axis)])
}

fn blade(ndim: u8, vecs: impl IntoIterator<Item = Vector>) -> Element {
    Blade::new(ndim, vecs)
}

#[test]
fn test_scalar_canonicalization() {
    assert_eq!(Element::scalar(0.0), Element::Zero);
    assert_eq!(Element::scalar(1.0), Element::One);
    assert_eq!(Element::scalar(2.5), Element::Scalar(2.5));
    assert_eq!(Element::scalar(1.0).grade(), Some(0));
    assert_eq!(Element::Zero.grade(), None);
    assert_eq!(Element::Zero.ndim(), None);
}

#[test]
fn test_blade_construction() {
    let b = blade(3, [vector![3.0, 4.0, 0.0]]);
    assert_approx_eq!(b.norm(), 5.0);
    assert_eq!(b.grade(), Some(1));
    assert_eq!(b.ndim(), Some(3));

    // linearly dependent vectors span nothing
    let v = vector![1.0, 2.0, 3.0];
    assert_eq!(blade(3, [v.clone(), &v * 2.0]), Element::Zero);

    assert_eq!(blade(3, std::iter::empty()), Element::Zero);
    assert_eq!(blade(2, vec![v.clone(); 3]), Element::Zero);

    // spanning the whole space gives a pseudoscalar
    let i2 = blade(2, [Vector::unit(0), Vector::unit(1)]);
    assert_eq!(i2, Pseudoscalar::new(2, 1.0));
    let i2_rev = blade(2, [Vector::unit(1), Vector::unit(0)]);
    assert_eq!(i2_rev, Pseudoscalar::new(2, -1.0));

    assert_eq!(Pseudoscalar::new(3, 0.0), Element::Zero);
    assert_eq!(Pseudoscalar::new(0, 2.5), Element::Scalar(2.5));
}

#[test]
fn test_wedge() {
    let a = e(0, 3);
    let b = e(1, 3);

    let ab = a.wedge(&b).unwrap();
    assert_eq!(ab.grade(), Some(2));
    assert_approx_eq!(ab, blade(3, [Vector::unit(0), Vector::unit(1)]));

    // antisymmetry
    assert_approx_eq!(b.wedge(&a).unwrap(), -&ab);
    assert_eq!(a.wedge(&a).unwrap(), Element::Zero);

    // the norm of a wedge is the volume it spans
    let sheared = blade(3, [vector![1.0, 1.0, 0.0]]);
    assert_approx_eq!(a.wedge(&sheared).unwrap().norm(), 1.0);

    // scalars scale
    assert_approx_eq!(Element::scalar(3.0).wedge(&a).unwrap().norm(), 3.0);
    assert_eq!(Element::One.wedge(&a).unwrap(), a);
    assert_eq!(Element::Zero.wedge(&a).unwrap(), Element::Zero);

    // overlap kills the product even when the grades fit
    assert_eq!(ab.wedge(&b).unwrap(), Element::Zero);

    // grade sum exceeding the dimension vanishes before any factoring
    let cd = e(1, 3).wedge(&e(2, 3)).unwrap();
    assert_eq!(ab.wedge(&cd).unwrap(), Element::Zero);
    assert_eq!(
        Pseudoscalar::new(5, 2.0).wedge(&Pseudoscalar::new(5, 3.0)).unwrap(),
        Element::Zero,
    );

    // full-grade wedge is a pseudoscalar
    let abc = ab.wedge(&e(2, 3)).unwrap();
    assert_eq!(abc, Pseudoscalar::new(3, 1.0));
}

#[test]
fn test_dimension_mismatch() {
    let p5 = Pseudoscalar::new(5, 1.0);
    let p6 = Pseudoscalar::new(6, 1.0);
    assert_eq!(
        p5.wedge(&p6),
        Err(Error::DimensionMismatch { lhs: 5, rhs: 6 }),
    );
    assert!(matches!(
        Element::from(vector![1.0, 0.0]) + e(0, 3),
        Err(Error::DimensionMismatch { .. }),
    ));
    assert!(matches!(
        e(0, 2).contract_left(&e(0, 3)),
        Err(Error::DimensionMismatch { .. }),
    ));
}

#[test]
fn test_multivector_reduction() {
    let mv = (Element::scalar(2.0) + Element::from(vector![1.0, 1.0, 0.0])).unwrap();
    let Element::Multivector(m) = &mv else {
        panic!("expected multivector, got {mv}");
    };
    assert_approx_eq!(m.norm(), 6.0_f64.sqrt());
    assert_eq!(m.grades(), vec![0, 1]);
    assert_approx_eq!(m.grade_part(0), Element::scalar(2.0));
    assert_approx_eq!(m.grade_part(1), blade(3, [vector![1.0, 1.0, 0.0]]));
    assert_eq!(m.grade_part(2), Element::Zero);

    // exact cancellation collapses all the way to zero
    assert_eq!((Element::One + Element::scalar(-1.0)).unwrap(), Element::Zero);
    let v = Element::from(vector![1.0, 2.0, 3.0]);
    assert_eq!((v.clone() - v.clone()).unwrap(), Element::Zero);

    // same-grade terms combine into a single blade
    let sum = (e(0, 3) + e(1, 3)).unwrap();
    assert_approx_eq!(sum, blade(3, [vector![1.0, 1.0, 0.0]]));

    // blades of the same subspace merge by signed volume
    let b1 = blade(3, [Vector::unit(0), Vector::unit(1)]);
    let b2 = blade(3, [Vector::unit(1), Vector::unit(0)]);
    assert_eq!((b1 + b2).unwrap(), Element::Zero);

    // scalars alone never become a multivector
    let s = (Element::scalar(2.0) + Element::scalar(3.0)).unwrap();
    assert_eq!(s, Element::Scalar(5.0));
}

#[test]
fn test_approx_eq() {
    // zero is never approximately a scalar, which is nonzero by construction
    assert!(!Element::Zero.approx_eq_with(&Element::Scalar(1e-9), EPSILON, 0.0));
    assert!(!Element::Scalar(1e-9).approx_eq_with(&Element::Zero, EPSILON, 0.0));
    assert!(!Element::Zero.approx_eq_with(&Element::One, EPSILON, 0.0));

    // blade equality is basis-independent
    let l = blade(3, [vector![1.0, 1.0, 0.0], vector![-1.0, 1.0, 0.0]]);
    let r = blade(3, [Vector::unit(0), Vector::unit(1)]).scaled(2.0);
    assert_approx_eq!(l, r);
    // same subspace, opposite orientation
    assert!(!l.approx_eq_with(&-&r, EPSILON, 0.0));

    assert_approx_eq!(Element::One, Element::Scalar(1.0 + 1e-9));
}

#[test]
fn test_contractions() {
    let a = Element::from(vector![1.0, 2.0, 0.0]);
    let b = Element::from(vector![3.0, -1.0, 0.0]);
    // vector contraction is the dot product
    assert_approx_eq!(a.contract_left(&b).unwrap(), Element::One);
    assert_eq!(e(0, 3).contract_left(&e(1, 3)).unwrap(), Element::Zero);

    let e1 = e(0, 3);
    let e2 = e(1, 3);
    let plane = e1.wedge(&e2).unwrap();
    assert_approx_eq!(e1.contract_left(&plane).unwrap(), e2);
    assert_approx_eq!(e2.contract_left(&plane).unwrap(), -&e1);
    assert_approx_eq!(plane.contract_left(&plane).unwrap(), Element::Scalar(-1.0));

    // right contraction removes from the other side
    assert_approx_eq!(plane.contract_right(&e2).unwrap(), e1);
    assert_eq!(e2.contract_right(&plane).unwrap(), Element::Zero);

    // scalars
    assert_approx_eq!(Element::scalar(2.0).contract_left(&e1).unwrap(), e1.scaled(2.0));
    assert_eq!(e1.contract_left(&Element::scalar(2.0)).unwrap(), Element::Zero);
    assert_approx_eq!(e1.contract_right(&Element::scalar(2.0)).unwrap(), e1.scaled(2.0));

    // operator sugar
    assert_approx_eq!((&e1 << &plane).unwrap(), e2);
    assert_approx_eq!((&plane >> &e2).unwrap(), e1);
    assert_approx_eq!((&e1 ^ &e2).unwrap(), plane);
}

#[test]
fn test_dot() {
    let e1 = e(0, 3);
    let e2 = e(1, 3);
    let plane = e1.wedge(&e2).unwrap();
    // the lower-grade operand contracts into the higher-grade one
    assert_approx_eq!(e2.dot(&plane).unwrap(), -&e1);
    assert_approx_eq!(plane.dot(&e2).unwrap(), e1);
    assert_approx_eq!(
        Element::from(vector![1.0, 2.0]).dot(&vector![3.0, 4.0].into()).unwrap(),
        Element::Scalar(11.0),
    );
}

#[test]
fn test_projection() {
    let plane = blade(3, [Vector::unit(0), Vector::unit(1)]);
    let v = Element::from(vector![1.0, 2.0, 3.0]);
    assert_approx_eq!(
        v.project(&plane).unwrap(),
        Element::from(vector![1.0, 2.0, 0.0]),
    );
    assert_eq!(e(2, 3).project(&plane).unwrap(), Element::Zero);

    // projecting onto the pseudoscalar changes nothing
    assert_approx_eq!(v.project(&Pseudoscalar::new(3, -2.0)).unwrap(), v);

    // higher grade onto lower grade vanishes
    assert_eq!(plane.project(&e(0, 3)).unwrap(), Element::Zero);

    // multivectors project term by term
    let mv = (Element::scalar(2.0) + v.clone()).unwrap();
    let projected = mv.project(&plane).unwrap();
    let Element::Multivector(m) = &projected else {
        panic!("expected multivector, got {projected}");
    };
    assert_approx_eq!(m.grade_part(0), Element::scalar(2.0));
    assert_approx_eq!(m.grade_part(1), Element::from(vector![1.0, 2.0, 0.0]));

    assert!(matches!(
        v.project(&mv),
        Err(Error::Undefined(_)),
    ));
}

#[test]
fn test_dual() {
    // in 2D the dual rotates a quarter turn
    assert_approx_eq!(e(0, 2).dual().unwrap(), e(1, 2));
    assert_approx_eq!(e(1, 2).dual().unwrap(), -&e(0, 2));

    // a vector's dual wedges back to the pseudoscalar
    let v = blade(3, [vector![2.0, 0.0, 0.0]]);
    let dual = v.dual().unwrap();
    assert_eq!(dual.grade(), Some(2));
    assert_approx_eq!(dual.norm(), 2.0);
    assert_approx_eq!(v.wedge(&dual).unwrap(), Pseudoscalar::new(3, 4.0));

    assert_approx_eq!(
        Pseudoscalar::new(3, 2.0).dual().unwrap(),
        Element::Scalar(-2.0),
    );

    // scalars have no ambient dimension to dualize against
    assert!(matches!(Element::One.dual(), Err(Error::Undefined(_))));
    assert!(matches!(Element::Zero.dual(), Err(Error::Undefined(_))));

    // applying the dual twice gives the reversal sign of the dimension
    for ndim in 3..=5 {
        let b = blade(ndim, [Vector::unit(0), Vector::unit(1)]);
        let twice = b.dual().unwrap().dual().unwrap();
        assert_approx_eq!(twice, b.clone() * reverse_sign(ndim));
    }

    // multivector terms dualize independently, scalars against the space
    let mv = (Element::scalar(2.0) + e(2, 3)).unwrap();
    let dual = mv.dual().unwrap();
    let Element::Multivector(m) = &dual else {
        panic!("expected multivector, got {dual}");
    };
    assert_approx_eq!(m.grade_part(3), Pseudoscalar::new(3, 2.0));
    assert_approx_eq!(
        m.grade_part(2),
        blade(3, [Vector::unit(0), Vector::unit(1)]),
    );
}

#[test]
fn test_dual_in() {
    let plane = blade(3, [Vector::unit(0), Vector::unit(1)]);
    let e1 = e(0, 3);

    let d = e1.dual_in(&plane).unwrap();
    assert_approx_eq!(d, -&e(1, 3));

    // applying the relative dual twice gives the reversal sign of the
    // reference grade
    let twice = d.dual_in(&plane).unwrap();
    assert_approx_eq!(twice, e1.clone() * reverse_sign(2));

    assert_eq!(e(2, 3).dual_in(&plane), Err(Error::NotContained));

    // dimensions are checked before containment
    assert_eq!(
        Element::from(vector![1.0, 0.0]).dual_in(&plane),
        Err(Error::DimensionMismatch { lhs: 2, rhs: 3 }),
    );

    // a scalar dualizes to the reference blade itself, up to sign
    let d = Element::scalar(2.0).dual_in(&plane).unwrap();
    assert_eq!(d.grade(), Some(2));
    assert_approx_eq!(d.norm(), 2.0);

    // the reference must be a blade, and zero has no dual in any subspace
    assert!(matches!(
        e1.dual_in(&Element::scalar(2.0)),
        Err(Error::Undefined(_)),
    ));
    assert!(matches!(
        Element::Zero.dual_in(&plane),
        Err(Error::Undefined(_)),
    ));

    // relative to the pseudoscalar, idempotence still holds
    let i3 = Pseudoscalar::new(3, 1.0);
    let twice = e1.dual_in(&i3).unwrap().dual_in(&i3).unwrap();
    assert_approx_eq!(twice, e1.clone() * reverse_sign(3));
}

#[test]
fn test_reverse() {
    assert_eq!(Element::Scalar(2.0).reverse(), Element::Scalar(2.0));
    let v = Element::from(vector![1.0, 2.0, 3.0]);
    assert_eq!(v.reverse(), v);

    let plane = blade(3, [Vector::unit(0), Vector::unit(1)]);
    assert_approx_eq!(plane.reverse(), -&plane);
    assert_approx_eq!(
        Pseudoscalar::new(3, 2.0).reverse(),
        Pseudoscalar::new(3, -2.0),
    );

    let mv = (Element::scalar(2.0) + plane.clone()).unwrap();
    let rev = mv.reverse();
    let Element::Multivector(m) = &rev else {
        panic!("expected multivector, got {rev}");
    };
    assert_approx_eq!(m.grade_part(0), Element::scalar(2.0));
    assert_approx_eq!(m.grade_part(2), -&plane);
}

#[test]
fn test_inverse() {
    let b = blade(3, [vector![3.0, 4.0, 0.0]]);
    assert_approx_eq!(b.dot(&b.inverse().unwrap()).unwrap(), Element::One);

    let plane = blade(3, [Vector::unit(0), Vector::unit(1)]);
    assert_approx_eq!(plane.dot(&plane.inverse().unwrap()).unwrap(), Element::One);

    let i2 = Pseudoscalar::new(2, 2.0);
    assert_approx_eq!(i2.dot(&i2.inverse().unwrap()).unwrap(), Element::One);

    assert_approx_eq!(Element::Scalar(4.0).inverse().unwrap(), Element::Scalar(0.25));
    assert!(matches!(Element::Zero.inverse(), Err(Error::Undefined(_))));
    let mv = (Element::scalar(2.0) + plane).unwrap();
    assert!(matches!(mv.inverse(), Err(Error::Undefined(_))));
}

#[test]
fn test_basis_sharing() {
    let Element::Blade(b) = blade(3, [vector![3.0, 4.0, 0.0]]) else {
        panic!("expected blade");
    };
    let shallow = b.clone();
    assert!(std::ptr::eq(b.basis().as_ptr(), shallow.basis().as_ptr()));

    // rescaling keeps the same subspace and shares its basis
    let Element::Blade(scaled) = b.scaled(2.0) else {
        panic!("expected blade");
    };
    assert!(std::ptr::eq(b.basis().as_ptr(), scaled.basis().as_ptr()));
    assert_approx_eq!(scaled.volume(), 10.0);

    let deep = b.deep_copy();
    assert!(!std::ptr::eq(b.basis().as_ptr(), deep.basis().as_ptr()));
    assert_approx_eq!(b, deep);

    let unit = b.unit();
    assert_approx_eq!(unit.norm(), 1.0);
    assert!(unit.contains(&b, EPSILON, 0.0));
}

#[test]
fn test_identities() {
    let v = Element::from(vector![1.0, 2.0, 3.0]);
    assert_eq!(v.zero_like(), Element::Zero);
    assert_eq!(v.one_like(), Element::One);
    assert_eq!(v.scaled(0.0), Element::Zero);
    assert_approx_eq!(v.scaled(-1.0), -&v);
}

#[test]
fn test_display() {
    assert_eq!(Element::Zero.to_string(), "0");
    assert_eq!(Element::scalar(2.5).to_string(), "2.5");
    assert_eq!(Pseudoscalar::new(3, -1.5).to_string(), "-1.5 * I3");
    assert!(Error::NotContained.to_string().contains("not contained"));
}
