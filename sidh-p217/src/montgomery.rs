// -*- mode: rust; -*-
//
// This file is part of sidh-p217.
// See LICENSE for licensing information.

//! x-only arithmetic on Montgomery curves \\(B y^2 = x^3 + A x^2 + x\\)
//! over GF(p²).
//!
//! Points carry projective coordinates \\((X : Z)\\) with the point at
//! infinity encoded as \\(Z = 0\\).  Curve coefficients are passed per
//! operation in the projective forms the isogeny walk maintains:
//! \\((A + 2C : 4C)\\) for doubling and \\((A - 2C : A + 2C)\\) for
//! tripling.

#![allow(non_snake_case)]

use subtle::Choice;
use subtle::ConditionallySelectable;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::fp2::Fp2Element;

/// A point on a Montgomery curve, in \\((X : Z)\\) coordinates.
#[derive(Copy, Clone, Debug)]
pub struct ProjectivePoint {
    /// The \\(X\\) coordinate.
    pub X: Fp2Element,
    /// The \\(Z\\) coordinate; zero encodes the point at infinity.
    pub Z: Fp2Element,
}

#[cfg(feature = "zeroize")]
impl Zeroize for ProjectivePoint {
    fn zeroize(&mut self) {
        self.X.zeroize();
        self.Z.zeroize();
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(
        a: &ProjectivePoint,
        b: &ProjectivePoint,
        choice: Choice,
    ) -> ProjectivePoint {
        ProjectivePoint {
            X: Fp2Element::conditional_select(&a.X, &b.X, choice),
            Z: Fp2Element::conditional_select(&a.Z, &b.Z, choice),
        }
    }
}

impl ProjectivePoint {
    /// Lift an affine x-coordinate to \\((x : 1)\\).
    pub fn from_affine_x(x: &Fp2Element) -> ProjectivePoint {
        ProjectivePoint {
            X: *x,
            Z: Fp2Element::ONE,
        }
    }

    /// Whether this is the point at infinity, in constant time.
    pub fn is_infinity(&self) -> Choice {
        self.Z.is_zero()
    }

    /// Normalize to the affine x-coordinate.  Constant-time inversion;
    /// the point must not be at infinity.
    pub fn to_affine_x(&self) -> Fp2Element {
        &self.X * &self.Z.invert()
    }

    /// Doubling, with the curve as \\((A24^+ : C24) = (A + 2C : 4C)\\).
    pub fn xdbl(&self, a24plus: &Fp2Element, c24: &Fp2Element) -> ProjectivePoint {
        let t0 = &self.X - &self.Z;
        let t1 = &self.X + &self.Z;
        let t0 = t0.square();
        let t1 = t1.square();
        let mut Z = c24 * &t0;
        let X = &t1 * &Z;
        let t1 = &t1 - &t0;
        let t0 = a24plus * &t1;
        Z = &Z + &t0;
        Z = &Z * &t1;
        ProjectivePoint { X, Z }
    }

    /// `e` repeated doublings.
    pub fn xdbl_iter(&self, a24plus: &Fp2Element, c24: &Fp2Element, e: usize) -> ProjectivePoint {
        let mut P = *self;
        for _ in 0..e {
            P = P.xdbl(a24plus, c24);
        }
        P
    }

    /// Tripling by the dedicated degree-3 formula, with the curve as
    /// \\((A24^- : A24^+) = (A - 2C : A + 2C)\\).
    pub fn xtpl(&self, a24minus: &Fp2Element, a24plus: &Fp2Element) -> ProjectivePoint {
        let t0 = &self.X - &self.Z;
        let t2 = t0.square();
        let t1 = &self.X + &self.Z;
        let t3 = t1.square();
        let t4 = &t1 + &t0;
        let t0 = &t1 - &t0;
        let t1 = t4.square();
        let t1 = &t1 - &t3;
        let t1 = &t1 - &t2;
        let t5 = &t3 * a24plus;
        let t3 = &t5 * &t3;
        let t6 = &t2 * a24minus;
        let t2 = &t2 * &t6;
        let t3 = &t2 - &t3;
        let t2 = &t5 - &t6;
        let t1 = &t2 * &t1;
        let t2 = &t3 + &t1;
        let t2 = t2.square();
        let X = &t2 * &t4;
        let t1 = &t3 - &t1;
        let t1 = t1.square();
        let Z = &t1 * &t0;
        ProjectivePoint { X, Z }
    }

    /// `e` repeated triplings.
    pub fn xtpl_iter(
        &self,
        a24minus: &Fp2Element,
        a24plus: &Fp2Element,
        e: usize,
    ) -> ProjectivePoint {
        let mut P = *self;
        for _ in 0..e {
            P = P.xtpl(a24minus, a24plus);
        }
        P
    }
}

/// Simultaneous doubling of `P` and differential addition of `P` and
/// `Q` with difference x-coordinate `xPQ`, using \\(A24 = (A + 2)/4\\).
///
/// Returns \\(([2]P, P + Q)\\).  As in the three-point ladder that
/// calls it, `xPQ` enters projectively: the caller owes a final
/// cross-multiplication of the sum's \\(X\\) by the difference's
/// \\(Z\\).
pub(crate) fn xdbladd(
    P: &ProjectivePoint,
    Q: &ProjectivePoint,
    xPQ: &Fp2Element,
    a24: &Fp2Element,
) -> (ProjectivePoint, ProjectivePoint) {
    let t0 = &P.X + &P.Z;
    let t1 = &P.X - &P.Z;
    let X2 = t0.square();
    let t2 = &Q.X - &Q.Z;
    let sum = &Q.X + &Q.Z;
    let t0 = &t0 * &t2;
    let Z2 = t1.square();
    let t1 = &t1 * &sum;
    let t2 = &X2 - &Z2;
    let X2P = &X2 * &Z2;
    let XQ = &t2 * a24;
    let ZQP = &t0 - &t1;
    let Z2P = &(&XQ + &Z2) * &t2;
    let XQP = (&t0 + &t1).square();
    let ZQP = &ZQP.square() * xPQ;
    (
        ProjectivePoint { X: X2P, Z: Z2P },
        ProjectivePoint { X: XQP, Z: ZQP },
    )
}

/// Three-point ladder: compute \\(x(P + [m]Q)\\) from the affine
/// x-coordinates of \\(P\\), \\(Q\\) and \\(Q - P\\).
///
/// `scalar` is little-endian bytes; exactly `nbits` of it are
/// consumed.  Each step swaps in constant time on the XOR of the
/// current and previous scalar bits, so the swap state never has to be
/// unwound inside the loop.
pub(crate) fn ladder3pt(
    xP: &Fp2Element,
    xQ: &Fp2Element,
    xPQ: &Fp2Element,
    scalar: &[u8],
    nbits: usize,
    A: &Fp2Element,
) -> ProjectivePoint {
    debug_assert!(scalar.len() * 8 >= nbits);

    // A24 = (A + 2) / 4
    let mut a24 = &Fp2Element::ONE + &Fp2Element::ONE;
    a24 = A + &a24;
    a24 = a24.div2();
    a24 = a24.div2();

    let mut R0 = ProjectivePoint::from_affine_x(xQ);
    let mut R2 = ProjectivePoint::from_affine_x(xPQ);
    let mut R = ProjectivePoint::from_affine_x(xP);

    let mut prev_bit = 0u8;
    for i in 0..nbits {
        let bit = (scalar[i >> 3] >> (i & 7)) & 1;
        let choice = Choice::from(bit ^ prev_bit);
        prev_bit = bit;
        ProjectivePoint::conditional_swap(&mut R, &mut R2, choice);
        let (d, s) = xdbladd(&R0, &R2, &R.X, &a24);
        R0 = d;
        R2 = s;
        R2.X = &R2.X * &R.Z;
    }
    ProjectivePoint::conditional_swap(&mut R, &mut R2, Choice::from(prev_bit));
    R
}

/// The j-invariant of the curve \\((A : C)\\),
/// \\(j = 256 (A^2 - 3C^2)^3 / (C^4 (A^2 - 4C^2))\\).
pub fn j_invariant(A: &Fp2Element, C: &Fp2Element) -> Fp2Element {
    let mut jinv = A.square();
    let t1 = C.square();
    let mut t0 = &t1 + &t1;
    t0 = &jinv - &t0;
    t0 = &t0 - &t1;
    jinv = &t0 - &t1;
    let t1 = t1.square();
    jinv = &jinv * &t1;
    t0 = &t0 + &t0;
    t0 = &t0 + &t0;
    let t1 = t0.square();
    t0 = &t0 * &t1;
    t0 = &t0 + &t0;
    t0 = &t0 + &t0;
    jinv = jinv.invert();
    &jinv * &t0
}

/// Recover the affine coefficient \\(A\\) of the curve through three
/// affine x-coordinates \\(x_P\\), \\(x_Q\\), \\(x_{Q-P}\\).
pub fn recover_a(xP: &Fp2Element, xQ: &Fp2Element, xQP: &Fp2Element) -> Fp2Element {
    let t1 = xP + xQ;
    let t0 = xP * xQ;
    let mut A = xQP * &t1;
    A = &t0 + &A;
    let mut t0 = &t0 * xQP;
    A = &A - &Fp2Element::ONE;
    t0 = &t0 + &t0;
    let t1 = &t1 + xQP;
    t0 = &t0 + &t0;
    A = A.square();
    t0 = t0.invert();
    A = &A * &t0;
    &A - &t1
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants;

    fn curve_e6() -> (Fp2Element, Fp2Element, Fp2Element, Fp2Element) {
        // A = 6, C = 1: A24plus = 8, C24 = 4, A24minus = 4.
        let one = Fp2Element::ONE;
        let two = &one + &one;
        let four = &two + &two;
        let six = &four + &two;
        let eight = &four + &four;
        (six, eight, four, four)
    }

    #[test]
    fn alice_basis_has_two_power_order() {
        let (_, a24plus, c24, _) = curve_e6();
        for x in [
            &constants::ALICE_BASIS[0],
            &constants::ALICE_BASIS[1],
            &constants::ALICE_BASIS[2],
        ] {
            let P = ProjectivePoint::from_affine_x(x);
            let Q = P.xdbl_iter(&a24plus, &c24, 109);
            assert!(!bool::from(Q.is_infinity()));
            assert!(bool::from(Q.xdbl(&a24plus, &c24).is_infinity()));
        }
    }

    #[test]
    fn bob_basis_has_three_power_order() {
        let (_, a24plus, _, a24minus) = curve_e6();
        for x in [
            &constants::BOB_BASIS[0],
            &constants::BOB_BASIS[1],
            &constants::BOB_BASIS[2],
        ] {
            let P = ProjectivePoint::from_affine_x(x);
            let Q = P.xtpl_iter(&a24minus, &a24plus, 66);
            assert!(!bool::from(Q.is_infinity()));
            assert!(bool::from(Q.xtpl(&a24minus, &a24plus).is_infinity()));
        }
    }

    #[test]
    fn tripling_matches_double_and_add_order() {
        // [3]P computed by the dedicated formula must vanish exactly
        // where the group order says it does; combined with the order
        // tests above this pins the formula's sign conventions.
        let (_, a24plus, c24, a24minus) = curve_e6();
        let P = ProjectivePoint::from_affine_x(&constants::BOB_BASIS[0]);
        // 3^67 * P = O but 2 * 3^66 * P != O (no even torsion in P_B)
        let Q = P.xtpl_iter(&a24minus, &a24plus, 66);
        assert!(!bool::from(Q.xdbl(&a24plus, &c24).is_infinity()));
    }

    #[test]
    fn recover_a_returns_base_curve_coefficient() {
        let (six, ..) = curve_e6();
        let a = recover_a(
            &constants::ALICE_BASIS[0],
            &constants::ALICE_BASIS[1],
            &constants::ALICE_BASIS[2],
        );
        assert_eq!(a, six);
        let a = recover_a(
            &constants::BOB_BASIS[0],
            &constants::BOB_BASIS[1],
            &constants::BOB_BASIS[2],
        );
        assert_eq!(a, six);
    }

    #[test]
    fn j_invariant_is_projective() {
        let (six, ..) = curve_e6();
        let one = Fp2Element::ONE;
        let j1 = j_invariant(&six, &one);
        let two = &one + &one;
        let twelve = &six + &six;
        let j2 = j_invariant(&twelve, &two);
        assert_eq!(j1, j2);
    }

    #[test]
    fn ladder_with_scalar_one() {
        // P + [1]Q for the Alice basis is a point of full 2-power order.
        let (six, a24plus, c24, _) = curve_e6();
        let mut scalar = [0u8; 14];
        scalar[0] = 1;
        let R = ladder3pt(
            &constants::ALICE_BASIS[0],
            &constants::ALICE_BASIS[1],
            &constants::ALICE_BASIS[2],
            &scalar,
            constants::ALICE_ORDER_BITS,
            &six,
        );
        let S = R.xdbl_iter(&a24plus, &c24, 109);
        assert!(!bool::from(S.is_infinity()));
        assert!(bool::from(S.xdbl(&a24plus, &c24).is_infinity()));
    }
}
