// -*- mode: rust; -*-
//
// This file is part of sidh-p217.
// See LICENSE for licensing information.

//! Small-degree isogenies and the strategy-driven tree walks that
//! compose them into the full 2^110- and 3^67-isogenies.
//!
//! The walkers keep a fixed-capacity stack of intermediate points.
//! Capacities are sized for the shipped strategies (and any strategy of
//! the same balanced depth); they are a property of the parameter set,
//! not of the walk algorithm.

#![allow(non_snake_case)]

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::constants::{MAX_ALICE, MAX_BOB, MAX_INT_POINTS_ALICE, MAX_INT_POINTS_BOB};
use crate::fp2::Fp2Element;
use crate::montgomery::ProjectivePoint;

/// A 4-isogeny: codomain coefficients and the evaluation coefficients
/// derived from a kernel generator of exact order 4.
pub struct FourIsogeny {
    /// Codomain \\(A24^+ = A' + 2C'\\).
    pub a24plus: Fp2Element,
    /// Codomain \\(C24 = 4C'\\).
    pub c24: Fp2Element,
    coeff: [Fp2Element; 3],
}

impl FourIsogeny {
    /// Build the 4-isogeny with kernel generated by `P4`.
    ///
    /// The caller guarantees `P4` has exact order 4 on the curve the
    /// walk currently sits on; nothing is checked here.
    pub fn compute(P4: &ProjectivePoint) -> FourIsogeny {
        let k1 = &P4.X - &P4.Z;
        let k2 = &P4.X + &P4.Z;
        let mut k0 = P4.Z.square();
        k0 = &k0 + &k0;
        let c24 = k0.square();
        k0 = &k0 + &k0;
        let mut a24plus = P4.X.square();
        a24plus = &a24plus + &a24plus;
        a24plus = a24plus.square();
        FourIsogeny {
            a24plus,
            c24,
            coeff: [k0, k1, k2],
        }
    }

    /// Push a point through the isogeny.  Points in the kernel map to
    /// \\(Z = 0\\).
    pub fn evaluate(&self, Q: &ProjectivePoint) -> ProjectivePoint {
        let t0 = &Q.X + &Q.Z;
        let t1 = &Q.X - &Q.Z;
        let X = &t0 * &self.coeff[1];
        let Z = &t1 * &self.coeff[2];
        let t0 = &(&t0 * &t1) * &self.coeff[0];
        let t1 = &X + &Z;
        let Z = &X - &Z;
        let t1 = t1.square();
        let Z = Z.square();
        let X = &t1 + &t0;
        let t0 = &Z - &t0;
        ProjectivePoint {
            X: &X * &t1,
            Z: &Z * &t0,
        }
    }
}

/// A 3-isogeny: codomain coefficients in the tripling form plus the
/// two evaluation coefficients.
pub struct ThreeIsogeny {
    /// Codomain \\(A24^- = A' - 2C'\\).
    pub a24minus: Fp2Element,
    /// Codomain \\(A24^+ = A' + 2C'\\).
    pub a24plus: Fp2Element,
    coeff: [Fp2Element; 2],
}

impl ThreeIsogeny {
    /// Build the 3-isogeny with kernel generated by `P3`, which the
    /// caller guarantees has exact order 3.
    pub fn compute(P3: &ProjectivePoint) -> ThreeIsogeny {
        let k0 = &P3.X - &P3.Z;
        let t0 = k0.square();
        let k1 = &P3.X + &P3.Z;
        let t1 = k1.square();
        let mut t3 = &P3.X + &P3.X;
        t3 = t3.square();
        let t2 = &t3 - &t0;
        let t3 = &t3 - &t1;
        let mut t4 = &t0 + &t3;
        t4 = &t4 + &t4;
        t4 = &t1 + &t4;
        let a24minus = &t2 * &t4;
        let mut t4 = &t1 + &t2;
        t4 = &t4 + &t4;
        t4 = &t0 + &t4;
        let a24plus = &t3 * &t4;
        ThreeIsogeny {
            a24minus,
            a24plus,
            coeff: [k0, k1],
        }
    }

    /// Push a point through the isogeny.
    pub fn evaluate(&self, Q: &ProjectivePoint) -> ProjectivePoint {
        let t0 = &Q.X + &Q.Z;
        let t1 = &Q.X - &Q.Z;
        let t0 = &t0 * &self.coeff[0];
        let t1 = &t1 * &self.coeff[1];
        let t2 = &t0 + &t1;
        let t0 = &t1 - &t0;
        let t2 = t2.square();
        let t0 = t0.square();
        ProjectivePoint {
            X: &Q.X * &t2,
            Z: &Q.Z * &t0,
        }
    }
}

/// Walk the full 2^110-isogeny from `kernel` (exact order 2^110),
/// splitting off one 4-isogeny per tree row as directed by `strategy`.
///
/// Every auxiliary point in `aux` is pushed through each step; the
/// final codomain is returned as \\((A24^+, C24)\\).  Any valid
/// strategy yields the same codomain class and the same affine images;
/// the coefficient and point representatives are projective and only
/// agree up to scaling.  Strategy choice changes traversal cost, never
/// results.
pub fn four_isogeny_walk(
    kernel: &ProjectivePoint,
    a24plus: &Fp2Element,
    c24: &Fp2Element,
    strategy: &[u32],
    aux: &mut [ProjectivePoint],
) -> (Fp2Element, Fp2Element) {
    debug_assert_eq!(strategy.len(), MAX_ALICE - 1);

    let infinity = ProjectivePoint {
        X: Fp2Element::ZERO,
        Z: Fp2Element::ZERO,
    };
    let mut pts = [infinity; MAX_INT_POINTS_ALICE];
    let mut pts_index = [0usize; MAX_INT_POINTS_ALICE];
    let mut npts = 0;
    let mut ii = 0;

    let mut R = *kernel;
    let mut a24plus = *a24plus;
    let mut c24 = *c24;
    let mut index = 0;

    for row in 1..MAX_ALICE {
        while index < MAX_ALICE - row {
            pts[npts] = R;
            pts_index[npts] = index;
            npts += 1;
            let m = strategy[ii] as usize;
            ii += 1;
            R = R.xdbl_iter(&a24plus, &c24, 2 * m);
            index += m;
        }
        let phi = FourIsogeny::compute(&R);
        a24plus = phi.a24plus;
        c24 = phi.c24;
        for pt in pts.iter_mut().take(npts) {
            *pt = phi.evaluate(pt);
        }
        for pt in aux.iter_mut() {
            *pt = phi.evaluate(pt);
        }
        npts -= 1;
        R = pts[npts];
        index = pts_index[npts];
    }

    let phi = FourIsogeny::compute(&R);
    for pt in aux.iter_mut() {
        *pt = phi.evaluate(pt);
    }

    #[cfg(feature = "zeroize")]
    {
        pts.zeroize();
        R.zeroize();
    }

    (phi.a24plus, phi.c24)
}

/// Walk the full 3^67-isogeny from `kernel` (exact order 3^67); the
/// tripling analogue of [`four_isogeny_walk`].  Returns the final
/// \\((A24^-, A24^+)\\).
pub fn three_isogeny_walk(
    kernel: &ProjectivePoint,
    a24minus: &Fp2Element,
    a24plus: &Fp2Element,
    strategy: &[u32],
    aux: &mut [ProjectivePoint],
) -> (Fp2Element, Fp2Element) {
    debug_assert_eq!(strategy.len(), MAX_BOB - 1);

    let infinity = ProjectivePoint {
        X: Fp2Element::ZERO,
        Z: Fp2Element::ZERO,
    };
    let mut pts = [infinity; MAX_INT_POINTS_BOB];
    let mut pts_index = [0usize; MAX_INT_POINTS_BOB];
    let mut npts = 0;
    let mut ii = 0;

    let mut R = *kernel;
    let mut a24minus = *a24minus;
    let mut a24plus = *a24plus;
    let mut index = 0;

    for row in 1..MAX_BOB {
        while index < MAX_BOB - row {
            pts[npts] = R;
            pts_index[npts] = index;
            npts += 1;
            let m = strategy[ii] as usize;
            ii += 1;
            R = R.xtpl_iter(&a24minus, &a24plus, m);
            index += m;
        }
        let phi = ThreeIsogeny::compute(&R);
        a24minus = phi.a24minus;
        a24plus = phi.a24plus;
        for pt in pts.iter_mut().take(npts) {
            *pt = phi.evaluate(pt);
        }
        for pt in aux.iter_mut() {
            *pt = phi.evaluate(pt);
        }
        npts -= 1;
        R = pts[npts];
        index = pts_index[npts];
    }

    let phi = ThreeIsogeny::compute(&R);
    for pt in aux.iter_mut() {
        *pt = phi.evaluate(pt);
    }

    #[cfg(feature = "zeroize")]
    {
        pts.zeroize();
        R.zeroize();
    }

    (phi.a24minus, phi.a24plus)
}
