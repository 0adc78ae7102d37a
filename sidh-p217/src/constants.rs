// -*- mode: rust; -*-
//
// This file is part of sidh-p217.
// See LICENSE for licensing information.

//! Public parameters of the p217 instantiation.
//!
//! \\(p = 2^{110} \cdot 3^{67} - 1\\).  Alice works in the 2^110-torsion
//! and Bob in the 3^67-torsion; each side's base-field torsion basis is
//! provided here as x-coordinates over \\(\mathbb{F}_{p^2}\\).

use crate::backend::serial::u64::constants as limb;
use crate::backend::serial::u64::field::FieldElement217;
use crate::fp2::Fp2Element;

/// Size of an encoded base-field element.
pub const FP_ENCODED_BYTES: usize = 28;

/// Size of a secret key scalar, either side.
pub const SECRET_KEY_BYTES: usize = 14;

/// Size of an encoded public key: three \\(\mathbb{F}_{p^2}\\) elements.
pub const PUBLIC_KEY_BYTES: usize = 168;

/// Size of the shared secret, one encoded \\(\mathbb{F}_{p^2}\\) element.
pub const SHARED_SECRET_BYTES: usize = 56;

/// Mask applied to the top byte of an Alice secret: scalars run over
/// \\([0, 2^{110})\\).
pub const MASK_ALICE: u8 = 0x3F;

/// Mask applied to the top byte of a Bob secret: scalars run over
/// \\([0, 2^{106})\\), slightly undersampling the 3^67-torsion.
pub const MASK_BOB: u8 = 0x03;

/// Ladder length for Alice's kernel scalar.
pub const ALICE_ORDER_BITS: usize = 110;

/// Ladder length for Bob's kernel scalar.
pub const BOB_ORDER_BITS: usize = 106;

/// Number of 4-isogeny steps in Alice's walk.
pub(crate) const MAX_ALICE: usize = 55;

/// Number of 3-isogeny steps in Bob's walk.
pub(crate) const MAX_BOB: usize = 67;

/// Intermediate-point stack capacity for Alice's strategy.
pub(crate) const MAX_INT_POINTS_ALICE: usize = 6;

/// Intermediate-point stack capacity for Bob's strategy.
pub(crate) const MAX_INT_POINTS_BOB: usize = 8;

/// Optimal strategy for the 2^110-isogeny walk, weighted by the
/// measured cost ratio of a double-step to a 4-isogeny evaluation.
pub(crate) const STRATEGY_ALICE: [u32; MAX_ALICE - 1] = [
    24, 15, 8, 4, 2, 1, 1, 2, 1, 1, 4, 2, 1, 1, 2, 1, 1, 7, 4, 2, 1, 1, 2, 1, 1, 3, 2, 1, 1, 1,
    1, 9, 7, 4, 2, 1, 1, 2, 1, 1, 3, 2, 1, 1, 1, 1, 4, 2, 1, 1, 1, 2, 1, 1,
];

/// Optimal strategy for the 3^67-isogeny walk.
pub(crate) const STRATEGY_BOB: [u32; MAX_BOB - 1] = [
    32, 16, 8, 4, 3, 2, 1, 1, 1, 1, 2, 1, 1, 4, 2, 1, 1, 2, 1, 1, 8, 4, 2, 1, 1, 2, 1, 1, 4, 2,
    1, 1, 2, 1, 1, 16, 8, 4, 2, 1, 1, 2, 1, 1, 4, 2, 1, 1, 2, 1, 1, 8, 4, 2, 1, 1, 2, 1, 1, 4,
    2, 1, 1, 2, 1, 1,
];

const fn fp2(re: [u64; 4], im: [u64; 4]) -> Fp2Element {
    Fp2Element {
        c0: FieldElement217(re),
        c1: FieldElement217(im),
    }
}

/// x-coordinates of \\(\{P_A, Q_A, P_A - Q_A\}\\), the public 2^110-torsion
/// basis on the starting curve \\(y^2 = x^3 + 6x^2 + x\\).
pub const ALICE_BASIS: [Fp2Element; 3] = [
    fp2(limb::ALICE_BASIS[0], limb::ALICE_BASIS[1]),
    fp2(limb::ALICE_BASIS[2], limb::ALICE_BASIS[3]),
    fp2(limb::ALICE_BASIS[4], limb::ALICE_BASIS[5]),
];

/// x-coordinates of \\(\{P_B, Q_B, P_B - Q_B\}\\), the public 3^67-torsion
/// basis on the starting curve.
pub const BOB_BASIS: [Fp2Element; 3] = [
    fp2(limb::BOB_BASIS[0], limb::BOB_BASIS[1]),
    fp2(limb::BOB_BASIS[2], limb::BOB_BASIS[3]),
    fp2(limb::BOB_BASIS[4], limb::BOB_BASIS[5]),
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn strategies_have_walk_shape() {
        // a strategy for an n-step walk has n-1 entries, all positive;
        // full validity is exercised by the walker tests.
        assert_eq!(STRATEGY_ALICE.len(), MAX_ALICE - 1);
        assert_eq!(STRATEGY_BOB.len(), MAX_BOB - 1);
        assert!(STRATEGY_ALICE.iter().all(|&m| m >= 1));
        assert!(STRATEGY_BOB.iter().all(|&m| m >= 1));
    }

    #[test]
    fn bob_basis_is_real() {
        assert_eq!(
            BOB_BASIS[0].c1,
            crate::field::FieldElement::ZERO
        );
        assert_eq!(
            BOB_BASIS[1].c1,
            crate::field::FieldElement::ZERO
        );
    }
}
