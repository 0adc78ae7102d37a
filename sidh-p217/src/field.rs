// -*- mode: rust; -*-
//
// This file is part of sidh-p217.
// See LICENSE for licensing information.

//! Field arithmetic modulo \\(p = 2^{110} \cdot 3^{67} - 1\\).
//!
//! This module selects a backend field implementation and provides the
//! backend-independent pieces: inversion and the constant-time
//! exponentiation chain it is built from.
//!
//! Two inversion paths exist.  [`FieldElement::invert`] runs in
//! constant time by exponentiation to \\(p - 2\\) and is the only path
//! reachable from secret-dependent data.  [`FieldElement::invert_vartime`]
//! runs a binary extended gcd and must only be handed public values.

use subtle::Choice;
use subtle::ConstantTimeEq;

use crate::backend::serial::u64::constants::{MONTGOMERY_R2, PM3D4};

pub use crate::backend::serial::u64::field::FieldElement217;

/// The active backend field element.
pub(crate) use crate::backend::serial::u64::field::FieldElement217 as FieldElement;

impl FieldElement {
    /// Test whether this element is zero, in constant time.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&FieldElement::ZERO)
    }

    /// Raise to the public exponent \\((p - 3)/4\\) by a fixed
    /// square-and-multiply chain.  The branch pattern depends only on
    /// the constant exponent, never on the input.
    pub(crate) fn pow_pm3_div4(&self) -> FieldElement {
        let mut acc = FieldElement::ONE;
        for i in (0..215).rev() {
            acc = acc.square();
            if (PM3D4[i >> 6] >> (i & 63)) & 1 == 1 {
                acc = &acc * self;
            }
        }
        acc
    }

    /// Constant-time inversion, \\(a^{p-2} = (a^{(p-3)/4})^4 \cdot a\\).
    ///
    /// Zero maps to zero; inverting zero is a caller error.
    pub fn invert(&self) -> FieldElement {
        let t = self.pow_pm3_div4();
        let t = t.square().square();
        &t * self
    }

    /// Variable-time inversion via the binary extended gcd, followed by
    /// two \\(R^2\\) multiplications to land back in the Montgomery
    /// domain.  Public values only.
    pub fn invert_vartime(&self) -> FieldElement {
        debug_assert!(!bool::from(self.is_zero()));
        let inv = crate::backend::serial::u64::field::inv_uint_vartime(&self.0);
        let r2 = FieldElement(MONTGOMERY_R2);
        let t = &FieldElement(inv) * &r2;
        &t * &r2
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct XorShift64(u64);

    impl XorShift64 {
        fn next_u64(&mut self) -> u64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            x
        }

        fn field_element(&mut self) -> FieldElement {
            let value = [
                self.next_u64(),
                self.next_u64(),
                self.next_u64(),
                self.next_u64() & 0x00FF_FFFF,
            ];
            FieldElement::to_montgomery(&value)
        }
    }

    #[test]
    fn inversion_gives_one() {
        let mut rng = XorShift64(0xfeed_f00d);
        for _ in 0..8 {
            let a = rng.field_element();
            assert_eq!(&a * &a.invert(), FieldElement::ONE);
        }
    }

    #[test]
    fn inversion_of_zero_is_zero() {
        assert_eq!(FieldElement::ZERO.invert(), FieldElement::ZERO);
    }

    #[test]
    fn vartime_inversion_agrees() {
        let mut rng = XorShift64(0xabad_1dea);
        for _ in 0..8 {
            let a = rng.field_element();
            assert_eq!(a.invert_vartime(), a.invert());
        }
        assert_eq!(FieldElement::ONE.invert_vartime(), FieldElement::ONE);
    }
}
