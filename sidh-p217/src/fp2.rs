// -*- mode: rust; -*-
//
// This file is part of sidh-p217.
// See LICENSE for licensing information.

//! Arithmetic in GF(p²) = GF(p)[i] / (i² + 1).
//!
//! An element is \\(c_0 + c_1 i\\) with both components in Montgomery
//! representation.  Multiplication uses three base-field
//! multiplications with lazily-reduced double-width intermediates, so
//! each output component costs exactly one Montgomery reduction.

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::backend::serial::u64::field::{
    mp_add, mp_dblsub_wide, mp_mul, mp_sub_p4, mp_subadd_wide, rdc_mont,
};
use crate::field::FieldElement;

/// Number of octets in the wire encoding of a GF(p²) element.
pub const FP2_ENCODED_BYTES: usize = 56;

/// An element of GF(p²), \\(c_0 + c_1 i\\).
#[derive(Copy, Clone)]
pub struct Fp2Element {
    pub(crate) c0: FieldElement,
    pub(crate) c1: FieldElement,
}

impl Debug for Fp2Element {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Fp2Element {{ c0: {:?}, c1: {:?} }}", self.c0, self.c1)
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for Fp2Element {
    fn zeroize(&mut self) {
        self.c0.zeroize();
        self.c1.zeroize();
    }
}

impl Fp2Element {
    /// The additive identity.
    pub const ZERO: Fp2Element = Fp2Element {
        c0: FieldElement::ZERO,
        c1: FieldElement::ZERO,
    };

    /// The multiplicative identity.
    pub const ONE: Fp2Element = Fp2Element {
        c0: FieldElement::ONE,
        c1: FieldElement::ZERO,
    };

    /// Test for zero in constant time.
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    /// Componentwise halving.
    pub fn div2(&self) -> Fp2Element {
        Fp2Element {
            c0: self.c0.div2(),
            c1: self.c1.div2(),
        }
    }

    /// Reduce both components to canonical form.
    pub fn correct(&self) -> Fp2Element {
        Fp2Element {
            c0: self.c0.correct(),
            c1: self.c1.correct(),
        }
    }

    /// Squaring as \\((c_0 + c_1)(c_0 - c_1) + 2 c_0 c_1 i\\).
    ///
    /// The difference uses the unconditional \\(+4p\\) correction so
    /// both multiplicands stay positive; every intermediate product
    /// stays below \\(R \cdot p\\).
    pub fn square(&self) -> Fp2Element {
        let (t1, _) = mp_add(&self.c0.0, &self.c1.0);
        let t2 = mp_sub_p4(&self.c0.0, &self.c1.0);
        let (t3, _) = mp_add(&self.c0.0, &self.c0.0);
        Fp2Element {
            c0: FieldElement(rdc_mont(&mp_mul(&t1, &t2))),
            c1: FieldElement(rdc_mont(&mp_mul(&t3, &self.c1.0))),
        }
    }

    /// Constant-time inversion through the norm,
    /// \\((c_0 + c_1 i)^{-1} = (c_0 - c_1 i) / (c_0^2 + c_1^2)\\).
    pub fn invert(&self) -> Fp2Element {
        let mut norm = &self.c0.square() + &self.c1.square();
        norm = norm.invert();
        let mut c1 = &self.c1 * &norm;
        c1.negate();
        Fp2Element {
            c0: &self.c0 * &norm,
            c1,
        }
    }

    /// Variable-time inversion; public values only.
    pub fn invert_vartime(&self) -> Fp2Element {
        let mut norm = &self.c0.square() + &self.c1.square();
        norm = norm.invert_vartime();
        let mut c1 = &self.c1 * &norm;
        c1.negate();
        Fp2Element {
            c0: &self.c0 * &norm,
            c1,
        }
    }

    /// Simultaneous inversion of three elements at the cost of a
    /// single field inversion.
    pub fn batch_invert_3(
        z0: &Fp2Element,
        z1: &Fp2Element,
        z2: &Fp2Element,
    ) -> (Fp2Element, Fp2Element, Fp2Element) {
        let t0 = z0 * z1;
        let t1 = (&t0 * z2).invert();
        let t2 = z2 * &t1; // 1/(z0*z1)
        (&t2 * z1, &t2 * z0, &t0 * &t1)
    }

    /// Deserialize from 56 octets: the real component's 28 little-endian
    /// octets, then the imaginary component's.
    pub fn from_bytes(bytes: &[u8; FP2_ENCODED_BYTES]) -> Fp2Element {
        let mut b0 = [0u8; 28];
        let mut b1 = [0u8; 28];
        b0.copy_from_slice(&bytes[..28]);
        b1.copy_from_slice(&bytes[28..]);
        Fp2Element {
            c0: FieldElement::from_bytes(&b0),
            c1: FieldElement::from_bytes(&b1),
        }
    }

    /// Serialize to 56 octets of canonical little-endian components.
    pub fn to_bytes(&self) -> [u8; FP2_ENCODED_BYTES] {
        let mut bytes = [0u8; FP2_ENCODED_BYTES];
        bytes[..28].copy_from_slice(&self.c0.to_bytes());
        bytes[28..].copy_from_slice(&self.c1.to_bytes());
        bytes
    }
}

impl<'a, 'b> Add<&'b Fp2Element> for &'a Fp2Element {
    type Output = Fp2Element;
    fn add(self, rhs: &'b Fp2Element) -> Fp2Element {
        Fp2Element {
            c0: &self.c0 + &rhs.c0,
            c1: &self.c1 + &rhs.c1,
        }
    }
}

impl<'a, 'b> Sub<&'b Fp2Element> for &'a Fp2Element {
    type Output = Fp2Element;
    fn sub(self, rhs: &'b Fp2Element) -> Fp2Element {
        Fp2Element {
            c0: &self.c0 - &rhs.c0,
            c1: &self.c1 - &rhs.c1,
        }
    }
}

impl<'a> Neg for &'a Fp2Element {
    type Output = Fp2Element;
    fn neg(self) -> Fp2Element {
        Fp2Element {
            c0: -&self.c0,
            c1: -&self.c1,
        }
    }
}

impl<'a, 'b> Mul<&'b Fp2Element> for &'a Fp2Element {
    type Output = Fp2Element;
    /// Karatsuba-style multiplication with three base-field products:
    /// \\(c_0 = a_0 b_0 - a_1 b_1\\) and
    /// \\(c_1 = (a_0 + a_1)(b_0 + b_1) - a_0 b_0 - a_1 b_1\\),
    /// accumulated double-width and reduced once per component.
    fn mul(self, rhs: &'b Fp2Element) -> Fp2Element {
        let (t1, _) = mp_add(&self.c0.0, &self.c1.0);
        let (t2, _) = mp_add(&rhs.c0.0, &rhs.c1.0);
        let tt1 = mp_mul(&self.c0.0, &rhs.c0.0);
        let tt2 = mp_mul(&self.c1.0, &rhs.c1.0);
        let mut tt3 = mp_mul(&t1, &t2);
        mp_dblsub_wide(&mut tt3, &tt1, &tt2);
        let c0 = mp_subadd_wide(&tt1, &tt2);
        Fp2Element {
            c0: FieldElement(rdc_mont(&c0)),
            c1: FieldElement(rdc_mont(&tt3)),
        }
    }
}

impl ConditionallySelectable for Fp2Element {
    fn conditional_select(a: &Fp2Element, b: &Fp2Element, choice: Choice) -> Fp2Element {
        Fp2Element {
            c0: FieldElement::conditional_select(&a.c0, &b.c0, choice),
            c1: FieldElement::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl ConstantTimeEq for Fp2Element {
    fn ct_eq(&self, other: &Fp2Element) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl PartialEq for Fp2Element {
    fn eq(&self, other: &Fp2Element) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Fp2Element {}

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

        fn fp2(&mut self) -> Fp2Element {
            Fp2Element {
                c0: self.field_element(),
                c1: self.field_element(),
            }
        }
    }

    /// Textbook (i² = -1) multiplication, using only strict base-field
    /// operations.
    fn schoolbook_mul(a: &Fp2Element, b: &Fp2Element) -> Fp2Element {
        Fp2Element {
            c0: &(&a.c0 * &b.c0) - &(&a.c1 * &b.c1),
            c1: &(&a.c0 * &b.c1) + &(&a.c1 * &b.c0),
        }
    }

    #[test]
    fn i_squared_is_minus_one() {
        let i = Fp2Element {
            c0: FieldElement::ZERO,
            c1: FieldElement::ONE,
        };
        assert_eq!(i.square(), -&Fp2Element::ONE);
    }

    #[test]
    fn lazy_mul_matches_schoolbook() {
        let mut rng = XorShift64(0x2718_2818);
        for _ in 0..32 {
            let a = rng.fp2();
            let b = rng.fp2();
            assert_eq!(&a * &b, schoolbook_mul(&a, &b));
        }
    }

    #[test]
    fn square_matches_mul() {
        let mut rng = XorShift64(0x3141_5926);
        for _ in 0..32 {
            let a = rng.fp2();
            assert_eq!(a.square(), &a * &a);
        }
        assert_eq!(Fp2Element::ZERO.square(), Fp2Element::ZERO);
    }

    #[test]
    fn mul_distributes() {
        let mut rng = XorShift64(0x1618_0339);
        for _ in 0..16 {
            let a = rng.fp2();
            let b = rng.fp2();
            let c = rng.fp2();
            assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }
    }

    #[test]
    fn inversion_gives_one() {
        let mut rng = XorShift64(0x1414_2135);
        for _ in 0..8 {
            let a = rng.fp2();
            assert_eq!(&a * &a.invert(), Fp2Element::ONE);
            assert_eq!(a.invert_vartime(), a.invert());
        }
        // purely real and purely imaginary elements
        let mut rng = XorShift64(0xb0b);
        let re = Fp2Element {
            c0: rng.field_element(),
            c1: FieldElement::ZERO,
        };
        assert_eq!(&re * &re.invert(), Fp2Element::ONE);
        let im = Fp2Element {
            c0: FieldElement::ZERO,
            c1: rng.field_element(),
        };
        assert_eq!(&im * &im.invert(), Fp2Element::ONE);
    }

    #[test]
    fn batch_inversion_matches_individual() {
        let mut rng = XorShift64(0x1730_9504);
        let (a, b, c) = (rng.fp2(), rng.fp2(), rng.fp2());
        let (ia, ib, ic) = Fp2Element::batch_invert_3(&a, &b, &c);
        assert_eq!(ia, a.invert());
        assert_eq!(ib, b.invert());
        assert_eq!(ic, c.invert());
    }

    #[test]
    fn halving_doubles_back() {
        let mut rng = XorShift64(0x8675_309);
        for _ in 0..8 {
            let a = rng.fp2();
            let h = a.div2();
            assert_eq!(&h + &h, a);
        }
    }

    #[test]
    fn bytes_round_trip() {
        let mut rng = XorShift64(0x600d_cafe);
        for _ in 0..8 {
            let a = rng.fp2();
            assert_eq!(Fp2Element::from_bytes(&a.to_bytes()), a);
        }
    }
}
