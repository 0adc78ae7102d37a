// -*- mode: rust; -*-
//
// This file is part of sidh-p217.
// See LICENSE for licensing information.

//! Field arithmetic modulo \\(p = 2^{110} \cdot 3^{67} - 1\\), using
//! \\(64\\)-bit limbs with \\(128\\)-bit products.
//!
//! Elements are kept in Montgomery representation with \\(R = 2^{256}\\)
//! and are only loosely reduced: every operation accepts inputs in
//! \\([0, 2p)\\) and produces outputs in \\([0, 2p)\\).  Canonical form is
//! established by [`FieldElement217::correct`] at the wire boundary.

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::backend::serial::u64::constants;

/// An element of GF(p217) in Montgomery representation, four `u64`
/// limbs, least significant first, value in \\([0, 2p)\\).
#[derive(Copy, Clone)]
pub struct FieldElement217(pub(crate) [u64; 4]);

impl Debug for FieldElement217 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement217({:?})", &self.0[..])
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement217 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// u64 * u64 = u128 multiply helper
#[inline(always)]
fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

/// Add with carry; returns (sum, carry out).
#[inline(always)]
fn adc(carry: u64, x: u64, y: u64) -> (u64, u64) {
    let t = (x as u128) + (y as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

/// Subtract with borrow; returns (difference, borrow out).
#[inline(always)]
fn sbb(borrow: u64, x: u64, y: u64) -> (u64, u64) {
    let (d1, b1) = x.overflowing_sub(y);
    let (d2, b2) = d1.overflowing_sub(borrow);
    (d2, (b1 | b2) as u64)
}

/// Product-scanning accumulator: add x*y into the three-word window.
#[inline(always)]
fn mul_acc(x: u64, y: u64, acc: (u64, u64, u64)) -> (u64, u64, u64) {
    let (v, u, t) = acc;
    let prod = m(x, y);
    let (v, carry) = adc(0, v, prod as u64);
    let (u, carry) = adc(carry, u, (prod >> 64) as u64);
    (v, u, t.wrapping_add(carry))
}

/// Add a single word into the three-word accumulator window.
#[inline(always)]
fn word_acc(w: u64, acc: (u64, u64, u64)) -> (u64, u64, u64) {
    let (v, u, t) = acc;
    let (v, carry) = adc(0, v, w);
    let (u, carry) = adc(carry, u, 0);
    (v, u, t.wrapping_add(carry))
}

/// Multiprecision addition, `a + b`; returns the sum and the carry out
/// of the top limb.
#[inline(always)]
pub(crate) fn mp_add(a: &[u64; 4], b: &[u64; 4]) -> ([u64; 4], u64) {
    let mut c = [0u64; 4];
    let mut carry = 0u64;
    for i in 0..4 {
        let (s, k) = adc(carry, a[i], b[i]);
        c[i] = s;
        carry = k;
    }
    (c, carry)
}

/// Multiprecision subtraction, `a - b`; returns the difference and the
/// borrow out of the top limb.
#[inline(always)]
pub(crate) fn mp_sub(a: &[u64; 4], b: &[u64; 4]) -> ([u64; 4], u64) {
    let mut c = [0u64; 4];
    let mut borrow = 0u64;
    for i in 0..4 {
        let (d, k) = sbb(borrow, a[i], b[i]);
        c[i] = d;
        borrow = k;
    }
    (c, borrow)
}

/// `a - b + 4p`, without any data-dependent correction.  Used by the
/// extension-field squaring, whose operands stay below \\(2p\\) so the
/// result stays positive and below \\(6p\\).
#[inline(always)]
pub(crate) fn mp_sub_p4(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
    let (d, _) = mp_sub(a, b);
    let (c, _) = mp_add(&d, &constants::P217X4);
    c
}

/// Logical right shift of a 4-limb value by one bit.
#[inline(always)]
pub(crate) fn mp_shiftr1(a: &mut [u64; 4]) {
    for i in 0..3 {
        a[i] = (a[i] >> 1) | (a[i + 1] << 63);
    }
    a[3] >>= 1;
}

/// Schoolbook product-scanning multiplication, `a * b` as eight limbs.
pub(crate) fn mp_mul(a: &[u64; 4], b: &[u64; 4]) -> [u64; 8] {
    let mut c = [0u64; 8];
    let mut acc = (0u64, 0u64, 0u64);

    acc = mul_acc(a[0], b[0], acc);
    c[0] = acc.0;
    acc = (acc.1, acc.2, 0);

    acc = mul_acc(a[0], b[1], acc);
    acc = mul_acc(a[1], b[0], acc);
    c[1] = acc.0;
    acc = (acc.1, acc.2, 0);

    acc = mul_acc(a[0], b[2], acc);
    acc = mul_acc(a[1], b[1], acc);
    acc = mul_acc(a[2], b[0], acc);
    c[2] = acc.0;
    acc = (acc.1, acc.2, 0);

    acc = mul_acc(a[0], b[3], acc);
    acc = mul_acc(a[1], b[2], acc);
    acc = mul_acc(a[2], b[1], acc);
    acc = mul_acc(a[3], b[0], acc);
    c[3] = acc.0;
    acc = (acc.1, acc.2, 0);

    acc = mul_acc(a[1], b[3], acc);
    acc = mul_acc(a[2], b[2], acc);
    acc = mul_acc(a[3], b[1], acc);
    c[4] = acc.0;
    acc = (acc.1, acc.2, 0);

    acc = mul_acc(a[2], b[3], acc);
    acc = mul_acc(a[3], b[2], acc);
    c[5] = acc.0;
    acc = (acc.1, acc.2, 0);

    acc = mul_acc(a[3], b[3], acc);
    c[6] = acc.0;
    c[7] = acc.1;

    c
}

/// Montgomery reduction exploiting \\(p + 1 = 2^{110} \cdot 3^{67}\\),
/// whose lowest limb is zero: the quotient digits are the running low
/// limbs themselves, so no inverse multiplication is needed.
///
/// For input `ma < R * p` the output is in \\([0, 2p)\\) and congruent
/// to `ma * R^{-1} mod p`.
pub(crate) fn rdc_mont(ma: &[u64; 8]) -> [u64; 4] {
    let p1 = &constants::P217P1;
    let mut acc = (0u64, 0u64, 0u64);

    acc = word_acc(ma[0], acc);
    let m0 = acc.0;
    acc = (acc.1, acc.2, 0);

    acc = mul_acc(m0, p1[1], acc);
    acc = word_acc(ma[1], acc);
    let m1 = acc.0;
    acc = (acc.1, acc.2, 0);

    acc = mul_acc(m0, p1[2], acc);
    acc = mul_acc(m1, p1[1], acc);
    acc = word_acc(ma[2], acc);
    let m2 = acc.0;
    acc = (acc.1, acc.2, 0);

    acc = mul_acc(m0, p1[3], acc);
    acc = mul_acc(m1, p1[2], acc);
    acc = mul_acc(m2, p1[1], acc);
    acc = word_acc(ma[3], acc);
    let m3 = acc.0;
    acc = (acc.1, acc.2, 0);

    acc = mul_acc(m1, p1[3], acc);
    acc = mul_acc(m2, p1[2], acc);
    acc = mul_acc(m3, p1[1], acc);
    acc = word_acc(ma[4], acc);
    let r0 = acc.0;
    acc = (acc.1, acc.2, 0);

    acc = mul_acc(m2, p1[3], acc);
    acc = mul_acc(m3, p1[2], acc);
    acc = word_acc(ma[5], acc);
    let r1 = acc.0;
    acc = (acc.1, acc.2, 0);

    acc = mul_acc(m3, p1[3], acc);
    acc = word_acc(ma[6], acc);
    let r2 = acc.0;
    acc = (acc.1, acc.2, 0);

    let r3 = acc.0.wrapping_add(ma[7]);

    [r0, r1, r2, r3]
}

/// Eight-limb double subtraction, `c - a - b`.  Callers guarantee the
/// result is nonnegative (`c` is a product dominating both terms), so
/// the final borrows are discarded.
pub(crate) fn mp_dblsub_wide(c: &mut [u64; 8], a: &[u64; 8], b: &[u64; 8]) {
    let mut borrow = 0u64;
    for i in 0..8 {
        let (d, k) = sbb(borrow, c[i], a[i]);
        c[i] = d;
        borrow = k;
    }
    borrow = 0;
    for i in 0..8 {
        let (d, k) = sbb(borrow, c[i], b[i]);
        c[i] = d;
        borrow = k;
    }
}

/// Eight-limb subtraction `a - b` with conditional correction by
/// \\(p \cdot 2^{256}\\): on borrow, `p` is added to the upper half so
/// the result stays a valid reduction input below \\(R \cdot p\\).
pub(crate) fn mp_subadd_wide(a: &[u64; 8], b: &[u64; 8]) -> [u64; 8] {
    let mut c = [0u64; 8];
    let mut borrow = 0u64;
    for i in 0..8 {
        let (d, k) = sbb(borrow, a[i], b[i]);
        c[i] = d;
        borrow = k;
    }
    let mask = borrow.wrapping_neg();
    let mut carry = 0u64;
    for i in 0..4 {
        let (s, k) = adc(carry, c[4 + i], constants::P217[i] & mask);
        c[4 + i] = s;
        carry = k;
    }
    c
}

impl FieldElement217 {
    /// The zero element.
    pub const ZERO: FieldElement217 = FieldElement217([0, 0, 0, 0]);
    /// One in Montgomery representation, \\(R \bmod p\\).
    pub const ONE: FieldElement217 = FieldElement217(constants::MONTGOMERY_ONE);

    /// Modular negation, \\(2p - a\\).
    ///
    /// The image of zero is \\(2p \equiv 0\\), which is outside the
    /// loose range; callers never negate zero on paths that demand
    /// canonical output.
    pub(crate) fn negate(&mut self) {
        let (c, _) = mp_sub(&constants::P217X2, &self.0);
        self.0 = c;
    }

    /// Halve, mapping odd values through \\(a + p\\) first.  The odd
    /// mask is derived from the low bit, never branched on.
    pub fn div2(&self) -> FieldElement217 {
        let mask = (self.0[0] & 1).wrapping_neg();
        let mut c = [0u64; 4];
        let mut carry = 0u64;
        for i in 0..4 {
            let (s, k) = adc(carry, self.0[i], constants::P217[i] & mask);
            c[i] = s;
            carry = k;
        }
        mp_shiftr1(&mut c);
        FieldElement217(c)
    }

    /// Reduce from \\([0, 2p)\\) to canonical \\([0, p)\\).
    pub fn correct(&self) -> FieldElement217 {
        let (d, borrow) = mp_sub(&self.0, &constants::P217);
        let mask = borrow.wrapping_neg();
        let mut c = [0u64; 4];
        let mut carry = 0u64;
        for i in 0..4 {
            let (s, k) = adc(carry, d[i], constants::P217[i] & mask);
            c[i] = s;
            carry = k;
        }
        FieldElement217(c)
    }

    /// Montgomery squaring.
    pub fn square(&self) -> FieldElement217 {
        let t = mp_mul(&self.0, &self.0);
        FieldElement217(rdc_mont(&t))
    }

    /// Convert a plain-integer representative into the Montgomery
    /// domain by multiplying with \\(R^2\\).
    pub(crate) fn to_montgomery(value: &[u64; 4]) -> FieldElement217 {
        let t = mp_mul(value, &constants::MONTGOMERY_R2);
        FieldElement217(rdc_mont(&t))
    }

    /// Leave the Montgomery domain; the result is canonical.
    pub(crate) fn from_montgomery(&self) -> [u64; 4] {
        let mut t = [0u64; 8];
        t[..4].copy_from_slice(&self.0);
        FieldElement217(rdc_mont(&t)).correct().0
    }

    /// Deserialize 28 little-endian octets into a Montgomery-domain
    /// element.
    pub fn from_bytes(bytes: &[u8; 28]) -> FieldElement217 {
        let mut limbs = [0u64; 4];
        for i in 0..3 {
            let mut w = [0u8; 8];
            w.copy_from_slice(&bytes[8 * i..8 * i + 8]);
            limbs[i] = u64::from_le_bytes(w);
        }
        let mut w = [0u8; 4];
        w.copy_from_slice(&bytes[24..28]);
        limbs[3] = u32::from_le_bytes(w) as u64;
        FieldElement217::to_montgomery(&limbs)
    }

    /// Serialize to 28 little-endian octets of the canonical value.
    pub fn to_bytes(&self) -> [u8; 28] {
        let limbs = self.from_montgomery();
        let mut bytes = [0u8; 28];
        for i in 0..3 {
            bytes[8 * i..8 * i + 8].copy_from_slice(&limbs[i].to_le_bytes());
        }
        bytes[24..28].copy_from_slice(&(limbs[3] as u32).to_le_bytes());
        bytes
    }
}

impl<'a, 'b> Add<&'b FieldElement217> for &'a FieldElement217 {
    type Output = FieldElement217;
    /// Modular addition with mask-based correction: add, subtract
    /// \\(2p\\), and add it back under the borrow mask.
    fn add(self, rhs: &'b FieldElement217) -> FieldElement217 {
        let (c, _) = mp_add(&self.0, &rhs.0);
        let (d, borrow) = mp_sub(&c, &constants::P217X2);
        let mask = borrow.wrapping_neg();
        let mut out = [0u64; 4];
        let mut carry = 0u64;
        for i in 0..4 {
            let (s, k) = adc(carry, d[i], constants::P217X2[i] & mask);
            out[i] = s;
            carry = k;
        }
        FieldElement217(out)
    }
}

impl<'a, 'b> Sub<&'b FieldElement217> for &'a FieldElement217 {
    type Output = FieldElement217;
    /// Modular subtraction; \\(2p\\) is added back under the borrow
    /// mask.
    fn sub(self, rhs: &'b FieldElement217) -> FieldElement217 {
        let (d, borrow) = mp_sub(&self.0, &rhs.0);
        let mask = borrow.wrapping_neg();
        let mut out = [0u64; 4];
        let mut carry = 0u64;
        for i in 0..4 {
            let (s, k) = adc(carry, d[i], constants::P217X2[i] & mask);
            out[i] = s;
            carry = k;
        }
        FieldElement217(out)
    }
}

impl<'a, 'b> Mul<&'b FieldElement217> for &'a FieldElement217 {
    type Output = FieldElement217;
    /// Montgomery multiplication: full product then special-form
    /// reduction.
    fn mul(self, rhs: &'b FieldElement217) -> FieldElement217 {
        let t = mp_mul(&self.0, &rhs.0);
        FieldElement217(rdc_mont(&t))
    }
}

impl<'a> Neg for &'a FieldElement217 {
    type Output = FieldElement217;
    fn neg(self) -> FieldElement217 {
        let mut out = *self;
        out.negate();
        out
    }
}

impl ConditionallySelectable for FieldElement217 {
    fn conditional_select(
        a: &FieldElement217,
        b: &FieldElement217,
        choice: Choice,
    ) -> FieldElement217 {
        FieldElement217([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl ConstantTimeEq for FieldElement217 {
    /// Equality of the canonical encodings.
    fn ct_eq(&self, other: &FieldElement217) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl PartialEq for FieldElement217 {
    fn eq(&self, other: &FieldElement217) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement217 {}

/// Variable-time inverse of a plain 4-limb integer modulo `p`, by the
/// binary extended gcd.  Reserved for public values.
pub(crate) fn inv_uint_vartime(a: &[u64; 4]) -> [u64; 4] {
    #[inline]
    fn is_one(x: &[u64; 4]) -> bool {
        x[0] == 1 && x[1] == 0 && x[2] == 0 && x[3] == 0
    }
    #[inline]
    fn half_mod_p(x: &[u64; 4]) -> [u64; 4] {
        let mask = (x[0] & 1).wrapping_neg();
        let mut c = [0u64; 4];
        let mut carry = 0u64;
        for i in 0..4 {
            let (s, k) = adc(carry, x[i], constants::P217[i] & mask);
            c[i] = s;
            carry = k;
        }
        mp_shiftr1(&mut c);
        c
    }
    #[inline]
    fn sub_mod_p(x: &[u64; 4], y: &[u64; 4]) -> [u64; 4] {
        let (d, borrow) = mp_sub(x, y);
        if borrow != 0 {
            let (c, _) = mp_add(&d, &constants::P217);
            c
        } else {
            d
        }
    }

    // Reduce the representative below p; the gcd invariant needs it.
    let mut u = FieldElement217(*a).correct().0;
    let mut v = constants::P217;
    let mut x1 = [1u64, 0, 0, 0];
    let mut x2 = [0u64; 4];
    debug_assert!(u != [0u64; 4]);

    while !is_one(&u) && !is_one(&v) {
        while u[0] & 1 == 0 {
            mp_shiftr1(&mut u);
            x1 = half_mod_p(&x1);
        }
        while v[0] & 1 == 0 {
            mp_shiftr1(&mut v);
            x2 = half_mod_p(&x2);
        }
        let (d, borrow) = mp_sub(&u, &v);
        if borrow == 0 {
            u = d;
            x1 = sub_mod_p(&x1, &x2);
        } else {
            let (d, _) = mp_sub(&v, &u);
            v = d;
            x2 = sub_mod_p(&x2, &x1);
        }
    }
    if is_one(&u) {
        x1
    } else {
        x2
    }
}
