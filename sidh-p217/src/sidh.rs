// -*- mode: rust; -*-
//
// This file is part of sidh-p217.
// See LICENSE for licensing information.

//! Ephemeral supersingular-isogeny Diffie-Hellman over p217.
//!
//! Two layers are provided.  The byte-level functions
//! ([`ephemeral_keygen_alice`] and friends) operate on raw encodings
//! and carry the protocol semantics.  On top of them sit misuse-resistant
//! typed wrappers: an [`EphemeralSecretAlice`] can only be generated
//! from fresh randomness and is consumed by its single
//! [`diffie_hellman`](EphemeralSecretAlice::diffie_hellman) call.
//!
//! # Warning
//!
//! SIDH is only secure against passive adversaries when keys are used
//! exactly once.  Nothing here validates the peer's public key; reusing
//! a secret against adaptively chosen public keys leaks it.

#![allow(non_snake_case)]

use rand_core::CryptoRng;

#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{
    ALICE_BASIS, ALICE_ORDER_BITS, BOB_BASIS, BOB_ORDER_BITS, MASK_ALICE, MASK_BOB,
    PUBLIC_KEY_BYTES, SECRET_KEY_BYTES, SHARED_SECRET_BYTES, STRATEGY_ALICE, STRATEGY_BOB,
};
use crate::fp2::{Fp2Element, FP2_ENCODED_BYTES};
use crate::isogeny::{four_isogeny_walk, three_isogeny_walk};
use crate::montgomery::{j_invariant, ladder3pt, recover_a, ProjectivePoint};

fn starting_curve_a() -> Fp2Element {
    let one = Fp2Element::ONE;
    let two = &one + &one;
    let four = &two + &two;
    &four + &two
}

fn encode_public_key(xP: &Fp2Element, xQ: &Fp2Element, xR: &Fp2Element) -> [u8; PUBLIC_KEY_BYTES] {
    let mut pk = [0u8; PUBLIC_KEY_BYTES];
    pk[..FP2_ENCODED_BYTES].copy_from_slice(&xP.to_bytes());
    pk[FP2_ENCODED_BYTES..2 * FP2_ENCODED_BYTES].copy_from_slice(&xQ.to_bytes());
    pk[2 * FP2_ENCODED_BYTES..].copy_from_slice(&xR.to_bytes());
    pk
}

fn decode_public_key(pk: &[u8; PUBLIC_KEY_BYTES]) -> (Fp2Element, Fp2Element, Fp2Element) {
    let mut buf = [0u8; FP2_ENCODED_BYTES];
    buf.copy_from_slice(&pk[..FP2_ENCODED_BYTES]);
    let xP = Fp2Element::from_bytes(&buf);
    buf.copy_from_slice(&pk[FP2_ENCODED_BYTES..2 * FP2_ENCODED_BYTES]);
    let xQ = Fp2Element::from_bytes(&buf);
    buf.copy_from_slice(&pk[2 * FP2_ENCODED_BYTES..]);
    let xR = Fp2Element::from_bytes(&buf);
    (xP, xQ, xR)
}

/// Compute Alice's public key: push Bob's torsion basis through the
/// 2^110-isogeny whose kernel is \\(P_A + [\mathrm{sk}]Q_A\\).
pub fn ephemeral_keygen_alice(sk: &[u8; SECRET_KEY_BYTES]) -> [u8; PUBLIC_KEY_BYTES] {
    let A = starting_curve_a();
    let one = Fp2Element::ONE;
    let two = &one + &one;
    let c24 = &two + &two;
    let a24plus = &c24 + &c24;

    let mut aux = [
        ProjectivePoint::from_affine_x(&BOB_BASIS[0]),
        ProjectivePoint::from_affine_x(&BOB_BASIS[1]),
        ProjectivePoint::from_affine_x(&BOB_BASIS[2]),
    ];
    let S = ladder3pt(
        &ALICE_BASIS[0],
        &ALICE_BASIS[1],
        &ALICE_BASIS[2],
        sk,
        ALICE_ORDER_BITS,
        &A,
    );
    let _ = four_isogeny_walk(&S, &a24plus, &c24, &STRATEGY_ALICE, &mut aux);

    let (zP, zQ, zR) = Fp2Element::batch_invert_3(&aux[0].Z, &aux[1].Z, &aux[2].Z);
    encode_public_key(&(&aux[0].X * &zP), &(&aux[1].X * &zQ), &(&aux[2].X * &zR))
}

/// Compute Bob's public key: push Alice's torsion basis through the
/// 3^67-isogeny whose kernel is \\(P_B + [\mathrm{sk}]Q_B\\).
pub fn ephemeral_keygen_bob(sk: &[u8; SECRET_KEY_BYTES]) -> [u8; PUBLIC_KEY_BYTES] {
    let A = starting_curve_a();
    let one = Fp2Element::ONE;
    let two = &one + &one;
    let a24minus = &two + &two;
    let a24plus = &a24minus + &a24minus;

    let mut aux = [
        ProjectivePoint::from_affine_x(&ALICE_BASIS[0]),
        ProjectivePoint::from_affine_x(&ALICE_BASIS[1]),
        ProjectivePoint::from_affine_x(&ALICE_BASIS[2]),
    ];
    let S = ladder3pt(
        &BOB_BASIS[0],
        &BOB_BASIS[1],
        &BOB_BASIS[2],
        sk,
        BOB_ORDER_BITS,
        &A,
    );
    let _ = three_isogeny_walk(&S, &a24minus, &a24plus, &STRATEGY_BOB, &mut aux);

    let (zP, zQ, zR) = Fp2Element::batch_invert_3(&aux[0].Z, &aux[1].Z, &aux[2].Z);
    encode_public_key(&(&aux[0].X * &zP), &(&aux[1].X * &zQ), &(&aux[2].X * &zR))
}

/// Compute Alice's shared secret from Bob's public key: the
/// j-invariant of the curve reached by walking Alice's isogeny on
/// Bob's codomain.
pub fn ephemeral_shared_alice(
    sk: &[u8; SECRET_KEY_BYTES],
    pk: &[u8; PUBLIC_KEY_BYTES],
) -> [u8; SHARED_SECRET_BYTES] {
    let (xP, xQ, xR) = decode_public_key(pk);
    let A = recover_a(&xP, &xQ, &xR);

    let one = Fp2Element::ONE;
    let mut c24 = &one + &one;
    let a24plus = &A + &c24;
    c24 = &c24 + &c24;

    let S = ladder3pt(&xP, &xQ, &xR, sk, ALICE_ORDER_BITS, &A);
    let (a24plus, c24) = four_isogeny_walk(&S, &a24plus, &c24, &STRATEGY_ALICE, &mut []);

    let c24_half = c24.div2();
    let Af = &a24plus - &c24_half;
    let Cf = c24_half.div2();
    j_invariant(&Af, &Cf).to_bytes()
}

/// Compute Bob's shared secret from Alice's public key.
pub fn ephemeral_shared_bob(
    sk: &[u8; SECRET_KEY_BYTES],
    pk: &[u8; PUBLIC_KEY_BYTES],
) -> [u8; SHARED_SECRET_BYTES] {
    let (xP, xQ, xR) = decode_public_key(pk);
    let A = recover_a(&xP, &xQ, &xR);

    let one = Fp2Element::ONE;
    let two = &one + &one;
    let a24plus = &A + &two;
    let a24minus = &A - &two;

    let S = ladder3pt(&xP, &xQ, &xR, sk, BOB_ORDER_BITS, &A);
    let (a24minus, a24plus) = three_isogeny_walk(&S, &a24minus, &a24plus, &STRATEGY_BOB, &mut []);

    let mut Af = &a24plus + &a24minus;
    Af = &Af + &Af;
    let Cf = &a24plus - &a24minus;
    j_invariant(&Af, &Cf).to_bytes()
}

/// A public key produced by Alice's keygen, consumed by Bob's
/// shared-secret computation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PublicKeyAlice(pub(crate) [u8; PUBLIC_KEY_BYTES]);

/// A public key produced by Bob's keygen, consumed by Alice's
/// shared-secret computation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PublicKeyBob(pub(crate) [u8; PUBLIC_KEY_BYTES]);

macro_rules! public_key_impls {
    ($name:ident) => {
        impl From<[u8; PUBLIC_KEY_BYTES]> for $name {
            fn from(bytes: [u8; PUBLIC_KEY_BYTES]) -> $name {
                $name(bytes)
            }
        }

        impl $name {
            /// Convert this public key to a byte array.
            #[inline]
            pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_BYTES] {
                self.0
            }

            /// View this public key as a byte array.
            #[inline]
            pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_BYTES] {
                &self.0
            }
        }

        impl AsRef<[u8]> for $name {
            #[inline]
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

public_key_impls!(PublicKeyAlice);
public_key_impls!(PublicKeyBob);

/// The shared j-invariant both parties arrive at.
pub struct SharedSecret(pub(crate) [u8; SHARED_SECRET_BYTES]);

impl SharedSecret {
    /// Convert this shared secret to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SHARED_SECRET_BYTES] {
        self.0
    }

    /// View this shared secret as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_BYTES] {
        &self.0
    }
}

impl AsRef<[u8]> for SharedSecret {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for SharedSecret {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        self.0.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for SharedSecret {}

/// A short-lived secret for Alice's side of the exchange, consumed by
/// its single [`diffie_hellman`](EphemeralSecretAlice::diffie_hellman)
/// call.
pub struct EphemeralSecretAlice(pub(crate) [u8; SECRET_KEY_BYTES]);

impl EphemeralSecretAlice {
    /// Generate a new secret with the supplied RNG.
    pub fn random_from_rng<R: CryptoRng + ?Sized>(csprng: &mut R) -> Self {
        let mut bytes = [0u8; SECRET_KEY_BYTES];
        csprng.fill_bytes(&mut bytes);
        bytes[SECRET_KEY_BYTES - 1] &= MASK_ALICE;
        EphemeralSecretAlice(bytes)
    }

    /// Perform the key agreement between `self` and Bob's public key.
    pub fn diffie_hellman(self, their_public: &PublicKeyBob) -> SharedSecret {
        SharedSecret(ephemeral_shared_alice(&self.0, &their_public.0))
    }
}

impl<'a> From<&'a EphemeralSecretAlice> for PublicKeyAlice {
    /// Compute the public key corresponding to this secret.
    fn from(secret: &'a EphemeralSecretAlice) -> PublicKeyAlice {
        PublicKeyAlice(ephemeral_keygen_alice(&secret.0))
    }
}

impl Drop for EphemeralSecretAlice {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        self.0.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for EphemeralSecretAlice {}

/// A short-lived secret for Bob's side of the exchange.
pub struct EphemeralSecretBob(pub(crate) [u8; SECRET_KEY_BYTES]);

impl EphemeralSecretBob {
    /// Generate a new secret with the supplied RNG.
    pub fn random_from_rng<R: CryptoRng + ?Sized>(csprng: &mut R) -> Self {
        let mut bytes = [0u8; SECRET_KEY_BYTES];
        csprng.fill_bytes(&mut bytes);
        bytes[SECRET_KEY_BYTES - 1] &= MASK_BOB;
        EphemeralSecretBob(bytes)
    }

    /// Perform the key agreement between `self` and Alice's public key.
    pub fn diffie_hellman(self, their_public: &PublicKeyAlice) -> SharedSecret {
        SharedSecret(ephemeral_shared_bob(&self.0, &their_public.0))
    }
}

impl<'a> From<&'a EphemeralSecretBob> for PublicKeyBob {
    /// Compute the public key corresponding to this secret.
    fn from(secret: &'a EphemeralSecretBob) -> PublicKeyBob {
        PublicKeyBob(ephemeral_keygen_bob(&secret.0))
    }
}

impl Drop for EphemeralSecretBob {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        self.0.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for EphemeralSecretBob {}
