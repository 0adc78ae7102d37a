// -*- mode: rust; -*-
//
// This file is part of sike-p217.
// See LICENSE for licensing information.

//! The SIKE key encapsulation mechanism over p217.
//!
//! The KEM applies a Fujisaki-Okamoto style transform to the ephemeral
//! isogeny exchange: the encapsulator derives its walk scalar from the
//! message and the recipient's public key, and the decapsulator
//! re-runs that walk to check the ciphertext.  A mismatched ciphertext
//! is rejected implicitly, by hashing a secret value in place of the
//! message so the returned key is uniformly wrong.

use core::fmt;

use rand_core::CryptoRng;

use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake256,
};

use subtle::{ConditionallySelectable, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

use sidh_p217::constants::{MASK_ALICE, MASK_BOB, PUBLIC_KEY_BYTES, SECRET_KEY_BYTES};
use sidh_p217::{ephemeral_keygen_alice, ephemeral_keygen_bob, ephemeral_shared_alice,
    ephemeral_shared_bob};

/// Size of the KEM message and of the derived session key.
pub const MSG_BYTES: usize = 16;

/// Size of an encoded KEM secret key:
/// rejection seed, isogeny scalar, cached public key.
pub const KEM_SECRET_KEY_BYTES: usize = MSG_BYTES + SECRET_KEY_BYTES + PUBLIC_KEY_BYTES;

/// Size of an encoded KEM public key.
pub const KEM_PUBLIC_KEY_BYTES: usize = PUBLIC_KEY_BYTES;

/// Size of a ciphertext: the encapsulator's public key plus the
/// masked message.
pub const CIPHERTEXT_BYTES: usize = PUBLIC_KEY_BYTES + MSG_BYTES;

fn shake256(inputs: &[&[u8]], out: &mut [u8]) {
    let mut hasher = Shake256::default();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize_xof().read(out);
}

/// An error in decoding a KEM object from bytes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SikeError {
    /// The byte slice had the wrong length for the object.
    WrongLength,
}

impl fmt::Display for SikeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SikeError::WrongLength => write!(f, "wrong length for KEM object"),
        }
    }
}

impl core::error::Error for SikeError {}

/// A KEM public key, held by the encapsulator.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PublicKey(pub(crate) [u8; KEM_PUBLIC_KEY_BYTES]);

/// A KEM secret key.  Carries the implicit-rejection seed, the isogeny
/// scalar, and a cached copy of the public key for re-encryption.
pub struct SecretKey(pub(crate) [u8; KEM_SECRET_KEY_BYTES]);

/// A KEM ciphertext.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Ciphertext(pub(crate) [u8; CIPHERTEXT_BYTES]);

/// The encapsulated session key.
pub struct SharedSecret(pub(crate) [u8; MSG_BYTES]);

macro_rules! byte_conversions {
    ($name:ident, $len:expr) => {
        impl $name {
            /// Convert to a byte array.
            #[inline]
            pub fn to_bytes(&self) -> [u8; $len] {
                self.0
            }

            /// View as a byte array.
            #[inline]
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl AsRef<[u8]> for $name {
            #[inline]
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> $name {
                $name(bytes)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = SikeError;

            fn try_from(bytes: &[u8]) -> Result<$name, SikeError> {
                let bytes: [u8; $len] = bytes.try_into().map_err(|_| SikeError::WrongLength)?;
                Ok($name(bytes))
            }
        }
    };
}

byte_conversions!(PublicKey, KEM_PUBLIC_KEY_BYTES);
byte_conversions!(SecretKey, KEM_SECRET_KEY_BYTES);
byte_conversions!(Ciphertext, CIPHERTEXT_BYTES);

impl SharedSecret {
    /// Convert this session key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; MSG_BYTES] {
        self.0
    }

    /// View this session key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; MSG_BYTES] {
        &self.0
    }
}

impl AsRef<[u8]> for SharedSecret {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        self.0.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for SecretKey {}

impl Drop for SharedSecret {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        self.0.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for SharedSecret {}

impl SecretKey {
    fn rejection_seed(&self) -> &[u8] {
        &self.0[..MSG_BYTES]
    }

    fn isogeny_scalar(&self) -> [u8; SECRET_KEY_BYTES] {
        let mut sk = [0u8; SECRET_KEY_BYTES];
        sk.copy_from_slice(&self.0[MSG_BYTES..MSG_BYTES + SECRET_KEY_BYTES]);
        sk
    }

    fn cached_public_key(&self) -> &[u8] {
        &self.0[MSG_BYTES + SECRET_KEY_BYTES..]
    }

    /// The public key cached inside this secret key.
    pub fn public_key(&self) -> PublicKey {
        let mut pk = [0u8; KEM_PUBLIC_KEY_BYTES];
        pk.copy_from_slice(self.cached_public_key());
        PublicKey(pk)
    }
}

/// Derive the encapsulator's walk scalar from the message and the
/// recipient's public key.
fn derive_scalar(message: &[u8], pk: &[u8]) -> [u8; SECRET_KEY_BYTES] {
    let mut r = [0u8; SECRET_KEY_BYTES];
    shake256(&[message, pk], &mut r);
    r[SECRET_KEY_BYTES - 1] &= MASK_ALICE;
    r
}

/// Generate a KEM key pair with the supplied RNG.
pub fn keypair<R: CryptoRng + ?Sized>(csprng: &mut R) -> (PublicKey, SecretKey) {
    let mut sk = [0u8; KEM_SECRET_KEY_BYTES];
    csprng.fill_bytes(&mut sk[..MSG_BYTES + SECRET_KEY_BYTES]);
    sk[MSG_BYTES + SECRET_KEY_BYTES - 1] &= MASK_BOB;

    let mut scalar = [0u8; SECRET_KEY_BYTES];
    scalar.copy_from_slice(&sk[MSG_BYTES..MSG_BYTES + SECRET_KEY_BYTES]);
    let pk = ephemeral_keygen_bob(&scalar);
    sk[MSG_BYTES + SECRET_KEY_BYTES..].copy_from_slice(&pk);

    #[cfg(feature = "zeroize")]
    scalar.zeroize();

    (PublicKey(pk), SecretKey(sk))
}

/// Encapsulate a fresh session key to `pk`.
pub fn encapsulate<R: CryptoRng + ?Sized>(
    csprng: &mut R,
    pk: &PublicKey,
) -> (Ciphertext, SharedSecret) {
    let mut message = [0u8; MSG_BYTES];
    csprng.fill_bytes(&mut message);

    let r = derive_scalar(&message, &pk.0);
    let c0 = ephemeral_keygen_alice(&r);
    let j = ephemeral_shared_alice(&r, &pk.0);

    let mut mask = [0u8; MSG_BYTES];
    shake256(&[&j], &mut mask);

    let mut ct = [0u8; CIPHERTEXT_BYTES];
    ct[..PUBLIC_KEY_BYTES].copy_from_slice(&c0);
    for i in 0..MSG_BYTES {
        ct[PUBLIC_KEY_BYTES + i] = message[i] ^ mask[i];
    }

    let mut ss = [0u8; MSG_BYTES];
    shake256(&[&message, &ct], &mut ss);

    #[cfg(feature = "zeroize")]
    {
        message.zeroize();
        mask.zeroize();
    }

    (Ciphertext(ct), SharedSecret(ss))
}

/// Decapsulate `ct` under `sk`.
///
/// A ciphertext that fails the re-encryption check still yields a
/// deterministic session key, derived from the secret rejection seed
/// instead of the recovered message.  The check and the selection run
/// in constant time.
pub fn decapsulate(sk: &SecretKey, ct: &Ciphertext) -> SharedSecret {
    let mut c0 = [0u8; PUBLIC_KEY_BYTES];
    c0.copy_from_slice(&ct.0[..PUBLIC_KEY_BYTES]);

    let scalar = sk.isogeny_scalar();
    let j = ephemeral_shared_bob(&scalar, &c0);

    let mut mask = [0u8; MSG_BYTES];
    shake256(&[&j], &mut mask);

    let mut message = [0u8; MSG_BYTES];
    for i in 0..MSG_BYTES {
        message[i] = ct.0[PUBLIC_KEY_BYTES + i] ^ mask[i];
    }

    let r = derive_scalar(&message, sk.cached_public_key());
    let c0_check = ephemeral_keygen_alice(&r);
    let good = c0_check.ct_eq(&c0);

    let seed = sk.rejection_seed();
    let mut selected = [0u8; MSG_BYTES];
    for i in 0..MSG_BYTES {
        selected[i] = u8::conditional_select(&seed[i], &message[i], good);
    }

    let mut ss = [0u8; MSG_BYTES];
    shake256(&[&selected, &ct.0], &mut ss);

    #[cfg(feature = "zeroize")]
    {
        message.zeroize();
        mask.zeroize();
        selected.zeroize();
    }

    SharedSecret(ss)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn secret_key_exposes_its_public_half() {
        let mut sk = [0u8; KEM_SECRET_KEY_BYTES];
        for (i, b) in sk.iter_mut().enumerate() {
            *b = i as u8;
        }
        let sk = SecretKey(sk);
        assert_eq!(
            sk.public_key().as_bytes(),
            &sk.0[MSG_BYTES + SECRET_KEY_BYTES..]
        );
    }

    #[test]
    fn try_from_rejects_wrong_lengths() {
        assert_eq!(
            PublicKey::try_from(&[0u8; 10][..]),
            Err(SikeError::WrongLength)
        );
        assert!(Ciphertext::try_from(&[0u8; CIPHERTEXT_BYTES][..]).is_ok());
    }
}
