// -*- mode: rust; -*-
//
// This file is part of sidh-p217.
// See LICENSE for licensing information.

//! Integration tests for sidh-p217.

use hex_literal::hex;

use rand_core::{CryptoRng, RngCore};

use sidh_p217::constants::{PUBLIC_KEY_BYTES, SECRET_KEY_BYTES, SHARED_SECRET_BYTES};
use sidh_p217::{
    ephemeral_keygen_alice, ephemeral_keygen_bob, ephemeral_shared_alice, ephemeral_shared_bob,
    EphemeralSecretAlice, EphemeralSecretBob, PublicKeyAlice, PublicKeyBob,
};

const SK_ALICE: [u8; SECRET_KEY_BYTES] = hex!("0102030405060708090a0b0c0d0e");
const SK_BOB: [u8; SECRET_KEY_BYTES] = hex!("65666768696a6b6c6d6e6f707102");

const PK_ALICE: [u8; PUBLIC_KEY_BYTES] = hex!(
    "7d79b3faf1cf07d0e01bf44d8fd33485553ec01bb43a65a49b262f0055a66b9c
     f937353f7d3d6ad4ef4df0f4c3aeebfda156f234ba5d3500f8a9984e32af1ad7
     6210558aa18a075da96eaa57c35c98daa5a15a00ec14c320bba16adb6189e5be
     ff0dc56c203adc8b8c25e1a2e4d08b00d03793b1e58370809b947155e2cf5363
     4f69125eec79cc8d96ecbc00cc122a17e1cd5613da962ff40cdf0270ece4f165
     6c0b81c4ceda6700"
);

const PK_BOB: [u8; PUBLIC_KEY_BYTES] = hex!(
    "c95ca7d7334394c404fe2463090ba7c728578a03878bd86639b65700e0a03956
     be070df02733ed6909ffa775e03099ddfb3230431325ee00710777f7fe549e4d
     1f332a0866d63cc73099e62bc0285f29e322730065c81921cb0b77020778360f
     3cb1246f965b2cb6c8b0d921e15485007a7cc3347fb7eda00d4e63ad153f7a28
     94fa0b6dac618c036ce2e400d1989f5e11b56bc7774498f9471de6c84c0554be
     c08b3a91c2dead00"
);

const SHARED: [u8; SHARED_SECRET_BYTES] = hex!(
    "ab7d4b8e07e847640aa8fcb952963218dc4921d61d09486408352c00e13a9cfd
     652b1290c6dfe81ce3c4d4d5d3ec9ef25dd5b501b5411501"
);

#[test]
fn known_answer_public_keys() {
    assert_eq!(ephemeral_keygen_alice(&SK_ALICE), PK_ALICE);
    assert_eq!(ephemeral_keygen_bob(&SK_BOB), PK_BOB);
}

#[test]
fn known_answer_shared_secret() {
    assert_eq!(ephemeral_shared_alice(&SK_ALICE, &PK_BOB), SHARED);
    assert_eq!(ephemeral_shared_bob(&SK_BOB, &PK_ALICE), SHARED);
}

/// A fixed-seed xorshift generator so the typed-API test is
/// reproducible.  Not a CSPRNG; test use only.
struct TestRng(u64);

impl RngCore for TestRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let word = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }
}

impl CryptoRng for TestRng {}

#[test]
fn typed_api_agrees_with_byte_level() {
    let mut rng = TestRng(0x5eed_1e55_0123_4567);

    let alice_secret = EphemeralSecretAlice::random_from_rng(&mut rng);
    let alice_public = PublicKeyAlice::from(&alice_secret);
    let bob_secret = EphemeralSecretBob::random_from_rng(&mut rng);
    let bob_public = PublicKeyBob::from(&bob_secret);

    let alice_shared = alice_secret.diffie_hellman(&bob_public);
    let bob_shared = bob_secret.diffie_hellman(&alice_public);

    assert_eq!(alice_shared.as_bytes(), bob_shared.as_bytes());
}

#[test]
fn public_key_byte_conversions() {
    let pk = PublicKeyAlice::from(PK_ALICE);
    assert_eq!(pk.to_bytes(), PK_ALICE);
    assert_eq!(pk.as_bytes(), &PK_ALICE);
    assert_eq!(pk.as_ref(), &PK_ALICE[..]);
}
