// -*- mode: rust; -*-
//
// This file is part of sidh-p217.
// See LICENSE for licensing information.

//! Benchmark the key generation and shared-secret operations.

use criterion::{criterion_group, criterion_main, Criterion};

use rand_core::{OsRng, TryRngCore};

use sidh_p217::{EphemeralSecretAlice, EphemeralSecretBob, PublicKeyAlice, PublicKeyBob};

fn bench_keygen_alice(c: &mut Criterion) {
    let secret = EphemeralSecretAlice::random_from_rng(&mut OsRng.unwrap_err());

    c.bench_function("keygen_alice", move |b| {
        b.iter(|| PublicKeyAlice::from(&secret))
    });
}

fn bench_keygen_bob(c: &mut Criterion) {
    let secret = EphemeralSecretBob::random_from_rng(&mut OsRng.unwrap_err());

    c.bench_function("keygen_bob", move |b| {
        b.iter(|| PublicKeyBob::from(&secret))
    });
}

fn bench_shared_alice(c: &mut Criterion) {
    let bob_secret = EphemeralSecretBob::random_from_rng(&mut OsRng.unwrap_err());
    let bob_public = PublicKeyBob::from(&bob_secret);

    c.bench_function("shared_secret_alice", move |b| {
        b.iter_with_setup(
            || EphemeralSecretAlice::random_from_rng(&mut OsRng.unwrap_err()),
            |alice_secret| alice_secret.diffie_hellman(&bob_public),
        )
    });
}

fn bench_shared_bob(c: &mut Criterion) {
    let alice_secret = EphemeralSecretAlice::random_from_rng(&mut OsRng.unwrap_err());
    let alice_public = PublicKeyAlice::from(&alice_secret);

    c.bench_function("shared_secret_bob", move |b| {
        b.iter_with_setup(
            || EphemeralSecretBob::random_from_rng(&mut OsRng.unwrap_err()),
            |bob_secret| bob_secret.diffie_hellman(&alice_public),
        )
    });
}

criterion_group! {
    name = sidh_benches;
    config = Criterion::default();
    targets =
        bench_keygen_alice,
        bench_keygen_bob,
        bench_shared_alice,
        bench_shared_bob,
}
criterion_main! {
    sidh_benches,
}
