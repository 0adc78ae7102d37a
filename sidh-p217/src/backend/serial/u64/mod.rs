// -*- mode: rust; -*-
//
// This file is part of sidh-p217.
// See LICENSE for licensing information.

//! The `u64` backend: four 64-bit limbs with `u128` products.

pub(crate) mod constants;
pub mod field;
