// -*- mode: rust; -*-
//
// This file is part of sidh-p217.
// See LICENSE for licensing information.

//! Serial (non-vectorized) arithmetic backends.

pub mod u64;
