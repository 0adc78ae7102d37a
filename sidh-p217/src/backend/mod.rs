// -*- mode: rust; -*-
//
// This file is part of sidh-p217.
// See LICENSE for licensing information.

//! Pluggable arithmetic backends.
//!
//! Only the serial backend exists today; an accelerated implementation
//! would slot in as a sibling module behind the same `field` facade.

pub mod serial;
