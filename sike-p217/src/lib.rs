// -*- mode: rust; -*-
//
// This file is part of sike-p217.
// See LICENSE for licensing information.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg, doc_cfg_hide))]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//------------------------------------------------------------------------
// sike-p217 public API
//------------------------------------------------------------------------

mod sike;

pub use crate::sike::*;
