// -*- mode: rust; -*-
//
// This file is part of sidh-p217.
// See LICENSE for licensing information.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg, doc_cfg_hide))]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//------------------------------------------------------------------------
// sidh-p217 public API
//------------------------------------------------------------------------

pub(crate) mod backend;

pub mod constants;
pub mod field;
pub mod fp2;
pub mod isogeny;
pub mod montgomery;

mod sidh;

pub use crate::sidh::*;
