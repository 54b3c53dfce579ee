//! Checksum traits for the lanecrc workspace.
//!
//! The traits are deliberately small: an incremental [`Checksum`] and the
//! [`ChecksumCombine`] extension for algorithms whose results can be joined
//! without re-reading the data. They are `no_std` and have no dependencies.
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod checksum;

pub use checksum::{Checksum, ChecksumCombine};
