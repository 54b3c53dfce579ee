//! aarch64 CRC-32C kernel: the ARMv8 CRC extension (`crc32cx`, `crc32cb`).
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - Every function here requires the `crc` feature; dispatch only reaches them
//!   after the capability probe confirmed it.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::aarch64::{__crc32cb, __crc32cd};

#[inline]
#[target_feature(enable = "crc")]
unsafe fn fold_word(crc: u32, word: u64) -> u32 {
  __crc32cd(crc, word)
}

#[inline]
#[target_feature(enable = "crc")]
unsafe fn fold_byte(crc: u32, byte: u8) -> u32 {
  __crc32cb(crc, byte)
}

define_engine! {
  #[target_feature(enable = "crc")]
  fold_word: fold_word,
  fold_byte: fold_byte,
}

/// Run `levels` over `data` with the CRC-extension kernel.
#[inline]
pub(crate) fn compute(crc: u32, data: &[u8], levels: &[crate::plan::Level]) -> u32 {
  // SAFETY: selected only when `platform::caps()` reports `aarch64::CRC32C_READY`.
  unsafe { run(crc, data, levels) }
}
