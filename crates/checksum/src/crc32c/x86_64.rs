//! x86_64 CRC-32C kernel: the SSE4.2 `crc32` instruction.
//!
//! `crc32q` has a latency of three cycles and a throughput of one per cycle,
//! so a single dependent stream uses a third of the unit. Interleaving three
//! or more independent lanes keeps it saturated.
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - Every function here requires `sse4.2`; dispatch only reaches them after
//!   the capability probe confirmed it.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::x86_64::{_mm_crc32_u8, _mm_crc32_u64};

#[inline]
#[target_feature(enable = "sse4.2")]
unsafe fn fold_word(crc: u32, word: u64) -> u32 {
  _mm_crc32_u64(u64::from(crc), word) as u32
}

#[inline]
#[target_feature(enable = "sse4.2")]
unsafe fn fold_byte(crc: u32, byte: u8) -> u32 {
  _mm_crc32_u8(crc, byte)
}

define_engine! {
  #[target_feature(enable = "sse4.2")]
  fold_word: fold_word,
  fold_byte: fold_byte,
}

/// Run `levels` over `data` with the SSE4.2 kernel.
#[inline]
pub(crate) fn compute(crc: u32, data: &[u8], levels: &[crate::plan::Level]) -> u32 {
  // SAFETY: selected only when `platform::caps()` reports `x86::CRC32C_READY`.
  unsafe { run(crc, data, levels) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{bitwise, constants::crc32c::INIT, plan::InterleavePlan};

  fn sse42() -> bool {
    std::arch::is_x86_feature_detected!("sse4.2")
  }

  #[test]
  fn folds_match_bitwise() {
    if !sse42() {
      return;
    }
    let word = 0xFEDC_BA98_7654_3210u64;
    // SAFETY: feature checked above.
    unsafe {
      assert_eq!(fold_word(INIT, word), bitwise::compute(INIT, &word.to_le_bytes()));
      assert_eq!(fold_byte(INIT, 0x5A), bitwise::compute_byte(INIT, 0x5A));
    }
  }

  #[test]
  fn matches_portable_across_plans() {
    if !sse42() {
      return;
    }
    let buf: alloc::vec::Vec<u8> = (0..40_000u32).map(|i| (i * 7 + (i >> 5)) as u8).collect();
    for chunks in [&[][..], &[64], &[4096, 64], &[4096, 512, 64], &[128, 16, 2]] {
      let plan = InterleavePlan::from_chunk_words(chunks).unwrap();
      assert_eq!(
        compute(INIT, &buf, plan.levels()),
        super::super::portable::compute(INIT, &buf, plan.levels()),
        "plan {plan}"
      );
    }
  }
}
