//! Portable CRC-32C kernel: slicing-by-8.
//!
//! Runs everywhere and produces the same register values as the hardware
//! kernels. Interleaving still applies, but buys little here since the table
//! lookups, not a single instruction's latency, are the bottleneck.
//!
//! For each 8-byte word:
//! 1. XOR the low half of the word with the register
//! 2. Look up each of the 8 bytes in its own table
//! 3. XOR the 8 entries together

#![allow(unsafe_code)]
// u8 indices into 256-entry tables.
#![allow(clippy::indexing_slicing)]

use crate::constants::crc32c::TABLES;

/// Fold one little-endian word into the register.
#[inline(always)]
pub(crate) fn fold_word(crc: u32, word: u64) -> u32 {
  let [b0, b1, b2, b3, b4, b5, b6, b7] = (word ^ u64::from(crc)).to_le_bytes();
  let t = &TABLES.0;

  t[7][b0 as usize]
    ^ t[6][b1 as usize]
    ^ t[5][b2 as usize]
    ^ t[4][b3 as usize]
    ^ t[3][b4 as usize]
    ^ t[2][b5 as usize]
    ^ t[1][b6 as usize]
    ^ t[0][b7 as usize]
}

/// Fold one byte into the register.
#[inline(always)]
pub(crate) fn fold_byte(crc: u32, byte: u8) -> u32 {
  (crc >> 8) ^ TABLES.0[0][(crc as u8 ^ byte) as usize]
}

define_engine! {
  fold_word: fold_word,
  fold_byte: fold_byte,
}

/// Run `levels` over `data` with the portable kernel.
#[inline]
pub(crate) fn compute(crc: u32, data: &[u8], levels: &[crate::plan::Level]) -> u32 {
  // SAFETY: the portable engine has no target-feature requirements.
  unsafe { run(crc, data, levels) }
}

#[cfg(test)]
mod tests {
  use alloc::vec::Vec;

  use super::*;
  use crate::{bitwise, constants::crc32c::INIT, plan::InterleavePlan};

  fn data(len: usize) -> Vec<u8> {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    (0..len)
      .map(|_| {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state as u8
      })
      .collect()
  }

  #[test]
  fn fold_word_matches_eight_bytes() {
    let word = 0x0123_4567_89AB_CDEFu64;
    for crc in [0u32, INIT, 0x1234_5678] {
      assert_eq!(fold_word(crc, word), bitwise::compute(crc, &word.to_le_bytes()));
    }
  }

  #[test]
  fn fold_byte_matches_bitwise() {
    for byte in 0..=255u8 {
      assert_eq!(fold_byte(INIT, byte), bitwise::compute_byte(INIT, byte));
    }
  }

  #[test]
  fn sequential_check_value() {
    let crc = compute(INIT, b"123456789", &[]) ^ INIT;
    assert_eq!(crc, 0xE306_9283);
  }

  #[test]
  fn standard_plan_matches_bitwise() {
    let plan = InterleavePlan::standard();
    for len in [0, 1, 7, 8, 9, 1535, 1536, 1537, 12 * 1024 + 3, 96 * 1024 + 1543] {
      let buf = data(len);
      assert_eq!(compute(INIT, &buf, plan.levels()), bitwise::compute(INIT, &buf), "len {len}");
    }
  }

  #[test]
  fn every_lane_count_matches_bitwise() {
    let buf = data(5000);
    let expected = bitwise::compute(INIT, &buf);
    for lanes in 1..=crate::plan::MAX_LANES {
      let plan = crate::plan::PlanBuilder::new().level_with_lanes(16, lanes).build().unwrap();
      assert_eq!(compute(INIT, &buf, plan.levels()), expected, "lanes {lanes}");
    }
  }
}
