//! The interleaving engine, stamped out once per kernel.
//!
//! A backend supplies two primitives on the raw CRC register:
//!
//! - `fold_word(crc, word) -> crc` for one little-endian 8-byte word
//! - `fold_byte(crc, byte) -> crc` for a single byte
//!
//! and [`define_engine!`] generates the plan walker around them. The walker is
//! generated rather than written generically so that every function in it
//! carries the backend's `#[target_feature]` attributes; the fold primitives
//! then inline into the lock-step loops.
//!
//! All generated functions work on the raw register (no pre/post inversion).

use crate::combine::ZeroShift;

/// Fold lane CRCs together in position order.
///
/// Lane 0 already carries the incoming state; every following lane was
/// computed from a zero register over exactly `shift.len_bytes()` bytes.
#[inline(always)]
pub(crate) fn merge_lanes(lanes: &[u32], shift: &ZeroShift) -> u32 {
  let mut lanes = lanes.iter().copied();
  let first = lanes.next().unwrap_or(0);
  lanes.fold(first, |acc, lane| shift.apply(acc) ^ lane)
}

/// Generate `run(crc, data, levels)` and its helpers for one backend.
///
/// ```ignore
/// define_engine! {
///   #[target_feature(enable = "sse4.2")]
///   fold_word: fold_word,
///   fold_byte: fold_byte,
/// }
/// ```
///
/// The generated `run` is an `unsafe fn`. For hardware backends the caller must
/// have confirmed the target features; for the portable backend it is always
/// sound to call.
macro_rules! define_engine {
  (
    $(#[$feature:meta])*
    fold_word: $fold_word:path,
    fold_byte: $fold_byte:path $(,)?
  ) => {
    /// Whole words, then the 0-7 trailing bytes.
    $(#[$feature])*
    #[inline]
    #[allow(unused_unsafe)]
    unsafe fn sequential(mut crc: u32, data: &[u8]) -> u32 {
      let (words, bytes) = data.as_chunks::<8>();
      for word in words {
        crc = unsafe { $fold_word(crc, u64::from_le_bytes(*word)) };
      }
      for &byte in bytes {
        crc = unsafe { $fold_byte(crc, byte) };
      }
      crc
    }

    /// One block of a terminal level: `N` lanes, one word each per step.
    ///
    /// # Safety
    ///
    /// `block.len()` must be exactly `N * level.lane_bytes()`, and the backend's
    /// target features must be present.
    $(#[$feature])*
    #[inline]
    #[allow(unused_unsafe)]
    unsafe fn lockstep<const N: usize>(crc: u32, block: &[u8], level: &$crate::plan::Level) -> u32 {
      debug_assert_eq!(block.len(), N * level.lane_bytes());
      let lane_bytes = level.lane_bytes();
      let base = block.as_ptr();

      let mut lanes = [0u32; N];
      if let Some(first) = lanes.first_mut() {
        *first = crc;
      }

      let mut offset = 0usize;
      while offset < lane_bytes {
        let mut start = offset;
        for lane in lanes.iter_mut() {
          // SAFETY: lane `i` covers bytes `[i * lane_bytes, (i + 1) * lane_bytes)` of
          // `block`, `start = i * lane_bytes + offset`, and `offset + 8 <= lane_bytes`
          // because `lane_bytes` is a multiple of 8.
          #[allow(clippy::cast_ptr_alignment)]
          let word = unsafe { core::ptr::read_unaligned(base.add(start).cast::<u64>()) };
          *lane = unsafe { $fold_word(*lane, u64::from_le(word)) };
          start += lane_bytes;
        }
        offset += 8;
      }

      $crate::crc32c::engine::merge_lanes(&lanes, level.merge())
    }

    /// One block of a terminal level.
    $(#[$feature])*
    #[inline]
    #[allow(unused_unsafe)]
    unsafe fn interleave(crc: u32, block: &[u8], level: &$crate::plan::Level) -> u32 {
      // SAFETY: `block` is one whole block, so its length is `lanes * lane_bytes`
      // and each arm passes `N == level.lanes()`.
      unsafe {
        match level.lanes() {
          1 => lockstep::<1>(crc, block, level),
          2 => lockstep::<2>(crc, block, level),
          3 => lockstep::<3>(crc, block, level),
          4 => lockstep::<4>(crc, block, level),
          5 => lockstep::<5>(crc, block, level),
          6 => lockstep::<6>(crc, block, level),
          7 => lockstep::<7>(crc, block, level),
          8 => lockstep::<8>(crc, block, level),
          _ => sequential(crc, block),
        }
      }
    }

    /// One block of a nested level: every lane region goes through `inner`.
    $(#[$feature])*
    #[allow(unused_unsafe)]
    unsafe fn nested(crc: u32, block: &[u8], level: &$crate::plan::Level, inner: &[$crate::plan::Level]) -> u32 {
      let mut regions = block.chunks_exact(level.lane_bytes());
      let mut acc = match regions.next() {
        Some(region) => unsafe { run(crc, region, inner) },
        None => return crc,
      };
      for region in regions {
        let lane = unsafe { run(0, region, inner) };
        acc = level.merge().apply(acc) ^ lane;
      }
      acc
    }

    /// Feed `data` through the raw register according to `levels`.
    ///
    /// Whole blocks of the outermost level are interleaved; the remainder is
    /// handed to the next level down, and finally to the sequential loop.
    $(#[$feature])*
    #[allow(unused_unsafe)]
    pub(crate) unsafe fn run(mut crc: u32, data: &[u8], levels: &[$crate::plan::Level]) -> u32 {
      let Some((level, inner)) = levels.split_first() else {
        return unsafe { sequential(crc, data) };
      };

      let mut blocks = data.chunks_exact(level.block_bytes());
      if inner.is_empty() {
        for block in blocks.by_ref() {
          crc = unsafe { interleave(crc, block, level) };
        }
      } else {
        for block in blocks.by_ref() {
          crc = unsafe { nested(crc, block, level, inner) };
        }
      }

      unsafe { run(crc, blocks.remainder(), inner) }
    }
  };
}
