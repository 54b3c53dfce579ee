//! CRC-32C combination in GF(2).
//!
//! Appending `n` bytes to a message multiplies its CRC register by `x^(8n)`
//! modulo the generator polynomial and XORs in the CRC of the appended bytes:
//!
//! ```text
//! crc(A || B) = crc(A) * x^(8*len(B)) mod G(x) XOR crc(B)
//! ```
//!
//! Because CRC-32C uses the same value for its initial register and its final
//! XOR, the identity holds for finalized checksums and for raw register values
//! alike. The interleaved engine relies on the raw form to merge lanes.
//!
//! Polynomials are stored reflected: bit 31 holds the coefficient of `x^0` and
//! bit 0 the coefficient of `x^31`, the same layout as the CRC register.
//!
//! Everything here is `const fn`, so plan levels can carry their merge tables
//! as compile-time data.

// All indexing below runs over bounded loop counters (0..4, 0..32, 0..256) into
// arrays of exactly that size. Clippy cannot see this through `while` loops.
#![allow(clippy::indexing_slicing)]

use core::fmt;

use crate::constants::crc32c::POLYNOMIAL;

/// `x^0` in reflected form.
const ONE: u32 = 1 << 31;

/// `x^8` in reflected form: one zero byte.
const X8: u32 = 1 << (31 - 8);

/// Multiply two polynomials modulo the CRC-32C generator.
///
/// Runs a fixed 32 steps regardless of the operands.
#[must_use]
pub const fn multiply(a: u32, mut b: u32) -> u32 {
  let mut product = 0u32;
  let mut i = 0;
  while i < 32 {
    if a & (ONE >> i) != 0 {
      product ^= b;
    }
    // b *= x
    b = (b >> 1) ^ (POLYNOMIAL & 0u32.wrapping_sub(b & 1));
    i += 1;
  }
  product
}

/// `x^(8 * len_bytes) mod G(x)`, by square-and-multiply over `len_bytes`.
#[must_use]
pub const fn xpow8n(len_bytes: u64) -> u32 {
  let mut result = ONE;
  let mut square = X8;
  let mut n = len_bytes;
  while n != 0 {
    if n & 1 != 0 {
      result = multiply(square, result);
    }
    n >>= 1;
    if n != 0 {
      square = multiply(square, square);
    }
  }
  result
}

/// Advance a CRC register over `len_bytes` zero bytes, without the bytes.
#[inline]
#[must_use]
pub const fn shift(crc: u32, len_bytes: u64) -> u32 {
  multiply(xpow8n(len_bytes), crc)
}

/// Combine `crc_a = crc(A)` with `crc_b = crc(B)` into `crc(A || B)`.
///
/// `len_b` is the length of `B` in bytes. O(log `len_b`).
///
/// ```
/// use checksum::{combine::crc32c_combine, crc32c_portable, InterleavePlan};
///
/// let seq = InterleavePlan::sequential();
/// let (a, b) = b"hello world".split_at(6);
/// let crc_a = crc32c_portable(0, a, &seq);
/// let crc_b = crc32c_portable(0, b, &seq);
/// assert_eq!(crc32c_combine(crc_a, crc_b, b.len()), 0xC994_65AA);
/// ```
#[inline]
#[must_use]
pub const fn crc32c_combine(crc_a: u32, crc_b: u32, len_b: usize) -> u32 {
  if len_b == 0 {
    return crc_a;
  }
  shift(crc_a, len_b as u64) ^ crc_b
}

/// Precomputed `x^(8n)` multiplication for one fixed byte length `n`.
///
/// Multiplication by a constant is linear over GF(2), so it splits into one
/// table per register byte: `apply` is four lookups and three XORs instead of
/// a 32-step [`multiply`]. Each interleave level keeps one of these to merge
/// its lanes.
#[derive(Clone, PartialEq, Eq)]
pub struct ZeroShift {
  table: [[u32; 256]; 4],
  len_bytes: u64,
}

impl ZeroShift {
  /// Build the table for appending `len_bytes` zero bytes.
  #[must_use]
  pub const fn new(len_bytes: u64) -> Self {
    let xn = xpow8n(len_bytes);

    // Image of each single register bit.
    let mut columns = [0u32; 32];
    let mut bit = 0;
    while bit < 32 {
      columns[bit] = multiply(xn, 1 << bit);
      bit += 1;
    }

    // Entry `b` differs from entry `b` minus its lowest set bit by exactly
    // that bit's column.
    let mut table = [[0u32; 256]; 4];
    let mut k = 0;
    while k < 4 {
      let mut b = 1usize;
      while b < 256 {
        let low = b.trailing_zeros() as usize;
        table[k][b] = table[k][b & (b - 1)] ^ columns[8 * k + low];
        b += 1;
      }
      k += 1;
    }

    Self { table, len_bytes }
  }

  /// Number of zero bytes this table appends.
  #[inline]
  #[must_use]
  pub const fn len_bytes(&self) -> u64 {
    self.len_bytes
  }

  /// Equivalent to [`shift`]`(crc, self.len_bytes())`.
  #[inline(always)]
  #[must_use]
  pub const fn apply(&self, crc: u32) -> u32 {
    self.table[0][(crc & 0xFF) as usize]
      ^ self.table[1][((crc >> 8) & 0xFF) as usize]
      ^ self.table[2][((crc >> 16) & 0xFF) as usize]
      ^ self.table[3][(crc >> 24) as usize]
  }
}

impl fmt::Debug for ZeroShift {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ZeroShift").field("len_bytes", &self.len_bytes).finish_non_exhaustive()
  }
}
