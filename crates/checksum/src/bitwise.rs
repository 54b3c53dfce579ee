//! Table-less CRC-32C, one bit at a time.
//!
//! This is the slowest kernel in the crate and the one every other kernel is
//! checked against. It also seeds the lookup tables at compile time.
//!
//! The conditional XOR is branchless: `0u32.wrapping_sub(crc & 1)` is either
//! `0` or `0xFFFF_FFFF`, masking the polynomial in or out.

use crate::constants::crc32c::POLYNOMIAL;

/// Feed `data` through the raw CRC-32C register.
///
/// `crc` is the register value, not a finalized checksum:
///
/// ```
/// use checksum::bitwise::compute;
///
/// let crc = compute(0xFFFF_FFFF, b"123456789") ^ 0xFFFF_FFFF;
/// assert_eq!(crc, 0xE306_9283);
/// ```
#[inline]
pub fn compute(crc: u32, data: &[u8]) -> u32 {
  data.iter().fold(crc, |crc, &byte| compute_byte(crc, byte))
}

/// Feed a single byte through the raw CRC-32C register.
#[inline]
pub const fn compute_byte(crc: u32, byte: u8) -> u32 {
  compute_byte_with(POLYNOMIAL, crc, byte)
}

/// Feed a single byte through a raw register for any reflected 32-bit polynomial.
pub(crate) const fn compute_byte_with(poly: u32, mut crc: u32, byte: u8) -> u32 {
  crc ^= byte as u32;

  let mut bit = 0;
  while bit < 8 {
    let mask = 0u32.wrapping_sub(crc & 1);
    crc = (crc >> 1) ^ (poly & mask);
    bit += 1;
  }

  crc
}

#[cfg(test)]
mod tests {
  use super::*;

  fn checksum(data: &[u8]) -> u32 {
    compute(0xFFFF_FFFF, data) ^ 0xFFFF_FFFF
  }

  #[test]
  fn check_values() {
    assert_eq!(checksum(b""), 0);
    assert_eq!(checksum(b"123456789"), 0xE306_9283);
    assert_eq!(checksum(b"23456789"), 0xBFE9_2A83);
    assert_eq!(checksum(&[0x00]), 0x527D_5351);
    assert_eq!(checksum(b"The quick brown fox jumps over the lazy dog"), 0x2262_0404);
  }

  #[test]
  fn incremental() {
    let data = b"hello world";
    let oneshot = checksum(data);
    assert_eq!(oneshot, 0xC994_65AA);

    for split in 0..=data.len() {
      let (a, b) = data.split_at(split);
      let crc = compute(compute(0xFFFF_FFFF, a), b) ^ 0xFFFF_FFFF;
      assert_eq!(crc, oneshot, "mismatch at split {split}");
    }
  }

  #[test]
  fn usable_in_const() {
    const CRC_OF_ZERO: u32 = compute_byte(0xFFFF_FFFF, 0x00);
    assert_eq!(CRC_OF_ZERO ^ 0xFFFF_FFFF, 0x527D_5351);
  }
}
