//! Slicing-by-8 lookup table generation.
//!
//! Table 0 is the classic byte-at-a-time table. Table `t` holds the contribution
//! of a byte that still has `t` further bytes to pass through the register, so
//! eight lookups retire one 8-byte word.

/// Byte-at-a-time table for a reflected 32-bit polynomial.
pub const fn generate_table_0(poly: u32) -> [u32; 256] {
  let mut table = [0u32; 256];
  let mut i = 0usize;

  while i < 256 {
    table[i] = crate::bitwise::compute_byte_with(poly, 0, i as u8);
    i += 1;
  }

  table
}

/// All eight slicing-by-8 tables for a reflected 32-bit polynomial.
pub const fn generate_slicing_tables(poly: u32) -> [[u32; 256]; 8] {
  let mut tables = [[0u32; 256]; 8];
  tables[0] = generate_table_0(poly);

  let mut t = 1;
  while t < 8 {
    let mut i = 0;
    while i < 256 {
      let prev = tables[t - 1][i];
      tables[t][i] = (prev >> 8) ^ tables[0][(prev & 0xFF) as usize];
      i += 1;
    }
    t += 1;
  }

  tables
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::constants::crc32c::POLYNOMIAL;

  #[test]
  fn table_0_known_entries() {
    let t = generate_table_0(POLYNOMIAL);
    assert_eq!(t[0], 0);
    assert_eq!(t[1], 0xF26B_8303);
    assert_eq!(t[128], POLYNOMIAL);
    assert_eq!(t[255], 0xAD7D_5351);
  }

  #[test]
  fn higher_tables_shift_by_one_byte() {
    let tables = generate_slicing_tables(POLYNOMIAL);
    for t in 1..8 {
      for i in 0..256 {
        let prev = tables[t - 1][i];
        assert_eq!(tables[t][i], (prev >> 8) ^ tables[0][(prev & 0xFF) as usize]);
      }
    }
  }
}
