//! CRC-32C (Castagnoli) constants.
//!
//! Polynomial: 0x1EDC6F41 (reflected: 0x82F63B78)
//! Used by: iSCSI, SCTP, Btrfs, ext4, RocksDB, LevelDB

/// CRC-32C polynomial in reflected (bit-reversed) form, processed LSB-first.
pub const POLYNOMIAL: u32 = 0x82F6_3B78;

/// CRC-32C polynomial in normal (MSB-first) form, without the x^32 term.
pub const POLYNOMIAL_NORMAL: u32 = 0x1EDC_6F41;

const _: () = assert!(POLYNOMIAL_NORMAL.reverse_bits() == POLYNOMIAL);

/// Initial register value and final XOR mask.
pub const INIT: u32 = 0xFFFF_FFFF;

/// Slicing-by-8 lookup tables (8 KiB).
pub static TABLES: super::Aligned64<[[u32; 256]; 8]> =
  super::Aligned64(super::tables::generate_slicing_tables(POLYNOMIAL));
