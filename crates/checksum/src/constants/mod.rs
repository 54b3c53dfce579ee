//! Precomputed CRC-32C constants.
//!
//! Everything here is derived from the polynomial by `const fn` at compile
//! time; nothing is hand-transcribed.

pub mod crc32c;
pub mod tables;

/// Wrapper type to force 64-byte (cache line) alignment.
///
/// Lookup tables are wrapped so that a table row never straddles two lines.
#[repr(align(64))]
pub struct Aligned64<T>(pub T);
