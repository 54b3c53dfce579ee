//! Interleaved hardware CRC-32C.
//!
//! `lanecrc` computes CRC-32C (Castagnoli) with the CPU's CRC instruction and
//! hides its latency by running several independent lanes in lock-step. Lane
//! results are merged with GF(2) arithmetic, so the output is bit-exact with a
//! plain sequential CRC for every [`InterleavePlan`].
//!
//! # Quick Start
//!
//! ```
//! use lanecrc::{Checksum, Crc32c, InterleavePlan, crc32c};
//!
//! lanecrc::initialize();
//!
//! // One-shot with an explicit plan.
//! let plan = InterleavePlan::from_chunk_words(&[4096, 64])?;
//! assert_eq!(crc32c(0, b"hello world", &plan), 0xC994_65AA);
//!
//! // Streaming with the standard plan.
//! let mut hasher = Crc32c::new();
//! hasher.update(b"hello ");
//! hasher.update(b"world");
//! assert_eq!(hasher.finalize(), 0xC994_65AA);
//! # Ok::<(), lanecrc::PlanError>(())
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | Runtime CPU detection, `std::io::Write` for [`Crc32c`] |
//!
//! Without `std`, hardware acceleration uses compile-time feature detection only.
#![cfg_attr(not(feature = "std"), no_std)]

pub use checksum::{
  Checksum, ChecksumCombine, Crc32c, InterleavePlan, Level, PlanBuilder, PlanError,
  combine::{ZeroShift, crc32c_combine},
  crc32c, crc32c_portable, initialize, is_hardware_accelerated,
  plan::{DEFAULT_LANES, MAX_DEPTH, MAX_LANES},
  selected_backend,
};

/// CPU capability detection and overrides.
pub mod platform {
  pub use ::platform::{Arch, Caps, arch, caps, has_override, set_caps_override};
}
