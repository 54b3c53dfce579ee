//! CPU capability detection for the lanecrc workspace.
//!
//! This crate is the single place where the workspace asks "which checksum
//! instructions can run on this machine?". Algorithm crates never call the
//! `is_*_feature_detected!` macros themselves; they query [`caps()`] and compare
//! the result against the constants in [`caps::x86`] and [`caps::aarch64`].
//!
//! # Example
//!
//! ```
//! use platform::caps::x86;
//!
//! let caps = platform::caps();
//! if caps.has(x86::CRC32C_READY) {
//!   // SSE4.2 `crc32` instruction is available.
//! }
//! ```
//!
//! # Detection Tiers
//!
//! 1. **Override**: a value installed with [`set_caps_override`] wins over detection.
//! 2. **Compile time**: features enabled through `-C target-feature` / `target-cpu`.
//! 3. **Runtime** (`std` only): CPUID on x86_64, HWCAP on aarch64. Cached after the
//!    first query.
//!
//! Under Miri the detected set is always empty so the portable kernels run.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;

pub use caps::{Arch, Caps};
pub use detect::{caps, detect_uncached, has_override, set_caps_override};

/// Architecture this crate was compiled for.
#[inline]
#[must_use]
pub const fn arch() -> Arch {
  Arch::current()
}
