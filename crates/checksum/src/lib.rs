//! CRC-32C with the hardware instruction and multi-lane interleaving.
//!
//! The hardware CRC-32C instruction (`crc32q` on x86_64 with SSE4.2,
//! `crc32cx` on aarch64) has a latency several times its throughput. A single
//! dependent stream therefore leaves most of the unit idle. This crate splits
//! a buffer into independent lanes, advances them in lock-step, and merges the
//! partial CRCs with GF(2) arithmetic into the exact CRC of the whole buffer.
//!
//! How a buffer is split is described by an [`InterleavePlan`]. The result
//! never depends on the plan, only the speed does.
//!
//! # Example
//!
//! ```rust
//! use checksum::{Crc32c, InterleavePlan, crc32c};
//!
//! // Optional: probe once up front instead of on first use.
//! let hardware = checksum::initialize();
//! println!("hardware CRC-32C: {hardware} ({})", checksum::selected_backend());
//!
//! // One-shot, explicit plan.
//! let plan = InterleavePlan::from_chunk_words(&[4096, 64]).unwrap();
//! let crc = crc32c(0, b"123456789", &plan);
//! assert_eq!(crc, 0xE306_9283);
//!
//! // Streaming with the standard plan.
//! let mut hasher = Crc32c::new();
//! hasher.update(b"1234");
//! hasher.update(b"56789");
//! assert_eq!(hasher.finalize(), crc);
//!
//! // Combine independently computed parts.
//! let (a, b) = b"123456789".split_at(4);
//! assert_eq!(Crc32c::combine(Crc32c::checksum(a), Crc32c::checksum(b), b.len()), crc);
//! ```
//!
//! # no_std Support
//!
//! The crate is `no_std` and needs `alloc` for owned plans. Without the `std`
//! feature, CPU features are only known from compile-time `target_feature`s:
//!
//! ```toml
//! [dependencies]
//! checksum = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod bitwise;
pub mod combine;
mod constants;
mod crc32c;
mod error;
pub mod plan;

pub use crc32c::{Crc32c, crc32c, crc32c_portable, initialize, is_hardware_accelerated, selected_backend};
pub use error::PlanError;
pub use plan::{InterleavePlan, Level, PlanBuilder};
pub use traits::{Checksum, ChecksumCombine};
