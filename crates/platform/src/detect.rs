//! Runtime CPU detection.
//!
//! [`caps()`] resolves the capability set in this order:
//!
//! - Miri: always [`Caps::NONE`]
//! - a user-supplied override, if one is installed
//! - the cached detection result (via `OnceLock` with `std`, atomics without)
//!
//! Detection itself combines compile-time `cfg!(target_feature = ...)` bits with
//! runtime CPUID / HWCAP probing when `std` is available.
//!
//! # Overrides
//!
//! ```
//! use platform::Caps;
//!
//! // Force the portable kernels.
//! platform::set_caps_override(Some(Caps::NONE));
//! assert!(platform::caps().is_empty());
//!
//! // Resume detection.
//! platform::set_caps_override(None);
//! ```

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::caps::Caps;

// Override storage. Unlike the detection cache the override can be replaced or
// cleared at any time, so it lives in plain atomics in every configuration.
static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);
static OVERRIDE_BITS: AtomicU64 = AtomicU64::new(0);

/// Detection cache for no_std builds.
#[cfg(not(feature = "std"))]
mod cache {
  use core::sync::atomic::{AtomicU8, AtomicU64, Ordering};

  use crate::caps::Caps;

  const UNINIT: u8 = 0;
  const BUSY: u8 = 1;
  const READY: u8 = 2;

  static STATE: AtomicU8 = AtomicU8::new(UNINIT);
  static BITS: AtomicU64 = AtomicU64::new(0);

  #[inline]
  pub fn get_or_init(f: fn() -> Caps) -> Caps {
    if STATE.load(Ordering::Acquire) == READY {
      return Caps(BITS.load(Ordering::Acquire));
    }

    match STATE.compare_exchange(UNINIT, BUSY, Ordering::AcqRel, Ordering::Acquire) {
      Ok(_) => {
        let caps = f();
        BITS.store(caps.0, Ordering::Release);
        STATE.store(READY, Ordering::Release);
        caps
      }
      Err(_) => {
        while STATE.load(Ordering::Acquire) != READY {
          core::hint::spin_loop();
        }
        Caps(BITS.load(Ordering::Acquire))
      }
    }
  }
}

/// Set or clear the capabilities override.
///
/// While an override is installed, [`caps()`] returns it verbatim instead of
/// the detected set. Pass `None` to resume detection. The override may be
/// changed at any time; callers that cache dispatch decisions (the CRC-32C
/// backend selection, for instance) must be re-initialized to observe it.
///
/// An override can claim features the CPU does not have. Installing such a set
/// and then running hardware kernels is the caller's responsibility.
pub fn set_caps_override(value: Option<Caps>) {
  match value {
    Some(caps) => {
      OVERRIDE_BITS.store(caps.0, Ordering::Release);
      OVERRIDE_SET.store(true, Ordering::Release);
    }
    None => OVERRIDE_SET.store(false, Ordering::Release),
  }
}

/// Check if an override is currently set.
#[inline]
pub fn has_override() -> bool {
  OVERRIDE_SET.load(Ordering::Acquire)
}

#[inline]
fn get_override() -> Option<Caps> {
  if OVERRIDE_SET.load(Ordering::Acquire) {
    Some(Caps(OVERRIDE_BITS.load(Ordering::Acquire)))
  } else {
    None
  }
}

/// Capabilities of the running CPU.
///
/// Cheap after the first call. See the module docs for the resolution order.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  #[cfg(miri)]
  {
    Caps::NONE
  }

  #[cfg(not(miri))]
  {
    if let Some(caps) = get_override() {
      return caps;
    }

    #[cfg(feature = "std")]
    {
      use std::sync::OnceLock;
      static CACHED: OnceLock<Caps> = OnceLock::new();
      *CACHED.get_or_init(detect_uncached)
    }

    #[cfg(not(feature = "std"))]
    {
      cache::get_or_init(detect_uncached)
    }
  }
}

/// Detect capabilities without consulting the cache or the override.
#[inline]
#[must_use]
pub fn detect_uncached() -> Caps {
  #[cfg(target_arch = "x86_64")]
  {
    compile_time_x86_64() | runtime_x86_64()
  }

  #[cfg(target_arch = "aarch64")]
  {
    compile_time_aarch64() | runtime_aarch64()
  }

  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  {
    Caps::NONE
  }
}

#[cfg(target_arch = "x86_64")]
const fn compile_time_x86_64() -> Caps {
  use crate::caps::x86;

  let mut caps = Caps::NONE;
  if cfg!(target_feature = "sse4.2") {
    caps = caps.union(x86::SSE42);
  }
  caps
}

#[cfg(all(target_arch = "x86_64", feature = "std"))]
fn runtime_x86_64() -> Caps {
  use crate::caps::x86;

  if std::arch::is_x86_feature_detected!("sse4.2") {
    x86::SSE42
  } else {
    Caps::NONE
  }
}

#[cfg(all(target_arch = "x86_64", not(feature = "std")))]
const fn runtime_x86_64() -> Caps {
  Caps::NONE
}

#[cfg(target_arch = "aarch64")]
const fn compile_time_aarch64() -> Caps {
  use crate::caps::aarch64;

  let mut caps = Caps::NONE;
  if cfg!(target_feature = "crc") {
    caps = caps.union(aarch64::CRC);
  }
  caps
}

#[cfg(all(target_arch = "aarch64", feature = "std"))]
fn runtime_aarch64() -> Caps {
  use crate::caps::aarch64;

  if std::arch::is_aarch64_feature_detected!("crc") {
    aarch64::CRC
  } else {
    Caps::NONE
  }
}

#[cfg(all(target_arch = "aarch64", not(feature = "std")))]
const fn runtime_aarch64() -> Caps {
  Caps::NONE
}

#[cfg(test)]
mod tests {
  use super::*;

  // Tests in this module share the global override, so they run as one test.
  #[test]
  fn override_wins_then_clears() {
    let detected = detect_uncached();

    set_caps_override(Some(Caps::NONE));
    assert!(has_override());
    assert!(caps().is_empty());

    let fake = Caps::from_raw(1 << 32);
    set_caps_override(Some(fake));
    assert_eq!(caps(), fake);

    set_caps_override(None);
    assert!(!has_override());
    #[cfg(not(miri))]
    assert_eq!(caps(), detected);
    #[cfg(miri)]
    let _ = detected;
  }

  #[test]
  fn detection_is_stable() {
    assert_eq!(detect_uncached(), detect_uncached());
  }

  #[test]
  #[cfg(all(target_arch = "x86_64", target_feature = "sse4.2"))]
  fn compile_time_features_are_detected() {
    assert!(detect_uncached().has(crate::caps::x86::SSE42));
  }

  #[test]
  #[cfg(all(target_arch = "aarch64", target_feature = "crc"))]
  fn compile_time_features_are_detected() {
    assert!(detect_uncached().has(crate::caps::aarch64::CRC));
  }
}
