//! Kernel selection.
//!
//! Kernels are listed best-first per architecture. The probe picks the first
//! candidate whose requirements the CPU meets and records its index in a
//! process-wide atomic; every engine call after that is one load and one
//! indirect call. The portable kernel requires nothing, so it always matches.

use core::sync::atomic::{AtomicU8, Ordering};

use platform::Caps;

use crate::plan::Level;

/// `fn(raw_crc, data, levels) -> raw_crc`
pub(crate) type Kernel = fn(u32, &[u8], &[Level]) -> u32;

/// A kernel with capability requirements.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Candidate {
  pub name: &'static str,
  pub requires: Caps,
  pub hardware: bool,
  pub kernel: Kernel,
}

const PORTABLE: Candidate = Candidate {
  name: "portable/slice8",
  requires: Caps::NONE,
  hardware: false,
  kernel: super::portable::compute,
};

#[cfg(target_arch = "x86_64")]
const CANDIDATES: &[Candidate] = &[
  Candidate {
    name: "x86_64/sse4.2",
    requires: platform::caps::x86::CRC32C_READY,
    hardware: true,
    kernel: super::x86_64::compute,
  },
  PORTABLE,
];

#[cfg(target_arch = "aarch64")]
const CANDIDATES: &[Candidate] = &[
  Candidate {
    name: "aarch64/crc",
    requires: platform::caps::aarch64::CRC32C_READY,
    hardware: true,
    kernel: super::aarch64::compute,
  },
  PORTABLE,
];

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
const CANDIDATES: &[Candidate] = &[PORTABLE];

const UNSET: u8 = u8::MAX;

/// Index into `CANDIDATES`, or `UNSET` before the first probe.
static SELECTED: AtomicU8 = AtomicU8::new(UNSET);

/// First candidate whose requirements `caps` satisfies.
fn select(caps: Caps) -> usize {
  CANDIDATES
    .iter()
    .position(|candidate| caps.has(candidate.requires))
    .unwrap_or(CANDIDATES.len().saturating_sub(1))
}

/// Probe the CPU and record the kernel. Returns whether it is a hardware kernel.
pub(crate) fn initialize() -> bool {
  let index = select(platform::caps());
  SELECTED.store(index as u8, Ordering::Release);

  let candidate = candidate(index);
  tracing::debug!(backend = candidate.name, hardware = candidate.hardware, "crc32c backend selected");
  candidate.hardware
}

#[inline]
fn candidate(index: usize) -> &'static Candidate {
  CANDIDATES.get(index).unwrap_or(&PORTABLE)
}

/// The recorded kernel, probing on first use.
#[inline]
pub(crate) fn active() -> &'static Candidate {
  let mut index = SELECTED.load(Ordering::Acquire);
  if index == UNSET {
    initialize();
    index = SELECTED.load(Ordering::Acquire);
  }
  candidate(usize::from(index))
}

/// The portable kernel, regardless of what the CPU offers.
#[inline]
pub(crate) fn portable() -> Kernel {
  PORTABLE.kernel
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn no_caps_selects_portable() {
    let candidate = candidate(select(Caps::NONE));
    assert_eq!(candidate.name, "portable/slice8");
    assert!(!candidate.hardware);
  }

  #[test]
  fn portable_is_last() {
    let last = CANDIDATES.last().unwrap();
    assert_eq!(last.name, PORTABLE.name);
    assert!(last.requires.is_empty());
  }

  #[cfg(target_arch = "x86_64")]
  #[test]
  fn sse42_selects_hardware() {
    let candidate = candidate(select(platform::caps::x86::SSE42));
    assert_eq!(candidate.name, "x86_64/sse4.2");
    assert!(candidate.hardware);
  }

  #[cfg(target_arch = "aarch64")]
  #[test]
  fn crc_selects_hardware() {
    let candidate = candidate(select(platform::caps::aarch64::CRC));
    assert_eq!(candidate.name, "aarch64/crc");
    assert!(candidate.hardware);
  }

  #[test]
  fn active_is_a_candidate() {
    let active = active();
    assert!(CANDIDATES.iter().any(|c| c.name == active.name));
  }
}
