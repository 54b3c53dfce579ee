//! CPU capability representation.
//!
//! [`Caps`] is a 64-bit feature bitset. Bits 0-31 hold x86_64 features and bits
//! 32-63 hold aarch64 features, so a single value can be compared against
//! requirements from either architecture without `cfg` at the call site.
//!
//! Only the features that matter for CRC-32C dispatch are modelled.

use core::{fmt, ops};

/// CPU capabilities: a 64-bit feature bitset.
///
/// `Caps` is `Copy`, `Send` and `Sync` and can be shared freely.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) u64);

impl Caps {
  /// Empty capability set.
  pub const NONE: Self = Self(0);

  /// Capability set with a single bit set.
  #[inline]
  #[must_use]
  pub const fn bit(n: u32) -> Self {
    Self(1u64 << n)
  }

  /// Create a capability set from its raw word.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_raw(bits: u64) -> Self {
    Self(bits)
  }

  /// Raw underlying word.
  #[inline]
  #[must_use]
  pub const fn to_raw(self) -> u64 {
    self.0
  }

  /// Check that every feature in `required` is present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    self.0 & required.0 == required.0
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// Features in `self` that are not in `other`.
  #[inline]
  #[must_use]
  pub const fn difference(self, other: Self) -> Self {
    Self(self.0 & !other.0)
  }

  /// True when no feature is set.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// Number of features set.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0.count_ones()
  }

  /// Names of the features present in this set, in bit order.
  pub fn names(self) -> impl Iterator<Item = &'static str> {
    FEATURE_NAMES.iter().filter(move |(caps, _)| self.has(*caps)).map(|(_, name)| *name)
  }
}

impl ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self {
    self.union(rhs)
  }
}

impl ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl fmt::Debug for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.names()).finish()
  }
}

/// x86_64 feature bits.
pub mod x86 {
  use super::Caps;

  pub const SSE42: Caps = Caps::bit(0);

  /// Everything the hardware CRC-32C kernel needs: the SSE4.2 `crc32` instruction.
  pub const CRC32C_READY: Caps = SSE42;
}

/// aarch64 feature bits.
pub mod aarch64 {
  use super::Caps;

  pub const CRC: Caps = Caps::bit(32);

  /// Everything the hardware CRC-32C kernel needs: the ARMv8 CRC extension.
  pub const CRC32C_READY: Caps = CRC;
}

const FEATURE_NAMES: [(Caps, &str); 2] = [(x86::SSE42, "sse4.2"), (aarch64::CRC, "crc")];

/// Target architecture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  Aarch64,
  Other,
}

impl Arch {
  /// Architecture of the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    if cfg!(target_arch = "x86_64") {
      Self::X86_64
    } else if cfg!(target_arch = "aarch64") {
      Self::Aarch64
    } else {
      Self::Other
    }
  }

  /// Lowercase name, matching `target_arch`.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
      Self::Other => "other",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{format, vec::Vec};

  use super::*;

  #[test]
  fn none_has_nothing_but_itself() {
    assert!(Caps::NONE.is_empty());
    assert!(Caps::NONE.has(Caps::NONE));
    assert!(!Caps::NONE.has(x86::SSE42));
  }

  #[test]
  fn has_requires_every_bit() {
    let caps = x86::SSE42 | aarch64::CRC;
    assert!(caps.has(x86::SSE42));
    assert!(caps.has(aarch64::CRC));
    assert!(caps.has(x86::SSE42 | aarch64::CRC));
    assert!(!x86::SSE42.has(x86::SSE42 | aarch64::CRC));
  }

  #[test]
  fn difference_clears_bits() {
    let caps = x86::SSE42 | aarch64::CRC;
    let cleared = caps.difference(aarch64::CRC);
    assert_eq!(cleared, x86::SSE42);
    assert_eq!(cleared.count(), 1);
  }

  #[test]
  fn architectures_do_not_overlap() {
    assert_eq!(x86::SSE42.difference(aarch64::CRC), x86::SSE42);
    assert_ne!(x86::CRC32C_READY, aarch64::CRC32C_READY);
  }

  #[test]
  fn names_follow_bit_order() {
    let caps = aarch64::CRC | x86::SSE42;
    let names: Vec<_> = caps.names().collect();
    assert_eq!(names, ["sse4.2", "crc"]);
    assert_eq!(format!("{caps:?}"), r#"{"sse4.2", "crc"}"#);
  }

  #[test]
  fn every_feature_gates_a_crc32c_kernel() {
    let modelled = FEATURE_NAMES.iter().fold(Caps::NONE, |acc, (caps, _)| acc | *caps);
    assert_eq!(modelled, x86::CRC32C_READY | aarch64::CRC32C_READY);
    assert_eq!(modelled.count(), 2);
  }

  #[test]
  fn raw_round_trip() {
    let caps = Caps::from_raw(1 | 1 << 32);
    assert_eq!(caps.to_raw(), 1 | 1 << 32);
    assert_eq!(caps, x86::SSE42 | aarch64::CRC);
  }

  #[test]
  fn arch_matches_target() {
    #[cfg(target_arch = "x86_64")]
    assert_eq!(Arch::current(), Arch::X86_64);
    #[cfg(target_arch = "aarch64")]
    assert_eq!(Arch::current(), Arch::Aarch64);
    assert_eq!(format!("{}", Arch::X86_64), "x86_64");
  }
}
