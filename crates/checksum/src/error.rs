//! Interleave plan construction errors.

use core::fmt;

/// An interleave plan was rejected at construction.
///
/// `depth` counts levels from the outermost, starting at 0.
///
/// ```
/// use checksum::{InterleavePlan, PlanError};
///
/// let err = InterleavePlan::from_chunk_words(&[0, 64]).unwrap_err();
/// assert_eq!(err, PlanError::NestedInsideTerminal { depth: 1 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PlanError {
  /// A non-empty level was placed below a zero-size (sequential) level.
  NestedInsideTerminal { depth: usize },
  /// Lane count outside `1..=MAX_LANES`.
  LaneCount { depth: usize, lanes: usize },
  /// An inner level's chunk is not strictly smaller than its outer level's.
  NotDecreasing { depth: usize, outer: usize, inner: usize },
  /// More than `MAX_DEPTH` levels.
  TooDeep { depth: usize },
  /// `chunk_words * 8 * lanes` does not fit in `usize`.
  ChunkTooLarge { depth: usize, chunk_words: usize },
}

impl PlanError {
  /// Level at which the plan was rejected.
  #[inline]
  #[must_use]
  pub const fn depth(&self) -> usize {
    match *self {
      Self::NestedInsideTerminal { depth }
      | Self::LaneCount { depth, .. }
      | Self::NotDecreasing { depth, .. }
      | Self::TooDeep { depth }
      | Self::ChunkTooLarge { depth, .. } => depth,
    }
  }
}

impl fmt::Display for PlanError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::NestedInsideTerminal { depth } => {
        write!(f, "level {depth} is nested inside a sequential level")
      }
      Self::LaneCount { depth, lanes } => {
        write!(f, "level {depth} has {lanes} lanes, expected 1..={}", crate::plan::MAX_LANES)
      }
      Self::NotDecreasing { depth, outer, inner } => {
        write!(f, "level {depth} chunk of {inner} words is not smaller than its outer chunk of {outer} words")
      }
      Self::TooDeep { depth } => write!(f, "plan depth {depth} exceeds {}", crate::plan::MAX_DEPTH),
      Self::ChunkTooLarge { depth, chunk_words } => {
        write!(f, "level {depth} chunk of {chunk_words} words overflows the address space")
      }
    }
  }
}

impl core::error::Error for PlanError {}
