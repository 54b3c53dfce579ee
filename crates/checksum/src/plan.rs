//! Interleave plans.
//!
//! A plan tells the engine how to cut a buffer into independent CRC streams
//! ("lanes") so that several hardware `crc32` instructions are in flight at
//! once. It is a chain of [`Level`]s, outermost first:
//!
//! ```text
//! level 0: 4096 words x 3 lanes     |----lane 0----|----lane 1----|----lane 2----|
//! level 1:  512 words x 3 lanes     |-l0-|-l1-|-l2-| ...
//! level 2:   64 words x 3 lanes     ...
//! ```
//!
//! At every level a block is `lanes * chunk_words` 8-byte words. Lane `i` owns
//! the `i`-th contiguous run of `chunk_words` words. The innermost level runs
//! its lanes in lock-step, one word per lane per step; outer levels hand each
//! lane region to the level below. Whatever does not fill a whole block falls
//! through to the next level and finally to the plain sequential loop.
//!
//! Plans are immutable once built, own no per-call state, and can be shared by
//! any number of threads.
//!
//! # Example
//!
//! ```
//! use checksum::{InterleavePlan, PlanBuilder};
//!
//! // 4096-word outer chunks subdivided into 64-word lock-step chunks.
//! let plan = InterleavePlan::from_chunk_words(&[4096, 64])?;
//! assert_eq!(plan.to_string(), "4096x3/64x3");
//!
//! // Same shape with four lanes at the inner level.
//! let plan = PlanBuilder::new().level(4096).level_with_lanes(64, 4).build()?;
//! assert_eq!(plan.to_string(), "4096x3/64x4");
//! # Ok::<(), checksum::PlanError>(())
//! ```

use alloc::{borrow::Cow, vec::Vec};
use core::fmt;

use crate::{combine::ZeroShift, error::PlanError};

/// Lanes per level unless stated otherwise: the classic three-way `crc32q`
/// pipeline, matching the instruction's 3-cycle latency at 1/cycle throughput.
pub const DEFAULT_LANES: usize = 3;

/// Most lanes a single level may run in lock-step.
pub const MAX_LANES: usize = 8;

/// Most levels a plan may nest.
pub const MAX_DEPTH: usize = 8;

/// Bytes per word: the operand width of the 64-bit CRC instruction.
pub const WORD_BYTES: usize = 8;

/// One level of an [`InterleavePlan`].
///
/// Carries the merge table for its lane length, so merging lanes costs four
/// table lookups per lane.
#[derive(Clone, PartialEq, Eq)]
pub struct Level {
  chunk_words: usize,
  lanes: usize,
  lane_bytes: usize,
  block_bytes: usize,
  merge: ZeroShift,
}

impl Level {
  /// Validate and build a single level. `depth` only labels errors.
  pub const fn try_new(depth: usize, chunk_words: usize, lanes: usize) -> Result<Self, PlanError> {
    if lanes == 0 || lanes > MAX_LANES {
      return Err(PlanError::LaneCount { depth, lanes });
    }
    let Some(lane_bytes) = chunk_words.checked_mul(WORD_BYTES) else {
      return Err(PlanError::ChunkTooLarge { depth, chunk_words });
    };
    let Some(block_bytes) = lane_bytes.checked_mul(lanes) else {
      return Err(PlanError::ChunkTooLarge { depth, chunk_words });
    };
    if chunk_words == 0 {
      return Err(PlanError::NestedInsideTerminal { depth });
    }

    Ok(Self {
      chunk_words,
      lanes,
      lane_bytes,
      block_bytes,
      merge: ZeroShift::new(lane_bytes as u64),
    })
  }

  /// 8-byte words per lane per block.
  #[inline]
  #[must_use]
  pub const fn chunk_words(&self) -> usize {
    self.chunk_words
  }

  /// Number of lanes.
  #[inline]
  #[must_use]
  pub const fn lanes(&self) -> usize {
    self.lanes
  }

  /// Bytes per lane per block.
  #[inline]
  #[must_use]
  pub const fn lane_bytes(&self) -> usize {
    self.lane_bytes
  }

  /// Bytes per block: `lanes * lane_bytes`.
  #[inline]
  #[must_use]
  pub const fn block_bytes(&self) -> usize {
    self.block_bytes
  }

  /// Shift that moves a lane CRC past one following lane.
  #[inline]
  pub(crate) const fn merge(&self) -> &ZeroShift {
    &self.merge
  }
}

impl fmt::Debug for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Level")
      .field("chunk_words", &self.chunk_words)
      .field("lanes", &self.lanes)
      .field("block_bytes", &self.block_bytes)
      .finish()
  }
}

impl fmt::Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}x{}", self.chunk_words, self.lanes)
  }
}

const fn standard_level(depth: usize, chunk_words: usize) -> Level {
  match Level::try_new(depth, chunk_words, DEFAULT_LANES) {
    Ok(level) => level,
    Err(_) => panic!("invalid standard level"),
  }
}

static STANDARD_LEVELS: [Level; 3] = [standard_level(0, 4096), standard_level(1, 512), standard_level(2, 64)];

static STANDARD: InterleavePlan = InterleavePlan { levels: Cow::Borrowed(&STANDARD_LEVELS) };

static SEQUENTIAL: InterleavePlan = InterleavePlan::sequential();

/// How a buffer is split into lanes, level by level.
///
/// See the [module documentation](self) for the layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterleavePlan {
  levels: Cow<'static, [Level]>,
}

impl InterleavePlan {
  /// The empty plan: one stream, words then bytes.
  #[inline]
  #[must_use]
  pub const fn sequential() -> Self {
    Self { levels: Cow::Borrowed(&[]) }
  }

  /// Shared instance of [`sequential`](Self::sequential).
  #[inline]
  #[must_use]
  pub fn sequential_ref() -> &'static Self {
    &SEQUENTIAL
  }

  /// The default plan: `4096 / 512 / 64` words with three lanes each
  /// (96 KiB, 12 KiB and 1.5 KiB blocks). Built at compile time.
  #[inline]
  #[must_use]
  pub fn standard() -> &'static Self {
    &STANDARD
  }

  /// Put a new outermost level of `chunk_words` words (three lanes) on top of
  /// `inner`.
  ///
  /// `chunk_words == 0` is the terminal marker: it yields the sequential plan
  /// when `inner` is sequential and is rejected otherwise.
  pub fn nest(chunk_words: usize, inner: Self) -> Result<Self, PlanError> {
    let mut entries = Vec::with_capacity(inner.depth().saturating_add(1));
    entries.push((chunk_words, DEFAULT_LANES));
    entries.extend(inner.levels.iter().map(|level| (level.chunk_words, level.lanes)));
    build(&entries)
  }

  /// Build from a list of chunk sizes in words, outermost first, three lanes
  /// per level.
  ///
  /// A `0` ends the list; only further zeros may follow it. An empty list is
  /// the sequential plan.
  ///
  /// ```
  /// use checksum::{InterleavePlan, PlanError};
  ///
  /// assert!(InterleavePlan::from_chunk_words(&[])?.is_sequential());
  /// assert!(InterleavePlan::from_chunk_words(&[0])?.is_sequential());
  /// assert_eq!(InterleavePlan::from_chunk_words(&[4096, 512, 0])?.depth(), 2);
  /// assert!(InterleavePlan::from_chunk_words(&[64, 4096]).is_err());
  /// # Ok::<(), PlanError>(())
  /// ```
  pub fn from_chunk_words(chunk_words: &[usize]) -> Result<Self, PlanError> {
    let entries: Vec<_> = chunk_words.iter().map(|&words| (words, DEFAULT_LANES)).collect();
    build(&entries)
  }

  /// Number of levels. `0` for the sequential plan.
  #[inline]
  #[must_use]
  pub fn depth(&self) -> usize {
    self.levels.len()
  }

  /// True when the plan has no levels.
  #[inline]
  #[must_use]
  pub fn is_sequential(&self) -> bool {
    self.levels.is_empty()
  }

  /// Levels, outermost first.
  #[inline]
  #[must_use]
  pub fn levels(&self) -> &[Level] {
    &self.levels
  }

  /// Smallest input that is interleaved at all: one innermost block.
  #[must_use]
  pub fn min_interleaved_bytes(&self) -> Option<usize> {
    self.levels.last().map(Level::block_bytes)
  }
}

impl Default for InterleavePlan {
  #[inline]
  fn default() -> Self {
    Self::standard().clone()
  }
}

impl fmt::Display for InterleavePlan {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let Some((first, rest)) = self.levels.split_first() else {
      return f.write_str("sequential");
    };
    write!(f, "{first}")?;
    for level in rest {
      write!(f, "/{level}")?;
    }
    Ok(())
  }
}

/// Step-by-step [`InterleavePlan`] construction, outermost level first.
///
/// Validation happens in [`build`](Self::build).
#[derive(Clone, Debug, Default)]
pub struct PlanBuilder {
  entries: Vec<(usize, usize)>,
}

impl PlanBuilder {
  #[must_use]
  pub const fn new() -> Self {
    Self { entries: Vec::new() }
  }

  /// Add a level of `chunk_words` words with [`DEFAULT_LANES`] lanes.
  #[must_use]
  pub fn level(self, chunk_words: usize) -> Self {
    self.level_with_lanes(chunk_words, DEFAULT_LANES)
  }

  /// Add a level of `chunk_words` words with `lanes` lanes.
  #[must_use]
  pub fn level_with_lanes(mut self, chunk_words: usize, lanes: usize) -> Self {
    self.entries.push((chunk_words, lanes));
    self
  }

  pub fn build(self) -> Result<InterleavePlan, PlanError> {
    build(&self.entries)
  }
}

fn build(entries: &[(usize, usize)]) -> Result<InterleavePlan, PlanError> {
  match validate(entries) {
    Ok(levels) => {
      let plan = InterleavePlan { levels: Cow::Owned(levels) };
      tracing::trace!(depth = plan.depth(), plan = %plan, "interleave plan built");
      Ok(plan)
    }
    Err(error) => {
      tracing::debug!(%error, "interleave plan rejected");
      Err(error)
    }
  }
}

fn validate(entries: &[(usize, usize)]) -> Result<Vec<Level>, PlanError> {
  let mut levels: Vec<Level> = Vec::with_capacity(entries.len().min(MAX_DEPTH));
  let mut terminated = false;

  for (depth, &(chunk_words, lanes)) in entries.iter().enumerate() {
    if chunk_words == 0 {
      terminated = true;
      continue;
    }
    if terminated {
      return Err(PlanError::NestedInsideTerminal { depth });
    }
    if levels.len() == MAX_DEPTH {
      return Err(PlanError::TooDeep { depth: depth + 1 });
    }
    if let Some(outer) = levels.last() {
      if chunk_words >= outer.chunk_words {
        return Err(PlanError::NotDecreasing { depth, outer: outer.chunk_words, inner: chunk_words });
      }
    }
    levels.push(Level::try_new(depth, chunk_words, lanes)?);
  }

  Ok(levels)
}
