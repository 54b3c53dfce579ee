//! CRC-32C (Castagnoli) driven by an [`InterleavePlan`].
//!
//! # Usage
//!
//! ```
//! use checksum::{crc32c, InterleavePlan};
//!
//! checksum::initialize();
//!
//! let plan = InterleavePlan::standard();
//! let crc = crc32c(0, b"123456789", plan);
//! assert_eq!(crc, 0xE306_9283);
//!
//! // The running CRC continues across calls.
//! let crc = crc32c(crc32c(0, b"1234", plan), b"56789", plan);
//! assert_eq!(crc, 0xE306_9283);
//! ```
//!
//! # Hardware Acceleration
//!
//! | Platform | Instruction | Kernel name |
//! |----------|-------------|-------------|
//! | x86_64 | SSE4.2 `crc32q` / `crc32b` | `x86_64/sse4.2` |
//! | aarch64 | CRC extension `crc32cx` / `crc32cb` | `aarch64/crc` |
//! | anything | slicing-by-8 tables | `portable/slice8` |
//!
//! Every kernel produces identical results for every plan.

#[macro_use]
pub(crate) mod engine;

mod dispatch;
pub(crate) mod portable;

#[cfg(target_arch = "aarch64")]
pub(crate) mod aarch64;

#[cfg(target_arch = "x86_64")]
pub(crate) mod x86_64;

use traits::{Checksum, ChecksumCombine};

use crate::plan::InterleavePlan;

/// Probe the CPU for the CRC-32C instruction and record the kernel to use.
///
/// Returns `true` when a hardware kernel was selected. Calling it again
/// re-probes, which picks up a capability override installed in between.
/// Engine calls made before the first `initialize` probe on their own.
///
/// When the instruction is missing the portable kernel is recorded; results
/// are the same, only slower.
pub fn initialize() -> bool {
  dispatch::initialize()
}

/// Whether the recorded kernel uses the hardware instruction.
#[inline]
#[must_use]
pub fn is_hardware_accelerated() -> bool {
  dispatch::active().hardware
}

/// Name of the recorded kernel, e.g. `"x86_64/sse4.2"`.
#[inline]
#[must_use]
pub fn selected_backend() -> &'static str {
  dispatch::active().name
}

/// Continue `running_crc` over `data`, interleaving according to `plan`.
///
/// `running_crc` is the CRC-32C of everything before `data` (`0` to start).
/// The result does not depend on the plan.
#[inline]
#[must_use]
pub fn crc32c(running_crc: u32, data: &[u8], plan: &InterleavePlan) -> u32 {
  if data.is_empty() {
    return running_crc;
  }
  !(dispatch::active().kernel)(!running_crc, data, plan.levels())
}

/// [`crc32c`] forced through the portable kernel.
#[inline]
#[must_use]
pub fn crc32c_portable(running_crc: u32, data: &[u8], plan: &InterleavePlan) -> u32 {
  if data.is_empty() {
    return running_crc;
  }
  !dispatch::portable()(!running_crc, data, plan.levels())
}

/// Streaming CRC-32C bound to a plan.
///
/// ```
/// use checksum::{Crc32c, InterleavePlan};
///
/// let plan = InterleavePlan::from_chunk_words(&[512, 64])?;
/// let mut hasher = Crc32c::with_plan(&plan);
/// hasher.update(b"hello ");
/// hasher.update(b"world");
/// assert_eq!(hasher.finalize(), Crc32c::checksum(b"hello world"));
/// # Ok::<(), checksum::PlanError>(())
/// ```
///
/// `Crc32c` is `Send` and `Sync`; hashers over different parts of a message
/// can run on different threads and be joined with [`combine`](Self::combine).
#[derive(Clone, Debug)]
pub struct Crc32c<'p> {
  crc: u32,
  initial: u32,
  plan: &'p InterleavePlan,
}

impl Crc32c<'static> {
  /// Hasher over the empty message, using [`InterleavePlan::standard`].
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self::with_plan(InterleavePlan::standard())
  }

  /// Hasher continuing from a finalized CRC, using [`InterleavePlan::standard`].
  ///
  /// ```
  /// use checksum::Crc32c;
  ///
  /// let (first, second) = b"hello world".split_at(6);
  /// let mut hasher = Crc32c::resume(Crc32c::checksum(first));
  /// hasher.update(second);
  /// assert_eq!(hasher.finalize(), Crc32c::checksum(b"hello world"));
  /// ```
  #[inline]
  #[must_use]
  pub fn resume(crc: u32) -> Self {
    Self::resume_with_plan(crc, InterleavePlan::standard())
  }
}

impl<'p> Crc32c<'p> {
  /// Hasher over the empty message.
  #[inline]
  #[must_use]
  pub const fn with_plan(plan: &'p InterleavePlan) -> Self {
    Self::resume_with_plan(0, plan)
  }

  /// Hasher continuing from a finalized CRC.
  #[inline]
  #[must_use]
  pub const fn resume_with_plan(crc: u32, plan: &'p InterleavePlan) -> Self {
    Self { crc, initial: crc, plan }
  }

  /// Checksum of `data` with the standard plan.
  #[inline]
  #[must_use]
  pub fn checksum(data: &[u8]) -> u32 {
    crc32c(0, data, InterleavePlan::standard())
  }

  /// Feed more data.
  #[inline]
  pub fn update(&mut self, data: &[u8]) {
    self.crc = crc32c(self.crc, data, self.plan);
  }

  /// CRC-32C of everything fed so far. Does not consume the hasher.
  #[inline]
  #[must_use]
  pub const fn finalize(&self) -> u32 {
    self.crc
  }

  /// Back to the state this hasher was created with.
  #[inline]
  pub fn reset(&mut self) {
    self.crc = self.initial;
  }

  /// The plan this hasher interleaves with.
  #[inline]
  #[must_use]
  pub const fn plan(&self) -> &'p InterleavePlan {
    self.plan
  }

  /// `crc(A || B)` from `crc(A)`, `crc(B)` and `len(B)`.
  ///
  /// ```
  /// use checksum::Crc32c;
  ///
  /// let (a, b) = b"hello world".split_at(6);
  /// let combined = Crc32c::combine(Crc32c::checksum(a), Crc32c::checksum(b), b.len());
  /// assert_eq!(combined, Crc32c::checksum(b"hello world"));
  /// ```
  #[inline]
  #[must_use]
  pub const fn combine(crc_a: u32, crc_b: u32, len_b: usize) -> u32 {
    crate::combine::crc32c_combine(crc_a, crc_b, len_b)
  }
}

impl Default for Crc32c<'_> {
  #[inline]
  fn default() -> Self {
    Crc32c::with_plan(InterleavePlan::standard())
  }
}

impl Checksum for Crc32c<'_> {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;

  #[inline]
  fn new() -> Self {
    Self::default()
  }

  #[inline]
  fn resume(running: u32) -> Self {
    Crc32c::resume_with_plan(running, InterleavePlan::standard())
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    Crc32c::update(self, data);
  }

  #[inline]
  fn finalize(&self) -> u32 {
    Crc32c::finalize(self)
  }

  #[inline]
  fn reset(&mut self) {
    Crc32c::reset(self);
  }

  #[inline]
  fn checksum(data: &[u8]) -> u32 {
    Crc32c::checksum(data)
  }
}

impl ChecksumCombine for Crc32c<'_> {
  #[inline]
  fn combine(crc_a: u32, crc_b: u32, len_b: usize) -> u32 {
    Crc32c::combine(crc_a, crc_b, len_b)
  }
}

#[cfg(feature = "std")]
impl std::io::Write for Crc32c<'_> {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    self.update(buf);
    Ok(buf.len())
  }

  #[inline]
  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}
