//! Non-cryptographic checksum traits.

use core::fmt::Debug;

/// Incremental checksum algorithm.
///
/// # Usage
///
/// ```rust,ignore
/// use checksum::{Checksum, Crc32c};
///
/// // One-shot
/// let crc = Crc32c::checksum(b"hello world");
///
/// // Streaming
/// let mut hasher = Crc32c::new();
/// hasher.update(b"hello ");
/// hasher.update(b"world");
/// assert_eq!(hasher.finalize(), crc);
/// ```
///
/// # Implementor Requirements
///
/// - `new()` must return the same state as `Default::default()`
/// - `finalize()` must not consume or disturb the running state
/// - `reset()` must restore the state `new()` produced
pub trait Checksum: Clone + Default {
  /// Output size in bytes.
  const OUTPUT_SIZE: usize;

  /// The checksum output type.
  type Output: Copy + Eq + Debug + Default;

  /// Create a hasher over the empty message.
  #[must_use]
  fn new() -> Self;

  /// Create a hasher that continues from a previously finalized value.
  ///
  /// `Self::resume(Self::checksum(a))` followed by `update(b)` yields the
  /// checksum of `a || b`.
  #[must_use]
  fn resume(running: Self::Output) -> Self;

  /// Feed more data.
  fn update(&mut self, data: &[u8]);

  /// Feed several non-contiguous buffers, in order.
  #[inline]
  fn update_vectored(&mut self, bufs: &[&[u8]]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Feed `std::io::IoSlice` buffers, in order.
  #[cfg(feature = "std")]
  #[inline]
  fn update_io_slices(&mut self, bufs: &[std::io::IoSlice<'_>]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Checksum of everything fed so far.
  #[must_use]
  fn finalize(&self) -> Self::Output;

  /// Forget everything fed so far.
  fn reset(&mut self);

  /// Checksum of `data` in one shot.
  #[inline]
  #[must_use]
  fn checksum(data: &[u8]) -> Self::Output {
    let mut h = Self::new();
    h.update(data);
    h.finalize()
  }

  /// Checksum of the concatenation of `bufs` in one shot.
  #[inline]
  #[must_use]
  fn checksum_vectored(bufs: &[&[u8]]) -> Self::Output {
    let mut h = Self::new();
    h.update_vectored(bufs);
    h.finalize()
  }
}

/// Checksums whose results can be concatenated arithmetically.
///
/// `combine(checksum(A), checksum(B), len(B)) == checksum(A || B)`, computed in
/// time logarithmic in `len(B)` and without touching the bytes of either part.
/// For CRCs this is
///
/// ```text
/// crc(A || B) = crc(A) * x^(8*len(B)) mod G(x)  XOR  crc(B)
/// ```
pub trait ChecksumCombine: Checksum {
  /// Combine `crc_a = checksum(A)` with `crc_b = checksum(B)` where `B` is
  /// `len_b` bytes long.
  #[must_use]
  fn combine(crc_a: Self::Output, crc_b: Self::Output, len_b: usize) -> Self::Output;
}
