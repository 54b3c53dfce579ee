//! Fuzz target for the interleaved CRC-32C engine.
//!
//! Tests that, for an arbitrary plan:
//! - No panics on arbitrary input or plan shape
//! - The interleaved CRC equals the sequential CRC
//! - Splitting the input across calls does not change the result

#![no_main]

use arbitrary::Arbitrary;
use checksum::{InterleavePlan, PlanBuilder, crc32c, crc32c_portable};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  levels: Vec<(u16, u8)>,
  split_point: usize,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let split = input.split_point % (data.len() + 1);

  // Invalid shapes must be rejected, never panic.
  let builder = input
    .levels
    .iter()
    .take(10)
    .fold(PlanBuilder::new(), |b, &(words, lanes)| b.level_with_lanes(usize::from(words), usize::from(lanes)));
  let Ok(plan) = builder.build() else {
    return;
  };

  let sequential = crc32c(0, data, &InterleavePlan::sequential());
  let interleaved = crc32c(0, data, &plan);
  assert_eq!(sequential, interleaved, "plan {plan} mismatch");
  assert_eq!(sequential, crc32c_portable(0, data, &plan), "portable plan {plan} mismatch");

  let (a, b) = data.split_at(split);
  let resumed = crc32c(crc32c(0, a, &plan), b, &plan);
  assert_eq!(sequential, resumed, "resume mismatch at {split}");
});
