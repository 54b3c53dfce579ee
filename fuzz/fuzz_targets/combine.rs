//! Fuzz target for CRC-32C combine chains.
//!
//! Splits the input at arbitrary points, checksums each piece on its own and
//! folds the pieces back together with `combine`.

#![no_main]

use arbitrary::Arbitrary;
use checksum::Crc32c;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  splits: Vec<usize>,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  if data.is_empty() {
    return;
  }

  let mut splits: Vec<usize> = input.splits.iter().map(|s| s % (data.len() + 1)).collect();
  splits.push(data.len());
  splits.sort();
  splits.dedup();

  let expected = Crc32c::checksum(data);

  let mut combined = 0u32;
  let mut prev = 0;
  for &split in &splits {
    let chunk = &data[prev..split];
    combined = Crc32c::combine(combined, Crc32c::checksum(chunk), chunk.len());
    prev = split;
  }

  assert_eq!(combined, expected, "crc32c combine chain mismatch");
});
