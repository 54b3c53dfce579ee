//! The engine with every CPU capability forced off.
//!
//! Every test in this binary installs the same empty override and never clears
//! it, so they can run in parallel.

use checksum::{Crc32c, InterleavePlan, crc32c};
use platform::Caps;

const CHECK_STRING: &[u8] = b"123456789";
const CRC32C_CHECK: u32 = 0xE306_9283;

fn force_portable() {
  platform::set_caps_override(Some(Caps::NONE));
  let hardware = checksum::initialize();
  assert!(!hardware, "initialize() must report no hardware under an empty override");
}

#[test]
fn probe_reports_portable() {
  force_portable();
  assert!(!checksum::is_hardware_accelerated());
  assert_eq!(checksum::selected_backend(), "portable/slice8");
  assert!(platform::has_override());
}

#[test]
fn crc32c_produces_correct_result() {
  force_portable();
  let result = Crc32c::checksum(CHECK_STRING);
  assert_eq!(
    result, CRC32C_CHECK,
    "CRC-32C mismatch: got {result:#010X}, expected {CRC32C_CHECK:#010X}"
  );
}

#[test]
fn every_plan_matches_sequential() {
  force_portable();
  let data: Vec<u8> = (0..100_000u32).map(|i| (i ^ (i >> 7)) as u8).collect();
  let expected = crc32c(0, &data, &InterleavePlan::sequential());

  for chunks in [&[64][..], &[4096], &[4096, 64], &[4096, 512, 64]] {
    let plan = InterleavePlan::from_chunk_words(chunks).unwrap();
    assert_eq!(crc32c(0, &data, &plan), expected, "plan {plan}");
  }
}

#[test]
fn streaming_hasher() {
  force_portable();
  let mut hasher = Crc32c::new();
  for byte in CHECK_STRING {
    hasher.update(core::slice::from_ref(byte));
  }
  assert_eq!(hasher.finalize(), CRC32C_CHECK);
}
