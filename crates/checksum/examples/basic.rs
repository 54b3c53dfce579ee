//! Basic usage: probe, plans, one-shot and streaming.
//!
//! Run with: `cargo run --example basic -p checksum`

use checksum::{Crc32c, InterleavePlan, PlanBuilder, crc32c};

fn main() {
  println!("=== CRC-32C Basic Examples ===\n");

  probe();
  plans();
  streaming();
  combine();
}

fn probe() {
  println!("--- Capability Probe ---\n");

  let hardware = checksum::initialize();
  println!("hardware CRC-32C: {hardware}");
  println!("kernel:           {}\n", checksum::selected_backend());
}

/// The same CRC no matter how the buffer is interleaved.
fn plans() {
  println!("--- Interleave Plans ---\n");

  let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();

  let plans = [
    InterleavePlan::sequential(),
    InterleavePlan::from_chunk_words(&[64]).expect("valid plan"),
    InterleavePlan::from_chunk_words(&[4096, 64]).expect("valid plan"),
    InterleavePlan::standard().clone(),
    PlanBuilder::new().level(1024).level_with_lanes(32, 6).build().expect("valid plan"),
  ];

  let expected = crc32c(0, &data, &plans[0]);
  for plan in &plans {
    let crc = crc32c(0, &data, plan);
    println!("{:<22} 0x{crc:08X}", plan.to_string());
    assert_eq!(crc, expected);
  }

  match InterleavePlan::from_chunk_words(&[64, 4096]) {
    Ok(plan) => unreachable!("accepted {plan}"),
    Err(err) => println!("rejected [64, 4096]: {err}\n"),
  }
}

fn streaming() {
  println!("--- Streaming ---\n");

  let mut hasher = Crc32c::new();
  hasher.update(b"1234");
  hasher.update(b"56789");
  let crc = hasher.finalize();
  println!("\"123456789\" -> 0x{crc:08X}\n");
  assert_eq!(crc, 0xE306_9283);
}

fn combine() {
  println!("--- Combine ---\n");

  let (a, b) = b"hello world".split_at(6);
  let combined = Crc32c::combine(Crc32c::checksum(a), Crc32c::checksum(b), b.len());
  println!("crc(\"hello \") + crc(\"world\") -> 0x{combined:08X}");
  assert_eq!(combined, Crc32c::checksum(b"hello world"));
}
