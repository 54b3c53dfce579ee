//! CRC-32C throughput across interleave plans.
//!
//! Run: `cargo bench -p checksum -- crc32c`
//! Native: `RUSTFLAGS='-C target-cpu=native' cargo bench -p checksum -- crc32c`
//! Backend selection is logged at debug level: `RUST_LOG=checksum=debug`.
//!
//! The plan sweep covers:
//! - `sequential`: one stream, no interleaving
//! - single levels of 64..4096 words
//! - 4096-word outer levels over 64..1024-word inner levels

use checksum::{InterleavePlan, crc32c, crc32c_portable};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tracing_subscriber::EnvFilter;

/// Buffer sizes.
const SIZES: [usize; 4] = [4 * 1024, 64 * 1024, 1024 * 1024, 16 * 1024 * 1024];

/// Smaller sizes for the bitwise reference.
const BITWISE_SIZES: [usize; 3] = [64, 1024, 16 * 1024];

fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .try_init();
}

fn sweep() -> Vec<InterleavePlan> {
  let mut plans = vec![InterleavePlan::sequential()];
  for words in [64, 128, 256, 512, 1024, 2048, 4096] {
    plans.push(InterleavePlan::from_chunk_words(&[words]).expect("single level"));
  }
  for inner in [64, 128, 256, 512, 1024] {
    plans.push(InterleavePlan::from_chunk_words(&[4096, inner]).expect("nested level"));
  }
  plans.push(InterleavePlan::standard().clone());
  plans
}

fn gen_bytes(len: usize) -> Vec<u8> {
  let mut x = 0x0123_4567_89ab_cdefu64;
  (0..len)
    .map(|_| {
      x ^= x << 13;
      x ^= x >> 7;
      x ^= x << 17;
      x as u8
    })
    .collect()
}

/// The selected kernel (hardware when available) over every plan.
fn bench_plans(c: &mut Criterion) {
  init_tracing();
  let hardware = checksum::initialize();
  eprintln!("crc32c backend: {} (hardware: {hardware})", checksum::selected_backend());

  for size in SIZES {
    let data = gen_bytes(size);
    let mut group = c.benchmark_group(format!("crc32c/plans/{size}"));
    group.throughput(Throughput::Bytes(size as u64));

    for plan in sweep() {
      group.bench_with_input(BenchmarkId::from_parameter(&plan), &data, |b, data| {
        b.iter(|| core::hint::black_box(crc32c(0, data, &plan)));
      });
    }

    group.finish();
  }
}

/// The portable kernel, sequential versus standard plan.
fn bench_portable(c: &mut Criterion) {
  let mut group = c.benchmark_group("crc32c/portable");

  for size in SIZES {
    let data = gen_bytes(size);
    group.throughput(Throughput::Bytes(size as u64));

    for plan in [InterleavePlan::sequential(), InterleavePlan::standard().clone()] {
      group.bench_with_input(BenchmarkId::new(plan.to_string(), size), &data, |b, data| {
        b.iter(|| core::hint::black_box(crc32c_portable(0, data, &plan)));
      });
    }
  }

  group.finish();
}

/// The table-less reference implementation.
fn bench_bitwise(c: &mut Criterion) {
  let mut group = c.benchmark_group("crc32c/bitwise");

  for size in BITWISE_SIZES {
    let data = gen_bytes(size);
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
      b.iter(|| {
        let crc = checksum::bitwise::compute(0xFFFF_FFFF, data);
        core::hint::black_box(crc ^ 0xFFFF_FFFF)
      });
    });
  }

  group.finish();
}

/// Merging partial CRCs: generic square-and-multiply versus a level's table.
fn bench_combine(c: &mut Criterion) {
  let mut group = c.benchmark_group("crc32c/combine");
  let table = checksum::combine::ZeroShift::new(32 * 1024);

  group.bench_function("crc32c_combine/32KiB", |b| {
    b.iter(|| {
      let (a, b) = core::hint::black_box((0xE306_9283, 0x1234_5678));
      checksum::combine::crc32c_combine(a, b, 32 * 1024)
    });
  });
  group.bench_function("zero_shift/32KiB", |b| {
    b.iter(|| table.apply(core::hint::black_box(0xE306_9283)));
  });

  group.finish();
}

criterion_group!(benches, bench_plans, bench_portable, bench_bitwise, bench_combine);
criterion_main!(benches);
