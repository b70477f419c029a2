//! Benchmarks registered alongside ordinary assertions.
//!
//! Run with `DTEST_BENCH=1` to get the cycles-per-iteration table.

use std::hint::black_box;
use std::process::ExitCode;

use dtest::{expect, Descriptor};

fn fib(n: u32) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        (a, b) = (b, a.wrapping_add(b));
    }
    a
}

fn checksum(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0u32, |acc, &b| acc.rotate_left(5) ^ u32::from(b))
}

#[dtest::test("fib")]
fn fib_bench(t: &mut Descriptor) {
    expect!(t, fib(10) == 55);
    t.bench(|| fib(black_box(40)));
}

#[dtest::test("sort")]
fn sort_bench(t: &mut Descriptor) {
    let data: Vec<u32> = (0..512u32).map(|i| i.wrapping_mul(2_654_435_761) >> 7).collect();
    t.bench(|| {
        let mut v = data.clone();
        v.sort_unstable();
        v
    });
    let mut sorted = data.clone();
    sorted.sort_unstable();
    expect!(t, sorted.windows(2).all(|w| w[0] <= w[1]));
}

#[dtest::test("checksum")]
fn checksum_bench(t: &mut Descriptor) {
    let page = vec![0xA5u8; 4096];
    expect!(t, checksum(&[]) == 0);
    t.bench(|| checksum(black_box(&page)));
}

fn main() -> ExitCode {
    dtest::main()
}
