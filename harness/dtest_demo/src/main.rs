//! Smallest useful dtest program: two arithmetic tests, one of them broken.
//!
//! ```text
//! $ dtest-demo
//! FAIL "sub"
//!     harness/dtest_demo/src/main.rs:33: difference(1, 1) == 2
//! PASS "add"
//! 1/2 tests passed.
//! $ dtest-demo add
//! PASS "add"
//! 1/1 tests passed; 1 skipped.
//! ```

use std::process::ExitCode;

use dtest::{expect, Descriptor};

fn sum(a: i64, b: i64) -> i64 {
    a + b
}

fn difference(a: i64, b: i64) -> i64 {
    a - b
}

#[dtest::test("add")]
fn add(t: &mut Descriptor) {
    expect!(t, sum(1, 1) == 2);
}

#[dtest::test("sub")]
fn sub(t: &mut Descriptor) {
    expect!(t, difference(1, 1) == 2);
}

fn main() -> ExitCode {
    dtest::main()
}
