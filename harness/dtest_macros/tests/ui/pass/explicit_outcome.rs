//! A test that returns `Outcome` itself is kept as written.

use dtest::{expect, Descriptor, Outcome};

#[dtest::test("parse")]
fn parse(t: &mut Descriptor) -> Outcome {
    let value = "42".parse::<u32>();
    expect!(t, value == Ok(42));
    Ok(())
}

fn main() {}
