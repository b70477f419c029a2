//! An explicit `-> ()` is accepted like an omitted return type.

use dtest::{expect, Descriptor};

#[dtest::test("unit")]
fn unit(t: &mut Descriptor) -> () {
    expect!(t, 2 + 2 == 4);
}

fn main() {
    let mut registry = dtest::Registry::collect();
    let summary = dtest::Runner::new()
        .run(&mut registry, &mut std::io::sink())
        .unwrap();
    assert_eq!(summary.pass, 1);
}
