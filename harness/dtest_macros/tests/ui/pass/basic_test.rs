//! A test that takes the descriptor and uses `expect!`.

use dtest::{expect, Descriptor};

#[dtest::test("add")]
fn add(t: &mut Descriptor) {
    expect!(t, 1 + 1 == 2);
}

fn main() {
    let registry = dtest::Registry::collect();
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.iter().next().map(Descriptor::name), Some("add"));
}
