//! A timed section inside a declared test.

use dtest::{expect, Descriptor};

#[dtest::test("sum")]
fn sum(t: &mut Descriptor) {
    let data: Vec<u64> = (0..256).collect();
    t.bench(|| data.iter().sum::<u64>());
    expect!(t, data.len() == 256);
}

fn main() {
    let mut registry = dtest::Registry::collect();
    dtest::Runner::new()
        .run(&mut registry, &mut std::io::sink())
        .unwrap();
    assert!(registry.iter().all(Descriptor::is_benchmark));
}
