//! A test that never touches its descriptor may omit the parameter.

#[dtest::test("smoke")]
fn smoke() {
    let _ = vec![1, 2, 3].len();
}

fn main() {
    let mut registry = dtest::Registry::collect();
    let summary = dtest::Runner::new()
        .run(&mut registry, &mut std::io::sink())
        .unwrap();
    assert_eq!(summary.pass, 1);
}
