//! Procedural macros for the dtest harness.
//!
//! # Test Declaration
//!
//! ```text
//! use dtest::{expect, Descriptor};
//!
//! #[dtest::test("add")]
//! fn add(t: &mut Descriptor) {
//!     expect!(t, 1 + 1 == 2);
//! }
//! ```
//!
//! The attribute keeps the function (rewritten to return `dtest::Outcome`)
//! and submits a `dtest::TestDef` for it to the link-time registry, so the
//! test is known before `main` runs.

mod declare;

use proc_macro::TokenStream;

/// Declare a self-registering test.
///
/// # Arguments
///
/// - A string literal: the test's display name and filter key.
///
/// # Accepted Functions
///
/// - `fn name(t: &mut Descriptor) { ... }`: the body may use `expect!` and
///   `t.bench(...)`.
/// - `fn name() { ... }`: for bodies that never touch the descriptor.
/// - `fn name(t: &mut Descriptor) -> dtest::Outcome { ... }`: left as written.
///
/// `async`, `const`, generic, and variadic functions are rejected, as are
/// functions with more than one parameter.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    match declare::expand(attr.into(), item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
