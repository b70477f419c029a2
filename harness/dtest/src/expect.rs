//! In-test assertions.
//!
//! A failed [`expect!`](crate::expect) returns from the test body with a
//! [`Failure`]. The runner catches it at the call boundary, prints it, and
//! moves on to the next test.

use thiserror::Error;

/// A failed expectation: where it was written and what it said.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{file}:{line}: {expr}")]
pub struct Failure {
    /// Source file of the `expect!` call.
    pub file: &'static str,
    /// Line of the `expect!` call.
    pub line: u32,
    /// The expression text, as written.
    pub expr: &'static str,
}

/// What a test body returns.
pub type Outcome = Result<(), Failure>;

/// Check a condition inside a test body.
///
/// On failure the enclosing test is marked failed and the body returns
/// immediately; later statements in the same test do not run.
///
/// ```text
/// #[dtest::test("parse")]
/// fn parse(t: &mut Descriptor) {
///     let value = "42".parse::<u32>();
///     expect!(t, value.is_ok());
///     expect!(t, value == Ok(42));
/// }
/// ```
#[macro_export]
macro_rules! expect {
    ($t:expr, $cond:expr $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($crate::Descriptor::record_failure(
                $t,
                ::core::file!(),
                ::core::line!(),
                ::core::stringify!($cond),
            ));
        }
    };
}
