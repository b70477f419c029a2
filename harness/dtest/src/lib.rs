//! Self-registering test and microbenchmark harness.
//!
//! Tests are declared with the `#[dtest::test("name")]` attribute. Each
//! declaration registers itself before `main` runs, so a program only needs
//! to hand control to [`main`]:
//!
//! ```text
//! use dtest::{expect, Descriptor};
//!
//! #[dtest::test("add")]
//! fn add(t: &mut Descriptor) {
//!     expect!(t, 1 + 1 == 2);
//! }
//!
//! #[dtest::test("sum")]
//! fn sum(t: &mut Descriptor) {
//!     let data: Vec<u64> = (0..1024).collect();
//!     t.bench(|| data.iter().sum::<u64>());
//! }
//!
//! fn main() -> std::process::ExitCode {
//!     dtest::main()
//! }
//! ```
//!
//! # Modes
//!
//! In test mode every selected test runs once. In benchmark mode each test
//! that entered a timed section is re-run with calibrated iteration counts
//! and reported as cycles per iteration. The mode defaults to test mode
//! (benchmark mode with the `bench` feature) and can be overridden with
//! `DTEST_BENCH`; see [`config`].
//!
//! # Exit codes
//!
//! - `0`: every selected test passed
//! - `1`: at least one selected test failed
//! - `2`: no test matched (empty registry or unknown name)

pub mod bench;
pub mod config;
pub mod cycles;
mod expect;
pub mod registry;
pub mod runner;
mod summary;

use std::process::ExitCode;
use std::sync::Once;

pub use bench::Measurement;
pub use config::{Calibration, ConfigError, Mode, RunnerConfig};
pub use dtest_macros::test;
pub use expect::{Failure, Outcome};
pub use registry::{Descriptor, Registry, TestDef, TestFn};
pub use runner::Runner;
pub use summary::Summary;

#[doc(hidden)]
pub mod __private {
    pub use inventory;
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Only installs a subscriber when `RUST_LOG`
/// is set, e.g. `RUST_LOG=dtest=debug`. Events go to stderr so the report on
/// stdout keeps its line format.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Process entry point: run every registered test against stdout.
///
/// The first command-line argument, if any, selects tests by exact name.
/// Configuration overrides are read from the environment.
pub fn main() -> ExitCode {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let filter = args.next();
    let extra = args.count();
    if extra > 0 {
        tracing::warn!(extra, "ignoring extra command-line arguments");
    }

    let mut config = RunnerConfig {
        filter,
        ..RunnerConfig::default()
    };
    for error in config.apply_overrides(|var| std::env::var(var).ok()) {
        eprintln!("dtest: {error}");
    }

    let mut registry = Registry::collect();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match Runner::with_config(config).run(&mut registry, &mut out) {
        Ok(summary) => ExitCode::from(summary.exit_code()),
        Err(error) => {
            eprintln!("dtest: failed to write report: {error}");
            ExitCode::FAILURE
        }
    }
}
