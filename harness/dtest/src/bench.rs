//! Benchmark engine: timed sections and iteration-count calibration.
//!
//! A test becomes a benchmark by entering a timed section with
//! [`Descriptor::bench`]. In a normal run the section body executes once.
//! In benchmark mode the runner calls [`calibrate`], which re-runs the whole
//! test with iteration counts 1, 10, 100, ... until one timed pass lasts at
//! least [`Calibration::min_cycles`]. Growing by decades amortizes the fixed
//! cost of the loop and the counter reads without asking the author to pick
//! a count.

use std::sync::atomic::{compiler_fence, Ordering};

use crate::config::Calibration;
use crate::cycles;
use crate::expect::Failure;
use crate::registry::Descriptor;

/// Calibration threshold: about one second on a 3 GHz processor.
pub const DEFAULT_MIN_CYCLES: u64 = 3_000_000_000;

/// Calibration never runs a timed section more often than this.
pub const DEFAULT_MAX_ITERATIONS: u64 = 1_000_000_000;

/// Force `value` to be treated as observed, so the work that produced it
/// cannot be optimized away.
#[inline]
pub fn escape<T>(value: &T) {
    let _ = std::hint::black_box(value);
}

/// Keep the compiler from moving memory accesses across this point.
#[inline]
pub fn barrier() {
    compiler_fence(Ordering::SeqCst);
}

impl Descriptor {
    /// Timed section.
    ///
    /// Marks the test as a benchmark. Outside calibration `body` runs once
    /// and nothing is measured. During calibration it runs exactly
    /// [`iterations`](Self::iterations) times between two counter reads and
    /// the delta is stored as [`elapsed`](Self::elapsed).
    ///
    /// Every result of `body` passes through [`escape`].
    pub fn bench<R>(&mut self, mut body: impl FnMut() -> R) {
        self.is_benchmark = true;

        let iterations = self.iterations;
        if iterations == 0 {
            escape(&body());
            return;
        }

        let start = cycles::now();
        barrier();
        for _ in 0..iterations {
            escape(&body());
        }
        barrier();
        self.elapsed = cycles::now().wrapping_sub(start);
    }

    /// Iteration count the current timed section runs with; 0 outside
    /// calibration.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}

/// One row of the benchmark report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Measurement {
    pub name: &'static str,
    pub iterations: u64,
    pub elapsed: u64,
}

impl Measurement {
    /// The pair stored by the test's most recent timed pass.
    pub(crate) fn of(test: &Descriptor) -> Self {
        Measurement {
            name: test.name(),
            iterations: test.iterations,
            elapsed: test.elapsed,
        }
    }

    /// Average cost of one iteration, in counter ticks.
    #[expect(
        clippy::cast_precision_loss,
        reason = "only the leading digits of the quotient are reported"
    )]
    pub fn cycles_per_iteration(&self) -> f64 {
        self.elapsed as f64 / self.iterations.max(1) as f64
    }
}

/// Find an iteration count for `test` and measure it.
///
/// Stops at the first pass lasting `min_cycles` or more. If the next
/// decade would exceed `max_iterations`, the last pass is reported as is.
/// A failing expectation during any pass aborts calibration; the
/// descriptor keeps the state of that pass.
pub fn calibrate(test: &mut Descriptor, calibration: &Calibration) -> Result<Measurement, Failure> {
    let max_iterations = calibration.max_iterations.max(1);
    let mut iterations = 1;

    loop {
        test.reset();
        test.iterations = iterations;
        test.invoke()?;
        tracing::debug!(
            name = test.name(),
            iterations,
            elapsed = test.elapsed,
            "calibration pass"
        );

        if test.elapsed >= calibration.min_cycles {
            break;
        }
        match iterations.checked_mul(10) {
            Some(next) if next <= max_iterations => iterations = next,
            _ => break,
        }
    }

    Ok(Measurement::of(test))
}
