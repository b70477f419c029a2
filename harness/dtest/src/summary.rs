//! Run results.

use crate::bench::Measurement;

/// Tally of one run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    /// Tests selected by the filter and executed.
    pub count: usize,
    /// Executed tests that passed.
    pub pass: usize,
    /// Tests the filter left out.
    pub skip: usize,
    /// Benchmark rows, in report order. Empty outside benchmark mode.
    pub benchmarks: Vec<Measurement>,
}

impl Summary {
    pub fn new() -> Self {
        Summary::default()
    }

    /// Executed tests that failed.
    pub fn failed(&self) -> usize {
        self.count - self.pass
    }

    pub fn has_failures(&self) -> bool {
        self.pass != self.count
    }

    /// Get exit code: 0 = all pass, 1 = failures, 2 = no tests selected.
    pub fn exit_code(&self) -> u8 {
        if self.count == 0 {
            2
        } else {
            u8::from(self.has_failures())
        }
    }

    /// The closing report line.
    pub fn summary_line(&self) -> String {
        if self.skip > 0 {
            format!(
                "{}/{} tests passed; {} skipped.",
                self.pass, self.count, self.skip
            )
        } else {
            format!("{}/{} tests passed.", self.pass, self.count)
        }
    }
}
