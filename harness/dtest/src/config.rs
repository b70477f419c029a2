//! Runner configuration.
//!
//! Defaults come from the build (the `bench` feature selects benchmark
//! mode). The process entry point then applies environment overrides:
//!
//! | Variable           | Meaning                                      |
//! |--------------------|----------------------------------------------|
//! | `DTEST_BENCH`      | `1`/`true`/`yes`/`on` or `0`/`false`/`no`/`off` |
//! | `DTEST_MIN_CYCLES` | Calibration stops once a pass takes this many cycles |
//! | `DTEST_MAX_ITER`   | Upper bound on calibrated iterations (at least 1) |
//!
//! A malformed override is reported and the previous value is kept.

use std::num::ParseIntError;

use thiserror::Error;

use crate::bench::{DEFAULT_MAX_ITERATIONS, DEFAULT_MIN_CYCLES};

pub const BENCH_VAR: &str = "DTEST_BENCH";
pub const MIN_CYCLES_VAR: &str = "DTEST_MIN_CYCLES";
pub const MAX_ITER_VAR: &str = "DTEST_MAX_ITER";

/// What a run does after the tests have executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Run each selected test once.
    Test,
    /// Also calibrate and report every test with a timed section.
    Benchmark,
}

impl Default for Mode {
    fn default() -> Self {
        if cfg!(feature = "bench") {
            Mode::Benchmark
        } else {
            Mode::Test
        }
    }
}

/// Calibration loop constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Calibration {
    /// A pass at least this long (in cycles) ends calibration.
    pub min_cycles: u64,
    /// Iteration counts never grow past this.
    pub max_iterations: u64,
}

impl Default for Calibration {
    fn default() -> Self {
        Calibration {
            min_cycles: DEFAULT_MIN_CYCLES,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Configuration for the test runner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Run only tests with exactly this name.
    pub filter: Option<String>,
    pub mode: Mode,
    pub calibration: Calibration,
}

/// A rejected environment override.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}: expected a boolean, found `{value}`")]
    InvalidBool { var: &'static str, value: String },
    #[error("{var}: expected an unsigned integer, found `{value}`")]
    InvalidNumber {
        var: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("{var} must be at least 1")]
    Zero { var: &'static str },
}

impl RunnerConfig {
    /// Select tests by exact name.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }

    /// Apply overrides found through `lookup`, returning the ones rejected.
    ///
    /// `lookup` maps a variable name to its value; the entry point passes
    /// `std::env::var`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(value) = lookup(BENCH_VAR) {
            match parse_bool(&value) {
                Some(true) => self.mode = Mode::Benchmark,
                Some(false) => self.mode = Mode::Test,
                None => errors.push(ConfigError::InvalidBool {
                    var: BENCH_VAR,
                    value,
                }),
            }
        }

        if let Some(value) = lookup(MIN_CYCLES_VAR) {
            match parse_u64(MIN_CYCLES_VAR, value) {
                Ok(min_cycles) => self.calibration.min_cycles = min_cycles,
                Err(e) => errors.push(e),
            }
        }

        if let Some(value) = lookup(MAX_ITER_VAR) {
            match parse_u64(MAX_ITER_VAR, value) {
                Ok(0) => errors.push(ConfigError::Zero { var: MAX_ITER_VAR }),
                Ok(max_iterations) => self.calibration.max_iterations = max_iterations,
                Err(e) => errors.push(e),
            }
        }

        errors
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_u64(var: &'static str, value: String) -> Result<u64, ConfigError> {
    // Allow `3_000_000_000` the way it would be written in source.
    let digits: String = value.trim().chars().filter(|c| *c != '_').collect();
    digits
        .parse()
        .map_err(|source| ConfigError::InvalidNumber { var, value, source })
}
