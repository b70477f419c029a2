//! Test execution engine.
//!
//! Runs the selected tests of a [`Registry`] one after another on the
//! calling thread, writes the line-oriented report, and tallies a
//! [`Summary`]. A failing `expect!` is caught here, at the boundary of each
//! test invocation, and never travels further.

use std::io::{self, Write};

use crate::bench::{calibrate, Measurement};
use crate::config::{Mode, RunnerConfig};
use crate::cycles;
use crate::expect::Failure;
use crate::registry::{Descriptor, Registry};
use crate::summary::Summary;

/// Test runner.
#[derive(Clone, Debug, Default)]
pub struct Runner {
    config: RunnerConfig,
}

impl Runner {
    /// Create a runner with the default config.
    pub fn new() -> Self {
        Runner::default()
    }

    /// Create a runner with a custom config.
    pub fn with_config(config: RunnerConfig) -> Self {
        Runner { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    fn selects(&self, test: &Descriptor) -> bool {
        match self.config.filter.as_deref() {
            Some(name) => name == test.name(),
            None => true,
        }
    }

    /// Run the selected tests in `registry`, reporting to `out`.
    ///
    /// Only write errors on `out` are returned; test failures are part of
    /// the summary.
    pub fn run<W: Write>(&self, registry: &mut Registry, out: &mut W) -> io::Result<Summary> {
        let filter = self.config.filter.as_deref();
        let mut summary = Summary::new();
        tracing::info!(tests = registry.len(), filter = ?filter, mode = ?self.config.mode, "starting run");

        for test in registry.iter_mut() {
            if !self.selects(test) {
                summary.skip += 1;
                continue;
            }
            summary.count += 1;

            let _span = tracing::debug_span!(
                "test",
                name = test.name(),
                file = test.file(),
                line = test.line()
            )
            .entered();

            test.reset();
            if let Err(failure) = test.invoke() {
                write_failure(out, test.name(), &failure)?;
            }
            if !test.failed() {
                summary.pass += 1;
                writeln!(out, "PASS \"{}\"", test.name())?;
            }
        }

        if summary.count == 0 {
            match filter {
                Some(name) if !registry.is_empty() => writeln!(out, "test \"{name}\" not found.")?,
                _ => writeln!(out, "no tests found.")?,
            }
            out.flush()?;
            tracing::info!("no tests selected");
            return Ok(summary);
        }

        if self.config.mode == Mode::Benchmark {
            self.run_benchmarks(registry, &mut summary, out)?;
        }

        writeln!(out, "{}", summary.summary_line())?;
        out.flush()?;
        tracing::info!(
            pass = summary.pass,
            count = summary.count,
            skip = summary.skip,
            "run finished"
        );
        Ok(summary)
    }

    /// Calibrate every selected test that entered a timed section and
    /// print the table.
    ///
    /// Every such test gets a row, including ones that failed. A test that
    /// passed its first run but fails during calibration is moved from
    /// `pass` to failed, and its row shows the last pass that ran.
    fn run_benchmarks<W: Write>(
        &self,
        registry: &mut Registry,
        summary: &mut Summary,
        out: &mut W,
    ) -> io::Result<()> {
        if !cycles::is_supported() {
            tracing::warn!("no cycle counter on this architecture; timings will read 0");
        }

        writeln!(out)?;
        writeln!(out, "{:<40}| {:<20}| it", "benchmark", "cy/it")?;
        writeln!(out, "{}|{}|{}", "-".repeat(40), "-".repeat(21), "-".repeat(12))?;

        for test in registry.iter_mut() {
            if !test.is_benchmark() || !self.selects(test) {
                continue;
            }
            let passed = !test.failed();
            let _span = tracing::debug_span!("calibrate", name = test.name()).entered();
            let measurement = match calibrate(test, &self.config.calibration) {
                Ok(measurement) => measurement,
                Err(failure) => {
                    tracing::warn!(name = test.name(), %failure, "benchmark failed during calibration");
                    write_failure(out, test.name(), &failure)?;
                    if passed {
                        summary.pass -= 1;
                    }
                    Measurement::of(test)
                }
            };
            writeln!(
                out,
                "{:<40}| {:<20.0}| {}",
                measurement.name,
                measurement.cycles_per_iteration(),
                measurement.iterations
            )?;
            summary.benchmarks.push(measurement);
        }
        Ok(())
    }
}

fn write_failure<W: Write>(out: &mut W, name: &str, failure: &Failure) -> io::Result<()> {
    writeln!(out, "FAIL \"{name}\"")?;
    writeln!(out, "    {failure}")
}
