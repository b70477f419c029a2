//! Test registry and per-test descriptors.
//!
//! Every `#[dtest::test("name")]` declaration submits a [`TestDef`] to a
//! link-time list before `main` runs. Nodes are pushed fully constructed, so
//! a partially initialized test is never visible. [`Registry::collect`]
//! snapshots that list into [`Descriptor`]s, which carry the mutable run
//! state.
//!
//! A registry built with [`Registry::register`] is traversed
//! most-recently-registered first. [`Registry::collect`] keeps whatever order
//! the link-time list yields, which depends on the platform and the linker,
//! so its traversal order is unspecified. Tests must not depend on it.

use rustc_hash::FxHashSet;

use crate::expect::{Failure, Outcome};

/// Entry point of a test body.
pub type TestFn = fn(&mut Descriptor) -> Outcome;

/// Static identity of one declared test.
#[derive(Clone, Copy, Debug)]
pub struct TestDef {
    /// Display name and exact-match filter key.
    pub name: &'static str,
    /// The test body.
    pub entry: TestFn,
    /// Source file of the declaration.
    pub file: &'static str,
    /// Source line of the declaration.
    pub line: u32,
}

impl TestDef {
    pub const fn new(name: &'static str, entry: TestFn, file: &'static str, line: u32) -> Self {
        TestDef {
            name,
            entry,
            file,
            line,
        }
    }
}

inventory::collect!(TestDef);

/// One registered test plus the state accumulated while it runs.
///
/// The runner hands each body a `&mut Descriptor`; `expect!` and the timed
/// section write their results back through it.
#[derive(Debug)]
pub struct Descriptor {
    def: TestDef,
    pub(crate) elapsed: u64,
    pub(crate) iterations: u64,
    pub(crate) failed: bool,
    pub(crate) is_benchmark: bool,
}

impl Descriptor {
    pub fn new(def: TestDef) -> Self {
        Descriptor {
            def,
            elapsed: 0,
            iterations: 0,
            failed: false,
            is_benchmark: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.def.name
    }

    pub fn file(&self) -> &'static str {
        self.def.file
    }

    pub fn line(&self) -> u32 {
        self.def.line
    }

    /// Cycles measured by the most recent timed section, 0 if none ran.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Whether the body entered a timed section during its last run.
    pub fn is_benchmark(&self) -> bool {
        self.is_benchmark
    }

    /// Mark this test failed and describe where.
    ///
    /// Called by the `expect!` expansion; test bodies return the result.
    #[doc(hidden)]
    #[cold]
    pub fn record_failure(&mut self, file: &'static str, line: u32, expr: &'static str) -> Failure {
        self.failed = true;
        Failure { file, line, expr }
    }

    /// Clear run state before a fresh, non-measuring execution.
    pub(crate) fn reset(&mut self) {
        self.elapsed = 0;
        self.iterations = 0;
        self.failed = false;
        self.is_benchmark = false;
    }

    /// Run the body once with the current state.
    ///
    /// An `Err` always leaves the descriptor marked failed, even when the body
    /// built the `Failure` itself instead of going through `expect!`.
    pub(crate) fn invoke(&mut self) -> Outcome {
        let entry = self.def.entry;
        let outcome = entry(self);
        if outcome.is_err() {
            self.failed = true;
        }
        outcome
    }
}

/// All tests known to a run.
#[derive(Debug, Default)]
pub struct Registry {
    /// Registration order; iteration walks it backwards.
    tests: Vec<Descriptor>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Registry::default()
    }

    /// Snapshot every test declared in the program, in unspecified order.
    ///
    /// Duplicate names are kept (a filter matches all of them) but logged.
    pub fn collect() -> Self {
        let mut registry = Registry::new();
        for def in inventory::iter::<TestDef> {
            registry.register(*def);
        }
        for name in registry.duplicate_names() {
            tracing::warn!(name, "multiple tests share this name");
        }
        tracing::debug!(tests = registry.len(), "collected registry");
        registry
    }

    /// Add a test. It becomes the first one visited.
    pub fn register(&mut self, def: TestDef) -> &mut Self {
        self.tests.push(Descriptor::new(def));
        self
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Visit tests, most recently registered first.
    pub fn iter(&self) -> impl Iterator<Item = &Descriptor> {
        self.tests.iter().rev()
    }

    /// Visit tests mutably, most recently registered first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Descriptor> {
        self.tests.iter_mut().rev()
    }

    /// Names registered more than once, each reported once.
    pub fn duplicate_names(&self) -> Vec<&'static str> {
        let mut seen = FxHashSet::default();
        let mut reported = FxHashSet::default();
        let mut duplicates = Vec::new();
        for test in self.iter() {
            if !seen.insert(test.name()) && reported.insert(test.name()) {
                duplicates.push(test.name());
            }
        }
        duplicates
    }
}
