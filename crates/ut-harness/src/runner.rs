//! Test runner - execute registered tests

use crate::error::HarnessResult;
use crate::failures::{ActiveRun, FailureCounter};
use crate::registry::{Registry, TestDescriptor};
use crate::reporter::{Line, Reporter};
use std::any::Any;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Outcome of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Tests invoked during this run
    pub executed: usize,
    /// Failure counter value when the run finished
    pub failures: usize,
}

/// Test runner with configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct TestRunner {
    /// Catch panics per test instead of letting them end the run
    contain_panics: bool,
}

impl TestRunner {
    /// Create a new test runner with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether a panicking test is contained and counted as a failure
    pub fn with_contain_panics(mut self, contain_panics: bool) -> Self {
        self.contain_panics = contain_panics;
        self
    }

    /// Run every test selected by `matcher`, in registration order.
    ///
    /// Tests run one after another on the calling thread. While the run is in
    /// progress `failures` is the active counter, for this thread and for
    /// threads its tests spawn.
    pub fn run<W: Write>(
        &self,
        registry: &Registry,
        failures: &Arc<FailureCounter>,
        matcher: Option<&str>,
        reporter: &mut Reporter<W>,
    ) -> HarnessResult<RunSummary> {
        let _active = ActiveRun::enter(Arc::clone(failures));
        let mut executed = 0;

        for test in registry.iter().filter(|t| t.matches(matcher)) {
            reporter.emit(&Line::Run {
                suite: test.suite(),
                name: test.name(),
            })?;
            self.run_single_test(test, failures, reporter)?;
            executed += 1;
        }

        let summary = RunSummary {
            executed,
            failures: failures.get(),
        };
        reporter.summary(summary.executed, summary.failures)?;

        Ok(summary)
    }

    /// Run a single test
    fn run_single_test<W: Write>(
        &self,
        test: &TestDescriptor,
        failures: &FailureCounter,
        reporter: &mut Reporter<W>,
    ) -> HarnessResult<()> {
        if !self.contain_panics {
            test.invoke();
            return Ok(());
        }

        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| test.invoke())) {
            failures.record();
            reporter.emit(&Line::Panicked {
                suite: test.suite(),
                name: test.name(),
                message: &panic_message(payload.as_ref()),
            })?;
        }

        Ok(())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
