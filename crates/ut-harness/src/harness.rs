//! Harness - the context owning registry, failure counter and settings

use crate::error::HarnessResult;
use crate::failures::FailureCounter;
use crate::registry::Registry;
use crate::reporter::{paint, Reporter};
use crate::runner::{RunSummary, TestRunner};
use crate::timer::BatchTimer;
use colored::Color;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use ut_config::HarnessConfig;

/// Exit code used when diagnostics could not be written
const EXIT_IO_ERROR: i32 = 2;

/// Registered tests plus everything a run needs
#[derive(Debug, Default)]
pub struct Harness {
    registry: Registry,
    failures: Arc<FailureCounter>,
    config: HarnessConfig,
}

impl Harness {
    /// Empty harness with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty harness with the given settings
    pub fn with_config(config: HarnessConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Empty harness with settings loaded from a TOML file
    pub fn with_config_file(path: &Path) -> HarnessResult<Self> {
        Ok(Self::with_config(HarnessConfig::load_from_file(path)?))
    }

    /// Harness holding every `unit_test!` declaration in the binary
    pub fn from_registered() -> Self {
        Self {
            registry: Registry::from_static(),
            ..Self::default()
        }
    }

    /// Replace the settings
    pub fn config(mut self, config: HarnessConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a test. Always returns `true`.
    pub fn register(
        &mut self,
        suite: impl Into<String>,
        name: impl Into<String>,
        entry: impl Fn() + Send + Sync + 'static,
    ) -> bool {
        self.registry.register(suite, name, entry)
    }

    /// Registered tests
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Handle on the failure counter, for test bodies that report directly
    pub fn failures(&self) -> Arc<FailureCounter> {
        Arc::clone(&self.failures)
    }

    /// Current settings
    pub fn settings(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run the selected tests, reporting to `sink`
    pub fn run_to<W: Write>(&self, matcher: Option<&str>, sink: W) -> HarnessResult<RunSummary> {
        let mut reporter = Reporter::new(sink, self.config.color);
        self.runner()
            .run(&self.registry, &self.failures, matcher, &mut reporter)
    }

    /// Run the selected tests, reporting to stderr, and return the exit code
    pub fn run_all(&self, matcher: Option<&str>) -> i32 {
        let mut reporter = Reporter::stderr(self.config.color);
        let result = self
            .runner()
            .run(&self.registry, &self.failures, matcher, &mut reporter);
        self.finish(result, io::stderr())
    }

    /// Exit code for a finished run; a run that could not report is
    /// explained on `diagnostics` and exits with 2
    fn finish<W: Write>(&self, result: HarnessResult<RunSummary>, mut diagnostics: W) -> i32 {
        match result {
            Ok(summary) => self.config.exit_policy.exit_code(summary.failures),
            Err(e) => {
                let label = if self.config.color {
                    paint("error:", Color::Red)
                } else {
                    "error:".to_string()
                };
                let _ = writeln!(diagnostics, "{} {}", label, e);
                EXIT_IO_ERROR
            }
        }
    }

    /// Batch timer on stderr, colored per the harness settings
    pub fn timer(&self, size: Option<usize>) -> BatchTimer {
        BatchTimer::on_stderr(size, self.config.color)
    }

    /// Batch timer reporting to `sink`, colored per the harness settings
    pub fn timer_to<W: Write>(&self, sink: W, size: Option<usize>) -> io::Result<BatchTimer<W>> {
        BatchTimer::start_in(sink, size, self.config.color)
    }

    fn runner(&self) -> TestRunner {
        TestRunner::new().with_contain_panics(self.config.contain_panics)
    }
}

/// Run every `unit_test!` in the binary with default settings
pub fn run_registered() -> ExitCode {
    exit_code(Harness::from_registered().run_all(None))
}

/// Convert a harness exit code for `main`
pub fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(exit_status(code))
}

/// Process status byte for a harness exit code; out-of-range codes become 1
fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
