//! Batch timer - wall-clock cost of a scoped batch of cases

use crate::reporter::{Line, Reporter};
use std::io::{self, Write};

/// Start of a timed region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSample {
    /// Wall-clock start, milliseconds since the Unix epoch
    pub start_ms: i64,
    /// Number of cases in the batch, when announced
    pub size: Option<usize>,
}

/// Reports the elapsed wall-clock time of its scope when dropped.
///
/// The clock is the system clock and may jump; use it for coarse
/// diagnostics only.
pub struct BatchTimer<W: Write = io::Stderr> {
    sample: TimerSample,
    reporter: Reporter<W>,
}

impl BatchTimer<io::Stderr> {
    /// Start timing without announcing anything
    pub fn start() -> Self {
        Self::on_stderr(None, true)
    }

    /// Start timing and announce a batch of `size` cases
    pub fn with_size(size: usize) -> Self {
        Self::on_stderr(Some(size), true)
    }

    /// Start timing on stderr.
    ///
    /// A failed write to stderr is ignored; there is nowhere left to report it.
    pub fn on_stderr(size: Option<usize>, color: bool) -> Self {
        Self::begin(io::stderr(), size, color).0
    }
}

impl<W: Write> BatchTimer<W> {
    /// Start timing, reporting to `sink`.
    ///
    /// Fails when the batch announcement cannot be written. The report line
    /// written on drop ignores errors.
    pub fn start_in(sink: W, size: Option<usize>, color: bool) -> io::Result<Self> {
        let (timer, announced) = Self::begin(sink, size, color);
        announced.map(|()| timer)
    }

    fn begin(sink: W, size: Option<usize>, color: bool) -> (Self, io::Result<()>) {
        let sample = TimerSample {
            start_ms: now_ms(),
            size,
        };
        let mut reporter = Reporter::new(sink, color);
        let announced = match size {
            Some(size) => reporter.emit(&Line::BatchStart(size)),
            None => Ok(()),
        };
        (Self { sample, reporter }, announced)
    }

    /// When and how the timer started
    pub fn sample(&self) -> TimerSample {
        self.sample
    }
}

impl<W: Write> Drop for BatchTimer<W> {
    fn drop(&mut self) {
        let _ = self.reporter.emit(&Line::BatchCost {
            start_ms: self.sample.start_ms,
            end_ms: now_ms(),
        });
    }
}

/// Current wall-clock time in milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
