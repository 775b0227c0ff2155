//! Test reporter - diagnostic lines for runs and timers

use colored::*;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Serializes the global color override around colored rendering
static FORCE_COLOR: Mutex<()> = Mutex::new(());

/// A single diagnostic line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// A test is about to run
    Run { suite: &'a str, name: &'a str },
    /// A contained test panicked
    Panicked {
        suite: &'a str,
        name: &'a str,
        message: &'a str,
    },
    /// Number of tests executed
    Passed(usize),
    /// Failure counter at the end of a run
    Errors(usize),
    /// A timed batch of `size` cases is starting
    BatchStart(usize),
    /// A timed batch finished
    BatchCost { start_ms: i64, end_ms: i64 },
}

impl Line<'_> {
    /// Render the line, with ANSI colors when `color` is set
    pub fn render(&self, color: bool) -> String {
        let text = match self {
            Line::Run { suite, name } => format!("[ RUN      ] ==== Test {}.{}", suite, name),
            Line::Panicked {
                suite,
                name,
                message,
            } => format!(
                "[ PANIC    ] ==== Test {}.{} panicked: {}",
                suite, name, message
            ),
            Line::Passed(count) => format!("[ PASS     ] ==== PASSED {} tests", count),
            Line::Errors(count) => format!("[ NOPASS   ] ==== ERROR {} tests", count),
            Line::BatchStart(size) => format!("[ RUN      ] ==== start to run {} cases.", size),
            Line::BatchCost { start_ms, end_ms } => format!(
                "[ RUN      ] ==== start at {}, stop at {}, cost:[{}]",
                start_ms,
                end_ms,
                end_ms - start_ms
            ),
        };

        if !color {
            return text;
        }

        match self {
            Line::Panicked { .. } | Line::Errors(_) => paint(&text, Color::Red),
            _ => paint(&text, Color::Green),
        }
    }
}

/// Wrap `text` in ANSI color escapes regardless of where it will be written
pub(crate) fn paint(text: &str, color: Color) -> String {
    // colored only checks stdout; lines go to stderr or arbitrary sinks
    let _guard = FORCE_COLOR.lock().unwrap_or_else(PoisonError::into_inner);
    colored::control::set_override(true);
    let painted = text.color(color).to_string();
    colored::control::unset_override();
    painted
}

/// Writes diagnostic lines to a sink
pub struct Reporter<W: Write> {
    sink: W,
    /// Colorize output
    color: bool,
}

impl Reporter<io::Stderr> {
    /// Reporter on the process's error stream
    pub fn stderr(color: bool) -> Self {
        Self::new(io::stderr(), color)
    }
}

impl<W: Write> Reporter<W> {
    /// Create a reporter writing to `sink`
    pub fn new(sink: W, color: bool) -> Self {
        Self { sink, color }
    }

    /// Emit one line
    pub fn emit(&mut self, line: &Line<'_>) -> io::Result<()> {
        writeln!(self.sink, "{}", line.render(self.color))?;
        self.sink.flush()
    }

    /// Emit the end-of-run summary, closed by an empty line
    pub fn summary(&mut self, executed: usize, failures: usize) -> io::Result<()> {
        self.emit(&Line::Passed(executed))?;
        self.emit(&Line::Errors(failures))?;
        writeln!(self.sink)?;
        self.sink.flush()
    }

    /// Give back the sink
    pub fn into_inner(self) -> W {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Line::Run { suite: "A", name: "one" }, "[ RUN      ] ==== Test A.one")]
    #[case(Line::Passed(3), "[ PASS     ] ==== PASSED 3 tests")]
    #[case(Line::Errors(0), "[ NOPASS   ] ==== ERROR 0 tests")]
    #[case(Line::BatchStart(1000), "[ RUN      ] ==== start to run 1000 cases.")]
    #[case(
        Line::BatchCost { start_ms: 1000, end_ms: 1250 },
        "[ RUN      ] ==== start at 1000, stop at 1250, cost:[250]"
    )]
    #[case(
        Line::Panicked { suite: "A", name: "one", message: "boom" },
        "[ PANIC    ] ==== Test A.one panicked: boom"
    )]
    fn test_render_plain(#[case] line: Line<'_>, #[case] expected: &str) {
        assert_eq!(line.render(false), expected);
    }

    #[test]
    fn test_render_colored_keeps_text() {
        let rendered = Line::Errors(2).render(true);

        assert!(rendered.contains("[ NOPASS   ] ==== ERROR 2 tests"));
        assert!(rendered.starts_with("\u{1b}[31m"));
    }

    #[test]
    fn test_color_does_not_depend_on_terminal() {
        let mut reporter = Reporter::new(Vec::new(), true);
        reporter
            .emit(&Line::Run {
                suite: "A",
                name: "one",
            })
            .unwrap();
        reporter.summary(1, 0).unwrap();

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("\u{1b}[32m[ RUN      ] ==== Test A.one"));
        assert!(lines[1].starts_with("\u{1b}[32m[ PASS     ]"));
        assert!(lines[2].starts_with("\u{1b}[31m[ NOPASS   ]"));
        assert!(lines[0].ends_with("\u{1b}[0m"));
    }

    #[test]
    fn test_summary_output() {
        let mut reporter = Reporter::new(Vec::new(), false);
        reporter.summary(2, 1).unwrap();

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            output,
            "[ PASS     ] ==== PASSED 2 tests\n[ NOPASS   ] ==== ERROR 1 tests\n\n"
        );
    }

    #[test]
    fn test_emit_writes_one_line() {
        let mut reporter = Reporter::new(Vec::new(), false);
        reporter
            .emit(&Line::Run {
                suite: "Suite",
                name: "case",
            })
            .unwrap();

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(output, "[ RUN      ] ==== Test Suite.case\n");
    }
}
