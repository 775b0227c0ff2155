//! Link-time registration end to end.
//!
//! Built with `harness = false`: the tests below are declared with
//! `unit_test!` across several modules and picked up without any manifest.

use std::process::ExitCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use ut_harness::{record_failure, unit_test, Harness, HarnessConfig};

static CALLS: AtomicUsize = AtomicUsize::new(0);

unit_test!(A, one, {
    CALLS.fetch_add(1, Ordering::SeqCst);
});

unit_test!(A, two, {
    CALLS.fetch_add(1, Ordering::SeqCst);
});

mod failing {
    use super::*;

    unit_test!(B, one, {
        CALLS.fetch_add(1, Ordering::SeqCst);
        record_failure();
        record_failure();
    });
}

mod duplicate {
    use super::*;

    unit_test!(A, one, {
        CALLS.fetch_add(1, Ordering::SeqCst);
    });
}

fn run(harness: &Harness, matcher: Option<&str>) -> (usize, usize, String) {
    let mut output = Vec::new();
    let summary = harness
        .run_to(matcher, &mut output)
        .unwrap_or_else(|e| panic!("run failed: {}", e));
    let output = String::from_utf8(output).unwrap_or_default();
    (summary.executed, summary.failures, output)
}

fn main() -> ExitCode {
    let harness = Harness::from_registered().config(HarnessConfig::default().with_color(false));

    let names: Vec<String> = harness
        .registry()
        .iter()
        .map(|t| t.full_name())
        .collect();
    assert_eq!(names, vec!["A.one", "A.two", "B.one", "A.one"]);

    let (executed, failures, output) = run(&harness, Some("A."));
    assert_eq!((executed, failures), (3, 0));
    assert_eq!(CALLS.load(Ordering::SeqCst), 3);
    assert!(output.contains("[ PASS     ] ==== PASSED 3 tests"));
    assert!(!output.contains("Test B.one"));

    let (executed, failures, output) = run(&harness, None);
    assert_eq!((executed, failures), (4, 2));
    assert_eq!(CALLS.load(Ordering::SeqCst), 7);
    assert!(output.contains("[ NOPASS   ] ==== ERROR 2 tests"));

    let (executed, failures, _) = run(&harness, Some("zzz"));
    assert_eq!((executed, failures), (0, 2));
    assert_eq!(CALLS.load(Ordering::SeqCst), 7);

    eprintln!("self_registration: ok");
    ExitCode::SUCCESS
}
