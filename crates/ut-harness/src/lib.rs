//! Minimal unit-test registration and execution harness
//!
//! Tests register into a [`Harness`], either explicitly with
//! [`Harness::register`] or from anywhere in the binary with [`unit_test!`].
//! The runner executes them sequentially, optionally filtered by a substring
//! of `"<suite>.<name>"`, and prints a pass/failure summary. [`BatchTimer`]
//! reports the wall-clock cost of a scoped batch of cases.
//!
//! ```no_run
//! use ut_harness::{record_failure, unit_test};
//!
//! unit_test!(Math, addition, {
//!     if 2 + 2 != 4 {
//!         record_failure();
//!     }
//! });
//!
//! fn main() -> std::process::ExitCode {
//!     ut_harness::run_registered()
//! }
//! ```

pub mod error;
pub mod failures;
pub mod fixtures;
pub mod harness;
pub mod registry;
pub mod reporter;
pub mod runner;
pub mod timer;

pub use error::{HarnessError, HarnessResult};
pub use failures::{record_failure, FailureCounter};
pub use fixtures::{random_seed, tmp_dir};
pub use harness::{exit_code, run_registered, Harness};
pub use registry::{Registry, StaticTest, TestDescriptor};
pub use runner::{RunSummary, TestRunner};
pub use timer::BatchTimer;
pub use ut_config::{ExitPolicy, HarnessConfig};

#[doc(hidden)]
pub use inventory;

/// Declare a test that the harness picks up at link time.
///
/// `unit_test!(Suite, name, { body })` may appear in any module of any crate
/// linked into the binary. [`Harness::from_registered`] and
/// [`run_registered`] see every declaration.
#[macro_export]
macro_rules! unit_test {
    ($suite:ident, $name:ident, $body:block) => {
        const _: () = {
            fn entry() $body

            $crate::inventory::submit! {
                $crate::registry::StaticTest::new(
                    stringify!($suite),
                    stringify!($name),
                    entry,
                    file!(),
                    line!(),
                )
            }
        };
    };
}

/// Define `main` for a `harness = false` target: run every declared test.
#[macro_export]
macro_rules! harness_main {
    () => {
        fn main() -> ::std::process::ExitCode {
            $crate::run_registered()
        }
    };
}
