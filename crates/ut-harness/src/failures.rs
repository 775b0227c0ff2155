//! Failure counter - shared tally of failure signals raised by tests
//!
//! Assertion helpers live outside the harness. They report by calling
//! [`record_failure`] (which targets the run in progress, including from
//! threads a test spawns) or by holding the harness's [`FailureCounter`]
//! directly.

use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Monotonic failure tally. Never reset.
#[derive(Debug, Default)]
pub struct FailureCounter {
    count: AtomicUsize,
}

impl FailureCounter {
    /// Create a counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one failure
    pub fn record(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    /// Failures recorded so far
    pub fn get(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

thread_local! {
    static ACTIVE: RefCell<Option<Arc<FailureCounter>>> = const { RefCell::new(None) };
}

/// Counter of the most recent run, seen by threads a test spawns
static PROCESS_ACTIVE: RwLock<Option<Arc<FailureCounter>>> = RwLock::new(None);

/// Record a failure against the run in progress.
///
/// The runner thread's own run wins; other threads (helpers spawned by a
/// test) report to the most recently started run in the process. Returns
/// `false` (and records nothing) when no run is active.
pub fn record_failure() -> bool {
    match active_counter() {
        Some(counter) => {
            counter.record();
            true
        }
        None => false,
    }
}

/// Counter of the run in progress, if any
pub fn active_counter() -> Option<Arc<FailureCounter>> {
    ACTIVE
        .with(|active| active.borrow().clone())
        .or_else(|| {
            PROCESS_ACTIVE
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        })
}

/// Installs a counter as the active one until dropped.
///
/// Restores whatever was active before, also when a test unwinds. The
/// process-wide slot is only restored while it still holds this run's
/// counter.
pub(crate) struct ActiveRun {
    counter: Arc<FailureCounter>,
    previous_local: Option<Arc<FailureCounter>>,
    previous_process: Option<Arc<FailureCounter>>,
}

impl ActiveRun {
    pub(crate) fn enter(counter: Arc<FailureCounter>) -> Self {
        let previous_local =
            ACTIVE.with(|active| active.borrow_mut().replace(Arc::clone(&counter)));
        let previous_process = PROCESS_ACTIVE
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(Arc::clone(&counter));
        Self {
            counter,
            previous_local,
            previous_process,
        }
    }
}

impl Drop for ActiveRun {
    fn drop(&mut self) {
        let previous = self.previous_local.take();
        ACTIVE.with(|active| *active.borrow_mut() = previous);

        let mut slot = PROCESS_ACTIVE
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if slot
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &self.counter))
        {
            *slot = self.previous_process.take();
        }
    }
}
