//! Cooperative cancellation shared between a caller and running searches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// A flag that stops every search holding a clone of it.
///
/// Searches poll the flag at each node and unwind as soon as it is set.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Clears the flag so the token can be reused for another search.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Nodes between two clock reads.
pub const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Stop conditions for one search: the caller's token plus an optional
/// deadline. Hitting the deadline trips a per-search token so sibling
/// workers stop too, while the caller's token stays untouched.
#[derive(Debug, Clone)]
pub struct StopSignal {
    caller: CancelToken,
    timeout: CancelToken,
    deadline: Option<Instant>,
}

impl StopSignal {
    pub fn new(caller: CancelToken, deadline: Option<Instant>) -> Self {
        StopSignal {
            caller,
            timeout: CancelToken::new(),
            deadline,
        }
    }

    /// Reads the clock every [`CLOCK_CHECK_INTERVAL`] nodes.
    #[inline]
    pub fn poll(&self, nodes: u64) {
        if nodes % CLOCK_CHECK_INTERVAL == 0 {
            self.check_clock();
        }
    }

    pub fn check_clock(&self) {
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            self.timeout.cancel();
        }
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.caller.is_cancelled() || self.timeout.is_cancelled()
    }

    /// True once the deadline, not the caller, stopped the search.
    pub fn timed_out(&self) -> bool {
        self.timeout.is_cancelled()
    }
}
