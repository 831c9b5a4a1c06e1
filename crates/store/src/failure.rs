//! Pluggable failure injection.
//!
//! The simulated backend never fails on its own. Every operation asks the
//! configured injector once, after the artificial delay, so tests can force
//! the error path deterministically instead of racing timers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Decides whether the next operation should fail.
pub trait FailureInjector: Send + Sync {
    /// Returns true if the operation consulting the injector must fail.
    fn should_fail(&self) -> bool;
}

impl<F> FailureInjector for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn should_fail(&self) -> bool {
        self()
    }
}

/// Injector that never fails. The production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFailure;

impl FailureInjector for NoFailure {
    fn should_fail(&self) -> bool {
        false
    }
}

/// Shared on/off toggle for forcing failures from a test.
///
/// Clones share the same switch, so a test keeps one handle and hands the
/// other to the store.
#[derive(Debug, Clone, Default)]
pub struct FailureSwitch {
    armed: Arc<AtomicBool>,
}

impl FailureSwitch {
    /// Creates a disarmed switch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms or disarms the switch for subsequent operations.
    pub fn set_failing(&self, failing: bool) {
        self.armed.store(failing, Ordering::SeqCst);
    }

    /// Returns true if the switch is currently armed.
    pub fn is_failing(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }
}

impl FailureInjector for FailureSwitch {
    fn should_fail(&self) -> bool {
        self.is_failing()
    }
}
