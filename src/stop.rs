//! Cooperative stop signal for `no_std` environments.
//!
//! A single flag guarded by `critical-section`, safe to raise from an
//! interrupt handler or another thread while a routine is running. Routines
//! check it at every sleep boundary and at the top of every iteration.

use core::cell::Cell;

use critical_section::Mutex;

/// Request to abandon the running routine and stop the scheduler
pub struct StopSignal {
    raised: Mutex<Cell<bool>>,
}

impl StopSignal {
    /// Create a lowered signal.
    pub const fn new() -> Self {
        Self {
            raised: Mutex::new(Cell::new(false)),
        }
    }

    /// Ask the running routine to stop at its next check.
    pub fn raise(&self) {
        critical_section::with(|cs| self.raised.borrow(cs).set(true));
    }

    /// Lower the signal so the scheduler can be started again.
    pub fn reset(&self) {
        critical_section::with(|cs| self.raised.borrow(cs).set(false));
    }

    pub fn is_raised(&self) -> bool {
        critical_section::with(|cs| self.raised.borrow(cs).get())
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}
