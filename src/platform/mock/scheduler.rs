//! Mock scheduler implementation for testing
//!
//! Records every call crossing the scheduler boundary so tests can assert
//! exactly how a delay was dispatched.

use core::cell::{Cell, RefCell};

use crate::platform::traits::SchedulerInterface;

/// Calls recorded by [`MockScheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerCall {
    /// Preemption disabled
    Lock,
    /// Preemption re-enabled
    Unlock,
    /// Task suspended for the given number of scheduler ticks
    TimedDelay(u32),
    /// Tick count advanced by one
    AdvanceTick,
}

/// Capacity of the recorded-call log
const CALL_LOG_SIZE: usize = 32;

/// Mock scheduler implementation
///
/// Starts out running with no interrupt nesting; tests flip both through
/// the setters to exercise the fallback paths.
#[derive(Debug)]
pub struct MockScheduler {
    running: Cell<bool>,
    nesting: Cell<u32>,
    tick_rate_hz: u32,
    calls: RefCell<heapless::Vec<SchedulerCall, CALL_LOG_SIZE>>,
}

impl MockScheduler {
    /// Create a running mock scheduler with the given tick rate
    pub fn new(tick_rate_hz: u32) -> Self {
        Self {
            running: Cell::new(true),
            nesting: Cell::new(0),
            tick_rate_hz,
            calls: RefCell::new(heapless::Vec::new()),
        }
    }

    /// Set whether the scheduler reports itself as started
    pub fn set_running(&self, running: bool) {
        self.running.set(running);
    }

    /// Set the reported interrupt nesting depth
    pub fn set_interrupt_nesting(&self, depth: u32) {
        self.nesting.set(depth);
    }

    /// Snapshot of the recorded calls
    pub fn calls(&self) -> heapless::Vec<SchedulerCall, CALL_LOG_SIZE> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: SchedulerCall) {
        let _ = self.calls.borrow_mut().push(call);
    }
}

impl SchedulerInterface for MockScheduler {
    fn is_running(&self) -> bool {
        self.running.get()
    }

    fn interrupt_nesting_depth(&self) -> u32 {
        self.nesting.get()
    }

    fn tick_rate_hz(&self) -> u32 {
        self.tick_rate_hz
    }

    fn lock(&self) {
        self.record(SchedulerCall::Lock);
    }

    fn unlock(&self) {
        self.record(SchedulerCall::Unlock);
    }

    fn timed_delay(&self, ticks: u32) {
        self.record(SchedulerCall::TimedDelay(ticks));
    }

    fn advance_tick(&self) {
        self.record(SchedulerCall::AdvanceTick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_in_order() {
        let scheduler = MockScheduler::new(100);
        scheduler.timed_delay(250);
        scheduler.lock();
        scheduler.unlock();

        assert_eq!(
            scheduler.calls().as_slice(),
            &[
                SchedulerCall::TimedDelay(250),
                SchedulerCall::Lock,
                SchedulerCall::Unlock,
            ]
        );
    }

    #[test]
    fn test_state_setters() {
        let scheduler = MockScheduler::new(1000);
        assert!(scheduler.is_running());
        assert_eq!(scheduler.interrupt_nesting_depth(), 0);
        assert_eq!(scheduler.tick_rate_hz(), 1000);

        scheduler.set_running(false);
        scheduler.set_interrupt_nesting(2);
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.interrupt_nesting_depth(), 2);
    }
}
