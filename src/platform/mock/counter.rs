//! Mock counter implementation for testing
//!
//! Simulates a decrementing, wrapping hardware counter: every observation
//! (value read or status poll) advances simulated time by a configurable
//! number of ticks, wrapping from zero back to the reload value and
//! latching the expired flag, the way a real `STATUS` register would.

use core::cell::{Cell, RefCell};

use crate::platform::traits::{CounterInterface, CounterStatus};

/// Register mutations recorded by [`MockCounter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterOp {
    /// `RELOAD` written with the given period
    SetReload(u32),
    /// Count cleared to zero
    Reset,
    /// Counting started
    Enable,
    /// Counting stopped
    Disable,
    /// Per-period tick interrupt unmasked
    EnableTickInterrupt,
    /// Per-period tick interrupt masked
    DisableTickInterrupt,
}

/// Capacity of the recorded-operation log; later operations are dropped
const OP_LOG_SIZE: usize = 256;

/// Mock counter implementation
///
/// Observations only advance simulated time while the counter is enabled.
/// Value reads are not recorded (polling loops would flood the log); all
/// register mutations are.
#[derive(Debug)]
pub struct MockCounter {
    reload: u32,
    step: u32,
    enabled: bool,
    current: Cell<u32>,
    expired: Cell<bool>,
    total_ticks: Cell<u64>,
    ops: RefCell<heapless::Vec<CounterOp, OP_LOG_SIZE>>,
}

impl MockCounter {
    /// Create a mock counter that advances one tick per observation
    pub fn new() -> Self {
        Self::with_step(1)
    }

    /// Create a mock counter advancing `step` ticks per observation
    ///
    /// A large step keeps long simulated delays to a handful of polls.
    pub fn with_step(step: u32) -> Self {
        Self {
            reload: 0,
            step,
            enabled: false,
            current: Cell::new(0),
            expired: Cell::new(false),
            total_ticks: Cell::new(0),
            ops: RefCell::new(heapless::Vec::new()),
        }
    }

    /// Total simulated ticks elapsed while enabled
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks.get()
    }

    /// Snapshot of the recorded register mutations
    pub fn ops(&self) -> heapless::Vec<CounterOp, OP_LOG_SIZE> {
        self.ops.borrow().clone()
    }

    fn record(&self, op: CounterOp) {
        let _ = self.ops.borrow_mut().push(op);
    }

    /// Advance simulated time by `steps` counter ticks
    ///
    /// The register decrements through `reload, .., 1, 0, reload, ..`; the
    /// expired flag latches whenever zero is reached by counting down.
    fn advance_by(&self, steps: u32) {
        if !self.enabled || steps == 0 {
            return;
        }
        self.total_ticks.set(self.total_ticks.get() + u64::from(steps));

        let period = self.reload + 1;
        let current = self.current.get();
        // An empty counter reloads on the next tick instead of expiring.
        let until_zero = if current == 0 { period } else { current };
        if steps >= until_zero {
            self.expired.set(true);
        }
        let rem = steps % period;
        self.current.set((current + period - rem) % period);
    }
}

impl Default for MockCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterInterface for MockCounter {
    fn read(&self) -> u32 {
        self.advance_by(self.step);
        self.current.get()
    }

    fn set_reload(&mut self, ticks: u32) {
        self.reload = ticks;
        self.record(CounterOp::SetReload(ticks));
    }

    fn reload(&self) -> u32 {
        self.reload
    }

    fn reset(&mut self) {
        self.current.set(0);
        self.expired.set(false);
        self.record(CounterOp::Reset);
    }

    fn enable(&mut self) {
        self.enabled = true;
        self.record(CounterOp::Enable);
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.record(CounterOp::Disable);
    }

    fn status(&mut self) -> CounterStatus {
        self.advance_by(self.step);
        CounterStatus {
            enabled: self.enabled,
            expired: self.expired.replace(false),
        }
    }

    fn enable_tick_interrupt(&mut self) {
        self.record(CounterOp::EnableTickInterrupt);
    }

    fn disable_tick_interrupt(&mut self) {
        self.record(CounterOp::DisableTickInterrupt);
    }

    fn max_reload(&self) -> u32 {
        0x00FF_FFFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_decrements_while_enabled() {
        let mut counter = MockCounter::new();
        counter.set_reload(100);
        counter.reset();
        counter.enable();

        assert_eq!(counter.read(), 100); // empty counter reloads first
        assert_eq!(counter.read(), 99);
        assert_eq!(counter.read(), 98);
        assert_eq!(counter.total_ticks(), 3);
    }

    #[test]
    fn test_read_frozen_while_disabled() {
        let mut counter = MockCounter::new();
        counter.set_reload(100);
        counter.reset();

        assert_eq!(counter.read(), 0);
        assert_eq!(counter.read(), 0);
        assert_eq!(counter.total_ticks(), 0);
    }

    #[test]
    fn test_wrap_latches_expired_flag() {
        let mut counter = MockCounter::with_step(7);
        counter.set_reload(9);
        counter.reset();
        counter.enable();

        // 0 -> 3 (reload consumes one tick, then count down six)
        assert_eq!(counter.read(), 3);
        // 3 -> counts through zero and wraps
        assert_eq!(counter.read(), 6);

        let status = counter.status();
        assert!(status.expired);
        // the flag clears on read
        assert!(!counter.status().expired);
    }

    #[test]
    fn test_reset_clears_count_and_flag() {
        let mut counter = MockCounter::with_step(50);
        counter.set_reload(10);
        counter.reset();
        counter.enable();

        counter.read();
        counter.reset();
        assert_eq!(counter.current.get(), 0);
        assert!(!counter.expired.get());
    }

    #[test]
    fn test_records_register_mutations() {
        let mut counter = MockCounter::new();
        counter.set_reload(42);
        counter.reset();
        counter.enable();
        counter.disable();

        assert_eq!(
            counter.ops().as_slice(),
            &[
                CounterOp::SetReload(42),
                CounterOp::Reset,
                CounterOp::Enable,
                CounterOp::Disable,
            ]
        );
    }
}
