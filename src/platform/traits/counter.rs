//! Hardware counter interface trait
//!
//! This module defines the free-running counter interface that platform
//! implementations must provide.

/// One atomic sample of the counter's control/status word
///
/// The expired flag typically clears on read, so both bits must come from a
/// single hardware access; polling loops consume them together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterStatus {
    /// Counter is currently counting
    pub enabled: bool,
    /// Counter has counted down to zero since the last status read
    pub expired: bool,
}

/// Free-running decrementing counter interface
///
/// The delay engine observes and programs its timing reference through this
/// trait. The counter decrements from the reload value to zero, then wraps
/// back to the reload value and keeps counting.
///
/// # Safety Invariants
///
/// - `read()` never returns a value greater than `reload()`
/// - The counter is a single shared timing resource without reentrancy
///   protection; callers serialize delay calls across interrupt/task contexts
pub trait CounterInterface {
    /// Read the current count (`VALUE` register)
    fn read(&self) -> u32;

    /// Program the counter period (`RELOAD` register)
    ///
    /// # Arguments
    ///
    /// * `ticks` - Period in counter ticks; must not exceed `max_reload()`
    fn set_reload(&mut self, ticks: u32);

    /// Get the programmed counter period (`RELOAD` register)
    fn reload(&self) -> u32;

    /// Reset the count to zero
    ///
    /// Writing the value register clears both the count and the expired flag.
    fn reset(&mut self);

    /// Start counting (`ENABLE` bit)
    fn enable(&mut self);

    /// Stop counting (`ENABLE` bit)
    fn disable(&mut self);

    /// Sample the enable/expired status bits (`STATUS` register)
    ///
    /// Reading the status clears the expired flag.
    fn status(&mut self) -> CounterStatus;

    /// Enable the per-period tick interrupt, if the platform has one
    ///
    /// Cooperative mode drives the scheduler tick from this interrupt; bare
    /// mode leaves it off. Platforms without a tick interrupt keep the
    /// default no-op.
    fn enable_tick_interrupt(&mut self) {}

    /// Disable the per-period tick interrupt
    fn disable_tick_interrupt(&mut self) {}

    /// Largest programmable reload value (counter width)
    fn max_reload(&self) -> u32;
}
