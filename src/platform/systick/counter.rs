//! SysTick implementation of the counter interface
//!
//! This module wraps the Cortex-M `SYST` peripheral as the delay engine's
//! timing reference. The counter is clocked from the external reference
//! (core clock / 8), matching the calibration prescaler, so the 24-bit
//! register still spans a useful period at high core clocks.

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;

use crate::platform::traits::{CounterInterface, CounterStatus};

/// Largest SysTick reload value (24-bit register)
pub const SYST_MAX_RELOAD: u32 = 0x00FF_FFFF;

const CSR_ENABLE: u32 = 1 << 0;
const CSR_COUNTFLAG: u32 = 1 << 16;

/// SysTick-backed free-running counter
///
/// # Note
///
/// Taking the counter claims SysTick for the delay engine; nothing else in
/// the firmware may reprogram it while this value is alive.
pub struct SysTickCounter {
    syst: SYST,
}

impl SysTickCounter {
    /// Take ownership of the SysTick peripheral
    ///
    /// Stops the counter, masks its interrupt, and selects the external
    /// clock source (core clock / 8). The delay engine programs everything
    /// else at construction.
    pub fn new(mut syst: SYST) -> Self {
        syst.disable_counter();
        syst.disable_interrupt();
        syst.set_clock_source(SystClkSource::External);
        Self { syst }
    }

    /// Release the SysTick peripheral
    pub fn free(self) -> SYST {
        self.syst
    }
}

impl CounterInterface for SysTickCounter {
    fn read(&self) -> u32 {
        SYST::get_current()
    }

    fn set_reload(&mut self, ticks: u32) {
        self.syst.set_reload(ticks);
    }

    fn reload(&self) -> u32 {
        SYST::get_reload()
    }

    fn reset(&mut self) {
        self.syst.clear_current();
    }

    fn enable(&mut self) {
        self.syst.enable_counter();
    }

    fn disable(&mut self) {
        self.syst.disable_counter();
    }

    fn status(&mut self) -> CounterStatus {
        // COUNTFLAG clears on any CSR read, so both bits must come from the
        // same sample.
        let csr = self.syst.csr.read();
        CounterStatus {
            enabled: csr & CSR_ENABLE != 0,
            expired: csr & CSR_COUNTFLAG != 0,
        }
    }

    fn enable_tick_interrupt(&mut self) {
        self.syst.enable_interrupt();
    }

    fn disable_tick_interrupt(&mut self) {
        self.syst.disable_interrupt();
    }

    fn max_reload(&self) -> u32 {
        SYST_MAX_RELOAD
    }
}
