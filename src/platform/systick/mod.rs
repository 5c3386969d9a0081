//! Cortex-M SysTick platform implementation

pub mod counter;

pub use counter::{SysTickCounter, SYST_MAX_RELOAD};
