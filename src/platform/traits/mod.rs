//! Platform abstraction traits
//!
//! This module defines the capabilities platform implementations must provide.

pub mod counter;
pub mod scheduler;

// Re-export trait interfaces
pub use counter::{CounterInterface, CounterStatus};
pub use scheduler::{NullScheduler, SchedulerInterface};
