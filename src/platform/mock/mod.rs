//! Mock platform implementations for testing

pub mod counter;
pub mod scheduler;

pub use counter::{CounterOp, MockCounter};
pub use scheduler::{MockScheduler, SchedulerCall};
