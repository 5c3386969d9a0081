//! Core delay engine
//!
//! This module contains the delay engine proper: clock calibration,
//! wraparound-safe elapsed-tick accounting, the mode-dispatching engine and
//! the millisecond uptime counter.

pub mod accumulator;
pub mod calibration;
pub mod engine;
pub mod logging;
pub mod uptime;
