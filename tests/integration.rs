#![cfg(feature = "mock")] // Host-side scenarios against the mock platform

//! Engine-level integration scenarios
//!
//! Exercises the public delay surface end to end: construction, mixed
//! delay dispatch, the periodic tick callback and the embedded-hal trait
//! impls, all against the mock counter and scheduler.

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use tick_delay::core::engine::DelayEngine;
use tick_delay::core::uptime;
use tick_delay::platform::mock::{MockCounter, MockScheduler, SchedulerCall};

/// 72 MHz clock / 8 prescaler = 9 counter ticks per microsecond
const CLOCK_HZ: u32 = 72_000_000;

#[test]
fn bare_engine_runs_mixed_delays() {
    let mut engine = DelayEngine::bare(MockCounter::with_step(1_000_000), CLOCK_HZ);
    assert_eq!(engine.calibration().ticks_per_us(), 9);
    assert_eq!(engine.max_delay_us(), 1_864_135);

    engine.delay_us(150);
    engine.delay_ms(3);
    engine.delay_ms(1500);

    let (counter, _) = engine.free();
    // 150 us + 3 ms + 1.5 s of simulated time, at 9 ticks/us
    assert!(counter.total_ticks() >= 9 * (150 + 3_000 + 1_500_000));
}

#[test]
fn cooperative_session_dispatches_coarse_and_fine() {
    let counter = MockCounter::with_step(5_000);
    let scheduler = MockScheduler::new(100); // 10 ms ticks
    let mut engine = DelayEngine::cooperative(counter, scheduler, CLOCK_HZ);

    engine.delay_ms(2500); // tick-exact: scheduler only
    engine.delay_ms(7); // sub-tick: locked busy-wait only
    engine.delay_ms(37); // mixed: 3 ticks + 7 ms remainder

    let (_, scheduler) = engine.free();
    assert_eq!(
        scheduler.calls().as_slice(),
        &[
            SchedulerCall::TimedDelay(250),
            SchedulerCall::Lock,
            SchedulerCall::Unlock,
            SchedulerCall::TimedDelay(3),
            SchedulerCall::Lock,
            SchedulerCall::Unlock,
        ]
    );
}

#[test]
#[serial_test::serial]
fn tick_callback_drives_scheduler_and_uptime() {
    uptime::reset();
    let counter = MockCounter::new();
    let scheduler = MockScheduler::new(100);
    let mut engine = DelayEngine::cooperative(counter, scheduler, CLOCK_HZ);

    for _ in 0..50 {
        engine.on_tick();
    }

    let (_, scheduler) = engine.free();
    let ticks = scheduler
        .calls()
        .iter()
        .filter(|call| **call == SchedulerCall::AdvanceTick)
        .count();
    // the mock call log saturates at its capacity; the uptime counter does not
    assert_eq!(ticks, scheduler.calls().len());
    assert_eq!(uptime::uptime_ms(), 500);
}

#[test]
fn engine_drops_into_embedded_hal_drivers() {
    fn driver_reset_pulse<D: DelayUs<u32> + DelayMs<u16>>(delay: &mut D) {
        delay.delay_us(10_u32);
        delay.delay_ms(5_u16);
    }

    let mut engine = DelayEngine::bare(MockCounter::with_step(50_000), CLOCK_HZ);
    driver_reset_pulse(&mut engine);

    let (counter, _) = engine.free();
    assert!(counter.total_ticks() >= 9 * (10 + 5_000));
}
