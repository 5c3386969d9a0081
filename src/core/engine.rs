//! Mode-dispatching delay engine
//!
//! Composes the calibration, the elapsed accumulator and the scheduler
//! strategy into the public `delay_us`/`delay_ms` surface. The operating
//! mode is fixed at construction: bare-metal reprograms the counter per
//! call, cooperative mode leaves it free-running at the scheduler tick
//! period and may hand the coarse part of a wait to the scheduler.

use crate::core::accumulator::ElapsedAccumulator;
use crate::core::calibration::Calibration;
use crate::core::uptime;
use crate::platform::traits::{CounterInterface, NullScheduler, SchedulerInterface};
use crate::{log_debug, log_info, log_trace};

/// Operating mode selected at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Counter stopped between calls; each delay programs and arms it
    Bare,
    /// Counter free-running at one scheduler tick per period
    Cooperative,
}

/// Calibrated blocking-delay engine
///
/// # Contract
///
/// The hardware counter has no reentrancy protection: delay calls must not
/// be made concurrently from multiple interrupt/task contexts. Delay
/// magnitudes are bounded by the counter width; see [`max_delay_us`].
///
/// [`max_delay_us`]: DelayEngine::max_delay_us
pub struct DelayEngine<C: CounterInterface, S: SchedulerInterface = NullScheduler> {
    counter: C,
    scheduler: S,
    calibration: Calibration,
    mode: Mode,
}

impl<C: CounterInterface> DelayEngine<C, NullScheduler> {
    /// Create a bare-metal engine
    ///
    /// The counter is left stopped; every delay call programs and arms it.
    ///
    /// # Arguments
    ///
    /// * `counter` - The hardware counter capability
    /// * `clock_hz` - System clock frequency in Hz
    pub fn bare(counter: C, clock_hz: u32) -> Self {
        let mut engine = Self {
            counter,
            scheduler: NullScheduler,
            calibration: Calibration::bare(clock_hz),
            mode: Mode::Bare,
        };
        engine.apply_calibration();
        engine
    }
}

impl<C: CounterInterface, S: SchedulerInterface> DelayEngine<C, S> {
    /// Create a scheduler-cooperative engine
    ///
    /// Programs the counter with one scheduler tick period and starts it
    /// free-running, tick interrupt enabled. Coarse millisecond waits are
    /// handed to the scheduler; everything else busy-waits against the
    /// free-running count.
    ///
    /// # Arguments
    ///
    /// * `counter` - The hardware counter capability
    /// * `scheduler` - Adapter for the target scheduler
    /// * `clock_hz` - System clock frequency in Hz
    pub fn cooperative(counter: C, scheduler: S, clock_hz: u32) -> Self {
        let calibration = Calibration::cooperative(clock_hz, scheduler.tick_rate_hz());
        let mut engine = Self {
            counter,
            scheduler,
            calibration,
            mode: Mode::Cooperative,
        };
        engine.apply_calibration();
        engine
    }

    /// Re-derive the calibration for a new clock frequency
    ///
    /// Equal frequencies yield identical calibration constants.
    pub fn recalibrate(&mut self, clock_hz: u32) {
        log_debug!("recalibrating for {} Hz clock", clock_hz);
        self.calibration = match self.mode {
            Mode::Bare => Calibration::bare(clock_hz),
            Mode::Cooperative => {
                Calibration::cooperative(clock_hz, self.scheduler.tick_rate_hz())
            }
        };
        self.apply_calibration();
    }

    /// Current calibration constants
    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    /// Largest `delay_us` argument representable within the counter width
    pub fn max_delay_us(&self) -> u32 {
        self.calibration.max_delay_us(self.counter.max_reload())
    }

    /// Release the counter and scheduler capabilities
    pub fn free(self) -> (C, S) {
        (self.counter, self.scheduler)
    }

    /// Delay for `us` microseconds
    ///
    /// Busy-waits for the full duration; in cooperative mode the wait runs
    /// with scheduler preemption locked, blocking all other ready tasks for
    /// the interval.
    pub fn delay_us(&mut self, us: u32) {
        match self.mode {
            Mode::Bare => self.delay_us_bare(us),
            Mode::Cooperative => self.delay_us_cooperative(us),
        }
    }

    /// Delay for `ms` milliseconds (0 < ms <= 65535)
    ///
    /// In cooperative mode with a running scheduler outside interrupt
    /// context, whole scheduler ticks are delegated to the scheduler's timed
    /// suspend and only the sub-tick remainder is busy-waited. Everywhere
    /// else the whole duration busy-waits.
    pub fn delay_ms(&mut self, ms: u16) {
        match self.mode {
            Mode::Bare => self.delay_ms_bare(ms),
            Mode::Cooperative => self.delay_ms_cooperative(ms),
        }
    }

    /// Periodic tick callback (cooperative mode)
    ///
    /// Call once per counter period from the platform tick handler:
    /// advances the scheduler's tick count and the millisecond uptime
    /// counter.
    pub fn on_tick(&mut self) {
        if self.scheduler.is_running() {
            self.scheduler.advance_tick();
        }
        uptime::advance_ms(self.calibration.ms_per_tick());
    }

    /// Program the counter for the selected mode
    fn apply_calibration(&mut self) {
        self.counter.disable();
        self.counter.disable_tick_interrupt();
        match self.mode {
            Mode::Bare => {
                self.counter.reset();
            }
            Mode::Cooperative => {
                self.counter.set_reload(self.calibration.ticks_per_tick());
                self.counter.reset();
                self.counter.enable_tick_interrupt();
                self.counter.enable();
            }
        }
        log_info!(
            "delay engine calibrated: {} ticks/us, {} ms/tick",
            self.calibration.ticks_per_us(),
            self.calibration.ms_per_tick()
        );
    }

    /// Bare-metal microsecond delay: arm the counter for one full period
    fn delay_us_bare(&mut self, us: u32) {
        debug_assert!(us <= self.max_delay_us(), "delay exceeds counter width");
        let ticks = us * self.calibration.ticks_per_us();
        if ticks == 0 {
            // a zero reload would never raise the expired flag
            return;
        }
        self.counter.set_reload(ticks);
        self.counter.reset();
        self.counter.enable();
        loop {
            let status = self.counter.status();
            if !status.enabled || status.expired {
                break;
            }
        }
        self.counter.disable();
        self.counter.reset();
    }

    /// Cooperative microsecond delay: accumulate elapsed ticks against the
    /// free-running counter, preemption locked
    fn delay_us_cooperative(&mut self, us: u32) {
        let ticks = us * self.calibration.ticks_per_us();
        if ticks == 0 {
            return;
        }
        self.scheduler.lock();
        let mut elapsed = ElapsedAccumulator::new(self.counter.reload(), self.counter.read());
        while elapsed.total() < ticks {
            elapsed.observe(self.counter.read());
        }
        self.scheduler.unlock();
    }

    /// Bare-metal millisecond delay, chunked so each programmed period
    /// stays within the counter width
    fn delay_ms_bare(&mut self, ms: u16) {
        let mut repeat = ms / 1000;
        let remain = ms % 1000;
        while repeat > 0 {
            self.delay_us_bare(1_000_000);
            repeat -= 1;
        }
        if remain > 0 {
            self.delay_us_bare(u32::from(remain) * 1000);
        }
    }

    /// Cooperative millisecond delay: coarse wait on the scheduler, fine
    /// remainder busy-waited
    fn delay_ms_cooperative(&mut self, ms: u16) {
        let mut remaining = u32::from(ms);
        // timed_delay is meaningless before the scheduler starts and unsafe
        // inside an interrupt; both fall through to the pure busy-wait
        if self.scheduler.is_running() && self.scheduler.interrupt_nesting_depth() == 0 {
            let ms_per_tick = self.calibration.ms_per_tick();
            let whole = remaining / ms_per_tick;
            if whole > 0 {
                log_trace!("coarse wait: {} scheduler ticks", whole);
                self.scheduler.timed_delay(whole);
            }
            remaining %= ms_per_tick;
        }
        self.delay_us_cooperative(remaining * 1000);
    }
}

impl<C: CounterInterface, S: SchedulerInterface> embedded_hal::blocking::delay::DelayUs<u32>
    for DelayEngine<C, S>
{
    fn delay_us(&mut self, us: u32) {
        DelayEngine::delay_us(self, us);
    }
}

impl<C: CounterInterface, S: SchedulerInterface> embedded_hal::blocking::delay::DelayUs<u16>
    for DelayEngine<C, S>
{
    fn delay_us(&mut self, us: u16) {
        DelayEngine::delay_us(self, u32::from(us));
    }
}

impl<C: CounterInterface, S: SchedulerInterface> embedded_hal::blocking::delay::DelayMs<u16>
    for DelayEngine<C, S>
{
    fn delay_ms(&mut self, ms: u16) {
        DelayEngine::delay_ms(self, ms);
    }
}

impl<C: CounterInterface, S: SchedulerInterface> embedded_hal::blocking::delay::DelayMs<u8>
    for DelayEngine<C, S>
{
    fn delay_ms(&mut self, ms: u8) {
        DelayEngine::delay_ms(self, u16::from(ms));
    }
}
