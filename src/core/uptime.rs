//! Millisecond uptime counter
//!
//! Cooperative mode advances this counter from the periodic tick handler,
//! giving the platform a cheap monotonic millisecond reference (the role a
//! vendor HAL tick counter plays on C stacks).

use core::sync::atomic::{AtomicU32, Ordering};

static UPTIME_MS: AtomicU32 = AtomicU32::new(0);

/// Current uptime in milliseconds
///
/// Wraps after roughly 49.7 days.
pub fn uptime_ms() -> u32 {
    UPTIME_MS.load(Ordering::Relaxed)
}

/// Advance the uptime counter
///
/// Called from the periodic tick handler with the tick period length in
/// milliseconds.
pub fn advance_ms(ms: u32) {
    UPTIME_MS.fetch_add(ms, Ordering::Relaxed);
}

/// Reset the uptime counter to zero
#[cfg(any(test, feature = "mock"))]
pub fn reset() {
    UPTIME_MS.store(0, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[serial_test::serial]
    fn test_uptime_advances() {
        reset();
        assert_eq!(uptime_ms(), 0);

        advance_ms(10);
        advance_ms(10);
        advance_ms(10);
        assert_eq!(uptime_ms(), 30);
    }

    #[test]
    #[serial_test::serial]
    fn test_uptime_wraps_without_panicking() {
        reset();
        advance_ms(u32::MAX);
        advance_ms(11);
        assert_eq!(uptime_ms(), 10);
    }
}
