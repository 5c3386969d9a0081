//! Logging abstraction
//!
//! Provides unified logging macros that work across different targets:
//! - Embedded (`systick` feature): Uses defmt
//! - Host tests: Uses println!
//! - Host non-test: No-op
//!
//! Nothing logs inside a polling loop; formatting there would skew the very
//! measurement the loop exists for.

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "systick")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "systick"), test))]
        println!("[INFO] {}", format!($($arg)*));
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "systick")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "systick"), test))]
        println!("[DEBUG] {}", format!($($arg)*));
    }};
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "systick")]
        ::defmt::trace!($($arg)*);

        #[cfg(all(not(feature = "systick"), test))]
        println!("[TRACE] {}", format!($($arg)*));
    }};
}
