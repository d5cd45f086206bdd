//! Compatibility bridge for the Rust `log` crate.
//!
//! This module provides `MouseionLogAdapter`, an implementation of
//! `log::Log` that forwards records emitted through the `log` macros to a
//! [`Logger`]. Each record becomes one entry whose text is the formatted
//! message and whose tags are derived from that message as the single
//! argument.
//!
//! Delivery itself logs through the same facade (the HTTP stack and the
//! default error sink both do), so records emitted on a thread that is
//! already delivering are never forwarded recursively. The HTTP stack's
//! chatter is dropped; failure reports on [`DIAGNOSTIC_TARGET`] go to
//! stderr so a failed bridged delivery is still visible.

use std::cell::Cell;

use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::logger::{DIAGNOSTIC_TARGET, Logger};

thread_local! {
    static DELIVERING: Cell<bool> = const { Cell::new(false) };
}

/// Run `f` unless this thread is already inside it.
fn with_reentrancy_guard(f: impl FnOnce()) -> bool {
    if DELIVERING.with(Cell::get) {
        return false;
    }
    DELIVERING.with(|flag| flag.set(true));
    struct Reset;
    impl Drop for Reset {
        fn drop(&mut self) {
            DELIVERING.with(|flag| flag.set(false));
        }
    }
    let _reset = Reset;
    f();
    true
}

/// Adapter implementing the Rust `log::Log` trait.
#[derive(Debug)]
pub struct MouseionLogAdapter {
    logger: Logger,
}

impl MouseionLogAdapter {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Deliver `message`, or hand it to `divert` when it is a failure report
    /// raised by a delivery already running on this thread.
    fn forward(&self, target: &str, message: &str, divert: impl FnOnce(&str)) {
        let delivered = with_reentrancy_guard(|| self.logger.print(&[&message]));
        if !delivered && target == DIAGNOSTIC_TARGET {
            divert(message);
        }
    }
}

fn is_enabled_by_global_max(level: log::Level) -> bool {
    log::max_level() >= level.to_level_filter()
}

impl log::Log for MouseionLogAdapter {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        is_enabled_by_global_max(metadata.level())
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        self.forward(record.target(), &message, |line| eprintln!("{line}"));
    }

    fn flush(&self) {}
}

/// Install `logger` as the global Rust logger with `max_level`.
///
/// With the default [`LogSink`](crate::LogSink), failed deliveries of
/// bridged records are written to stderr, since the global logger is the
/// one failing. Supply a custom [`ErrorSink`](crate::ErrorSink) to route
/// them elsewhere.
///
/// # Errors
///
/// Returns [`SetLoggerError`] when a global logger is already set.
pub fn install_global_logger(logger: Logger, max_level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(MouseionLogAdapter::new(logger)))?;
    log::set_max_level(max_level);
    Ok(())
}
