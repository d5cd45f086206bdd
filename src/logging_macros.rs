//! Call-site macros for the logger's entry points.
//!
//! Each macro builds the `&[&dyn LogArg]` slice from its arguments so that
//! every argument expression is evaluated exactly once.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mouseion::{Logger, mouseion_print, mouseion_printf};
//!
//! let logger = Logger::new("https://logs.example.com").unwrap();
//! mouseion_print!(logger, "request took ", 42, "ms");
//! mouseion_printf!(logger, "user {} logged in from {}", "alice", "10.0.0.1");
//! ```

/// Send the concatenated arguments via [`Logger::print`](crate::Logger::print).
#[macro_export]
macro_rules! mouseion_print {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.print(&[$(&$arg as &dyn $crate::LogArg),*])
    };
}

/// Send the concatenated arguments via [`Logger::println`](crate::Logger::println).
#[macro_export]
macro_rules! mouseion_println {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.println(&[$(&$arg as &dyn $crate::LogArg),*])
    };
}

/// Send a formatted message via [`Logger::printf`](crate::Logger::printf).
///
/// The format string is interpreted at run time; see
/// [`format_printf`](crate::format::format_printf).
#[macro_export]
macro_rules! mouseion_printf {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $logger.printf($format, &[$(&$arg as &dyn $crate::LogArg),*])
    };
}
