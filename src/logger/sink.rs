//! Diagnostic sinks receiving delivery failures.

use log::warn;

use crate::ingest::SendError;

/// `log` target of the failure reports emitted by [`LogSink`].
pub const DIAGNOSTIC_TARGET: &str = "mouseion";

/// Destination for delivery failures when error suppression is disabled.
pub trait ErrorSink: Send + Sync {
    /// Report one failed delivery.
    fn report(&self, error: &SendError);
}

impl<F> ErrorSink for F
where
    F: Fn(&SendError) + Send + Sync,
{
    fn report(&self, error: &SendError) {
        self(error)
    }
}

/// Sink forwarding failures to the `log` facade at `WARN` level on
/// [`DIAGNOSTIC_TARGET`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn report(&self, error: &SendError) {
        warn!(target: DIAGNOSTIC_TARGET, "mouseion log delivery failed: {error}");
    }
}
