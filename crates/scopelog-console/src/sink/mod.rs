//! Output sinks.
//!
//! An [`OutputSink`] performs the actual emission. The logger facade only
//! decides whether to call it and with which arguments. The utility methods
//! (`group`, `count`, `time`, ...) are forwarded by the facade without any
//! level check.
//!
//! - [`ConsoleSink`]: styled lines to stderr or any writer
//! - [`TracingSink`]: events on the `tracing` dispatcher
//! - [`RecordingSink`](crate::testing::RecordingSink): captures calls for tests

mod console;
mod tallies;
mod tracing_adapter;

pub use self::console::ConsoleSink;
pub use self::tallies::Tallies;
pub use self::tracing_adapter::TracingSink;

use serde_json::Value;

/// Console-style output capability.
pub trait OutputSink: Send + Sync {
    /// Plain output.
    fn log(&self, args: &[Value]);

    /// Debug output.
    fn debug(&self, args: &[Value]);

    /// Informational output.
    fn info(&self, args: &[Value]);

    /// Warning output.
    fn warn(&self, args: &[Value]);

    /// Error output.
    fn error(&self, args: &[Value]);

    /// Opens a group; following output is nested until [`group_end`](Self::group_end).
    fn group(&self, label: &[Value]);

    /// Opens a collapsed group. Sinks without folding treat it as [`group`](Self::group).
    fn group_collapsed(&self, label: &[Value]) {
        self.group(label);
    }

    /// Closes the innermost group.
    fn group_end(&self);

    /// Output with a stack trace where available.
    fn trace(&self, args: &[Value]);

    /// Outputs `args` as an assertion failure when `condition` is false.
    fn assert(&self, condition: bool, args: &[Value]);

    /// Increments and prints the counter for `label`.
    fn count(&self, label: &str);

    /// Resets the counter for `label`.
    fn count_reset(&self, label: &str);

    /// Tabular display of an array or object.
    fn table(&self, data: &Value);

    /// Structured display of one value.
    fn dir(&self, value: &Value);

    /// Markup-tree display; defaults to [`dir`](Self::dir).
    fn dirxml(&self, value: &Value) {
        self.dir(value);
    }

    /// Starts a named profile.
    fn profile(&self, label: &str);

    /// Ends a named profile.
    fn profile_end(&self, label: &str);

    /// Starts a named timer.
    fn time(&self, label: &str);

    /// Prints and stops a named timer.
    fn time_end(&self, label: &str);

    /// Prints a named timer's elapsed time without stopping it.
    fn time_log(&self, label: &str, args: &[Value]);

    /// Flushes buffered output, if the sink buffers any.
    fn flush(&self) {}
}
