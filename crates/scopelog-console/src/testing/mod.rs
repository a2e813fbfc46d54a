//! Testing utilities for scopelog output
//!
//! - [`RecordingSink`] records exact sink calls.
//! - [`TestConsole`] captures rendered [`ConsoleSink`](crate::sink::ConsoleSink) lines.

mod recording;
mod test_console;

pub use recording::{RecordingSink, SinkCall};
pub use test_console::TestConsole;
