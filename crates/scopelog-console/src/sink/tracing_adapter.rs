//! Tracing library adapter.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use super::OutputSink;
use super::tallies::{Tallies, format_elapsed};
use crate::render::{render_args, render_table, render_value};

/// Target used for every event this sink produces.
pub const TRACING_TARGET: &str = "scopelog";

/// Sink that turns console calls into `tracing` events.
///
/// Severity methods map onto `tracing` levels (`log` becomes `TRACE`).
/// Utilities degrade to events; group nesting is reported as a `depth` field.
/// Subscribers, filtering and formatting are left to whatever the host
/// application installed.
#[derive(Debug, Default)]
pub struct TracingSink {
    depth: AtomicUsize,
    tallies: Tallies,
}

impl TracingSink {
    /// Create a new tracing sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn depth(&self) -> usize {
        self.depth.load(Ordering::Relaxed)
    }
}

impl OutputSink for TracingSink {
    fn log(&self, args: &[Value]) {
        tracing::trace!(target: TRACING_TARGET, depth = self.depth(), "{}", render_args(args));
    }

    fn debug(&self, args: &[Value]) {
        tracing::debug!(target: TRACING_TARGET, depth = self.depth(), "{}", render_args(args));
    }

    fn info(&self, args: &[Value]) {
        tracing::info!(target: TRACING_TARGET, depth = self.depth(), "{}", render_args(args));
    }

    fn warn(&self, args: &[Value]) {
        tracing::warn!(target: TRACING_TARGET, depth = self.depth(), "{}", render_args(args));
    }

    fn error(&self, args: &[Value]) {
        tracing::error!(target: TRACING_TARGET, depth = self.depth(), "{}", render_args(args));
    }

    fn group(&self, label: &[Value]) {
        tracing::info!(
            target: TRACING_TARGET,
            depth = self.depth(),
            group = %render_args(label),
            "group start"
        );
        self.depth.fetch_add(1, Ordering::Relaxed);
    }

    fn group_end(&self) {
        let _ = self
            .depth
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |d| d.checked_sub(1));
    }

    fn trace(&self, args: &[Value]) {
        tracing::trace!(target: TRACING_TARGET, trace = true, "{}", render_args(args));
    }

    fn assert(&self, condition: bool, args: &[Value]) {
        if !condition {
            tracing::error!(target: TRACING_TARGET, "Assertion failed: {}", render_args(args));
        }
    }

    fn count(&self, label: &str) {
        let n = self.tallies.increment(label);
        tracing::info!(target: TRACING_TARGET, label, count = n, "{label}: {n}");
    }

    fn count_reset(&self, label: &str) {
        if !self.tallies.reset_count(label) {
            tracing::warn!(target: TRACING_TARGET, label, "Count for '{label}' does not exist");
        }
    }

    fn table(&self, data: &Value) {
        tracing::info!(target: TRACING_TARGET, "{}", render_table(data).join("\n"));
    }

    fn dir(&self, value: &Value) {
        tracing::info!(target: TRACING_TARGET, "{}", render_value(value));
    }

    fn profile(&self, label: &str) {
        tracing::debug!(target: TRACING_TARGET, label, "profile started");
    }

    fn profile_end(&self, label: &str) {
        tracing::debug!(target: TRACING_TARGET, label, "profile finished");
    }

    fn time(&self, label: &str) {
        if !self.tallies.start_timer(label) {
            tracing::warn!(target: TRACING_TARGET, label, "Timer '{label}' already exists");
        }
    }

    fn time_end(&self, label: &str) {
        match self.tallies.stop_timer(label) {
            Some(elapsed) => {
                tracing::info!(target: TRACING_TARGET, "{}", format_elapsed(label, elapsed));
            }
            None => tracing::warn!(target: TRACING_TARGET, label, "Timer '{label}' does not exist"),
        }
    }

    fn time_log(&self, label: &str, args: &[Value]) {
        match self.tallies.elapsed(label) {
            Some(elapsed) => tracing::info!(
                target: TRACING_TARGET,
                "{} {}",
                format_elapsed(label, elapsed),
                render_args(args)
            ),
            None => tracing::warn!(target: TRACING_TARGET, label, "Timer '{label}' does not exist"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce(&TracingSink)) -> String {
        let buf = Captured::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .without_time()
            .finish();
        let sink = TracingSink::new();
        tracing::subscriber::with_default(subscriber, || f(&sink));
        let bytes = buf.0.lock().unwrap().clone();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn test_events_carry_target_level_and_depth() {
        let out = capture(|sink| {
            sink.group(&[json!("batch")]);
            sink.warn(&[json!("slow"), json!(12)]);
            sink.group_end();
            sink.log(&[json!("plain")]);
        });
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3, "{out}");
        assert!(lines[0].contains("group start") && lines[0].contains("group=batch"));
        assert!(lines[1].contains("WARN") && lines[1].contains("scopelog"));
        assert!(lines[1].contains("slow 12") && lines[1].contains("depth=1"));
        assert!(lines[2].contains("TRACE") && lines[2].contains("depth=0"));
    }

    #[test]
    fn test_missing_timer_warns() {
        let out = capture(|sink| sink.time_end("nope"));
        assert!(out.contains("Timer 'nope' does not exist"), "{out}");
    }

    #[test]
    fn test_tracing_sink_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TracingSink>();
    }

    #[test]
    fn test_tracing_sink_as_trait_object() {
        let sink: Box<dyn OutputSink> = Box::new(TracingSink::new());
        // Without a subscriber these are discarded.
        sink.log(&[json!("log")]);
        sink.info(&[json!("info")]);
        sink.error(&[json!("error")]);
    }

    #[test]
    fn test_group_depth_tracks_nesting() {
        let sink = TracingSink::new();
        sink.group(&[json!("g")]);
        sink.group(&[json!("h")]);
        assert_eq!(sink.depth(), 2);
        sink.group_end();
        sink.group_end();
        sink.group_end();
        assert_eq!(sink.depth(), 0);
    }

    #[test]
    fn test_timers_and_counters_share_tallies() {
        let sink = TracingSink::new();
        sink.count("c");
        sink.time("t");
        assert!(sink.tallies.elapsed("t").is_some());
        sink.time_end("t");
        assert!(sink.tallies.elapsed("t").is_none());
        assert_eq!(sink.tallies.increment("c"), 2);
    }
}
