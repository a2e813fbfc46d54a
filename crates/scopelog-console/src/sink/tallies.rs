//! Counters and timers shared by the sinks.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Per-label counters and timers.
#[derive(Debug, Default)]
pub struct Tallies {
    counts: Mutex<HashMap<String, u64>>,
    timers: Mutex<HashMap<String, Instant>>,
}

impl Tallies {
    /// Creates empty tallies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments `label` and returns the new count.
    pub fn increment(&self, label: &str) -> u64 {
        let Ok(mut counts) = self.counts.lock() else {
            return 0;
        };
        let count = counts.entry(label.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Resets `label`. Returns false if it was never counted.
    pub fn reset_count(&self, label: &str) -> bool {
        self.counts
            .lock()
            .map(|mut counts| match counts.get_mut(label) {
                Some(count) => {
                    *count = 0;
                    true
                }
                None => false,
            })
            .unwrap_or(false)
    }

    /// Starts a timer. Returns false if one with this label is already running.
    pub fn start_timer(&self, label: &str) -> bool {
        let Ok(mut timers) = self.timers.lock() else {
            return false;
        };
        if timers.contains_key(label) {
            return false;
        }
        timers.insert(label.to_string(), Instant::now());
        true
    }

    /// Elapsed time of a running timer.
    #[must_use]
    pub fn elapsed(&self, label: &str) -> Option<Duration> {
        let timers = self.timers.lock().ok()?;
        timers.get(label).map(Instant::elapsed)
    }

    /// Stops a timer and returns its elapsed time.
    pub fn stop_timer(&self, label: &str) -> Option<Duration> {
        let mut timers = self.timers.lock().ok()?;
        timers.remove(label).map(|start| start.elapsed())
    }
}

/// `label: 1.234ms`
#[must_use]
pub(crate) fn format_elapsed(label: &str, elapsed: Duration) -> String {
    format!("{label}: {:.3}ms", elapsed.as_secs_f64() * 1000.0)
}
