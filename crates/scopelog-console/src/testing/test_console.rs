//! TestConsole for capturing rendered output in tests
//!
//! Wraps a [`ConsoleSink`] whose writer is an in-memory line buffer, so tests
//! can assert on exactly what a logger would have printed to stderr.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use regex::Regex;
use strip_ansi_escapes::strip_str;

use crate::sink::ConsoleSink;

/// A console sink that captures output for testing
///
/// Hand [`sink()`](Self::sink) to a [`LoggingContext`](crate::LoggingContext);
/// clones share the same capture buffer.
#[derive(Clone)]
pub struct TestConsole {
    inner: Arc<ConsoleSink>,
    lines: Arc<Mutex<LineBuffer>>,
}

impl TestConsole {
    /// Capture plain output
    #[must_use]
    pub fn new() -> Self {
        Self::capturing(false)
    }

    /// Capture styled output; [`output`](Self::output) still returns plain text
    #[must_use]
    pub fn new_styled() -> Self {
        Self::capturing(true)
    }

    fn capturing(styled: bool) -> Self {
        let lines = Arc::new(Mutex::new(LineBuffer::default()));
        let writer = CaptureWriter(lines.clone());
        Self {
            inner: Arc::new(ConsoleSink::with_writer(writer, styled)),
            lines,
        }
    }

    /// The sink to install in a context
    #[must_use]
    pub fn sink(&self) -> Arc<ConsoleSink> {
        self.inner.clone()
    }

    /// Whether the sink emits ANSI styling
    #[must_use]
    pub fn is_styled(&self) -> bool {
        self.inner.is_styled()
    }

    /// Completed lines exactly as written, ANSI codes included
    #[must_use]
    pub fn raw_output(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|buf| buf.complete.clone())
            .unwrap_or_default()
    }

    /// Completed lines with ANSI codes removed
    #[must_use]
    pub fn output(&self) -> Vec<String> {
        self.raw_output().iter().map(strip_str).collect()
    }

    fn text(&self) -> String {
        self.output().join("\n")
    }

    /// Case-insensitive substring search over the plain output
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.text().to_lowercase().contains(&needle.to_lowercase())
    }

    /// Regex search over the plain output. An invalid pattern never matches.
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        Regex::new(pattern).is_ok_and(|re| re.is_match(&self.text()))
    }

    /// # Panics
    ///
    /// Panics if no line contains `needle`.
    pub fn assert_contains(&self, needle: &str) {
        assert!(self.contains(needle), "missing '{needle}' in:\n{}", self.text());
    }

    /// # Panics
    ///
    /// Panics if some line contains `needle`.
    pub fn assert_not_contains(&self, needle: &str) {
        assert!(!self.contains(needle), "unexpected '{needle}' in:\n{}", self.text());
    }

    /// # Panics
    ///
    /// Panics unless the plain output is exactly `expected`, line for line.
    pub fn assert_lines(&self, expected: &[&str]) {
        assert_eq!(self.output(), expected, "captured output differs");
    }

    /// Discard everything captured so far
    pub fn clear(&self) {
        if let Ok(mut buf) = self.lines.lock() {
            *buf = LineBuffer::default();
        }
    }
}

impl Default for TestConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TestConsole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestConsole")
            .field("styled", &self.is_styled())
            .field("lines", &self.raw_output().len())
            .finish()
    }
}

/// Completed lines plus a trailing partial line awaiting its newline.
#[derive(Debug, Default)]
struct LineBuffer {
    complete: Vec<String>,
    pending: String,
}

impl LineBuffer {
    fn push(&mut self, text: &str) {
        let mut rest = text;
        while let Some(end) = rest.find('\n') {
            self.pending.push_str(&rest[..end]);
            self.complete.push(std::mem::take(&mut self.pending));
            rest = &rest[end + 1..];
        }
        self.pending.push_str(rest);
    }
}

struct CaptureWriter(Arc<Mutex<LineBuffer>>);

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut lines) = self.0.lock() {
            lines.push(&String::from_utf8_lossy(buf));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
