//! Line-oriented console sink

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use ::console::Style;
use serde_json::Value;

use super::OutputSink;
use super::tallies::{Tallies, format_elapsed};
use crate::render::{render_args, render_pretty, render_table};

const INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Plain,
    Dim,
    Warn,
    Error,
    Heading,
}

/// Writes console-style output as lines, to stderr by default.
///
/// Each open group indents following lines by two spaces. When styling is
/// enabled, debug output is dimmed, warnings are yellow, errors red and
/// group labels bold.
pub struct ConsoleSink {
    out: Mutex<Box<dyn Write + Send>>,
    styled: bool,
    depth: AtomicUsize,
    tallies: Tallies,
}

impl ConsoleSink {
    /// Stderr sink with automatic style detection
    #[must_use]
    pub fn new() -> Self {
        Self::with_styling(crate::detection::should_style())
    }

    /// Stderr sink with explicit styling
    #[must_use]
    pub fn with_styling(styled: bool) -> Self {
        Self::with_writer(io::stderr(), styled)
    }

    /// Sink over a custom writer (for testing)
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(writer: W, styled: bool) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
            styled,
            depth: AtomicUsize::new(0),
            tallies: Tallies::new(),
        }
    }

    // ─────────────────────────────────────────────────
    // State Queries
    // ─────────────────────────────────────────────────

    /// Check if ANSI styling is enabled
    pub fn is_styled(&self) -> bool {
        self.styled
    }

    /// Number of open groups
    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::Relaxed)
    }

    // ─────────────────────────────────────────────────
    // Output
    // ─────────────────────────────────────────────────

    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.styled {
            return text.to_string();
        }
        let style = match tone {
            Tone::Plain => return text.to_string(),
            Tone::Dim => Style::new().dim(),
            Tone::Warn => Style::new().yellow(),
            Tone::Error => Style::new().red(),
            Tone::Heading => Style::new().bold(),
        };
        style.force_styling(true).apply_to(text).to_string()
    }

    fn line(&self, text: &str, tone: Tone) {
        let mut line = INDENT.repeat(self.depth());
        line.push_str(&self.paint(text, tone));
        line.push('\n');
        if let Ok(mut out) = self.out.lock() {
            // Output failures are not reported to the caller.
            let _ = out.write_all(line.as_bytes());
        }
    }

    fn lines(&self, lines: &[String], tone: Tone) {
        for text in lines {
            self.line(text, tone);
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleSink")
            .field("styled", &self.styled)
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}

impl OutputSink for ConsoleSink {
    fn log(&self, args: &[Value]) {
        self.line(&render_args(args), Tone::Plain);
    }

    fn debug(&self, args: &[Value]) {
        self.line(&render_args(args), Tone::Dim);
    }

    fn info(&self, args: &[Value]) {
        self.line(&render_args(args), Tone::Plain);
    }

    fn warn(&self, args: &[Value]) {
        self.line(&render_args(args), Tone::Warn);
    }

    fn error(&self, args: &[Value]) {
        self.line(&render_args(args), Tone::Error);
    }

    fn group(&self, label: &[Value]) {
        if !label.is_empty() {
            self.line(&render_args(label), Tone::Heading);
        }
        self.depth.fetch_add(1, Ordering::Relaxed);
    }

    fn group_end(&self) {
        let _ = self
            .depth
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |d| d.checked_sub(1));
    }

    fn trace(&self, args: &[Value]) {
        let head = if args.is_empty() {
            "Trace".to_string()
        } else {
            format!("Trace: {}", render_args(args))
        };
        self.line(&head, Tone::Plain);

        // Only captured when RUST_BACKTRACE/RUST_LIB_BACKTRACE allow it.
        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            let frames: Vec<String> = backtrace
                .to_string()
                .lines()
                .map(|l| format!("{INDENT}{}", l.trim_start()))
                .collect();
            self.lines(&frames, Tone::Dim);
        }
    }

    fn assert(&self, condition: bool, args: &[Value]) {
        if condition {
            return;
        }
        let text = if args.is_empty() {
            "Assertion failed".to_string()
        } else {
            format!("Assertion failed: {}", render_args(args))
        };
        self.line(&text, Tone::Error);
    }

    fn count(&self, label: &str) {
        let n = self.tallies.increment(label);
        self.line(&format!("{label}: {n}"), Tone::Plain);
    }

    fn count_reset(&self, label: &str) {
        if !self.tallies.reset_count(label) {
            self.line(&format!("Count for '{label}' does not exist"), Tone::Warn);
        }
    }

    fn table(&self, data: &Value) {
        self.lines(&render_table(data), Tone::Plain);
    }

    fn dir(&self, value: &Value) {
        self.lines(&render_pretty(value), Tone::Plain);
    }

    fn profile(&self, label: &str) {
        self.line(&format!("Profile '{label}' started"), Tone::Dim);
    }

    fn profile_end(&self, label: &str) {
        self.line(&format!("Profile '{label}' finished"), Tone::Dim);
    }

    fn time(&self, label: &str) {
        if !self.tallies.start_timer(label) {
            self.line(&format!("Timer '{label}' already exists"), Tone::Warn);
        }
    }

    fn time_end(&self, label: &str) {
        match self.tallies.stop_timer(label) {
            Some(elapsed) => self.line(&format_elapsed(label, elapsed), Tone::Plain),
            None => self.line(&format!("Timer '{label}' does not exist"), Tone::Warn),
        }
    }

    fn flush(&self) {
        if let Ok(mut out) = self.out.lock() {
            let _ = out.flush();
        }
    }

    fn time_log(&self, label: &str, args: &[Value]) {
        match self.tallies.elapsed(label) {
            Some(elapsed) => {
                let mut text = format_elapsed(label, elapsed);
                if !args.is_empty() {
                    text.push(' ');
                    text.push_str(&render_args(args));
                }
                self.line(&text, Tone::Plain);
            }
            None => self.line(&format!("Timer '{label}' does not exist"), Tone::Warn),
        }
    }
}
