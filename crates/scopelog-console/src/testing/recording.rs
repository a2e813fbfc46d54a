//! RecordingSink for asserting on exact sink calls

use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::sink::OutputSink;

/// One call received by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Log(Vec<Value>),
    Debug(Vec<Value>),
    Info(Vec<Value>),
    Warn(Vec<Value>),
    Error(Vec<Value>),
    Group(Vec<Value>),
    GroupCollapsed(Vec<Value>),
    GroupEnd,
    Trace(Vec<Value>),
    Assert(bool, Vec<Value>),
    Count(String),
    CountReset(String),
    Table(Value),
    Dir(Value),
    DirXml(Value),
    Profile(String),
    ProfileEnd(String),
    Time(String),
    TimeEnd(String),
    TimeLog(String, Vec<Value>),
}

/// A sink that records every call instead of producing output.
///
/// Clones share the same record, so keep one handle for assertions and
/// give another to the [`LoggingContext`](crate::LoggingContext).
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    calls: Arc<Mutex<Vec<SinkCall>>>,
}

impl RecordingSink {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: SinkCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    /// All calls so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget recorded calls.
    pub fn clear(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }
}

impl OutputSink for RecordingSink {
    fn log(&self, args: &[Value]) {
        self.push(SinkCall::Log(args.to_vec()));
    }

    fn debug(&self, args: &[Value]) {
        self.push(SinkCall::Debug(args.to_vec()));
    }

    fn info(&self, args: &[Value]) {
        self.push(SinkCall::Info(args.to_vec()));
    }

    fn warn(&self, args: &[Value]) {
        self.push(SinkCall::Warn(args.to_vec()));
    }

    fn error(&self, args: &[Value]) {
        self.push(SinkCall::Error(args.to_vec()));
    }

    fn group(&self, label: &[Value]) {
        self.push(SinkCall::Group(label.to_vec()));
    }

    fn group_collapsed(&self, label: &[Value]) {
        self.push(SinkCall::GroupCollapsed(label.to_vec()));
    }

    fn group_end(&self) {
        self.push(SinkCall::GroupEnd);
    }

    fn trace(&self, args: &[Value]) {
        self.push(SinkCall::Trace(args.to_vec()));
    }

    fn assert(&self, condition: bool, args: &[Value]) {
        self.push(SinkCall::Assert(condition, args.to_vec()));
    }

    fn count(&self, label: &str) {
        self.push(SinkCall::Count(label.to_string()));
    }

    fn count_reset(&self, label: &str) {
        self.push(SinkCall::CountReset(label.to_string()));
    }

    fn table(&self, data: &Value) {
        self.push(SinkCall::Table(data.clone()));
    }

    fn dir(&self, value: &Value) {
        self.push(SinkCall::Dir(value.clone()));
    }

    fn dirxml(&self, value: &Value) {
        self.push(SinkCall::DirXml(value.clone()));
    }

    fn profile(&self, label: &str) {
        self.push(SinkCall::Profile(label.to_string()));
    }

    fn profile_end(&self, label: &str) {
        self.push(SinkCall::ProfileEnd(label.to_string()));
    }

    fn time(&self, label: &str) {
        self.push(SinkCall::Time(label.to_string()));
    }

    fn time_end(&self, label: &str) {
        self.push(SinkCall::TimeEnd(label.to_string()));
    }

    fn time_log(&self, label: &str, args: &[Value]) {
        self.push(SinkCall::TimeLog(label.to_string(), args.to_vec()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_in_order() {
        let sink = RecordingSink::new();
        sink.group(&[json!("g")]);
        sink.info(&[json!(1)]);
        sink.group_end();
        assert_eq!(
            sink.calls(),
            vec![
                SinkCall::Group(vec![json!("g")]),
                SinkCall::Info(vec![json!(1)]),
                SinkCall::GroupEnd,
            ]
        );
    }

    #[test]
    fn test_clones_share_record() {
        let sink = RecordingSink::new();
        let handle = sink.clone();
        sink.count("x");
        assert_eq!(handle.len(), 1);
        handle.clear();
        assert!(sink.is_empty());
    }
}
