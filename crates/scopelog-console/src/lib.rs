#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod bridge;
pub mod config;
pub mod context;
pub mod decorators;
pub mod detection;
mod logger;
mod macros;
pub mod render;
pub mod sink;
pub mod testing; // Test utilities

pub use bridge::LogBridge;
pub use config::{ConfigOverrides, Decorator, LoggerConfig};
pub use context::{LoggingContext, session_store};
pub use logger::{CONFIG_ERROR_MESSAGE, FATAL_GROUP_LABEL, GroupScope, Logger};
pub use scopelog_core as core;
pub use sink::{ConsoleSink, OutputSink, TracingSink};

use serde::Serialize;
use serde_json::Value;

/// Convert any serializable value into a log argument.
///
/// Values that fail to serialize (maps with non-string keys, for example)
/// become the serialization error message.
pub fn to_arg<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| Value::String(e.to_string()))
}
