//! Core types for scopelog.
//!
//! This crate decides *whether* a log call is emitted:
//! - [`Severity`] ranks and the `loglevel` environment default
//! - [`GlobalLevel`], the process-wide floor
//! - [`LevelMap`], the dynamic name-prefix to level mapping
//! - [`ConfigProvider`]s and the [`ProviderChain`] that finds the map
//! - [`LevelResolver`], which combines all of the above
//!
//! It performs no output. See `scopelog-console` for the logger facade and
//! output sinks.

#![forbid(unsafe_code)]

mod global;
mod level_map;
pub mod names;
mod provider;
mod resolver;
mod severity;
mod store;

pub use global::{GlobalLevel, LevelCell, process_level};
pub use level_map::{LevelMap, LevelMapError};
pub use names::candidates;
pub use provider::{ConfigProvider, EnvProvider, Located, MemoryStore, ProviderChain};
pub use resolver::{LevelResolver, Resolution, resolve_in_map};
pub use severity::{
    LEVEL_ENV_VAR, ParseSeverityError, Severity, default_severity, severity_from_env,
};
pub use store::{FileStore, STORE_DIR_NAME, STORE_FILE_NAME, StoreError};

/// Storage key used when a logger does not name its own.
pub const DEFAULT_STORAGE_KEY: &str = "SearchLoggerConfig";
