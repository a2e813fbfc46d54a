//! `log` crate bridge.
//!
//! Routes records from the [`log`] facade through the level resolver, so
//! libraries that log via `log::info!` obey the same global, default and
//! dynamic configuration as [`Logger`]s. The record target becomes the
//! logger name with `::` mapped to `.` (`app::net` is governed by entries for
//! `app.net` and `app`).
//!
//! # Usage
//!
//! ```ignore
//! use scopelog_console::{LogBridge, LoggingContext};
//!
//! LogBridge::new(LoggingContext::process().clone()).init()?;
//! log::warn!(target: "app::net", "retrying");
//! ```

use log::{Level, LevelFilter, Log, Metadata, Record};
use scopelog_core::Severity;
use scopelog_core::names::from_module_path;
use serde_json::Value;

use crate::config::LoggerConfig;
use crate::context::LoggingContext;
use crate::logger::Logger;

/// Map a `log` level onto a severity. `Trace` has no counterpart and maps to `Log`.
#[must_use]
pub fn severity_for(level: Level) -> Severity {
    match level {
        Level::Error => Severity::Error,
        Level::Warn => Severity::Warn,
        Level::Info => Severity::Info,
        Level::Debug => Severity::Debug,
        Level::Trace => Severity::Log,
    }
}

/// A `log::Log` implementation that gates records like a [`Logger`].
pub struct LogBridge {
    ctx: LoggingContext,
    config: LoggerConfig,
}

impl LogBridge {
    /// Bridge into `ctx` using default logger configuration.
    #[must_use]
    pub fn new(ctx: LoggingContext) -> Self {
        Self {
            ctx,
            config: LoggerConfig::from_env(),
        }
    }

    /// Configuration (storage key, default level, decorators) applied to every record.
    #[must_use]
    pub fn with_config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    fn logger_for(&self, target: &str) -> Logger {
        Logger::from_config(
            self.ctx.clone(),
            from_module_path(target),
            self.config.clone(),
        )
    }

    /// Install as the global logger.
    ///
    /// The max level is left at `Trace`; filtering happens per record.
    /// Returns an error if a logger has already been set.
    pub fn init(self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(LevelFilter::Trace);
        Ok(())
    }

    /// Install as the global logger, ignoring errors if already set.
    pub fn try_init(self) {
        let _ = self.init();
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.logger_for(metadata.target())
            .is_enabled(severity_for(metadata.level()))
    }

    fn log(&self, record: &Record) {
        let logger = self.logger_for(record.target());
        logger.log_at(
            severity_for(record.level()),
            vec![Value::from(record.args().to_string())],
        );
    }

    fn flush(&self) {
        self.ctx.sink().flush();
    }
}
