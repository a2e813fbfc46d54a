//! Logger facade.
//!
//! A [`Logger`] is created once per module or call site and lives for the
//! whole process. Every severity method re-checks enablement; nothing is
//! cached, so changes to the global level, the logger's own level, or the
//! stored dynamic configuration take effect on the next call.
//!
//! # Example
//!
//! ```ignore
//! use scopelog_console::{Logger, ConfigOverrides, log_info};
//! use scopelog_console::core::Severity;
//!
//! let logger = Logger::with_overrides(
//!     "app.net.http",
//!     ConfigOverrides::new().level(Severity::Warn),
//! );
//! log_info!(logger, "request", 42);
//! ```

use std::fmt;

use scopelog_core::{LevelCell, Resolution, Severity};
use serde_json::Value;

use crate::config::{ConfigOverrides, LoggerConfig};
use crate::context::LoggingContext;
use crate::sink::OutputSink;

/// Diagnostic emitted when the stored dynamic configuration cannot be parsed.
pub const CONFIG_ERROR_MESSAGE: &str = "Error reading LoggerConfig, enabling as fallback";

/// Label of the group wrapping every `fatal` call.
pub const FATAL_GROUP_LABEL: &str = "Fatal Error";

/// A named logger gating calls to an output sink.
pub struct Logger {
    name: String,
    config: LoggerConfig,
    level: LevelCell,
    ctx: LoggingContext,
}

impl Logger {
    /// Logger in the process-wide context with default configuration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_overrides(name, ConfigOverrides::default())
    }

    /// Logger in the process-wide context with configuration overrides.
    #[must_use]
    pub fn with_overrides(name: impl Into<String>, overrides: ConfigOverrides) -> Self {
        Self::in_context(LoggingContext::process().clone(), name, overrides)
    }

    /// Logger in an injected context. Overrides merge over [`LoggerConfig::from_env`].
    #[must_use]
    pub fn in_context(
        ctx: LoggingContext,
        name: impl Into<String>,
        overrides: ConfigOverrides,
    ) -> Self {
        Self::from_config(ctx, name, LoggerConfig::from_env().merged(overrides))
    }

    /// Logger from a fully built configuration.
    #[must_use]
    pub fn from_config(ctx: LoggingContext, name: impl Into<String>, config: LoggerConfig) -> Self {
        Self {
            name: name.into(),
            level: LevelCell::new(config.log_level),
            config,
            ctx,
        }
    }

    // ─────────────────────────────────────────────────
    // State Queries
    // ─────────────────────────────────────────────────

    /// Dot-delimited logger name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configuration the logger was built with.
    #[must_use]
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// The shared context.
    #[must_use]
    pub fn context(&self) -> &LoggingContext {
        &self.ctx
    }

    /// Current default level of this logger.
    #[must_use]
    pub fn level(&self) -> Severity {
        self.level.get()
    }

    /// Change this logger's default level.
    pub fn set_level(&self, level: Severity) {
        self.level.set(level);
    }

    /// How a call at `severity` would be resolved right now.
    #[must_use]
    pub fn explain(&self, severity: Severity) -> Resolution {
        self.ctx.resolver().resolve(
            &self.name,
            severity,
            self.ctx.global_level().get(),
            self.level.get(),
            &self.config.storage_key_name,
        )
    }

    /// Whether a call at `severity` would be emitted right now.
    ///
    /// Unlike the logging methods this never reports configuration errors.
    #[must_use]
    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.explain(severity).is_enabled()
    }

    /// Resolve, reporting unreadable configuration through the sink.
    fn check(&self, severity: Severity) -> bool {
        let resolution = self.explain(severity);
        if let Some(error) = resolution.config_error() {
            self.ctx.sink().log(&[
                Value::from(CONFIG_ERROR_MESSAGE),
                Value::from(error.to_string()),
            ]);
        }
        resolution.is_enabled()
    }

    // ─────────────────────────────────────────────────
    // Gated Output
    // ─────────────────────────────────────────────────

    /// Plain output.
    pub fn log(&self, args: Vec<Value>) {
        if self.check(Severity::Log) {
            self.ctx.sink().log(&self.config.decorate(args));
        }
    }

    /// Debug output.
    pub fn debug(&self, args: Vec<Value>) {
        if self.check(Severity::Debug) {
            self.ctx.sink().debug(&self.config.decorate(args));
        }
    }

    /// Informational output.
    pub fn info(&self, args: Vec<Value>) {
        if self.check(Severity::Info) {
            self.ctx.sink().info(&self.config.decorate(args));
        }
    }

    /// Warning output.
    pub fn warn(&self, args: Vec<Value>) {
        if self.check(Severity::Warn) {
            self.ctx.sink().warn(&self.config.decorate(args));
        }
    }

    /// Error output.
    pub fn error(&self, args: Vec<Value>) {
        if self.check(Severity::Error) {
            self.ctx.sink().error(&self.config.decorate(args));
        }
    }

    /// Error output wrapped in a `"Fatal Error"` group.
    ///
    /// The group is closed even if the sink panics while emitting.
    pub fn fatal(&self, args: Vec<Value>) {
        if self.check(Severity::Fatal) {
            let _group = self.group_scope(vec![Value::from(FATAL_GROUP_LABEL)]);
            self.ctx.sink().error(&self.config.decorate(args));
        }
    }

    /// Dispatch to the method matching `severity`.
    pub fn log_at(&self, severity: Severity, args: Vec<Value>) {
        match severity {
            Severity::Log => self.log(args),
            Severity::Debug => self.debug(args),
            Severity::Info => self.info(args),
            Severity::Warn => self.warn(args),
            Severity::Error => self.error(args),
            Severity::Fatal => self.fatal(args),
        }
    }

    // ─────────────────────────────────────────────────
    // Pass-through Utilities (never gated)
    // ─────────────────────────────────────────────────

    /// Open a group.
    pub fn group(&self, label: Vec<Value>) {
        self.ctx.sink().group(&label);
    }

    /// Open a collapsed group.
    pub fn group_collapsed(&self, label: Vec<Value>) {
        self.ctx.sink().group_collapsed(&label);
    }

    /// Close the innermost group.
    pub fn group_end(&self) {
        self.ctx.sink().group_end();
    }

    /// Open a group that closes when the returned guard drops.
    #[must_use = "the group closes as soon as the guard is dropped"]
    pub fn group_scope(&self, label: Vec<Value>) -> GroupScope<'_> {
        self.ctx.sink().group(&label);
        GroupScope {
            sink: self.ctx.sink(),
        }
    }

    /// Output with a stack trace.
    pub fn trace(&self, args: Vec<Value>) {
        self.ctx.sink().trace(&args);
    }

    /// Output an assertion failure when `condition` is false.
    pub fn assert(&self, condition: bool, args: Vec<Value>) {
        self.ctx.sink().assert(condition, &args);
    }

    /// Increment and print a counter.
    pub fn count(&self, label: &str) {
        self.ctx.sink().count(label);
    }

    /// Reset a counter.
    pub fn count_reset(&self, label: &str) {
        self.ctx.sink().count_reset(label);
    }

    /// Tabular display.
    pub fn table(&self, data: &Value) {
        self.ctx.sink().table(data);
    }

    /// Structured display.
    pub fn dir(&self, value: &Value) {
        self.ctx.sink().dir(value);
    }

    /// Tree display.
    pub fn dirxml(&self, value: &Value) {
        self.ctx.sink().dirxml(value);
    }

    /// Start a profile.
    pub fn profile(&self, label: &str) {
        self.ctx.sink().profile(label);
    }

    /// End a profile.
    pub fn profile_end(&self, label: &str) {
        self.ctx.sink().profile_end(label);
    }

    /// Start a timer.
    pub fn time(&self, label: &str) {
        self.ctx.sink().time(label);
    }

    /// Print and stop a timer.
    pub fn time_end(&self, label: &str) {
        self.ctx.sink().time_end(label);
    }

    /// Print a timer without stopping it.
    pub fn time_log(&self, label: &str, args: Vec<Value>) {
        self.ctx.sink().time_log(label, &args);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level.get())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Open group; closes it on drop, including during unwinding.
pub struct GroupScope<'a> {
    sink: &'a dyn OutputSink,
}

impl Drop for GroupScope<'_> {
    fn drop(&mut self) {
        self.sink.group_end();
    }
}

impl fmt::Debug for GroupScope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupScope").finish_non_exhaustive()
    }
}
