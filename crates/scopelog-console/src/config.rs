//! Per-logger configuration.
//!
//! `LoggerConfig` carries the storage key for dynamic configuration, the
//! logger's default level, and optional prefix/suffix decorators. Defaults
//! come from the environment; [`ConfigOverrides`] are shallow-merged on top.

use std::fmt;
use std::sync::Arc;

use scopelog_core::{DEFAULT_STORAGE_KEY, Severity, default_severity};
use serde_json::Value;

/// Zero-argument function producing a value to prepend or append.
///
/// Called once per emitted call; results are never cached.
pub type Decorator = Arc<dyn Fn() -> Value + Send + Sync>;

/// Configuration for one logger.
#[derive(Clone)]
pub struct LoggerConfig {
    /// Key under which the dynamic level map is stored.
    pub storage_key_name: String,
    /// The logger's initial default level.
    pub log_level: Severity,
    /// Value prepended to every emitted call.
    pub prefix: Option<Decorator>,
    /// Value appended to every emitted call.
    pub suffix: Option<Decorator>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl LoggerConfig {
    /// Defaults: `"SearchLoggerConfig"` and the `loglevel` environment level.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            storage_key_name: DEFAULT_STORAGE_KEY.to_string(),
            log_level: default_severity(),
            prefix: None,
            suffix: None,
        }
    }

    // ─────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────

    /// Set the storage key
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key_name = key.into();
        self
    }

    /// Set the default level
    #[must_use]
    pub fn with_level(mut self, level: Severity) -> Self {
        self.log_level = level;
        self
    }

    /// Set the prefix decorator
    #[must_use]
    pub fn with_prefix<F>(mut self, prefix: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.prefix = Some(Arc::new(prefix));
        self
    }

    /// Set the suffix decorator
    #[must_use]
    pub fn with_suffix<F>(mut self, suffix: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.suffix = Some(Arc::new(suffix));
        self
    }

    /// Shallow merge: every field present in `overrides` replaces ours.
    #[must_use]
    pub fn merged(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(key) = overrides.storage_key_name {
            self.storage_key_name = key;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        if overrides.prefix.is_some() {
            self.prefix = overrides.prefix;
        }
        if overrides.suffix.is_some() {
            self.suffix = overrides.suffix;
        }
        self
    }

    /// Prepend the prefix and append the suffix, calling each once.
    #[must_use]
    pub fn decorate(&self, mut args: Vec<Value>) -> Vec<Value> {
        if let Some(prefix) = &self.prefix {
            args.insert(0, prefix());
        }
        if let Some(suffix) = &self.suffix {
            args.push(suffix());
        }
        args
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("storage_key_name", &self.storage_key_name)
            .field("log_level", &self.log_level)
            .field("prefix", &self.prefix.is_some())
            .field("suffix", &self.suffix.is_some())
            .finish()
    }
}

/// Fields to override on top of [`LoggerConfig::from_env`]. `None` keeps the default.
#[derive(Clone, Default)]
pub struct ConfigOverrides {
    /// Replacement storage key.
    pub storage_key_name: Option<String>,
    /// Replacement default level.
    pub log_level: Option<Severity>,
    /// Replacement prefix decorator.
    pub prefix: Option<Decorator>,
    /// Replacement suffix decorator.
    pub suffix: Option<Decorator>,
}

impl ConfigOverrides {
    /// No overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the storage key
    #[must_use]
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key_name = Some(key.into());
        self
    }

    /// Override the default level
    #[must_use]
    pub fn level(mut self, level: Severity) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Override the prefix decorator
    #[must_use]
    pub fn prefix<F>(mut self, prefix: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.prefix = Some(Arc::new(prefix));
        self
    }

    /// Override the suffix decorator
    #[must_use]
    pub fn suffix<F>(mut self, suffix: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.suffix = Some(Arc::new(suffix));
        self
    }
}

impl fmt::Debug for ConfigOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOverrides")
            .field("storage_key_name", &self.storage_key_name)
            .field("log_level", &self.log_level)
            .field("prefix", &self.prefix.is_some())
            .field("suffix", &self.suffix.is_some())
            .finish()
    }
}
