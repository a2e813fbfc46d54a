//! Severity ranks and the environment-derived default.
//!
//! Ranks are fixed numbers rather than variant order. `Debug` and `Info`
//! share rank 100 and are gated identically, so every comparison in the
//! crate goes through [`Severity::rank`].

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Environment variable holding the default severity name.
pub const LEVEL_ENV_VAR: &str = "loglevel";

/// Severity of a log call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// Plain output, the lowest rank.
    #[default]
    Log,
    /// Debugging information.
    Debug,
    /// General information (same rank as `Debug`).
    Info,
    /// Recoverable problems.
    Warn,
    /// Failures.
    Error,
    /// Failures the caller cannot continue from.
    Fatal,
}

impl Severity {
    /// Every severity, lowest rank first.
    pub const ALL: [Severity; 6] = [
        Severity::Log,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Numeric rank used for all comparisons.
    #[must_use]
    pub const fn rank(self) -> i32 {
        match self {
            Severity::Log => 0,
            Severity::Debug | Severity::Info => 100,
            Severity::Warn => 200,
            Severity::Error => 300,
            Severity::Fatal => 400,
        }
    }

    /// Returns true if this severity is at or above `floor`.
    #[must_use]
    pub const fn at_least(self, floor: Severity) -> bool {
        self.rank() >= floor.rank()
    }

    /// Returns true if this severity meets a raw numeric threshold.
    ///
    /// Thresholds come from JSON, so `100` and `100.0` are the same value.
    #[must_use]
    pub fn meets(self, threshold: f64) -> bool {
        f64::from(self.rank()) >= threshold
    }

    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Log => "log",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// Parse a name, falling back to `Log` for anything unrecognized.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    pub(crate) const fn to_index(self) -> u8 {
        match self {
            Severity::Log => 0,
            Severity::Debug => 1,
            Severity::Info => 2,
            Severity::Warn => 3,
            Severity::Error => 4,
            Severity::Fatal => 5,
        }
    }

    pub(crate) const fn from_index(index: u8) -> Self {
        match index {
            1 => Severity::Debug,
            2 => Severity::Info,
            3 => Severity::Warn,
            4 => Severity::Error,
            5 => Severity::Fatal,
            _ => Severity::Log,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a severity name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeverityError(String);

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown severity '{}' (expected log, debug, info, warn, error or fatal)",
            self.0
        )
    }
}

impl std::error::Error for ParseSeverityError {}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "log" => Ok(Severity::Log),
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

/// Read the default severity from the environment right now.
///
/// Unset or unrecognized values yield [`Severity::Log`].
#[must_use]
pub fn severity_from_env() -> Severity {
    std::env::var(LEVEL_ENV_VAR)
        .map(|v| Severity::parse_lenient(&v))
        .unwrap_or_default()
}

static DEFAULT_SEVERITY: OnceLock<Severity> = OnceLock::new();

/// Process-wide default severity, read from the environment once.
#[must_use]
pub fn default_severity() -> Severity {
    *DEFAULT_SEVERITY.get_or_init(severity_from_env)
}
