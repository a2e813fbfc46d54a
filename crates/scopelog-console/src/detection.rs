//! Styled/plain output detection
//!
//! Decides whether [`ConsoleSink`](crate::sink::ConsoleSink) should emit ANSI
//! styling, based on environment variables and whether stderr is a terminal.

/// Forces styled output when set.
pub const RICH_ENV_VAR: &str = "SCOPELOG_RICH";
/// Forces plain output when set.
pub const PLAIN_ENV_VAR: &str = "SCOPELOG_PLAIN";

/// Returns true if the environment asks for plain output.
#[must_use]
pub fn plain_requested() -> bool {
    std::env::var_os(PLAIN_ENV_VAR).is_some()
        || std::env::var_os("NO_COLOR").is_some()
        || std::env::var_os("CI").is_some()
}

/// Determine if styled output should be enabled for stderr.
#[must_use]
pub fn should_style() -> bool {
    // Explicit enable always wins
    if std::env::var_os(RICH_ENV_VAR).is_some() {
        return true;
    }
    if plain_requested() {
        return false;
    }
    console::Term::stderr().is_term()
}
