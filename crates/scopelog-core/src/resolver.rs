//! Level resolution.
//!
//! Decides whether a `(logger name, requested severity)` pair is emitted.
//! The checks run in a fixed order and the first match wins:
//!
//! 1. the requested severity meets the global floor;
//! 2. the requested severity meets the logger's own default;
//! 3. the dynamic level map stored under the logger's key, looked up through
//!    the provider chain:
//!    - an exact entry for the name decides on its own;
//!    - otherwise the candidate prefix chain is scanned, most specific first,
//!      and the first entry whose threshold is met enables the call.
//!
//! A stored map that cannot be parsed enables the call ([`Resolution::FailOpen`]).
//! Broken dynamic configuration must not hide output.

use std::fmt;

use crate::level_map::{LevelMap, LevelMapError};
use crate::names::candidates;
use crate::provider::ProviderChain;
use crate::severity::Severity;

/// Outcome of a resolution, with the rule that decided it.
#[derive(Debug)]
pub enum Resolution {
    /// Requested severity is at or above the global floor.
    GlobalFloor,
    /// Requested severity is at or above the logger's default.
    InstanceDefault,
    /// No provider holds a value for the configuration key.
    Unconfigured,
    /// The stored value is not a valid level map; emission is enabled.
    FailOpen {
        /// Why the stored text was rejected.
        error: LevelMapError,
    },
    /// The logger name itself is configured. This result is final.
    ExactMatch {
        /// Configured threshold for the name.
        threshold: f64,
        /// Whether the requested severity meets it.
        enabled: bool,
    },
    /// A prefix of the logger name is configured with a threshold that is met.
    PrefixMatch {
        /// The matching prefix.
        candidate: String,
        /// Its threshold.
        threshold: f64,
    },
    /// Configuration exists but nothing in the prefix chain allows the call.
    NoMatch,
}

impl Resolution {
    /// Whether the log call should be emitted.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        match self {
            Resolution::GlobalFloor
            | Resolution::InstanceDefault
            | Resolution::FailOpen { .. }
            | Resolution::PrefixMatch { .. } => true,
            Resolution::ExactMatch { enabled, .. } => *enabled,
            Resolution::Unconfigured | Resolution::NoMatch => false,
        }
    }

    /// The parse error behind a fail-open decision, if that is what happened.
    #[must_use]
    pub fn config_error(&self) -> Option<&LevelMapError> {
        match self {
            Resolution::FailOpen { error } => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_enabled() {
            "enabled"
        } else {
            "disabled"
        };
        match self {
            Resolution::GlobalFloor => write!(f, "{verdict}: at or above the global level"),
            Resolution::InstanceDefault => {
                write!(f, "{verdict}: at or above the logger's default level")
            }
            Resolution::Unconfigured => write!(f, "{verdict}: no dynamic configuration found"),
            Resolution::FailOpen { error } => {
                write!(f, "{verdict}: dynamic configuration unreadable ({error})")
            }
            Resolution::ExactMatch { threshold, .. } => {
                write!(f, "{verdict}: exact entry with threshold {threshold}")
            }
            Resolution::PrefixMatch {
                candidate,
                threshold,
            } => write!(
                f,
                "{verdict}: prefix '{candidate}' with threshold {threshold}"
            ),
            Resolution::NoMatch => write!(f, "{verdict}: no configured prefix allows this level"),
        }
    }
}

/// Decide using an already-parsed level map (steps 3c to 3e).
#[must_use]
pub fn resolve_in_map(map: &LevelMap, name: &str, requested: Severity) -> Resolution {
    if let Some(threshold) = map.threshold(name) {
        return Resolution::ExactMatch {
            threshold,
            enabled: requested.meets(threshold),
        };
    }

    for candidate in candidates(name) {
        if let Some(threshold) = map.threshold(candidate) {
            if requested.meets(threshold) {
                return Resolution::PrefixMatch {
                    candidate: candidate.to_string(),
                    threshold,
                };
            }
        }
    }

    Resolution::NoMatch
}

/// Resolves enablement against static levels and a provider chain.
#[derive(Debug, Clone, Default)]
pub struct LevelResolver {
    providers: ProviderChain,
}

impl LevelResolver {
    /// Resolver consulting `providers` for dynamic configuration.
    #[must_use]
    pub fn new(providers: ProviderChain) -> Self {
        Self { providers }
    }

    /// The provider chain.
    #[must_use]
    pub fn providers(&self) -> &ProviderChain {
        &self.providers
    }

    /// Full resolution with the deciding rule.
    #[must_use]
    pub fn resolve(
        &self,
        name: &str,
        requested: Severity,
        global: Severity,
        instance_default: Severity,
        storage_key: &str,
    ) -> Resolution {
        if requested.at_least(global) {
            return Resolution::GlobalFloor;
        }
        if requested.at_least(instance_default) {
            return Resolution::InstanceDefault;
        }

        let Some(text) = self.providers.get(storage_key) else {
            return Resolution::Unconfigured;
        };

        match LevelMap::parse(&text) {
            Ok(map) => resolve_in_map(&map, name, requested),
            Err(error) => Resolution::FailOpen { error },
        }
    }

    /// Whether the call should be emitted.
    #[must_use]
    pub fn is_enabled(
        &self,
        name: &str,
        requested: Severity,
        global: Severity,
        instance_default: Severity,
        storage_key: &str,
    ) -> bool {
        self.resolve(name, requested, global, instance_default, storage_key)
            .is_enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MemoryStore;

    const KEY: &str = "SearchLoggerConfig";

    fn resolver_with(text: Option<&str>) -> LevelResolver {
        let store = MemoryStore::new();
        if let Some(text) = text {
            store.set(KEY, text);
        }
        LevelResolver::new(ProviderChain::new().with(store))
    }

    fn enabled(resolver: &LevelResolver, name: &str, requested: Severity) -> bool {
        resolver.is_enabled(name, requested, Severity::Fatal, Severity::Fatal, KEY)
    }

    #[test]
    fn global_floor_wins_over_everything() {
        let resolver = resolver_with(Some(r#"{"a": 400}"#));
        for s in Severity::ALL {
            let r = resolver.resolve("a", s, Severity::Log, Severity::Fatal, KEY);
            assert!(matches!(r, Resolution::GlobalFloor), "{s}: {r}");
        }
    }

    #[test]
    fn instance_default_applies_below_global() {
        let resolver = resolver_with(None);
        let r = resolver.resolve("a", Severity::Warn, Severity::Fatal, Severity::Warn, KEY);
        assert!(matches!(r, Resolution::InstanceDefault));
        let r = resolver.resolve("a", Severity::Info, Severity::Fatal, Severity::Warn, KEY);
        assert!(matches!(r, Resolution::Unconfigured));
        assert!(!r.is_enabled());
    }

    #[test]
    fn without_config_enablement_equals_default_comparison() {
        let resolver = resolver_with(None);
        for default in Severity::ALL {
            for s in Severity::ALL {
                assert_eq!(
                    resolver.is_enabled("x.y", s, Severity::Fatal, default, KEY),
                    s.at_least(default) || s == Severity::Fatal,
                );
            }
        }
    }

    #[test]
    fn exact_match_is_authoritative() {
        let resolver = resolver_with(Some(r#"{"a.b": 300, "a": 0}"#));
        assert!(enabled(&resolver, "a.b", Severity::Error));
        assert!(!enabled(&resolver, "a.b", Severity::Warn));
        assert!(!enabled(&resolver, "a.b", Severity::Log));
    }

    #[test]
    fn prefix_scan_continues_past_strict_entry() {
        let resolver = resolver_with(Some(r#"{"a.b": 400, "a": 0}"#));
        let r = resolver.resolve("a.b.c", Severity::Log, Severity::Fatal, Severity::Fatal, KEY);
        match r {
            Resolution::PrefixMatch {
                candidate,
                threshold,
            } => {
                assert_eq!(candidate, "a");
                assert_eq!(threshold, 0.0);
            }
            other => panic!("expected prefix match, got {other}"),
        }
    }

    #[test]
    fn most_specific_prefix_reported_first() {
        let resolver = resolver_with(Some(r#"{"a.b": 100, "a": 0}"#));
        let r = resolver.resolve("a.b.c", Severity::Info, Severity::Fatal, Severity::Fatal, KEY);
        assert!(matches!(r, Resolution::PrefixMatch { ref candidate, .. } if candidate == "a.b"));
    }

    #[test]
    fn float_thresholds_compare_numerically() {
        let resolver = resolver_with(Some(r#"{"a": 100.0, "b": 150.5}"#));
        let r = resolver.resolve("a", Severity::Log, Severity::Fatal, Severity::Fatal, KEY);
        assert!(
            matches!(r, Resolution::ExactMatch { threshold, enabled: false } if threshold == 100.0),
            "{r}"
        );
        assert_eq!(r.to_string(), "disabled: exact entry with threshold 100");
        assert!(enabled(&resolver, "a", Severity::Info));
        assert!(!enabled(&resolver, "b.c", Severity::Info));
        assert!(enabled(&resolver, "b.c", Severity::Warn));
    }

    #[test]
    fn no_matching_prefix_disables() {
        let resolver = resolver_with(Some(r#"{"other": 0, "a": 300}"#));
        let r = resolver.resolve("a.b", Severity::Warn, Severity::Fatal, Severity::Fatal, KEY);
        assert!(matches!(r, Resolution::NoMatch));
        assert!(!r.is_enabled());
    }

    #[test]
    fn prefix_must_align_with_segments() {
        let resolver = resolver_with(Some(r#"{"ap": 0}"#));
        assert!(!enabled(&resolver, "app.db", Severity::Error));
    }

    #[test]
    fn malformed_config_fails_open() {
        let resolver = resolver_with(Some("{not json"));
        for s in [Severity::Log, Severity::Debug, Severity::Warn] {
            let r = resolver.resolve("a.b", s, Severity::Fatal, Severity::Fatal, KEY);
            assert!(r.is_enabled());
            assert!(r.config_error().is_some());
        }
    }

    #[test]
    fn missing_key_is_not_an_error() {
        let resolver = resolver_with(None);
        let r = resolver.resolve("a", Severity::Log, Severity::Fatal, Severity::Fatal, KEY);
        assert!(matches!(r, Resolution::Unconfigured));
        assert!(r.config_error().is_none());
    }

    #[test]
    fn storage_key_selects_the_map() {
        let store = MemoryStore::new();
        store.set("Other", r#"{"a": 0}"#);
        let resolver = LevelResolver::new(ProviderChain::new().with(store));
        assert!(!resolver.is_enabled("a", Severity::Log, Severity::Fatal, Severity::Fatal, KEY));
        assert!(resolver.is_enabled("a", Severity::Log, Severity::Fatal, Severity::Fatal, "Other"));
    }

    #[test]
    fn config_changes_are_seen_immediately() {
        let store = MemoryStore::new();
        let resolver = LevelResolver::new(ProviderChain::new().with(store.clone()));
        assert!(!resolver.is_enabled("a", Severity::Log, Severity::Fatal, Severity::Fatal, KEY));
        store.set(KEY, r#"{"a": 0}"#);
        assert!(resolver.is_enabled("a", Severity::Log, Severity::Fatal, Severity::Fatal, KEY));
        store.set(KEY, r#"{"a": 200}"#);
        assert!(!resolver.is_enabled("a", Severity::Log, Severity::Fatal, Severity::Fatal, KEY));
    }

    #[test]
    fn display_names_the_rule() {
        let r = Resolution::PrefixMatch {
            candidate: "app".to_string(),
            threshold: 200.0,
        };
        assert_eq!(r.to_string(), "enabled: prefix 'app' with threshold 200");
        assert_eq!(
            Resolution::NoMatch.to_string(),
            "disabled: no configured prefix allows this level"
        );
    }
}
