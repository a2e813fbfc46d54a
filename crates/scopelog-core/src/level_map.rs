//! Dynamic level map wire format.
//!
//! The map is a flat JSON object from logger names (or name prefixes) to
//! numeric severity ranks, e.g. `{"app.net": 200, "app": 0}`. JSON does not
//! distinguish integers from floats, so `100.0` is accepted as rank 100. It is
//! parsed into a typed map at the boundary; anything that does not fit that
//! shape is a [`LevelMapError`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// Parsed dynamic configuration: name or prefix to minimum rank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelMap(BTreeMap<String, f64>);

impl LevelMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the JSON text stored under a configuration key.
    pub fn parse(text: &str) -> Result<Self, LevelMapError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Threshold configured for exactly this name.
    #[must_use]
    pub fn threshold(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Sets the threshold for a name using a severity's rank.
    pub fn set(&mut self, name: impl Into<String>, severity: Severity) {
        self.0.insert(name.into(), f64::from(severity.rank()));
    }

    /// Sets a raw numeric threshold for a name.
    pub fn set_rank(&mut self, name: impl Into<String>, rank: f64) {
        self.0.insert(name.into(), rank);
    }

    /// Number of configured entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Serializes back to the stored JSON form.
    #[must_use]
    pub fn to_json(&self) -> String {
        // Parsed thresholds are always finite, so this cannot fail for them.
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl FromIterator<(String, f64)> for LevelMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The stored text is not a flat object of numeric ranks.
#[derive(Debug)]
pub enum LevelMapError {
    /// JSON syntax error or wrong shape.
    Json(serde_json::Error),
}

impl fmt::Display for LevelMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelMapError::Json(e) => write!(f, "invalid level map: {e}"),
        }
    }
}

impl std::error::Error for LevelMapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelMapError::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for LevelMapError {
    fn from(err: serde_json::Error) -> Self {
        LevelMapError::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn parses_flat_object() {
        let map = LevelMap::parse(r#"{"a.b": 300, "a": 0}"#).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.threshold("a.b"), Some(300.0));
        assert_eq!(map.threshold("a"), Some(0.0));
        assert_eq!(map.threshold("a.b.c"), None);
    }

    #[test]
    fn empty_object_is_valid() {
        let map = LevelMap::parse("{}").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn rejects_broken_json() {
        let err = LevelMap::parse("{not json").unwrap_err();
        assert!(err.to_string().starts_with("invalid level map"));
        assert!(err.source().is_some());
    }

    #[test]
    fn rejects_wrong_shapes() {
        assert!(LevelMap::parse("[1, 2]").is_err());
        assert!(LevelMap::parse("null").is_err());
        assert!(LevelMap::parse(r#"{"a": {"b": 0}}"#).is_err());
        assert!(LevelMap::parse(r#"{"a": "warn"}"#).is_err());
        assert!(LevelMap::parse(r#"{"a": true}"#).is_err());
    }

    #[test]
    fn float_ranks_are_numbers() {
        let map = LevelMap::parse(r#"{"a": 100.0, "a.b": 250.5, "c": 2e2}"#).unwrap();
        assert_eq!(map.threshold("a"), Some(100.0));
        assert_eq!(map.threshold("a.b"), Some(250.5));
        assert_eq!(map.threshold("c"), Some(200.0));
        assert_eq!(map, LevelMap::parse(r#"{"a": 100, "a.b": 250.5, "c": 200}"#).unwrap());
    }

    #[test]
    fn set_uses_rank() {
        let mut map = LevelMap::new();
        map.set("app", Severity::Info);
        map.set_rank("app.db", 250.0);
        assert_eq!(map.threshold("app"), Some(100.0));
        assert_eq!(map.threshold("app.db"), Some(250.0));
        let entries: Vec<(&str, f64)> = map.iter().collect();
        assert_eq!(entries, vec![("app", 100.0), ("app.db", 250.0)]);
    }

    #[test]
    fn to_json_is_parseable() {
        let map: LevelMap = vec![("x.y".to_string(), 200.0)].into_iter().collect();
        let reparsed = LevelMap::parse(&map.to_json()).unwrap();
        assert_eq!(reparsed, map);
    }
}
