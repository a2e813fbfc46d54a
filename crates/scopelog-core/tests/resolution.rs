//! End-to-end resolution through the standard provider chain.
//!
//! These tests use a real session store and a temporary file store to check
//! the ordering rules and the fail-open path together.

use scopelog_core::{
    DEFAULT_STORAGE_KEY, FileStore, GlobalLevel, LevelResolver, MemoryStore, ProviderChain,
    Resolution, Severity, candidates,
};

struct Fixture {
    _dir: tempfile::TempDir,
    session: MemoryStore,
    persistent: FileStore,
    resolver: LevelResolver,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let session = MemoryStore::new();
    let persistent = FileStore::new(dir.path().join("storage.toml"));
    let resolver = LevelResolver::new(ProviderChain::standard(
        session.clone(),
        persistent.clone(),
    ));
    Fixture {
        _dir: dir,
        session,
        persistent,
        resolver,
    }
}

fn check(f: &Fixture, name: &str, requested: Severity) -> Resolution {
    f.resolver.resolve(
        name,
        requested,
        Severity::Fatal,
        Severity::Fatal,
        DEFAULT_STORAGE_KEY,
    )
}

// ============================================================================
// Static levels
// ============================================================================

#[test]
fn global_floor_ignores_dynamic_map() {
    let f = fixture();
    f.session.set(DEFAULT_STORAGE_KEY, r#"{"a": 400}"#);
    let global = GlobalLevel::new(Severity::Warn);

    for s in Severity::ALL {
        let enabled = f
            .resolver
            .is_enabled("a", s, global.get(), Severity::Fatal, DEFAULT_STORAGE_KEY);
        assert_eq!(enabled, s.at_least(Severity::Warn), "severity {s}");
    }
}

#[test]
fn lowering_the_global_level_forces_output() {
    let f = fixture();
    let global = GlobalLevel::new(Severity::Fatal);
    let on = |g: &GlobalLevel| {
        f.resolver
            .is_enabled("quiet", Severity::Debug, g.get(), Severity::Fatal, DEFAULT_STORAGE_KEY)
    };

    assert!(!on(&global));
    global.set(Severity::Log);
    assert!(on(&global));
}

// ============================================================================
// Provider ordering
// ============================================================================

#[test]
fn persistent_store_used_when_session_empty() {
    let f = fixture();
    f.persistent
        .set(DEFAULT_STORAGE_KEY, r#"{"app": 0}"#)
        .unwrap();
    assert!(check(&f, "app.db", Severity::Log).is_enabled());
}

#[test]
fn session_store_shadows_persistent_store() {
    let f = fixture();
    f.persistent
        .set(DEFAULT_STORAGE_KEY, r#"{"app": 0}"#)
        .unwrap();
    f.session.set(DEFAULT_STORAGE_KEY, r#"{"app": 300}"#);

    assert!(!check(&f, "app.db", Severity::Log).is_enabled());
    assert!(check(&f, "app.db", Severity::Error).is_enabled());
}

#[test]
fn nothing_configured_anywhere() {
    let f = fixture();
    let r = check(&f, "app", Severity::Error);
    assert!(matches!(r, Resolution::Unconfigured));
}

// ============================================================================
// Dynamic map rules
// ============================================================================

#[test]
fn exact_entry_stops_prefix_fallback() {
    let f = fixture();
    f.session
        .set(DEFAULT_STORAGE_KEY, r#"{"a.b": 300, "a": 0}"#);

    assert!(check(&f, "a.b", Severity::Error).is_enabled());
    assert!(!check(&f, "a.b", Severity::Warn).is_enabled());
    // A child of "a.b" is not an exact match and can fall back to "a".
    assert!(check(&f, "a.b.c", Severity::Warn).is_enabled());
}

#[test]
fn strict_prefix_does_not_stop_the_scan() {
    let f = fixture();
    f.session
        .set(DEFAULT_STORAGE_KEY, r#"{"a.b": 400, "a": 0}"#);
    assert!(check(&f, "a.b.c", Severity::Log).is_enabled());
}

#[test]
fn float_ranks_from_the_file_store_are_thresholds() {
    let f = fixture();
    f.persistent
        .set(DEFAULT_STORAGE_KEY, r#"{"a": 100.0, "svc": 2.0e2}"#)
        .unwrap();

    let r = check(&f, "a", Severity::Log);
    assert!(r.config_error().is_none(), "{r}");
    assert_eq!(r.to_string(), "disabled: exact entry with threshold 100");
    assert!(check(&f, "a", Severity::Debug).is_enabled());
    assert!(check(&f, "svc.api", Severity::Warn).is_enabled());
    assert!(!check(&f, "svc.api", Severity::Info).is_enabled());
}

#[test]
fn malformed_text_fails_open_for_every_severity() {
    let f = fixture();
    f.session.set(DEFAULT_STORAGE_KEY, "{not json");
    for s in Severity::ALL {
        let r = check(&f, "anything.at.all", s);
        assert!(r.is_enabled(), "severity {s} should fail open");
    }
}

#[test]
fn resolution_is_deterministic() {
    let f = fixture();
    f.session
        .set(DEFAULT_STORAGE_KEY, r#"{"x.y": 200, "x": 100}"#);
    let first: Vec<bool> = Severity::ALL
        .iter()
        .map(|s| check(&f, "x.y.z", *s).is_enabled())
        .collect();
    for _ in 0..3 {
        let again: Vec<bool> = Severity::ALL
            .iter()
            .map(|s| check(&f, "x.y.z", *s).is_enabled())
            .collect();
        assert_eq!(first, again);
    }
}

#[test]
fn candidate_chain_matches_scan_order() {
    assert_eq!(
        candidates("lorem.ipsum.dolor.sit.amet"),
        [
            "lorem.ipsum.dolor.sit.amet",
            "lorem.ipsum.dolor.sit",
            "lorem.ipsum.dolor",
            "lorem.ipsum",
            "lorem",
        ]
    );
    assert_eq!(candidates("solo"), ["solo"]);
}
