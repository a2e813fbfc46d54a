//! Shared logging context.
//!
//! A [`LoggingContext`] bundles what every logger needs besides its own
//! configuration: the global level, the resolver (with its provider chain)
//! and the output sink. Loggers built with [`Logger::new`](crate::Logger::new)
//! use the process-wide context; tests and embedders inject their own.

use std::fmt;
use std::sync::{Arc, OnceLock};

use scopelog_core::{
    FileStore, GlobalLevel, LevelResolver, MemoryStore, ProviderChain, Severity, process_level,
};

use crate::sink::{ConsoleSink, OutputSink};

/// Global level, resolver and sink shared by a set of loggers.
#[derive(Clone)]
pub struct LoggingContext {
    global: Arc<GlobalLevel>,
    resolver: LevelResolver,
    sink: Arc<dyn OutputSink>,
}

impl LoggingContext {
    /// Context from explicit parts.
    #[must_use]
    pub fn new(
        global: Arc<GlobalLevel>,
        resolver: LevelResolver,
        sink: Arc<dyn OutputSink>,
    ) -> Self {
        Self {
            global,
            resolver,
            sink,
        }
    }

    /// Context with its own global level, no dynamic configuration, and `sink`.
    #[must_use]
    pub fn isolated(global: Severity, sink: Arc<dyn OutputSink>) -> Self {
        Self::new(
            Arc::new(GlobalLevel::new(global)),
            LevelResolver::default(),
            sink,
        )
    }

    /// Process defaults: the process global level, the standard provider
    /// chain (process session store, default file store if the platform has
    /// a config dir, environment) and a stderr [`ConsoleSink`].
    #[must_use]
    pub fn from_env() -> Self {
        let providers = match FileStore::at_default_location() {
            Ok(persistent) => ProviderChain::standard(session_store(), persistent),
            Err(_) => ProviderChain::new()
                .with(session_store())
                .with(scopelog_core::EnvProvider),
        };
        Self::new(
            process_level(),
            LevelResolver::new(providers),
            Arc::new(ConsoleSink::new()),
        )
    }

    /// The process-wide context, built by [`from_env`](Self::from_env) on first use.
    #[must_use]
    pub fn process() -> &'static LoggingContext {
        static PROCESS: OnceLock<LoggingContext> = OnceLock::new();
        PROCESS.get_or_init(Self::from_env)
    }

    // ─────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────

    /// Replace the sink
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn OutputSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the resolver
    #[must_use]
    pub fn with_resolver(mut self, resolver: LevelResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replace the global level cell
    #[must_use]
    pub fn with_global(mut self, global: Arc<GlobalLevel>) -> Self {
        self.global = global;
        self
    }

    // ─────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────

    /// The shared global level cell.
    #[must_use]
    pub fn global_level(&self) -> &Arc<GlobalLevel> {
        &self.global
    }

    /// The resolver.
    #[must_use]
    pub fn resolver(&self) -> &LevelResolver {
        &self.resolver
    }

    /// The output sink.
    #[must_use]
    pub fn sink(&self) -> &dyn OutputSink {
        self.sink.as_ref()
    }
}

impl fmt::Debug for LoggingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingContext")
            .field("global", &self.global.get())
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

/// The process-wide session store consulted first by [`LoggingContext::from_env`].
///
/// Clones share storage; set the dynamic level map here to change levels at
/// runtime for the current process only.
#[must_use]
pub fn session_store() -> MemoryStore {
    static SESSION: OnceLock<MemoryStore> = OnceLock::new();
    SESSION.get_or_init(MemoryStore::new).clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSink;

    #[test]
    fn isolated_context_has_no_providers() {
        let ctx = LoggingContext::isolated(Severity::Warn, Arc::new(RecordingSink::new()));
        assert_eq!(ctx.global_level().get(), Severity::Warn);
        assert!(ctx.resolver().providers().is_empty());
    }

    #[test]
    fn session_store_is_shared() {
        let a = session_store();
        let b = session_store();
        a.set("context-test-key", "1");
        assert_eq!(b.remove("context-test-key"), Some("1".to_string()));
    }

    #[test]
    fn process_context_consults_session_first() {
        let ctx = LoggingContext::process();
        assert_eq!(ctx.resolver().providers().names().next(), Some("session"));
    }

    #[test]
    fn with_global_shares_one_level_between_contexts() {
        let shared = Arc::new(GlobalLevel::new(Severity::Fatal));
        let a = LoggingContext::isolated(Severity::Log, Arc::new(RecordingSink::new()))
            .with_global(shared.clone());
        let b = LoggingContext::isolated(Severity::Log, Arc::new(RecordingSink::new()))
            .with_global(shared.clone());

        a.global_level().set(Severity::Warn);
        assert_eq!(b.global_level().get(), Severity::Warn);
        assert_eq!(shared.get(), Severity::Warn);
    }

    #[test]
    fn with_sink_replaces_sink() {
        let recorder = RecordingSink::new();
        let console = Arc::new(ConsoleSink::with_styling(false));
        let ctx =
            LoggingContext::isolated(Severity::Log, console).with_sink(Arc::new(recorder.clone()));
        ctx.sink().log(&[serde_json::json!("x")]);
        assert_eq!(recorder.len(), 1);
    }
}
