//! Configuration providers consulted for the dynamic level map.
//!
//! A [`ProviderChain`] holds providers in priority order and returns the
//! first non-empty value. The standard chain is a session [`MemoryStore`],
//! then a persistent [`FileStore`](crate::FileStore), then the process
//! environment via [`EnvProvider`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::store::FileStore;

/// A read-only key/value source.
pub trait ConfigProvider: Send + Sync {
    /// Short name used when explaining where a value came from.
    fn name(&self) -> &str;

    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
}

impl<P: ConfigProvider + ?Sized> ConfigProvider for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Session-scoped in-memory store.
///
/// Clones share the same storage, so a handle kept by the host application
/// can update values seen by every logger holding the chain.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value. Returns `false` if the store lock is poisoned.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let Ok(mut guard) = self.inner.lock() else {
            return false;
        };
        guard.insert(key.into(), value.into());
        true
    }

    /// Removes a value, returning the previous one.
    pub fn remove(&self, key: &str) -> Option<String> {
        let mut guard = self.inner.lock().ok()?;
        guard.remove(key)
    }

    /// Checks if a key exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.inner
            .lock()
            .map(|g| g.contains_key(key))
            .unwrap_or(false)
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().map(|g| g.len()).unwrap_or(0)
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.clear();
        }
    }
}

impl ConfigProvider for MemoryStore {
    fn name(&self) -> &str {
        "session"
    }

    fn get(&self, key: &str) -> Option<String> {
        let guard = self.inner.lock().ok()?;
        guard.get(key).cloned()
    }
}

/// Global fallback: the environment variable named by the key.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvProvider;

impl ConfigProvider for EnvProvider {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        if key.is_empty() || key.contains(['=', '\0']) {
            return None;
        }
        std::env::var(key).ok()
    }
}

/// Where a value was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// Name of the provider that answered.
    pub provider: String,
    /// The stored text.
    pub value: String,
}

/// Providers consulted in priority order.
#[derive(Clone, Default)]
pub struct ProviderChain {
    providers: Vec<Arc<dyn ConfigProvider>>,
}

impl ProviderChain {
    /// Creates an empty chain; every lookup misses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session store, then persistent store, then the environment.
    #[must_use]
    pub fn standard(session: MemoryStore, persistent: FileStore) -> Self {
        Self::new()
            .with(session)
            .with(persistent)
            .with(EnvProvider)
    }

    /// Appends a provider at the lowest priority.
    #[must_use]
    pub fn with<P: ConfigProvider + 'static>(mut self, provider: P) -> Self {
        self.push(Arc::new(provider));
        self
    }

    /// Appends a shared provider at the lowest priority.
    pub fn push(&mut self, provider: Arc<dyn ConfigProvider>) {
        self.providers.push(provider);
    }

    /// Number of providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no provider is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Provider names in priority order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.name())
    }

    /// First non-empty value for `key` and the provider that held it.
    ///
    /// An empty string counts as absent and the search moves on.
    #[must_use]
    pub fn locate(&self, key: &str) -> Option<Located> {
        self.providers.iter().find_map(|provider| {
            provider
                .get(key)
                .filter(|value| !value.is_empty())
                .map(|value| Located {
                    provider: provider.name().to_string(),
                    value,
                })
        })
    }

    /// First non-empty value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.locate(key).map(|found| found.value)
    }
}

impl fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
