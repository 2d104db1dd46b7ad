//! The process's live logger registry.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{Level, Metadata};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Filter};

/// Registry of named loggers and their explicit severity levels.
///
/// Logger names form a `::`-separated hierarchy; a logger without an explicit
/// level inherits the nearest ancestor's, falling back to the root level.
/// Handles are cheap to clone and share one synchronized state, so the
/// registry can be mutated concurrently and consulted from the subscriber
/// filter returned by [`filter`](LoggerRegistry::filter).
///
/// Loggers come into existence either through [`register`] or by emitting an
/// event through the installed filter.
///
/// [`register`]: LoggerRegistry::register
#[derive(Debug, Clone)]
pub struct LoggerRegistry {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug)]
struct Inner {
    root_level: LevelFilter,
    loggers: HashMap<String, Option<LevelFilter>>,
}

impl LoggerRegistry {
    pub fn new(root_level: LevelFilter) -> Self {
        Self { inner: Arc::new(RwLock::new(Inner { root_level, loggers: HashMap::new() })) }
    }

    /// Bring a logger into existence with no explicit level of its own.
    pub fn register(&self, name: &str) {
        self.write().loggers.entry(name.to_string()).or_insert(None);
    }

    /// Whether the logger has ever been registered.
    pub fn exists(&self, name: &str) -> bool {
        self.read().loggers.contains_key(name)
    }

    /// The logger's own explicit level; `None` when unset or unknown.
    pub fn explicit_level(&self, name: &str) -> Option<LevelFilter> {
        self.read().loggers.get(name).copied().flatten()
    }

    /// Set or clear (`None` = inherit) the logger's explicit level, creating
    /// the logger entry if needed.
    pub fn set_level(&self, name: &str, level: Option<LevelFilter>) {
        self.write().loggers.insert(name.to_string(), level);
    }

    /// The logger's effective level: own explicit level, else the nearest
    /// ancestor's, else the root level. Never fails.
    pub fn effective_level(&self, name: &str) -> LevelFilter {
        let inner = self.read();
        let mut current = name;
        loop {
            if let Some(Some(level)) = inner.loggers.get(current) {
                return *level;
            }
            match current.rfind("::") {
                Some(idx) => current = &current[..idx],
                None => return inner.root_level,
            }
        }
    }

    pub fn root_level(&self) -> LevelFilter {
        self.read().root_level
    }

    /// Whether an event at `level` for `target` passes the effective level.
    /// Registers unseen targets, mirroring logger-on-first-use creation.
    pub fn enabled(&self, target: &str, level: Level) -> bool {
        if !self.exists(target) {
            self.register(target);
        }
        level <= self.effective_level(target)
    }

    /// A subscriber filter backed by this registry.
    pub fn filter(&self) -> RegistryFilter {
        RegistryFilter { registry: self.clone() }
    }

    // A poisoned lock still holds a usable level map; recover the guard.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new(LevelFilter::INFO)
    }
}

/// `tracing-subscriber` filter that consults a [`LoggerRegistry`], making the
/// registry the system of record for what actually gets emitted.
pub struct RegistryFilter {
    registry: LoggerRegistry,
}

impl<S> Filter<S> for RegistryFilter {
    fn enabled(&self, meta: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        self.registry.enabled(meta.target(), *meta.level())
    }
}
