//! Process-wide cache of the active locale and its string table.

use parking_lot::RwLock;
use polyglot_core::{Locale, StringTable};
use std::sync::Arc;

/// Load lifecycle of the active string table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    /// No load issued yet.
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// The cached table matches the active locale.
    Ready,
    /// The most recent load failed; the cached table is stale.
    Failed,
}

/// Point-in-time view of the cache contents.
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    /// Locale of the most recent load attempt.
    pub locale: Locale,
    /// Most recently stored table; stale after a failed load.
    pub table: Arc<StringTable>,
    /// Load lifecycle.
    pub state: LoadState,
}

#[derive(Debug)]
struct CacheInner {
    locale: Locale,
    table: Arc<StringTable>,
    state: LoadState,
}

/// Shared handle to the engine's single cache instance.
///
/// The cache is the one piece of shared mutable state in the engine: read
/// from anywhere, written only by the loader's completion path. Once the
/// state is [`LoadState::Ready`], the table and locale are a matched pair;
/// the success path writes both under one lock. A failed load keeps the
/// previous table, leaving already-rendered text valid until a reload
/// succeeds.
#[derive(Debug, Clone)]
pub struct LocaleCache {
    inner: Arc<RwLock<CacheInner>>,
}

impl LocaleCache {
    /// Create the cache with its startup locale and an empty table.
    pub fn new(locale: Locale) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CacheInner {
                locale,
                table: Arc::new(StringTable::default()),
                state: LoadState::Idle,
            })),
        }
    }

    /// Consistent snapshot of locale, table, and state.
    pub fn snapshot(&self) -> CacheSnapshot {
        let inner = self.inner.read();
        CacheSnapshot {
            locale: inner.locale.clone(),
            table: Arc::clone(&inner.table),
            state: inner.state,
        }
    }

    /// Locale of the most recent load attempt.
    pub fn active_locale(&self) -> Locale {
        self.inner.read().locale.clone()
    }

    /// Most recently stored table.
    pub fn table(&self) -> Arc<StringTable> {
        Arc::clone(&self.inner.read().table)
    }

    /// Current load lifecycle.
    pub fn state(&self) -> LoadState {
        self.inner.read().state
    }

    /// Record the start of a load; the previous table stays visible.
    pub(crate) fn mark_loading(&self, locale: &Locale) {
        let mut inner = self.inner.write();
        inner.locale = locale.clone();
        inner.state = LoadState::Loading;
    }

    /// Publish a successfully loaded table; locale and table are written
    /// together.
    pub(crate) fn store(&self, locale: &Locale, table: Arc<StringTable>) {
        let mut inner = self.inner.write();
        inner.locale = locale.clone();
        inner.table = table;
        inner.state = LoadState::Ready;
    }

    /// Record a failed load, retaining the previous table.
    pub(crate) fn mark_failed(&self) {
        self.inner.write().state = LoadState::Failed;
    }
}
