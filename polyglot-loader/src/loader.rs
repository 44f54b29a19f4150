//! Asynchronous string-table loading with shared fan-out futures.

use crate::cache::LocaleCache;
use crate::config::EngineConfig;
use crate::fetch::StringFetcher;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use polyglot_core::{Locale, LocalizeError, Result, StringTable};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Future handed to every binding attached to one load cycle.
///
/// Clones share a single execution: all attachers observe the same resolved
/// table or the same failure.
pub type TableFuture = Shared<BoxFuture<'static, Result<Arc<StringTable>>>>;

/// Fetches, parses, and caches per-locale string tables.
#[derive(Clone)]
pub struct StringTableLoader {
    config: Arc<EngineConfig>,
    fetcher: Arc<dyn StringFetcher>,
    cache: LocaleCache,
}

impl StringTableLoader {
    /// Loader over an injected transport, writing to `cache`.
    pub fn new(
        config: Arc<EngineConfig>,
        fetcher: Arc<dyn StringFetcher>,
        cache: LocaleCache,
    ) -> Self {
        Self {
            config,
            fetcher,
            cache,
        }
    }

    /// The cache this loader writes.
    pub fn cache(&self) -> &LocaleCache {
        &self.cache
    }

    /// Start loading `locale`'s string table.
    ///
    /// The returned future is shared: clone it for every party interested in
    /// this load. The load is driven to completion on a spawned task, so it
    /// runs even with no attachers and cannot be cancelled. On success the
    /// cache receives the new table and locale; on failure the cache keeps
    /// its previous table and is marked failed.
    ///
    /// Loads are not sequenced against each other: when loads for two
    /// locales overlap, the last one to complete owns the cache.
    ///
    /// Must be called from within a tokio runtime.
    pub fn load(&self, locale: &Locale) -> TableFuture {
        let endpoint = self.config.endpoint(locale);
        let dwell = self.config.settle_delay();
        let debug_enabled = self.config.debug;
        let fetcher = Arc::clone(&self.fetcher);
        let cache = self.cache.clone();
        let locale = locale.clone();

        cache.mark_loading(&locale);

        let future = async move {
            match fetch_table(fetcher.as_ref(), &endpoint, dwell).await {
                Ok(table) => {
                    let table = Arc::new(table);
                    cache.store(&locale, Arc::clone(&table));
                    if debug_enabled {
                        debug!(locale = %locale, endpoint = %endpoint, "strings loaded");
                    }
                    Ok(table)
                }
                Err(err) => {
                    cache.mark_failed();
                    if debug_enabled {
                        error!(locale = %locale, endpoint = %endpoint, %err, "string table load failed");
                    }
                    Err(err)
                }
            }
        }
        .boxed()
        .shared();

        tokio::spawn(future.clone());
        future
    }
}

/// Fetch and parse one table, honoring the settle dwell.
///
/// The dwell delays the resolution moment of success and failure alike; it
/// never changes the outcome.
async fn fetch_table(
    fetcher: &dyn StringFetcher,
    endpoint: &str,
    dwell: Option<Duration>,
) -> Result<StringTable> {
    let outcome = fetcher.fetch(endpoint).await;
    if let Some(delay) = dwell {
        tokio::time::sleep(delay).await;
    }
    let response = outcome?;
    if !response.is_success() {
        return Err(LocalizeError::Transport {
            endpoint: endpoint.to_string(),
            status: Some(response.status()),
            reason: format!("HTTP error: {}", response.status()),
        });
    }
    StringTable::from_json(response.body())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::LoadState;
    use crate::fetch::FetchResponse;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Test transport serving canned responses by endpoint.
    struct StaticFetcher {
        responses: HashMap<String, FetchResponse>,
    }

    impl StaticFetcher {
        fn new<const N: usize>(entries: [(&str, FetchResponse); N]) -> Self {
            Self {
                responses: entries
                    .into_iter()
                    .map(|(endpoint, response)| (endpoint.to_string(), response))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl StringFetcher for StaticFetcher {
        async fn fetch(&self, endpoint: &str) -> Result<FetchResponse> {
            self.responses.get(endpoint).cloned().ok_or_else(|| {
                LocalizeError::Transport {
                    endpoint: endpoint.to_string(),
                    status: None,
                    reason: "connection refused".to_string(),
                }
            })
        }
    }

    fn loader_with<const N: usize>(entries: [(&str, FetchResponse); N]) -> StringTableLoader {
        let config = Arc::new(EngineConfig::new().with_local_path("locales/"));
        let cache = LocaleCache::new(Locale::new("en_US"));
        StringTableLoader::new(config, Arc::new(StaticFetcher::new(entries)), cache)
    }

    #[tokio::test]
    async fn test_successful_load_publishes_table() {
        let loader = loader_with([(
            "locales/en_US.json",
            FetchResponse::ok(r#"{"helloString":"Hello"}"#),
        )]);

        let table = loader.load(&Locale::new("en_US")).await.unwrap();
        assert_eq!(table.get("helloString"), Some("Hello"));

        let snapshot = loader.cache().snapshot();
        assert_eq!(snapshot.state, LoadState::Ready);
        assert_eq!(snapshot.locale, Locale::new("en_US"));
        assert!(Arc::ptr_eq(&snapshot.table, &table));
    }

    #[tokio::test]
    async fn test_attachers_share_one_result() {
        let loader = loader_with([(
            "locales/en_US.json",
            FetchResponse::ok(r#"{"helloString":"Hello"}"#),
        )]);

        let future = loader.load(&Locale::new("en_US"));
        let (first, second) = futures::join!(future.clone(), future);
        assert!(Arc::ptr_eq(&first.unwrap(), &second.unwrap()));
    }

    #[tokio::test]
    async fn test_connection_failure_keeps_stale_table() {
        let loader = loader_with([(
            "locales/en_US.json",
            FetchResponse::ok(r#"{"helloString":"Hello"}"#),
        )]);

        loader.load(&Locale::new("en_US")).await.unwrap();
        let err = loader.load(&Locale::new("de_DE")).await.unwrap_err();
        assert!(matches!(err, LocalizeError::Transport { .. }));

        let snapshot = loader.cache().snapshot();
        assert_eq!(snapshot.state, LoadState::Failed);
        assert_eq!(snapshot.table.get("helloString"), Some("Hello"));
    }

    #[tokio::test]
    async fn test_error_status_is_transport_failure() {
        let loader = loader_with([("locales/en_US.json", FetchResponse::new(500, ""))]);

        let err = loader.load(&Locale::new("en_US")).await.unwrap_err();
        match err {
            LocalizeError::Transport { status, .. } => assert_eq!(status, Some(500)),
            other => panic!("expected transport error, got {other:?}"),
        }
        assert_eq!(loader.cache().state(), LoadState::Failed);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_parse_failure() {
        let loader = loader_with([("locales/en_US.json", FetchResponse::ok("not json"))]);

        let err = loader.load(&Locale::new("en_US")).await.unwrap_err();
        assert!(matches!(err, LocalizeError::Parse(_)));
        assert_eq!(loader.cache().state(), LoadState::Failed);
    }

    #[tokio::test]
    async fn test_load_marks_cache_loading_up_front() {
        let loader = loader_with([(
            "locales/de_DE.json",
            FetchResponse::ok(r#"{"helloString":"Hallo"}"#),
        )]);

        let future = loader.load(&Locale::new("de_DE"));
        assert_eq!(loader.cache().state(), LoadState::Loading);
        assert_eq!(loader.cache().active_locale(), Locale::new("de_DE"));
        future.await.unwrap();
        assert_eq!(loader.cache().state(), LoadState::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_delay_defers_resolution() {
        let config = Arc::new(
            EngineConfig::new()
                .with_local_path("locales/")
                .with_legacy_support(true),
        );
        let loader = StringTableLoader::new(
            config,
            Arc::new(StaticFetcher::new([(
                "locales/en_US.json",
                FetchResponse::ok(r#"{"helloString":"Hello"}"#),
            )])),
            LocaleCache::new(Locale::new("en_US")),
        );

        let start = tokio::time::Instant::now();
        loader.load(&Locale::new("en_US")).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(crate::DEFAULT_SETTLE_MILLS));
    }
}
