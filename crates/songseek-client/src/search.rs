//! The search service.
//!
//! [`SongSearch`] runs one fetch and one normalization pass per call. It
//! holds no mutable state, so a single instance can serve concurrent calls.
//! Failures never escape: they are reported to the diagnostic sink and
//! folded into the returned [`SearchOutcome`].

use std::sync::Arc;

use songseek_core::{normalize, DiagnosticSink, LogSink, SearchOptions, SearchOutcome};

use crate::config::Config;
use crate::error::FetchResult;
use crate::fetcher::{Fetcher, GeniusClient};

/// Fetches and normalizes song searches.
#[derive(Debug)]
pub struct SongSearch<F> {
    fetcher: F,
    sink: Arc<dyn DiagnosticSink>,
}

impl<F: Fetcher> SongSearch<F> {
    /// Create a search service that reports to the `log` facade.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            sink: Arc::new(LogSink),
        }
    }

    /// Replace the diagnostic sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Search for songs matching `query`.
    pub async fn search(&self, query: &str, options: &SearchOptions) -> SearchOutcome {
        let payload = match self.fetcher.fetch(query).await {
            Ok(payload) => payload,
            Err(e) => {
                self.sink.warn(&format!("search for {:?} failed: {}", query, e));
                return SearchOutcome::failed(e.to_string());
            }
        };

        self.sink.debug(&format!(
            "search for {:?} returned {} sections",
            query,
            payload.sections().len()
        ));

        let outcome = normalize(&payload, options, self.sink.as_ref());

        match &outcome.empty_reason {
            Some(reason) => self
                .sink
                .debug(&format!("search for {:?}: {}", query, reason)),
            None => self.sink.debug(&format!(
                "search for {:?}: {} results",
                query,
                outcome.len()
            )),
        }

        outcome
    }
}

impl SongSearch<GeniusClient> {
    /// Build a search service against the configured endpoint.
    pub fn from_config(config: &Config) -> FetchResult<Self> {
        Ok(Self::new(GeniusClient::from_config(config)?))
    }
}

/// One-shot search against the public endpoint with default settings.
///
/// Even a failure to build the HTTP client is reported through the outcome.
pub async fn search(query: &str, options: &SearchOptions) -> SearchOutcome {
    match GeniusClient::new() {
        Ok(client) => SongSearch::new(client).search(query, options).await,
        Err(e) => {
            LogSink.warn(&format!("could not create HTTP client: {}", e));
            SearchOutcome::failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use log::Level;
    use serde_json::json;
    use songseek_core::{EmptyReason, MemorySink, MissingLimitPolicy, SearchPayload};

    use crate::error::FetchError;

    #[derive(Debug)]
    struct StaticFetcher(serde_json::Value);

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch(&self, _query: &str) -> FetchResult<SearchPayload> {
            SearchPayload::from_value(self.0.clone()).map_err(|e| FetchError::Parse {
                source_name: "static".to_string(),
                message: e.to_string(),
            })
        }
    }

    #[derive(Debug)]
    struct FailingFetcher;

    #[async_trait]
    impl Fetcher for FailingFetcher {
        async fn fetch(&self, _query: &str) -> FetchResult<SearchPayload> {
            Err(FetchError::Http {
                source_name: "Genius".to_string(),
                message: "HTTP status server error (502 Bad Gateway)".to_string(),
            })
        }
    }

    fn two_songs() -> serde_json::Value {
        json!({
            "meta": {"status": 200},
            "response": {"sections": [
                {"type": "song", "hits": [
                    {"type": "song", "result": {"title": "One"}},
                    {"type": "song", "result": {"title": "Two"}}
                ]}
            ]}
        })
    }

    #[tokio::test]
    async fn test_search_with_limit() {
        let search = SongSearch::new(StaticFetcher(two_songs()));
        let outcome = search
            .search("anything", &SearchOptions::new().with_limit(1))
            .await;

        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.songs[0].title, "One");
    }

    #[tokio::test]
    async fn test_search_without_limit_withholds() {
        let sink = Arc::new(MemorySink::new());
        let search = SongSearch::new(StaticFetcher(two_songs()))
            .with_sink(Arc::clone(&sink) as Arc<dyn DiagnosticSink>);

        let outcome = search.search("anything", &SearchOptions::new()).await;

        assert_eq!(
            outcome.empty_reason,
            Some(EmptyReason::LimitNotSupplied { matched: 2 })
        );
        assert!(sink.messages_at(Level::Warn).is_empty());
    }

    #[tokio::test]
    async fn test_search_return_all_policy() {
        let search = SongSearch::new(StaticFetcher(two_songs()));
        let options = SearchOptions::new().with_missing_limit(MissingLimitPolicy::ReturnAll);

        let outcome = search.search("anything", &options).await;
        assert_eq!(outcome.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_absorbed_and_reported() {
        let sink = Arc::new(MemorySink::new());
        let search = SongSearch::new(FailingFetcher)
            .with_sink(Arc::clone(&sink) as Arc<dyn DiagnosticSink>);

        let outcome = search
            .search("Bohemian Rhapsody", &SearchOptions::new().with_limit(5))
            .await;

        assert!(outcome.is_failure());
        assert!(outcome.is_empty());
        let warnings = sink.messages_at(Level::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("\"Bohemian Rhapsody\""));
        assert!(warnings[0].contains("502 Bad Gateway"));
        assert_eq!(outcome.into_songs(), None);
    }

    #[tokio::test]
    async fn test_concurrent_searches_do_not_interact() {
        let search = Arc::new(SongSearch::new(StaticFetcher(two_songs())));
        let limited = SearchOptions::new().with_limit(1);
        let uncapped = SearchOptions::new().with_missing_limit(MissingLimitPolicy::ReturnAll);

        let (a, b) = tokio::join!(
            search.search("first", &limited),
            search.search("second", &uncapped)
        );

        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_from_config() {
        let search = SongSearch::from_config(&Config::default()).unwrap();
        assert_eq!(
            search.fetcher().endpoint(),
            crate::fetcher::GENIUS_SEARCH_ENDPOINT
        );
    }
}
