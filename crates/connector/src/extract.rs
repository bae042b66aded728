//! Paged extraction with bounded retry
//!
//! Pagination and retry are modeled as an explicit state machine per
//! (resource, filter) pair:
//!
//! ```text
//! Fetching{page} --ok, records--> Fetching{page+1}   (after throttle sleep)
//! Fetching{page} --ok, empty----> Done
//! Fetching{page} --err----------> Retrying{page, attempt 2}
//! Retrying       --err----------> Retrying{attempt+1} | Exhausted
//! ```
//!
//! `Retrying` is bounded by the configured attempt count; `Exhausted`
//! yields whatever was accumulated instead of an error. Termination is
//! driven solely by receiving an empty page - the page index advances by
//! exactly one per successful fetch.

use chrono::{Duration as ChronoDuration, Utc};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use storelens_config::ExtractConfig;
use storelens_model::{Product, SaleLineItem};

use crate::error::ConnectorError;
use crate::payload::{RawOrder, RawProduct};

/// One page request against a paged resource
#[derive(Debug, Clone)]
pub struct PageQuery {
    /// Resource path segment ("products" or "orders")
    pub resource: &'static str,
    /// 1-based page index
    pub page: u32,
    /// Records requested per page
    pub per_page: u32,
    /// ISO-8601 lower bound on creation time (orders only)
    pub after: Option<String>,
    /// Status filter, one value per walk (orders only)
    pub status: Option<String>,
}

/// Transport seam for the page walk
///
/// The real implementation is [`crate::StoreClient`]; tests drive the
/// walk with an in-memory fetcher.
pub trait FetchPages: Send + Sync {
    /// Fetch one page of raw records
    fn fetch_page(
        &self,
        query: &PageQuery,
    ) -> impl std::future::Future<Output = Result<Vec<Value>, ConnectorError>> + Send;
}

/// Result of walking one (resource, filter) pair
#[derive(Debug)]
pub struct WalkOutcome {
    /// Raw records accumulated across all fetched pages
    pub records: Vec<Value>,
    /// False when the walk was abandoned after exhausting retries;
    /// `records` then holds partial results
    pub complete: bool,
    /// Pages fetched successfully
    pub pages: u32,
}

/// Walk state per (resource, filter) pair
#[derive(Debug)]
enum WalkState {
    /// Fetching a page for the first time
    Fetching { page: u32 },
    /// Re-fetching a failed page; `attempt` is the attempt about to run
    Retrying { page: u32, attempt: u32 },
    /// Empty page received - the collection is complete
    Done,
    /// Retries exhausted - keep partial results
    Exhausted,
}

/// Extracts full collections from a paged store API
pub struct Extractor<F> {
    fetcher: F,
    config: ExtractConfig,
}

impl<F: FetchPages> Extractor<F> {
    /// Create an extractor over a page fetcher
    pub fn new(fetcher: F, config: ExtractConfig) -> Self {
        Self { fetcher, config }
    }

    /// Fetch every page of one (resource, filter) combination.
    ///
    /// Never errors: a page that keeps failing abandons the walk and the
    /// outcome carries whatever was accumulated, marked incomplete.
    pub async fn fetch_collection(
        &self,
        resource: &'static str,
        after: Option<String>,
        status: Option<String>,
    ) -> WalkOutcome {
        let mut records = Vec::new();
        let mut pages = 0u32;
        let mut state = WalkState::Fetching { page: 1 };

        let complete = loop {
            match state {
                WalkState::Fetching { page } => {
                    let query = self.query(resource, page, &after, &status);
                    state = match self.fetcher.fetch_page(&query).await {
                        Ok(batch) => {
                            self.advance(page, batch, &mut records, &mut pages).await
                        }
                        Err(e) => {
                            warn!(
                                resource,
                                page,
                                attempt = 1,
                                error = %e,
                                "page fetch failed, will retry"
                            );
                            self.next_retry(page, 1)
                        }
                    };
                }
                WalkState::Retrying { page, attempt } => {
                    tokio::time::sleep(Duration::from_secs(self.config.retry_sleep_secs)).await;
                    let query = self.query(resource, page, &after, &status);
                    state = match self.fetcher.fetch_page(&query).await {
                        Ok(batch) => {
                            self.advance(page, batch, &mut records, &mut pages).await
                        }
                        Err(e) => {
                            warn!(
                                resource,
                                page,
                                attempt,
                                error = %e,
                                "page fetch failed"
                            );
                            self.next_retry(page, attempt)
                        }
                    };
                }
                WalkState::Done => break true,
                WalkState::Exhausted => {
                    warn!(
                        resource,
                        status = status.as_deref().unwrap_or(""),
                        attempts = self.config.max_retries,
                        kept = records.len(),
                        "page retries exhausted, keeping partial results"
                    );
                    break false;
                }
            }
        };

        WalkOutcome {
            records,
            complete,
            pages,
        }
    }

    fn query(
        &self,
        resource: &'static str,
        page: u32,
        after: &Option<String>,
        status: &Option<String>,
    ) -> PageQuery {
        PageQuery {
            resource,
            page,
            per_page: self.config.per_page,
            after: after.clone(),
            status: status.clone(),
        }
    }

    /// Consume a successful page and pick the next state
    async fn advance(
        &self,
        page: u32,
        batch: Vec<Value>,
        records: &mut Vec<Value>,
        pages: &mut u32,
    ) -> WalkState {
        if batch.is_empty() {
            return WalkState::Done;
        }
        debug!(page, count = batch.len(), "page accepted");
        records.extend(batch);
        *pages += 1;
        tokio::time::sleep(Duration::from_secs(self.config.page_sleep_secs)).await;
        WalkState::Fetching { page: page + 1 }
    }

    /// Pick the state after a failed attempt
    fn next_retry(&self, page: u32, attempt: u32) -> WalkState {
        if attempt >= self.config.max_retries {
            WalkState::Exhausted
        } else {
            WalkState::Retrying {
                page,
                attempt: attempt + 1,
            }
        }
    }

    /// Fetch the full product catalog.
    ///
    /// Records that fail to deserialize are skipped with a warning -
    /// data-quality issues never abort extraction.
    pub async fn fetch_products(&self) -> Vec<Product> {
        let outcome = self.fetch_collection("products", None, None).await;
        let mut products = Vec::with_capacity(outcome.records.len());
        for record in outcome.records {
            match serde_json::from_value::<RawProduct>(record) {
                Ok(raw) => products.push(raw.into_product(&self.config.visit_meta_keys)),
                Err(e) => warn!(error = %e, "skipping malformed product record"),
            }
        }
        info!(
            count = products.len(),
            complete = outcome.complete,
            "product extraction finished"
        );
        products
    }

    /// Fetch sale line items for the configured lookback window.
    ///
    /// Iterates once per configured sale status and concatenates the
    /// results; each status walk tolerates partial failure independently.
    pub async fn fetch_sales(&self) -> Vec<SaleLineItem> {
        let after = (Utc::now() - ChronoDuration::days(i64::from(self.config.lookback_days)))
            .to_rfc3339();
        let mut items = Vec::new();

        for status in &self.config.sale_statuses {
            info!(status = %status, "extracting orders");
            let outcome = self
                .fetch_collection("orders", Some(after.clone()), Some(status.clone()))
                .await;
            for record in outcome.records {
                match serde_json::from_value::<RawOrder>(record) {
                    Ok(raw) => items.extend(raw.into_line_items()),
                    Err(e) => warn!(status = %status, error = %e, "skipping malformed order record"),
                }
            }
        }

        info!(count = items.len(), "order extraction finished");
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Scripted fetcher: one response list per status value (empty key for
    /// status-less walks), consumed page by page. Records every query.
    struct ScriptedFetcher {
        /// (status key, per-page responses); Err pages fail every attempt
        pages: Vec<(String, Vec<Result<Vec<Value>, ()>>)>,
        calls: Mutex<Vec<(String, u32)>>,
    }

    impl ScriptedFetcher {
        fn new(pages: Vec<(String, Vec<Result<Vec<Value>, ()>>)>) -> Self {
            Self {
                pages,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn single(pages: Vec<Result<Vec<Value>, ()>>) -> Self {
            Self::new(vec![(String::new(), pages)])
        }

        fn calls(&self) -> Vec<(String, u32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl FetchPages for ScriptedFetcher {
        async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Value>, ConnectorError> {
            let key = query.status.clone().unwrap_or_default();
            self.calls.lock().unwrap().push((key.clone(), query.page));
            let script = self
                .pages
                .iter()
                .find(|(s, _)| *s == key)
                .map(|(_, pages)| pages)
                .expect("unexpected status");
            match script.get(query.page as usize - 1) {
                Some(Ok(records)) => Ok(records.clone()),
                Some(Err(())) | None => Err(ConnectorError::Status {
                    status: 500,
                    resource: query.resource.to_string(),
                    page: query.page,
                }),
            }
        }
    }

    fn fast_config() -> ExtractConfig {
        ExtractConfig {
            retry_sleep_secs: 0,
            page_sleep_secs: 0,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_walk_stops_on_empty_page() {
        let fetcher = ScriptedFetcher::single(vec![
            Ok(vec![json!({"id": 1}), json!({"id": 2})]),
            Ok(vec![json!({"id": 3})]),
            Ok(vec![]),
        ]);
        let extractor = Extractor::new(fetcher, fast_config());
        let outcome = extractor.fetch_collection("products", None, None).await;

        assert!(outcome.complete);
        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.pages, 2);
        assert_eq!(
            extractor.fetcher.calls(),
            vec![(String::new(), 1), (String::new(), 2), (String::new(), 3)]
        );
    }

    #[tokio::test]
    async fn test_failing_page_attempted_exactly_max_retries_times() {
        let fetcher = ScriptedFetcher::single(vec![Err(())]);
        let extractor = Extractor::new(fetcher, fast_config());
        let outcome = extractor.fetch_collection("products", None, None).await;

        assert!(!outcome.complete);
        assert!(outcome.records.is_empty());
        // Default max_retries is 3: three attempts, all on page 1, no
        // fetch beyond it.
        assert_eq!(
            extractor.fetcher.calls(),
            vec![(String::new(), 1), (String::new(), 1), (String::new(), 1)]
        );
    }

    #[tokio::test]
    async fn test_mid_walk_failure_keeps_partial_results() {
        let fetcher = ScriptedFetcher::single(vec![
            Ok(vec![json!({"id": 1}), json!({"id": 2})]),
            Err(()),
        ]);
        let extractor = Extractor::new(fetcher, fast_config());
        let outcome = extractor.fetch_collection("products", None, None).await;

        assert!(!outcome.complete);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.pages, 1);
        // Page 1 once, page 2 three times.
        assert_eq!(extractor.fetcher.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_transient_failure_recovers_on_same_page() {
        // Page 1 responds only on the final allowed attempt.
        struct FlakyFetcher {
            calls: Mutex<u32>,
        }
        impl FetchPages for FlakyFetcher {
            async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Value>, ConnectorError> {
                let mut calls = self.calls.lock().unwrap();
                *calls += 1;
                match (query.page, *calls) {
                    (1, c) if c < 3 => Err(ConnectorError::NoPayload {
                        resource: query.resource.to_string(),
                        page: query.page,
                    }),
                    (1, _) => Ok(vec![json!({"id": 1})]),
                    _ => Ok(vec![]),
                }
            }
        }

        let extractor = Extractor::new(FlakyFetcher { calls: Mutex::new(0) }, fast_config());
        let outcome = extractor.fetch_collection("products", None, None).await;

        assert!(outcome.complete);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(*extractor.fetcher.calls.lock().unwrap(), 4);
    }

    #[tokio::test]
    async fn test_fetch_products_skips_malformed_records() {
        let fetcher = ScriptedFetcher::single(vec![
            Ok(vec![
                json!({"id": 1, "name": "Widget", "regular_price": "10"}),
                json!({"name": "no id - malformed"}),
                json!({"id": 2, "name": "Gadget"}),
            ]),
            Ok(vec![]),
        ]);
        let extractor = Extractor::new(fetcher, fast_config());
        let products = extractor.fetch_products().await;

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, 1);
        assert_eq!(products[1].id, 2);
    }

    #[tokio::test]
    async fn test_fetch_sales_iterates_every_status() {
        let order = |id: u64| {
            json!({
                "id": id,
                "status": "completed",
                "date_created": "2026-05-01T10:00:00",
                "line_items": [
                    {"product_id": 7, "name": "Widget", "quantity": 1, "price": 10.0, "total": "10.00"},
                ],
            })
        };
        let fetcher = ScriptedFetcher::new(vec![
            ("completed".into(), vec![Ok(vec![order(1), order(2)]), Ok(vec![])]),
            ("processing".into(), vec![Ok(vec![order(3)]), Ok(vec![])]),
        ]);
        let config = ExtractConfig {
            sale_statuses: vec!["completed".into(), "processing".into()],
            ..fast_config()
        };
        let extractor = Extractor::new(fetcher, config);
        let items = extractor.fetch_sales().await;

        assert_eq!(items.len(), 3);
        let calls = extractor.fetcher.calls();
        assert_eq!(calls.iter().filter(|(s, _)| s == "completed").count(), 2);
        assert_eq!(calls.iter().filter(|(s, _)| s == "processing").count(), 2);
    }

    #[tokio::test]
    async fn test_one_exhausted_status_does_not_stop_the_next() {
        let order = json!({
            "id": 9,
            "status": "processing",
            "date_created": "2026-05-01T10:00:00",
            "line_items": [
                {"product_id": 7, "name": "Widget", "quantity": 2, "price": 5.0, "total": "10.00"},
            ],
        });
        let fetcher = ScriptedFetcher::new(vec![
            ("completed".into(), vec![Err(())]),
            ("processing".into(), vec![Ok(vec![order]), Ok(vec![])]),
        ]);
        let config = ExtractConfig {
            sale_statuses: vec!["completed".into(), "processing".into()],
            ..fast_config()
        };
        let extractor = Extractor::new(fetcher, config);
        let items = extractor.fetch_sales().await;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].order_id, 9);
    }
}
