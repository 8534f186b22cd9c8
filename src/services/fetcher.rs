use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::upstream::Upstream;
use crate::domain::snapshot::{Item, MAX_ITEMS};
use crate::error::Result;
use crate::services::page_select::{select_page, PagePolicy};

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Fetched { page: u64, items: Vec<Item> },
    Empty { reason: String },
}

impl FetchOutcome {
    pub fn items(&self) -> &[Item] {
        match self {
            FetchOutcome::Fetched { items, .. } => items,
            FetchOutcome::Empty { .. } => &[],
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, FetchOutcome::Fetched { .. })
    }
}

#[derive(Clone)]
pub struct Fetcher {
    upstream: Arc<dyn Upstream>,
    policy: PagePolicy,
}

impl Fetcher {
    pub fn new(upstream: Arc<dyn Upstream>, policy: PagePolicy) -> Self {
        Self { upstream, policy }
    }

    pub async fn fetch_category(&self, base_url: &str) -> FetchOutcome {
        match self.fetch_random_page(base_url).await {
            Ok((page, items)) => FetchOutcome::Fetched { page, items },
            Err(e) => {
                warn!(url = %base_url, error = %e, "fetch failed");
                FetchOutcome::Empty { reason: e.to_string() }
            }
        }
    }

    async fn fetch_random_page(&self, base_url: &str) -> Result<(u64, Vec<Item>)> {
        let probe = self.upstream.get_json(base_url).await?;
        let total_pages = total_pages(&probe);
        let page = select_page(self.policy, total_pages, &mut rand::thread_rng());

        let paged = paged_url(base_url, page);
        info!(url = %base_url, page, total_pages, "fetching random page");
        let body = self.upstream.get_json(&paged).await?;
        Ok((page, first_items(&body)))
    }
}

pub(crate) fn paged_url(base_url: &str, page: u64) -> String {
    let sep = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{sep}page={page}")
}

// anything unusable counts as one page
fn total_pages(body: &Value) -> i64 {
    match body.get("totalPages") {
        Some(v) => v
            .as_i64()
            .or_else(|| v.as_f64().filter(|f| f.is_finite() && *f >= 1.0).map(|f| f as i64))
            .unwrap_or(1),
        None => 1,
    }
}

fn first_items(body: &Value) -> Vec<Item> {
    body.pointer("/data/series")
        .and_then(Value::as_array)
        .map(|items| items.iter().take(MAX_ITEMS).cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::AppError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    type Responder = Box<dyn Fn(&str) -> Result<Value> + Send + Sync>;

    pub(crate) struct FakeUpstream {
        pub calls: Mutex<Vec<String>>,
        respond: Responder,
    }

    impl FakeUpstream {
        pub fn new(respond: impl Fn(&str) -> Result<Value> + Send + Sync + 'static) -> Self {
            Self { calls: Mutex::new(Vec::new()), respond: Box::new(respond) }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Upstream for FakeUpstream {
        async fn get_json(&self, url: &str) -> Result<Value> {
            self.calls.lock().unwrap().push(url.to_string());
            (self.respond)(url)
        }
    }

    pub(crate) fn page_body(n: usize) -> Value {
        let items: Vec<Value> = (0..n).map(|i| json!({ "id": i })).collect();
        json!({ "data": { "series": items } })
    }

    fn page_of(url: &str) -> u64 {
        url.rsplit("page=").next().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn truncates_to_first_fourteen_from_a_non_final_page() {
        let upstream = Arc::new(FakeUpstream::new(|url| {
            if url.contains("page=") { Ok(page_body(20)) } else { Ok(json!({ "totalPages": 5 })) }
        }));
        let fetcher = Fetcher::new(upstream.clone(), PagePolicy::ExclusiveLast);

        let outcome = fetcher.fetch_category("http://api.test/series").await;

        let FetchOutcome::Fetched { page, items } = outcome else { panic!("expected items") };
        assert_eq!(items.len(), 14);
        assert_eq!(items[0], json!({ "id": 0 }));
        assert_eq!(items[13], json!({ "id": 13 }));
        assert!((1..=4).contains(&page));

        let calls = upstream.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], "http://api.test/series");
        assert_eq!(calls[1], format!("http://api.test/series?page={page}"));
    }

    #[tokio::test]
    async fn inclusive_policy_may_request_any_page() {
        let upstream = Arc::new(FakeUpstream::new(|url| {
            if url.contains("page=") { Ok(page_body(3)) } else { Ok(json!({ "totalPages": 5 })) }
        }));
        let fetcher = Fetcher::new(upstream.clone(), PagePolicy::Inclusive);

        for _ in 0..20 {
            let outcome = fetcher.fetch_category("http://api.test/series").await;
            assert_eq!(outcome.items().len(), 3);
        }
        for url in upstream.calls().iter().filter(|u| u.contains("page=")) {
            assert!((1..=5).contains(&page_of(url)));
        }
    }

    #[tokio::test]
    async fn failed_probe_returns_empty_without_second_call() {
        let upstream = Arc::new(FakeUpstream::new(|_| {
            Err(AppError::Upstream("connection refused".into()))
        }));
        let fetcher = Fetcher::new(upstream.clone(), PagePolicy::Inclusive);

        let outcome = fetcher.fetch_category("http://api.test/series").await;

        assert!(outcome.items().is_empty());
        assert!(matches!(outcome, FetchOutcome::Empty { ref reason } if reason.contains("connection refused")));
        assert_eq!(upstream.calls().len(), 1);
    }

    #[tokio::test]
    async fn failed_page_fetch_returns_empty() {
        let upstream = Arc::new(FakeUpstream::new(|url| {
            if url.contains("page=") {
                Err(AppError::Upstream("503".into()))
            } else {
                Ok(json!({ "totalPages": 2 }))
            }
        }));
        let fetcher = Fetcher::new(upstream.clone(), PagePolicy::Inclusive);

        let outcome = fetcher.fetch_category("http://api.test/series").await;

        assert!(!outcome.is_fetched());
        assert_eq!(upstream.calls().len(), 2);
    }

    #[tokio::test]
    async fn missing_page_count_and_items_fall_back_to_defaults() {
        let upstream = Arc::new(FakeUpstream::new(|_| Ok(json!({ "unexpected": true }))));
        let fetcher = Fetcher::new(upstream.clone(), PagePolicy::ExclusiveLast);

        let outcome = fetcher.fetch_category("http://api.test/genre?genre=harem").await;

        assert_eq!(outcome, FetchOutcome::Fetched { page: 1, items: vec![] });
        assert_eq!(upstream.calls()[1], "http://api.test/genre?genre=harem&page=1");
    }

    #[test]
    fn paged_url_picks_separator() {
        assert_eq!(paged_url("http://a/series", 3), "http://a/series?page=3");
        assert_eq!(paged_url("http://a/genre?genre=harem", 3), "http://a/genre?genre=harem&page=3");
    }

    #[test]
    fn total_pages_tolerates_odd_values() {
        assert_eq!(total_pages(&json!({ "totalPages": 9 })), 9);
        assert_eq!(total_pages(&json!({ "totalPages": 4.0 })), 4);
        assert_eq!(total_pages(&json!({ "totalPages": "7" })), 1);
        assert_eq!(total_pages(&json!({ "totalPages": null })), 1);
        assert_eq!(total_pages(&json!({})), 1);
        assert_eq!(total_pages(&json!({ "totalPages": 0 })), 0);
    }
}
