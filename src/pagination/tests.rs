//! Tests for pagination module

use super::*;
use crate::error::{Error, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use test_case::test_case;

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct ListOptions {
    account_id: String,
    sort: Option<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl ListOptions {
    fn new(account_id: &str) -> Self {
        Self {
            account_id: account_id.to_string(),
            sort: None,
            limit: None,
            offset: None,
        }
    }
}

impl PageOptions for ListOptions {
    fn validate(&self) -> Result<()> {
        if self.account_id.is_empty() {
            return Err(Error::invalid_argument("account_id must be set"));
        }
        Ok(())
    }

    fn offset(&self) -> Option<i64> {
        self.offset
    }

    fn set_offset(&mut self, offset: i64) {
        self.offset = Some(offset);
    }
}

/// Serves a fixed dataset in pages of `page_size`, recording each request
struct DatasetFetcher {
    items: Vec<&'static str>,
    page_size: usize,
    requests: Arc<Mutex<Vec<ListOptions>>>,
}

impl DatasetFetcher {
    fn new(items: Vec<&'static str>, page_size: usize) -> Self {
        Self {
            items,
            page_size,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl PageFetcher for DatasetFetcher {
    type Options = ListOptions;
    type Item = &'static str;

    async fn fetch_page(&self, options: &ListOptions) -> Result<Page<&'static str>> {
        self.requests.lock().unwrap().push(options.clone());

        let start = options.offset.unwrap_or(0) as usize;
        if start > self.items.len() {
            return Err(Error::http_status(404, "offset out of range"));
        }
        let end = (start + self.page_size).min(self.items.len());
        let items = self.items[start..end].to_vec();

        let page = if end < self.items.len() {
            Page::with_next(
                items,
                format!(
                    "https://iam.example.com/v2/groups?account_id={}&limit={}&offset={end}",
                    options.account_id, self.page_size
                ),
            )
        } else {
            Page::last(items)
        };
        Ok(page.total_count(self.items.len() as i64))
    }
}

// ============================================================================
// Offset Extraction Tests
// ============================================================================

#[test_case("https://host/path?offset=135", Some(135) ; "absolute href")]
#[test_case("https://host/path?limit=10&offset=20", Some(20) ; "offset after other params")]
#[test_case("/v2/groups?account_id=abc&offset=40", Some(40) ; "relative href")]
#[test_case("https://host/path?offset=0", Some(0) ; "zero offset")]
#[test_case("https://host/path?offset=-5", Some(-5) ; "negative offset")]
#[test_case("https://host/path", None ; "no query")]
#[test_case("https://host/path?limit=10", None ; "no offset param")]
fn test_offset_from_href(href: &str, expected: Option<i64>) {
    assert_eq!(offset_from_href(href).unwrap(), expected);
}

#[test_case("https://host/path?offset=tiger" ; "non numeric")]
#[test_case("https://host/path?offset=" ; "empty value")]
#[test_case("https://host/path?offset=1.5" ; "fractional")]
#[test_case("http://[::1/groups?offset=5" ; "unparseable url")]
fn test_offset_from_href_malformed(href: &str) {
    let err = offset_from_href(href).unwrap_err();
    assert!(
        matches!(err, Error::MalformedCursor { ref href, .. } if !href.is_empty()),
        "unexpected error: {err}"
    );
}

#[test]
fn test_next_offset_without_link() {
    assert_eq!(next_offset(None).unwrap(), None);
    assert_eq!(next_offset(Some(&HrefLink::default())).unwrap(), None);
}

#[test]
fn test_next_offset_with_link() {
    let link = HrefLink::new("https://host/v2/groups?offset=135");
    assert_eq!(next_offset(Some(&link)).unwrap(), Some(135));
}

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_pager_requires_filters() {
    let err = Pager::new(DatasetFetcher::new(vec![], 1), ListOptions::new("")).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[test]
fn test_pager_rejects_preset_offset() {
    let mut options = ListOptions::new("acct");
    options.offset = Some(10);

    let err = Pager::new(DatasetFetcher::new(vec![], 1), options).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[test]
fn test_pager_starts_ready() {
    let pager = Pager::new(DatasetFetcher::new(vec!["a"], 1), ListOptions::new("acct")).unwrap();
    assert!(pager.has_next());
    assert_eq!(pager.pages_fetched(), 0);
    assert!(pager.total_count().is_none());
}

// ============================================================================
// Paging Tests
// ============================================================================

#[tokio::test]
async fn test_two_single_item_pages() {
    let pager = Pager::new(
        DatasetFetcher::new(vec!["first", "second"], 1),
        ListOptions::new("acct"),
    )
    .unwrap();

    let all = pager.get_all().await.unwrap();
    assert_eq!(all, vec!["first", "second"]);
}

#[tokio::test]
async fn test_empty_first_page() {
    let mut pager =
        Pager::new(DatasetFetcher::new(vec![], 10), ListOptions::new("acct")).unwrap();

    assert!(pager.has_next());
    let page = pager.get_next().await.unwrap();
    assert!(page.is_empty());
    assert!(!pager.has_next());
}

#[tokio::test]
async fn test_get_next_after_exhaustion_does_not_fetch() {
    let fetcher = DatasetFetcher::new(vec!["a", "b"], 1);
    let requests = fetcher.requests.clone();
    let mut pager = Pager::new(fetcher, ListOptions::new("acct")).unwrap();

    assert_eq!(pager.get_next().await.unwrap(), vec!["a"]);
    assert_eq!(pager.get_next().await.unwrap(), vec!["b"]);
    assert!(!pager.has_next());

    let err = pager.get_next().await.unwrap_err();
    assert!(matches!(err, Error::NoMorePages));
    assert_eq!(requests.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_all_matches_manual_loop() {
    let items = vec!["a", "b", "c", "d", "e"];

    let mut manual = Vec::new();
    let mut pager =
        Pager::new(DatasetFetcher::new(items.clone(), 2), ListOptions::new("acct")).unwrap();
    while pager.has_next() {
        manual.extend(pager.get_next().await.unwrap());
    }

    let pager = Pager::new(DatasetFetcher::new(items.clone(), 2), ListOptions::new("acct")).unwrap();
    let all = pager.get_all().await.unwrap();

    assert_eq!(all, manual);
    assert_eq!(all, items);
}

#[tokio::test]
async fn test_identical_options_yield_identical_pages() {
    async fn pages(options: ListOptions) -> Vec<Vec<&'static str>> {
        let mut pager =
            Pager::new(DatasetFetcher::new(vec!["a", "b", "c"], 2), options).unwrap();
        let mut pages = Vec::new();
        while pager.has_next() {
            pages.push(pager.get_next().await.unwrap());
        }
        pages
    }

    let mut options = ListOptions::new("acct");
    options.sort = Some("name".to_string());

    let first = pages(options.clone()).await;
    let second = pages(options).await;
    assert_eq!(first, second);
    assert_eq!(first, vec![vec!["a", "b"], vec!["c"]]);
}

#[tokio::test]
async fn test_caller_filters_preserved_across_pages() {
    let fetcher = DatasetFetcher::new(vec!["a", "b", "c", "d", "e"], 2);
    let requests = fetcher.requests.clone();

    let mut options = ListOptions::new("acct");
    options.sort = Some("-name".to_string());
    options.limit = Some(2);

    let pager = Pager::new(fetcher, options).unwrap();
    pager.get_all().await.unwrap();

    let requests = requests.lock().unwrap();
    let offsets: Vec<_> = requests.iter().map(|r| r.offset).collect();
    assert_eq!(offsets, vec![None, Some(2), Some(4)]);
    for request in requests.iter() {
        assert_eq!(request.account_id, "acct");
        assert_eq!(request.sort.as_deref(), Some("-name"));
        assert_eq!(request.limit, Some(2));
    }
}

#[tokio::test]
async fn test_total_count_tracked() {
    let mut pager =
        Pager::new(DatasetFetcher::new(vec!["a", "b", "c"], 2), ListOptions::new("acct")).unwrap();
    pager.get_next().await.unwrap();

    assert_eq!(pager.total_count(), Some(3));
    assert_eq!(pager.pages_fetched(), 1);
    assert_eq!(pager.options().offset, Some(2));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_error_is_wrapped_and_retryable() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let fetcher = fetch_fn(move |_options: ListOptions| {
        let attempt = counter.fetch_add(1, Ordering::SeqCst);
        async move {
            if attempt == 0 {
                Err(Error::http_status(503, "unavailable"))
            } else {
                Ok(Page::last(vec![1, 2]))
            }
        }
    });

    let mut pager = Pager::new(fetcher, ListOptions::new("acct")).unwrap();

    let err = pager.get_next().await.unwrap_err();
    assert!(matches!(err, Error::Fetch { .. }));
    assert_eq!(err.status(), Some(503));
    assert!(pager.has_next());

    assert_eq!(pager.get_next().await.unwrap(), vec![1, 2]);
    assert!(!pager.has_next());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_malformed_cursor_is_reported() {
    let fetcher = fetch_fn(|_options: ListOptions| async {
        Ok::<_, Error>(Page::with_next(vec!["a"], "https://host/groups?offset=tiger"))
    });

    let mut pager = Pager::new(fetcher, ListOptions::new("acct")).unwrap();

    let err = pager.get_next().await.unwrap_err();
    assert!(matches!(err, Error::MalformedCursor { .. }));
    assert!(!pager.has_next());
}

#[tokio::test]
async fn test_next_link_without_offset_ends_paging() {
    let fetcher = fetch_fn(|_options: ListOptions| async {
        Ok::<_, Error>(Page::with_next(vec!["a"], "https://host/groups?limit=50"))
    });

    let mut pager = Pager::new(fetcher, ListOptions::new("acct")).unwrap();

    assert_eq!(pager.get_next().await.unwrap(), vec!["a"]);
    assert!(!pager.has_next());
}

#[tokio::test]
async fn test_negative_offset_link_is_followed() {
    let fetcher = fetch_fn(|options: ListOptions| async move {
        match options.offset {
            None => Ok::<_, Error>(Page::with_next(vec!["a"], "https://host/groups?offset=-1")),
            Some(-1) => Ok(Page::last(vec!["b"])),
            Some(other) => Err(Error::http_status(404, format!("unexpected offset {other}"))),
        }
    });

    let pager = Pager::new(fetcher, ListOptions::new("acct")).unwrap();

    assert_eq!(pager.get_all().await.unwrap(), vec!["a", "b"]);
}

#[tokio::test]
async fn test_repeating_cursor_terminates() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let fetcher = fetch_fn(move |_options: ListOptions| {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Ok::<_, Error>(Page::with_next(vec!["again"], "https://host/groups?offset=1")) }
    });

    let pager = Pager::new(fetcher, ListOptions::new("acct")).unwrap();

    let err = pager.get_all().await.unwrap_err();
    assert!(matches!(err, Error::MalformedCursor { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_get_all_is_all_or_nothing() {
    let fetcher = fetch_fn(|options: ListOptions| async move {
        match options.offset {
            None => Ok(Page::with_next(vec!["a"], "https://host/groups?offset=1")),
            Some(_) => Err(Error::http_status(500, "boom")),
        }
    });

    let pager = Pager::new(fetcher, ListOptions::new("acct")).unwrap();

    let err = pager.get_all().await.unwrap_err();
    assert!(matches!(err, Error::Fetch { .. }));
}

// ============================================================================
// Stream Tests
// ============================================================================

#[tokio::test]
async fn test_into_stream_yields_pages_in_order() {
    let pager =
        Pager::new(DatasetFetcher::new(vec!["a", "b", "c"], 2), ListOptions::new("acct")).unwrap();

    let pages: Vec<Vec<&str>> = pager.into_stream().try_collect().await.unwrap();
    assert_eq!(pages, vec![vec!["a", "b"], vec!["c"]]);
}

#[tokio::test]
async fn test_into_stream_stops_after_error() {
    let fetcher = fetch_fn(|_options: ListOptions| async {
        Ok::<_, Error>(Page::with_next(vec!["a"], "https://host/groups?offset=oops"))
    });
    let pager = Pager::new(fetcher, ListOptions::new("acct")).unwrap();

    let results: Vec<Result<Vec<&str>>> = futures::StreamExt::collect(pager.into_stream()).await;
    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(Error::MalformedCursor { .. })));
}
