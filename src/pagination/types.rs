//! Pagination types and traits
//!
//! Defines the page envelope and the fetcher seam the pager drives.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::marker::PhantomData;

/// A link object (`{ "href": "..." }`) in a list response
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HrefLink {
    /// Target URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl HrefLink {
    /// Create a link pointing at `href`
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
        }
    }
}

/// One decoded page of a list endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items on this page, in server order
    pub items: Vec<T>,
    /// Total matching items, when the server reports it
    pub total_count: Option<i64>,
    /// Link to the next page; `None` on the final page
    pub next: Option<HrefLink>,
}

impl<T> Page<T> {
    /// Create a final page (no `next` link)
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            total_count: None,
            next: None,
        }
    }

    /// Create a page that links to `next_href`
    pub fn with_next(items: Vec<T>, next_href: impl Into<String>) -> Self {
        Self {
            items,
            total_count: None,
            next: Some(HrefLink::new(next_href)),
        }
    }

    /// Set the reported total count
    #[must_use]
    pub fn total_count(mut self, total: i64) -> Self {
        self.total_count = Some(total);
        self
    }
}

/// Request options for a paginated list call
///
/// The pager validates the options once at construction and afterwards only
/// ever touches the offset; every other field is sent verbatim on each page.
pub trait PageOptions {
    /// Check required filter fields (e.g. account or group id)
    fn validate(&self) -> Result<()>;

    /// Current offset, if set
    fn offset(&self) -> Option<i64>;

    /// Replace the offset for the next request
    fn set_offset(&mut self, offset: i64);
}

/// Performs one round trip for one page of a specific list endpoint
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Options type of the list call
    type Options: PageOptions + Send + Sync;
    /// Item type of the list
    type Item: Send;

    /// Fetch the page described by `options`
    async fn fetch_page(&self, options: &Self::Options) -> Result<Page<Self::Item>>;
}

/// A [`PageFetcher`] backed by an async closure
///
/// Built with [`fetch_fn`].
pub struct FnFetcher<O, T, F> {
    f: F,
    _marker: PhantomData<fn(O) -> T>,
}

/// Wrap an async closure taking a copy of the options as a [`PageFetcher`]
pub fn fetch_fn<O, T, F, Fut>(f: F) -> FnFetcher<O, T, F>
where
    F: Fn(O) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Page<T>>> + Send,
{
    FnFetcher {
        f,
        _marker: PhantomData,
    }
}

#[async_trait]
impl<O, T, F, Fut> PageFetcher for FnFetcher<O, T, F>
where
    O: PageOptions + Clone + Send + Sync,
    T: Send,
    F: Fn(O) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Page<T>>> + Send,
{
    type Options = O;
    type Item = T;

    async fn fetch_page(&self, options: &O) -> Result<Page<T>> {
        (self.f)(options.clone()).await
    }
}

impl<O, T, F> std::fmt::Debug for FnFetcher<O, T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnFetcher").finish_non_exhaustive()
    }
}
