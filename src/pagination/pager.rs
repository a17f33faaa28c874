//! Generic offset-cursor pager
//!
//! One pager type serves every paginated list endpoint; the endpoint is
//! supplied as a [`PageFetcher`].

use super::cursor::next_offset;
use super::types::{PageFetcher, PageOptions};
use crate::error::{Error, Result};
use futures::stream::{self, Stream};
use std::collections::HashSet;
use tracing::debug;

/// Walks a paginated list endpoint page by page
///
/// State machine: `Ready -> Fetching -> {Ready | Exhausted}`. `Exhausted` is
/// terminal. `get_next` takes `&mut self`, so a pager never has two fetches
/// in flight.
pub struct Pager<F: PageFetcher> {
    fetcher: F,
    options: F::Options,
    has_next: bool,
    /// Offsets already followed; a repeat would loop forever
    followed: HashSet<i64>,
    total_count: Option<i64>,
    pages_fetched: u32,
}

impl<F: PageFetcher> Pager<F> {
    /// Create a pager for `fetcher` starting from `options`
    ///
    /// Required filters are validated here so mistakes surface before any
    /// I/O. The offset belongs to the pager and must not be preset.
    pub fn new(fetcher: F, options: F::Options) -> Result<Self> {
        options.validate()?;

        if options.offset().is_some() {
            return Err(Error::invalid_argument(
                "the 'offset' option must not be set when paging; the pager manages it",
            ));
        }

        Ok(Self {
            fetcher,
            options,
            has_next: true,
            followed: HashSet::new(),
            total_count: None,
            pages_fetched: 0,
        })
    }

    /// True until a page without a continuation link has been fetched
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Total item count reported by the most recent page that carried one
    pub fn total_count(&self) -> Option<i64> {
        self.total_count
    }

    /// Number of pages fetched successfully so far
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Options that will be sent with the next request
    pub fn options(&self) -> &F::Options {
        &self.options
    }

    /// Fetch the next page
    ///
    /// A fetch failure leaves the pager ready, so the same page can be
    /// requested again. A malformed or repeating cursor exhausts it.
    pub async fn get_next(&mut self) -> Result<Vec<F::Item>> {
        if !self.has_next {
            return Err(Error::NoMorePages);
        }

        let page = self
            .fetcher
            .fetch_page(&self.options)
            .await
            .map_err(Error::fetch)?;
        self.pages_fetched += 1;
        if page.total_count.is_some() {
            self.total_count = page.total_count;
        }

        match next_offset(page.next.as_ref()) {
            Ok(Some(offset)) => {
                if !self.followed.insert(offset) {
                    self.has_next = false;
                    let href = page.next.and_then(|link| link.href).unwrap_or_default();
                    return Err(Error::malformed_cursor(
                        href,
                        format!("offset {offset} was already followed; cursor did not advance"),
                    ));
                }
                self.options.set_offset(offset);
            }
            Ok(None) => self.has_next = false,
            Err(e) => {
                self.has_next = false;
                return Err(e);
            }
        }

        debug!(
            page = self.pages_fetched,
            items = page.items.len(),
            has_next = self.has_next,
            "Fetched page"
        );

        Ok(page.items)
    }

    /// Drain every remaining page into one vector, in page order
    ///
    /// All-or-nothing: the first error is returned and items gathered so far
    /// are dropped.
    pub async fn get_all(mut self) -> Result<Vec<F::Item>> {
        let mut all = Vec::new();
        while self.has_next {
            let mut page = self.get_next().await?;
            all.append(&mut page);
        }
        Ok(all)
    }

    /// Turn the remaining pages into a stream
    ///
    /// The stream ends after the final page, or right after yielding the
    /// first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<F::Item>>> {
        stream::try_unfold(self, |mut pager| async move {
            if !pager.has_next() {
                return Ok(None);
            }
            let page = pager.get_next().await?;
            Ok(Some((page, pager)))
        })
    }
}

impl<F: PageFetcher> std::fmt::Debug for Pager<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("has_next", &self.has_next)
            .field("offset", &self.options.offset())
            .field("pages_fetched", &self.pages_fetched)
            .field("total_count", &self.total_count)
            .finish_non_exhaustive()
    }
}
