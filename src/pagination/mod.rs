//! Pagination module
//!
//! Offset-cursor pagination over the provider's list endpoints.
//!
//! # Overview
//!
//! List endpoints return one page of items plus a `next` link whose href
//! carries the `offset` of the following page. A [`Pager`] drives a
//! [`PageFetcher`] page by page, parses that offset out of the link, and
//! stops when a page comes back without one.
//!
//! ```rust,ignore
//! let mut pager = service.list_access_groups_pager(options)?;
//! while pager.has_next() {
//!     for group in pager.get_next().await? {
//!         println!("{:?}", group.name);
//!     }
//! }
//! ```

mod cursor;
mod pager;
mod types;

pub use cursor::{next_offset, offset_from_href};
pub use pager::Pager;
pub use types::{fetch_fn, FnFetcher, HrefLink, Page, PageFetcher, PageOptions};

#[cfg(test)]
mod tests;
