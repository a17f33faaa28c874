//! Continuation cursor extraction
//!
//! The server is authoritative about where the next page begins: the offset
//! is read out of the `next` link, never computed from limit and page size.
//!
//! Two outcomes must stay distinct:
//! - `Ok(None)`: no cursor (no link, no href, or no `offset` parameter).
//!   This is normal end of data.
//! - `Err(MalformedCursor)`: a cursor is present but unusable.

use super::types::HrefLink;
use crate::error::{Error, Result};
use url::Url;

/// Query parameter carrying the continuation offset
const OFFSET_PARAM: &str = "offset";

/// Base used to resolve hrefs the server sent without scheme and host
const RELATIVE_BASE: &str = "http://localhost/";

/// Extract the offset of the next page from an optional `next` link
pub fn next_offset(next: Option<&HrefLink>) -> Result<Option<i64>> {
    match next.and_then(|link| link.href.as_deref()) {
        Some(href) => offset_from_href(href),
        None => Ok(None),
    }
}

/// Extract the `offset` query parameter from an href
pub fn offset_from_href(href: &str) -> Result<Option<i64>> {
    let url = parse_href(href)?;

    let Some(raw) = url
        .query_pairs()
        .find(|(key, _)| key == OFFSET_PARAM)
        .map(|(_, value)| value.into_owned())
    else {
        return Ok(None);
    };

    raw.parse::<i64>().map(Some).map_err(|e| {
        Error::malformed_cursor(href, format!("offset '{raw}' is not an integer: {e}"))
    })
}

fn parse_href(href: &str) -> Result<Url> {
    match Url::parse(href) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(RELATIVE_BASE)
            .and_then(|base| base.join(href))
            .map_err(|e| Error::malformed_cursor(href, e.to_string())),
        Err(e) => Err(Error::malformed_cursor(href, e.to_string())),
    }
}
