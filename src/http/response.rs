//! Decoded service response

use reqwest::header::HeaderMap;

/// A decoded response together with its status and headers
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// Decoded body
    pub result: T,
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
}

impl<T> ApiResponse<T> {
    /// Wrap a decoded body
    pub fn new(result: T, status: u16, headers: HeaderMap) -> Self {
        Self {
            result,
            status,
            headers,
        }
    }

    /// The `ETag` header, used as `If-Match` on later updates
    pub fn etag(&self) -> Option<&str> {
        self.header("etag")
    }

    /// A response header as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Drop status and headers
    pub fn into_result(self) -> T {
        self.result
    }

    /// Transform the decoded body
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            result: f(self.result),
            status: self.status,
            headers: self.headers,
        }
    }
}
