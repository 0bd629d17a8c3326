//! Transport seam for the request cycle.
//!
//! Requests and responses are plain data so the operations layer can be
//! driven against any [`Transport`] implementation; the blocking HTTP
//! implementation lives in [`crate::http`], test doubles stay in tests.

use restmodel_core::Result;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Get the wire name of this method.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Whether parameters travel in the request body rather than the query
    /// string.
    pub const fn sends_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put)
    }
}

/// An outbound request described as plain data.
///
/// `params` are not yet encoded; the transport appends them as a query
/// string for GET/DELETE and form-encodes them into the body for POST/PUT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub params: Vec<(String, String)>,
}

/// A raw response before envelope parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Check for a 2xx status.
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// A synchronous request executor.
///
/// One call maps to exactly one request/response round-trip; there is no
/// retry or recovery at this layer.
pub trait Transport {
    /// Execute the request, blocking until the full response is read.
    fn send(&self, request: &Request) -> Result<RawResponse>;
}
