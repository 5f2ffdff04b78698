//! Response definitions
//!
//! Represents responses to clients.

use bytes::Bytes;

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Status {
    Ok = 200,
    Found = 302,
    NotFound = 404,
    PayloadTooLarge = 413,
    InternalServerError = 500,
}

impl Status {
    /// Numeric HTTP status code
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// A response to send to client
#[derive(Debug, Clone)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Content-Type header, if the response has a body
    pub content_type: Option<&'static str>,

    /// Location header for redirects
    pub location: Option<String>,

    /// Response body
    pub body: Bytes,
}

impl Response {
    pub const HTML: &'static str = "text/html; charset=utf-8";
    pub const TEXT: &'static str = "text/plain; charset=utf-8";

    /// Create a 200 response with an HTML document
    pub fn html(document: String) -> Self {
        Self {
            status: Status::Ok,
            content_type: Some(Self::HTML),
            location: None,
            body: Bytes::from(document),
        }
    }

    /// Create a 302 redirect
    pub fn redirect(location: impl Into<String>) -> Self {
        Self {
            status: Status::Found,
            content_type: None,
            location: Some(location.into()),
            body: Bytes::new(),
        }
    }

    /// Create a NOT_FOUND response
    pub fn not_found() -> Self {
        Self::error(Status::NotFound, "404 page not found")
    }

    /// Create a plain-text error response
    pub fn error(status: Status, message: &str) -> Self {
        Self {
            status,
            content_type: Some(Self::TEXT),
            location: None,
            body: Bytes::from(format!("{}\n", message)),
        }
    }

    /// Body as text (lossy), mostly for logs and tests
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
