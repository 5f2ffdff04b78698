//! Request definitions
//!
//! A request as the dispatcher sees it, independent of the HTTP library.

use bytes::Bytes;

use super::form::{encode_form, form_value, FORM_CONTENT_TYPE};

/// Request methods the dispatcher distinguishes in logs.
/// Routing itself is method-agnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Other(String),
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Other(name) => name,
        }
    }
}

impl From<&str> for Method {
    fn from(name: &str) -> Self {
        match name {
            "GET" => Method::Get,
            "POST" => Method::Post,
            other => Method::Other(other.to_string()),
        }
    }
}

/// A parsed request
#[derive(Debug, Clone)]
pub struct Request {
    /// Request method
    pub method: Method,

    /// URL path, without the query string
    pub path: String,

    /// Raw query string, if any
    pub query: Option<String>,

    /// Content-Type header of the body
    pub content_type: Option<String>,

    /// Raw request body
    pub body: Bytes,
}

impl Request {
    /// Create a request with no query and an empty body
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            content_type: None,
            body: Bytes::new(),
        }
    }

    /// Create a GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Create a POST request carrying an urlencoded form
    pub fn post_form(path: impl Into<String>, fields: &[(&str, &str)]) -> Self {
        Self::new(Method::Post, path)
            .with_body(Some(FORM_CONTENT_TYPE.to_string()), Bytes::from(encode_form(fields)))
    }

    /// Attach a raw query string
    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query;
        self
    }

    /// Attach a body and its content type
    pub fn with_body(mut self, content_type: Option<String>, body: Bytes) -> Self {
        self.content_type = content_type;
        self.body = body;
        self
    }

    /// Value of a form field.
    ///
    /// An urlencoded body takes precedence over the query string. The value
    /// is the decoded bytes, not necessarily UTF-8.
    pub fn form_value(&self, name: &str) -> Option<Bytes> {
        if self.has_form_body() {
            if let Some(value) = form_value(&self.body, name) {
                return Some(value);
            }
        }
        self.query
            .as_deref()
            .and_then(|query| form_value(query.as_bytes(), name))
    }

    fn has_form_body(&self) -> bool {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
            .unwrap_or(false)
    }
}
