//! Page Model
//!
//! One wiki page as handled during a single request.

use bytes::Bytes;
use minijinja::Value;
use serde::Serialize;

use crate::render::{Html, LinkRenderer};

/// A page: title, raw body and, once rendered, its hypertext.
///
/// Pages live for one request. The title is trusted to have passed the
/// route matcher; the page itself does not re-check it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page title (also the storage key and URL segment)
    pub title: String,

    /// Raw body exactly as submitted
    pub body: Bytes,

    /// Link-annotated hypertext, only present after `render_with`
    rendered: Option<Html>,
}

impl Page {
    /// Create a page from a title and raw body
    pub fn new(title: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            rendered: None,
        }
    }

    /// A page with no content yet
    pub fn empty(title: impl Into<String>) -> Self {
        Self::new(title, Bytes::new())
    }

    /// Compute the hypertext from the current body
    pub fn render_with(mut self, renderer: &LinkRenderer) -> Self {
        self.rendered = Some(renderer.render(&self.body));
        self
    }

    pub fn rendered(&self) -> Option<&Html> {
        self.rendered.as_ref()
    }

    /// Body as text for the edit form
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Values exposed to templates
    pub fn context(&self) -> PageContext<'_> {
        PageContext {
            title: &self.title,
            body: self.body_text(),
            html: self
                .rendered
                .as_ref()
                .map(|html| Value::from_safe_string(html.as_str().to_string())),
        }
    }
}

/// Template context for a page.
///
/// `html` is a safe string and is emitted as is; `title` and `body` are
/// auto-escaped by the templates.
#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    pub title: &'a str,
    pub body: String,
    pub html: Option<Value>,
}
