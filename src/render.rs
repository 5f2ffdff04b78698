//! Link Renderer
//!
//! Turns a page's raw body into hypertext, rewriting every `[Title]` token
//! into a link to that page's view route.
//!
//! ## Rules
//! - Tokens are the shortest `[` ... `]` runs, scanned left to right without
//!   overlap. A `[` with no closing `]` stays literal text.
//! - Tokens never span a line break.
//! - The token is sliced between its delimiters (brackets inside a token
//!   are kept), then HTML-escaped for both the `href` and the label.
//! - Text between tokens is HTML-escaped, so plain prose passes unchanged.
//! - `[]` renders as `<a href="/view/"></a>`.
//!
//! Rendering is not idempotent: feeding rendered output back in escapes the
//! anchors a second time. Render once per request.

use std::fmt;

use html_escape::{encode_double_quoted_attribute_to_string, encode_text_to_string};
use regex::Regex;

use crate::error::{Result, WikiError};
use crate::routing::Operation;

/// Non-greedy bracket token
pub const LINK_PATTERN: &str = r"\[(.*?)\]";

/// Hypertext built from escaped fragments, safe to emit without escaping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Html(String);

impl Html {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rewrites bracket tokens into view links
#[derive(Debug, Clone)]
pub struct LinkRenderer {
    pattern: Regex,
}

impl LinkRenderer {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(LINK_PATTERN)
            .map_err(|e| WikiError::Config(format!("invalid link pattern: {}", e)))?;
        Ok(Self { pattern })
    }

    /// Render a raw body. Invalid UTF-8 is replaced with U+FFFD.
    pub fn render(&self, body: &[u8]) -> Html {
        let text = String::from_utf8_lossy(body);
        let mut out = String::with_capacity(text.len() + text.len() / 4);
        let mut last = 0;

        for caps in self.pattern.captures_iter(&text) {
            let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            encode_text_to_string(&text[last..whole.start()], &mut out);
            push_link(&mut out, token.as_str());
            last = whole.end();
        }
        encode_text_to_string(&text[last..], &mut out);

        Html(out)
    }
}

fn push_link(out: &mut String, token: &str) {
    out.push_str("<a href=\"");
    encode_double_quoted_attribute_to_string(Operation::View.path_for(token), out);
    out.push_str("\">");
    encode_text_to_string(token, out);
    out.push_str("</a>");
}
