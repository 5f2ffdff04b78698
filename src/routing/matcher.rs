//! Route matcher
//!
//! Validates request paths against the compiled route pattern.

use percent_encoding::percent_decode_str;
use regex::Regex;

use super::{Operation, Route};
use crate::error::{Result, WikiError};

/// Pattern for `/<op>/<title>` paths
pub const PAGE_ROUTE_PATTERN: &str = r"^/(edit|save|view)/([a-zA-Z0-9_]+)$";

/// True if `title` is non-empty and only `[a-zA-Z0-9_]`
pub fn is_valid_title(title: &str) -> bool {
    !title.is_empty()
        && title
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Matches request paths to routes.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct RouteMatcher {
    pattern: Regex,
}

impl RouteMatcher {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(PAGE_ROUTE_PATTERN)
            .map_err(|e| WikiError::Config(format!("invalid route pattern: {}", e)))?;
        Ok(Self { pattern })
    }

    /// Match a path (no query string) to a route.
    ///
    /// The path is percent-decoded first, so `/view/Front%50age` names
    /// `FrontPage`. Escapes that decode to anything outside the title class
    /// still fail to match.
    pub fn match_path(&self, path: &str) -> Result<Route> {
        let not_matched = || WikiError::RouteNotMatched(path.to_string());
        let decoded = percent_decode_str(path)
            .decode_utf8()
            .map_err(|_| not_matched())?;

        if decoded == "/" {
            return Ok(Route::Index);
        }

        let captures = self.pattern.captures(&decoded).ok_or_else(not_matched)?;
        let op = Operation::from_segment(&captures[1]).ok_or_else(not_matched)?;

        Ok(Route::Page {
            op,
            title: captures[2].to_string(),
        })
    }
}
