//! Routing Module
//!
//! Maps request paths onto page operations.
//!
//! ## Route Table
//! ```text
//! /                    → Index (redirect to the default page)
//! /view/<title>        → View
//! /edit/<title>        → Edit
//! /save/<title>        → Save
//! anything else        → RouteNotMatched (404)
//! ```
//!
//! Titles are `[a-zA-Z0-9_]+`. Every title that leaves this module is
//! therefore a single safe path component.

mod route;
mod matcher;

pub use route::{Operation, Route};
pub use matcher::{is_valid_title, RouteMatcher};
