//! # pagewiki
//!
//! A small wiki server:
//! - Pages addressed by title (`[a-zA-Z0-9_]+`), stored one file each
//! - `[Title]` tokens in a page body become links to that page
//! - Three operations per page: view, edit, save
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HTTP Server                             │
//! │              (hyper, one task per connection)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Request / Response
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Dispatcher                               │
//! │        RouteMatcher → view / edit / save handlers            │
//! └───────┬──────────────────────┬──────────────────────┬───────┘
//!         │                      │                      │
//!         ▼                      ▼                      ▼
//!   ┌─────────────┐       ┌─────────────┐        ┌─────────────┐
//!   │  PageStore  │       │LinkRenderer │        │  Templates  │
//!   │ (FileStore) │       │  [x] → <a>  │        │ (minijinja) │
//!   └─────────────┘       └─────────────┘        └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod routing;
pub mod storage;
pub mod render;
pub mod page;
pub mod templates;
pub mod dispatcher;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, WikiError};
pub use config::Config;
pub use dispatcher::Dispatcher;
pub use page::Page;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of pagewiki
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
