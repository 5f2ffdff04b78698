//! Storage Module
//!
//! Persistent page storage keyed by title.
//!
//! ## Responsibilities
//! - Load the raw bytes of a page
//! - Replace a page's bytes in one atomic step
//!
//! ## On-disk Layout
//! ```text
//! {pages_dir}/
//!   ├── FrontPage.txt     (raw body, exactly as submitted)
//!   ├── Other_Page.txt
//!   └── .tmpXXXXXX        (in-flight save, renamed over the page)
//! ```

mod file_store;

pub use file_store::FileStore;

use bytes::Bytes;

use crate::error::Result;

/// Raw page storage.
///
/// Titles passed in have already been validated by the route matcher.
pub trait PageStore: Send + Sync {
    /// Read the stored body of `title`.
    ///
    /// Returns `PageNotFound` when there is no record and `Io` when the
    /// record exists but cannot be read. Callers may treat both the same.
    fn load(&self, title: &str) -> Result<Bytes>;

    /// Replace the stored body of `title`.
    ///
    /// MUST NOT leave a partially written page behind on failure.
    fn save(&self, title: &str, body: &[u8]) -> Result<()>;
}
