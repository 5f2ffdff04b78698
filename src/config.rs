//! Configuration for pagewiki
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, WikiError};
use crate::routing::is_valid_title;

/// Main configuration for a pagewiki instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Directory holding one `<title>.txt` file per page
    pub pages_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Presentation Configuration
    // -------------------------------------------------------------------------
    /// Directory with `view.html` and `edit.html` overrides.
    /// `None` uses the templates compiled into the binary.
    pub templates_dir: Option<PathBuf>,

    /// Page the index route redirects to
    pub default_title: String,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// HTTP listen address
    pub listen_addr: String,

    /// Largest accepted request body (bytes)
    pub max_form_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_dir: PathBuf::from("./pages"),
            templates_dir: None,
            default_title: "FrontPage".to_string(),
            listen_addr: "127.0.0.1:3000".to_string(),
            max_form_bytes: 10 * 1024 * 1024, // 10 MB
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if !is_valid_title(&self.default_title) {
            return Err(WikiError::Config(format!(
                "default title {:?} must match [a-zA-Z0-9_]+",
                self.default_title
            )));
        }
        if self.max_form_bytes == 0 {
            return Err(WikiError::Config(
                "max_form_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the pages directory
    pub fn pages_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pages_dir = path.into();
        self
    }

    /// Load templates from a directory instead of the built-in ones
    pub fn templates_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.templates_dir = Some(path.into());
        self
    }

    /// Set the page the index route redirects to
    pub fn default_title(mut self, title: impl Into<String>) -> Self {
        self.config.default_title = title.into();
        self
    }

    /// Set the HTTP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the maximum request body size (in bytes)
    pub fn max_form_bytes(mut self, bytes: usize) -> Self {
        self.config.max_form_bytes = bytes;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
