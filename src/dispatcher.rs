//! Dispatcher Module
//!
//! The request-handling core that ties routing, storage, link rendering and
//! templates together.
//!
//! ## Responsibilities
//! - Match the request path to an operation
//! - Run the view/edit/save handler for the extracted title
//! - Turn every failure into a response (nothing escapes `dispatch`)
//!
//! ## Operations
//! ```text
//! /              → 302 /view/{default_title}
//! /view/{t}      → load → render links → view template     (miss: 302 /edit/{t})
//! /edit/{t}      → load or empty page  → edit template
//! /save/{t}      → form "body" → store                    (ok: 302 /view/{t}, err: 500)
//! other          → 404
//! ```

use std::sync::Arc;

use crate::config::Config;
use crate::error::{Result, WikiError};
use crate::page::Page;
use crate::protocol::{Request, Response, Status};
use crate::render::LinkRenderer;
use crate::routing::{Operation, Route, RouteMatcher};
use crate::storage::{FileStore, PageStore};
use crate::templates::{Templates, EDIT_TEMPLATE, VIEW_TEMPLATE};

/// Routes requests to page operations
///
/// ## Concurrency Model
///
/// Every field is read-only after construction, so one `Arc<Dispatcher>`
/// serves all requests without locking. The page store is the only shared
/// mutable resource and handles its own synchronization.
pub struct Dispatcher {
    /// Server configuration
    config: Config,

    /// Compiled route pattern
    routes: RouteMatcher,

    /// Compiled link pattern
    renderer: LinkRenderer,

    /// Parsed view/edit templates
    templates: Templates,

    /// Page storage
    store: Arc<dyn PageStore>,
}

impl Dispatcher {
    /// Name of the form field carrying the page body on save
    pub const BODY_FIELD: &'static str = "body";

    /// Build a dispatcher over a file store in `config.pages_dir`
    pub fn open(config: Config) -> Result<Self> {
        let store = FileStore::open(&config.pages_dir)?;
        tracing::info!("Pages stored in {}", store.dir().display());
        let templates = Templates::from_config(&config)?;
        Self::new(config, Arc::new(store), templates)
    }

    /// Build a dispatcher over any page store
    pub fn new(config: Config, store: Arc<dyn PageStore>, templates: Templates) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            routes: RouteMatcher::new()?,
            renderer: LinkRenderer::new()?,
            templates,
            store,
        })
    }

    /// Handle one request
    pub fn dispatch(&self, request: &Request) -> Response {
        tracing::debug!("{} {}", request.method.as_str(), request.path);

        let route = match self.routes.match_path(&request.path) {
            Ok(route) => route,
            Err(e) => return Self::error_response(&e),
        };

        let result = match route {
            Route::Index => Ok(self.index()),
            Route::Page { op, title } => match op {
                Operation::View => self.view(&title),
                Operation::Edit => self.edit(&title),
                Operation::Save => self.save(&title, request),
            },
        };

        result.unwrap_or_else(|e| Self::error_response(&e))
    }

    // =========================================================================
    // Operation Handlers
    // =========================================================================

    fn index(&self) -> Response {
        Response::redirect(Operation::View.path_for(&self.config.default_title))
    }

    fn view(&self, title: &str) -> Result<Response> {
        let Some(page) = self.load_page(title) else {
            return Ok(Response::redirect(Operation::Edit.path_for(title)));
        };

        let page = page.render_with(&self.renderer);
        let document = self.templates.render(VIEW_TEMPLATE, &page)?;
        Ok(Response::html(document))
    }

    fn edit(&self, title: &str) -> Result<Response> {
        let page = self.load_page(title).unwrap_or_else(|| Page::empty(title));
        let document = self.templates.render(EDIT_TEMPLATE, &page)?;
        Ok(Response::html(document))
    }

    fn save(&self, title: &str, request: &Request) -> Result<Response> {
        // A missing field saves an empty page
        let body = request.form_value(Self::BODY_FIELD).unwrap_or_default();
        let page = Page::new(title, body);

        self.store.save(&page.title, &page.body)?;
        tracing::info!("Saved page {} ({} bytes)", page.title, page.body.len());

        Ok(Response::redirect(Operation::View.path_for(title)))
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Load a page, treating "missing" and "unreadable" alike
    fn load_page(&self, title: &str) -> Option<Page> {
        match self.store.load(title) {
            Ok(body) => Some(Page::new(title, body)),
            Err(WikiError::PageNotFound(_)) => {
                tracing::debug!("Page {} does not exist", title);
                None
            }
            Err(e) => {
                tracing::warn!("Could not read page {}: {}", title, e);
                None
            }
        }
    }

    fn error_response(error: &WikiError) -> Response {
        match error.status() {
            Status::NotFound => {
                tracing::debug!("{}", error);
                Response::not_found()
            }
            status => {
                tracing::error!("{}", error);
                Response::error(status, &error.to_string())
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the page store
    pub fn store(&self) -> &Arc<dyn PageStore> {
        &self.store
    }
}
