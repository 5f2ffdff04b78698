//! Page Templates
//!
//! The `view` and `edit` HTML shells, rendered with minijinja.
//!
//! Templates are parsed once at startup, either from the copies compiled
//! into the binary or from a directory given in the config. Both files are
//! `.html`, so minijinja auto-escapes every value except the rendered page
//! hypertext, which arrives as a safe string.

use std::fs;
use std::path::Path;

use minijinja::Environment;

use crate::config::Config;
use crate::error::{Result, WikiError};
use crate::page::Page;

/// Template shown for `/view/<title>`
pub const VIEW_TEMPLATE: &str = "view.html";

/// Template shown for `/edit/<title>`
pub const EDIT_TEMPLATE: &str = "edit.html";

const BUILTIN_VIEW: &str = include_str!("../templates/view.html");
const BUILTIN_EDIT: &str = include_str!("../templates/edit.html");

/// The parsed template set (read-only after construction)
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Templates compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_sources(BUILTIN_VIEW.to_string(), BUILTIN_EDIT.to_string())
    }

    /// Load `view.html` and `edit.html` from `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|e| {
                WikiError::Config(format!("cannot read template {}: {}", path.display(), e))
            })
        };
        let templates = Self::from_sources(read(VIEW_TEMPLATE)?, read(EDIT_TEMPLATE)?)?;
        tracing::info!("Loaded templates from {}", dir.display());
        Ok(templates)
    }

    /// Templates selected by the config
    pub fn from_config(config: &Config) -> Result<Self> {
        match &config.templates_dir {
            Some(dir) => Self::load(dir),
            None => Self::builtin(),
        }
    }

    /// Parse both templates, failing on the first syntax error
    pub fn from_sources(view: String, edit: String) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template_owned(VIEW_TEMPLATE, view)?;
        env.add_template_owned(EDIT_TEMPLATE, edit)?;
        Ok(Self { env })
    }

    /// Render `page` through the named template
    pub fn render(&self, name: &str, page: &Page) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(page.context())?)
    }
}
