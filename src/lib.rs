//! day1: an onboarding wizard driven by a directory of markdown pages
//!
//! Pages are discovered in a pages directory (optionally listed explicitly in
//! `day1.yml`), filtered by platform, ordered, rendered to HTML and served to
//! the presentation layer.

pub mod commands;
pub mod config;
pub mod content;
pub mod demo;
pub mod error;
pub mod helpers;
pub mod marker;
pub mod server;
pub mod wizard;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

/// A pages directory with its site configuration
#[derive(Debug, Clone)]
pub struct Day1 {
    /// Site configuration (zero value when `day1.yml` is missing or broken)
    pub config: config::SiteConfig,
    /// Directory holding the pages and `day1.yml`
    pub pages_dir: PathBuf,
    /// Platform pages are filtered for
    pub platform: String,
}

impl Day1 {
    /// Open a pages directory for the current platform.
    /// A broken `day1.yml` is logged and replaced by defaults.
    pub fn new<P: AsRef<Path>>(pages_dir: P) -> Self {
        let pages_dir = pages_dir.as_ref().to_path_buf();
        let config = config::SiteConfig::load_from_dir(&pages_dir).unwrap_or_else(|e| {
            tracing::warn!("config: {} (using defaults)", e);
            config::SiteConfig::default()
        });

        Self {
            config,
            pages_dir,
            platform: content::current_platform().to_string(),
        }
    }

    /// Filter pages for another platform
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Load the ordered page sequence
    pub fn load_pages(&self) -> Result<Vec<content::Page>> {
        content::PageLoader::new(&self.pages_dir, self.platform.as_str())
            .load_with_config(&self.config)
    }

    /// Load the configured final page body, if any
    pub fn load_final_page(&self) -> Result<Option<String>> {
        content::load_final_page(&self.pages_dir, &self.config)
    }
}
