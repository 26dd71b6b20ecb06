//! Wizard session - the backend surface the presentation layer talks to

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{Page, PageRenderer};
use crate::helpers::first_non_empty;
use crate::marker::Marker;

/// URL prefix under which the pages directory is served
pub const ASSET_PREFIX: &str = "/pages";

const DEFAULT_TITLE: &str = "Day 1";
const DEFAULT_THEME: &str = "auto";
const RENDER_PLACEHOLDER: &str = "<p>Error rendering page.</p>";
const ALLOWED_HELP_SCHEMES: [&str; 3] = ["http", "https", "ms-settings"];

/// Presentation settings with defaults applied
#[derive(Debug, Clone, Default)]
pub struct WizardConfig {
    pub title: String,
    pub theme: String,
    pub accent_color: String,
    pub help_url: String,
    pub brand_name: String,
    pub brand_logo: String,
    /// Markdown for the page shown after the last step
    pub final_markdown: Option<String>,
}

impl WizardConfig {
    pub fn from_site(site: &SiteConfig, final_markdown: Option<String>) -> Self {
        Self {
            title: first_non_empty(&site.title, DEFAULT_TITLE).to_string(),
            theme: first_non_empty(&site.theme, DEFAULT_THEME).to_string(),
            accent_color: site.accent_color.clone(),
            help_url: site.help_url.clone(),
            brand_name: site.brand.name.clone(),
            brand_logo: site.brand.logo.clone(),
            final_markdown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub title: String,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandInfo {
    pub name: String,
    pub logo: String,
}

/// Loaded pages with their HTML rendered up front
#[derive(Debug)]
pub struct Wizard {
    pages: Vec<Page>,
    rendered: Vec<String>,
    final_html: String,
    config: WizardConfig,
    brand: BrandInfo,
}

impl Wizard {
    /// Render every page. A page that fails to render is replaced by a
    /// placeholder so the rest of the wizard still works.
    pub fn new<R: PageRenderer>(pages: Vec<Page>, config: WizardConfig, renderer: &R) -> Self {
        let rendered = pages
            .iter()
            .map(|page| match renderer.render(&page.markdown, ASSET_PREFIX) {
                Ok(html) => html,
                Err(e) => {
                    tracing::error!("render page {}: {}", page.source_file, e);
                    RENDER_PLACEHOLDER.to_string()
                }
            })
            .collect();

        let final_html = match config.final_markdown.as_deref() {
            Some(markdown) => renderer.render(markdown, ASSET_PREFIX).unwrap_or_else(|e| {
                tracing::error!("render final page: {}", e);
                String::new()
            }),
            None => String::new(),
        };

        let logo = if config.brand_logo.is_empty() {
            String::new()
        } else {
            format!("{}/{}", ASSET_PREFIX, config.brand_logo)
        };
        let brand = BrandInfo {
            name: config.brand_name.clone(),
            logo,
        };

        Self {
            pages,
            rendered,
            final_html,
            config,
            brand,
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn page_infos(&self) -> Vec<PageInfo> {
        self.pages
            .iter()
            .enumerate()
            .map(|(index, page)| PageInfo {
                title: page.title().to_string(),
                index,
            })
            .collect()
    }

    pub fn page_html(&self, index: usize) -> Option<&str> {
        self.rendered.get(index).map(String::as_str)
    }

    /// Rendered final page, empty when none is configured
    pub fn final_html(&self) -> &str {
        &self.final_html
    }

    pub fn brand(&self) -> &BrandInfo {
        &self.brand
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn theme(&self) -> &str {
        &self.config.theme
    }

    pub fn accent_color(&self) -> &str {
        &self.config.accent_color
    }

    pub fn help_url(&self) -> &str {
        &self.config.help_url
    }

    /// The help URL, if set and using an allowed scheme
    pub fn allowed_help_url(&self) -> Option<&str> {
        let url = self.help_url();
        if url.is_empty() {
            return None;
        }
        if is_allowed_help_url(url) {
            Some(url)
        } else {
            tracing::warn!("blocked URL: {}", url);
            None
        }
    }

    /// Mark onboarding as done
    pub fn complete(&self, marker: &Marker) -> anyhow::Result<()> {
        marker.write()?;
        tracing::info!("onboarding completed, sentinel written");
        Ok(())
    }

    pub fn dismiss(&self) {
        tracing::info!("wizard dismissed without completing");
    }
}

/// Only web links and OS settings deep links may be opened
pub fn is_allowed_help_url(url: &str) -> bool {
    match url.split_once(':') {
        Some((scheme, _)) => ALLOWED_HELP_SCHEMES
            .iter()
            .any(|allowed| scheme.eq_ignore_ascii_case(allowed)),
        None => false,
    }
}
