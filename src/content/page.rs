//! Page model

use serde::Serialize;

use super::FrontMatter;

/// One onboarding step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Parsed front-matter; `title` is always filled in after loading
    pub frontmatter: FrontMatter,

    /// Raw markdown body (front-matter removed)
    pub markdown: String,

    /// Filename relative to the pages directory
    pub source_file: String,
}

impl Page {
    pub fn title(&self) -> &str {
        &self.frontmatter.title
    }
}
