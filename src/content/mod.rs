//! Content module - discovers, parses and renders onboarding pages

mod frontmatter;
pub mod loader;
mod markdown;
mod page;
mod title;

/// Suffix that marks a file as a page in directory-scan mode
pub const MARKDOWN_SUFFIX: &str = ".md";

pub use frontmatter::{FrontMatter, ALL_PLATFORMS};
pub use loader::{current_platform, load_final_page, load_pages, PageLoader};
pub use markdown::{MarkdownRenderer, PageRenderer};
pub use page::Page;
pub use title::title_from_filename;
