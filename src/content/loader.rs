//! Page loader - discovers pages in a pages directory

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use super::{title_from_filename, FrontMatter, Page, MARKDOWN_SUFFIX};
use crate::config::SiteConfig;
use crate::error::{Error, Result};

/// Platform identifier for the running host, spelled the way page authors
/// write it in front-matter (`darwin`, `linux`, `windows`, ...)
pub fn current_platform() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

/// Load pages from `dir` for `platform`
pub fn load_pages<P: AsRef<Path>>(dir: P, platform: &str) -> Result<Vec<Page>> {
    PageLoader::new(dir.as_ref(), platform).load_pages()
}

/// Loads pages from a pages directory
pub struct PageLoader {
    dir: PathBuf,
    platform: String,
}

impl PageLoader {
    /// Create a new page loader
    pub fn new(dir: impl Into<PathBuf>, platform: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            platform: platform.into(),
        }
    }

    /// Load pages, reading `day1.yml` to decide between the explicit list and a directory scan
    pub fn load_pages(&self) -> Result<Vec<Page>> {
        let config = match SiteConfig::load_from_dir(&self.dir) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{} (falling back to directory scan)", e);
                SiteConfig::default()
            }
        };
        self.load_with_config(&config)
    }

    /// Load pages using an already loaded site config
    pub fn load_with_config(&self, config: &SiteConfig) -> Result<Vec<Page>> {
        if config.pages.is_empty() {
            self.load_all()
        } else {
            self.load_list(&config.pages)
        }
    }

    /// Explicit-list mode: exactly the configured files, in configured order
    fn load_list(&self, names: &[String]) -> Result<Vec<Page>> {
        let mut pages = Vec::with_capacity(names.len());
        for name in names {
            validate_page_path(name)?;
            if let Some(page) = self.load_page(name)? {
                pages.push(page);
            }
        }
        Ok(pages)
    }

    /// Directory-scan mode: every `.md` file directly inside the directory
    fn load_all(&self) -> Result<Vec<Page>> {
        let metadata = fs::metadata(&self.dir).map_err(|e| Error::io(&self.dir, e))?;
        if !metadata.is_dir() {
            return Err(Error::io(
                &self.dir,
                io::Error::new(io::ErrorKind::Other, "not a directory"),
            ));
        }

        let mut pages = Vec::new();

        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| Error::io(&self.dir, e.into()))?;
            if entry.file_type().is_dir() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                tracing::warn!("Skipping non UTF-8 file name {:?}", entry.path());
                continue;
            };
            if !name.ends_with(MARKDOWN_SUFFIX) {
                continue;
            }

            if let Some(page) = self.load_page(name)? {
                pages.push(page);
            }
        }

        // Enumeration order is unspecified; order then filename is the only sort key
        pages.sort_by(|a, b| {
            a.frontmatter
                .order
                .cmp(&b.frontmatter.order)
                .then_with(|| a.source_file.cmp(&b.source_file))
        });

        Ok(pages)
    }

    /// Load a single page. `None` means the page exists but targets another platform.
    fn load_page(&self, name: &str) -> Result<Option<Page>> {
        let path = self.dir.join(name);
        let raw = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let (mut frontmatter, body) = FrontMatter::parse(&raw, name)?;

        if !frontmatter.visible_on(&self.platform) {
            tracing::debug!(
                "Skipping {} (platform {}, host {})",
                name,
                frontmatter.platform,
                self.platform
            );
            return Ok(None);
        }

        if frontmatter.title.is_empty() {
            frontmatter.title = title_from_filename(name);
        }

        Ok(Some(Page {
            frontmatter,
            markdown: body.to_string(),
            source_file: name.to_string(),
        }))
    }
}

/// Read the configured final page, if any. Returns its body with any
/// front-matter removed.
pub fn load_final_page<P: AsRef<Path>>(dir: P, config: &SiteConfig) -> Result<Option<String>> {
    let name = config.final_page.as_str();
    if name.is_empty() {
        return Ok(None);
    }
    validate_page_path(name)?;

    let path = dir.as_ref().join(name);
    let raw = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
    let (_, body) = FrontMatter::parse(&raw, name)?;
    Ok(Some(body.to_string()))
}

/// Configured names must stay inside the pages directory
fn validate_page_path(name: &str) -> Result<()> {
    let path = Path::new(name);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

    if name.trim().is_empty() || path.is_absolute() || escapes {
        return Err(Error::InvalidPagePath {
            name: name.to_string(),
        });
    }
    Ok(())
}
