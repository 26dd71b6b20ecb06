//! Built-in demo pages
//!
//! The `pages/` directory of this repository is embedded in the binary and
//! extracted to a temporary directory when no pages directory is given.

use anyhow::{Context, Result};
use std::fs;
use tempfile::TempDir;

/// (relative path, content) for every demo file
const DEMO_FILES: &[(&str, &str)] = &[
    ("day1.yml", include_str!("../pages/day1.yml")),
    ("welcome.md", include_str!("../pages/welcome.md")),
    ("accounts.md", include_str!("../pages/accounts.md")),
    ("setup-macos.md", include_str!("../pages/setup-macos.md")),
    ("setup-windows.md", include_str!("../pages/setup-windows.md")),
    ("setup-linux.md", include_str!("../pages/setup-linux.md")),
    ("tools-access.md", include_str!("../pages/tools-access.md")),
    ("final/done.md", include_str!("../pages/final/done.md")),
    ("assets/logo.svg", include_str!("../pages/assets/logo.svg")),
];

/// Extract the demo pages. The directory is removed when the guard is dropped.
pub fn extract() -> Result<TempDir> {
    let dir = tempfile::Builder::new()
        .prefix("day1-pages-")
        .tempdir()
        .context("create temp dir")?;

    for (name, content) in DEMO_FILES {
        let target = dir.path().join(name);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).with_context(|| format!("mkdir {:?}", parent))?;
        }
        fs::write(&target, content).with_context(|| format!("write {:?}", target))?;
    }

    tracing::debug!("Extracted demo pages to {:?}", dir.path());
    Ok(dir)
}
