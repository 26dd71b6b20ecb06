//! Run the wizard

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::content::MarkdownRenderer;
use crate::demo;
use crate::marker::Marker;
use crate::server;
use crate::wizard::{Wizard, WizardConfig};
use crate::Day1;

/// Options for the default command
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Pages directory; the built-in demo pages when `None`
    pub pages_dir: Option<PathBuf>,
    /// Show the wizard even if it was already completed
    pub force: bool,
    pub ip: String,
    pub port: u16,
    pub open: bool,
}

pub async fn run(options: RunOptions) -> Result<()> {
    let marker = resolve_marker(Marker::default_location());

    if !options.force && already_completed(marker.as_ref()) {
        tracing::info!("already completed, exiting (use --force to override)");
        return Ok(());
    }

    // Keep the demo directory alive until the server stops
    let (pages_dir, _demo_dir) = match options.pages_dir {
        Some(dir) => (dir, None),
        None => {
            let dir = demo::extract().context("extract embedded pages")?;
            tracing::info!("using built-in demo pages");
            (dir.path().to_path_buf(), Some(dir))
        }
    };

    let wizard = build_wizard(&Day1::new(&pages_dir))?;

    server::start(
        wizard,
        &pages_dir,
        marker,
        &options.ip,
        options.port,
        options.open,
    )
    .await
}

/// A missing marker location is logged; the wizard still runs but
/// completion is not recorded.
fn resolve_marker(location: Result<Marker>) -> Option<Marker> {
    location
        .map_err(|e| tracing::warn!("marker location: {:#}", e))
        .ok()
}

fn already_completed(marker: Option<&Marker>) -> bool {
    let Some(marker) = marker else {
        return false;
    };
    marker.exists().unwrap_or_else(|e| {
        tracing::warn!("marker check: {:#}", e);
        false
    })
}

/// Load and render everything the wizard shows
pub fn build_wizard(day1: &Day1) -> Result<Wizard> {
    let pages = day1.load_pages().context("load pages")?;
    if pages.is_empty() {
        bail!("no pages found in {}", day1.pages_dir.display());
    }
    tracing::info!("loaded {} pages from {:?}", pages.len(), day1.pages_dir);

    let final_markdown = day1.load_final_page().context("read final page")?;
    let config = WizardConfig::from_site(&day1.config, final_markdown);

    Ok(Wizard::new(pages, config, &MarkdownRenderer::new()))
}
