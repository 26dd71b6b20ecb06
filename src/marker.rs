//! Run-once sentinel written when the wizard is completed

use anyhow::{anyhow, Context, Result};
use chrono::{SecondsFormat, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "day1";
const FILE_NAME: &str = ".completed";

/// Completion sentinel file
#[derive(Debug, Clone)]
pub struct Marker {
    path: PathBuf,
}

impl Marker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<user config dir>/day1/.completed`
    pub fn default_location() -> Result<Self> {
        let base = dirs::config_dir().ok_or_else(|| anyhow!("user config dir not found"))?;
        Ok(Self::new(base.join(APP_DIR).join(FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> Result<bool> {
        self.path
            .try_exists()
            .with_context(|| format!("stat {:?}", self.path))
    }

    /// Write the sentinel with the current UTC time
    pub fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("mkdir {:?}", parent))?;
        }
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        fs::write(&self.path, format!("{}\n", stamp))
            .with_context(|| format!("write {:?}", self.path))
    }

    /// Remove the sentinel. Succeeds if it was never written.
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => {
                Err(e).with_context(|| format!("remove {:?}", self.path))
            }
            _ => Ok(()),
        }
    }
}
