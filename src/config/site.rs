//! Site configuration (day1.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::helpers::null_as_default;

/// Well-known config file name inside the pages directory
pub const CONFIG_FILE_NAME: &str = "day1.yml";

/// Site-wide customization. The zero value means "directory-scan defaults".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub brand: BrandConfig,
    #[serde(deserialize_with = "null_as_default")]
    pub help_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub theme: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub accent_color: String,
    /// Page shown after the last step, relative to the pages directory
    #[serde(deserialize_with = "null_as_default")]
    pub final_page: String,
    /// Explicit page order; empty means scan the directory
    #[serde(deserialize_with = "null_as_default")]
    pub pages: Vec<String>,
}

/// Brand shown in the wizard header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Logo path relative to the pages directory
    #[serde(deserialize_with = "null_as_default")]
    pub logo: String,
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `day1.yml` from `dir`. A missing file is the zero config.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        match Self::load(&path) {
            Err(Error::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE_NAME, dir.as_ref());
                Ok(SiteConfig::default())
            }
            result => result,
        }
    }

    fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(SiteConfig::default());
        }
        // A comment-only file is a YAML null document
        Ok(serde_yaml::from_str::<Option<SiteConfig>>(content)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_dir(yaml: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), yaml).unwrap();
        dir
    }

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "");
        assert_eq!(config.theme, "");
        assert!(config.pages.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r##"
brand:
  name: Acme
  logo: img/logo.png
help_url: https://help.acme.com
theme: dark
title: Welcome to Acme
accent_color: "#ff6600"
final_page: done.md
pages:
  - welcome.md
  - accounts.md
"##;
        let dir = config_dir(yaml);
        let config = SiteConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.brand.name, "Acme");
        assert_eq!(config.brand.logo, "img/logo.png");
        assert_eq!(config.help_url, "https://help.acme.com");
        assert_eq!(config.theme, "dark");
        assert_eq!(config.title, "Welcome to Acme");
        assert_eq!(config.accent_color, "#ff6600");
        assert_eq!(config.final_page, "done.md");
        assert_eq!(config.pages, vec!["welcome.md", "accounts.md"]);
    }

    #[test]
    fn test_brand_only() {
        let dir = config_dir("brand:\n  name: TestCorp\n");
        let config = SiteConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.brand.name, "TestCorp");
        assert_eq!(config.help_url, "");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let dir = config_dir("title: Hi\nmystery: 42\n");
        let config = SiteConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.title, "Hi");
    }

    #[test]
    fn test_empty_file_is_zero_config() {
        let dir = config_dir("");
        let config = SiteConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_missing_file_is_zero_config() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = config_dir(": [broken");
        let err = SiteConfig::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }
}
