//! Front-matter parsing

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::helpers::null_as_default;

/// Platform value that makes a page visible on every host
pub const ALL_PLATFORMS: &str = "all";

/// Front-matter data from a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Sort key in directory-scan mode (lower = earlier)
    #[serde(deserialize_with = "null_as_default")]
    pub order: i64,
    /// OS identifier as reported by the host (`darwin`, `linux`, `windows`, ...) or `all`
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: String::new(),
            order: 0,
            platform: ALL_PLATFORMS.to_string(),
        }
    }
}

impl FrontMatter {
    /// Parse front-matter from page content.
    /// Returns (front_matter, body). `filename` is only used for error context.
    pub fn parse<'a>(raw: &'a str, filename: &str) -> Result<(Self, &'a str)> {
        let Some((block, body)) = split_block(raw) else {
            return Ok((FrontMatter::default(), raw));
        };

        let mut fm = if block.trim().is_empty() {
            FrontMatter::default()
        } else {
            // A comment-only block is a YAML null document
            serde_yaml::from_str::<Option<FrontMatter>>(block)
                .map_err(|source| Error::FrontmatterParse {
                    file: filename.to_string(),
                    source,
                })?
                .unwrap_or_default()
        };

        if fm.platform.is_empty() {
            fm.platform = ALL_PLATFORMS.to_string();
        }

        Ok((fm, body))
    }

    /// Whether this page should be shown on `platform`
    pub fn visible_on(&self, platform: &str) -> bool {
        self.platform == ALL_PLATFORMS || self.platform == platform
    }

    /// Serialize back into a `---` delimited block
    pub fn to_block(&self) -> std::result::Result<String, serde_yaml::Error> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!("---\n{}---\n", yaml))
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim() == "---"
}

/// Locate the metadata block. The opening delimiter must be the first
/// non-blank line; the closing one is the next delimiter line after it.
fn split_block(raw: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    let mut lines = raw.split_inclusive('\n');

    let opening = loop {
        let line = lines.next()?;
        offset += line.len();
        if !line.trim().is_empty() {
            break line;
        }
    };
    if !is_delimiter(opening) {
        return None;
    }

    let block_start = offset;
    for line in lines {
        if is_delimiter(line) {
            let block = &raw[block_start..offset];
            let body = &raw[offset + line.len()..];
            let body = body
                .strip_prefix("\r\n")
                .or_else(|| body.strip_prefix('\n'))
                .unwrap_or(body);
            return Some((block, body));
        }
        offset += line.len();
    }

    None
}
