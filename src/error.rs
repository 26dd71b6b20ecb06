//! Error types for the page pipeline

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while loading, parsing or rendering pages
#[derive(Error, Debug)]
pub enum Error {
    #[error("parse frontmatter in {file}: {source}")]
    FrontmatterParse {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A configured page name is absolute or escapes the pages directory
    #[error("invalid page path: {name}")]
    InvalidPagePath { name: String },

    #[error("read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("render markdown: {0}")]
    Render(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
