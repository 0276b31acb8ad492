//! Error types for content loading

use std::path::PathBuf;
use thiserror::Error;

use crate::content::{FrontMatterError, RenderError};

/// Errors produced while locating, reading and building posts.
///
/// Only [`ContentError::NotFound`] and failures of the single matched file
/// ever reach callers of `load_post_by_slug`; the batch loader logs and
/// drops everything else.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Post not found: {slug}")]
    NotFound { slug: String },

    #[error("Content directory {path:?} is not accessible: {source}")]
    MissingDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed entry {path:?}: {reason}")]
    MalformedEntry { path: PathBuf, reason: String },

    #[error("Failed to render {path:?}: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ContentError::MalformedEntry {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn front_matter(path: impl Into<PathBuf>, err: FrontMatterError) -> Self {
        ContentError::MalformedEntry {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// Whether this error means the requested slug does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}
