//! Content loading configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where to look for posts and how to build them.
///
/// Every loader entry point takes one of these explicitly; nothing is read
/// from the environment or the process working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Site identifier used for per-site directories and visibility filtering
    #[serde(alias = "showOn")]
    pub show_on: Option<String>,

    /// Root that relative content directories are joined to
    #[serde(alias = "baseDir")]
    pub base_dir: PathBuf,

    /// Explicit directories; when non-empty, auto-discovery is skipped
    #[serde(alias = "contentDirs")]
    pub content_dirs: Vec<PathBuf>,

    /// Also read the shared content directory
    #[serde(alias = "includeShared")]
    pub include_shared: bool,

    /// Render bodies into a `RenderedDocument`
    #[serde(alias = "serializeContent")]
    pub serialize_content: bool,

    /// File extensions treated as content, without the dot
    pub extensions: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            show_on: None,
            base_dir: PathBuf::from("."),
            content_dirs: Vec::new(),
            include_shared: true,
            serialize_content: true,
            extensions: vec!["mdx".to_string()],
        }
    }
}

impl ContentConfig {
    /// Config rooted at `base_dir` with everything else defaulted
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn with_show_on(mut self, site: impl Into<String>) -> Self {
        self.show_on = Some(site.into());
        self
    }

    pub fn with_content_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.content_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_include_shared(mut self, include: bool) -> Self {
        self.include_shared = include;
        self
    }

    pub fn with_serialize_content(mut self, serialize: bool) -> Self {
        self.serialize_content = serialize;
        self
    }

    /// Site identifier, treating an empty string as unset
    pub fn site(&self) -> Option<&str> {
        self.show_on.as_deref().filter(|s| !s.is_empty())
    }

    /// Split a file name into its stem if it carries a content extension
    pub fn strip_extension<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        self.extensions.iter().find_map(|ext| {
            file_name
                .strip_suffix(ext.as_str())
                .and_then(|rest| rest.strip_suffix('.'))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_extension() {
        let config = ContentConfig::default();
        assert_eq!(config.strip_extension("hello.mdx"), Some("hello"));
        assert_eq!(config.strip_extension("hello.md"), None);
        assert_eq!(config.strip_extension("notes.txt"), None);
    }

    #[test]
    fn test_empty_site_is_unset() {
        let config = ContentConfig::default().with_show_on("");
        assert_eq!(config.site(), None);
    }

    #[test]
    fn test_camel_case_aliases() {
        let yaml = "showOn: a\ncontentDirs: [posts]\nserializeContent: false\n";
        let config: ContentConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.site(), Some("a"));
        assert_eq!(config.content_dirs, vec![PathBuf::from("posts")]);
        assert!(!config.serialize_content);
        assert!(config.include_shared);
    }
}
