//! Site configuration (blog.yml / blog.toml)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::ContentConfig;

/// Config file names probed in the base directory, in order
pub const CONFIG_FILES: [&str; 3] = ["blog.yml", "blog.yaml", "blog.toml"];

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub url: String,
    pub author: String,
    pub language: String,
    pub copyright: Option<String>,

    // SEO
    pub twitter_handle: Option<String>,
    pub organization: String,
    pub logo: String,
    pub default_og_image: String,

    // Output
    pub public_dir: String,
    pub rss_path: String,
    pub sitemap_path: String,

    // Listing
    pub per_page: usize,
    pub recent_limit: usize,

    #[serde(default)]
    pub highlight: HighlightConfig,

    #[serde(default)]
    pub content: ContentConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),
            url: "http://example.com".to_string(),
            author: "Default Author".to_string(),
            language: "en-US".to_string(),
            copyright: None,

            twitter_handle: None,
            organization: String::new(),
            logo: "/logo.png".to_string(),
            default_og_image: "/og-default.jpg".to_string(),

            public_dir: "public".to_string(),
            rss_path: "rss.xml".to_string(),
            sitemap_path: "sitemap.xml".to_string(),

            per_page: 10,
            recent_limit: 5,

            highlight: HighlightConfig::default(),
            content: ContentConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML or TOML file, picked by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config: SiteConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => bail!("Unsupported config format {:?} for {:?}", other, path),
        };

        Ok(config)
    }

    /// Find and load the config file in `base_dir`, falling back to defaults
    pub fn discover<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        match Self::find(base_dir.as_ref()) {
            Some(path) => {
                tracing::debug!("Loading config from {:?}", path);
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    fn find(base_dir: &Path) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| base_dir.join(name))
            .find(|path| path.is_file())
    }

    /// Site URL without a trailing slash
    pub fn site_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}
