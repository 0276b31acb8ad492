//! blog-engine: content loading for multi-site MDX blogs
//!
//! Posts are read from per-site and shared content directories, their
//! front matter is parsed, image references are resolved, and derived
//! fields (excerpt, reading time, rendered body) are computed. The loaded
//! collection can then be queried and rendered into an RSS feed and sitemap.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod query;

pub use config::{ContentConfig, SiteConfig};
pub use content::{load_all_posts, load_post_by_slug, ContentLoader, Post};
pub use error::ContentError;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use content::MarkdownRenderer;

/// The main application: a blog rooted at a directory
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config = config::SiteConfig::discover(&base_dir)?;
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
        })
    }

    /// Select the site whose posts are loaded
    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.config.content.show_on = Some(site.into());
        self
    }

    /// Content settings with the content root resolved against the base directory
    pub fn content_config(&self) -> ContentConfig {
        let mut content = self.config.content.clone();
        content.base_dir = self.base_dir.join(&content.base_dir);
        content
    }

    /// A loader using the configured highlighting
    pub fn loader(&self) -> ContentLoader {
        let highlight = &self.config.highlight;
        let renderer = MarkdownRenderer::with_options(&highlight.theme, highlight.enable);
        ContentLoader::with_renderer(self.content_config(), Arc::new(renderer))
    }

    /// Load every visible post
    pub async fn load_posts(&self) -> Vec<Post> {
        self.loader().load_all_posts().await
    }

    /// Write the feed and sitemap
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self, None, None).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_new_without_config() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.public_dir, dir.path().join("public"));
        assert_eq!(blog.content_config().base_dir, dir.path().join("."));
    }

    #[test]
    fn test_content_dirs_resolve_under_base() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("blog.yml"),
            "content:\n  showOn: alpha\n  contentDirs:\n    - posts\n",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        let content = blog.content_config();
        assert_eq!(content.site(), Some("alpha"));
        let dirs = crate::content::resolve_content_directories(&content);
        assert_eq!(dirs.len(), 1);
        assert_eq!(dirs[0].path, dir.path().join(".").join("posts"));

        let blog = blog.with_site("beta");
        assert_eq!(blog.content_config().site(), Some("beta"));
    }

    #[tokio::test]
    async fn test_load_posts_through_blog() {
        let dir = TempDir::new().unwrap();
        let blog_dir = dir.path().join("sites/alpha/content/blog");
        fs::create_dir_all(&blog_dir).unwrap();
        fs::write(
            blog_dir.join("hello.mdx"),
            "---\ntitle: Hello\ndate: 2024-01-01\n---\n# Hi\n",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap().with_site("alpha");
        let posts = blog.load_posts().await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "hello");
    }
}
