//! Generator module - renders the post collection into feed and sitemap files

mod rss;
mod seo;
mod sitemap;

pub use rss::{generate_rss, RssOptions};
pub use seo::{meta_tags, structured_data, MetaTags, OgImage, OpenGraph, SeoOptions, TwitterCard};
pub use sitemap::generate_sitemap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::Blog;

/// Writes the RSS feed and sitemap for a loaded post list
pub struct Generator {
    config: SiteConfig,
    public_dir: PathBuf,
}

impl Generator {
    pub fn new(blog: &Blog) -> Self {
        Self {
            config: blog.config.clone(),
            public_dir: blog.public_dir.clone(),
        }
    }

    /// Write to `dir` instead of the configured public directory
    pub fn with_output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.public_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.public_dir
    }

    /// Generate every output file
    pub fn generate(&self, posts: &[Post], build_date: Option<DateTime<Utc>>) -> Result<()> {
        fs::create_dir_all(&self.public_dir)?;

        self.generate_rss(posts, build_date)?;
        self.generate_sitemap(posts)?;

        Ok(())
    }

    fn generate_rss(&self, posts: &[Post], build_date: Option<DateTime<Utc>>) -> Result<()> {
        let mut options = RssOptions::from_config(&self.config);
        options.build_date = build_date;

        let published: Vec<Post> = posts.iter().filter(|p| p.published).cloned().collect();
        let feed = generate_rss(&published, &options);

        let output_path = self.public_dir.join(&self.config.rss_path);
        write_file(&output_path, &feed)?;
        tracing::info!("Generated {} ({} items)", self.config.rss_path, published.len());

        Ok(())
    }

    fn generate_sitemap(&self, posts: &[Post]) -> Result<()> {
        let xml = generate_sitemap(posts, self.config.site_url());

        let output_path = self.public_dir.join(&self.config.sitemap_path);
        write_file(&output_path, &xml)?;
        tracing::info!("Generated {}", self.config.sitemap_path);

        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

/// Escape XML special characters
pub(crate) fn escape_xml(s: &str) -> String {
    strip_invalid_xml_chars(s)
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Wrap text in a CDATA section, splitting any `]]>` it contains
pub(crate) fn cdata(s: &str) -> String {
    format!(
        "<![CDATA[{}]]>",
        strip_invalid_xml_chars(s).replace("]]>", "]]]]><![CDATA[>")
    )
}

/// Strip invalid XML control characters (except tab, newline, carriage return)
/// XML 1.0 only allows: #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::fixtures::post;
    use tempfile::TempDir;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & <b> \"c\" 'd'"), "a &amp; &lt;b&gt; &quot;c&quot; &apos;d&apos;");
        assert_eq!(escape_xml("bell\u{7}"), "bell");
    }

    #[test]
    fn test_cdata_splits_terminator() {
        assert_eq!(cdata("plain"), "<![CDATA[plain]]>");
        assert_eq!(cdata("a]]>b"), "<![CDATA[a]]]]><![CDATA[>b]]>");
    }

    #[test]
    fn test_generate_writes_files() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let mut draft = post("draft", "2024-02-01", &[], None);
        draft.published = false;
        let posts = vec![post("hello", "2024-01-01", &["rust"], None), draft];

        let generator = Generator::new(&blog);
        generator.generate(&posts, None).unwrap();

        let rss = fs::read_to_string(blog.public_dir.join("rss.xml")).unwrap();
        let sitemap = fs::read_to_string(blog.public_dir.join("sitemap.xml")).unwrap();
        assert!(rss.contains("http://example.com/blog/hello"));
        assert!(!rss.contains("blog/draft"));
        assert!(sitemap.contains("<loc>http://example.com/blog/hello</loc>"));
        assert!(!sitemap.contains("blog/draft"));
    }

    #[test]
    fn test_generate_to_custom_dir() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        let out = dir.path().join("dist/feeds");

        let generator = Generator::new(&blog).with_output_dir(&out);
        generator.generate(&[], None).unwrap();

        assert!(out.join("rss.xml").exists());
        assert!(out.join("sitemap.xml").exists());
        assert!(!blog.public_dir.exists());
    }
}
