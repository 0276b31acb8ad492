//! Generate the feed and sitemap

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;

use crate::generator::Generator;
use crate::Blog;

/// Load all posts and write the generated files.
///
/// `output` overrides the configured public directory; `build_date` pins
/// the feed's `lastBuildDate`.
pub async fn run(
    blog: &Blog,
    output: Option<&Path>,
    build_date: Option<DateTime<Utc>>,
) -> Result<()> {
    let start = std::time::Instant::now();

    let posts = blog.load_posts().await;
    tracing::info!("Loaded {} posts", posts.len());

    let mut generator = Generator::new(blog);
    if let Some(dir) = output {
        generator = generator.with_output_dir(dir);
    }
    generator.generate(&posts, build_date)?;

    tracing::info!(
        "Generated into {:?} in {:?}",
        generator.output_dir(),
        start.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::parse_date;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_generate_from_content() {
        let dir = TempDir::new().unwrap();
        let site_dir = dir.path().join("sites/alpha/content/blog");
        fs::create_dir_all(&site_dir).unwrap();
        fs::write(
            site_dir.join("2024-05-01-launch.mdx"),
            "---\ntitle: Launch\ndescription: We shipped\ndate: 2024-05-01\n---\nHello\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("blog.yml"),
            "title: Alpha\nurl: https://alpha.dev/\ncontent:\n  showOn: alpha\n",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        run(&blog, None, parse_date("2024-06-01")).await.unwrap();

        let rss = fs::read_to_string(blog.public_dir.join("rss.xml")).unwrap();
        assert!(rss.contains("<link>https://alpha.dev/blog/launch</link>"));
        assert!(rss.contains("<lastBuildDate>Sat, 01 Jun 2024 00:00:00 GMT</lastBuildDate>"));
        assert!(rss.contains("<title><![CDATA[Alpha]]></title>"));

        let sitemap = fs::read_to_string(blog.public_dir.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://alpha.dev/blog/launch</loc>"));
    }

    #[tokio::test]
    async fn test_generate_with_output_override() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let blog = Blog::new(dir.path()).unwrap();

        run(&blog, Some(&out), None).await.unwrap();
        assert!(out.join("rss.xml").exists());
        assert!(out.join("sitemap.xml").exists());
    }
}
