//! Show a single post

use anyhow::Result;
use serde_json::json;
use std::fmt::Write;

use crate::content::Post;
use crate::generator::{meta_tags, structured_data, SeoOptions};
use crate::helpers::{full_date, post_url, share_links};
use crate::Blog;

/// Look up a post by slug and print it
pub async fn run(blog: &Blog, slug: &str, as_json: bool) -> Result<()> {
    let post = blog.loader().load_post_by_slug(slug).await?;
    let seo = SeoOptions::from_config(&blog.config);

    let output = if as_json {
        to_json(&post, &seo)?
    } else {
        summary(&post, &seo)?
    };
    println!("{}", output);

    Ok(())
}

/// Post, metadata and share links as one JSON document
pub fn to_json(post: &Post, seo: &SeoOptions) -> Result<String> {
    let value = json!({
        "post": post,
        "meta": meta_tags(post, seo),
        "structuredData": structured_data(post, seo),
        "share": share_links(&post_url(&seo.site_url, &post.slug), &post.title),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Human-readable overview
pub fn summary(post: &Post, seo: &SeoOptions) -> Result<String> {
    let mut out = String::new();
    let url = post_url(&seo.site_url, &post.slug);

    writeln!(out, "{}", post.title)?;
    if let Some(date) = post.published_at() {
        writeln!(out, "  {} · {}", full_date(&date), post.reading_time)?;
    } else {
        writeln!(out, "  {}", post.reading_time)?;
    }
    if let Some(author) = &post.author {
        writeln!(out, "  by {}", author)?;
    }
    if let Some(category) = &post.category {
        writeln!(out, "  category: {}", category)?;
    }
    if !post.tags.is_empty() {
        writeln!(out, "  tags: {}", post.tags.join(", "))?;
    }
    writeln!(out, "  url: {}", url)?;
    writeln!(out, "  source: {:?}", post.source)?;
    writeln!(out)?;
    write!(out, "{}", post.excerpt)?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::query::fixtures::post;
    use std::fs;
    use tempfile::TempDir;

    fn seo() -> SeoOptions {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        SeoOptions::from_config(&config)
    }

    #[test]
    fn test_json_output() {
        let mut post = post("hello", "2024-01-01", &["rust"], None);
        post.excerpt = "Hi...".to_string();
        let json: serde_json::Value = serde_json::from_str(&to_json(&post, &seo()).unwrap()).unwrap();

        assert_eq!(json["post"]["slug"], "hello");
        assert_eq!(json["post"]["tags"][0], "rust");
        assert_eq!(json["meta"]["canonical"], "https://example.com/blog/hello");
        assert_eq!(json["structuredData"]["@type"], "BlogPosting");
        assert_eq!(json["share"]["copy"], "https://example.com/blog/hello");
    }

    #[test]
    fn test_summary() {
        let mut post = post("hello", "2024-01-01", &["rust", "web"], None);
        post.reading_time = "1 min read".to_string();
        let out = summary(&post, &seo()).unwrap();

        assert!(out.starts_with("HELLO\n"));
        assert!(out.contains("1 min read"));
        assert!(out.contains("tags: rust, web"));
        assert!(out.contains("url: https://example.com/blog/hello"));
    }

    #[tokio::test]
    async fn test_show_missing_slug() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("shared/content/blog")).unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let err = run(&blog, "nope", false).await.unwrap_err();
        let content_err = err.downcast_ref::<crate::ContentError>().unwrap();
        assert!(content_err.is_not_found());
    }
}
