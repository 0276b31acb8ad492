//! RSS 2.0 feed

use chrono::{DateTime, Datelike, Utc};

use super::{cdata, escape_xml};
use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{post_url, rfc822, site_file_url};
use crate::query::sort_by_date_desc;

/// Channel-level settings for a feed
#[derive(Debug, Clone)]
pub struct RssOptions {
    pub title: String,
    pub description: String,
    pub site_url: String,
    pub feed_url: String,
    pub language: String,
    pub copyright: Option<String>,
    /// `lastBuildDate`; defaults to the newest post date so output is reproducible
    pub build_date: Option<DateTime<Utc>>,
}

impl RssOptions {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        site_url: impl Into<String>,
        feed_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            site_url: site_url.into(),
            feed_url: feed_url.into(),
            language: "en-US".to_string(),
            copyright: None,
            build_date: None,
        }
    }

    /// Options taken from the site configuration
    pub fn from_config(config: &SiteConfig) -> Self {
        let mut options = Self::new(
            config.title.clone(),
            config.description.clone(),
            config.site_url(),
            site_file_url(config.site_url(), &config.rss_path),
        );
        options.language = config.language.clone();
        options.copyright = config.copyright.clone();
        options
    }
}

/// Render posts as an RSS 2.0 document, newest first
pub fn generate_rss(posts: &[Post], options: &RssOptions) -> String {
    let sorted = sort_by_date_desc(posts);
    let site_url = options.site_url.trim_end_matches('/');

    let build_date = options
        .build_date
        .or_else(|| sorted.iter().find_map(|post| post.published_at()));
    let copyright = options
        .copyright
        .clone()
        .or_else(|| build_date.map(|d| format!("Copyright {}", d.year())));

    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    feed.push('\n');
    feed.push_str(r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">"#);
    feed.push('\n');
    feed.push_str("  <channel>\n");
    feed.push_str(&format!("    <title>{}</title>\n", cdata(&options.title)));
    feed.push_str(&format!("    <link>{}</link>\n", escape_xml(site_url)));
    feed.push_str(&format!(
        "    <description>{}</description>\n",
        cdata(&options.description)
    ));
    feed.push_str(&format!(
        "    <language>{}</language>\n",
        escape_xml(&options.language)
    ));
    if let Some(date) = &build_date {
        feed.push_str(&format!(
            "    <lastBuildDate>{}</lastBuildDate>\n",
            rfc822(date)
        ));
    }
    feed.push_str(&format!(
        "    <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\" />\n",
        escape_xml(&options.feed_url)
    ));
    if let Some(copyright) = &copyright {
        feed.push_str(&format!(
            "    <copyright>{}</copyright>\n",
            escape_xml(copyright)
        ));
    }

    for post in sorted {
        push_item(&mut feed, post, site_url);
    }

    feed.push_str("  </channel>\n");
    feed.push_str("</rss>\n");
    feed
}

fn push_item(feed: &mut String, post: &Post, site_url: &str) {
    let url = escape_xml(&post_url(site_url, &post.slug));

    feed.push_str("    <item>\n");
    feed.push_str(&format!("      <guid isPermaLink=\"true\">{}</guid>\n", url));
    feed.push_str(&format!("      <title>{}</title>\n", cdata(&post.title)));
    feed.push_str(&format!("      <link>{}</link>\n", url));
    feed.push_str(&format!(
        "      <description>{}</description>\n",
        cdata(&post.description)
    ));
    if let Some(date) = post.published_at() {
        feed.push_str(&format!("      <pubDate>{}</pubDate>\n", rfc822(&date)));
    }
    if let Some(author) = post.author.as_deref().filter(|a| !a.is_empty()) {
        feed.push_str(&format!("      <author>{}</author>\n", escape_xml(author)));
    }
    if let Some(category) = post.category.as_deref().filter(|c| !c.is_empty()) {
        feed.push_str(&format!(
            "      <category>{}</category>\n",
            escape_xml(category)
        ));
    }
    for tag in &post.tags {
        feed.push_str(&format!("      <category>{}</category>\n", escape_xml(tag)));
    }
    feed.push_str("    </item>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::parse_date;
    use crate::query::fixtures::post;

    fn options() -> RssOptions {
        RssOptions::new(
            "My Blog",
            "Notes & thoughts",
            "https://example.com/",
            "https://example.com/rss.xml",
        )
    }

    #[test]
    fn test_items_newest_first() {
        let posts = vec![
            post("old", "2024-01-01", &[], None),
            post("new", "2024-06-01", &[], None),
        ];
        let xml = generate_rss(&posts, &options());

        let new_pos = xml.find("https://example.com/blog/new").unwrap();
        let old_pos = xml.find("https://example.com/blog/old").unwrap();
        assert!(new_pos < old_pos);
        assert!(xml.contains("<pubDate>Sat, 01 Jun 2024 00:00:00 GMT</pubDate>"));
        assert!(xml.contains("<lastBuildDate>Sat, 01 Jun 2024 00:00:00 GMT</lastBuildDate>"));
        assert!(xml.contains("<copyright>Copyright 2024</copyright>"));
    }

    #[test]
    fn test_cdata_and_optional_elements() {
        let mut with_meta = post("meta", "2024-01-01", &["rust", "a<b"], Some("Systems"));
        with_meta.title = "Tricky ]]> title".to_string();
        with_meta.author = Some("Jo".to_string());
        let bare = post("bare", "not a date", &[], None);

        let xml = generate_rss(&[with_meta, bare], &options());

        assert!(xml.contains("<title><![CDATA[Tricky ]]]]><![CDATA[> title]]></title>"));
        assert!(xml.contains("<description><![CDATA[Notes & thoughts]]></description>"));
        assert!(xml.contains("<author>Jo</author>"));
        assert!(xml.contains("<category>Systems</category>"));
        assert!(xml.contains("<category>a&lt;b</category>"));

        let bare_item = &xml[xml.find("blog/bare").unwrap()..];
        let bare_item = &bare_item[..bare_item.find("</item>").unwrap()];
        assert!(!bare_item.contains("<pubDate>"));
        assert!(!bare_item.contains("<author>"));
        assert!(!bare_item.contains("<category>"));
    }

    #[test]
    fn test_explicit_build_date_and_copyright() {
        let mut opts = options();
        opts.build_date = parse_date("2025-03-04");
        opts.copyright = Some("CC BY 4.0".to_string());
        let xml = generate_rss(&[], &opts);

        assert!(xml.contains("<lastBuildDate>Tue, 04 Mar 2025 00:00:00 GMT</lastBuildDate>"));
        assert!(xml.contains("<copyright>CC BY 4.0</copyright>"));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn test_deterministic() {
        let posts = vec![post("a", "2024-01-01", &["x"], None)];
        assert_eq!(
            generate_rss(&posts, &options()),
            generate_rss(&posts, &options())
        );
    }
}
