//! XML sitemap

use std::collections::HashSet;

use super::escape_xml;
use crate::content::Post;
use crate::helpers::post_url;

/// Render a sitemap with the site root plus every published post.
///
/// Posts appear in input order; a slug seen twice is listed once.
pub fn generate_sitemap(posts: &[Post], site_url: &str) -> String {
    let site_url = site_url.trim_end_matches('/');

    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(site_url)));
    xml.push_str("    <changefreq>daily</changefreq>\n");
    xml.push_str("    <priority>1.0</priority>\n");
    xml.push_str("  </url>\n");

    let mut seen = HashSet::new();
    for post in posts.iter().filter(|post| post.published) {
        if !seen.insert(post.slug.as_str()) {
            continue;
        }

        xml.push_str("  <url>\n");
        xml.push_str(&format!(
            "    <loc>{}</loc>\n",
            escape_xml(&post_url(site_url, &post.slug))
        ));
        if !post.date.trim().is_empty() {
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                escape_xml(post.date.trim())
            ));
        }
        xml.push_str("    <changefreq>monthly</changefreq>\n");
        xml.push_str("    <priority>0.8</priority>\n");
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::fixtures::post;

    #[test]
    fn test_sitemap_skips_unpublished() {
        let mut draft = post("draft", "2024-02-01", &[], None);
        draft.published = false;
        let posts = vec![
            post("hello", "2024-01-01", &[], None),
            draft,
            post("world", "2024-06-01", &[], None),
        ];

        let xml = generate_sitemap(&posts, "https://example.com/");

        assert!(xml.contains("<loc>https://example.com</loc>"));
        assert_eq!(xml.matches("<loc>https://example.com/blog/hello</loc>").count(), 1);
        assert_eq!(xml.matches("<loc>https://example.com/blog/world</loc>").count(), 1);
        assert!(!xml.contains("blog/draft"));
        assert!(xml.contains("<lastmod>2024-06-01</lastmod>"));
        assert_eq!(xml.matches("<url>").count(), 3);
    }

    #[test]
    fn test_sitemap_lists_each_slug_once() {
        let posts = vec![
            post("same", "2024-01-01", &[], None),
            post("same", "2024-02-01", &[], None),
            post("undated", "", &[], None),
        ];
        let xml = generate_sitemap(&posts, "https://example.com");

        assert_eq!(xml.matches("blog/same<").count(), 1);
        let undated = &xml[xml.find("blog/undated").unwrap()..];
        let undated = &undated[..undated.find("</url>").unwrap()];
        assert!(!undated.contains("<lastmod>"));
    }
}
