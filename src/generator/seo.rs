//! Page metadata for search engines and social cards

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{full_url, post_url};

const OG_IMAGE_WIDTH: u32 = 1200;
const OG_IMAGE_HEIGHT: u32 = 630;

/// Site-wide values the metadata builders fall back on
#[derive(Debug, Clone)]
pub struct SeoOptions {
    pub site_url: String,
    pub default_author: String,
    pub default_og_image: String,
    pub twitter_handle: Option<String>,
    pub organization: String,
    pub logo: String,
}

impl SeoOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            site_url: config.site_url().to_string(),
            default_author: config.author.clone(),
            default_og_image: config.default_og_image.clone(),
            twitter_handle: config.twitter_handle.clone(),
            organization: config.organization.clone(),
            logo: config.logo.clone(),
        }
    }

    fn author_of(&self, post: &Post) -> String {
        post.author
            .clone()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| self.default_author.clone())
    }

    fn og_image_of(&self, post: &Post) -> String {
        let image = post
            .og_image
            .as_deref()
            .filter(|i| !i.trim().is_empty())
            .unwrap_or(&self.default_og_image);
        full_url(&self.site_url, image)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaTags {
    pub title: String,
    pub description: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub canonical: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub published_time: String,
    pub authors: Vec<String>,
    pub images: Vec<OgImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
}

/// Title, description, Open Graph, Twitter card and canonical URL of a post
pub fn meta_tags(post: &Post, options: &SeoOptions) -> MetaTags {
    let url = post_url(&options.site_url, &post.slug);
    let og_image = options.og_image_of(post);
    let canonical = post
        .canonical
        .clone()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| url.clone());

    MetaTags {
        title: post.title.clone(),
        description: post.description.clone(),
        open_graph: OpenGraph {
            title: post.title.clone(),
            description: post.description.clone(),
            url,
            kind: "article".to_string(),
            published_time: post.date.clone(),
            authors: vec![options.author_of(post)],
            images: vec![OgImage {
                url: og_image.clone(),
                width: OG_IMAGE_WIDTH,
                height: OG_IMAGE_HEIGHT,
                alt: post.title.clone(),
            }],
        },
        twitter: TwitterCard {
            card: "summary_large_image".to_string(),
            title: post.title.clone(),
            description: post.description.clone(),
            images: vec![og_image],
            creator: options
                .twitter_handle
                .as_deref()
                .filter(|h| !h.is_empty())
                .map(|h| format!("@{}", h.trim_start_matches('@'))),
        },
        canonical,
    }
}

/// schema.org `BlogPosting` JSON-LD for a post
pub fn structured_data(post: &Post, options: &SeoOptions) -> Value {
    let url = post_url(&options.site_url, &post.slug);

    json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": post.title,
        "description": post.description,
        "image": options.og_image_of(post),
        "datePublished": post.date,
        "dateModified": post.date,
        "author": {
            "@type": "Person",
            "name": options.author_of(post),
        },
        "publisher": {
            "@type": "Organization",
            "name": options.organization,
            "logo": {
                "@type": "ImageObject",
                "url": full_url(&options.site_url, &options.logo),
            },
        },
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": url,
        },
        "url": url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::fixtures::post;

    fn options() -> SeoOptions {
        let mut config = SiteConfig::default();
        config.url = "https://example.com/".to_string();
        config.organization = "Acme".to_string();
        config.twitter_handle = Some("acme".to_string());
        SeoOptions::from_config(&config)
    }

    #[test]
    fn test_meta_tags_defaults() {
        let post = post("hello", "2024-01-01", &[], None);
        let tags = meta_tags(&post, &options());

        assert_eq!(tags.title, "HELLO");
        assert_eq!(tags.canonical, "https://example.com/blog/hello");
        assert_eq!(tags.open_graph.url, "https://example.com/blog/hello");
        assert_eq!(tags.open_graph.authors, vec!["Default Author"]);
        assert_eq!(
            tags.open_graph.images[0].url,
            "https://example.com/og-default.jpg"
        );
        assert_eq!(tags.twitter.creator.as_deref(), Some("@acme"));
    }

    #[test]
    fn test_meta_tags_from_post_fields() {
        let mut post = post("hello", "2024-01-01", &[], None);
        post.og_image = Some("/images/site/og/cover.png".to_string());
        post.canonical = Some("https://elsewhere.dev/hello".to_string());
        post.author = Some("Jo".to_string());

        let tags = meta_tags(&post, &options());
        assert_eq!(tags.canonical, "https://elsewhere.dev/hello");
        assert_eq!(
            tags.twitter.images,
            vec!["https://example.com/images/site/og/cover.png"]
        );
        assert_eq!(tags.open_graph.authors, vec!["Jo"]);

        let json = serde_json::to_value(&tags).unwrap();
        assert_eq!(json["openGraph"]["type"], "article");
    }

    #[test]
    fn test_structured_data() {
        let post = post("hello", "2024-01-01", &[], None);
        let data = structured_data(&post, &options());

        assert_eq!(data["@type"], "BlogPosting");
        assert_eq!(data["headline"], "HELLO");
        assert_eq!(data["datePublished"], "2024-01-01");
        assert_eq!(data["publisher"]["name"], "Acme");
        assert_eq!(data["publisher"]["logo"]["url"], "https://example.com/logo.png");
        assert_eq!(data["mainEntityOfPage"]["@id"], "https://example.com/blog/hello");
    }
}
