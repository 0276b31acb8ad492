//! Post model and the fields derived from a content file

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::RenderedDocument;
use crate::helpers::{normalize_category, parse_date};

/// Reading speed used for the reading-time estimate
pub const WORDS_PER_MINUTE: usize = 200;

/// Length of a derived excerpt, in characters
pub const EXCERPT_LENGTH: usize = 150;

lazy_static! {
    static ref DATE_PREFIX_RE: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}-").unwrap();
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Slug (URL-friendly name), unique within one load
    pub slug: String,

    /// Post title
    pub title: String,

    pub description: String,

    /// Publication date as written in front-matter
    pub date: String,

    pub author: Option<String>,

    pub category: Option<String>,

    pub tags: Vec<String>,

    /// Cover image, resolved to a public path
    pub image: Option<String>,

    /// Social preview image, resolved to a public path
    pub og_image: Option<String>,

    pub canonical: Option<String>,

    pub excerpt: String,

    /// e.g. "3 min read"
    pub reading_time: String,

    pub published: bool,

    pub featured: bool,

    /// Sites this post is visible on; empty means everywhere
    pub show_on: Vec<String>,

    pub author_site: Option<String>,
    pub author_linkedin: Option<String>,
    pub author_twitter: Option<String>,

    /// Body after image rewriting
    pub content: String,

    /// Pre-rendered body, absent when rendering was switched off
    pub rendered_body: Option<RenderedDocument>,

    /// File the post was read from
    #[serde(skip)]
    pub source: PathBuf,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Post {
    /// Create a post with minimal required fields
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            description: String::new(),
            date: String::new(),
            author: None,
            category: None,
            tags: Vec::new(),
            image: None,
            og_image: None,
            canonical: None,
            excerpt: String::new(),
            reading_time: reading_time(""),
            published: true,
            featured: false,
            show_on: Vec::new(),
            author_site: None,
            author_linkedin: None,
            author_twitter: None,
            content: String::new(),
            rendered_body: None,
            source: PathBuf::new(),
            extra: IndexMap::new(),
        }
    }

    /// Parsed publication date, if the front-matter date is readable
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.date)
    }

    /// Category in its URL form
    pub fn category_slug(&self) -> Option<String> {
        self.category.as_deref().map(normalize_category)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether the post may appear on `site`; unrestricted posts show everywhere
    pub fn is_visible_on(&self, site: &str) -> bool {
        self.show_on.is_empty() || self.show_on.iter().any(|s| s == site)
    }
}

/// Derive a slug from a file stem (extension already removed) by dropping
/// an optional `YYYY-MM-DD-` prefix
pub fn slug_from_stem(stem: &str) -> String {
    DATE_PREFIX_RE.replace(stem, "").into_owned()
}

/// Count whitespace-separated words
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Reading time as `ceil(words / 200)` minutes
pub fn reading_time(content: &str) -> String {
    let minutes = word_count(content).div_ceil(WORDS_PER_MINUTE);
    format!("{} min read", minutes)
}

/// First 150 characters of the body, trimmed, followed by an ellipsis
pub fn derive_excerpt(content: &str) -> String {
    let head: String = content.chars().take(EXCERPT_LENGTH).collect();
    format!("{}...", head.trim())
}
