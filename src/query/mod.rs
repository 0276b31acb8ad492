//! Queries over an already-loaded post list
//!
//! Everything here is pure: no I/O, and the input order is preserved
//! wherever no explicit ordering is requested.

mod listing;

pub use listing::{
    filter_by_tags, page_count, paginate, sort_posts, Listing, ListingState, SortKey, SortOrder,
};

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::content::Post;
use crate::helpers::normalize_category;

/// A category name together with its URL slug
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRef {
    pub name: String,
    pub slug: String,
}

/// Posts carrying `tag`
pub fn posts_by_tag<'a>(posts: &'a [Post], tag: &str) -> Vec<&'a Post> {
    posts.iter().filter(|post| post.has_tag(tag)).collect()
}

/// Posts whose normalized category equals `category_slug`
pub fn posts_by_category<'a>(posts: &'a [Post], category_slug: &str) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|post| post.category_slug().as_deref() == Some(category_slug))
        .collect()
}

/// Unique tags, alphabetically sorted
pub fn all_tags(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .flat_map(|post| post.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Unique category names, alphabetically sorted
pub fn all_categories(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .filter_map(|post| post.category.clone())
        .filter(|category| !category.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Unique categories with their slugs, sorted by name
pub fn all_categories_with_slugs(posts: &[Post]) -> Vec<CategoryRef> {
    all_categories(posts)
        .into_iter()
        .map(|name| CategoryRef {
            slug: normalize_category(&name),
            name,
        })
        .collect()
}

/// Posts marked `featured`
pub fn featured_posts(posts: &[Post]) -> Vec<&Post> {
    posts.iter().filter(|post| post.featured).collect()
}

/// Newest first; equal or unreadable dates keep their original order,
/// and unreadable dates sort after readable ones
pub fn compare_date_desc(a: &Post, b: &Post) -> Ordering {
    b.published_at().cmp(&a.published_at())
}

/// All posts sorted newest first (stable)
pub fn sort_by_date_desc(posts: &[Post]) -> Vec<&Post> {
    let mut sorted: Vec<&Post> = posts.iter().collect();
    sorted.sort_by(|a, b| compare_date_desc(a, b));
    sorted
}

/// The `limit` newest posts
pub fn recent_posts(posts: &[Post], limit: usize) -> Vec<&Post> {
    let mut sorted = sort_by_date_desc(posts);
    sorted.truncate(limit);
    sorted
}

/// Posts that may go into public indexes (feeds, sitemaps)
pub fn published_posts(posts: &[Post]) -> Vec<&Post> {
    posts.iter().filter(|post| post.published).collect()
}
