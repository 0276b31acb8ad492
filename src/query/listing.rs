//! Interactive post listing: tag filters, sorting and pagination

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::compare_date_desc;
use crate::content::Post;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Date,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// State behind a post list with sort buttons and tag toggles.
///
/// Any change to sorting or filters sends the reader back to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    pub sort_by: SortKey,
    pub order: SortOrder,
    pub selected_tags: Vec<String>,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<'a> {
    pub posts: Vec<&'a Post>,
    /// Posts left after tag filtering, across all pages
    pub matched: usize,
    pub page: usize,
    pub total_pages: usize,
}

impl ListingState {
    /// Newest first, no filters, first page
    pub fn new(page_size: usize) -> Self {
        Self {
            sort_by: SortKey::Date,
            order: SortOrder::Desc,
            selected_tags: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Clicking the active key flips the order; a new key starts descending
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_by == key {
            self.order = self.order.flipped();
        } else {
            self.sort_by = key;
            self.order = SortOrder::Desc;
        }
        self.page = 1;
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        match self.selected_tags.iter().position(|t| t == tag) {
            Some(pos) => {
                self.selected_tags.remove(pos);
            }
            None => self.selected_tags.push(tag.to_string()),
        }
        self.page = 1;
    }

    pub fn clear_tags(&mut self) {
        self.selected_tags.clear();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Filter, sort and cut out the current page
    pub fn apply<'a>(&self, posts: &'a [Post]) -> Listing<'a> {
        let mut matched = filter_by_tags(posts, &self.selected_tags);
        sort_posts(&mut matched, self.sort_by, self.order);

        let total = matched.len();
        let page_posts = paginate(&matched, self.page, self.page_size).to_vec();

        Listing {
            posts: page_posts,
            matched: total,
            page: self.page,
            total_pages: page_count(total, self.page_size),
        }
    }
}

/// Posts having at least one of `selected` tags; everything when empty
pub fn filter_by_tags<'a>(posts: &'a [Post], selected: &[String]) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|post| selected.is_empty() || selected.iter().any(|tag| post.has_tag(tag)))
        .collect()
}

/// Stable sort by date or case-insensitive title
pub fn sort_posts(posts: &mut [&Post], key: SortKey, order: SortOrder) {
    posts.sort_by(|a, b| {
        let ascending = match key {
            SortKey::Date => compare_date_desc(b, a),
            SortKey::Title => compare_titles(a, b),
        };
        match order {
            SortOrder::Asc => ascending,
            SortOrder::Desc => ascending.reverse(),
        }
    });
}

fn compare_titles(a: &Post, b: &Post) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
}

/// Number of pages needed for `total` items
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Items on 1-based `page`; empty when the page is out of range
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let Some(start) = page.checked_sub(1).map(|p| p * page_size) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}
