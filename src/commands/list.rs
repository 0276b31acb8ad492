//! List site content

use anyhow::Result;
use std::fmt::Write;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{normalize_category, parse_date};
use crate::query::{
    all_categories_with_slugs, all_tags, posts_by_category, posts_by_tag, recent_posts,
    ListingState, SortKey, SortOrder,
};
use crate::Blog;

/// What to list and how
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// post, recent, tag or category
    pub kind: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub sort: SortKey,
    pub ascending: bool,
    pub page: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            kind: "post".to_string(),
            tags: Vec::new(),
            category: None,
            sort: SortKey::Date,
            ascending: false,
            page: 1,
        }
    }
}

/// List site content by type
pub async fn run(blog: &Blog, options: &ListOptions) -> Result<()> {
    let posts = blog.load_posts().await;
    let output = render(&posts, options, &blog.config)?;
    print!("{}", output);
    Ok(())
}

/// Format the listing for `posts`
pub fn render(posts: &[Post], options: &ListOptions, config: &SiteConfig) -> Result<String> {
    let mut out = String::new();

    match options.kind.as_str() {
        "post" | "posts" => {
            let in_category: Vec<Post> = match &options.category {
                Some(category) => posts_by_category(posts, &normalize_category(category))
                    .into_iter()
                    .cloned()
                    .collect(),
                None => posts.to_vec(),
            };

            let mut state = ListingState::new(config.per_page);
            state.sort_by = options.sort;
            state.order = if options.ascending {
                SortOrder::Asc
            } else {
                SortOrder::Desc
            };
            for tag in &options.tags {
                state.toggle_tag(tag);
            }
            state.set_page(options.page);

            let listing = state.apply(&in_category);
            writeln!(
                out,
                "Posts ({}), page {}/{}:",
                listing.matched,
                listing.page,
                listing.total_pages.max(1)
            )?;
            for post in listing.posts {
                write_post_line(&mut out, post)?;
            }
        }
        "recent" => {
            let recent = recent_posts(posts, config.recent_limit);
            writeln!(out, "Recent posts ({}):", recent.len())?;
            for post in recent {
                write_post_line(&mut out, post)?;
            }
        }
        "tag" | "tags" => {
            let tags = all_tags(posts);
            writeln!(out, "Tags ({}):", tags.len())?;
            for tag in tags {
                writeln!(out, "  {} ({})", tag, posts_by_tag(posts, &tag).len())?;
            }
        }
        "category" | "categories" => {
            let categories = all_categories_with_slugs(posts);
            writeln!(out, "Categories ({}):", categories.len())?;
            for category in categories {
                writeln!(
                    out,
                    "  {} [{}] ({})",
                    category.name,
                    category.slug,
                    posts_by_category(posts, &category.slug).len()
                )?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, recent, tag, category",
                options.kind
            );
        }
    }

    Ok(out)
}

fn write_post_line(out: &mut String, post: &Post) -> std::fmt::Result {
    let date = parse_date(&post.date)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "----------".to_string());
    writeln!(
        out,
        "  {} - {} [{}] ({})",
        date, post.title, post.slug, post.reading_time
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::fixtures::post;

    fn config(per_page: usize) -> SiteConfig {
        SiteConfig {
            per_page,
            ..Default::default()
        }
    }

    fn sample() -> Vec<Post> {
        vec![
            post("a", "2024-01-01", &["rust"], Some("Web Dev")),
            post("b", "2024-03-01", &["go"], Some("Systems")),
            post("c", "2024-02-01", &["rust", "go"], None),
        ]
    }

    #[test]
    fn test_list_posts_newest_first() {
        let out = render(&sample(), &ListOptions::default(), &config(10)).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Posts (3), page 1/1:");
        assert!(lines[1].contains("[b]"));
        assert!(lines[2].contains("[c]"));
        assert!(lines[3].contains("[a]"));
    }

    #[test]
    fn test_list_posts_filtered_and_paged() {
        let options = ListOptions {
            tags: vec!["rust".to_string()],
            ascending: true,
            page: 2,
            ..Default::default()
        };
        let out = render(&sample(), &options, &config(1)).unwrap();
        assert!(out.starts_with("Posts (2), page 2/2:"));
        assert!(out.contains("[c]"));
        assert!(!out.contains("[a]"));

        let options = ListOptions {
            category: Some("web dev".to_string()),
            ..Default::default()
        };
        let out = render(&sample(), &options, &config(10)).unwrap();
        assert!(out.starts_with("Posts (1)"));
        assert!(out.contains("[a]"));
    }

    #[test]
    fn test_list_tags_and_categories() {
        let posts = sample();
        let tags = render(
            &posts,
            &ListOptions {
                kind: "tag".to_string(),
                ..Default::default()
            },
            &config(10),
        )
        .unwrap();
        assert_eq!(tags, "Tags (2):\n  go (2)\n  rust (2)\n");

        let categories = render(
            &posts,
            &ListOptions {
                kind: "categories".to_string(),
                ..Default::default()
            },
            &config(10),
        )
        .unwrap();
        assert!(categories.contains("  Web Dev [web-dev] (1)"));
    }

    #[test]
    fn test_list_recent_uses_configured_limit() {
        let options = ListOptions {
            kind: "recent".to_string(),
            ..Default::default()
        };
        let config = SiteConfig {
            recent_limit: 2,
            ..Default::default()
        };
        let out = render(&sample(), &options, &config).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Recent posts (2):");
        assert!(lines[1].contains("[b]"));
        assert!(lines[2].contains("[c]"));
    }

    #[test]
    fn test_unknown_kind() {
        let options = ListOptions {
            kind: "page".to_string(),
            ..Default::default()
        };
        assert!(render(&[], &options, &config(10)).is_err());
    }
}
