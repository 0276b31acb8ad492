//! Image path resolution for front-matter images and body references

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::helpers::is_absolute_reference;

/// Public root that all site image directories live under
pub const IMAGES_ROOT: &str = "/images";

/// Site segment used when a post is not tied to a specific site
pub const SHARED_SITE: &str = "shared";

lazy_static! {
    /// `![alt](src)` and `![alt](src "title")`
    static ref MARKDOWN_IMAGE_RE: Regex = Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap();
    /// `<img ... src="...">` in JSX or raw HTML
    static ref HTML_IMAGE_RE: Regex =
        Regex::new(r#"(<img\b[^>]*?\bsrc\s*=\s*)(["'])([^"']*)(["'])"#).unwrap();
}

/// Which image directory a relative reference belongs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Cover and inline images, under `blog/`
    Blog,
    /// Social preview images, under `og/`
    OpenGraph,
}

impl ImageKind {
    fn segment(self) -> &'static str {
        match self {
            ImageKind::Blog => "blog",
            ImageKind::OpenGraph => "og",
        }
    }
}

/// Resolve an image reference to a public path.
///
/// Empty stays empty, absolute references (`/x.png`, `https://...`) pass
/// through, anything else lands under `/images/<site>/<kind>/`.
pub fn resolve_image_path(reference: &str, site_id: Option<&str>, kind: ImageKind) -> String {
    let reference = reference.trim();
    if reference.is_empty() {
        return String::new();
    }
    if is_absolute_reference(reference) {
        return reference.to_string();
    }

    let site = site_id.filter(|s| !s.is_empty()).unwrap_or(SHARED_SITE);
    let relative = reference.trim_start_matches("./");

    format!("{}/{}/{}/{}", IMAGES_ROOT, site, kind.segment(), relative)
}

/// Resolve an optional front-matter image, dropping empty values
pub fn resolve_optional(
    reference: Option<&str>,
    site_id: Option<&str>,
    kind: ImageKind,
) -> Option<String> {
    reference
        .map(|r| resolve_image_path(r, site_id, kind))
        .filter(|r| !r.is_empty())
}

/// Rewrite every image reference in a post body
pub fn rewrite_content_images(content: &str, site_id: Option<&str>) -> String {
    let markdown = MARKDOWN_IMAGE_RE.replace_all(content, |caps: &Captures| {
        let alt = &caps[1];
        let target = caps[2].trim();

        // Keep an optional title (`src "title"`) untouched
        let (src, title) = match target.find(char::is_whitespace) {
            Some(pos) => (&target[..pos], &target[pos..]),
            None => (target, ""),
        };

        format!(
            "![{}]({}{})",
            alt,
            resolve_image_path(src, site_id, ImageKind::Blog),
            title
        )
    });

    HTML_IMAGE_RE
        .replace_all(&markdown, |caps: &Captures| {
            format!(
                "{}{}{}{}",
                &caps[1],
                &caps[2],
                resolve_image_path(&caps[3], site_id, ImageKind::Blog),
                &caps[4]
            )
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_image_path() {
        assert_eq!(resolve_image_path("", Some("a"), ImageKind::Blog), "");
        assert_eq!(
            resolve_image_path("cover.png", Some("site-a"), ImageKind::Blog),
            "/images/site-a/blog/cover.png"
        );
        assert_eq!(
            resolve_image_path("card.png", None, ImageKind::OpenGraph),
            "/images/shared/og/card.png"
        );
        assert_eq!(
            resolve_image_path("./nested/x.png", None, ImageKind::Blog),
            "/images/shared/blog/nested/x.png"
        );
    }

    #[test]
    fn test_absolute_paths_pass_through() {
        for reference in ["/static/a.png", "https://cdn.example.com/a.png", "http://x/y.png"] {
            assert_eq!(
                resolve_image_path(reference, Some("a"), ImageKind::OpenGraph),
                reference
            );
        }
    }

    #[test]
    fn test_rewrite_markdown_images() {
        let body = "Intro ![diagram](flow.png) and ![remote](https://x.io/a.png)\n\
                    ![titled](t.png \"A title\")";
        let out = rewrite_content_images(body, Some("site-a"));
        assert!(out.contains("![diagram](/images/site-a/blog/flow.png)"));
        assert!(out.contains("![remote](https://x.io/a.png)"));
        assert!(out.contains("![titled](/images/site-a/blog/t.png \"A title\")"));
    }

    #[test]
    fn test_rewrite_jsx_images() {
        let body = r#"<img src="chart.png" alt="c" /> <img alt='x' src='/abs.png'>"#;
        let out = rewrite_content_images(body, None);
        assert!(out.contains(r#"<img src="/images/shared/blog/chart.png" alt="c" />"#));
        assert!(out.contains("src='/abs.png'"));
    }

    #[test]
    fn test_rewrite_without_images_is_identity() {
        let body = "No pictures here. [a link](page.html)";
        assert_eq!(rewrite_content_images(body, Some("a")), body);
    }
}
