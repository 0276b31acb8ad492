//! URL helper functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SCHEME_RE: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap();
}

/// Whether a reference already carries a URL scheme (`https:`, `data:`, ...)
pub fn has_scheme(reference: &str) -> bool {
    SCHEME_RE.is_match(reference)
}

/// Whether a reference can be used as-is, without prefixing a directory
pub fn is_absolute_reference(reference: &str) -> bool {
    reference.starts_with('/') || has_scheme(reference)
}

/// Public URL of a post page
///
/// # Examples
/// ```ignore
/// post_url("https://example.com/", "hello") // -> "https://example.com/blog/hello"
/// ```
pub fn post_url(site_url: &str, slug: &str) -> String {
    format!("{}/blog/{}", site_url.trim_end_matches('/'), slug)
}

/// Turn a root-relative path into a full URL; full URLs pass through
pub fn full_url(site_url: &str, path: &str) -> String {
    if has_scheme(path) || path.starts_with("//") {
        return path.to_string();
    }

    let base = site_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Join a site URL and a file name served from its root
pub fn site_file_url(site_url: &str, file: &str) -> String {
    format!(
        "{}/{}",
        site_url.trim_end_matches('/'),
        file.trim_start_matches('/')
    )
}
