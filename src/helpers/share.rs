//! Social share links for a post

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

/// Characters left alone by JavaScript's `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Share targets offered next to a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub linkedin: String,
    pub whatsapp: String,
    pub twitter: String,
    /// The raw post URL, for "copy link"
    pub copy: String,
}

/// Encode a URL query component
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Build share links for a post URL and title
pub fn share_links(post_url: &str, title: &str) -> ShareLinks {
    let url = encode_component(post_url);
    let text = encode_component(title);

    ShareLinks {
        linkedin: format!(
            "https://www.linkedin.com/sharing/share-offsite/?url={}",
            url
        ),
        whatsapp: format!(
            "https://api.whatsapp.com/send?text={}",
            encode_component(&format!("{} {}", title, post_url))
        ),
        twitter: format!("https://twitter.com/intent/tweet?url={}&text={}", url, text),
        copy: post_url.to_string(),
    }
}
