//! Content module - locating, parsing and building posts

mod frontmatter;
pub mod images;
pub mod loader;
pub mod locator;
mod markdown;
mod post;

pub use frontmatter::{FrontMatter, FrontMatterError};
pub use images::{resolve_image_path, rewrite_content_images, ImageKind};
pub use loader::{load_all_posts, load_post_by_slug, ContentLoader};
pub use locator::{resolve_content_directories, ContentDir};
pub use markdown::{BodyRenderer, Heading, MarkdownRenderer, RenderError, RenderedDocument};
pub use post::{derive_excerpt, reading_time, slug_from_stem, word_count, Post};
