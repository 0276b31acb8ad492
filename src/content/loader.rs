//! Content loader - reads posts from the located content directories

use lazy_static::lazy_static;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use super::images::{resolve_optional, rewrite_content_images, ImageKind};
use super::locator::{resolve_content_directories, ContentDir};
use super::post::{derive_excerpt, reading_time, slug_from_stem};
use super::{BodyRenderer, FrontMatter, MarkdownRenderer, Post};
use crate::config::ContentConfig;
use crate::error::ContentError;

lazy_static! {
    /// Loading syntect's syntax and theme sets is costly; build them once
    static ref DEFAULT_RENDERER: Arc<dyn BodyRenderer> = Arc::new(MarkdownRenderer::new());
}

/// Front-matter keys that would clash with derived post fields
const RESERVED_KEYS: [&str; 4] = ["slug", "content", "renderedBody", "source"];

/// Loads posts for one configuration.
///
/// Cheap to clone; clones share the config and the renderer.
#[derive(Clone)]
pub struct ContentLoader {
    config: Arc<ContentConfig>,
    renderer: Arc<dyn BodyRenderer>,
}

impl ContentLoader {
    /// Create a loader using the shared default Markdown renderer
    pub fn new(config: ContentConfig) -> Self {
        Self::with_renderer(config, Arc::clone(&DEFAULT_RENDERER))
    }

    /// Create a loader with a custom body renderer
    pub fn with_renderer(config: ContentConfig, renderer: Arc<dyn BodyRenderer>) -> Self {
        Self {
            config: Arc::new(config),
            renderer,
        }
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// Load every valid post visible to the configured site.
    ///
    /// Directories and files are read concurrently; the result is ordered by
    /// directory, then file name. Unreadable directories and malformed files
    /// are logged and skipped.
    pub async fn load_all_posts(&self) -> Vec<Post> {
        let dirs = resolve_content_directories(&self.config);

        let handles: Vec<_> = dirs
            .into_iter()
            .map(|dir| {
                let loader = self.clone();
                tokio::spawn(async move { loader.load_directory(dir).await })
            })
            .collect();

        let mut posts = Vec::new();
        for handle in handles {
            match handle.await {
                Ok(dir_posts) => posts.extend(dir_posts),
                Err(e) => tracing::error!("Content directory task failed: {}", e),
            }
        }

        posts.retain(|post| self.is_visible(post));

        let posts = dedupe_slugs(posts);
        tracing::debug!("Loaded {} posts", posts.len());
        posts
    }

    /// Load the first post whose derived slug matches, searching directories
    /// in order.
    ///
    /// Candidates that `load_all_posts` would drop (malformed or hidden from
    /// the configured site) are skipped and the search goes on. Render and IO
    /// problems with a matched file are returned instead of being skipped.
    pub async fn load_post_by_slug(&self, slug: &str) -> Result<Post, ContentError> {
        for dir in resolve_content_directories(&self.config) {
            let files = match self.list_files(&dir.path).await {
                Ok(files) => files,
                Err(e) => {
                    tracing::warn!("{}", e);
                    continue;
                }
            };

            let matches = files
                .into_iter()
                .filter(|path| slug_for_path(path, &self.config).as_deref() == Some(slug));

            for path in matches {
                match self.load_file(&path, dir.site.as_deref()).await {
                    Ok(post) if self.is_visible(&post) => return Ok(post),
                    Ok(post) => {
                        tracing::debug!("Skipping {:?}: not shown on this site", post.source);
                    }
                    Err(e @ ContentError::MalformedEntry { .. }) => {
                        tracing::warn!("Skipping entry: {}", e);
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Err(ContentError::NotFound {
            slug: slug.to_string(),
        })
    }

    fn is_visible(&self, post: &Post) -> bool {
        self.config
            .site()
            .map_or(true, |site| post.is_visible_on(site))
    }

    async fn load_directory(&self, dir: ContentDir) -> Vec<Post> {
        let files = match self.list_files(&dir.path).await {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!("{}", e);
                return Vec::new();
            }
        };

        let handles: Vec<_> = files
            .into_iter()
            .map(|path| {
                let loader = self.clone();
                let site = dir.site.clone();
                tokio::spawn(async move { loader.load_file(&path, site.as_deref()).await })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => tracing::error!("Content file task failed: {}", e),
            }
        }

        let (loaded, failed): (Vec<_>, Vec<_>) = results.into_iter().partition(Result::is_ok);
        for err in failed.into_iter().filter_map(Result::err) {
            tracing::warn!("Skipping entry: {}", err);
        }

        loaded.into_iter().filter_map(Result::ok).collect()
    }

    async fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
        let dir = dir.to_path_buf();
        let config = Arc::clone(&self.config);
        let task_dir = dir.clone();

        tokio::task::spawn_blocking(move || list_content_files(&task_dir, &config))
            .await
            .map_err(|e| ContentError::Io {
                path: dir,
                source: io::Error::new(io::ErrorKind::Other, e),
            })?
    }

    async fn load_file(&self, path: &Path, site: Option<&str>) -> Result<Post, ContentError> {
        tracing::debug!("Loading {:?}", path);
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ContentError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        // Parsing and highlighting are CPU-bound
        let loader = self.clone();
        let task_path = path.to_path_buf();
        let site = site.map(str::to_string);
        tokio::task::spawn_blocking(move || {
            build_post(
                &task_path,
                &raw,
                site.as_deref(),
                &loader.config,
                loader.renderer.as_ref(),
            )
        })
        .await
        .map_err(|e| ContentError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::Other, e),
        })?
    }
}

/// Load every visible post for `config` with the default renderer
pub async fn load_all_posts(config: &ContentConfig) -> Vec<Post> {
    ContentLoader::new(config.clone()).load_all_posts().await
}

/// Load one post by slug for `config` with the default renderer
pub async fn load_post_by_slug(slug: &str, config: &ContentConfig) -> Result<Post, ContentError> {
    ContentLoader::new(config.clone())
        .load_post_by_slug(slug)
        .await
}

/// Content files directly inside `dir`, sorted by file name
fn list_content_files(dir: &Path, config: &ContentConfig) -> Result<Vec<PathBuf>, ContentError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "walk failed"));
                return Err(ContentError::MissingDirectory {
                    path: dir.to_path_buf(),
                    source,
                });
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                continue;
            }
        };

        let is_content = entry
            .file_name()
            .to_str()
            .map(|name| config.strip_extension(name).is_some())
            .unwrap_or(false);

        if entry.file_type().is_file() && is_content {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn slug_for_path(path: &Path, config: &ContentConfig) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    config.strip_extension(name).map(slug_from_stem)
}

/// Build a post from a file's raw text.
///
/// Shared by both load paths so derived fields never differ between them.
pub fn build_post(
    path: &Path,
    raw: &str,
    site: Option<&str>,
    config: &ContentConfig,
    renderer: &dyn BodyRenderer,
) -> Result<Post, ContentError> {
    let slug = slug_for_path(path, config)
        .ok_or_else(|| ContentError::malformed(path, "not a content file"))?;
    if slug.is_empty() {
        return Err(ContentError::malformed(path, "empty slug"));
    }

    let (fm, body) = FrontMatter::parse(raw).map_err(|e| ContentError::front_matter(path, e))?;

    let title = fm
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ContentError::malformed(path, "missing title"))?;

    let image = resolve_optional(fm.image.as_deref(), site, ImageKind::Blog);
    let og_image = resolve_optional(fm.og_image.as_deref(), site, ImageKind::OpenGraph);

    let content = rewrite_content_images(body, site);

    let reading_time = fm
        .reading_time
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| reading_time(&content));
    let excerpt = fm
        .excerpt
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| derive_excerpt(&content));

    let rendered_body = if config.serialize_content {
        let doc = renderer
            .render_body(&content)
            .map_err(|source| ContentError::Render {
                path: path.to_path_buf(),
                source,
            })?;
        Some(doc)
    } else {
        None
    };

    let mut extra = fm.extra;
    extra.retain(|key, _| !RESERVED_KEYS.contains(&key.as_str()));

    Ok(Post {
        slug,
        title,
        description: fm.description.unwrap_or_default(),
        date: fm.date.unwrap_or_default(),
        author: fm.author,
        category: fm.category,
        tags: fm.tags,
        image,
        og_image,
        canonical: fm.canonical,
        excerpt,
        reading_time,
        published: fm.published,
        featured: fm.featured,
        show_on: fm.show_on,
        author_site: fm.author_site,
        author_linkedin: fm.author_linkedin,
        author_twitter: fm.author_twitter,
        content,
        rendered_body,
        source: path.to_path_buf(),
        extra,
    })
}

/// Keep the first post for each slug
fn dedupe_slugs(posts: Vec<Post>) -> Vec<Post> {
    let mut seen = HashSet::new();
    posts
        .into_iter()
        .filter(|post| {
            let first = seen.insert(post.slug.clone());
            if !first {
                tracing::warn!(
                    "Duplicate slug {:?} in {:?}, keeping the earlier post",
                    post.slug,
                    post.source
                );
            }
            first
        })
        .collect()
}
