//! Content directory discovery

use std::fs;
use std::path::{Component, Path, PathBuf};

use super::images::SHARED_SITE;
use crate::config::ContentConfig;

/// A directory to scan, and the site its relative images belong to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDir {
    pub path: PathBuf,
    /// `Some(site)` when the directory is that site's own content
    pub site: Option<String>,
}

/// Per-site content directory, relative to a root
fn site_content_path(root: &Path, site: &str) -> PathBuf {
    root.join("sites").join(site).join("content").join("blog")
}

/// Roots tried in order, so that the loader works both from the repository
/// root and from one level below it (e.g. an app inside a monorepo)
fn candidate_roots(base_dir: &Path) -> [PathBuf; 2] {
    [base_dir.to_path_buf(), base_dir.join("..")]
}

/// Determine the ordered list of directories to scan.
///
/// Explicit `content_dirs` are returned joined to `base_dir` without any
/// existence check. Otherwise the site directory comes first, then the
/// shared one; a directory that cannot be found is logged and left out, so
/// the result may be empty.
pub fn resolve_content_directories(config: &ContentConfig) -> Vec<ContentDir> {
    let base_dir = &config.base_dir;
    let site = config.site();

    if !config.content_dirs.is_empty() {
        return config
            .content_dirs
            .iter()
            .map(|dir| {
                let path = base_dir.join(dir);
                let site = site
                    .filter(|s| belongs_to_site(&path, s))
                    .map(str::to_string);
                ContentDir { path, site }
            })
            .collect();
    }

    let mut dirs = Vec::new();

    if let Some(site) = site {
        let candidates: Vec<PathBuf> = candidate_roots(base_dir)
            .iter()
            .map(|root| site_content_path(root, site))
            .collect();

        match first_existing(&candidates) {
            Some(path) => dirs.push(ContentDir {
                path,
                site: Some(site.to_string()),
            }),
            None => tracing::warn!(
                "Could not access content directory for site {:?} (tried {:?})",
                site,
                candidates
            ),
        }
    }

    if config.include_shared {
        let mut candidates = Vec::new();
        for root in candidate_roots(base_dir) {
            candidates.push(site_content_path(&root, SHARED_SITE));
            candidates.push(root.join(SHARED_SITE).join("content").join("blog"));
        }

        match first_existing(&candidates) {
            Some(path) => {
                // A site literally named "shared" would otherwise be scanned twice
                if !dirs.iter().any(|d| same_dir(&d.path, &path)) {
                    dirs.push(ContentDir { path, site: None });
                }
            }
            None => tracing::warn!(
                "Could not access shared content directory (tried {:?})",
                candidates
            ),
        }
    }

    dirs
}

fn first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find_map(|path| match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Some(path.clone()),
        Ok(_) => {
            tracing::debug!("{:?} exists but is not a directory", path);
            None
        }
        Err(e) => {
            tracing::debug!("Skipping {:?}: {}", path, e);
            None
        }
    })
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Whether `path` contains a `sites/<site>` segment
fn belongs_to_site(path: &Path, site: &str) -> bool {
    let names: Vec<_> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => name.to_str(),
            _ => None,
        })
        .collect();

    names.windows(2).any(|w| w[0] == "sites" && w[1] == site)
}
