//! Page discovery by filesystem walking.
//!
//! Every `.md` file under the source directory is a page. Hidden files and
//! directories are skipped. `index.md` maps to its directory route.

use std::fs;
use std::path::{Path, PathBuf};

use crate::SiteError;

/// A markdown page found under the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSource {
    /// Absolute path to the markdown file.
    pub source_path: PathBuf,
    /// Site route (e.g. `/`, `/guide/`, `/guide/setup`).
    pub route: String,
    /// Output file relative to the output directory.
    pub output_path: PathBuf,
    /// Directory of the page relative to the source root, used to resolve
    /// relative links (e.g. `guide` for `guide/setup.md`).
    pub base_dir: String,
    /// Title used when neither frontmatter nor an H1 provides one.
    pub fallback_title: String,
}

/// Discover pages under `source_dir`, sorted by route.
///
/// # Errors
///
/// Returns `SiteError::SourceNotFound` if `source_dir` is missing, or
/// `SiteError::Io` if a directory cannot be read.
pub fn scan_pages(source_dir: &Path) -> Result<Vec<PageSource>, SiteError> {
    if !source_dir.is_dir() {
        return Err(SiteError::SourceNotFound(source_dir.to_path_buf()));
    }
    let mut pages = Vec::new();
    scan_directory(source_dir, "", &mut pages)?;
    pages.sort_by(|a, b| a.route.cmp(&b.route));
    tracing::debug!(dir = %source_dir.display(), count = pages.len(), "Scanned pages");
    Ok(pages)
}

fn scan_directory(dir: &Path, prefix: &str, pages: &mut Vec<PageSource>) -> Result<(), SiteError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type()?.is_dir() {
            let child_prefix = join_prefix(prefix, &name);
            scan_directory(&path, &child_prefix, pages)?;
        } else if let Some(stem) = name.strip_suffix(".md") {
            pages.push(page_for(path.clone(), prefix, stem));
        }
    }
    Ok(())
}

fn page_for(source_path: PathBuf, prefix: &str, stem: &str) -> PageSource {
    let is_index = stem == "index";
    let route = if is_index {
        if prefix.is_empty() {
            "/".to_owned()
        } else {
            format!("/{prefix}/")
        }
    } else {
        format!("/{}", join_prefix(prefix, stem))
    };

    let mut output_path: PathBuf = prefix.split('/').filter(|s| !s.is_empty()).collect();
    output_path.push(format!("{stem}.html"));

    let fallback_title = if is_index {
        prefix.rsplit('/').next().filter(|s| !s.is_empty()).unwrap_or("Home")
    } else {
        stem
    };

    PageSource {
        source_path,
        route,
        output_path,
        base_dir: prefix.to_owned(),
        fallback_title: fallback_title.to_owned(),
    }
}

fn join_prefix(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Link target as emitted in generated markup.
///
/// Without clean URLs, internal page links (`/guide/setup`) get an `.html`
/// suffix before any query or fragment. Directory routes, links with an
/// extension and external links are emitted unchanged.
#[must_use]
pub fn href(link: &str, clean_urls: bool) -> String {
    if clean_urls || !link.starts_with('/') || link.starts_with("//") {
        return link.to_owned();
    }
    let split = link.find(['#', '?']).unwrap_or(link.len());
    let (path, suffix) = link.split_at(split);
    let last_segment = path.rsplit('/').next().unwrap_or_default();
    if path.ends_with('/') || last_segment.contains('.') {
        return link.to_owned();
    }
    format!("{path}.html{suffix}")
}
