//! Site structure for Quire.
//!
//! This crate provides:
//! - [`scan_pages`]: markdown page discovery with routes and output paths
//! - [`Frontmatter`]: per-page options parsed from the YAML block
//! - [`SiteNavigation`]: nav bar, sidebar selection, pager and data lint
//! - [`SearchIndex`]: the local search index written at build time

mod frontmatter;
mod navigation;
mod page;
mod search;

use std::path::PathBuf;

pub use frontmatter::{Frontmatter, Layout, OutlineOverride};
pub use navigation::{LintIssue, Pager, PagerLink, SiteNavigation};
pub use page::{PageSource, href, scan_pages};
pub use search::{SearchEntry, SearchHeading, SearchIndex, strip_tags};

// Re-export TocEntry from quire-renderer for convenience
pub use quire_renderer::TocEntry;

/// Site error.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// I/O error while reading pages.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Frontmatter is not valid YAML or has unexpected fields.
    #[error("Invalid frontmatter in {}: {source}", .path.display())]
    Frontmatter {
        /// Page source file.
        path: PathBuf,
        /// YAML error.
        source: serde_yaml::Error,
    },
    /// Search index serialization failed.
    #[error("Search index error: {0}")]
    Json(#[from] serde_json::Error),
}
