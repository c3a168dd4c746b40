//! Static site builder for Quire.
//!
//! [`StaticSiteBuilder`] renders every markdown page under the configured
//! source directory through the theme and writes the result, together with
//! theme assets and the optional search index, to an output directory.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use quire_build::StaticSiteBuilder;
//! use quire_theme::site_theme;
//!
//! let builder = StaticSiteBuilder::load(None, None, site_theme())?;
//! let out_dir = builder.config().build_resolved.out_dir.clone();
//! let report = builder.build(&out_dir)?;
//! println!("{} pages", report.pages);
//! # Ok(())
//! # }
//! ```

mod builder;

pub use builder::{BuildReport, StaticSiteBuilder};

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] quire_config::ConfigError),
    /// Pages could not be discovered or parsed.
    #[error(transparent)]
    Site(#[from] quire_site::SiteError),
    /// Output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
