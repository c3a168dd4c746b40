//! `quire check` command implementation.

use std::path::PathBuf;

use clap::Args;
use quire_config::Config;
use quire_site::{SiteNavigation, scan_pages};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl CheckArgs {
    /// Validate configuration and navigation data.
    ///
    /// Fails when the config does not load, the source directory is missing,
    /// or navigation lint reports any issue.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let pages = scan_pages(&config.build_resolved.source_dir)?;
        output.info(&format!(
            "Found {} page(s) in {}",
            pages.len(),
            config.build_resolved.source_dir.display()
        ));

        let issues: Vec<String> = SiteNavigation::new(&config.theme)
            .lint()
            .iter()
            .map(ToString::to_string)
            .collect();
        if !issues.is_empty() {
            output.warnings(&issues);
            return Err(CliError::Validation(format!(
                "{} navigation issue(s) found",
                issues.len()
            )));
        }

        output.success("Navigation OK");
        Ok(())
    }
}
