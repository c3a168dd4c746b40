//! `quire build` command implementation.

use std::path::PathBuf;

use clap::Args;
use quire_build::StaticSiteBuilder;
use quire_config::CliSettings;
use quire_theme::site_theme;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    pub(crate) source_dir: Option<PathBuf>,

    /// Output directory (overrides config, default: .quire/dist).
    #[arg(short, long)]
    pub(crate) out_dir: Option<PathBuf>,

    /// Link pages without the .html suffix.
    #[arg(long)]
    pub(crate) clean_urls: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            out_dir: self.out_dir,
            clean_urls: self.clean_urls.then_some(true),
        };
        let builder =
            StaticSiteBuilder::load(self.config.as_deref(), Some(&cli_settings), site_theme())?;
        let config = builder.config();
        let out_dir = config.build_resolved.out_dir.clone();

        if !config.title.is_empty() {
            output.highlight(&config.title);
        }
        output.info(&format!(
            "Source: {}",
            config.build_resolved.source_dir.display()
        ));
        output.info(&format!("Output: {}", out_dir.display()));

        let report = builder.build(&out_dir)?;

        if !report.warnings.is_empty() {
            output.warning(&format!("{} warning(s):", report.warnings.len()));
            output.warnings(&report.warnings);
        }
        output.success(&format!(
            "Built {} page(s) to {}",
            report.pages,
            out_dir.display()
        ));
        Ok(())
    }
}
