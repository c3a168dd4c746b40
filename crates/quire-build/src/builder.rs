//! Page rendering and output writing.

use std::fs;
use std::path::{Path, PathBuf};

use quire_config::{CliSettings, Config, SearchConfig};
use quire_renderer::{
    FenceComponent, FenceComponentProcessor, HtmlBackend, MarkdownRenderer, TocEntry,
};
use quire_site::{
    Frontmatter, Layout, PageSource, Pager, SearchEntry, SearchIndex, SiteNavigation, href,
    scan_pages,
};
use quire_theme::{App, PageContext, Theme};

use crate::BuildError;

/// File name of the local search index.
const SEARCH_INDEX_FILE: &str = "search-index.json";

/// Directory for theme assets inside the output directory.
const ASSETS_DIR: &str = "assets";

/// Summary of a finished build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Number of pages rendered.
    pub pages: usize,
    /// Files written, relative to the output directory.
    pub files: Vec<PathBuf>,
    /// Non-fatal problems: renderer warnings, unresolved components and
    /// navigation lint issues.
    pub warnings: Vec<String>,
}

/// Builds a static site from configuration and a theme.
pub struct StaticSiteBuilder<T> {
    config: Config,
    theme: T,
}

/// Output of rendering one page.
struct RenderedPage {
    html: String,
    search_entry: SearchEntry,
}

impl<T: Theme> StaticSiteBuilder<T> {
    pub fn new(config: Config, theme: T) -> Self {
        Self { config, theme }
    }

    /// Load configuration (see [`Config::load`]) and create a builder.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Config` if the configuration cannot be loaded.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
        theme: T,
    ) -> Result<Self, BuildError> {
        let config = Config::load(config_path, cli_settings)?;
        Ok(Self::new(config, theme))
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render all pages into `out_dir`.
    ///
    /// Pages are processed in route order. Existing files in `out_dir` are
    /// overwritten; other files are left alone.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Site` if the source directory is missing or a
    /// page has malformed frontmatter, and `BuildError::Io` on read or write
    /// failures.
    pub fn build(&self, out_dir: &Path) -> Result<BuildReport, BuildError> {
        let mut app = App::new();
        self.theme.enhance_app(&mut app);
        tracing::debug!(
            components = ?app.components().names().collect::<Vec<_>>(),
            stylesheets = app.stylesheets().len(),
            "Theme applied"
        );

        let navigation = SiteNavigation::new(&self.config.theme);
        let mut report = BuildReport::default();
        for issue in navigation.lint() {
            tracing::warn!(location = %issue.location, "{}", issue.message);
            report.warnings.push(issue.to_string());
        }

        let source_dir = &self.config.build_resolved.source_dir;
        let pages = scan_pages(source_dir)?;
        tracing::info!(
            source_dir = %source_dir.display(),
            page_count = pages.len(),
            "Discovered pages"
        );

        fs::create_dir_all(out_dir)?;
        let mut search_index = SearchIndex::new();

        for page in &pages {
            let rendered = self.render_page(page, &app, &navigation, &mut report.warnings)?;
            write_output(out_dir, &page.output_path, &rendered.html, &mut report)?;
            search_index.push(rendered.search_entry);
            report.pages += 1;
        }

        for asset in app.stylesheets().iter().chain(app.scripts()) {
            let path = Path::new(ASSETS_DIR).join(&asset.name);
            write_output(out_dir, &path, &asset.content, &mut report)?;
        }

        if self.config.theme.search == SearchConfig::Local {
            let json = search_index.to_json()?;
            write_output(out_dir, Path::new(SEARCH_INDEX_FILE), &json, &mut report)?;
        }

        tracing::info!(
            out_dir = %out_dir.display(),
            pages = report.pages,
            files = report.files.len(),
            warnings = report.warnings.len(),
            "Build completed"
        );

        Ok(report)
    }

    fn render_page(
        &self,
        page: &PageSource,
        app: &App,
        navigation: &SiteNavigation,
        warnings: &mut Vec<String>,
    ) -> Result<RenderedPage, BuildError> {
        tracing::debug!(route = %page.route, "Rendering page");

        let markdown = fs::read_to_string(&page.source_path)?;
        let result = self.create_renderer(&page.base_dir).render_markdown(&markdown);
        let frontmatter =
            Frontmatter::parse(result.frontmatter.as_deref().unwrap_or_default(), &page.source_path)?;

        for warning in &result.warnings {
            tracing::warn!(route = %page.route, "{warning}");
            warnings.push(format!("{}: {warning}", page.route));
        }

        let resolved = app.components().resolve(&result.html);
        for name in &resolved.unresolved {
            tracing::warn!(route = %page.route, component = %name, "Unknown component");
            warnings.push(format!("{}: unknown component <{name}>", page.route));
        }

        let title = frontmatter
            .title
            .clone()
            .or(result.title)
            .unwrap_or_else(|| page.fallback_title.clone());
        let outline: Vec<TocEntry> = match frontmatter.outline_level(self.config.theme.outline.level) {
            Some(level) => result
                .toc
                .iter()
                .filter(|entry| level.contains(entry.level))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        let show_sidebar = frontmatter.show_sidebar();
        let pager = if frontmatter.layout == Layout::Doc && show_sidebar {
            navigation.pager(&page.route)
        } else {
            Pager::default()
        };
        let component_heads = app.components().head_snippets(&resolved.used);

        let html = self.theme.layout(&PageContext {
            config: &self.config,
            navigation,
            route: &page.route,
            title: &title,
            description: frontmatter.description.as_deref().unwrap_or_default(),
            layout: frontmatter.layout,
            content: &resolved.html,
            outline: &outline,
            show_sidebar,
            pager: &pager,
            component_heads: &component_heads,
            stylesheets: app.stylesheets(),
            scripts: app.scripts(),
        });

        let route = href(&page.route, self.config.build_resolved.clean_urls);
        let search_entry = SearchEntry::new(&title, &route, &result.toc, &result.html);

        Ok(RenderedPage { html, search_entry })
    }

    fn create_renderer(&self, base_path: &str) -> MarkdownRenderer<HtmlBackend> {
        let components = self
            .config
            .markdown
            .fence_components
            .iter()
            .map(|c| FenceComponent::new(c.lang.as_str(), c.component.as_str(), c.attribute.as_str()))
            .collect();

        MarkdownRenderer::<HtmlBackend>::new()
            .with_gfm(self.config.markdown.gfm)
            .with_title_extraction()
            .with_base_path(base_path)
            .with_processor(FenceComponentProcessor::new(components))
    }
}

fn write_output(
    out_dir: &Path,
    relative: &Path,
    content: &str,
    report: &mut BuildReport,
) -> Result<(), BuildError> {
    let path = out_dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, content)?;
    report.files.push(relative.to_path_buf());
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quire_theme::{DefaultTheme, site_theme};

    use super::*;

    fn config_for(root: &Path) -> Config {
        let mut config = Config::default_with_base(root);
        config.title = "Quire".to_owned();
        config
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_build_writes_pages_and_assets() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "docs/index.md", "# Welcome\n");
        write(dir.path(), "docs/guide/setup.md", "# Setup\n\n## Install\n");
        let out = dir.path().join("out");

        let report = StaticSiteBuilder::new(config_for(dir.path()), site_theme())
            .build(&out)
            .unwrap();

        assert_eq!(report.pages, 2);
        assert_eq!(
            report.files,
            vec![
                PathBuf::from("index.html"),
                PathBuf::from("guide/setup.html"),
                PathBuf::from("assets/default.css"),
                PathBuf::from("assets/custom.css"),
                PathBuf::from("assets/search.js"),
            ]
        );
        let setup = fs::read_to_string(out.join("guide/setup.html")).unwrap();
        assert!(setup.contains("<title>Setup | Quire</title>"));
        assert!(setup.contains("<a href=\"#install\">Install</a>"));
    }

    #[test]
    fn test_mermaid_requires_extension() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "docs/index.md", "```mermaid\ngraph TD; A-->B\n```\n");

        let base = StaticSiteBuilder::new(config_for(dir.path()), DefaultTheme)
            .build(&dir.path().join("base"))
            .unwrap();
        assert_eq!(base.warnings, ["/: unknown component <Mermaid>"]);

        let extended = StaticSiteBuilder::new(config_for(dir.path()), site_theme())
            .build(&dir.path().join("extended"))
            .unwrap();
        assert!(extended.warnings.is_empty());
        let html = fs::read_to_string(dir.path().join("extended/index.html")).unwrap();
        assert!(html.contains("<pre class=\"mermaid\">graph TD; A--&gt;B</pre>"));
        assert!(html.contains("mermaid.initialize"));
    }

    #[test]
    fn test_frontmatter_title_and_home_layout() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "docs/index.md",
            "---\ntitle: Start Here\nlayout: home\n---\n\n# Heading\n\n## Section\n",
        );

        StaticSiteBuilder::new(config_for(dir.path()), site_theme())
            .build(&dir.path().join("out"))
            .unwrap();

        let html = fs::read_to_string(dir.path().join("out/index.html")).unwrap();
        assert!(html.contains("<title>Start Here | Quire</title>"));
        assert!(html.contains("layout-home"));
        assert!(!html.contains("class=\"outline\""));
        assert!(!html.contains("title: Start Here"));
    }

    #[test]
    fn test_outline_filtered_to_levels() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "docs/page.md", "# Page\n\n## Two\n\n### Three\n\n#### Four\n");

        StaticSiteBuilder::new(config_for(dir.path()), site_theme())
            .build(&dir.path().join("out"))
            .unwrap();

        let html = fs::read_to_string(dir.path().join("out/page.html")).unwrap();
        assert!(html.contains("<a href=\"#two\">Two</a>"));
        assert!(html.contains("<a href=\"#three\">Three</a>"));
        assert!(!html.contains("<a href=\"#four\">Four</a>"));
    }

    #[test]
    fn test_invalid_frontmatter_fails() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "docs/index.md", "---\ntitle: [oops\n---\n");

        let err = StaticSiteBuilder::new(config_for(dir.path()), site_theme())
            .build(&dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, BuildError::Site(_)));
    }

    #[test]
    fn test_missing_source_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = StaticSiteBuilder::new(config_for(dir.path()), site_theme())
            .build(&dir.path().join("out"))
            .unwrap_err();
        assert!(err.to_string().contains("Source directory not found"));
    }
}
