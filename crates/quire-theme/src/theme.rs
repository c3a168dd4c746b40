//! Theme trait and the site's theme extension.

use quire_config::Config;
use quire_renderer::TocEntry;
use quire_site::{Layout, Pager, SiteNavigation};

use crate::app::{App, Asset};
use crate::default_theme::DefaultTheme;
use crate::mermaid::MermaidComponent;

/// Stylesheet layered over the base theme.
const CUSTOM_CSS: &str = include_str!("../assets/custom.css");

/// Everything a layout needs to render one page.
pub struct PageContext<'a> {
    pub config: &'a Config,
    pub navigation: &'a SiteNavigation,
    /// Route of the page (e.g. `/guide/setup`).
    pub route: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub layout: Layout,
    /// Page HTML with components resolved.
    pub content: &'a str,
    /// Outline entries, already filtered to the page's levels.
    pub outline: &'a [TocEntry],
    pub show_sidebar: bool,
    pub pager: &'a Pager,
    /// Head snippets of the components used on this page.
    pub component_heads: &'a [&'a str],
    pub stylesheets: &'a [Asset],
    pub scripts: &'a [Asset],
}

/// A site theme.
pub trait Theme {
    /// Render the complete HTML document for a page.
    fn layout(&self, page: &PageContext<'_>) -> String;

    /// Register components and assets before any page is rendered.
    fn enhance_app(&self, _app: &mut App) {}
}

/// Theme derived from a base theme.
///
/// Keeps the base layout unchanged. On enhancement it runs the base
/// theme's enhancement first, then registers the `Mermaid` component and
/// the custom stylesheet.
pub struct ThemeExtension<T> {
    base: T,
}

impl<T: Theme> ThemeExtension<T> {
    pub fn new(base: T) -> Self {
        Self { base }
    }
}

impl<T: Theme> Theme for ThemeExtension<T> {
    fn layout(&self, page: &PageContext<'_>) -> String {
        self.base.layout(page)
    }

    fn enhance_app(&self, app: &mut App) {
        self.base.enhance_app(app);
        app.component(MermaidComponent);
        app.stylesheet("custom.css", CUSTOM_CSS);
    }
}

/// The site theme: the default theme extended with Mermaid support.
#[must_use]
pub fn site_theme() -> ThemeExtension<DefaultTheme> {
    ThemeExtension::new(DefaultTheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_registers_after_base() {
        let mut app = App::new();
        site_theme().enhance_app(&mut app);

        let names: Vec<_> = app.stylesheets().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["default.css", "custom.css"]);
        assert!(app.components().contains("Mermaid"));
    }

    #[test]
    fn test_base_theme_has_no_mermaid() {
        let mut app = App::new();
        DefaultTheme.enhance_app(&mut app);
        assert!(!app.components().contains("Mermaid"));
    }

    struct Recording;

    impl Theme for Recording {
        fn layout(&self, page: &PageContext<'_>) -> String {
            format!("layout:{}", page.route)
        }

        fn enhance_app(&self, app: &mut App) {
            app.stylesheet("custom.css", "base");
        }
    }

    #[test]
    fn test_extension_delegates_layout_and_overrides_base_assets() {
        let theme = ThemeExtension::new(Recording);
        let mut app = App::new();
        theme.enhance_app(&mut app);
        assert_eq!(app.stylesheets()[0].content, CUSTOM_CSS);

        let config = Config::default();
        let navigation = SiteNavigation::default();
        let pager = Pager::default();
        let page = PageContext {
            config: &config,
            navigation: &navigation,
            route: "/guide/",
            title: "Guide",
            description: "",
            layout: Layout::Doc,
            content: "",
            outline: &[],
            show_sidebar: true,
            pager: &pager,
            component_heads: &[],
            stylesheets: &[],
            scripts: &[],
        };
        assert_eq!(theme.layout(&page), "layout:/guide/");
    }
}
