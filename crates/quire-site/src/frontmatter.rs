//! Per-page options from the YAML frontmatter block.

use std::path::Path;

use quire_config::OutlineLevel;
use serde::Deserialize;

use crate::SiteError;

/// Page options set in frontmatter.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Frontmatter {
    /// Overrides the H1 / filename title.
    pub title: Option<String>,
    /// Overrides the site description in `<meta name="description">`.
    pub description: Option<String>,
    /// `false` hides the outline; a level overrides the configured levels.
    pub outline: Option<OutlineOverride>,
    /// `false` hides the sidebar.
    pub sidebar: Option<bool>,
    /// Page layout.
    pub layout: Layout,
}

/// Outline override from frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OutlineOverride {
    Enabled(bool),
    Level(OutlineLevel),
}

/// Page layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Documentation page with sidebar and outline.
    #[default]
    Doc,
    /// Landing page: no sidebar, no outline, no pager.
    Home,
}

impl Frontmatter {
    /// Parse frontmatter text captured by the renderer.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Frontmatter` if the YAML is malformed.
    pub fn parse(yaml: &str, path: &Path) -> Result<Self, SiteError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|source| SiteError::Frontmatter {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whether the sidebar is shown.
    #[must_use]
    pub fn show_sidebar(&self) -> bool {
        self.layout == Layout::Doc && self.sidebar != Some(false)
    }

    /// Outline levels for this page, or `None` when the outline is hidden.
    #[must_use]
    pub fn outline_level(&self, configured: OutlineLevel) -> Option<OutlineLevel> {
        if self.layout == Layout::Home {
            return None;
        }
        match self.outline {
            None | Some(OutlineOverride::Enabled(true)) => Some(configured),
            Some(OutlineOverride::Enabled(false)) => None,
            Some(OutlineOverride::Level(level)) => Some(level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Frontmatter {
        Frontmatter::parse(yaml, Path::new("page.md")).unwrap()
    }

    #[test]
    fn test_parse_empty() {
        let fm = parse("");
        assert!(fm.title.is_none());
        assert_eq!(fm.layout, Layout::Doc);
        assert!(fm.show_sidebar());
    }

    #[test]
    fn test_parse_fields() {
        let fm = parse("title: Setup\ndescription: Install Quire\nsidebar: false\n");
        assert_eq!(fm.title.as_deref(), Some("Setup"));
        assert_eq!(fm.description.as_deref(), Some("Install Quire"));
        assert!(!fm.show_sidebar());
    }

    #[test]
    fn test_home_layout_hides_sidebar_and_outline() {
        let fm = parse("layout: home\n");
        assert_eq!(fm.layout, Layout::Home);
        assert!(!fm.show_sidebar());
        assert_eq!(fm.outline_level(OutlineLevel::default()), None);
    }

    #[test]
    fn test_outline_override() {
        let default = OutlineLevel::default();
        assert_eq!(parse("").outline_level(default), Some(default));
        assert_eq!(parse("outline: false").outline_level(default), None);
        assert_eq!(parse("outline: true").outline_level(default), Some(default));
        assert_eq!(
            parse("outline: deep").outline_level(default),
            Some(OutlineLevel { min: 2, max: 6 })
        );
        assert_eq!(
            parse("outline: [2, 4]").outline_level(default),
            Some(OutlineLevel { min: 2, max: 4 })
        );
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Frontmatter::parse("title: [unclosed", Path::new("guide/setup.md")).unwrap_err();
        assert!(matches!(err, SiteError::Frontmatter { .. }));
        assert!(err.to_string().contains("guide/setup.md"));
    }

    #[test]
    fn test_unknown_layout() {
        assert!(Frontmatter::parse("layout: splash", Path::new("a.md")).is_err());
    }
}
