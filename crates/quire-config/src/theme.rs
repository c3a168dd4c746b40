//! `[theme]` section: navigation, sidebar, footer, search and outline.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Theme configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Logo image path shown in the nav bar.
    pub logo: Option<String>,
    /// Text shown next to the logo. Falls back to the site title.
    pub site_title: Option<String>,
    /// Top navigation tree.
    pub nav: Vec<NavItem>,
    /// Sidebar sections, either global or keyed by path prefix.
    pub sidebar: SidebarConfig,
    /// Footer shown at the bottom of every page.
    pub footer: Option<FooterConfig>,
    /// Search provider.
    pub search: SearchConfig,
    /// Outline (on-this-page) settings.
    pub outline: OutlineConfig,
}

/// Entry in the nav tree or a sidebar section.
///
/// A table with `items` is a group; a table with only `link` is a leaf. A
/// table with neither does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NavItem {
    /// Expandable group of child entries.
    Group {
        text: String,
        items: Vec<NavItem>,
        /// Optional landing page for the group header.
        #[serde(default)]
        link: Option<String>,
        /// `Some(true)` renders collapsed, `Some(false)` collapsible but open.
        #[serde(default)]
        collapsed: Option<bool>,
    },
    /// Direct link to a page.
    Link { text: String, link: String },
}

impl NavItem {
    /// Create a leaf entry.
    pub fn link(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self::Link {
            text: text.into(),
            link: link.into(),
        }
    }

    /// Create a group entry.
    pub fn group(text: impl Into<String>, items: Vec<NavItem>) -> Self {
        Self::Group {
            text: text.into(),
            items,
            link: None,
            collapsed: None,
        }
    }

    /// Display text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Group { text, .. } | Self::Link { text, .. } => text,
        }
    }

    /// Link target, if any.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Group { link, .. } => link.as_deref(),
            Self::Link { link, .. } => Some(link),
        }
    }

    /// Child entries (empty for leaves).
    #[must_use]
    pub fn items(&self) -> &[NavItem] {
        match self {
            Self::Group { items, .. } => items,
            Self::Link { .. } => &[],
        }
    }
}

/// Named group of entries shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SidebarSection {
    pub text: String,
    pub items: Vec<NavItem>,
    #[serde(default)]
    pub collapsed: Option<bool>,
}

/// Sidebar configuration.
///
/// A plain array applies to every page. A table maps path prefixes to
/// sections; the longest matching prefix wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SidebarConfig {
    Global(Vec<SidebarSection>),
    ByPrefix(BTreeMap<String, Vec<SidebarSection>>),
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self::ByPrefix(BTreeMap::new())
    }
}

impl SidebarConfig {
    /// All (prefix, sections) pairs. A global sidebar is keyed by `/`.
    #[must_use]
    pub fn entries(&self) -> Vec<(&str, &[SidebarSection])> {
        match self {
            Self::Global(sections) => vec![("/", sections.as_slice())],
            Self::ByPrefix(map) => map
                .iter()
                .map(|(prefix, sections)| (prefix.as_str(), sections.as_slice()))
                .collect(),
        }
    }
}

/// Footer content.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub message: Option<String>,
    pub copyright: Option<String>,
}

/// Search provider selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum SearchConfig {
    /// No search box.
    #[default]
    None,
    /// Search over a JSON index generated at build time.
    Local,
    /// Algolia DocSearch.
    Algolia {
        app_id: String,
        api_key: String,
        index_name: String,
    },
}

/// Outline settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Heading levels included in the outline.
    pub level: OutlineLevel,
    /// Outline heading text.
    pub label: String,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            level: OutlineLevel::default(),
            label: "On this page".to_owned(),
        }
    }
}

/// Inclusive range of heading levels shown in the outline.
///
/// Written as a single level (`2`), a pair (`[2, 3]`), or `"deep"` (`[2, 6]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "OutlineLevelRaw")]
pub struct OutlineLevel {
    pub min: u8,
    pub max: u8,
}

impl Default for OutlineLevel {
    fn default() -> Self {
        Self { min: 2, max: 3 }
    }
}

impl OutlineLevel {
    /// Whether a heading of `level` belongs in the outline.
    #[must_use]
    pub fn contains(self, level: u8) -> bool {
        (self.min..=self.max).contains(&level)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OutlineLevelRaw {
    Single(u8),
    Range([u8; 2]),
    Named(String),
}

impl TryFrom<OutlineLevelRaw> for OutlineLevel {
    type Error = String;

    fn try_from(raw: OutlineLevelRaw) -> Result<Self, Self::Error> {
        let (min, max) = match raw {
            OutlineLevelRaw::Single(level) => (level, level),
            OutlineLevelRaw::Range([min, max]) => (min, max),
            OutlineLevelRaw::Named(name) if name == "deep" => (2, 6),
            OutlineLevelRaw::Named(name) => {
                return Err(format!("unknown outline level \"{name}\""));
            }
        };
        if !(1..=6).contains(&min) || !(1..=6).contains(&max) {
            return Err(format!("outline levels must be between 1 and 6, got [{min}, {max}]"));
        }
        if min > max {
            return Err(format!("outline level range [{min}, {max}] is reversed"));
        }
        Ok(Self { min, max })
    }
}
