//! Navigation built from the theme configuration.
//!
//! The nav tree and sidebar map are loaded once and never mutated. Sidebar
//! selection picks the longest configured prefix of the page route.

use std::collections::HashSet;
use std::fmt;

use quire_config::{NavItem, SidebarSection, ThemeConfig};
use serde::Serialize;

/// Navigation for the whole site.
#[derive(Debug, Clone, Default)]
pub struct SiteNavigation {
    nav: Vec<NavItem>,
    /// Sidebars ordered by descending prefix length.
    sidebars: Vec<(String, Vec<SidebarSection>)>,
}

/// Previous and next pages in sidebar order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pager {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PagerLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PagerLink>,
}

/// Pager target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagerLink {
    pub text: String,
    pub link: String,
}

/// Navigation data problem found by [`SiteNavigation::lint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    /// Config path of the offending entry (e.g. `theme.nav[1].items[0]`).
    pub location: String,
    pub message: String,
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

impl SiteNavigation {
    /// Build navigation from theme configuration.
    #[must_use]
    pub fn new(theme: &ThemeConfig) -> Self {
        let mut sidebars: Vec<_> = theme
            .sidebar
            .entries()
            .into_iter()
            .map(|(prefix, sections)| (sidebar_key(prefix), sections.to_vec()))
            .collect();
        sidebars.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Self {
            nav: theme.nav.clone(),
            sidebars,
        }
    }

    /// Top navigation tree.
    #[must_use]
    pub fn nav(&self) -> &[NavItem] {
        &self.nav
    }

    /// Sidebar sections for the page at `route`, empty if none match.
    #[must_use]
    pub fn sidebar_for(&self, route: &str) -> &[SidebarSection] {
        let route = sidebar_key(route);
        self.sidebars
            .iter()
            .find(|(prefix, _)| route.starts_with(prefix.as_str()))
            .map(|(_, sections)| sections.as_slice())
            .unwrap_or_default()
    }

    /// Whether `link` points at the page at `route`.
    ///
    /// Links ending in `/` (other than the root) are also active on the pages
    /// directly inside that directory.
    #[must_use]
    pub fn is_active(link: &str, route: &str) -> bool {
        let link = normalize(link);
        let route = normalize(route);
        if link == route {
            return true;
        }
        link != "/" && link.ends_with('/') && parent_route(&route) == link
    }

    /// Whether `link` is exactly the page at `route`.
    #[must_use]
    pub fn is_current(link: &str, route: &str) -> bool {
        normalize(link) == normalize(route)
    }

    /// Whether any entry in `item` (or the item itself) is active.
    #[must_use]
    pub fn is_item_active(item: &NavItem, route: &str) -> bool {
        item.target().is_some_and(|link| Self::is_active(link, route))
            || item.items().iter().any(|child| Self::is_item_active(child, route))
    }

    /// Previous and next sidebar links around `route`.
    #[must_use]
    pub fn pager(&self, route: &str) -> Pager {
        let mut links = Vec::new();
        for section in self.sidebar_for(route) {
            collect_links(&section.items, &mut links);
        }

        let Some(pos) = links.iter().position(|l| Self::is_current(&l.link, route)) else {
            return Pager::default();
        };

        Pager {
            prev: pos.checked_sub(1).and_then(|i| links.get(i)).cloned(),
            next: links.get(pos + 1).cloned(),
        }
    }

    /// Check navigation data quality.
    ///
    /// Every link must be non-empty and start with `/`, every group must have
    /// at least one child, and no two siblings may share the same text.
    #[must_use]
    pub fn lint(&self) -> Vec<LintIssue> {
        let mut issues = Vec::new();
        lint_items(&self.nav, "theme.nav", &mut issues);

        let mut prefixes: Vec<_> = self.sidebars.iter().collect();
        prefixes.sort_by(|(a, _), (b, _)| a.cmp(b));
        for (prefix, sections) in prefixes {
            let base = format!("theme.sidebar[\"{prefix}\"]");
            check_unique_text(sections.iter().map(|s| s.text.as_str()), &base, &mut issues);
            for (i, section) in sections.iter().enumerate() {
                let location = format!("{base}[{i}]");
                if section.items.is_empty() {
                    issues.push(issue(&location, "section has no items"));
                }
                lint_items(&section.items, &format!("{location}.items"), &mut issues);
            }
        }
        issues
    }
}

fn collect_links(items: &[NavItem], links: &mut Vec<PagerLink>) {
    for item in items {
        if let Some(link) = item.target() {
            links.push(PagerLink {
                text: item.text().to_owned(),
                link: link.to_owned(),
            });
        }
        collect_links(item.items(), links);
    }
}

fn lint_items(items: &[NavItem], base: &str, issues: &mut Vec<LintIssue>) {
    check_unique_text(items.iter().map(NavItem::text), base, issues);

    for (i, item) in items.iter().enumerate() {
        let location = format!("{base}[{i}]");
        if let Some(link) = item.target() {
            if link.is_empty() {
                issues.push(issue(&location, "link is empty"));
            } else if !link.starts_with('/') {
                issues.push(issue(&location, &format!("link \"{link}\" must start with /")));
            }
        }
        if let NavItem::Group { items, .. } = item {
            if items.is_empty() {
                issues.push(issue(&location, "group has no items"));
            }
            lint_items(items, &format!("{location}.items"), issues);
        }
    }
}

fn check_unique_text<'a>(
    texts: impl Iterator<Item = &'a str>,
    base: &str,
    issues: &mut Vec<LintIssue>,
) {
    let mut seen = HashSet::new();
    for (i, text) in texts.enumerate() {
        if !seen.insert(text) {
            issues.push(issue(
                &format!("{base}[{i}]"),
                &format!("duplicate sibling text \"{text}\""),
            ));
        }
    }
}

fn issue(location: &str, message: &str) -> LintIssue {
    LintIssue {
        location: location.to_owned(),
        message: message.to_owned(),
    }
}

/// Strip fragment, query, `.html`/`.md` suffixes and trailing `index`.
fn normalize(link: &str) -> String {
    let end = link.find(['#', '?']).unwrap_or(link.len());
    let path = &link[..end];
    let path = path
        .strip_suffix(".html")
        .or_else(|| path.strip_suffix(".md"))
        .unwrap_or(path);
    let path = path.strip_suffix("index").filter(|p| p.ends_with('/')).unwrap_or(path);
    path.to_owned()
}

/// Sidebar key or route with a leading `/`.
fn sidebar_key(path: &str) -> String {
    if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

/// Directory route containing `route` (`/guide/setup` → `/guide/`).
fn parent_route(route: &str) -> &str {
    let trimmed = route.strip_suffix('/').unwrap_or(route);
    trimmed.rfind('/').map_or("/", |i| &route[..=i])
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use quire_config::SidebarConfig;

    use super::*;

    fn section(text: &str, items: Vec<NavItem>) -> SidebarSection {
        SidebarSection {
            text: text.to_owned(),
            items,
            collapsed: None,
        }
    }

    fn navigation() -> SiteNavigation {
        let mut sidebar = BTreeMap::new();
        sidebar.insert(
            "/guide/".to_owned(),
            vec![section(
                "Introduction",
                vec![
                    NavItem::link("What is Quire?", "/guide/what-is-quire"),
                    NavItem::link("Getting Started", "/guide/getting-started"),
                    NavItem::group(
                        "Advanced",
                        vec![NavItem::link("Tuning", "/guide/advanced/tuning")],
                    ),
                ],
            )],
        );
        sidebar.insert(
            "/guide/advanced/".to_owned(),
            vec![section(
                "Advanced",
                vec![NavItem::link("Tuning", "/guide/advanced/tuning")],
            )],
        );
        sidebar.insert(
            "/".to_owned(),
            vec![section("Home", vec![NavItem::link("Home", "/")])],
        );

        let theme = ThemeConfig {
            nav: vec![
                NavItem::link("Guide", "/guide/"),
                NavItem::group("More", vec![NavItem::link("Changelog", "/changelog")]),
            ],
            sidebar: SidebarConfig::ByPrefix(sidebar),
            ..Default::default()
        };
        SiteNavigation::new(&theme)
    }

    #[test]
    fn test_sidebar_longest_prefix() {
        let nav = navigation();
        assert_eq!(nav.sidebar_for("/guide/getting-started")[0].text, "Introduction");
        assert_eq!(nav.sidebar_for("/guide/advanced/tuning")[0].text, "Advanced");
        assert_eq!(nav.sidebar_for("/changelog")[0].text, "Home");
    }

    #[test]
    fn test_sidebar_key_without_leading_slash() {
        let mut sidebar = BTreeMap::new();
        sidebar.insert(
            "guide/".to_owned(),
            vec![section("Guide", vec![NavItem::link("Setup", "/guide/setup")])],
        );
        let theme = ThemeConfig {
            sidebar: SidebarConfig::ByPrefix(sidebar),
            ..Default::default()
        };
        let nav = SiteNavigation::new(&theme);

        assert_eq!(nav.sidebar_for("/guide/setup").len(), 1);
        assert_eq!(nav.sidebar_for("/guide/setup")[0].text, "Guide");
        assert_eq!(nav.sidebar_for("guide/setup")[0].text, "Guide");
        assert!(nav.sidebar_for("/about").is_empty());
        assert_eq!(sidebar_key("guide/"), "/guide/");
        assert_eq!(sidebar_key("/"), "/");
    }

    #[test]
    fn test_sidebar_no_match() {
        let nav = SiteNavigation::new(&ThemeConfig::default());
        assert!(nav.sidebar_for("/guide/").is_empty());
    }

    #[test]
    fn test_is_active() {
        assert!(SiteNavigation::is_active("/guide/setup", "/guide/setup"));
        assert!(SiteNavigation::is_active("/guide/setup.html", "/guide/setup"));
        assert!(SiteNavigation::is_active("/guide/setup#install", "/guide/setup"));
        assert!(SiteNavigation::is_active("/guide/index", "/guide/"));
        assert!(SiteNavigation::is_active("/guide/", "/guide/"));
        assert!(SiteNavigation::is_active("/guide/", "/guide/setup"));
        assert!(!SiteNavigation::is_active("/guide/", "/guide/advanced/tuning"));
        assert!(!SiteNavigation::is_active("/guide/setup", "/guide/setup-more"));
        assert!(!SiteNavigation::is_active("/", "/guide/"));
    }

    #[test]
    fn test_is_current() {
        assert!(SiteNavigation::is_current("/guide/setup.html", "/guide/setup"));
        assert!(!SiteNavigation::is_current("/guide/", "/guide/setup"));
    }

    #[test]
    fn test_is_item_active_for_group() {
        let nav = navigation();
        assert!(SiteNavigation::is_item_active(&nav.nav()[1], "/changelog"));
        assert!(!SiteNavigation::is_item_active(&nav.nav()[1], "/guide/"));
    }

    #[test]
    fn test_pager() {
        let nav = navigation();

        let pager = nav.pager("/guide/getting-started");
        assert_eq!(pager.prev.unwrap().text, "What is Quire?");
        assert_eq!(pager.next.unwrap().link, "/guide/advanced/tuning");

        let first = nav.pager("/guide/what-is-quire");
        assert!(first.prev.is_none());
        assert_eq!(first.next.unwrap().text, "Getting Started");
    }

    #[test]
    fn test_pager_for_page_not_in_sidebar() {
        assert_eq!(navigation().pager("/guide/unlisted"), Pager::default());
    }

    #[test]
    fn test_lint_clean_data() {
        assert!(navigation().lint().is_empty());
    }

    #[test]
    fn test_lint_reports_issues() {
        let theme = ThemeConfig {
            nav: vec![
                NavItem::link("Guide", "guide/"),
                NavItem::link("Guide", "/guide/again"),
                NavItem::group("Empty", vec![]),
                NavItem::group("More", vec![NavItem::link("Blank", "")]),
            ],
            ..Default::default()
        };
        let issues: Vec<_> = SiteNavigation::new(&theme)
            .lint()
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            issues,
            vec![
                "theme.nav[1]: duplicate sibling text \"Guide\"",
                "theme.nav[0]: link \"guide/\" must start with /",
                "theme.nav[2]: group has no items",
                "theme.nav[3].items[0]: link is empty",
            ]
        );
    }

    #[test]
    fn test_lint_sidebar_location() {
        let mut sidebar = BTreeMap::new();
        sidebar.insert(
            "/guide/".to_owned(),
            vec![section("Intro", vec![NavItem::link("Setup", "setup")])],
        );
        let theme = ThemeConfig {
            sidebar: SidebarConfig::ByPrefix(sidebar),
            ..Default::default()
        };

        let issues = SiteNavigation::new(&theme).lint();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].location, "theme.sidebar[\"/guide/\"][0].items[0]");
    }

    #[test]
    fn test_parent_route() {
        assert_eq!(parent_route("/guide/setup"), "/guide/");
        assert_eq!(parent_route("/guide/"), "/");
        assert_eq!(parent_route("/about"), "/");
        assert_eq!(parent_route("/"), "/");
    }
}
