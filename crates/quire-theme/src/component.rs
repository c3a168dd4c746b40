//! Components referenced from rendered page HTML.
//!
//! Fence processors emit self-closing `PascalCase` elements such as
//! `<Mermaid graph="..." />`. After rendering, [`ComponentRegistry::resolve`]
//! replaces each element whose name is registered with the component's
//! markup. Unregistered elements are left in place and reported.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Self-closing element with a `PascalCase` name.
static COMPONENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([A-Z][A-Za-z0-9]*)((?:\s+[A-Za-z_:][-A-Za-z0-9_:.]*(?:="[^"]*")?)*)\s*/>"#)
        .expect("invalid component regex")
});

/// Attribute inside a component element.
static ATTR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:="([^"]*)")?"#).expect("invalid attribute regex")
});

/// A renderable component.
pub trait Component {
    /// Element name used in page HTML (e.g. `Mermaid`).
    fn name(&self) -> &str;

    /// Write the markup replacing one element.
    fn render(&self, attrs: &ComponentAttrs, out: &mut String);

    /// Snippet injected once into `<head>` of pages that use the component.
    fn head(&self) -> Option<&str> {
        None
    }
}

/// Attributes of a component element.
///
/// Values are kept exactly as written in the HTML, so they are still
/// entity-escaped and safe to place in element content or attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentAttrs {
    attrs: Vec<(String, String)>,
}

impl ComponentAttrs {
    /// Parse the attribute list of an element.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let attrs = ATTR_PATTERN
            .captures_iter(source)
            .map(|caps| {
                let value = caps.get(2).map_or("", |m| m.as_str());
                (caps[1].to_owned(), value.to_owned())
            })
            .collect();
        Self { attrs }
    }

    /// Escaped value of `name`. Boolean attributes have an empty value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Result of [`ComponentRegistry::resolve`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ResolvedHtml {
    pub html: String,
    /// Registered components used, in first-use order.
    pub used: Vec<String>,
    /// Element names with no registered component, in first-use order.
    pub unresolved: Vec<String>,
}

/// Registered components by name.
#[derive(Default)]
pub struct ComponentRegistry {
    components: Vec<Box<dyn Component>>,
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component. A later registration with the same name
    /// replaces the earlier one.
    pub fn register(&mut self, component: Box<dyn Component>) {
        tracing::debug!(component = component.name(), "Registering component");
        self.components.retain(|c| c.name() != component.name());
        self.components.push(component);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Component> {
        self.components
            .iter()
            .find(|c| c.name() == name)
            .map(|c| &**c)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered component names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.name())
    }

    /// Head snippets for the given component names.
    #[must_use]
    pub fn head_snippets(&self, names: &[String]) -> Vec<&str> {
        names
            .iter()
            .filter_map(|name| self.get(name))
            .filter_map(|c| c.head())
            .collect()
    }

    /// Replace registered component elements in `html`.
    #[must_use]
    pub fn resolve(&self, html: &str) -> ResolvedHtml {
        let mut used: Vec<String> = Vec::new();
        let mut unresolved: Vec<String> = Vec::new();

        let resolved = COMPONENT_PATTERN.replace_all(html, |caps: &Captures<'_>| {
            let name = &caps[1];
            match self.get(name) {
                Some(component) => {
                    if !used.iter().any(|n| n == name) {
                        used.push(name.to_owned());
                    }
                    let mut out = String::new();
                    component.render(&ComponentAttrs::parse(&caps[2]), &mut out);
                    out
                }
                None => {
                    if !unresolved.iter().any(|n| n == name) {
                        unresolved.push(name.to_owned());
                    }
                    caps[0].to_owned()
                }
            }
        });

        ResolvedHtml {
            html: resolved.into_owned(),
            used,
            unresolved,
        }
    }
}
