//! Application state a theme enhances: components and static assets.

use crate::component::{Component, ComponentRegistry};

/// Static file written under `assets/` in the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// File name (e.g. `custom.css`).
    pub name: String,
    pub content: String,
}

impl Asset {
    /// Site-absolute URL of the asset.
    #[must_use]
    pub fn href(&self) -> String {
        format!("/assets/{}", self.name)
    }
}

/// Components and assets registered by the theme.
#[derive(Default)]
pub struct App {
    components: ComponentRegistry,
    stylesheets: Vec<Asset>,
    scripts: Vec<Asset>,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component so pages can reference it by name.
    pub fn component<C: Component + 'static>(&mut self, component: C) {
        self.components.register(Box::new(component));
    }

    /// Add a stylesheet linked from every page, after those already added.
    /// Re-adding a name replaces its content in place.
    pub fn stylesheet(&mut self, name: impl Into<String>, content: impl Into<String>) {
        upsert(&mut self.stylesheets, name.into(), content.into());
    }

    /// Add a script asset. Layouts decide which pages load it.
    pub fn script(&mut self, name: impl Into<String>, content: impl Into<String>) {
        upsert(&mut self.scripts, name.into(), content.into());
    }

    #[must_use]
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    #[must_use]
    pub fn stylesheets(&self) -> &[Asset] {
        &self.stylesheets
    }

    #[must_use]
    pub fn scripts(&self) -> &[Asset] {
        &self.scripts
    }
}

fn upsert(assets: &mut Vec<Asset>, name: String, content: String) {
    match assets.iter_mut().find(|a| a.name == name) {
        Some(asset) => asset.content = content,
        None => assets.push(Asset { name, content }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MermaidComponent;

    #[test]
    fn test_stylesheet_order_and_replace() {
        let mut app = App::new();
        app.stylesheet("default.css", "a{}");
        app.stylesheet("custom.css", "b{}");
        app.stylesheet("default.css", "c{}");

        let names: Vec<_> = app.stylesheets().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["default.css", "custom.css"]);
        assert_eq!(app.stylesheets()[0].content, "c{}");
        assert_eq!(app.stylesheets()[1].href(), "/assets/custom.css");
    }

    #[test]
    fn test_register_component() {
        let mut app = App::new();
        app.component(MermaidComponent);
        assert!(app.components().contains("Mermaid"));
    }
}
