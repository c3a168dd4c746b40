//! Theme layer for Quire.
//!
//! A [`Theme`] renders page documents and registers components and assets
//! on an [`App`]. [`ThemeExtension`] wraps a base theme, keeps its layout,
//! and adds the [`MermaidComponent`] plus a custom stylesheet.
//!
//! Page HTML refers to components as self-closing elements
//! (`<Mermaid graph="..." />`); [`ComponentRegistry::resolve`] expands them.
//!
//! # Example
//!
//! ```
//! use quire_theme::{App, Theme, site_theme};
//!
//! let mut app = App::new();
//! site_theme().enhance_app(&mut app);
//!
//! let resolved = app.components().resolve(r#"<Mermaid graph="graph TD; A--&gt;B" />"#);
//! assert_eq!(resolved.html, r#"<pre class="mermaid">graph TD; A--&gt;B</pre>"#);
//! ```

mod app;
mod component;
mod default_theme;
mod mermaid;
mod theme;

pub use app::{App, Asset};
pub use component::{Component, ComponentAttrs, ComponentRegistry, ResolvedHtml};
pub use default_theme::DefaultTheme;
pub use mermaid::MermaidComponent;
pub use theme::{PageContext, Theme, ThemeExtension, site_theme};
