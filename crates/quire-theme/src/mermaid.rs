//! Mermaid diagram component.

use crate::component::{Component, ComponentAttrs};

/// Loads Mermaid from the CDN and renders every `pre.mermaid` on the page.
const MERMAID_HEAD: &str = r#"<script type="module">
import mermaid from "https://cdn.jsdelivr.net/npm/mermaid@11/dist/mermaid.esm.min.mjs";
mermaid.initialize({ startOnLoad: true });
</script>"#;

/// Renders `<Mermaid graph="..." />` as a client-side Mermaid diagram.
///
/// The `graph` value stays entity-escaped inside the `<pre>`; Mermaid reads
/// the element's text content, which the browser has already decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidComponent;

impl Component for MermaidComponent {
    fn name(&self) -> &str {
        "Mermaid"
    }

    fn render(&self, attrs: &ComponentAttrs, out: &mut String) {
        out.push_str("<pre class=\"mermaid\">");
        out.push_str(attrs.get("graph").unwrap_or_default());
        out.push_str("</pre>");
    }

    fn head(&self) -> Option<&str> {
        Some(MERMAID_HEAD)
    }
}
