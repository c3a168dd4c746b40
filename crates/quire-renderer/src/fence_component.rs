//! Fenced blocks rendered as component elements.
//!
//! A reserved fence language (e.g. `mermaid`) is not highlighted as code.
//! Instead the block becomes a self-closing element naming a theme component,
//! with the block content carried as one escaped attribute:
//!
//! ````text
//! ```mermaid
//! graph TD; A-->B
//! ```
//! ````
//!
//! renders as `<Mermaid graph="graph TD; A--&gt;B" />`. The theme resolves the
//! element after rendering. Every other language passes through to the
//! backend's default code block markup.

use std::collections::HashMap;
use std::fmt::Write;

use crate::code_block::{CodeBlockProcessor, ProcessResult};
use crate::state::escape_html;

/// Mapping from a reserved fence language to a component element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FenceComponent {
    /// Fence language that triggers the component (exact, case-sensitive).
    pub lang: String,
    /// Component element name.
    pub component: String,
    /// Attribute carrying the escaped block content.
    pub attribute: String,
}

impl FenceComponent {
    /// Create a fence component mapping.
    pub fn new(
        lang: impl Into<String>,
        component: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        Self {
            lang: lang.into(),
            component: component.into(),
            attribute: attribute.into(),
        }
    }

    /// The `mermaid` fence rendered by the `Mermaid` component.
    #[must_use]
    pub fn mermaid() -> Self {
        Self::new("mermaid", "Mermaid", "graph")
    }

    /// Write the component element for `source`.
    fn render(&self, source: &str, out: &mut String) {
        write!(
            out,
            r#"<{} {}="{}" />"#,
            self.component,
            self.attribute,
            escape_html(strip_fence_terminator(source))
        )
        .unwrap();
    }
}

/// Code block processor that turns reserved fence languages into components.
///
/// Matching compares the fence language token exactly: `MERMAID` or
/// `mermaid-js` do not match `mermaid`. Blocks without a language never reach
/// processors, so empty info strings always take the default path.
pub struct FenceComponentProcessor {
    components: Vec<FenceComponent>,
}

impl FenceComponentProcessor {
    /// Create a processor for the given mappings.
    ///
    /// When two mappings share a language, the first one wins.
    #[must_use]
    pub fn new(components: Vec<FenceComponent>) -> Self {
        Self { components }
    }

    /// Registered mappings.
    #[must_use]
    pub fn components(&self) -> &[FenceComponent] {
        &self.components
    }
}

impl CodeBlockProcessor for FenceComponentProcessor {
    fn process(
        &mut self,
        language: &str,
        _attrs: &HashMap<String, String>,
        source: &str,
    ) -> ProcessResult {
        match self.components.iter().find(|c| c.lang == language) {
            Some(component) => {
                let mut html = String::new();
                component.render(source, &mut html);
                ProcessResult::Inline(html)
            }
            None => ProcessResult::PassThrough,
        }
    }
}

/// Remove the line terminator that precedes the closing fence.
fn strip_fence_terminator(source: &str) -> &str {
    source
        .strip_suffix('\n')
        .map_or(source, |s| s.strip_suffix('\r').unwrap_or(s))
}
