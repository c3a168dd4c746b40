//! Markdown renderer with pluggable backends.
//!
//! This crate provides a generic [`MarkdownRenderer`] that produces HTML via
//! the [`RenderBackend`] trait.
//!
//! # Architecture
//!
//! Shared functionality (tables, lists, inline formatting, headings) is
//! handled by the generic renderer. Format-specific elements (code blocks,
//! blockquotes, images) are delegated to the backend.
//!
//! Fenced code blocks go through a chain of [`CodeBlockProcessor`]s before
//! the backend sees them. The first processor that claims a block wins; an
//! unclaimed block is rendered by the backend's default code block markup.
//! [`FenceComponentProcessor`] is the processor that turns reserved fence
//! languages (e.g. `mermaid`) into component elements.
//!
//! # Example
//!
//! ```
//! use quire_renderer::{FenceComponent, FenceComponentProcessor, HtmlBackend, MarkdownRenderer};
//!
//! let mut renderer = MarkdownRenderer::<HtmlBackend>::new()
//!     .with_title_extraction()
//!     .with_processor(FenceComponentProcessor::new(vec![FenceComponent::mermaid()]));
//! let result = renderer.render_markdown("# Hello\n\n```mermaid\ngraph TD; A-->B\n```\n");
//!
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! assert!(result.html.contains(r#"<Mermaid graph="graph TD; A--&gt;B" />"#));
//! ```

mod backend;
mod code_block;
mod fence_component;
mod html;
mod renderer;
mod state;
mod util;

pub use backend::{AlertKind, RenderBackend};
pub use code_block::{CodeBlockProcessor, ProcessResult, parse_fence_info};
pub use fence_component::{FenceComponent, FenceComponentProcessor};
pub use html::HtmlBackend;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{TocEntry, escape_html, slugify};
