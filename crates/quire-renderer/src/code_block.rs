//! Code block processor chain.
//!
//! Special fenced blocks (diagram components, generated tables, embeds) are
//! handled by processors registered on the renderer instead of being hardcoded
//! into it.
//!
//! # Architecture
//!
//! Processors are checked in registration order when a fenced block with a
//! language tag is encountered. The first processor returning a
//! non-`PassThrough` result wins. When every processor passes, the backend's
//! default code block rendering is used, so an unclaimed block produces
//! exactly the markup it would without any processor registered.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use quire_renderer::{CodeBlockProcessor, ProcessResult};
//!
//! struct Shout;
//!
//! impl CodeBlockProcessor for Shout {
//!     fn process(
//!         &mut self,
//!         language: &str,
//!         _attrs: &HashMap<String, String>,
//!         source: &str,
//!     ) -> ProcessResult {
//!         if language == "shout" {
//!             ProcessResult::Inline(format!("<p>{}</p>", source.to_uppercase()))
//!         } else {
//!             ProcessResult::PassThrough
//!         }
//!     }
//! }
//! ```

use std::collections::HashMap;

/// Result of processing a code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// Replace the block with this HTML.
    Inline(String),

    /// Not handled here; try the next processor, then the default renderer.
    PassThrough,
}

/// Trait for processing special code blocks.
pub trait CodeBlockProcessor {
    /// Process a code block and return the result.
    ///
    /// # Arguments
    ///
    /// * `language` - First token of the fence info string
    /// * `attrs` - Attributes parsed from the rest of the info string
    /// * `source` - Raw content of the code block
    fn process(
        &mut self,
        language: &str,
        attrs: &HashMap<String, String>,
        source: &str,
    ) -> ProcessResult;

    /// Warnings generated during processing.
    fn warnings(&self) -> &[String] {
        &[]
    }
}

/// Parse a fence info string into language and attributes.
///
/// Format: `language [key=value ...]`. The language is the first
/// whitespace-separated token, so leading and trailing whitespace never
/// becomes part of it. An empty or whitespace-only info string yields an
/// empty language.
#[must_use]
pub fn parse_fence_info(info: &str) -> (String, HashMap<String, String>) {
    let mut parts = info.split_whitespace();
    let language = parts.next().unwrap_or("").to_owned();

    let mut attrs = HashMap::new();
    for part in parts {
        if let Some((key, value)) = part.split_once('=') {
            let value = value.trim_matches('"').trim_matches('\'');
            attrs.insert(key.to_owned(), value.to_owned());
        }
    }

    (language, attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fence_info_language_only() {
        let (lang, attrs) = parse_fence_info("rust");
        assert_eq!(lang, "rust");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_parse_fence_info_with_attrs() {
        let (lang, attrs) = parse_fence_info("mermaid theme=dark");
        assert_eq!(lang, "mermaid");
        assert_eq!(attrs.get("theme"), Some(&"dark".to_owned()));
    }

    #[test]
    fn test_parse_fence_info_bare_modifiers_ignored() {
        // Line-highlight style modifiers carry no `=` and are not attributes.
        let (lang, attrs) = parse_fence_info("js {1,3} :line-numbers");
        assert_eq!(lang, "js");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_parse_fence_info_quoted_values() {
        let (lang, attrs) = parse_fence_info("chart title='Sales' unit=\"usd\"");
        assert_eq!(lang, "chart");
        assert_eq!(attrs.get("title"), Some(&"Sales".to_owned()));
        assert_eq!(attrs.get("unit"), Some(&"usd".to_owned()));
    }

    #[test]
    fn test_parse_fence_info_surrounding_whitespace() {
        let (lang, _) = parse_fence_info("  mermaid   ");
        assert_eq!(lang, "mermaid");
    }

    #[test]
    fn test_parse_fence_info_empty() {
        let (lang, attrs) = parse_fence_info("");
        assert_eq!(lang, "");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_parse_fence_info_whitespace_only() {
        let (lang, attrs) = parse_fence_info(" \t ");
        assert_eq!(lang, "");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_default_trait_implementations() {
        struct MinimalProcessor;

        impl CodeBlockProcessor for MinimalProcessor {
            fn process(
                &mut self,
                _language: &str,
                _attrs: &HashMap<String, String>,
                _source: &str,
            ) -> ProcessResult {
                ProcessResult::PassThrough
            }
        }

        let mut processor = MinimalProcessor;
        assert_eq!(
            processor.process("js", &HashMap::new(), "x"),
            ProcessResult::PassThrough
        );
        assert!(processor.warnings().is_empty());
    }
}
