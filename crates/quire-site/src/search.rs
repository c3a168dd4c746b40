//! Local search index.
//!
//! One entry per page with its title, route, headings and a plain-text
//! excerpt. Serialized to `search-index.json` for the client-side search box.

use quire_renderer::TocEntry;
use serde::Serialize;

use crate::SiteError;

/// Maximum number of characters of page text kept per entry.
const TEXT_LIMIT: usize = 2000;

/// Opening of the permalink appended to every rendered heading.
const HEADER_ANCHOR: &str = r#"<a class="header-anchor""#;

/// Search index for the whole site.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
}

/// Searchable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
    pub title: String,
    pub route: String,
    pub headings: Vec<SearchHeading>,
    pub text: String,
}

/// Heading anchor within a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHeading {
    pub id: String,
    pub title: String,
}

impl SearchEntry {
    /// Build an entry from rendered page HTML.
    ///
    /// Pass the HTML before components are resolved: component elements are
    /// tags, so their attributes (diagram sources) stay out of the text.
    #[must_use]
    pub fn new(title: &str, route: &str, toc: &[TocEntry], html: &str) -> Self {
        let text = strip_tags(html);
        let text = match text.char_indices().nth(TEXT_LIMIT) {
            Some((end, _)) => text[..end].to_owned(),
            None => text,
        };
        Self {
            title: title.to_owned(),
            route: route.to_owned(),
            headings: toc
                .iter()
                .map(|entry| SearchHeading {
                    id: entry.id.clone(),
                    title: entry.title.clone(),
                })
                .collect(),
            text,
        }
    }
}

impl SearchIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: SearchEntry) {
        self.entries.push(entry);
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, SiteError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Strip tags from HTML, decode basic entities and collapse whitespace.
///
/// Heading permalinks are dropped along with their `#` label.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    let html = remove_header_anchors(html);
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    let decoded = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn remove_header_anchors(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find(HEADER_ANCHOR) {
        out.push_str(&rest[..start]);
        let anchor = &rest[start..];
        match anchor.find("</a>") {
            Some(end) => rest = &anchor[end + "</a>".len()..],
            None => rest = "",
        }
    }
    out.push_str(rest);
    out
}
