//! Default theme layout.
//!
//! Renders a nav bar, a sidebar, the page content with an outline, a pager
//! and a footer as static HTML.

use std::fmt::Write;

use quire_config::{HeadTag, NavItem, SearchConfig, SidebarSection};
use quire_renderer::{TocEntry, escape_html as escape};
use quire_site::{Layout, Pager, PagerLink, SiteNavigation, href};

use crate::app::App;
use crate::theme::{PageContext, Theme};

const DEFAULT_CSS: &str = include_str!("../assets/default.css");
const SEARCH_JS: &str = include_str!("../assets/search.js");

/// Elements rendered without a closing tag.
const VOID_TAGS: &[&str] = &["base", "link", "meta"];

/// Built-in theme.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTheme;

impl Theme for DefaultTheme {
    fn layout(&self, page: &PageContext<'_>) -> String {
        render_page(page)
    }

    fn enhance_app(&self, app: &mut App) {
        app.stylesheet("default.css", DEFAULT_CSS);
        app.script("search.js", SEARCH_JS);
    }
}

fn render_page(page: &PageContext<'_>) -> String {
    let config = page.config;
    let mut html = String::with_capacity(8192);

    let _ = writeln!(html, "<!DOCTYPE html>\n<html lang=\"{}\">", escape(&config.lang));
    render_head(&mut html, page);

    let layout_class = match page.layout {
        Layout::Doc => "layout-doc",
        Layout::Home => "layout-home",
    };
    let _ = writeln!(html, "<body>\n<div class=\"layout {layout_class}\">");

    render_navbar(&mut html, page);

    html.push_str("<div class=\"content-container\">\n");
    let sidebar = if page.show_sidebar {
        page.navigation.sidebar_for(page.route)
    } else {
        &[]
    };
    if !sidebar.is_empty() {
        render_sidebar(&mut html, sidebar, page);
    }

    html.push_str("<main class=\"main\">\n<article class=\"doc\">\n");
    html.push_str(page.content);
    html.push_str("\n</article>\n");
    if page.layout == Layout::Doc {
        render_pager(&mut html, page.pager, config.build_resolved.clean_urls);
    }
    html.push_str("</main>\n");

    render_outline(&mut html, page.outline, &config.theme.outline.label);
    html.push_str("</div>\n");

    render_footer(&mut html, page);
    html.push_str("</div>\n");

    if config.theme.search == SearchConfig::Local {
        for script in page.scripts.iter().filter(|s| s.name == "search.js") {
            let _ = writeln!(html, "<script src=\"{}\" defer></script>", script.href());
        }
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn render_head(html: &mut String, page: &PageContext<'_>) {
    let config = page.config;
    html.push_str("<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape(&document_title(page)));

    let description = if page.description.is_empty() {
        config.description.as_str()
    } else {
        page.description
    };
    if !description.is_empty() {
        let _ = writeln!(
            html,
            "<meta name=\"description\" content=\"{}\">",
            escape(description)
        );
    }

    for stylesheet in page.stylesheets {
        let _ = writeln!(html, "<link rel=\"stylesheet\" href=\"{}\">", stylesheet.href());
    }
    for tag in &config.head {
        render_head_tag(html, tag);
    }
    for snippet in page.component_heads {
        html.push_str(snippet);
        html.push('\n');
    }
    html.push_str("</head>\n");
}

/// `Page | Site`, or just one of them when the other is empty or equal.
fn document_title(page: &PageContext<'_>) -> String {
    let site = page.config.title.as_str();
    match (page.title, site) {
        (title, "") => title.to_owned(),
        ("", site) => site.to_owned(),
        (title, site) if title == site => title.to_owned(),
        (title, site) => format!("{title} | {site}"),
    }
}

fn render_head_tag(html: &mut String, tag: &HeadTag) {
    let _ = write!(html, "<{}", tag.tag);
    for (key, value) in &tag.attrs {
        let _ = write!(html, " {}=\"{}\"", key, escape(value));
    }
    match &tag.content {
        Some(content) => {
            let _ = writeln!(html, ">{content}</{}>", tag.tag);
        }
        None if VOID_TAGS.contains(&tag.tag.as_str()) => html.push_str(">\n"),
        None => {
            let _ = writeln!(html, "></{}>", tag.tag);
        }
    }
}

fn render_navbar(html: &mut String, page: &PageContext<'_>) {
    let config = page.config;
    html.push_str("<header class=\"navbar\">\n<a class=\"navbar-title\" href=\"/\">");
    if let Some(logo) = &config.theme.logo {
        let _ = write!(html, "<img class=\"logo\" src=\"{}\" alt=\"\">", escape(logo));
    }
    let _ = writeln!(html, "<span>{}</span></a>", escape(config.site_title()));

    if !page.navigation.nav().is_empty() {
        html.push_str("<nav class=\"navbar-menu\">\n");
        for item in page.navigation.nav() {
            render_navbar_item(html, item, page);
        }
        html.push_str("</nav>\n");
    }

    render_search(html, &config.theme.search);
    html.push_str("</header>\n");
}

fn render_navbar_item(html: &mut String, item: &NavItem, page: &PageContext<'_>) {
    let clean_urls = page.config.build_resolved.clean_urls;
    let active = if SiteNavigation::is_item_active(item, page.route) {
        " active"
    } else {
        ""
    };
    match item {
        NavItem::Link { text, link } => {
            let _ = writeln!(
                html,
                "<a class=\"navbar-link{active}\" href=\"{}\">{}</a>",
                escape(&href(link, clean_urls)),
                escape(text)
            );
        }
        NavItem::Group { text, items, .. } => {
            let _ = writeln!(
                html,
                "<div class=\"navbar-group{active}\">\n<button type=\"button\">{}</button>\n<div class=\"navbar-group-items\">",
                escape(text)
            );
            for child in items {
                render_navbar_item(html, child, page);
            }
            html.push_str("</div>\n</div>\n");
        }
    }
}

fn render_search(html: &mut String, search: &SearchConfig) {
    match search {
        SearchConfig::None => {}
        SearchConfig::Local => {
            html.push_str(
                "<div class=\"search\" data-index=\"/search-index.json\">\n\
                 <input type=\"search\" placeholder=\"Search\" aria-label=\"Search\">\n\
                 <ul class=\"search-results\"></ul>\n</div>\n",
            );
        }
        SearchConfig::Algolia {
            app_id,
            api_key,
            index_name,
        } => {
            let _ = writeln!(
                html,
                "<div id=\"docsearch\" data-app-id=\"{}\" data-api-key=\"{}\" data-index-name=\"{}\"></div>",
                escape(app_id),
                escape(api_key),
                escape(index_name)
            );
        }
    }
}

fn render_sidebar(html: &mut String, sections: &[SidebarSection], page: &PageContext<'_>) {
    html.push_str("<aside class=\"sidebar\">\n<nav>\n");
    for section in sections {
        let collapsed = section.collapsed.map(|c| {
            c && !section
                .items
                .iter()
                .any(|item| SiteNavigation::is_item_active(item, page.route))
        });
        open_group(html, "sidebar-section", collapsed);
        let _ = writeln!(html, "{}", group_heading(&section.text, "sidebar-section-title", collapsed));
        render_sidebar_items(html, &section.items, page);
        close_group(html, collapsed);
    }
    html.push_str("</nav>\n</aside>\n");
}

fn render_sidebar_items(html: &mut String, items: &[NavItem], page: &PageContext<'_>) {
    let clean_urls = page.config.build_resolved.clean_urls;
    html.push_str("<ul>\n");
    for item in items {
        html.push_str("<li>");
        match item {
            NavItem::Link { text, link } => {
                render_sidebar_link(html, text, link, page.route, clean_urls);
                html.push_str("</li>\n");
            }
            NavItem::Group {
                text,
                items,
                link,
                collapsed,
            } => {
                let collapsed = collapsed
                    .map(|c| c && !SiteNavigation::is_item_active(item, page.route));
                html.push('\n');
                open_group(html, "sidebar-group", collapsed);
                match link {
                    Some(link) if collapsed.is_some() => {
                        html.push_str("<summary>");
                        render_sidebar_link(html, text, link, page.route, clean_urls);
                        html.push_str("</summary>\n");
                    }
                    Some(link) => {
                        render_sidebar_link(html, text, link, page.route, clean_urls);
                        html.push('\n');
                    }
                    None => {
                        let _ = writeln!(html, "{}", group_heading(text, "sidebar-group-title", collapsed));
                    }
                }
                render_sidebar_items(html, items, page);
                close_group(html, collapsed);
                html.push_str("</li>\n");
            }
        }
    }
    html.push_str("</ul>\n");
}

fn render_sidebar_link(html: &mut String, text: &str, link: &str, route: &str, clean_urls: bool) {
    let active = if SiteNavigation::is_current(link, route) {
        " class=\"active\" aria-current=\"page\""
    } else {
        ""
    };
    let _ = write!(
        html,
        "<a href=\"{}\"{active}>{}</a>",
        escape(&href(link, clean_urls)),
        escape(text)
    );
}

/// Collapsible groups render as `<details>`, fixed ones as `<div>`.
fn open_group(html: &mut String, class: &str, collapsed: Option<bool>) {
    match collapsed {
        None => {
            let _ = writeln!(html, "<div class=\"{class}\">");
        }
        Some(true) => {
            let _ = writeln!(html, "<details class=\"{class}\">");
        }
        Some(false) => {
            let _ = writeln!(html, "<details class=\"{class}\" open>");
        }
    }
}

fn close_group(html: &mut String, collapsed: Option<bool>) {
    html.push_str(if collapsed.is_some() {
        "</details>\n"
    } else {
        "</div>\n"
    });
}

fn group_heading(text: &str, class: &str, collapsed: Option<bool>) -> String {
    let tag = if collapsed.is_some() { "summary" } else { "p" };
    format!("<{tag} class=\"{class}\">{}</{tag}>", escape(text))
}

fn render_outline(html: &mut String, outline: &[TocEntry], label: &str) {
    if outline.is_empty() {
        return;
    }
    let _ = writeln!(
        html,
        "<aside class=\"outline\">\n<p class=\"outline-title\">{}</p>\n<ul>",
        escape(label)
    );
    let top = outline.iter().map(|e| e.level).min().unwrap_or(2);
    for entry in outline {
        let _ = writeln!(
            html,
            "<li class=\"outline-depth-{}\"><a href=\"#{}\">{}</a></li>",
            entry.level - top,
            escape(&entry.id),
            escape(&entry.title)
        );
    }
    html.push_str("</ul>\n</aside>\n");
}

fn render_pager(html: &mut String, pager: &Pager, clean_urls: bool) {
    if pager.prev.is_none() && pager.next.is_none() {
        return;
    }
    html.push_str("<nav class=\"pager\">\n");
    let mut link = |target: &PagerLink, class: &str, label: &str| {
        let _ = writeln!(
            html,
            "<a class=\"{class}\" href=\"{}\"><span class=\"pager-label\">{label}</span><span class=\"pager-title\">{}</span></a>",
            escape(&href(&target.link, clean_urls)),
            escape(&target.text)
        );
    };
    if let Some(prev) = &pager.prev {
        link(prev, "pager-prev", "Previous page");
    }
    if let Some(next) = &pager.next {
        link(next, "pager-next", "Next page");
    }
    html.push_str("</nav>\n");
}

/// Footer strings are written as HTML so they can contain links.
fn render_footer(html: &mut String, page: &PageContext<'_>) {
    let Some(footer) = &page.config.theme.footer else {
        return;
    };
    if footer.message.is_none() && footer.copyright.is_none() {
        return;
    }
    html.push_str("<footer class=\"footer\">\n");
    if let Some(message) = &footer.message {
        let _ = writeln!(html, "<p class=\"footer-message\">{message}</p>");
    }
    if let Some(copyright) = &footer.copyright {
        let _ = writeln!(html, "<p class=\"footer-copyright\">{copyright}</p>");
    }
    html.push_str("</footer>\n");
}
