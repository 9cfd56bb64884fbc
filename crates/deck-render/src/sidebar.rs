//! Sidebar tree construction.
//!
//! [`SidebarEntry`] is a pure projection of the page tree: identical page
//! trees always yield identical sidebar trees. The same entries serve the
//! combined document (anchor hrefs) and the standalone documents (relative
//! file hrefs).

use std::fmt::Write;

use deck_content::Page;
use serde::Serialize;

use crate::escape::escape_html;

/// Navigation-tree projection of a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarEntry {
    /// Page id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Link target.
    pub href: String,
    /// Child entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SidebarEntry>,
    /// Whether the entry renders as a collapsible group.
    pub has_children: bool,
}

/// How sidebar hrefs address their target page.
pub enum LinkStyle<'a> {
    /// Fragment links into the combined document (`#<id>`).
    Anchor,
    /// Relative file links (`<prefix><id>.html`).
    Relative {
        /// Path prefix from the current document to the pages directory.
        prefix: &'a str,
    },
}

impl LinkStyle<'_> {
    fn href(&self, id: &str) -> String {
        match self {
            Self::Anchor => format!("#{id}"),
            Self::Relative { prefix } => format!("{prefix}{id}.html"),
        }
    }
}

/// Build the sidebar tree for a page forest.
#[must_use]
pub fn build_sidebar(pages: &[Page], style: &LinkStyle<'_>) -> Vec<SidebarEntry> {
    pages.iter().map(|page| build_entry(page, style)).collect()
}

fn build_entry(page: &Page, style: &LinkStyle<'_>) -> SidebarEntry {
    let children = build_sidebar(page.children(), style);
    SidebarEntry {
        id: page.id().to_owned(),
        title: page.title().to_owned(),
        href: style.href(page.id()),
        has_children: !children.is_empty(),
        children,
    }
}

/// Flatten a sidebar tree to its pre-order id sequence.
#[must_use]
pub fn flatten_ids(entries: &[SidebarEntry]) -> Vec<&str> {
    let mut ids = Vec::new();
    collect_ids(entries, &mut ids);
    ids
}

fn collect_ids<'a>(entries: &'a [SidebarEntry], ids: &mut Vec<&'a str>) {
    for entry in entries {
        ids.push(&entry.id);
        collect_ids(&entry.children, ids);
    }
}

/// Render sidebar entries to HTML.
///
/// Entries with children become collapsible groups; the group containing
/// `active` starts open so the current page is visible without a click.
pub(crate) fn render_sidebar(entries: &[SidebarEntry], active: Option<&str>, out: &mut String) {
    for entry in entries {
        let mut link_classes = String::from("nav-link");
        if entry.has_children {
            link_classes.push_str(" sidebar-parent");
        }
        if active == Some(entry.id.as_str()) {
            link_classes.push_str(" active");
        }

        if entry.has_children {
            let open = active.is_some_and(|id| contains_id(entry, id));
            write!(
                out,
                r#"<div class="sidebar-group{}" data-group="{}">"#,
                if open { " open" } else { "" },
                escape_html(&entry.id)
            )
            .unwrap();
            write!(
                out,
                r#"<a class="{link_classes}" href="{}" data-page="{}"><span class="sidebar-arrow">&#9654;</span>{}</a>"#,
                escape_html(&entry.href),
                escape_html(&entry.id),
                escape_html(&entry.title)
            )
            .unwrap();
            out.push_str(r#"<div class="sidebar-children">"#);
            render_sidebar(&entry.children, active, out);
            out.push_str("</div></div>");
        } else {
            write!(
                out,
                r#"<a class="{link_classes}" href="{}" data-page="{}">{}</a>"#,
                escape_html(&entry.href),
                escape_html(&entry.id),
                escape_html(&entry.title)
            )
            .unwrap();
        }
    }
}

fn contains_id(entry: &SidebarEntry, id: &str) -> bool {
    entry.id == id || entry.children.iter().any(|child| contains_id(child, id))
}
