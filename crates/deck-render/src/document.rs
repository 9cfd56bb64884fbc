//! Document chrome shared by the combined and standalone targets.

use std::fmt::Write;

use crate::escape::escape_html;

/// Inputs for one HTML document.
pub(crate) struct DocumentParts<'a> {
    /// Document and sidebar title.
    pub title: &'a str,
    /// Path prefix from the document to the output root.
    pub asset_prefix: &'a str,
    /// Href of the combined root document.
    pub root_href: &'a str,
    /// Pre-rendered sidebar entries.
    pub sidebar_html: &'a str,
    /// Pre-rendered main content.
    pub body_html: &'a str,
}

/// Assemble a complete HTML document around rendered sidebar and content.
pub(crate) fn document_shell(parts: &DocumentParts<'_>) -> String {
    let mut out = String::with_capacity(parts.body_html.len() + 1024);
    let title = escape_html(parts.title);
    let prefix = parts.asset_prefix;

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    writeln!(out, "<title>{title}</title>").unwrap();
    writeln!(
        out,
        r#"<link rel="stylesheet" href="{prefix}assets/css/deck.css">"#
    )
    .unwrap();
    writeln!(out, r#"<script defer src="{prefix}assets/js/deck.js"></script>"#).unwrap();
    out.push_str("</head>\n<body>\n");

    writeln!(out, r#"<nav id="sidebar">"#).unwrap();
    writeln!(
        out,
        r#"<a class="sidebar-title" href="{}">{title}</a>"#,
        escape_html(parts.root_href)
    )
    .unwrap();
    out.push_str(parts.sidebar_html);
    out.push_str("\n<div id=\"sidebar-footer\">staticdeck</div>\n</nav>\n");

    out.push_str("<main id=\"content\">\n<div class=\"content-inner\">\n");
    out.push_str(parts.body_html);
    out.push_str("\n</div>\n</main>\n</body>\n</html>\n");

    out
}

/// Assemble the directory aggregate document: one list of outbound links
/// to independently published dashboards, sharing the asset bundle.
#[must_use]
pub fn directory_document(title: &str, links: &[(String, String)]) -> String {
    let mut body = String::new();
    write!(body, r#"<h1 class="page-title">{}</h1>"#, escape_html(title)).unwrap();
    body.push_str(r#"<ul class="directory-list">"#);
    for (label, href) in links {
        write!(
            body,
            r#"<li><a class="directory-link" href="{}">{}</a></li>"#,
            escape_html(href),
            escape_html(label)
        )
        .unwrap();
    }
    body.push_str("</ul>");

    document_shell(&DocumentParts {
        title,
        asset_prefix: "",
        root_href: "index.html",
        sidebar_html: "",
        body_html: &body,
    })
}
