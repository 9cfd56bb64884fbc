//! Tree renderer: dashboard to rendered documents.
//!
//! Walks the page tree in pre-order and produces both rendering targets —
//! the combined document (every page as a togglable section) and one
//! standalone document per page — from the same sidebar structure. Pure
//! over the borrowed tree; file copies come back as a manifest.

use std::collections::HashSet;
use std::fmt::Write;

use deck_content::{CommonMark, Dashboard, Page, TextRenderer};

use crate::document::{DocumentParts, document_shell};
use crate::item::{CopyJob, ItemContext, render_item};
use crate::sidebar::{LinkStyle, build_sidebar, render_sidebar};

/// Error raised while rendering a dashboard.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A content item failed its collaborator's precondition.
    #[error("invalid content on page `{page}` item {item}: {reason}")]
    InvalidContent {
        /// Id of the offending page.
        page: String,
        /// Item index on that page.
        item: usize,
        /// Failure reason.
        reason: String,
    },
}

/// One standalone page document.
#[derive(Clone, Debug)]
pub struct RenderedPage {
    /// Page id; the file is written as `pages/<id>.html`.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Complete HTML document.
    pub html: String,
}

/// Everything the publisher needs to write a site.
#[derive(Debug)]
pub struct RenderedSite {
    /// Combined root document (`index.html`).
    pub index_html: String,
    /// Standalone documents in pre-order.
    pub pages: Vec<RenderedPage>,
    /// Files to copy into the output tree, deduplicated by destination.
    pub copies: Vec<CopyJob>,
}

/// Renders a dashboard to its combined and standalone documents.
pub struct TreeRenderer {
    text: Box<dyn TextRenderer>,
}

impl Default for TreeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeRenderer {
    /// Create a renderer with the default markdown collaborator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: Box::new(CommonMark),
        }
    }

    /// Replace the text conversion collaborator.
    #[must_use]
    pub fn with_text_renderer(mut self, text: Box<dyn TextRenderer>) -> Self {
        self.text = text;
        self
    }

    /// Render every page of the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidContent`] if any item fails its
    /// collaborator's precondition. Nothing is partially produced: the
    /// caller gets either the whole site or the error.
    pub fn render(&self, dashboard: &Dashboard) -> Result<RenderedSite, RenderError> {
        let mut copies = Vec::new();

        let index_html = self.render_combined(dashboard, &mut copies)?;

        let standalone_sidebar = build_sidebar(dashboard.pages(), &LinkStyle::Relative { prefix: "" });
        let mut pages = Vec::new();
        for page in dashboard.walk() {
            let mut sidebar_html = String::new();
            render_sidebar(&standalone_sidebar, Some(page.id()), &mut sidebar_html);

            let body = self.render_page_body(page, "../", &mut copies)?;
            let html = document_shell(&DocumentParts {
                title: dashboard.title(),
                asset_prefix: "../",
                root_href: "../index.html",
                sidebar_html: &sidebar_html,
                body_html: &body,
            });

            tracing::debug!(page = page.id(), "rendered standalone document");
            pages.push(RenderedPage {
                id: page.id().to_owned(),
                title: page.title().to_owned(),
                html,
            });
        }

        Ok(RenderedSite {
            index_html,
            pages,
            copies: dedup_copies(copies),
        })
    }

    fn render_combined(
        &self,
        dashboard: &Dashboard,
        copies: &mut Vec<CopyJob>,
    ) -> Result<String, RenderError> {
        let first_id = dashboard.pages().first().map(Page::id);

        let entries = build_sidebar(dashboard.pages(), &LinkStyle::Anchor);
        let mut sidebar_html = String::new();
        render_sidebar(&entries, first_id, &mut sidebar_html);

        let mut body = String::new();
        for page in dashboard.walk() {
            let section_body = self.render_page_body(page, "", copies)?;
            if first_id == Some(page.id()) {
                write!(
                    body,
                    r#"<section class="page-section active" id="{}">"#,
                    page.id()
                )
                .unwrap();
            } else {
                write!(
                    body,
                    r#"<section class="page-section" id="{}" hidden>"#,
                    page.id()
                )
                .unwrap();
            }
            body.push_str(&section_body);
            body.push_str("</section>\n");
        }

        Ok(document_shell(&DocumentParts {
            title: dashboard.title(),
            asset_prefix: "",
            root_href: "index.html",
            sidebar_html: &sidebar_html,
            body_html: &body,
        }))
    }

    /// Render one page's content items in declaration order, prefixed with
    /// the page title heading.
    fn render_page_body(
        &self,
        page: &Page,
        asset_prefix: &str,
        copies: &mut Vec<CopyJob>,
    ) -> Result<String, RenderError> {
        let ctx = ItemContext {
            text: self.text.as_ref(),
            asset_prefix,
            page_id: page.id(),
        };

        let mut out = String::new();
        write!(
            out,
            r#"<h1 class="page-title">{}</h1>"#,
            crate::escape_html(page.title())
        )
        .unwrap();

        for (index, item) in page.content().iter().enumerate() {
            render_item(item, index, &ctx, &mut out, copies)?;
        }
        Ok(out)
    }
}

/// Drop duplicate copy jobs; destinations are path-derived, so equal
/// destinations always mean equal sources.
fn dedup_copies(copies: Vec<CopyJob>) -> Vec<CopyJob> {
    let mut seen = HashSet::new();
    copies
        .into_iter()
        .filter(|job| seen.insert(job.dest.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use deck_content::Rows;

    use super::*;

    fn sample_dashboard() -> Dashboard {
        let mut home = Page::new("home", "Home");
        home.add_text("hello");

        let mut guide = Page::new("guide", "Guide");
        guide.add_child(Page::new("setup", "Setup"));

        let mut dash = Dashboard::new("Demo");
        dash.add_page(home);
        dash.add_page(guide);
        dash
    }

    #[test]
    fn test_combined_document_hides_all_but_first() {
        let site = TreeRenderer::new().render(&sample_dashboard()).unwrap();

        assert!(
            site.index_html
                .contains(r#"<section class="page-section active" id="home">"#)
        );
        assert!(
            site.index_html
                .contains(r#"<section class="page-section" id="guide" hidden>"#)
        );
        assert!(
            site.index_html
                .contains(r#"<section class="page-section" id="setup" hidden>"#)
        );
    }

    #[test]
    fn test_combined_document_renders_first_page_content() {
        let site = TreeRenderer::new().render(&sample_dashboard()).unwrap();

        assert!(site.index_html.contains("<p>hello</p>"));
        assert!(site.index_html.contains(r##"href="#guide""##));
    }

    #[test]
    fn test_one_standalone_document_per_page_in_preorder() {
        let site = TreeRenderer::new().render(&sample_dashboard()).unwrap();

        let ids: Vec<_> = site.pages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["home", "guide", "setup"]);
    }

    #[test]
    fn test_standalone_document_links_relative() {
        let site = TreeRenderer::new().render(&sample_dashboard()).unwrap();

        let setup = &site.pages[2];
        assert!(setup.html.contains(r#"href="../index.html""#));
        assert!(setup.html.contains(r#"href="setup.html""#));
        assert!(setup.html.contains(r#"href="../assets/css/deck.css""#));
        assert!(!setup.html.contains("<p>hello</p>"));
        assert!(setup.html.contains(r#"<h1 class="page-title">Setup</h1>"#));
    }

    #[test]
    fn test_standalone_marks_current_page_active() {
        let site = TreeRenderer::new().render(&sample_dashboard()).unwrap();

        let guide = &site.pages[1];
        assert!(guide.html.contains(r#"class="nav-link sidebar-parent active""#));
    }

    #[test]
    fn test_copies_are_deduplicated_across_targets() {
        let mut page = Page::new("p", "P");
        page.add_download("/data/report.csv", None);
        let mut dash = Dashboard::new("D");
        dash.add_page(page);

        let site = TreeRenderer::new().render(&dash).unwrap();

        // Referenced by both the combined and the standalone document,
        // copied once.
        assert_eq!(site.copies.len(), 1);
        assert!(site.copies[0].dest.starts_with("downloads/"));
    }

    #[test]
    fn test_invalid_content_carries_page_and_index() {
        let mut page = Page::new("p", "P");
        let mut ragged = Rows::new(["a", "b"]);
        ragged.push_row(["1"]);
        page.add_text("fine").add_table(ragged);
        let mut dash = Dashboard::new("D");
        dash.add_page(page);

        let err = TreeRenderer::new().render(&dash).unwrap_err();

        match err {
            RenderError::InvalidContent { page, item, .. } => {
                assert_eq!(page, "p");
                assert_eq!(item, 1);
            }
        }
    }

    #[test]
    fn test_empty_dashboard_renders_combined_only() {
        let site = TreeRenderer::new().render(&Dashboard::new("Empty")).unwrap();

        assert!(site.pages.is_empty());
        assert!(site.index_html.contains("<title>Empty</title>"));
    }
}
