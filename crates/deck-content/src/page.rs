//! Page tree node with builder methods.
//!
//! A [`Page`] owns its content sequence and its child pages, so the
//! page/children relation is a tree by construction — no cycles or shared
//! ownership are representable.

use std::path::PathBuf;

use crate::content::{ContentItem, FigureSource, ImageSource, TableSource};
use crate::text::TextRenderer;

/// Check that a page id is a valid path segment and DOM identifier.
///
/// Ids are lowercase slugs: ASCII letters, digits, `-` and `_`. The
/// publisher rejects anything else rather than sanitizing, so two distinct
/// author ids can never collapse into one output path.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// A navigable unit: ordered content plus optional child pages.
///
/// Content is append-only during build and frozen once rendering begins
/// (the renderer only ever borrows the tree).
pub struct Page {
    id: String,
    title: String,
    content: Vec<ContentItem>,
    children: Vec<Page>,
}

impl Page {
    /// Create an empty page.
    ///
    /// The `id` must be unique across the whole dashboard; it becomes both
    /// the section anchor in the combined document and the standalone file
    /// name. Validity is checked at publish time.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Page id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Content items in declaration order.
    #[must_use]
    pub fn content(&self) -> &[ContentItem] {
        &self.content
    }

    /// Child pages in declaration order.
    #[must_use]
    pub fn children(&self) -> &[Page] {
        &self.children
    }

    /// Append a markdown text block.
    pub fn add_text(&mut self, markdown: impl Into<String>) -> &mut Self {
        self.content.push(ContentItem::Text {
            markdown: markdown.into(),
        });
        self
    }

    /// Append a heading (level 1-6).
    pub fn add_header(&mut self, text: impl Into<String>, level: u8) -> &mut Self {
        self.content.push(ContentItem::Header {
            text: text.into(),
            level,
        });
        self
    }

    /// Append a figure.
    pub fn add_plot(&mut self, figure: impl FigureSource + 'static) -> &mut Self {
        self.content.push(ContentItem::Plot {
            figure: Box::new(figure),
        });
        self
    }

    /// Append a sortable table.
    pub fn add_table(&mut self, source: impl TableSource + 'static) -> &mut Self {
        self.content.push(ContentItem::Table {
            source: Box::new(source),
            sortable: true,
        });
        self
    }

    /// Append a table without client-side sorting.
    pub fn add_table_unsorted(&mut self, source: impl TableSource + 'static) -> &mut Self {
        self.content.push(ContentItem::Table {
            source: Box::new(source),
            sortable: false,
        });
        self
    }

    /// Append an inline image from raw bytes.
    pub fn add_image(
        &mut self,
        data: Vec<u8>,
        mime: impl Into<String>,
        alt: impl Into<String>,
    ) -> &mut Self {
        self.content.push(ContentItem::Image {
            source: ImageSource::Bytes {
                data,
                mime: mime.into(),
            },
            alt: alt.into(),
        });
        self
    }

    /// Append an image copied from a file on disk.
    pub fn add_image_file(&mut self, path: impl Into<PathBuf>, alt: impl Into<String>) -> &mut Self {
        self.content.push(ContentItem::Image {
            source: ImageSource::Path(path.into()),
            alt: alt.into(),
        });
        self
    }

    /// Append a download link; the file is copied into the output tree at
    /// publish time.
    pub fn add_download(
        &mut self,
        path: impl Into<PathBuf>,
        label: Option<String>,
    ) -> &mut Self {
        self.content.push(ContentItem::Download {
            path: path.into(),
            label,
        });
        self
    }

    /// Append a raw HTML fragment.
    pub fn add_raw(&mut self, html: impl Into<String>) -> &mut Self {
        self.content.push(ContentItem::Raw { html: html.into() });
        self
    }

    /// Append an escaped code block.
    pub fn add_syntax(
        &mut self,
        code: impl Into<String>,
        language: impl Into<String>,
    ) -> &mut Self {
        self.content.push(ContentItem::Syntax {
            code: code.into(),
            language: language.into(),
        });
        self
    }

    /// Append a horizontal row of items.
    pub fn add_row(&mut self, items: Vec<ContentItem>) -> &mut Self {
        self.content.push(ContentItem::Row { items });
        self
    }

    /// Convert math source via the text collaborator and append the result.
    pub fn add_math(&mut self, source: &str, renderer: &dyn TextRenderer) -> &mut Self {
        self.add_raw(renderer.render_math(source))
    }

    /// Convert diagram source via the text collaborator and append the result.
    pub fn add_diagram(&mut self, source: &str, renderer: &dyn TextRenderer) -> &mut Self {
        self.add_raw(renderer.render_diagram(source))
    }

    /// Append a child page.
    pub fn add_child(&mut self, page: Page) -> &mut Self {
        self.children.push(page);
        self
    }

    /// Pre-order traversal: this page, then each child subtree in
    /// declaration order.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Pre-order page iterator.
pub struct Walk<'a> {
    stack: Vec<&'a Page>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Page;

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.stack.pop()?;
        self.stack.extend(page.children.iter().rev());
        Some(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_id() {
        assert!(is_valid_id("overview"));
        assert!(is_valid_id("page-2_beta"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("Has Spaces"));
        assert!(!is_valid_id("Upper"));
        assert!(!is_valid_id("a/b"));
        assert!(!is_valid_id("dot.html"));
    }

    #[test]
    fn test_content_appended_in_order() {
        let mut page = Page::new("p", "P");
        page.add_text("one").add_header("two", 2).add_raw("<hr>");

        let kinds: Vec<_> = page.content().iter().map(ContentItem::kind).collect();

        assert_eq!(kinds, ["text", "header", "raw"]);
    }

    #[test]
    fn test_walk_is_preorder() {
        let mut root = Page::new("root", "Root");
        let mut a = Page::new("a", "A");
        a.add_child(Page::new("a1", "A1"));
        a.add_child(Page::new("a2", "A2"));
        root.add_child(a);
        root.add_child(Page::new("b", "B"));

        let ids: Vec<_> = root.walk().map(Page::id).collect();

        assert_eq!(ids, ["root", "a", "a1", "a2", "b"]);
    }

    #[test]
    fn test_add_math_uses_collaborator() {
        struct Upper;
        impl TextRenderer for Upper {
            fn render_markdown(&self, text: &str) -> String {
                text.to_owned()
            }
            fn render_math(&self, source: &str) -> String {
                format!("<m>{}</m>", source.to_uppercase())
            }
        }

        let mut page = Page::new("p", "P");
        page.add_math("x", &Upper);

        match &page.content()[0] {
            ContentItem::Raw { html } => assert_eq!(html, "<m>X</m>"),
            other => panic!("expected raw item, got {}", other.kind()),
        }
    }
}
