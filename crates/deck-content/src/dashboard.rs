//! Dashboard root container.

use crate::page::Page;

/// Root of a page tree plus a display title.
///
/// The dashboard owns the whole tree; it is handed by reference to the
/// renderer and publisher and discarded after a successful publish. Output
/// location is publisher configuration, not dashboard state.
pub struct Dashboard {
    title: String,
    pages: Vec<Page>,
}

impl Dashboard {
    /// Create an empty dashboard.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pages: Vec::new(),
        }
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Top-level pages in declaration order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Append a top-level page.
    pub fn add_page(&mut self, page: Page) -> &mut Self {
        self.pages.push(page);
        self
    }

    /// Pre-order traversal over every page in the tree.
    pub fn walk(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter().flat_map(Page::walk)
    }
}
