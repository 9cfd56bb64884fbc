//! Content, page and dashboard model for staticdeck.
//!
//! A [`Dashboard`] owns an ordered tree of [`Page`]s; each page owns an
//! ordered, append-only sequence of [`ContentItem`]s. The model is pure
//! data plus collaborator seams — rendering and publishing live in the
//! `deck-render` and `deck-site` crates.
//!
//! # Example
//!
//! ```
//! use deck_content::{Dashboard, Page};
//!
//! let mut home = Page::new("home", "Home");
//! home.add_text("Hello **world**");
//!
//! let mut dash = Dashboard::new("Demo");
//! dash.add_page(home);
//!
//! assert_eq!(dash.walk().count(), 1);
//! ```

mod content;
mod dashboard;
mod page;
mod text;

pub use content::{
    Column, ColumnKind, ContentError, ContentItem, FigureSource, HtmlFigure, ImageSource, Rows,
    TableSource, TableView,
};
pub use dashboard::Dashboard;
pub use page::{Page, Walk, is_valid_id};
pub use text::{CommonMark, TextRenderer};
