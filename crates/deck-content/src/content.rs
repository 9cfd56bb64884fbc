//! Content items and collaborator seams.
//!
//! [`ContentItem`] is a closed tagged set: adding a new content kind is a
//! variant addition plus one renderer case. Opaque payloads (figures,
//! tabular data) stay behind the [`FigureSource`] and [`TableSource`]
//! traits so the core never depends on a plotting or dataframe library.

use std::path::PathBuf;

/// Error returned when a content item fails its collaborator's precondition,
/// e.g. a table source producing ragged rows.
#[derive(Debug, thiserror::Error)]
#[error("{reason}")]
pub struct ContentError {
    reason: String,
}

impl ContentError {
    /// Create a new content error with a human-readable reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The failure reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Opaque figure payload, converted to embeddable markup on demand.
///
/// The conversion must be pure and emit markup that can be inserted
/// verbatim inside a page section.
pub trait FigureSource: Send + Sync {
    /// Convert the figure to an HTML fragment.
    fn to_html(&self) -> Result<String, ContentError>;
}

/// Figure adapter for markup that was already rendered externally.
pub struct HtmlFigure(pub String);

impl FigureSource for HtmlFigure {
    fn to_html(&self) -> Result<String, ContentError> {
        Ok(self.0.clone())
    }
}

/// Declared type of a table column, used as the client-side sort hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// Cells compare numerically.
    Numeric,
    /// Cells compare as case-sensitive strings.
    Text,
}

impl ColumnKind {
    /// Attribute value emitted as the `data-kind` sort hint.
    #[must_use]
    pub fn as_attr(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Text => "text",
        }
    }
}

/// A table column: display name plus declared kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    /// Column header text.
    pub name: String,
    /// Declared cell type.
    pub kind: ColumnKind,
}

/// Row/column projection of an opaque tabular value.
///
/// Column order is preserved end to end; `kind` feeds the per-column sort
/// hints emitted at build time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableView {
    /// Ordered columns.
    pub columns: Vec<Column>,
    /// Row-major cell strings; every row has `columns.len()` cells.
    pub rows: Vec<Vec<String>>,
}

/// Opaque tabular payload, converted to rows and typed columns on demand.
pub trait TableSource: Send + Sync {
    /// Convert the tabular value to a [`TableView`].
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the value does not satisfy the tabular
    /// precondition (e.g. ragged rows).
    fn to_view(&self) -> Result<TableView, ContentError>;
}

/// Built-in string-backed table source.
///
/// Column kinds are inferred from cell contents at view time unless given
/// explicitly: a column where every cell parses as a number is `Numeric`,
/// anything else is `Text`.
///
/// # Example
///
/// ```
/// use deck_content::{ColumnKind, Rows, TableSource};
///
/// let mut rows = Rows::new(["name", "score"]);
/// rows.push_row(["alice", "10"]);
/// rows.push_row(["bob", "2"]);
///
/// let view = rows.to_view().unwrap();
/// assert_eq!(view.columns[0].kind, ColumnKind::Text);
/// assert_eq!(view.columns[1].kind, ColumnKind::Numeric);
/// ```
pub struct Rows {
    names: Vec<String>,
    kinds: Option<Vec<ColumnKind>>,
    rows: Vec<Vec<String>>,
}

impl Rows {
    /// Create an empty source with the given column headers.
    #[must_use]
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: headers.into_iter().map(Into::into).collect(),
            kinds: None,
            rows: Vec::new(),
        }
    }

    /// Create an empty source from fully declared columns, skipping kind
    /// inference.
    #[must_use]
    pub fn with_columns(columns: Vec<Column>) -> Self {
        let (names, kinds) = columns.into_iter().map(|c| (c.name, c.kind)).unzip();
        Self {
            names,
            kinds: Some(kinds),
            rows: Vec::new(),
        }
    }

    /// Append one row of cells.
    pub fn push_row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }
}

impl TableSource for Rows {
    fn to_view(&self) -> Result<TableView, ContentError> {
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.names.len() {
                return Err(ContentError::new(format!(
                    "row {i} has {} cells, expected {}",
                    row.len(),
                    self.names.len()
                )));
            }
        }

        let columns = self
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| Column {
                name: name.clone(),
                kind: match &self.kinds {
                    Some(kinds) => kinds[i],
                    None => infer_kind(self.rows.iter().map(|row| row[i].as_str())),
                },
            })
            .collect();

        Ok(TableView {
            columns,
            rows: self.rows.clone(),
        })
    }
}

/// Infer a column kind from its cells: `Numeric` when the column is
/// non-empty and every cell parses as a number.
fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut seen = false;
    for cell in cells {
        seen = true;
        if cell.trim().parse::<f64>().is_err() {
            return ColumnKind::Text;
        }
    }
    if seen { ColumnKind::Numeric } else { ColumnKind::Text }
}

/// Image payload: raw bytes inlined into the document, or a file copied
/// into the output tree.
pub enum ImageSource {
    /// Raw image bytes with their MIME type (e.g. `image/png`).
    Bytes {
        /// Encoded image data.
        data: Vec<u8>,
        /// MIME type used in the data URI.
        mime: String,
    },
    /// Path to an image file on disk.
    Path(PathBuf),
}

/// One renderable unit on a page.
///
/// Items are immutable once appended; a page's content sequence is frozen
/// when rendering begins.
pub enum ContentItem {
    /// Markdown text, rendered via the text collaborator.
    Text {
        /// Markdown source.
        markdown: String,
    },
    /// Section heading, level 1-6.
    Header {
        /// Heading text.
        text: String,
        /// Heading level; validated at render time.
        level: u8,
    },
    /// Embedded figure, rendered via the figure collaborator.
    Plot {
        /// Opaque figure payload.
        figure: Box<dyn FigureSource>,
    },
    /// Data table, rendered via the tabular collaborator.
    Table {
        /// Opaque tabular payload.
        source: Box<dyn TableSource>,
        /// Emit client-side sort hooks for this table.
        sortable: bool,
    },
    /// Inline or file-backed image.
    Image {
        /// Image payload.
        source: ImageSource,
        /// Alt text.
        alt: String,
    },
    /// Link to a file copied into the output tree.
    Download {
        /// Source file on disk.
        path: PathBuf,
        /// Link label; defaults to the file name.
        label: Option<String>,
    },
    /// Opaque markup passthrough (e.g. externally converted math/diagrams).
    Raw {
        /// HTML fragment inserted verbatim.
        html: String,
    },
    /// Escaped, language-tagged code block.
    Syntax {
        /// Source code.
        code: String,
        /// Language tag for highlighting (`language-*` class).
        language: String,
    },
    /// Horizontal row of nested items.
    Row {
        /// Items rendered side by side.
        items: Vec<ContentItem>,
    },
}

impl ContentItem {
    /// Short tag name for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Header { .. } => "header",
            Self::Plot { .. } => "plot",
            Self::Table { .. } => "table",
            Self::Image { .. } => "image",
            Self::Download { .. } => "download",
            Self::Raw { .. } => "raw",
            Self::Syntax { .. } => "syntax",
            Self::Row { .. } => "row",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_rows_infers_numeric_column() {
        let mut rows = Rows::new(["n"]);
        rows.push_row(["10"]).push_row(["2"]).push_row(["33"]);

        let view = rows.to_view().unwrap();

        assert_eq!(view.columns[0].kind, ColumnKind::Numeric);
    }

    #[test]
    fn test_rows_infers_text_for_mixed_column() {
        let mut rows = Rows::new(["v"]);
        rows.push_row(["10"]).push_row(["b"]);

        let view = rows.to_view().unwrap();

        assert_eq!(view.columns[0].kind, ColumnKind::Text);
    }

    #[test]
    fn test_rows_empty_column_is_text() {
        let rows = Rows::new(["v"]);

        let view = rows.to_view().unwrap();

        assert_eq!(view.columns[0].kind, ColumnKind::Text);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_rows_explicit_kinds_skip_inference() {
        let mut rows = Rows::with_columns(vec![Column {
            name: "id".to_owned(),
            kind: ColumnKind::Text,
        }]);
        rows.push_row(["42"]);

        let view = rows.to_view().unwrap();

        assert_eq!(view.columns[0].kind, ColumnKind::Text);
    }

    #[test]
    fn test_rows_ragged_row_is_error() {
        let mut rows = Rows::new(["a", "b"]);
        rows.push_row(["1", "2"]).push_row(["only-one"]);

        let err = rows.to_view().unwrap_err();

        assert!(err.reason().contains("row 1"));
    }

    #[test]
    fn test_rows_preserves_column_and_row_order() {
        let mut rows = Rows::new(["first", "second"]);
        rows.push_row(["a", "1"]).push_row(["b", "2"]);

        let view = rows.to_view().unwrap();

        assert_eq!(view.columns[0].name, "first");
        assert_eq!(view.columns[1].name, "second");
        assert_eq!(view.rows, vec![vec!["a", "1"], vec!["b", "2"]]);
    }

    #[test]
    fn test_html_figure_passthrough() {
        let fig = HtmlFigure("<svg></svg>".to_owned());

        assert_eq!(fig.to_html().unwrap(), "<svg></svg>");
    }

    #[test]
    fn test_numeric_inference_accepts_negatives_and_floats() {
        let mut rows = Rows::new(["n"]);
        rows.push_row(["-1.5"]).push_row(["2e3"]);

        let view = rows.to_view().unwrap();

        assert_eq!(view.columns[0].kind, ColumnKind::Numeric);
    }
}
