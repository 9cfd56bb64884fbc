//! Per-item fragment rendering.
//!
//! Each content item renders independently to an HTML fragment; fragments
//! are concatenated in declaration order by the tree renderer. File-backed
//! items (downloads, path images) do not touch the filesystem here — they
//! register a [`CopyJob`] that the publisher resolves after validation.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use deck_content::{ContentItem, ImageSource, TextRenderer};
use sha2::{Digest, Sha256};

use crate::escape::escape_html;
use crate::renderer::RenderError;

/// A file to copy into the output tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyJob {
    /// Source file on disk.
    pub source: PathBuf,
    /// Destination path relative to the output root.
    pub dest: String,
    /// Id of the page that referenced the file.
    pub page: String,
    /// Item index on that page.
    pub item: usize,
}

/// Stable, collision-free output name for a copied file.
///
/// The name is a 12-hex-digit digest of the source path followed by the
/// original file name, so distinct sources never collide and repeated
/// builds produce identical names.
#[must_use]
pub fn asset_file_name(path: &Path) -> String {
    let digest = Sha256::digest(path.to_string_lossy().as_bytes());
    let file_name = path
        .file_name()
        .map_or_else(|| "file".to_owned(), |n| n.to_string_lossy().into_owned());
    format!("{}-{file_name}", &hex::encode(digest)[..12])
}

/// Rendering context shared by the items of one page.
pub(crate) struct ItemContext<'a> {
    /// Text conversion collaborator.
    pub text: &'a dyn TextRenderer,
    /// Path prefix from the current document to the output root.
    pub asset_prefix: &'a str,
    /// Page owning the items (for diagnostics and copy jobs).
    pub page_id: &'a str,
}

/// Render one item to `out`, appending any required copy jobs.
pub(crate) fn render_item(
    item: &ContentItem,
    index: usize,
    ctx: &ItemContext<'_>,
    out: &mut String,
    copies: &mut Vec<CopyJob>,
) -> Result<(), RenderError> {
    match item {
        ContentItem::Text { markdown } => {
            out.push_str(&ctx.text.render_markdown(markdown));
        }
        ContentItem::Header { text, level } => {
            if !(1..=6).contains(level) {
                return Err(invalid(ctx, index, format!("header level {level} out of range 1-6")));
            }
            write!(out, "<h{level}>{}</h{level}>", escape_html(text)).unwrap();
        }
        ContentItem::Plot { figure } => {
            let fragment = figure
                .to_html()
                .map_err(|e| invalid(ctx, index, e.reason().to_owned()))?;
            write!(out, r#"<div class="plot">{fragment}</div>"#).unwrap();
        }
        ContentItem::Table { source, sortable } => {
            let view = source
                .to_view()
                .map_err(|e| invalid(ctx, index, e.reason().to_owned()))?;
            render_table(&view, *sortable, out);
        }
        ContentItem::Image { source, alt } => match source {
            ImageSource::Bytes { data, mime } => {
                write!(
                    out,
                    r#"<img src="data:{};base64,{}" alt="{}">"#,
                    escape_html(mime),
                    BASE64.encode(data),
                    escape_html(alt)
                )
                .unwrap();
            }
            ImageSource::Path(path) => {
                let dest = format!("media/{}", asset_file_name(path));
                write!(
                    out,
                    r#"<img src="{}{dest}" alt="{}">"#,
                    ctx.asset_prefix,
                    escape_html(alt)
                )
                .unwrap();
                copies.push(CopyJob {
                    source: path.clone(),
                    dest,
                    page: ctx.page_id.to_owned(),
                    item: index,
                });
            }
        },
        ContentItem::Download { path, label } => {
            let dest = format!("downloads/{}", asset_file_name(path));
            let text = label.clone().unwrap_or_else(|| {
                path.file_name()
                    .map_or_else(|| "download".to_owned(), |n| n.to_string_lossy().into_owned())
            });
            write!(
                out,
                r#"<div><a class="download-button" href="{}{dest}" download>{}</a></div>"#,
                ctx.asset_prefix,
                escape_html(&text)
            )
            .unwrap();
            copies.push(CopyJob {
                source: path.clone(),
                dest,
                page: ctx.page_id.to_owned(),
                item: index,
            });
        }
        ContentItem::Raw { html } => out.push_str(html),
        ContentItem::Syntax { code, language } => {
            write!(
                out,
                r#"<pre class="syntax-block"><code class="language-{}">{}</code></pre>"#,
                escape_html(language),
                escape_html(code)
            )
            .unwrap();
        }
        ContentItem::Row { items } => {
            out.push_str(r#"<div class="deck-row">"#);
            for nested in items {
                out.push_str(r#"<div class="deck-cell">"#);
                render_item(nested, index, ctx, out, copies)?;
                out.push_str("</div>");
            }
            out.push_str("</div>");
        }
    }
    Ok(())
}

fn render_table(view: &deck_content::TableView, sortable: bool, out: &mut String) {
    if sortable {
        out.push_str(r#"<table class="deck-table sortable">"#);
    } else {
        out.push_str(r#"<table class="deck-table">"#);
    }

    out.push_str("<thead><tr>");
    for column in &view.columns {
        if sortable {
            write!(
                out,
                r#"<th data-kind="{}">{}<span class="sort-arrow"></span></th>"#,
                column.kind.as_attr(),
                escape_html(&column.name)
            )
            .unwrap();
        } else {
            write!(out, "<th>{}</th>", escape_html(&column.name)).unwrap();
        }
    }
    out.push_str("</tr></thead><tbody>");

    for row in &view.rows {
        out.push_str("<tr>");
        for cell in row {
            write!(out, "<td>{}</td>", escape_html(cell)).unwrap();
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
}

fn invalid(ctx: &ItemContext<'_>, index: usize, reason: String) -> RenderError {
    RenderError::InvalidContent {
        page: ctx.page_id.to_owned(),
        item: index,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use deck_content::{CommonMark, ContentError, Page, Rows, TableSource, TableView};
    use pretty_assertions::assert_eq;

    use super::*;

    fn render_one(item: &ContentItem) -> (String, Vec<CopyJob>) {
        let ctx = ItemContext {
            text: &CommonMark,
            asset_prefix: "",
            page_id: "p",
        };
        let mut out = String::new();
        let mut copies = Vec::new();
        render_item(item, 0, &ctx, &mut out, &mut copies).unwrap();
        (out, copies)
    }

    #[test]
    fn test_text_renders_markdown() {
        let (html, _) = render_one(&ContentItem::Text {
            markdown: "hello **world**".to_owned(),
        });

        assert_eq!(html, "<p>hello <strong>world</strong></p>\n");
    }

    #[test]
    fn test_header_escapes_and_levels() {
        let (html, _) = render_one(&ContentItem::Header {
            text: "A & B".to_owned(),
            level: 3,
        });

        assert_eq!(html, "<h3>A &amp; B</h3>");
    }

    #[test]
    fn test_header_level_out_of_range_is_invalid_content() {
        let ctx = ItemContext {
            text: &CommonMark,
            asset_prefix: "",
            page_id: "p",
        };
        let item = ContentItem::Header {
            text: "t".to_owned(),
            level: 7,
        };
        let mut out = String::new();

        let err = render_item(&item, 4, &ctx, &mut out, &mut Vec::new()).unwrap_err();

        match err {
            RenderError::InvalidContent { page, item, .. } => {
                assert_eq!(page, "p");
                assert_eq!(item, 4);
            }
        }
    }

    #[test]
    fn test_sortable_table_emits_kind_hints() {
        let mut page = Page::new("p", "P");
        let mut rows = Rows::new(["name", "score"]);
        rows.push_row(["alice", "10"]).push_row(["bob", "2"]);
        page.add_table(rows);

        let (html, _) = render_one(&page.content()[0]);

        assert!(html.contains(r#"<table class="deck-table sortable">"#));
        assert!(html.contains(r#"<th data-kind="text">name"#));
        assert!(html.contains(r#"<th data-kind="numeric">score"#));
        assert!(html.contains("<td>alice</td><td>10</td>"));
    }

    #[test]
    fn test_unsorted_table_has_no_hints() {
        let mut page = Page::new("p", "P");
        let mut rows = Rows::new(["name"]);
        rows.push_row(["alice"]);
        page.add_table_unsorted(rows);

        let (html, _) = render_one(&page.content()[0]);

        assert!(html.contains(r#"<table class="deck-table">"#));
        assert!(!html.contains("data-kind"));
        assert!(!html.contains("sortable"));
    }

    #[test]
    fn test_table_collaborator_failure_is_invalid_content() {
        struct Broken;
        impl TableSource for Broken {
            fn to_view(&self) -> Result<TableView, ContentError> {
                Err(ContentError::new("not tabular"))
            }
        }

        let ctx = ItemContext {
            text: &CommonMark,
            asset_prefix: "",
            page_id: "p",
        };
        let item = ContentItem::Table {
            source: Box::new(Broken),
            sortable: true,
        };

        let err = render_item(&item, 0, &ctx, &mut String::new(), &mut Vec::new()).unwrap_err();

        match err {
            RenderError::InvalidContent { reason, .. } => assert_eq!(reason, "not tabular"),
        }
    }

    #[test]
    fn test_image_bytes_become_data_uri() {
        let (html, copies) = render_one(&ContentItem::Image {
            source: ImageSource::Bytes {
                data: vec![1, 2, 3],
                mime: "image/png".to_owned(),
            },
            alt: "dots".to_owned(),
        });

        assert!(html.starts_with(r#"<img src="data:image/png;base64,"#));
        assert!(html.contains(r#"alt="dots""#));
        assert!(copies.is_empty());
    }

    #[test]
    fn test_image_path_registers_copy() {
        let (html, copies) = render_one(&ContentItem::Image {
            source: ImageSource::Path(PathBuf::from("/tmp/logo.png")),
            alt: "logo".to_owned(),
        });

        assert_eq!(copies.len(), 1);
        assert!(copies[0].dest.starts_with("media/"));
        assert!(copies[0].dest.ends_with("-logo.png"));
        assert!(html.contains(&copies[0].dest));
    }

    #[test]
    fn test_download_registers_copy_and_defaults_label() {
        let (html, copies) = render_one(&ContentItem::Download {
            path: PathBuf::from("/data/report.csv"),
            label: None,
        });

        assert_eq!(copies.len(), 1);
        assert!(copies[0].dest.starts_with("downloads/"));
        assert!(html.contains(">report.csv</a>"));
        assert!(html.contains("download-button"));
    }

    #[test]
    fn test_row_nests_cells() {
        let (html, _) = render_one(&ContentItem::Row {
            items: vec![
                ContentItem::Raw {
                    html: "<b>l</b>".to_owned(),
                },
                ContentItem::Raw {
                    html: "<i>r</i>".to_owned(),
                },
            ],
        });

        assert_eq!(
            html,
            r#"<div class="deck-row"><div class="deck-cell"><b>l</b></div><div class="deck-cell"><i>r</i></div></div>"#
        );
    }

    #[test]
    fn test_syntax_block_is_escaped() {
        let (html, _) = render_one(&ContentItem::Syntax {
            code: "if a < b {}".to_owned(),
            language: "rust".to_owned(),
        });

        assert!(html.contains(r#"<code class="language-rust">if a &lt; b {}</code>"#));
    }

    #[test]
    fn test_asset_file_name_is_stable_and_distinct() {
        let a1 = asset_file_name(Path::new("/one/data.csv"));
        let a2 = asset_file_name(Path::new("/one/data.csv"));
        let b = asset_file_name(Path::new("/two/data.csv"));

        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        assert!(a1.ends_with("-data.csv"));
    }
}
