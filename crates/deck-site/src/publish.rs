//! Dashboard publishing: validate, render, write.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use deck_content::{Dashboard, TextRenderer, is_valid_id};
use deck_render::{RenderError, RenderedSite, TreeRenderer};
use rayon::prelude::*;

/// Error raised when a build cannot be published.
///
/// All variants are build-time fatal; the publisher checks everything it
/// can before the first write, so a failed build leaves no output behind.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Two pages share an id.
    #[error("duplicate page id `{id}` (pages `{first}` and `{second}`)")]
    DuplicateIdentifier {
        /// The shared id.
        id: String,
        /// Title of the page that declared the id first.
        first: String,
        /// Title of the conflicting page.
        second: String,
    },

    /// A page id is not a valid path segment / DOM identifier.
    #[error("page id `{id}` is not a valid slug (expected [a-z0-9_-]+)")]
    InvalidIdentifier {
        /// The rejected id.
        id: String,
    },

    /// A referenced source file does not exist.
    #[error("missing asset `{path}` ({context})")]
    MissingAsset {
        /// Path that failed to resolve.
        path: PathBuf,
        /// Where the reference came from.
        context: String,
    },

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

    /// Filesystem failure during the write phase.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<RenderError> for PublishError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::InvalidContent { page, item, reason } => {
                Self::InvalidContent { page, item, reason }
            }
        }
    }
}

/// Summary of a successful publish.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublishReport {
    /// HTML documents written (combined + standalone pages).
    pub documents_written: usize,
    /// Download/media files copied into the output tree.
    pub assets_copied: usize,
}

/// Publishes dashboards to a directory tree.
pub struct Publisher {
    output_dir: PathBuf,
    renderer: TreeRenderer,
}

impl Publisher {
    /// Create a publisher targeting `output_dir`.
    ///
    /// The directory is created on the first successful build.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            renderer: TreeRenderer::new(),
        }
    }

    /// Replace the text conversion collaborator.
    #[must_use]
    pub fn with_text_renderer(mut self, text: Box<dyn TextRenderer>) -> Self {
        self.renderer = TreeRenderer::new().with_text_renderer(text);
        self
    }

    /// Publish a dashboard.
    ///
    /// Validation and rendering happen entirely in memory; the output
    /// directory is only touched once both succeed.
    ///
    /// # Errors
    ///
    /// See [`PublishError`]. On error nothing has been written.
    pub fn publish(&self, dashboard: &Dashboard) -> Result<PublishReport, PublishError> {
        validate_ids(dashboard)?;

        let site = self.renderer.render(dashboard)?;

        for job in &site.copies {
            if !job.source.is_file() {
                return Err(PublishError::MissingAsset {
                    path: job.source.clone(),
                    context: format!("referenced on page `{}` item {}", job.page, job.item),
                });
            }
        }

        self.write(&site)
    }

    fn write(&self, site: &RenderedSite) -> Result<PublishReport, PublishError> {
        let out = &self.output_dir;
        let pages_dir = out.join("pages");
        fs::create_dir_all(&pages_dir)?;

        deck_assets::write_to(&out.join("assets"))?;
        fs::write(out.join("index.html"), &site.index_html)?;

        // Each output path is written by exactly one job; ordering between
        // writes carries no meaning, so the fan-out is safe to parallelize.
        site.pages
            .par_iter()
            .try_for_each(|page| fs::write(pages_dir.join(format!("{}.html", page.id)), &page.html))?;

        for job in &site.copies {
            let target = out.join(&job.dest);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&job.source, &target)?;
        }

        let report = PublishReport {
            documents_written: 1 + site.pages.len(),
            assets_copied: site.copies.len(),
        };
        tracing::info!(
            documents = report.documents_written,
            copies = report.assets_copied,
            output = %out.display(),
            "published dashboard"
        );
        Ok(report)
    }
}

/// Reject invalid slugs and globally duplicated page ids.
fn validate_ids(dashboard: &Dashboard) -> Result<(), PublishError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for page in dashboard.walk() {
        if !is_valid_id(page.id()) {
            return Err(PublishError::InvalidIdentifier {
                id: page.id().to_owned(),
            });
        }
        if let Some(first) = seen.insert(page.id(), page.title()) {
            return Err(PublishError::DuplicateIdentifier {
                id: page.id().to_owned(),
                first: first.to_owned(),
                second: page.title().to_owned(),
            });
        }
    }
    Ok(())
}

/// Check that a path names an existing regular file.
pub(crate) fn require_file(path: &Path, context: &str) -> Result<(), PublishError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(PublishError::MissingAsset {
            path: path.to_path_buf(),
            context: context.to_owned(),
        })
    }
}
