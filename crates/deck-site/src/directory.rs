//! Directory aggregation over independently published dashboards.
//!
//! The aggregate is a structural composition only: it links out to each
//! child dashboard's root document and never re-traverses or re-renders
//! child content.

use std::fs;
use std::path::{Path, PathBuf};

use deck_render::directory_document;

use crate::publish::{PublishError, PublishReport, require_file};

/// One aggregated dashboard: display label plus the path of its published
/// root document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Display label.
    pub label: String,
    /// Path to the child dashboard's `index.html`.
    pub index_path: PathBuf,
}

/// Ordered composition of published dashboards under one entry point.
pub struct DirectoryIndex {
    title: String,
    entries: Vec<DirectoryEntry>,
}

impl DirectoryIndex {
    /// Create an empty directory.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Append a published dashboard by its root document path.
    pub fn add_dashboard(
        &mut self,
        label: impl Into<String>,
        index_path: impl Into<PathBuf>,
    ) -> &mut Self {
        self.entries.push(DirectoryEntry {
            label: label.into(),
            index_path: index_path.into(),
        });
        self
    }

    /// Write the aggregate `index.html` plus asset bundle into `output_dir`.
    ///
    /// Child paths inside `output_dir` are linked relatively so the whole
    /// tree stays relocatable; paths outside it are linked as given.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::MissingAsset`] before any write if an entry's
    /// root document does not exist.
    pub fn publish(&self, output_dir: &Path) -> Result<PublishReport, PublishError> {
        let mut links = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            require_file(
                &entry.index_path,
                &format!("directory entry `{}`", entry.label),
            )?;
            links.push((entry.label.clone(), href_for(output_dir, &entry.index_path)));
        }

        let html = directory_document(&self.title, &links);

        fs::create_dir_all(output_dir)?;
        deck_assets::write_to(&output_dir.join("assets"))?;
        fs::write(output_dir.join("index.html"), html)?;

        tracing::info!(
            entries = self.entries.len(),
            output = %output_dir.display(),
            "published directory index"
        );
        Ok(PublishReport {
            documents_written: 1,
            assets_copied: 0,
        })
    }
}

/// Relative href when the child lives under the output directory.
fn href_for(output_dir: &Path, index_path: &Path) -> String {
    let target = index_path.strip_prefix(output_dir).unwrap_or(index_path);
    target.to_string_lossy().replace('\\', "/")
}
