//! Vendored frontend assets for staticdeck output.
//!
//! The bundle is compiled into the crate and written verbatim into every
//! published output directory, so generated sites work fully offline.
//! `deck.js` is the browser runtime: page-section switching, sidebar group
//! persistence, scroll memory and client-side table sorting.

use std::io;
use std::path::Path;

/// Asset paths and contents, relative to the output `assets/` directory.
const BUNDLE: &[(&str, &str)] = &[
    ("css/deck.css", include_str!("../assets/css/deck.css")),
    ("js/deck.js", include_str!("../assets/js/deck.js")),
];

/// Get an asset by path (relative to `assets/`).
///
/// Returns the file contents if the asset exists, `None` otherwise.
#[must_use]
pub fn get(path: &str) -> Option<&'static str> {
    BUNDLE
        .iter()
        .find(|(name, _)| *name == path)
        .map(|(_, contents)| *contents)
}

/// Iterate all bundled asset paths.
pub fn iter() -> impl Iterator<Item = &'static str> {
    BUNDLE.iter().map(|(name, _)| *name)
}

/// Write the whole bundle under `dir` (typically `<out>/assets`).
///
/// Returns the number of files written.
pub fn write_to(dir: &Path) -> io::Result<usize> {
    for (name, contents) in BUNDLE {
        let target = dir.join(name);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, contents)?;
    }
    Ok(BUNDLE.len())
}
