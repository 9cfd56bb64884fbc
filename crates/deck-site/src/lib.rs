//! Publishing pipeline for staticdeck.
//!
//! [`Publisher`] validates a dashboard, renders it fully in memory, and
//! only then writes the output tree: the combined document, one standalone
//! document per page, the asset bundle, and copied download/media files.
//! A failed build writes nothing.
//!
//! [`DirectoryIndex`] composes multiple independently published dashboards
//! under one entry point without re-rendering their internals.

mod directory;
mod publish;

pub use directory::{DirectoryEntry, DirectoryIndex};
pub use publish::{PublishError, PublishReport, Publisher};
