//! HTML rendering pipeline for staticdeck.
//!
//! Turns a [`deck_content::Dashboard`] into a [`RenderedSite`]: one
//! combined document with togglable per-page sections, one standalone
//! document per page, and a manifest of files to copy into the output
//! tree. Rendering is pure — nothing here touches the filesystem.

mod document;
mod escape;
mod item;
mod renderer;
mod sidebar;

pub use document::directory_document;
pub use escape::escape_html;
pub use item::{CopyJob, asset_file_name};
pub use renderer::{RenderError, RenderedPage, RenderedSite, TreeRenderer};
pub use sidebar::{LinkStyle, SidebarEntry, build_sidebar, flatten_ids};
