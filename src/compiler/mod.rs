//! The frontmatter-driven build pipeline.
//!
//! Per document: extract → validate/repair → format date → render.
//!
//! ```text
//! collect_documents() ──► Document::load() ──► build_document()
//!         │                                          │
//!         ▼                                          ▼
//!     sorted paths                       BuildResult { filename, html, repair }
//! ```
//!
//! The orchestrator in `crate::build` fans these out in parallel and
//! merges the results.

pub mod document;
pub mod error;
pub mod frontmatter;
pub mod markdown;

pub use document::{BuildResult, Document, Repair, build_document};
pub use error::DocumentError;

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Collect all files from a directory recursively.
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Collect the Markdown documents of a content directory, sorted by path.
///
/// Sorting pins the batch order so collision handling and reports are
/// deterministic regardless of directory iteration order.
pub fn collect_documents(dir: &Path) -> Vec<PathBuf> {
    let mut docs: Vec<_> = collect_all_files(dir)
        .into_iter()
        .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    docs.sort();
    docs
}
