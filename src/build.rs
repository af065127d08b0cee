//! Site building orchestration.
//!
//! ```text
//! build_site()
//!     │
//!     ├── clear output dir, read header/footer fragments   (fatal on error)
//!     │
//!     ├── collect_documents() ──► par_iter ──► build_document()
//!     │                                             │
//!     │                                             ▼
//!     │                     BuildResult { filename, html, repair } | error
//!     │
//!     ├── write header ++ html ++ footer per page (collision-checked)
//!     ├── copy assets verbatim
//!     └── flush queued repairs back to the source files
//! ```
//!
//! Documents are processed in parallel with no ordering guarantee and no
//! backpressure limit (batches are tens of files); results are merged in
//! sorted input order so the report and collision policy stay
//! deterministic. Per-document failures are recorded and skipped; only
//! fragment and output-directory I/O aborts the run.

use crate::{
    compiler::{
        BuildResult, Document, DocumentError, Repair, build_document, collect_all_files,
        collect_documents,
    },
    config::SiteConfig,
    log,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

/// One failed document or file operation, attributed to its source path.
#[derive(Debug)]
pub struct Failure {
    pub source: PathBuf,
    pub error: anyhow::Error,
}

/// Aggregated outcome of a build run.
///
/// Built by merging per-document results; there is no shared mutable
/// accumulator between document tasks.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Output files written, in batch order.
    pub written: Vec<PathBuf>,
    /// Repair writes that were persisted.
    pub repairs_written: usize,
    /// Everything that went wrong without aborting the run.
    pub errors: Vec<Failure>,
}

impl BuildReport {
    pub fn has_failures(&self) -> bool {
        !self.errors.is_empty()
    }

    fn record(&mut self, source: &Path, error: impl Into<anyhow::Error>) {
        self.errors.push(Failure {
            source: source.to_path_buf(),
            error: error.into(),
        });
    }
}

/// Build the entire site.
///
/// Clears the output directory, renders every document in parallel,
/// copies assets, then persists queued metadata repairs. Repairs are
/// always attempted regardless of render failures elsewhere in the
/// batch. All recorded errors are surfaced through the logger; the
/// caller decides the exit status from [`BuildReport::has_failures`].
pub fn build_site(config: &SiteConfig) -> Result<BuildReport> {
    let output = &config.build.output;

    clear_output(output)?;

    let header = read_fragment(&config.build.header_path())?;
    let footer = read_fragment(&config.build.footer_path())?;

    let sources = collect_documents(&config.build.content);
    if config.base.title.is_empty() {
        log!("build"; "{} documents", sources.len());
    } else {
        log!("build"; "{}: {} documents", config.base.title, sources.len());
    }

    // Fan out per document; `collect` keeps input order for deterministic
    // merging below.
    let outcomes: Vec<Result<BuildResult, Failure>> = sources
        .par_iter()
        .map(|path| {
            Document::load(path)
                .and_then(|doc| build_document(&doc))
                .map_err(|e| Failure {
                    source: path.clone(),
                    error: e.into(),
                })
        })
        .collect();

    let mut report = BuildReport::default();
    let mut repairs: Vec<Repair> = Vec::new();
    // filename -> first claiming source, for the collision policy:
    // first document in batch order wins, later ones fail.
    let mut claimed: HashMap<String, PathBuf> = HashMap::new();

    for outcome in outcomes {
        let mut result = match outcome {
            Ok(result) => result,
            Err(failure) => {
                report.errors.push(failure);
                continue;
            }
        };

        // Queue the repair before any collision check; repair writes are
        // independent of whether the render output lands on disk.
        if let Some(repair) = result.repair.take() {
            repairs.push(repair);
        }

        if let Some(first) = claimed.get(&result.filename) {
            report.record(
                &result.source,
                DocumentError::OutputCollision {
                    filename: result.filename.clone(),
                    first: first.clone(),
                },
            );
            continue;
        }
        claimed.insert(result.filename.clone(), result.source.clone());

        let dest = output.join(&result.filename);
        let page = format!("{header}{}{footer}", result.html);
        match write_page(&dest, &page) {
            Ok(()) => report.written.push(dest),
            Err(e) => report.record(&result.source, DocumentError::Io(dest, e)),
        }
    }

    copy_assets(&config.build.assets, output, &mut report);

    // Flush repairs last, after all renders completed. Each failure is
    // recorded but never stops the remaining writes.
    for repair in repairs {
        match fs::write(&repair.source, &repair.content) {
            Ok(()) => {
                log!("repair"; "{}", repair.source.display());
                report.repairs_written += 1;
            }
            Err(e) => report.record(&repair.source, DocumentError::Io(repair.source.clone(), e)),
        }
    }

    for failure in &report.errors {
        log!("error"; "{}: {:#}", failure.source.display(), failure.error);
    }
    log!(
        "build";
        "{} pages written, {} repairs, {} errors",
        report.written.len(),
        report.repairs_written,
        report.errors.len()
    );

    Ok(report)
}

/// Fully clear and recreate the output directory. Fatal on failure.
fn clear_output(output: &Path) -> Result<()> {
    if output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// Read a header/footer fragment. Fatal on failure.
fn read_fragment(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read fragment: {}", path.display()))
}

fn write_page(dest: &Path, page: &str) -> std::io::Result<()> {
    // The declared filename may carry a subdirectory.
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, page)
}

/// Copy the assets directory verbatim into the output root.
///
/// Per-file failures are recorded and the batch continues; a missing
/// assets directory only logs a note.
fn copy_assets(assets: &Path, output: &Path, report: &mut BuildReport) {
    if !assets.is_dir() {
        log!("assets"; "no assets directory, skipping");
        return;
    }

    for source in collect_all_files(assets) {
        let result = (|| -> std::io::Result<()> {
            let rel = source
                .strip_prefix(assets)
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            let dest = output.join(rel);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&source, &dest)?;
            Ok(())
        })();

        if let Err(e) = result {
            report.record(&source, DocumentError::Io(source.clone(), e));
        }
    }
}
