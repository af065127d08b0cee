//! Per-document build pipeline.
//!
//! A [`Document`] is read once and never mutated in memory; the pipeline
//! turns it into exactly one [`BuildResult`] or one [`DocumentError`].
//! Metadata repairs are returned as data ([`Repair`]) for the
//! orchestrator to persist after all renders complete.

use crate::compiler::{
    error::DocumentError,
    frontmatter::{self, SENTINEL},
    markdown,
};
use crate::utils::date::{self, PartialDate};
use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

/// A source document as read from the content directory.
#[derive(Debug, Clone)]
pub struct Document {
    pub source: PathBuf,
    pub raw: String,
    pub modified: SystemTime,
}

impl Document {
    /// Read a document and its modification time from disk.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let io_err = |e| DocumentError::Io(path.to_path_buf(), e);
        let raw = fs::read_to_string(path).map_err(io_err)?;
        let modified = fs::metadata(path).and_then(|m| m.modified()).map_err(io_err)?;
        Ok(Self {
            source: path.to_path_buf(),
            raw,
            modified,
        })
    }
}

/// Corrected source text to persist back to a document whose required
/// metadata was missing. Only the metadata block differs from the
/// original file; the body is byte-identical.
#[derive(Debug, Clone)]
pub struct Repair {
    pub source: PathBuf,
    pub content: String,
}

/// The rendered output for one document.
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub source: PathBuf,
    /// Desired output filename, straight from frontmatter (may be the
    /// sentinel placeholder when a repair was queued).
    pub filename: String,
    pub html: String,
    pub repair: Option<Repair>,
}

/// Run extraction, validation, date formatting and rendering for one
/// document.
///
/// A date equal to the sentinel placeholder is treated as missing (no
/// injection, no failure); any other unparseable date fails the document.
pub fn build_document(doc: &Document) -> Result<BuildResult, DocumentError> {
    let (block, body) = frontmatter::extract(&doc.raw);
    // Delimited text that is not a YAML mapping is author prose, not
    // metadata (a document may open with a thematic break); it stays in
    // the body, byte for byte.
    let parsed = block.and_then(frontmatter::Frontmatter::parse);
    let has_block = parsed.is_some();
    let body = if has_block { body } else { doc.raw.as_str() };
    let (fm, needs_repair) = frontmatter::validate(parsed.unwrap_or_default());

    let date_line = match fm.date() {
        Some(value) if value != SENTINEL => {
            let parsed = PartialDate::parse(&value).map_err(|e| DocumentError::MalformedDate {
                value: value.clone(),
                reason: format!("{e:#}"),
            })?;
            Some(parsed.display(date::month_year(doc.modified)))
        }
        _ => None,
    };

    let html = markdown::render(body, date_line.as_deref());

    let repair = needs_repair.then(|| Repair {
        source: doc.source.clone(),
        // The body keeps every byte the author wrote after (or, without a
        // recognized block, including) the delimiters.
        content: if has_block {
            format!("---\n{}---\n{}", fm.to_block(), body)
        } else {
            format!("---\n{}---\n\n{}", fm.to_block(), body)
        },
    });

    // Guaranteed present after validation.
    let filename = fm.filename().unwrap_or_else(|| SENTINEL.to_owned());

    Ok(BuildResult {
        source: doc.source.clone(),
        filename,
        html,
        repair,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    /// Noon UTC on 2023-05-15: safely mid-month in any time zone.
    fn mtime_may_2023() -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(1_684_152_000)
    }

    fn doc(raw: &str) -> Document {
        Document {
            source: PathBuf::from("test.md"),
            raw: raw.to_owned(),
            modified: mtime_may_2023(),
        }
    }

    #[test]
    fn test_complete_document_no_repair() {
        let result =
            build_document(&doc("---\nfilename: hello.html\ndate: 2023-05\n---\n\n# Hello\n\nWorld"))
                .unwrap();
        assert_eq!(result.filename, "hello.html");
        assert!(result.repair.is_none());
        assert!(result.html.contains("<h1>Hello</h1>"));
        assert!(result.html.contains("<p>May 2023</p>"));
        assert!(result.html.contains("<p>World</p>"));
    }

    #[test]
    fn test_no_frontmatter_yields_full_repair() {
        let raw = "# Hello\n\nWorld";
        let result = build_document(&doc(raw)).unwrap();
        assert_eq!(result.filename, SENTINEL);
        let repair = result.repair.unwrap();
        // Sentinel block ahead of the untouched original body.
        assert!(repair.content.starts_with("---\n"));
        assert!(repair.content.ends_with(&format!("---\n\n{raw}")));
        assert!(repair.content.contains("filename: TODO"));
        assert!(repair.content.contains("date: TODO"));
        // No date injection without a real date.
        assert!(!result.html.contains("last updated"));
    }

    #[test]
    fn test_partial_frontmatter_repair_preserves_body_and_keys() {
        let result =
            build_document(&doc("---\ntitle: Hi\ndate: 2023-05\n---\n\n# Hello\n")).unwrap();
        let repair = result.repair.unwrap();
        assert!(repair.content.ends_with("---\n\n# Hello\n"));
        assert!(repair.content.contains("title: Hi"));
        assert!(repair.content.contains("date: 2023-05"));
        assert!(repair.content.contains("filename: TODO"));
    }

    #[test]
    fn test_non_mapping_block_keeps_author_bytes() {
        // Opens with a thematic break, not a metadata block.
        let raw = "---\nSome prose the author wrote\nthat is: not: valid: yaml\n---\nMore text\n";
        let result = build_document(&doc(raw)).unwrap();
        assert_eq!(result.filename, SENTINEL);
        assert!(result.html.contains("Some prose the author wrote"));

        let repair = result.repair.unwrap();
        // Sentinel block ahead of the untouched original, delimiters included.
        assert!(repair.content.ends_with(&format!("---\n\n{raw}")));
        assert!(repair.content.contains("that is: not: valid: yaml"));
    }

    #[test]
    fn test_malformed_date_fails_document() {
        let err = build_document(&doc("---\nfilename: x.html\ndate: not-a-date\n---\n\n# H"))
            .unwrap_err();
        assert!(matches!(err, DocumentError::MalformedDate { .. }));
    }

    #[test]
    fn test_sentinel_date_skips_injection() {
        // A previously repaired file carries `date: TODO` on disk.
        let result =
            build_document(&doc("---\nfilename: x.html\ndate: TODO\n---\n\n# H\n")).unwrap();
        assert!(result.repair.is_none());
        assert!(!result.html.contains("TODO"));
        assert!(result.html.contains("<h1>H</h1>"));
    }

    #[test]
    fn test_last_updated_suffix_from_mtime() {
        let result =
            build_document(&doc("---\nfilename: x.html\ndate: 2023-02\n---\n\n# H\n")).unwrap();
        assert!(result.html.contains("February 2023; last updated May 2023"));
    }

    #[test]
    fn test_rendering_pure_wrt_metadata() {
        let a = build_document(&doc("---\nfilename: a.html\ndate: 2023-05\ntitle: A\n---\n\n# H\n"))
            .unwrap();
        let b = build_document(&doc("---\nfilename: b.html\ndate: 2023-05\ntitle: B\n---\n\n# H\n"))
            .unwrap();
        assert_eq!(a.html, b.html);
    }
}
