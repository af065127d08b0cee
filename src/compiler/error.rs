//! Per-document error taxonomy for the build pipeline.
//!
//! Missing metadata is deliberately *not* here: it is recovered locally
//! with a placeholder plus a repair write and never fails a document.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that fail a single document without aborting the batch.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid date `{value}`: {reason}")]
    MalformedDate { value: String, reason: String },

    #[error("IO error on `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("output filename `{filename}` already claimed by `{first}`")]
    OutputCollision { filename: String, first: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_document_error_display() {
        let err = DocumentError::MalformedDate {
            value: "2024-13".into(),
            reason: "month is out of range: 13".into(),
        };
        let display = format!("{err}");
        assert!(display.contains("2024-13"));
        assert!(display.contains("month is out of range"));

        let io = DocumentError::Io(
            PathBuf::from("notes.md"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        assert!(format!("{io}").contains("notes.md"));

        let collision = DocumentError::OutputCollision {
            filename: "hello.html".into(),
            first: PathBuf::from("a.md"),
        };
        let display = format!("{collision}");
        assert!(display.contains("hello.html"));
        assert!(display.contains("a.md"));
    }
}
