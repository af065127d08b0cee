//! Frontmatter extraction, validation and repair.
//!
//! A document may begin with a metadata block delimited by `---` lines:
//!
//! ```text
//! ---
//! filename: hello.html
//! date: 2023-05
//! ---
//!
//! # Hello
//! ```
//!
//! Extraction never fails: a missing or unclosed block is a signaled
//! outcome, not an error. Validation is pure; it fills missing required
//! keys with the [`SENTINEL`] placeholder and reports whether the source
//! file needs its metadata rewritten.

use serde_yaml_ng::{Mapping, Value};

/// Placeholder written for missing required keys. A `date` equal to this
/// value on a later run is treated as missing rather than malformed.
pub const SENTINEL: &str = "TODO";

/// Split raw document text into `(metadata block, body)`.
///
/// The block is the text strictly between a `---` first line and the next
/// `---` line; the body is everything after the closing delimiter line.
/// Without an opening delimiter, or with an unclosed one, the whole input
/// is body.
pub fn extract(raw: &str) -> (Option<&str>, &str) {
    let Some(rest) = raw.strip_prefix("---\n") else {
        return (None, raw);
    };

    // Empty block: the closing delimiter immediately follows the opening.
    if let Some(body) = rest.strip_prefix("---\n") {
        return (Some(""), body);
    }
    if rest == "---" {
        return (Some(""), "");
    }

    if let Some(idx) = rest.find("\n---\n") {
        return (Some(&rest[..idx]), &rest[idx + 5..]);
    }
    // Closing delimiter at end of input without a trailing newline.
    if let Some(block) = rest.strip_suffix("\n---") {
        return (Some(block), "");
    }

    (None, raw)
}

/// Parsed frontmatter: an ordered string→value mapping.
///
/// Backed by [`serde_yaml_ng::Mapping`], which preserves insertion order,
/// so a repair write never reorders keys the author put there.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    map: Mapping,
}

impl Frontmatter {
    /// Parse a metadata block. `None` means the text is not a YAML
    /// mapping at all (author prose between thematic breaks, say) and
    /// must stay in the body untouched.
    pub fn parse(block: &str) -> Option<Self> {
        if block.trim().is_empty() {
            return Some(Self::default());
        }
        let map = serde_yaml_ng::from_str::<Mapping>(block).ok()?;
        Some(Self { map })
    }

    pub fn filename(&self) -> Option<String> {
        self.get("filename")
    }

    pub fn date(&self) -> Option<String> {
        self.get("date")
    }

    /// Fetch a scalar value as a string. Numbers and booleans are
    /// stringified (YAML reads `date: 2024` as an integer); null and
    /// structured values count as absent.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.map.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.map.insert(
            Value::String(key.to_owned()),
            Value::String(value.to_owned()),
        );
    }

    /// Serialize back to a YAML block (trailing newline included).
    pub fn to_block(&self) -> String {
        // A mapping of scalars cannot fail to serialize.
        serde_yaml_ng::to_string(&self.map).unwrap_or_default()
    }
}

/// Ensure the required keys `filename` and `date` are present.
///
/// Missing keys get the [`SENTINEL`] placeholder; `shortname` is honored
/// as a legacy alias when `filename` is absent. Present keys are never
/// removed or reordered. Returns the corrected mapping and whether the
/// source document needs a repair write. Pure: persistence is the
/// orchestrator's job.
pub fn validate(mut fm: Frontmatter) -> (Frontmatter, bool) {
    let mut needs_repair = false;

    if fm.filename().is_none() {
        let filename = fm.get("shortname").unwrap_or_else(|| SENTINEL.to_owned());
        fm.insert("filename", &filename);
        needs_repair = true;
    }

    if fm.date().is_none() {
        fm.insert("date", SENTINEL);
        needs_repair = true;
    }

    (fm, needs_repair)
}
