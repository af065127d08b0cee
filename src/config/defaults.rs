//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "src".into()
    }

    pub fn output() -> PathBuf {
        "dist".into()
    }

    pub fn assets() -> PathBuf {
        "static".into()
    }

    pub fn templates() -> PathBuf {
        "templates".into()
    }

    pub fn header() -> PathBuf {
        "_header.html".into()
    }

    pub fn footer() -> PathBuf {
        "_footer.html".into()
    }
}

pub mod sync {
    pub fn commit_message() -> String {
        "Auto-sync from writing folder".into()
    }
}
