//! `[sync]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[sync]` section in quill.toml - writing-folder synchronization.
///
/// # Example
/// ```toml
/// [sync]
/// writing_dir    = "~/Writing/Published"
/// commit_message = "Auto-sync from writing folder"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Cloud-synced writing folder. `~` is expanded. Required for `sync`.
    pub writing_dir: Option<PathBuf>,

    /// Commit message for the auto-sync commit.
    #[serde(default = "defaults::sync::commit_message")]
    #[educe(Default = defaults::sync::commit_message())]
    pub commit_message: String,
}
