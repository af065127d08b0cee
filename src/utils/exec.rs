//! External command execution.
//!
//! The only external tool this crate runs is `git`, during sync. Commands
//! run in a working directory, stderr is logged on success (warnings),
//! and a non-zero exit status becomes an error carrying both streams.

use crate::log;
use anyhow::{Context, Result, bail};
use std::{path::Path, process::Command};

/// Run a command in `root` and capture its output.
///
/// # Errors
/// Returns an error if the command fails to start or exits non-zero.
pub fn exec(root: &Path, name: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(name)
        .args(args)
        .current_dir(root)
        .output()
        .with_context(|| format!("Failed to execute `{name}`"))?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    if !output.status.success() {
        let mut msg = format!("Command `{name}` failed with {}", output.status);
        for stream in [stderr.trim(), stdout.trim()] {
            if !stream.is_empty() {
                msg.push('\n');
                msg.push_str(stream);
            }
        }
        bail!(msg);
    }

    // On success, stderr still carries warnings worth surfacing.
    let warnings = stderr.trim();
    if !warnings.is_empty() {
        log!(name; "{}", warnings);
    }

    Ok(stdout.into_owned())
}
