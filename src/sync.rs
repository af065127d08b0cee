//! Writing-folder synchronization.
//!
//! Mirrors the cloud-synced writing folder into the version-controlled
//! content directory: pull first, normalize file extensions the writing
//! app mangles, copy flat, then commit and push. Git is an opaque
//! collaborator; every git step shells out.

use crate::{config::SiteConfig, log, utils::exec::exec};
use anyhow::{Context, Result, anyhow};
use std::{fs, path::Path};

/// Run the full sync job: pull → normalize → copy → commit → push.
pub fn sync_site(config: &SiteConfig) -> Result<()> {
    let root = config.get_root().to_owned();
    let writing_dir = config
        .sync
        .writing_dir
        .as_deref()
        .context("[sync.writing_dir] is not configured")?;
    let content = &config.build.content;

    log!("sync"; "pulling latest changes");
    exec(&root, "git", &["pull"])?;

    let renamed = normalize_extensions(writing_dir)?;
    if renamed > 0 {
        log!("sync"; "renamed {renamed} files to .md");
    }

    let copied = copy_flat(writing_dir, content)?;
    log!("sync"; "copied {copied} files from {}", writing_dir.display());

    let content_str = content
        .to_str()
        .ok_or_else(|| anyhow!("content path is not valid UTF-8"))?;
    exec(&root, "git", &["add", content_str])?;

    let staged = exec(&root, "git", &["status", "--porcelain", "--", content_str])?;
    if staged.trim().is_empty() {
        log!("sync"; "nothing to commit");
        return Ok(());
    }

    exec(&root, "git", &["commit", "-m", &config.sync.commit_message])?;
    exec(&root, "git", &["push"])?;
    log!("sync"; "done");
    Ok(())
}

/// Rename writing-app exports so the build pipeline sees Markdown:
/// `.txt` files get their extension replaced, extensionless files get
/// `.md` appended. Anything else is left alone.
fn normalize_extensions(dir: &Path) -> Result<usize> {
    let mut renamed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') {
            continue;
        }

        let target = match path.extension() {
            Some(ext) if ext == "txt" => path.with_extension("md"),
            None => path.with_extension("md"),
            Some(_) => continue,
        };
        fs::rename(&path, &target)
            .with_context(|| format!("Failed to rename {}", path.display()))?;
        renamed += 1;
    }
    Ok(renamed)
}

/// Copy every regular file of `from` into `to` (the writing folder has no
/// nested structure). Hidden files are skipped.
fn copy_flat(from: &Path, to: &Path) -> Result<usize> {
    fs::create_dir_all(to)?;
    let mut copied = 0;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        fs::copy(entry.path(), to.join(entry.file_name()))
            .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
        copied += 1;
    }
    Ok(copied)
}
