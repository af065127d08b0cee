//! Site configuration management for `quill.toml`.
//!
//! # Sections
//!
//! | Section   | Purpose                                         |
//! |-----------|-------------------------------------------------|
//! | `[base]`  | Site metadata (title)                           |
//! | `[build]` | Paths: content, output, assets, fragments       |
//! | `[sync]`  | Cloud-synced writing folder, commit message     |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "my site"
//!
//! [build]
//! content = "src"
//! output = "dist"
//!
//! [sync]
//! writing_dir = "~/Writing/Published"
//! ```
//!
//! Core logic never reads the environment; everything it needs arrives
//! through this struct (home-directory expansion happens here, once,
//! during path normalization).

mod build;
pub mod defaults;
mod error;
mod sync;

use build::BuildConfig;
use error::ConfigError;
use sync::SyncConfig;

use crate::cli::Cli;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// `[base]` section - basic site metadata.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title, used for log output.
    pub title: String,
}

/// Root configuration structure representing quill.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Writing-folder sync settings
    #[serde(default)]
    pub sync: SyncConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf());
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());

        self.set_root(&root);
        self.update_path_with_root(&root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let Some(cli) = self.cli else { return };

        // Apply CLI overrides first
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.assets, cli.assets.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        // Normalize root to absolute path
        let root = Self::normalize_path(root);
        self.set_root(&root);

        // Normalize config path
        self.config_path = Self::normalize_path(&root.join(&cli.config));

        // Normalize all directory paths
        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.assets = Self::normalize_path(&root.join(&self.build.assets));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.templates = Self::normalize_path(&root.join(&self.build.templates));

        // Normalize writing dir (with tilde expansion)
        if let Some(writing_dir) = &self.sync.writing_dir
            && let Some(raw) = writing_dir.to_str()
        {
            let expanded = PathBuf::from(shellexpand::tilde(raw).into_owned());
            self.sync.writing_dir = Some(if expanded.is_relative() {
                Self::normalize_path(&root.join(expanded))
            } else {
                Self::normalize_path(&expanded)
            });
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!("Config file not found");
        }

        let is_sync = self.cli.is_some_and(Cli::is_sync);

        if is_sync {
            let Some(writing_dir) = &self.sync.writing_dir else {
                bail!(ConfigError::Validation(
                    "[sync.writing_dir] is required for `sync`".into()
                ));
            };
            if !writing_dir.is_dir() {
                bail!(ConfigError::Validation(format!(
                    "[sync.writing_dir] does not exist: {}",
                    writing_dir.display()
                )));
            }
        } else {
            if !self.build.content.is_dir() {
                bail!(ConfigError::Validation(format!(
                    "[build.content] does not exist: {}",
                    self.build.content.display()
                )));
            }
            for fragment in [self.build.header_path(), self.build.footer_path()] {
                if !fragment.is_file() {
                    bail!(ConfigError::Validation(format!(
                        "fragment not found: {}",
                        fragment.display()
                    )));
                }
            }
        }

        Ok(())
    }
}
