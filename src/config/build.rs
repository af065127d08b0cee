//! `[build]` section configuration.
//!
//! All paths here resolve relative to the project root until
//! `SiteConfig::update_with_cli` normalizes them to absolute paths.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in quill.toml - build pipeline paths.
///
/// # Example
/// ```toml
/// [build]
/// content   = "src"        # markdown sources
/// output    = "dist"
/// assets    = "static"     # copied verbatim into output
/// templates = "templates"  # header/footer fragments
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Content source directory (Markdown files).
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Build output directory (fully cleared at the start of every run).
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Static assets directory, copied verbatim into the output root.
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,

    /// Directory holding the header/footer fragments.
    #[serde(default = "defaults::build::templates")]
    #[educe(Default = defaults::build::templates())]
    pub templates: PathBuf,

    /// Header fragment filename, inside `templates`.
    #[serde(default = "defaults::build::header")]
    #[educe(Default = defaults::build::header())]
    pub header: PathBuf,

    /// Footer fragment filename, inside `templates`.
    #[serde(default = "defaults::build::footer")]
    #[educe(Default = defaults::build::footer())]
    pub footer: PathBuf,
}

impl BuildConfig {
    pub fn header_path(&self) -> PathBuf {
        self.templates.join(&self.header)
    }

    pub fn footer_path(&self) -> PathBuf {
        self.templates.join(&self.footer)
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::Path;

    #[test]
    fn test_build_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.build.content, Path::new("src"));
        assert_eq!(config.build.output, Path::new("dist"));
        assert_eq!(config.build.assets, Path::new("static"));
        assert_eq!(
            config.build.header_path(),
            Path::new("templates/_header.html")
        );
        assert_eq!(
            config.build.footer_path(),
            Path::new("templates/_footer.html")
        );
    }

    #[test]
    fn test_build_config_overrides() {
        let config: SiteConfig = toml::from_str(
            r#"
            [build]
            content = "writing"
            output = "public"
            header = "head.html"
        "#,
        )
        .unwrap();
        assert_eq!(config.build.content, Path::new("writing"));
        assert_eq!(config.build.output, Path::new("public"));
        assert_eq!(config.build.header_path(), Path::new("templates/head.html"));
    }

    #[test]
    fn test_build_config_unknown_field_rejection() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
            [build]
            contnet = "typo"
        "#,
        );
        assert!(result.is_err());
    }
}
