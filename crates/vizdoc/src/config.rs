//! Configuration types for vizdoc document rendering.
//!
//! This module provides configuration structures that control where runtime
//! assets come from, how input is split into blocks, and how documents are
//! styled. All types implement [`serde::Deserialize`] for loading from
//! external sources; every field is optional.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`AssetConfig`] - Runtime asset directory and template override directory.
//! - [`ExtractConfig`] - Fence tags and the grammar hint applied to blocks.
//! - [`StyleConfig`] - Mermaid theme and document title.
//!
//! # Example
//!
//! ```
//! # use vizdoc::config::{AppConfig, MermaidTheme};
//! let config = AppConfig::default();
//! assert_eq!(config.assets().asset_dir().to_str(), Some("static/js"));
//! assert_eq!(config.style().mermaid_theme(), Ok(MermaidTheme::Default));
//! ```

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use vizdoc_core::grammar::GrammarHint;
use vizdoc_parser::DEFAULT_FENCE_TAGS;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Asset location section.
    #[serde(default)]
    assets: AssetConfig,

    /// Block extraction section.
    #[serde(default)]
    extract: ExtractConfig,

    /// Style section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(assets: AssetConfig, extract: ExtractConfig, style: StyleConfig) -> Self {
        Self {
            assets,
            extract,
            style,
        }
    }

    /// Returns the asset configuration.
    pub fn assets(&self) -> &AssetConfig {
        &self.assets
    }

    /// Returns the extraction configuration.
    pub fn extract(&self) -> &ExtractConfig {
        &self.extract
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

fn default_asset_dir() -> PathBuf {
    PathBuf::from("static/js")
}

/// Where runtime assets and template overrides are read from.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    /// Directory holding `mermaid.min.js`, `viz-lite.js`, `viz-full.js` and
    /// `panzoom.min.js`.
    #[serde(default = "default_asset_dir")]
    asset_dir: PathBuf,

    /// Directory whose templates take precedence over the bundled ones.
    #[serde(default)]
    template_dir: Option<PathBuf>,
}

impl AssetConfig {
    pub fn new(asset_dir: impl Into<PathBuf>, template_dir: Option<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            template_dir,
        }
    }

    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }

    pub fn template_dir(&self) -> Option<&Path> {
        self.template_dir.as_deref()
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            asset_dir: default_asset_dir(),
            template_dir: None,
        }
    }
}

fn default_fence_tags() -> Vec<String> {
    DEFAULT_FENCE_TAGS.iter().map(|tag| tag.to_string()).collect()
}

/// How raw input is split into diagram blocks.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    /// Fence tags recognized as diagram blocks.
    #[serde(default = "default_fence_tags")]
    tags: Vec<String>,

    /// Grammar applied to every block, or `auto` to detect per block.
    #[serde(default)]
    grammar: GrammarHint,
}

impl ExtractConfig {
    pub fn new(tags: Vec<String>, grammar: GrammarHint) -> Self {
        Self { tags, grammar }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn grammar(&self) -> GrammarHint {
        self.grammar
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            tags: default_fence_tags(),
            grammar: GrammarHint::Auto,
        }
    }
}

/// A built-in Mermaid theme.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MermaidTheme {
    #[default]
    Default,
    Dark,
    Forest,
    Neutral,
    Base,
}

impl MermaidTheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dark => "dark",
            Self::Forest => "forest",
            Self::Neutral => "neutral",
            Self::Base => "base",
        }
    }
}

impl fmt::Display for MermaidTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MermaidTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "dark" => Ok(Self::Dark),
            "forest" => Ok(Self::Forest),
            "neutral" => Ok(Self::Neutral),
            "base" => Ok(Self::Base),
            _ => Err(format!(
                "invalid Mermaid theme `{s}`, valid values: default, dark, forest, neutral, base"
            )),
        }
    }
}

/// Visual options for rendered documents.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Mermaid theme name.
    #[serde(default)]
    mermaid_theme: Option<String>,

    /// Document title. Defaults to the grammar name, e.g. `Mermaid Diagram`.
    #[serde(default)]
    title: Option<String>,
}

impl StyleConfig {
    pub fn new(mermaid_theme: Option<String>, title: Option<String>) -> Self {
        Self {
            mermaid_theme,
            title,
        }
    }

    /// Returns the parsed [`MermaidTheme`], or the default theme if none is
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured name is not a built-in theme.
    pub fn mermaid_theme(&self) -> Result<MermaidTheme, String> {
        self.mermaid_theme
            .as_deref()
            .map(MermaidTheme::from_str)
            .transpose()
            .map(Option::unwrap_or_default)
            .map_err(|err| format!("Invalid Mermaid theme in config: {err}"))
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use vizdoc_core::grammar::GrammarKind;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.assets().asset_dir(), Path::new("static/js"));
        assert_eq!(config.assets().template_dir(), None);
        assert_eq!(config.extract().tags(), default_fence_tags());
        assert_eq!(config.extract().grammar(), GrammarHint::Auto);
        assert_eq!(config.style().title(), None);
    }

    #[test]
    fn test_theme_parsing() {
        let style = StyleConfig::new(Some("forest".to_string()), None);
        assert_eq!(style.mermaid_theme(), Ok(MermaidTheme::Forest));

        let style = StyleConfig::new(Some("sparkly".to_string()), None);
        let err = style.mermaid_theme().unwrap_err();
        assert!(err.contains("invalid Mermaid theme `sparkly`"));
    }

    #[test]
    fn test_extract_config_with_explicit_grammar() {
        let extract = ExtractConfig::new(vec!["mmd".to_string()], GrammarHint::Explicit(GrammarKind::Mermaid));
        assert_eq!(extract.tags(), ["mmd".to_string()]);
        assert_eq!(
            extract.grammar(),
            GrammarHint::Explicit(GrammarKind::Mermaid)
        );
    }
}
