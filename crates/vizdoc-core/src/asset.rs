//! Runtime assets and templates: the loader boundary.
//!
//! Engine sources (Mermaid.js, Viz.js) and the pan/zoom library are opaque
//! blobs that vizdoc embeds but never produces. They are looked up by name
//! through an [`AssetLoader`]; document templates through a
//! [`TemplateLoader`]. Both return `Ok(None)` for a name that does not exist,
//! so absence stays a recoverable condition rather than an error.
//!
//! Implementations provided here:
//! - [`AssetDir`]: reads `<dir>/<name>` from disk.
//! - [`MemoryAssets`]: an in-memory map, for embedding callers and tests.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use log::trace;
use thiserror::Error;

/// Mermaid engine source.
pub const MERMAID_JS: &str = "mermaid.min.js";
/// First half of the Viz.js engine.
pub const VIZ_LITE_JS: &str = "viz-lite.js";
/// Second half of the Viz.js engine.
pub const VIZ_FULL_JS: &str = "viz-full.js";
/// Pan/zoom library backing the interactive controls.
pub const PANZOOM_JS: &str = "panzoom.min.js";

/// Failure to read an asset or template that may exist.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read `{name}`: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("`{name}` is not valid UTF-8")]
    InvalidUtf8 { name: String },
}

/// Loads runtime assets by name.
pub trait AssetLoader: Send + Sync {
    /// Returns the asset content, or `None` if no asset has that name.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError`] if the asset exists but cannot be read.
    fn load_asset(&self, name: &str) -> Result<Option<String>, AssetError>;
}

/// Loads document templates by name.
pub trait TemplateLoader: Send + Sync {
    /// Returns the template text, or `None` if no template has that name.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError`] if the template exists but cannot be read.
    fn load_template(&self, name: &str) -> Result<Option<String>, AssetError>;
}

/// A directory of asset or template files.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, name: &str) -> Result<Option<String>, AssetError> {
        let path = self.root.join(name);
        trace!(path = path.display().to_string(); "Reading file");

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(AssetError::Io {
                    name: name.to_string(),
                    source,
                });
            }
        };

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| AssetError::InvalidUtf8 {
                name: name.to_string(),
            })
    }
}

impl AssetLoader for AssetDir {
    fn load_asset(&self, name: &str) -> Result<Option<String>, AssetError> {
        self.read(name)
    }
}

impl TemplateLoader for AssetDir {
    fn load_template(&self, name: &str) -> Result<Option<String>, AssetError> {
        self.read(name)
    }
}

/// Assets and templates held in memory.
///
/// # Example
///
/// ```
/// use vizdoc_core::asset::{AssetLoader, MemoryAssets};
///
/// let assets = MemoryAssets::new().with("panzoom.min.js", "/* panzoom */");
/// assert!(assets.load_asset("panzoom.min.js").unwrap().is_some());
/// assert!(assets.load_asset("mermaid.min.js").unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    entries: HashMap<String, String>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry, builder style.
    pub fn with(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.entries.insert(name.into(), content.into());
    }

    /// Removes an entry, returning its content.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }
}

impl AssetLoader for MemoryAssets {
    fn load_asset(&self, name: &str) -> Result<Option<String>, AssetError> {
        Ok(self.entries.get(name).cloned())
    }
}

impl TemplateLoader for MemoryAssets {
    fn load_template(&self, name: &str) -> Result<Option<String>, AssetError> {
        Ok(self.entries.get(name).cloned())
    }
}
