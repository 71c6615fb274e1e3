//! vizdoc - Self-contained interactive HTML documents for text diagrams.
//!
//! Detection, preparation, and document assembly for Mermaid, PlantUML and
//! Graphviz sources. Each diagram becomes one complete HTML page embedding
//! its browser engine, the prepared source, and pan/zoom/export controls.

pub mod assemble;
pub mod config;
pub mod templates;

mod error;
mod error_page;

pub use vizdoc_core::{asset, document, grammar, source};

pub use assemble::AssembleError;
pub use error::VizdocError;

use log::{debug, info, trace, warn};

use vizdoc_core::{
    asset::{AssetDir, AssetLoader, PANZOOM_JS, TemplateLoader},
    document::RenderDocument,
    grammar::{GrammarHint, GrammarKind},
    source::{DiagramSource, ExtractedBlock},
};
use vizdoc_parser::{normalize, translate};

use assemble::{Assembler, Prepared};
use config::{AppConfig, MermaidTheme};
use templates::TemplateSet;

/// Builder for turning diagram text into HTML documents.
///
/// Holds the configuration and the loaders for runtime assets and templates.
/// By default assets are read from the configured asset directory and
/// templates come from the crate, optionally overridden from the configured
/// template directory.
///
/// # Examples
///
/// ```rust
/// use vizdoc::{DocumentBuilder, asset::MemoryAssets, config::AppConfig};
///
/// let assets = MemoryAssets::new()
///     .with("mermaid.min.js", "/* mermaid */")
///     .with("panzoom.min.js", "/* panzoom */");
/// let builder = DocumentBuilder::new(AppConfig::default()).with_assets(assets);
///
/// let html = builder
///     .render_all("```mermaid\ngraph TD\nA-->B\n```")
///     .expect("input holds a block");
/// assert!(html.contains(r#"<meta name="diagram-render-status" content="ok">"#));
/// ```
pub struct DocumentBuilder {
    config: AppConfig,
    assets: Box<dyn AssetLoader>,
    templates: Box<dyn TemplateLoader>,
    theme: MermaidTheme,
}

impl DocumentBuilder {
    /// Create a new document builder with the given configuration.
    ///
    /// An invalid Mermaid theme is logged and replaced by the default theme.
    pub fn new(config: AppConfig) -> Self {
        let assets = AssetDir::new(config.assets().asset_dir());
        let templates = match config.assets().template_dir() {
            Some(dir) => TemplateSet::with_overrides(dir),
            None => TemplateSet::bundled(),
        };
        let theme = config.style().mermaid_theme().unwrap_or_else(|err| {
            warn!(err; "Falling back to the default Mermaid theme");
            MermaidTheme::default()
        });

        Self {
            config,
            assets: Box::new(assets),
            templates: Box::new(templates),
            theme,
        }
    }

    /// Replaces the runtime-asset loader.
    pub fn with_assets(mut self, assets: impl AssetLoader + 'static) -> Self {
        self.assets = Box::new(assets);
        self
    }

    /// Replaces the template loader.
    pub fn with_templates(mut self, templates: impl TemplateLoader + 'static) -> Self {
        self.templates = Box::new(templates);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Splits `raw` into diagram blocks using the configured fence tags.
    pub fn extract<'a>(&self, raw: &'a str) -> Vec<ExtractedBlock<'a>> {
        let blocks = vizdoc_parser::extract_blocks(raw, self.config.extract().tags());
        info!(blocks = blocks.len(); "Extracted diagram blocks");
        blocks
    }

    /// Determines the grammar of `text`, if any detector matches.
    pub fn detect(&self, text: &str) -> Option<GrammarKind> {
        vizdoc_parser::detect(text)
    }

    /// Renders every block of `raw` into one string.
    ///
    /// Documents are joined with a newline in block order. Returns `None` if
    /// the input holds no blocks. A block that fails yields its error
    /// document; the other blocks are unaffected.
    pub fn render_all(&self, raw: &str) -> Option<String> {
        let documents = self.render_documents(raw);
        if documents.is_empty() {
            return None;
        }

        let html: Vec<String> = documents
            .into_iter()
            .map(RenderDocument::into_html)
            .collect();
        Some(html.join("\n"))
    }

    /// Renders every block of `raw`, keeping the per-block status.
    ///
    /// The configured grammar hint applies to every block.
    pub fn render_documents(&self, raw: &str) -> Vec<RenderDocument> {
        let hint = self.config.extract().grammar();
        self.extract(raw)
            .iter()
            .map(|block| self.render_source(&block.to_source(hint)))
            .collect()
    }

    /// Renders one source. Failures become error documents.
    pub fn render_source(&self, source: &DiagramSource<'_>) -> RenderDocument {
        self.try_render_source(source).unwrap_or_else(|err| {
            warn!(err:%; "Document assembly failed");
            error_page::assembly_exception(&err.to_string(), source.text())
        })
    }

    /// Renders one source, surfacing assembly failures as errors.
    ///
    /// Recoverable outcomes (no grammar detected, missing asset, unsupported
    /// construct) are still returned as error documents.
    ///
    /// # Errors
    ///
    /// Returns [`VizdocError::Assemble`] if a loader fails or a template is
    /// malformed.
    pub fn try_render_source(
        &self,
        source: &DiagramSource<'_>,
    ) -> Result<RenderDocument, VizdocError> {
        let original = source.text();
        let kind = match source.hint() {
            GrammarHint::Explicit(kind) => kind,
            GrammarHint::Auto => match self.detect(original) {
                Some(kind) => kind,
                None => {
                    info!("No diagram type detected");
                    return Ok(error_page::no_type_detected(original));
                }
            },
        };
        debug!(grammar = kind.name(); "Rendering block");

        let normalized = normalize(original, kind);
        let prepared = if kind.needs_translation() {
            Prepared::from(translate(&normalized))
        } else {
            Prepared::Diagram(normalized.into_text())
        };
        trace!(prepared:?; "Prepared diagram");

        let document = Assembler::new(self.assets.as_ref(), self.templates.as_ref())
            .with_theme(self.theme)
            .with_title(self.config.style().title())
            .assemble(kind, &prepared, original)?;
        Ok(document)
    }

    /// Lists the runtime assets the asset loader cannot provide.
    ///
    /// # Errors
    ///
    /// Returns [`VizdocError::Asset`] if an asset exists but cannot be read.
    pub fn missing_assets(&self) -> Result<Vec<&'static str>, VizdocError> {
        let mut names: Vec<&'static str> = Vec::new();
        for kind in vizdoc_core::grammar::DETECTION_ORDER {
            for name in kind.engine().assets() {
                if !names.contains(name) {
                    names.push(name);
                }
            }
        }
        names.push(PANZOOM_JS);

        let mut missing = Vec::new();
        for name in names {
            if self.assets.load_asset(name)?.is_none() {
                missing.push(name);
            }
        }
        Ok(missing)
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
