//! Document assembly.
//!
//! Assembly combines the document template, the engine fragment for the
//! block's grammar, the engine and control scripts, and the escaped sources
//! into one self-contained HTML page. The steps:
//!
//! 1. Load every piece. A missing piece yields a missing-asset document, not
//!    an error.
//! 2. Check that the templates carry the placeholders assembly relies on.
//! 3. Fill the engine fragment, then substitute it for the render stub of
//!    the document template in the same pass as the remaining placeholders.
//! 4. Check that the result carries the success status marker.

pub mod escape;
pub mod template;

use log::{debug, info};
use thiserror::Error;

use vizdoc_core::{
    asset::{AssetError, AssetLoader, PANZOOM_JS, TemplateLoader},
    document::{RenderDocument, RenderStatus},
    grammar::GrammarKind,
};
use vizdoc_parser::{Translation, UnsupportedConstruct};

use crate::{config::MermaidTheme, error_page, templates::DOCUMENT_TEMPLATE};

use self::{
    escape::{html_text, script_literal, script_source},
    template::{Bindings, require, require_stub, substitute},
};

/// Placeholders the document template must carry.
const DOCUMENT_PLACEHOLDERS: &[&str] = &["ENGINE_JS", "CONTROLS_JS", "ESCAPED_ORIGINAL"];

/// Placeholders every engine fragment must carry.
const FRAGMENT_PLACEHOLDERS: &[&str] = &["DIAGRAM_SOURCE"];

/// Failure to assemble a document from its pieces.
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("template `{template}` is missing required placeholder `§{placeholder}§`")]
    MissingPlaceholder {
        template: String,
        placeholder: &'static str,
    },

    #[error("document assembled from `{template}` carries no success status marker")]
    MissingStatusMarker { template: String },
}

/// Diagram text ready for an engine, or the reason there is none.
#[derive(Debug, Clone)]
pub enum Prepared {
    /// Text in the engine's own language.
    Diagram(String),
    /// The source cannot be rendered by the local engines.
    Unsupported(UnsupportedConstruct),
}

impl From<Translation> for Prepared {
    fn from(translation: Translation) -> Self {
        match translation {
            Translation::Graph(graph) | Translation::Placeholder(graph) => {
                Self::Diagram(graph.to_string())
            }
            Translation::Unsupported(construct) => Self::Unsupported(construct),
        }
    }
}

/// Assembles documents from one set of loaders and style settings.
pub struct Assembler<'a> {
    assets: &'a dyn AssetLoader,
    templates: &'a dyn TemplateLoader,
    theme: MermaidTheme,
    title: Option<&'a str>,
}

impl<'a> Assembler<'a> {
    pub fn new(assets: &'a dyn AssetLoader, templates: &'a dyn TemplateLoader) -> Self {
        Self {
            assets,
            templates,
            theme: MermaidTheme::default(),
            title: None,
        }
    }

    pub fn with_theme(mut self, theme: MermaidTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the page title. Defaults to "<Grammar> Diagram".
    pub fn with_title(mut self, title: Option<&'a str>) -> Self {
        self.title = title;
        self
    }

    /// Assembles the document for one prepared block.
    ///
    /// `original` is the block text as the user wrote it; it is embedded for
    /// the copy and download controls and echoed by error documents.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError`] if a loader fails, a template lacks a
    /// required placeholder, or the result carries no success marker. Absent
    /// assets are not errors; they produce a missing-asset document.
    pub fn assemble(
        &self,
        kind: GrammarKind,
        prepared: &Prepared,
        original: &str,
    ) -> Result<RenderDocument, AssembleError> {
        let diagram = match prepared {
            Prepared::Diagram(diagram) => diagram,
            Prepared::Unsupported(construct) => {
                info!(construct = construct.id(); "Source uses an unsupported construct");
                return Ok(error_page::unsupported_construct(construct, original));
            }
        };

        let engine = kind.engine();
        let Some(document) = self.templates.load_template(DOCUMENT_TEMPLATE)? else {
            return Ok(self.missing(DOCUMENT_TEMPLATE, original));
        };
        let Some(fragment) = self.templates.load_template(engine.fragment())? else {
            return Ok(self.missing(engine.fragment(), original));
        };

        let mut engine_js = String::new();
        for name in engine.assets() {
            let Some(source) = self.assets.load_asset(name)? else {
                return Ok(self.missing(name, original));
            };
            if !engine_js.is_empty() {
                engine_js.push('\n');
            }
            engine_js.push_str(&script_source(&source));
        }
        let Some(controls_js) = self.assets.load_asset(PANZOOM_JS)? else {
            return Ok(self.missing(PANZOOM_JS, original));
        };
        let controls_js = script_source(&controls_js);

        require(&document, DOCUMENT_TEMPLATE, DOCUMENT_PLACEHOLDERS)?;
        require_stub(&document, DOCUMENT_TEMPLATE)?;
        require(&fragment, engine.fragment(), FRAGMENT_PLACEHOLDERS)?;

        let diagram_source = script_literal(diagram);
        let theme = script_literal(self.theme.as_str());
        let fragment = substitute(
            &fragment,
            &Bindings::new()
                .bind("DIAGRAM_SOURCE", &diagram_source)
                .bind("THEME", &theme),
        );

        let escaped_original = script_literal(original);
        let title = html_text(&self.title(kind));
        let html = substitute(
            &document,
            &Bindings::new()
                .stub(&fragment)
                .bind("ENGINE_JS", &engine_js)
                .bind("CONTROLS_JS", &controls_js)
                .bind("ESCAPED_ORIGINAL", &escaped_original)
                .bind("DIAGRAM_KIND", kind.display_name())
                .bind("SOURCE_EXTENSION", kind.source_extension())
                .bind("TITLE", &title),
        );

        if RenderStatus::sniff(&html) != Some(RenderStatus::Success) {
            return Err(AssembleError::MissingStatusMarker {
                template: DOCUMENT_TEMPLATE.to_string(),
            });
        }

        debug!(grammar = kind.name(), bytes = html.len(); "Assembled document");
        Ok(RenderDocument::new(RenderStatus::Success, html))
    }

    fn title(&self, kind: GrammarKind) -> String {
        match self.title {
            Some(title) => title.to_string(),
            None => format!("{} Diagram", kind.display_name()),
        }
    }

    fn missing(&self, name: &str, original: &str) -> RenderDocument {
        info!(name; "Runtime asset not found");
        error_page::missing_asset(name, original)
    }
}
