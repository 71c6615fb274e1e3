//! Bundled document templates.
//!
//! The page template and the engine fragments ship inside the crate. A
//! [`TemplateSet`] can be pointed at a directory whose files take precedence
//! over the bundled copies, one file at a time.

use std::path::PathBuf;

use log::debug;

use vizdoc_core::asset::{AssetDir, AssetError, TemplateLoader};

/// Name of the page template.
pub const DOCUMENT_TEMPLATE: &str = "document.html";

const BUNDLED: &[(&str, &str)] = &[
    (DOCUMENT_TEMPLATE, include_str!("../templates/document.html")),
    ("mermaid.js", include_str!("../templates/mermaid.js")),
    ("viz.js", include_str!("../templates/viz.js")),
];

/// Bundled templates, optionally overridden from a directory.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    overrides: Option<AssetDir>,
}

impl TemplateSet {
    /// Only the bundled templates.
    pub fn bundled() -> Self {
        Self::default()
    }

    /// Bundled templates, with files in `dir` taking precedence.
    pub fn with_overrides(dir: impl Into<PathBuf>) -> Self {
        Self {
            overrides: Some(AssetDir::new(dir)),
        }
    }

    fn bundled_template(name: &str) -> Option<&'static str> {
        BUNDLED
            .iter()
            .find(|(bundled, _)| *bundled == name)
            .map(|(_, text)| *text)
    }
}

impl TemplateLoader for TemplateSet {
    fn load_template(&self, name: &str) -> Result<Option<String>, AssetError> {
        if let Some(dir) = &self.overrides {
            if let Some(text) = dir.load_template(name)? {
                debug!(name, dir = dir.root().display().to_string(); "Using template override");
                return Ok(Some(text));
            }
        }
        Ok(Self::bundled_template(name).map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use vizdoc_core::document::RenderStatus;

    use super::*;

    #[test]
    fn test_bundled_templates_are_available() {
        let templates = TemplateSet::bundled();
        for name in [DOCUMENT_TEMPLATE, "mermaid.js", "viz.js"] {
            assert!(templates.load_template(name).unwrap().is_some(), "{name}");
        }
        assert!(templates.load_template("other.html").unwrap().is_none());
    }

    #[test]
    fn test_bundled_document_carries_success_marker() {
        let document = TemplateSet::bundled()
            .load_template(DOCUMENT_TEMPLATE)
            .unwrap()
            .unwrap();
        assert_eq!(RenderStatus::sniff(&document), Some(RenderStatus::Success));
    }

    #[test]
    fn test_override_directory_takes_precedence() {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        fs::write(dir.path().join("viz.js"), "custom §DIAGRAM_SOURCE§").unwrap();

        let templates = TemplateSet::with_overrides(dir.path());
        assert_eq!(
            templates.load_template("viz.js").unwrap().as_deref(),
            Some("custom §DIAGRAM_SOURCE§")
        );
        let mermaid = templates.load_template("mermaid.js").unwrap().unwrap();
        assert!(mermaid.contains("mermaid.render"));
    }
}
