//! Rendered documents and their machine-readable status.
//!
//! Every document vizdoc produces, successful or not, is a complete HTML page.
//! Callers tell them apart through a fixed `<meta>` marker in the page head
//! instead of inspecting the prose:
//!
//! ```html
//! <meta name="diagram-render-status" content="ok">
//! <meta name="diagram-render-status" content="error">
//! <meta name="diagram-error-class" content="unsupported-construct">
//! ```
//!
//! [`RenderStatus::sniff`] reads the marker back from a document string.

use std::fmt;

/// `name` attribute of the status marker.
pub const STATUS_META: &str = "diagram-render-status";

/// `name` attribute of the error-class marker carried by error documents.
pub const ERROR_CLASS_META: &str = "diagram-error-class";

/// Outcome of rendering one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderStatus {
    /// The document embeds a diagram ready to render.
    Success,
    /// No detector matched the block.
    NoTypeDetected,
    /// A runtime asset or template could not be found.
    MissingAsset,
    /// The source uses a construct the local engines cannot render.
    UnsupportedConstruct,
    /// Assembly failed unexpectedly.
    AssemblyException,
}

impl RenderStatus {
    const ERROR_CLASSES: [RenderStatus; 4] = [
        Self::NoTypeDetected,
        Self::MissingAsset,
        Self::UnsupportedConstruct,
        Self::AssemblyException,
    ];

    /// Returns the marker value: `ok` or the error class name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "ok",
            Self::NoTypeDetected => "no-type-detected",
            Self::MissingAsset => "missing-asset",
            Self::UnsupportedConstruct => "unsupported-construct",
            Self::AssemblyException => "assembly-exception",
        }
    }

    pub fn is_error(self) -> bool {
        !matches!(self, Self::Success)
    }

    /// Returns the `<meta>` markup to place in the document head.
    pub fn marker(self) -> String {
        match self {
            Self::Success => format!(r#"<meta name="{STATUS_META}" content="ok">"#),
            _ => format!(
                "<meta name=\"{STATUS_META}\" content=\"error\">\n    <meta name=\"{ERROR_CLASS_META}\" content=\"{}\">",
                self.as_str()
            ),
        }
    }

    /// Reads the status marker from a rendered document.
    ///
    /// Returns `None` if the document carries no recognizable marker. An
    /// error document whose class is missing or unknown is reported as
    /// [`RenderStatus::AssemblyException`].
    pub fn sniff(document: &str) -> Option<Self> {
        match meta_content(document, STATUS_META)? {
            "ok" => Some(Self::Success),
            "error" => {
                let class = meta_content(document, ERROR_CLASS_META);
                Some(
                    Self::ERROR_CLASSES
                        .into_iter()
                        .find(|status| Some(status.as_str()) == class)
                        .unwrap_or(Self::AssemblyException),
                )
            }
            _ => None,
        }
    }
}

impl fmt::Display for RenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finds `<meta name="{name}" content="...">` and returns the content value.
fn meta_content<'a>(document: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!(r#"<meta name="{name}" content=""#);
    let start = document.find(&needle)? + needle.len();
    let len = document[start..].find('"')?;
    Some(&document[start..start + len])
}

/// A complete HTML document for one diagram block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderDocument {
    status: RenderStatus,
    html: String,
}

impl RenderDocument {
    /// Creates a document. The HTML is expected to carry `status.marker()`.
    pub fn new(status: RenderStatus, html: String) -> Self {
        Self { status, html }
    }

    pub fn status(&self) -> RenderStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        !self.status.is_error()
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }
}
