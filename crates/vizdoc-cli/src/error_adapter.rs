//! Error adapter for converting VizdocError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. vizdoc errors
//! carry no source spans, so the adapter supplies a diagnostic code and,
//! where one helps, a hint for fixing the problem.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use vizdoc::{AssembleError, VizdocError};

/// Adapter giving a [`VizdocError`] a miette diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a VizdocError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            VizdocError::Io(_) => "vizdoc::io",
            VizdocError::Asset(_) => "vizdoc::asset",
            VizdocError::Assemble(_) => "vizdoc::assemble",
            VizdocError::Config(_) => "vizdoc::config",
            VizdocError::NothingToRender => "vizdoc::nothing_to_render",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            VizdocError::Io(_) => return None,
            VizdocError::Asset(_) | VizdocError::Assemble(AssembleError::Asset(_)) => {
                "check that the asset directory is readable and holds UTF-8 text files"
            }
            VizdocError::Assemble(_) => {
                "a template override is malformed; compare it with the bundled template"
            }
            VizdocError::Config(_) => {
                "see the [assets], [extract] and [style] sections accepted in config.toml"
            }
            VizdocError::NothingToRender => {
                "wrap diagrams in fenced code blocks, or pass a file holding a single bare diagram"
            }
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
