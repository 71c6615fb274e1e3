//! Error types for vizdoc operations.
//!
//! Rendering a block never fails outright: every outcome, including the
//! failures, is a complete HTML document (see
//! [`RenderStatus`](vizdoc_core::document::RenderStatus)). [`VizdocError`]
//! covers what sits around rendering: reading input, loading configuration,
//! probing assets, and the strict entry points that surface assembly
//! failures instead of turning them into documents.

use std::io;

use thiserror::Error;

use vizdoc_core::asset::AssetError;

use crate::assemble::AssembleError;

/// The main error type for vizdoc operations.
#[derive(Debug, Error)]
pub enum VizdocError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Assembly error: {0}")]
    Assemble(#[from] AssembleError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Nothing to render: the input holds no diagram blocks")]
    NothingToRender,
}
