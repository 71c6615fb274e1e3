//! vizdoc Core Types and Definitions
//!
//! This crate provides the foundational types shared by the vizdoc crates.
//! It includes:
//!
//! - **Grammars**: the recognized diagram languages and their detection order ([`grammar`] module)
//! - **Sources**: diagram text and extracted blocks ([`source`] module)
//! - **Documents**: rendered pages and their status marker ([`document`] module)
//! - **Assets**: the runtime-asset and template loader boundary ([`asset`] module)

pub mod asset;
pub mod document;
pub mod grammar;
pub mod source;
