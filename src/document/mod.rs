//! Document parsing and data structures module
//!
//! This module provides functionality for parsing Microsoft Word (.docx) documents
//! and converting them into a structured representation.

pub(crate) mod io;
pub(crate) mod loader;
pub mod models;
pub(crate) mod parsing;

pub use loader::load_document;
pub use models::*;
