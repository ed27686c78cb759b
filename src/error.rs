//! Error types for store and document operations

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while listing, reading or decoding store values
#[derive(Error, Debug)]
pub enum Error {
    /// The key is not part of the store (or was filtered out of it)
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// The key cannot address anything inside the store
    #[error("Invalid key {0:?}: keys must be relative paths inside the store")]
    InvalidKey(String),

    /// A directory store was rooted somewhere that is not a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The bytes are not a Word document
    #[error("Not a Word document: {0}")]
    NotADocument(String),

    /// Error reading files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking a directory tree
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Error reading a ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error parsing the document XML
    #[error("Document parse error: {0}")]
    Docx(#[from] docx_rs::ReaderError),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, Error>;
