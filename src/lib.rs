//! msword: key-value store views over Word documents
//!
//! This library presents directories (or ZIP archives) of Microsoft Word
//! documents as read-only mappings. Keys are file names, and values are raw
//! bytes, parsed documents or the plain text extracted from them.
//!
//! ```no_run
//! use msword::{LocalDocxTextStore, Store};
//!
//! let docs = LocalDocxTextStore::new("reports")?;
//! for key in docs.keys()? {
//!     println!("{key}: {} chars", docs.get(&key)?.len());
//! }
//! # Ok::<(), msword::Error>(())
//! ```

pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod local;
pub mod store;

/// Export format options
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Plain text, documents separated by a header line
    #[default]
    Text,
    /// A JSON object keyed by document name
    Json,
}

// Re-export commonly used types
pub use codec::{
    bytes_to_doc, extension_less_keys, has_msword_extension, only_files_with_msword_extension,
    text_from_docx, with_bytes_to_doc_decoding, with_bytes_to_text_decoding,
    with_doc_to_text_decoding,
};
pub use config::Config;
pub use document::{Document, Paragraph, Style, StyleKind, Table, load_document};
pub use error::{Error, Result};
pub use local::{
    AllLocalFilesDocxStore, AllLocalFilesDocxTextStore, LocalDocxStore, LocalDocxTextStore,
};
pub use store::{Files, Store, StoreExt, ZipFiles};
