//! Word-specific key and value codecs
//!
//! The helpers here decide which keys name Word documents and turn raw bytes
//! into documents or text. The `with_*` and `only_*` functions wrap any store
//! with those behaviors, so a directory, an archive or an in-memory map can
//! all be read the same way.

use std::path::Path;

use crate::document::Document;
use crate::error::Result;
use crate::store::{DecodedValues, FilteredKeys, MappedKeys, Store, StoreExt};

/// Extensions recognized as Word documents
pub const MSWORD_EXTENSIONS: &[&str] = &["doc", "docx"];

/// Extension added and removed by [`add_docx_extension`] and [`remove_docx_extension`]
pub const DEFAULT_EXTENSION: &str = ".docx";

pub const DEFAULT_PARAGRAPH_SEPARATOR: &str = "\n";

pub type KeyFilter = fn(&str) -> bool;
pub type BytesToDoc = fn(Vec<u8>) -> Result<Document>;
pub type DocToText = fn(Document) -> Result<String>;
pub type BytesToText = fn(Vec<u8>) -> Result<String>;
pub type KeyDecoder = fn(&str) -> String;

/// Extension of the last path segment of `key`, without the dot
///
/// Dotfiles such as `.docx` and names without a dot have no extension.
pub fn extension(key: &str) -> Option<&str> {
    Path::new(key).extension().and_then(|ext| ext.to_str())
}

/// True for keys ending in `.doc` or `.docx` (any case)
pub fn has_msword_extension(key: &str) -> bool {
    has_extension_in(key, MSWORD_EXTENSIONS)
}

/// True when the key's extension is one of `extensions` (compared case-insensitively)
pub fn has_extension_in<E: AsRef<str>>(key: &str, extensions: &[E]) -> bool {
    extension(key).is_some_and(|ext| {
        extensions
            .iter()
            .any(|candidate| candidate.as_ref().trim_start_matches('.').eq_ignore_ascii_case(ext))
    })
}

pub fn remove_docx_extension(key: &str) -> String {
    key.strip_suffix(DEFAULT_EXTENSION).unwrap_or(key).to_string()
}

pub fn add_docx_extension(key: &str) -> String {
    format!("{key}{DEFAULT_EXTENSION}")
}

/// Iterate over the text of each paragraph of `doc`
pub fn paragraphs_text(doc: &Document) -> impl Iterator<Item = &str> {
    doc.paragraphs_text()
}

/// Get text from a document: the text of every paragraph, joined by `separator`
pub fn text_from_docx(doc: &Document, separator: &str) -> String {
    doc.text(separator)
}

/// Parse raw `.docx` bytes into a [`Document`]
pub fn bytes_to_doc(bytes: Vec<u8>) -> Result<Document> {
    Document::from_bytes(&bytes)
}

fn doc_to_text(doc: Document) -> Result<String> {
    Ok(text_from_docx(&doc, DEFAULT_PARAGRAPH_SEPARATOR))
}

fn bytes_to_text(bytes: Vec<u8>) -> Result<String> {
    bytes_to_doc(bytes).and_then(doc_to_text)
}

fn is_docx_key(key: &str) -> bool {
    extension(key).is_some_and(|ext| ext.eq_ignore_ascii_case("docx"))
        && key.ends_with(DEFAULT_EXTENSION)
}

/// Wrap a store so that only keys with a Word extension are visible
pub fn only_files_with_msword_extension<S: Store>(store: S) -> FilteredKeys<S, KeyFilter> {
    store.filter_keys(has_msword_extension as KeyFilter)
}

/// Wrap a byte-valued store so that values are parsed documents
pub fn with_bytes_to_doc_decoding<S>(store: S) -> DecodedValues<S, BytesToDoc, Document>
where
    S: Store<Value = Vec<u8>>,
{
    store.decode_values(bytes_to_doc as BytesToDoc)
}

/// Wrap a document-valued store so that values are the documents' text
pub fn with_doc_to_text_decoding<S>(store: S) -> DecodedValues<S, DocToText, String>
where
    S: Store<Value = Document>,
{
    store.decode_values(doc_to_text as DocToText)
}

/// Wrap a byte-valued store so that values are the text of the documents
pub fn with_bytes_to_text_decoding<S>(store: S) -> DecodedValues<S, BytesToText, String>
where
    S: Store<Value = Vec<u8>>,
{
    store.decode_values(bytes_to_text as BytesToText)
}

/// Keep only `.docx` keys and present them without the extension
///
/// Do not combine with [`only_files_with_msword_extension`]; this already
/// filters keys on its own.
pub fn extension_less_keys<S: Store>(
    store: S,
) -> MappedKeys<FilteredKeys<S, KeyFilter>, KeyDecoder> {
    store
        .filter_keys(is_docx_key as KeyFilter)
        .map_keys(remove_docx_extension as KeyDecoder)
}
