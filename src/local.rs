//! Local stores of Word documents
//!
//! Ready-made compositions of [`Files`] with the codecs in [`crate::codec`]:
//!
//! | store                        | keys            | values       |
//! |------------------------------|-----------------|--------------|
//! | [`AllLocalFilesDocxStore`]     | every file      | [`Document`] |
//! | [`AllLocalFilesDocxTextStore`] | every file      | `String`     |
//! | [`LocalDocxStore`]             | `.doc`/`.docx`  | [`Document`] |
//! | [`LocalDocxTextStore`]         | `.doc`/`.docx`  | `String`     |
//!
//! The `AllLocalFiles*` stores do not filter keys, so reading a file that is
//! not a Word document fails.

use std::path::{Path, PathBuf};

use crate::codec::{
    BytesToDoc, DEFAULT_PARAGRAPH_SEPARATOR, KeyFilter, only_files_with_msword_extension,
    text_from_docx, with_bytes_to_doc_decoding,
};
use crate::document::Document;
use crate::error::Result;
use crate::store::{DecodedValues, Files, FilteredKeys, Store, StoreExt};

type DocToSeparatedText = Box<dyn Fn(Document) -> Result<String> + Send + Sync>;

macro_rules! delegate_store {
    ($store:ty => $value:ty) => {
        impl Store for $store {
            type Value = $value;

            fn keys(&self) -> Result<Vec<String>> {
                self.inner.keys()
            }

            fn get(&self, key: &str) -> Result<$value> {
                self.inner.get(key)
            }

            fn contains_key(&self, key: &str) -> Result<bool> {
                self.inner.contains_key(key)
            }
        }
    };
}

/// Local files store returning parsed documents; does not filter extensions
#[derive(Debug, Clone)]
pub struct AllLocalFilesDocxStore {
    inner: DecodedValues<Files, BytesToDoc, Document>,
}

impl AllLocalFilesDocxStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::from_files(Files::new(root)?))
    }

    pub fn from_files(files: Files) -> Self {
        Self {
            inner: with_bytes_to_doc_decoding(files),
        }
    }

    pub fn root(&self) -> &Path {
        self.inner.inner().root()
    }
}

delegate_store!(AllLocalFilesDocxStore => Document);

/// Local files store returning the text of each document; does not filter extensions
pub struct AllLocalFilesDocxTextStore {
    inner: DecodedValues<AllLocalFilesDocxStore, DocToSeparatedText, String>,
    separator: String,
}

impl AllLocalFilesDocxTextStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        Self::with_separator(root, DEFAULT_PARAGRAPH_SEPARATOR)
    }

    /// Join paragraphs with `separator` instead of a newline
    pub fn with_separator(root: impl Into<PathBuf>, separator: impl Into<String>) -> Result<Self> {
        Ok(Self::from_files(Files::new(root)?, separator))
    }

    pub fn from_files(files: Files, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        let joiner = separator.clone();
        let decoder: DocToSeparatedText =
            Box::new(move |doc: Document| Ok(text_from_docx(&doc, &joiner)));

        Self {
            inner: AllLocalFilesDocxStore::from_files(files).decode_values(decoder),
            separator,
        }
    }

    pub fn root(&self) -> &Path {
        self.inner.inner().root()
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }
}

delegate_store!(AllLocalFilesDocxTextStore => String);

impl std::fmt::Debug for AllLocalFilesDocxTextStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllLocalFilesDocxTextStore")
            .field("root", &self.root())
            .field("separator", &self.separator)
            .finish()
    }
}

/// Local files store returning parsed documents, limited to `.doc`/`.docx` keys
#[derive(Debug, Clone)]
pub struct LocalDocxStore {
    inner: FilteredKeys<AllLocalFilesDocxStore, KeyFilter>,
}

impl LocalDocxStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::from_files(Files::new(root)?))
    }

    pub fn from_files(files: Files) -> Self {
        Self {
            inner: only_files_with_msword_extension(AllLocalFilesDocxStore::from_files(files)),
        }
    }

    pub fn root(&self) -> &Path {
        self.inner.inner().root()
    }
}

delegate_store!(LocalDocxStore => Document);

/// Local files store returning the text of each document, limited to `.doc`/`.docx` keys
#[derive(Debug)]
pub struct LocalDocxTextStore {
    inner: FilteredKeys<AllLocalFilesDocxTextStore, KeyFilter>,
}

impl LocalDocxTextStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        Self::with_separator(root, DEFAULT_PARAGRAPH_SEPARATOR)
    }

    /// Join paragraphs with `separator` instead of a newline
    pub fn with_separator(root: impl Into<PathBuf>, separator: impl Into<String>) -> Result<Self> {
        Ok(Self::from_files(Files::new(root)?, separator))
    }

    pub fn from_files(files: Files, separator: impl Into<String>) -> Self {
        Self {
            inner: only_files_with_msword_extension(AllLocalFilesDocxTextStore::from_files(
                files, separator,
            )),
        }
    }

    pub fn root(&self) -> &Path {
        self.inner.inner().root()
    }

    pub fn separator(&self) -> &str {
        self.inner.inner().separator()
    }
}

delegate_store!(LocalDocxTextStore => String);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_constructors_require_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "text").unwrap();

        assert!(matches!(LocalDocxStore::new(&file), Err(Error::NotADirectory(_))));
        assert!(matches!(LocalDocxTextStore::new(&file), Err(Error::NotADirectory(_))));
        assert!(AllLocalFilesDocxStore::new(dir.path()).is_ok());
    }

    #[test]
    fn test_text_store_remembers_separator() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocxTextStore::with_separator(dir.path(), " / ").unwrap();
        assert_eq!(store.separator(), " / ");
        assert_eq!(store.root(), dir.path());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_filtered_store_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a document").unwrap();

        let all = AllLocalFilesDocxTextStore::new(dir.path()).unwrap();
        assert_eq!(all.keys().unwrap(), vec!["notes.txt"]);
        assert!(all.get("notes.txt").is_err());

        let filtered = LocalDocxTextStore::new(dir.path()).unwrap();
        assert!(filtered.keys().unwrap().is_empty());
        assert!(matches!(filtered.get("notes.txt"), Err(Error::KeyNotFound(_))));
    }
}
