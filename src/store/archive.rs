//! ZIP-backed store
//!
//! Word documents are often shipped in bundles, so a ZIP archive can stand in
//! for a directory: keys are entry names and values are decompressed bytes.

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Arc;

use zip::ZipArchive;
use zip::result::ZipError;

use super::Store;
use crate::error::{Error, Result};

/// Upper bound on the buffer preallocated from an entry's declared size
const MAX_CAPACITY_HINT: u64 = 1 << 20;

/// Entries of a ZIP archive exposed as a key-value store
#[derive(Debug, Clone)]
pub struct ZipFiles {
    bytes: Arc<[u8]>,
    names: Vec<String>,
}

impl ZipFiles {
    /// Open the archive at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Opening archive {}", path.display());
        Self::from_bytes(fs::read(path)?)
    }

    /// Use in-memory archive bytes
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Result<Self> {
        let bytes = bytes.into();
        let archive = ZipArchive::new(Cursor::new(&bytes[..]))?;

        let mut names: Vec<String> = archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(str::to_string)
            .collect();
        names.sort();

        tracing::debug!("Archive holds {} file entries", names.len());
        Ok(Self { bytes, names })
    }
}

impl Store for ZipFiles {
    type Value = Vec<u8>;

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.names.clone())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>> {
        if self.names.binary_search_by(|name| name.as_str().cmp(key)).is_err() {
            return Err(Error::KeyNotFound(key.to_string()));
        }

        let mut archive = ZipArchive::new(Cursor::new(&self.bytes[..]))?;
        let mut entry = archive.by_name(key).map_err(|e| match e {
            ZipError::FileNotFound => Error::KeyNotFound(key.to_string()),
            other => Error::Archive(other),
        })?;

        // Declared sizes are untrusted
        let mut contents = Vec::with_capacity(entry.size().min(MAX_CAPACITY_HINT) as usize);
        entry.read_to_end(&mut contents)?;
        Ok(contents)
    }

    fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self
            .names
            .binary_search_by(|name| name.as_str().cmp(key))
            .is_ok())
    }
}
