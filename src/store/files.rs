//! Directory-backed store
//!
//! Keys are file paths relative to the root directory (always `/`-separated),
//! and values are the raw bytes of each file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::Store;
use crate::error::{Error, Result};

/// Local files exposed as a key-value store
#[derive(Debug, Clone)]
pub struct Files {
    root: PathBuf,
    include_hidden: bool,
    max_depth: Option<usize>,
}

impl Files {
    /// Create a store rooted at `root`, which must be an existing directory
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::NotADirectory(root));
        }

        Ok(Self {
            root,
            include_hidden: false,
            max_depth: None,
        })
    }

    /// Also list dotfiles and the contents of dot-directories
    pub fn include_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    /// Limit how deep the listing recurses; `Some(1)` keeps only direct children
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to a path under the root, if the key is visible in this store
    fn path_of(&self, key: &str) -> Result<Option<PathBuf>> {
        let relative = Path::new(key);
        let mut depth = 0;

        for component in relative.components() {
            match component {
                Component::Normal(name) => {
                    if !self.include_hidden && name.to_string_lossy().starts_with('.') {
                        return Ok(None);
                    }
                    depth += 1;
                }
                _ => return Err(Error::InvalidKey(key.to_string())),
            }
        }

        if depth == 0 {
            return Err(Error::InvalidKey(key.to_string()));
        }
        if self.max_depth.is_some_and(|max| depth > max) {
            return Ok(None);
        }

        Ok(Some(self.root.join(relative)))
    }

    fn key_of(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }

    fn is_visible(&self, entry: &DirEntry) -> bool {
        // The root may itself live in a dot-directory (temp dirs often do)
        entry.depth() == 0
            || self.include_hidden
            || !entry.file_name().to_string_lossy().starts_with('.')
    }
}

impl Store for Files {
    type Value = Vec<u8>;

    fn keys(&self) -> Result<Vec<String>> {
        let mut walker = WalkDir::new(&self.root).min_depth(1).follow_links(true);
        if let Some(max_depth) = self.max_depth {
            walker = walker.max_depth(max_depth);
        }

        let mut keys = Vec::new();
        for entry in walker.into_iter().filter_entry(|e| self.is_visible(e)) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() > 0 => {
                    tracing::warn!("Skipping unreadable entry: {}", err);
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match self.key_of(entry.path()) {
                Some(key) => keys.push(key),
                None => tracing::trace!("Skipping entry outside root: {}", entry.path().display()),
            }
        }

        keys.sort();
        tracing::debug!("Listed {} files under {}", keys.len(), self.root.display());
        Ok(keys)
    }

    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self
            .path_of(key)?
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;

        if path.is_dir() {
            return Err(Error::KeyNotFound(key.to_string()));
        }

        tracing::debug!("Reading {}", path.display());
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::KeyNotFound(key.to_string()),
            _ => Error::Io(e),
        })
    }

    fn contains_key(&self, key: &str) -> Result<bool> {
        match self.path_of(key) {
            Ok(Some(path)) => Ok(path.is_file()),
            Ok(None) | Err(Error::InvalidKey(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.docx"), b"bee").unwrap();
        fs::write(dir.path().join("a.txt"), b"ay").unwrap();
        fs::write(dir.path().join(".hidden.docx"), b"secret").unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::write(dir.path().join("sub/c.doc"), b"sea").unwrap();
        fs::write(dir.path().join("sub/deeper/d.docx"), b"dee").unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git/config"), b"[core]").unwrap();
        dir
    }

    #[test]
    fn test_keys_are_sorted_relative_paths() {
        let dir = fixture();
        let files = Files::new(dir.path()).unwrap();

        assert_eq!(
            files.keys().unwrap(),
            vec!["a.txt", "b.docx", "sub/c.doc", "sub/deeper/d.docx"]
        );
    }

    #[test]
    fn test_hidden_entries_can_be_included() {
        let dir = fixture();
        let files = Files::new(dir.path()).unwrap().include_hidden(true);
        let keys = files.keys().unwrap();

        assert!(keys.contains(&".hidden.docx".to_string()));
        assert!(keys.contains(&".git/config".to_string()));
        assert_eq!(files.get(".hidden.docx").unwrap(), b"secret");
    }

    #[test]
    fn test_max_depth_limits_listing_and_lookup() {
        let dir = fixture();
        let files = Files::new(dir.path()).unwrap().max_depth(Some(1));

        assert_eq!(files.keys().unwrap(), vec!["a.txt", "b.docx"]);
        assert!(matches!(files.get("sub/c.doc"), Err(Error::KeyNotFound(_))));
        assert!(!files.contains_key("sub/c.doc").unwrap());
    }

    #[test]
    fn test_get_reads_bytes() {
        let dir = fixture();
        let files = Files::new(dir.path()).unwrap();

        assert_eq!(files.get("b.docx").unwrap(), b"bee");
        assert_eq!(files.get("sub/deeper/d.docx").unwrap(), b"dee");
    }

    #[test]
    fn test_missing_hidden_and_directory_keys_are_not_found() {
        let dir = fixture();
        let files = Files::new(dir.path()).unwrap();

        assert!(matches!(files.get("nope.docx"), Err(Error::KeyNotFound(_))));
        assert!(matches!(files.get(".hidden.docx"), Err(Error::KeyNotFound(_))));
        assert!(matches!(files.get("sub"), Err(Error::KeyNotFound(_))));
        assert!(!files.contains_key(".hidden.docx").unwrap());
        assert!(!files.contains_key("sub").unwrap());
        assert!(files.contains_key("sub/c.doc").unwrap());
    }

    #[test]
    fn test_keys_escaping_the_root_are_rejected() {
        let dir = fixture();
        let files = Files::new(dir.path()).unwrap();

        assert!(matches!(files.get("../etc/passwd"), Err(Error::InvalidKey(_))));
        assert!(matches!(files.get("/etc/passwd"), Err(Error::InvalidKey(_))));
        assert!(matches!(files.get(""), Err(Error::InvalidKey(_))));
        assert!(!files.contains_key("../b.docx").unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_does_not_hide_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.docx"), b"ay").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.docx"), dir.path().join("stale.docx"))
            .unwrap();

        let files = Files::new(dir.path()).unwrap();
        assert_eq!(files.keys().unwrap(), vec!["a.docx"]);
        assert_eq!(files.len().unwrap(), 1);
    }

    #[test]
    fn test_root_must_be_a_directory() {
        let dir = fixture();
        let result = Files::new(dir.path().join("b.docx"));
        assert!(matches!(result, Err(Error::NotADirectory(_))));
    }
}
