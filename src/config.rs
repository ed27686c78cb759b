use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::{DEFAULT_PARAGRAPH_SEPARATOR, MSWORD_EXTENSIONS};
use crate::store::Files;

/// User configuration for msword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Joins paragraph text when extracting plain text
    pub paragraph_separator: String,

    /// File extensions treated as Word documents (without the dot)
    pub extensions: Vec<String>,

    /// List dotfiles and dot-directories
    pub include_hidden: bool,

    /// Directory recursion limit; unlimited when absent
    pub max_depth: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            paragraph_separator: DEFAULT_PARAGRAPH_SEPARATOR.to_string(),
            extensions: MSWORD_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: false,
            max_depth: None,
        }
    }
}

impl Config {
    /// Load config from the config directory
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::get_config_path() {
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }

        // Return default config if no file found
        Ok(Config::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the config directory
    pub fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::get_config_path() {
            self.save_to(&config_path)?;
        }

        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("msword").join("config.toml"))
    }

    /// Initialize default config file, returning where it was written
    pub fn init_default() -> Result<PathBuf> {
        Self::init_at(Self::get_config_path())
    }

    fn init_at(path: Option<PathBuf>) -> Result<PathBuf> {
        let path = path.context("No config directory available on this platform")?;
        Config::default().save_to(&path)?;
        Ok(path)
    }

    /// A directory store honoring the hidden-file and depth settings
    pub fn files(&self, root: impl Into<PathBuf>) -> crate::Result<Files> {
        Ok(Files::new(root)?
            .include_hidden(self.include_hidden)
            .max_depth(self.max_depth))
    }
}
