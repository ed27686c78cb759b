//! Core data structures for document representation
//!
//! This module defines the public types a parsed Word document is reduced to:
//! body paragraphs with their style references, style definitions and tables.

use serde::{Deserialize, Serialize};

/// Style id Word applies to paragraphs that carry no explicit style
pub const DEFAULT_PARAGRAPH_STYLE: &str = "Normal";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Top-level body paragraphs, in document order (empty ones included)
    pub paragraphs: Vec<Paragraph>,
    pub styles: Vec<Style>,
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    pub style_id: Option<String>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style_id: None,
        }
    }

    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style_id = Some(style_id.into());
        self
    }

    /// The paragraph's style id, falling back to Word's default paragraph style
    pub fn style_or_default(&self) -> &str {
        self.style_id.as_deref().unwrap_or(DEFAULT_PARAGRAPH_STYLE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub style_id: String,
    pub name: Option<String>,
    pub kind: StyleKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StyleKind {
    Paragraph,
    Character,
    Table,
    Numbering,
    #[default]
    Other,
}

impl StyleKind {
    /// Map a `w:type` attribute value (`paragraph`, `character`, ...) to a kind
    pub fn from_type_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "paragraph" => StyleKind::Paragraph,
            "character" => StyleKind::Character,
            "table" => StyleKind::Table,
            "numbering" => StyleKind::Numbering,
            _ => StyleKind::Other,
        }
    }
}

/// Cell text of a table, row by row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl Document {
    /// Iterate over the text of each paragraph
    pub fn paragraphs_text(&self) -> impl Iterator<Item = &str> {
        self.paragraphs.iter().map(|p| p.text.as_str())
    }

    /// Concatenate the text of every paragraph, joined by `separator`
    pub fn text(&self, separator: &str) -> String {
        self.paragraphs_text().collect::<Vec<_>>().join(separator)
    }

    /// Style id of every paragraph, with unstyled paragraphs reported as `Normal`
    pub fn paragraph_style_ids(&self) -> Vec<&str> {
        self.paragraphs.iter().map(Paragraph::style_or_default).collect()
    }

    pub fn style(&self, style_id: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.style_id == style_id)
    }

    pub fn word_count(&self) -> usize {
        self.paragraphs_text()
            .map(|text| text.split_whitespace().count())
            .sum()
    }

    /// True when no paragraph carries any text
    pub fn is_empty(&self) -> bool {
        self.paragraphs.iter().all(|p| p.text.is_empty())
    }
}
