//! Document loading
//!
//! This module turns raw `.docx` bytes into our [`Document`] representation:
//! the package layout is validated, docx-rs parses the XML, and the body is
//! walked once to collect paragraphs and tables.

use std::path::Path;

use super::io::validate_docx_bytes;
use super::models::*;
use super::parsing::styles::extract_styles;
use super::parsing::table::extract_table;
use super::parsing::text::{extract_paragraph_text, paragraph_style_id};
use crate::error::Result;

impl Document {
    /// Parse a Word document from its raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        validate_docx_bytes(bytes)?;
        let docx = docx_rs::read_docx(bytes)?;

        let mut paragraphs = Vec::new();
        let mut tables = Vec::new();

        for child in &docx.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(para) => {
                    paragraphs.push(Paragraph {
                        text: extract_paragraph_text(para),
                        style_id: paragraph_style_id(para),
                    });
                }
                docx_rs::DocumentChild::Table(table) => {
                    tables.push(extract_table(table));
                }
                _ => {
                    // Section properties, bookmarks and the like carry no text
                }
            }
        }

        let styles = extract_styles(&docx.styles);

        tracing::debug!(
            "Parsed document: {} paragraphs, {} tables, {} styles",
            paragraphs.len(),
            tables.len(),
            styles.len()
        );

        Ok(Document {
            paragraphs,
            styles,
            tables,
        })
    }
}

/// Load and parse the Word document at `file_path`
pub fn load_document(file_path: &Path) -> Result<Document> {
    let bytes = std::fs::read(file_path)?;
    Document::from_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use docx_rs::{Docx, Run, StyleType, TableCell, TableRow};
    use std::io::Cursor;

    fn pack(docx: Docx) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    fn para(text: &str) -> docx_rs::Paragraph {
        docx_rs::Paragraph::new().add_run(Run::new().add_text(text))
    }

    #[test]
    fn test_paragraphs_are_read_in_order() {
        let bytes = pack(
            Docx::new()
                .add_paragraph(para("First"))
                .add_paragraph(docx_rs::Paragraph::new())
                .add_paragraph(para("Third")),
        );

        let doc = Document::from_bytes(&bytes).unwrap();
        let texts: Vec<&str> = doc.paragraphs_text().collect();
        assert_eq!(texts, vec!["First", "", "Third"]);
    }

    #[test]
    fn test_styles_and_paragraph_style_ids() {
        let bytes = pack(
            Docx::new()
                .add_style(
                    docx_rs::Style::new("Heading1", StyleType::Paragraph).name("Heading 1"),
                )
                .add_paragraph(para("Section 1").style("Heading1"))
                .add_paragraph(para("Body")),
        );

        let doc = Document::from_bytes(&bytes).unwrap();
        assert_eq!(doc.paragraphs[0].style_id.as_deref(), Some("Heading1"));
        assert_eq!(
            doc.style("Heading1").map(|s| s.kind),
            Some(StyleKind::Paragraph)
        );
        assert_eq!(
            doc.style("Heading1").and_then(|s| s.name.as_deref()),
            Some("Heading 1")
        );
    }

    #[test]
    fn test_tables_are_collected_separately() {
        let table = docx_rs::Table::new(vec![TableRow::new(vec![
            TableCell::new().add_paragraph(para("cell")),
        ])]);
        let bytes = pack(
            Docx::new()
                .add_paragraph(para("Before"))
                .add_table(table)
                .add_paragraph(para("After")),
        );

        let doc = Document::from_bytes(&bytes).unwrap();
        assert_eq!(doc.text("\n"), "Before\nAfter");
        assert_eq!(doc.tables.len(), 1);
        assert_eq!(doc.tables[0].rows, vec![vec!["cell".to_string()]]);
    }

    #[test]
    fn test_non_documents_are_rejected() {
        let result = Document::from_bytes(b"This is not a Word document.\n");
        assert!(matches!(result, Err(Error::NotADocument(_))));
    }

    #[test]
    fn test_load_document_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.docx");
        std::fs::write(&path, pack(Docx::new().add_paragraph(para("Hello")))).unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.text("\n"), "Hello");

        let missing = load_document(&dir.path().join("missing.docx"));
        assert!(matches!(missing, Err(Error::Io(_))));
    }
}
