//! Table extraction
//!
//! Tables are reduced to the text of their cells. A cell's text is its
//! paragraphs joined by newlines.

use super::super::models::Table;
use super::text::extract_paragraph_text;

/// Extract cell text from a docx-rs Table
pub(crate) fn extract_table(table: &docx_rs::Table) -> Table {
    let mut rows = Vec::new();

    for table_child in &table.rows {
        let docx_rs::TableChild::TableRow(row) = table_child;
        let mut cells = Vec::new();

        for row_child in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = row_child;
            let paragraphs: Vec<String> = cell
                .children
                .iter()
                .filter_map(|content| match content {
                    docx_rs::TableCellContent::Paragraph(para) => {
                        Some(extract_paragraph_text(para))
                    }
                    // Nested tables are not flattened into the cell text
                    _ => None,
                })
                .collect();
            cells.push(paragraphs.join("\n"));
        }

        rows.push(cells);
    }

    Table { rows }
}
