//! Shared fixtures: a temporary directory holding a few Word documents, a
//! text file and a ZIP archive bundling them.

#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use docx_rs::{Docx, Paragraph, Run, StyleType};
use tempfile::TempDir;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const SIMPLE_TEXT: &str = "Just a bit of text to show that is works. Another sentence.\n\
                               This is after a newline.\n\
                               \n\
                               This is after two newlines.";

pub const NOT_A_DOC: &str = "not_an_msword_doc.txt";
pub const ZIP_NAME: &str = "some_zip_file.zip";

pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn para(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn pack(docx: Docx) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    docx.build().pack(&mut buf).expect("failed to pack docx");
    buf.into_inner()
}

/// Four paragraphs, the third one empty
pub fn simple_docx() -> Vec<u8> {
    pack(
        Docx::new()
            .add_paragraph(para(
                "Just a bit of text to show that is works. Another sentence.",
            ))
            .add_paragraph(para("This is after a newline."))
            .add_paragraph(Paragraph::new())
            .add_paragraph(para("This is after two newlines.")),
    )
}

/// A styled document: headings, body text and list paragraphs
pub fn styled_docx() -> Vec<u8> {
    pack(
        Docx::new()
            .add_style(docx_rs::Style::new("Heading1", StyleType::Paragraph).name("Heading 1"))
            .add_style(docx_rs::Style::new("Heading2", StyleType::Paragraph).name("Heading 2"))
            .add_style(
                docx_rs::Style::new("ListParagraph", StyleType::Paragraph).name("List Paragraph"),
            )
            .add_paragraph(para("Section 1").style("Heading1"))
            .add_paragraph(para("Opening remarks."))
            .add_paragraph(para("Subsection 1.1").style("Heading2"))
            .add_paragraph(para("First item").style("ListParagraph"))
            .add_paragraph(para("Second item").style("ListParagraph")),
    )
}

pub fn zip_of(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("failed to start zip entry");
        writer.write_all(bytes).expect("failed to write zip entry");
    }
    writer.finish().expect("failed to finish zip").into_inner()
}

/// simple.docx, with_doc_extension.doc (docx content behind a .doc name),
/// a plain text file, a hidden document and a ZIP of the visible files
pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let simple = simple_docx();
    let styled = styled_docx();
    let text = b"This is not a Word document.\n".to_vec();

    fs::write(dir.path().join("simple.docx"), &simple).unwrap();
    fs::write(dir.path().join("with_doc_extension.doc"), &styled).unwrap();
    fs::write(dir.path().join(NOT_A_DOC), &text).unwrap();
    fs::write(dir.path().join(".hidden.docx"), &simple).unwrap();

    let archive = zip_of(&[
        ("simple.docx", simple.as_slice()),
        ("with_doc_extension.doc", styled.as_slice()),
        (NOT_A_DOC, text.as_slice()),
    ]);
    fs::write(dir.path().join(ZIP_NAME), archive).unwrap();

    Fixture { dir }
}
