//! Byte-level validation
//!
//! docx-rs reports a non-Word archive as a bare missing-file error, so the
//! package layout is checked first to give a clearer message.

use std::io::Cursor;

use zip::ZipArchive;

use crate::error::{Error, Result};

/// Validates that the bytes hold an OOXML word-processing package
pub(crate) fn validate_docx_bytes(bytes: &[u8]) -> Result<()> {
    // Legacy binary .doc files are OLE compound documents
    const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
    if bytes.starts_with(&OLE_MAGIC) {
        return Err(Error::NotADocument(
            "legacy binary .doc (OLE) files are not supported, save as .docx".to_string(),
        ));
    }

    let archive = ZipArchive::new(Cursor::new(bytes)).map_err(|_| {
        Error::NotADocument("content is not a ZIP-based Office package".to_string())
    })?;

    let has = |name: &str| archive.file_names().any(|n| n == name);

    if has("word/document.xml") {
        return Ok(());
    }
    if has("xl/workbook.xml") {
        return Err(Error::NotADocument(
            "this appears to be an Excel workbook (.xlsx)".to_string(),
        ));
    }
    if has("ppt/presentation.xml") {
        return Err(Error::NotADocument(
            "this appears to be a PowerPoint presentation (.pptx)".to_string(),
        ));
    }

    Err(Error::NotADocument(
        "missing word/document.xml, the package may be corrupted".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::{SimpleFileOptions, ZipWriter};

    fn package_with(entry: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(entry, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<xml/>").unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_word_package_passes() {
        assert!(validate_docx_bytes(&package_with("word/document.xml")).is_ok());
    }

    #[test]
    fn test_other_office_packages_are_named() {
        let err = validate_docx_bytes(&package_with("xl/workbook.xml")).unwrap_err();
        assert!(err.to_string().contains("Excel"));

        let err = validate_docx_bytes(&package_with("ppt/presentation.xml")).unwrap_err();
        assert!(err.to_string().contains("PowerPoint"));

        let err = validate_docx_bytes(&package_with("content.xml")).unwrap_err();
        assert!(err.to_string().contains("word/document.xml"));
    }

    #[test]
    fn test_plain_text_and_ole_are_rejected() {
        assert!(matches!(
            validate_docx_bytes(b"just some text"),
            Err(Error::NotADocument(_))
        ));

        let mut ole = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
        ole.extend_from_slice(&[0; 32]);
        let err = validate_docx_bytes(&ole).unwrap_err();
        assert!(err.to_string().contains("OLE"));
    }
}
