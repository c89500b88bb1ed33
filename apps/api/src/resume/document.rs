//! Document loading and format dispatch.
//!
//! A `Document` is the raw bytes of an uploaded file plus the format its extension declares.
//! It is read once, decoded to a single text blob, and dropped.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::resume::docx::extract_docx_paragraphs;
use crate::resume::ParseError;

/// Extensions accepted by the parser, in the order they are reported to callers.
pub const ALLOWED_EXTENSIONS: &[&str] = &[".pdf", ".docx", ".txt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Plain,
}

impl DocumentFormat {
    /// Resolves a format from an extension with its leading dot, e.g. `.PDF`.
    /// The rejected extension is returned verbatim in the error.
    pub fn from_extension(extension: &str) -> Result<Self, ParseError> {
        match extension.to_ascii_lowercase().as_str() {
            ".pdf" => Ok(DocumentFormat::Pdf),
            ".docx" => Ok(DocumentFormat::Docx),
            ".txt" => Ok(DocumentFormat::Plain),
            _ => Err(ParseError::UnsupportedFormat(extension.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        Self::from_extension(&dotted_extension(path))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Plain => "plain",
        }
    }
}

/// Extension of `path` including the leading dot, or an empty string.
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

#[derive(Debug)]
pub struct Document {
    pub path: PathBuf,
    pub format: DocumentFormat,
    pub bytes: Vec<u8>,
}

impl Document {
    /// Checks the format first so unsupported files are never opened.
    pub fn open(path: &Path) -> Result<Self, ParseError> {
        let format = DocumentFormat::from_path(path)?;
        let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Document {
            path: path.to_path_buf(),
            format,
            bytes,
        })
    }

    /// Consumes the document and returns its plain text.
    pub fn into_text(self) -> Result<String, ParseError> {
        let decoded = match self.format {
            DocumentFormat::Pdf => pdf_extract::extract_text_from_mem(&self.bytes)
                .map_err(|e| invalid_data(format!("PDF extraction error: {e}"))),
            DocumentFormat::Docx => extract_docx_paragraphs(&self.bytes),
            DocumentFormat::Plain => Ok(decode_plain(&self.bytes)),
        };

        let text = decoded.map_err(|source| ParseError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!(
            "Extracted {} chars from {} document {}",
            text.len(),
            self.format.as_str(),
            self.path.display()
        );
        Ok(text)
    }
}

/// Reads `path` and returns its text, dispatching on the extension (case-insensitive).
/// Never modifies or removes the file.
pub fn extract_text(path: &Path) -> Result<String, ParseError> {
    Document::open(path)?.into_text()
}

/// Lossy UTF-8 with CRLF line endings folded to LF, so blank-line section boundaries
/// look the same regardless of the editor that produced the file.
fn decode_plain(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace("\r\n", "\n")
}

pub(crate) fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

/// Builds a PDF with one page per entry; each line is `(text, baseline y)` in Courier 12pt.
#[cfg(test)]
pub(crate) fn build_pdf(pages: &[&[(&str, i64)]]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (text, y) in lines.iter() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new("Td", vec![72.into(), (*y).into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations }.encode().unwrap();
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
