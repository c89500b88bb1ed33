//! DOCX paragraph text, read straight from `word/document.xml`.

use std::io::{self, Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::resume::document::invalid_data;

const DOCUMENT_PART: &str = "word/document.xml";

/// Returns every paragraph of the main document part in order, each followed by `\n`.
pub fn extract_docx_paragraphs(bytes: &[u8]) -> io::Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| invalid_data(format!("Failed to read DOCX as ZIP archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| invalid_data(format!("Invalid DOCX file: missing {DOCUMENT_PART} ({e})")))?
        .read_to_string(&mut xml)?;

    paragraphs_from_xml(&xml)
}

fn paragraphs_from_xml(xml: &str) -> io::Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    // Tabs and breaks outside a run are layout (tab stops in `w:pPr`), not text.
    let mut in_run = false;
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:r" => in_run = true,
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:r" => in_run = false,
                b"w:t" => in_text_run = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:p" => text.push('\n'),
                b"w:br" if in_run => text.push('\n'),
                b"w:tab" if in_run => text.push('\t'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text_run => {
                let run = e
                    .unescape()
                    .map_err(|err| invalid_data(format!("DOCX text error: {err}")))?;
                text.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(invalid_data(format!(
                    "DOCX XML parse error at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file(DOCUMENT_PART, options).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>EDUCATION</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">B.S. Computer Science, </w:t></w:r><w:r><w:t>State University</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:r><w:t>R&amp;D Lead</w:t><w:tab/><w:t>2020</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_paragraphs_in_document_order() {
        let text = extract_docx_paragraphs(&build_docx(BODY)).unwrap();
        assert_eq!(
            text,
            "EDUCATION\nB.S. Computer Science, State University\n\nR&D Lead\t2020\n"
        );
    }

    #[test]
    fn test_tab_stops_on_spacer_paragraph_keep_the_blank_line() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>EDUCATION</w:t></w:r></w:p>
    <w:p><w:r><w:t>B.S. Computer Science</w:t></w:r></w:p>
    <w:p><w:pPr><w:tabs><w:tab w:val="right" w:pos="9360"/></w:tabs></w:pPr></w:p>
    <w:p><w:r><w:t>Hobbies: chess</w:t><w:br/><w:t>Go</w:t></w:r></w:p>
  </w:body>
</w:document>"#;
        let text = extract_docx_paragraphs(&build_docx(xml)).unwrap();
        assert_eq!(
            text,
            "EDUCATION\nB.S. Computer Science\n\nHobbies: chess\nGo\n"
        );

        let record = crate::resume::ResumeParser::new().unwrap().parse_text(&text);
        assert_eq!(record.education, vec!["B.S. Computer Science"]);
    }

    #[test]
    fn test_missing_document_part_is_an_error() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file("word/styles.xml", options).unwrap();
        writer.write_all(b"<styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract_docx_paragraphs(&bytes).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_not_a_zip_is_an_error() {
        assert!(extract_docx_paragraphs(b"plain bytes").is_err());
    }
}
