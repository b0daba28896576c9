//! DOCX text extraction.
//!
//! A DOCX file is a zip archive; the body text lives in `word/document.xml`.
//! Only run text (`w:t`) is kept. Paragraphs end with a blank line, tabs and
//! breaks become `\t` and `\n`.

use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Cursor, Read};

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_text(bytes: &[u8]) -> Result<String, String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| format!("{DOCUMENT_PART}: {e}"))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml).map_err(|e| e.to_string())?;

    document_text(&xml)
}

fn document_text(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => out.push_str("\n\n"),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" => out.push('\n'),
                b"w:p" => out.push_str("\n\n"),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t.unescape().map_err(|e| e.to_string())?;
                out.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "malformed XML at position {}: {e}",
                    reader.buffer_position()
                ));
            }
            _ => {}
        }
    }

    Ok(out)
}
