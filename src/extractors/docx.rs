use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::io::{BufReader, Cursor};
use zip::ZipArchive;

use crate::error::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract raw text from a DOCX file
///
/// DOCX files are ZIP archives containing XML files.
/// The main document content is in word/document.xml; visible text lives in
/// `<w:t>` elements. Runs are concatenated as-is, paragraphs end with a
/// newline, and `<w:tab/>`/`<w:br/>` become tab and newline.
pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let document = archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| ExtractError::MissingPart(DOCUMENT_PART.to_string()))?;

    // Whitespace inside <w:t xml:space="preserve"> is significant, so no trimming
    let mut reader = Reader::from_reader(BufReader::new(document));
    reader.config_mut().trim_text(false);

    let mut content = String::with_capacity(8192);
    // Text boxes nest whole paragraphs inside a run of the outer one
    let mut paragraphs: Vec<String> = Vec::new();
    let mut run_depth = 0usize;
    let mut in_text = false;
    let mut buf = Vec::with_capacity(1024);

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"t" => in_text = true,
                b"r" => run_depth += 1,
                b"p" => paragraphs.push(String::new()),
                _ => {}
            },
            // tab/br outside a run are tab-stop or layout definitions
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" if run_depth > 0 => push_text(&mut paragraphs, &mut content, "\t"),
                b"br" | b"cr" if run_depth > 0 => push_text(&mut paragraphs, &mut content, "\n"),
                b"noBreakHyphen" if run_depth > 0 => {
                    push_text(&mut paragraphs, &mut content, "-")
                }
                b"p" => push_text(&mut paragraphs, &mut content, "\n"),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e.unescape().map_err(|err| xml_error(&err))?;
                push_text(&mut paragraphs, &mut content, &text);
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"p" => {
                    let mut finished = paragraphs.pop().unwrap_or_default();
                    finished.push('\n');
                    push_text(&mut paragraphs, &mut content, &finished);
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => return Err(xml_error(&err)),
            _ => {}
        }
        buf.clear();
    }

    Ok(content.trim().to_string())
}

/// Append to the innermost open paragraph, or to the document itself
fn push_text(paragraphs: &mut [String], content: &mut String, text: &str) {
    match paragraphs.last_mut() {
        Some(paragraph) => paragraph.push_str(text),
        None => content.push_str(text),
    }
}

fn xml_error(err: &dyn std::fmt::Display) -> ExtractError {
    ExtractError::Xml {
        part: DOCUMENT_PART.to_string(),
        message: err.to_string(),
    }
}
