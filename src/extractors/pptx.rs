use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::io::{BufReader, Cursor};
use zip::ZipArchive;

use crate::error::ExtractError;

const SLIDES_DIR: &str = "ppt/slides/";

/// Extract per-slide text from a PPTX file
///
/// PPTX files are ZIP archives containing XML files.
/// Slides are stored in ppt/slides/slide1.xml, slide2.xml, etc.
/// Text is in <a:t> elements; a slide's text nodes are joined with single
/// spaces. Slides come back in the order the archive lists them, and a slide
/// without text is kept as an empty string so positions stay stable.
pub fn extract_pptx(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    // Walk entries by index to keep container order
    let mut ordered: Vec<(usize, String)> = Vec::new();
    for i in 0..archive.len() {
        let file = archive.by_index(i)?;
        if is_slide_part(file.name()) {
            ordered.push((i, file.name().to_string()));
        }
    }

    let mut slides = Vec::with_capacity(ordered.len());
    for (index, name) in ordered {
        let slide_file = archive.by_index(index)?;
        slides.push(read_slide_text(BufReader::new(slide_file), &name)?);
    }

    Ok(slides)
}

/// `ppt/slides/slideN.xml`, excluding `ppt/slides/_rels/`
fn is_slide_part(name: &str) -> bool {
    name.strip_prefix(SLIDES_DIR)
        .map(|rest| !rest.contains('/') && rest.starts_with("slide") && rest.ends_with(".xml"))
        .unwrap_or(false)
}

fn read_slide_text<R: std::io::BufRead>(source: R, part: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_reader(source);
    reader.config_mut().trim_text(false);

    let mut nodes: Vec<String> = Vec::new();
    let mut current: Option<String> = None;
    let mut buf = Vec::with_capacity(512);

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"a:t" => {
                current = Some(String::new());
            }
            Ok(Event::Text(e)) => {
                if let Some(text) = current.as_mut() {
                    let unescaped = e.unescape().map_err(|err| ExtractError::Xml {
                        part: part.to_string(),
                        message: err.to_string(),
                    })?;
                    text.push_str(&unescaped);
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"a:t" => {
                if let Some(text) = current.take() {
                    if !text.is_empty() {
                        nodes.push(text);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(ExtractError::Xml {
                    part: part.to_string(),
                    message: err.to_string(),
                })
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(nodes.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{pptx_bytes, zip_bytes};

    #[test]
    fn test_text_nodes_joined_per_slide() {
        let bytes = pptx_bytes(&[&["Welcome", "to the deck"], &["Q3 revenue", "grew"], &[]]);
        let slides = extract_pptx(&bytes).unwrap();
        assert_eq!(slides, vec!["Welcome to the deck", "Q3 revenue grew", ""]);
    }

    #[test]
    fn test_follows_container_order_and_skips_rels() {
        let slide = |text: &str| {
            format!(
                r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><a:t>{}</a:t></p:cSld></p:sld>"#,
                text
            )
        };
        let second = slide("second");
        let first = slide("first");
        let bytes = zip_bytes(&[
            ("ppt/presentation.xml", "<p:presentation/>"),
            ("ppt/slides/slide2.xml", &second),
            ("ppt/slides/_rels/slide2.xml.rels", "<Relationships/>"),
            ("ppt/slides/slide1.xml", &first),
        ]);
        assert_eq!(extract_pptx(&bytes).unwrap(), vec!["second", "first"]);
    }

    #[test]
    fn test_slide_part_names() {
        assert!(is_slide_part("ppt/slides/slide12.xml"));
        assert!(!is_slide_part("ppt/slides/_rels/slide1.xml.rels"));
        assert!(!is_slide_part("ppt/slideLayouts/slideLayout1.xml"));
        assert!(!is_slide_part("ppt/slides/slide1.xml.bak"));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(extract_pptx(b"garbage").is_err());
    }
}
