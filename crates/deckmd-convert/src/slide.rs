//! Slide XML parsing.
//!
//! Slides are parsed with an event reader; element names are matched by
//! local name so namespace prefixes (`p:`, `a:`) do not matter.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{ConvertError, Result};

/// One body paragraph with its outline indent level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub level: usize,
}

/// Content extracted from a single slide part.
#[derive(Debug, Default)]
pub struct SlideContent {
    pub number: usize,
    pub title: Option<String>,
    pub paragraphs: Vec<Paragraph>,
    /// Relationship ids of embedded pictures, in document order.
    pub image_rel_ids: Vec<String>,
    /// Extracted image file names, filled in after media extraction.
    pub images: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Default)]
struct ShapeAcc {
    is_title: bool,
    paragraphs: Vec<Paragraph>,
}

/// Parse a slide part into its text content and picture relationship ids.
pub fn parse_slide_xml(xml: &str, number: usize) -> Result<SlideContent> {
    // No trim_text here: whitespace inside <a:t> runs is significant and
    // text is only collected while inside a run.
    let mut reader = Reader::from_str(xml);

    let mut slide = SlideContent {
        number,
        ..Default::default()
    };

    let mut shape: Option<ShapeAcc> = None;
    let mut in_pic = false;
    let mut in_text_body = false;
    let mut in_text_run = false;
    let mut current_text = String::new();
    let mut current_level = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => shape = Some(ShapeAcc::default()),
                b"pic" => in_pic = true,
                b"txBody" => in_text_body = true,
                b"p" if in_text_body => {
                    current_text.clear();
                    current_level = 0;
                }
                b"pPr" if in_text_body => {
                    current_level = paragraph_level(e.attributes().flatten());
                }
                b"ph" => {
                    if let Some(ref mut acc) = shape {
                        if is_title_placeholder(e.attributes().flatten()) {
                            acc.is_title = true;
                        }
                    }
                }
                b"t" => in_text_run = true,
                b"blip" if in_pic => {
                    if let Some(id) = embed_rel_id(e.attributes().flatten()) {
                        slide.image_rel_ids.push(id);
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"pPr" if in_text_body => {
                    current_level = paragraph_level(e.attributes().flatten());
                }
                b"ph" => {
                    if let Some(ref mut acc) = shape {
                        if is_title_placeholder(e.attributes().flatten()) {
                            acc.is_title = true;
                        }
                    }
                }
                b"blip" if in_pic => {
                    if let Some(id) = embed_rel_id(e.attributes().flatten()) {
                        slide.image_rel_ids.push(id);
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if in_text_run {
                    let text = e.unescape().unwrap_or_default();
                    current_text.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    if let Some(acc) = shape.take() {
                        finish_shape(&mut slide, acc);
                    }
                    in_text_body = false;
                    in_text_run = false;
                    current_text.clear();
                }
                b"pic" => in_pic = false,
                b"txBody" => in_text_body = false,
                b"t" => in_text_run = false,
                b"p" => {
                    if in_text_body {
                        let text = current_text.trim().to_string();
                        if !text.is_empty() {
                            if let Some(ref mut acc) = shape {
                                acc.paragraphs.push(Paragraph {
                                    text,
                                    level: current_level,
                                });
                            }
                        }
                        current_text.clear();
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ConvertError::Xml(format!("error parsing slide: {}", e))),
            _ => {}
        }
    }

    Ok(slide)
}

/// Extract speaker-notes text from a notesSlide part. Paragraphs that are
/// purely numeric are dropped; they come from the slide-number placeholder.
pub fn extract_notes_text(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs: Vec<String> = Vec::new();
    let mut in_text_run = false;
    let mut current = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"p" => current.clear(),
                b"t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if in_text_run {
                    let text = e.unescape().unwrap_or_default();
                    current.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"t" => in_text_run = false,
                b"p" => {
                    let text = current.trim().to_string();
                    if !text.is_empty() && !text.chars().all(|c| c.is_ascii_digit()) {
                        paragraphs.push(text);
                    }
                    current.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ConvertError::Xml(format!("error parsing notes: {}", e))),
            _ => {}
        }
    }

    if paragraphs.is_empty() {
        Ok(None)
    } else {
        Ok(Some(paragraphs.join("\n")))
    }
}

fn finish_shape(slide: &mut SlideContent, acc: ShapeAcc) {
    if acc.is_title && slide.title.is_none() {
        let title = acc
            .paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        if !title.is_empty() {
            slide.title = Some(title);
            return;
        }
    }
    slide.paragraphs.extend(acc.paragraphs);
}

fn is_title_placeholder<'a, I>(attrs: I) -> bool
where
    I: Iterator<Item = quick_xml::events::attributes::Attribute<'a>>,
{
    for attr in attrs {
        if attr.key.as_ref() == b"type" {
            let value = String::from_utf8_lossy(&attr.value);
            return value == "title" || value == "ctrTitle";
        }
    }
    false
}

fn paragraph_level<'a, I>(attrs: I) -> usize
where
    I: Iterator<Item = quick_xml::events::attributes::Attribute<'a>>,
{
    for attr in attrs {
        if attr.key.as_ref() == b"lvl" {
            return String::from_utf8_lossy(&attr.value).parse().unwrap_or(0);
        }
    }
    0
}

fn embed_rel_id<'a, I>(attrs: I) -> Option<String>
where
    I: Iterator<Item = quick_xml::events::attributes::Attribute<'a>>,
{
    for attr in attrs {
        // The attribute is r:embed; match on the suffix to ignore the prefix.
        if attr.key.as_ref().ends_with(b"embed") {
            return Some(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    None
}

/// Strip a namespace prefix from an element name.
fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDE_XML: &str = r#"<?xml version="1.0"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
       xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"
       xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <p:cSld><p:spTree>
    <p:sp>
      <p:nvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
      <p:txBody><a:p><a:r><a:t>Quarterly Review</a:t></a:r></a:p></p:txBody>
    </p:sp>
    <p:sp>
      <p:nvSpPr><p:nvPr><p:ph type="body"/></p:nvPr></p:nvSpPr>
      <p:txBody>
        <a:p><a:r><a:t>First point</a:t></a:r></a:p>
        <a:p><a:pPr lvl="1"/><a:r><a:t>Nested </a:t></a:r><a:r><a:t>point</a:t></a:r></a:p>
      </p:txBody>
    </p:sp>
    <p:pic><p:blipFill><a:blip r:embed="rId10"/></p:blipFill></p:pic>
  </p:spTree></p:cSld>
</p:sld>"#;

    #[test]
    fn parses_title_body_and_pictures() {
        let slide = parse_slide_xml(SLIDE_XML, 1).unwrap();
        assert_eq!(slide.title.as_deref(), Some("Quarterly Review"));
        assert_eq!(
            slide.paragraphs,
            vec![
                Paragraph {
                    text: "First point".to_string(),
                    level: 0
                },
                Paragraph {
                    text: "Nested point".to_string(),
                    level: 1
                },
            ]
        );
        assert_eq!(slide.image_rel_ids, vec!["rId10".to_string()]);
    }

    #[test]
    fn notes_text_drops_slide_number_placeholder() {
        let xml = r#"<p:notes xmlns:a="a" xmlns:p="p"><p:cSld><p:spTree><p:sp><p:txBody>
            <a:p><a:r><a:t>Remember the demo.</a:t></a:r></a:p>
            <a:p><a:r><a:t>3</a:t></a:r></a:p>
        </p:txBody></p:sp></p:spTree></p:cSld></p:notes>"#;
        let notes = extract_notes_text(xml).unwrap();
        assert_eq!(notes.as_deref(), Some("Remember the demo."));
    }

    #[test]
    fn notes_text_empty_when_only_placeholders() {
        let xml = r#"<p:notes><p:sp><p:txBody><a:p><a:r><a:t>12</a:t></a:r></a:p></p:txBody></p:sp></p:notes>"#;
        assert_eq!(extract_notes_text(xml).unwrap(), None);
    }

    #[test]
    fn local_name_strips_prefix() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }
}
