//! Access to the PPTX package (a ZIP archive of XML parts).

use std::collections::HashMap;
use std::io::{Read, Seek};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::{ConvertError, Result};

/// A single entry from a `.rels` part, with its target resolved to a full
/// path inside the package.
#[derive(Debug, Clone)]
pub struct Relationship {
    pub rel_type: String,
    pub target: String,
}

/// An opened PPTX package.
pub struct Package<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> Package<R> {
    /// Open a package from a reader. Anything that is not a readable ZIP
    /// archive is reported as an invalid document.
    pub fn open(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)
            .map_err(|e| ConvertError::InvalidDocument(format!("not a ZIP archive: {}", e)))?;
        Ok(Self { archive })
    }

    /// Read a part as UTF-8 text.
    pub fn read_part(&mut self, path: &str) -> Result<String> {
        let mut file = self
            .archive
            .by_name(path)
            .map_err(|e| ConvertError::Zip(format!("part not found '{}': {}", path, e)))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| ConvertError::Zip(format!("failed to read '{}': {}", path, e)))?;
        Ok(content)
    }

    /// Read a part as raw bytes (used for media files).
    pub fn read_part_bytes(&mut self, path: &str) -> Result<Vec<u8>> {
        let mut file = self
            .archive
            .by_name(path)
            .map_err(|e| ConvertError::Zip(format!("part not found '{}': {}", path, e)))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| ConvertError::Zip(format!("failed to read '{}': {}", path, e)))?;
        Ok(bytes)
    }

    /// Ordered slide part paths, taken from the presentation relationships.
    /// Matching on the "/slide" suffix keeps layouts ("/slideLayout") and
    /// masters ("/slideMaster") out.
    pub fn slide_paths(&mut self) -> Result<Vec<String>> {
        let rels = self.read_part("ppt/_rels/presentation.xml.rels").map_err(|_| {
            ConvertError::InvalidDocument("missing presentation relationships".to_string())
        })?;

        let mut slides: Vec<(String, Option<usize>)> = Vec::new();
        for (id, rel_type, target) in parse_relationship_entries(&rels)? {
            if rel_type.ends_with("/slide") {
                let order = extract_part_number(&id).or_else(|| extract_part_number(&target));
                slides.push((resolve_target("ppt", &target), order));
            }
        }

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Relationships of a part, keyed by relationship id. A part with no
    /// `.rels` sibling simply has no relationships.
    pub fn relationships(&mut self, part_path: &str) -> Result<HashMap<String, Relationship>> {
        let (dir, name) = match part_path.rsplit_once('/') {
            Some((dir, name)) => (dir, name),
            None => ("", part_path),
        };
        let rels_path = if dir.is_empty() {
            format!("_rels/{}.rels", name)
        } else {
            format!("{}/_rels/{}.rels", dir, name)
        };

        let content = match self.read_part(&rels_path) {
            Ok(content) => content,
            Err(_) => return Ok(HashMap::new()),
        };

        let mut rels = HashMap::new();
        for (id, rel_type, target) in parse_relationship_entries(&content)? {
            rels.insert(
                id,
                Relationship {
                    rel_type,
                    target: resolve_target(dir, &target),
                },
            );
        }
        Ok(rels)
    }
}

/// Parse `(Id, Type, Target)` triples out of a `.rels` part.
fn parse_relationship_entries(xml: &str) -> Result<Vec<(String, String, String)>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut entries = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                let mut id = String::new();
                let mut rel_type = String::new();
                let mut target = String::new();

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Type" => rel_type = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Target" => target = String::from_utf8_lossy(&attr.value).to_string(),
                        _ => {}
                    }
                }

                if !target.is_empty() {
                    entries.push((id, rel_type, target));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ConvertError::Xml(format!(
                    "error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }
    Ok(entries)
}

/// Resolve a relationship target against the directory of the part that
/// declared it. Handles absolute targets and `..` segments.
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(stripped) = target.strip_prefix('/') {
        return stripped.to_string();
    }

    let mut parts: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            ".." => {
                parts.pop();
            }
            "." | "" => {}
            s => parts.push(s),
        }
    }
    parts.join("/")
}

/// Extract a trailing part number from a string like "rId2" or "slide3.xml".
pub fn extract_part_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
