//! Deckmd Conversion Library
//!
//! Converts a PPTX presentation into a Markdown document plus extracted
//! images. The API is path-based: callers hand over a source file, an output
//! file, and an image directory, and get files on disk back.
//!
//! ```no_run
//! use deckmd_convert::{convert, ConversionConfig};
//!
//! let outcome = convert(&ConversionConfig {
//!     pptx_path: "deck.pptx".into(),
//!     output_path: "deck.md".into(),
//!     image_dir: "images".into(),
//!     disable_notes: false,
//! })?;
//! println!("{} slides, {} images", outcome.slide_count, outcome.image_count);
//! # Ok::<(), deckmd_convert::ConvertError>(())
//! ```

pub mod error;
pub mod markdown;
pub mod package;
pub mod slide;

pub use error::{ConvertError, Result};

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use package::Package;
use slide::SlideContent;

/// Conversion parameters for a single document.
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Source presentation.
    pub pptx_path: PathBuf,
    /// Destination Markdown file. Parent directory must exist.
    pub output_path: PathBuf,
    /// Directory for extracted images, created on demand.
    pub image_dir: PathBuf,
    /// Skip speaker notes when set.
    pub disable_notes: bool,
}

/// Summary of a completed conversion, for logging.
#[derive(Debug, Clone, Copy)]
pub struct ConversionOutcome {
    pub slide_count: usize,
    pub image_count: usize,
}

/// Convert a PPTX presentation to Markdown, extracting embedded images into
/// `config.image_dir`. Fails without partial output cleanup; callers own the
/// surrounding workspace lifecycle.
pub fn convert(config: &ConversionConfig) -> Result<ConversionOutcome> {
    let file = File::open(&config.pptx_path)?;
    let mut package = Package::open(BufReader::new(file))?;

    let slide_paths = package.slide_paths()?;
    if slide_paths.is_empty() {
        return Err(ConvertError::InvalidDocument(
            "presentation contains no slides".to_string(),
        ));
    }

    let mut slides: Vec<SlideContent> = Vec::with_capacity(slide_paths.len());
    let mut extracted: HashSet<String> = HashSet::new();

    for (idx, slide_path) in slide_paths.iter().enumerate() {
        let xml = package.read_part(slide_path)?;
        let mut content = slide::parse_slide_xml(&xml, idx + 1)?;

        let rels = package.relationships(slide_path)?;

        for rel_id in content.image_rel_ids.clone() {
            let Some(rel) = rels.get(&rel_id) else {
                tracing::debug!(slide = idx + 1, rel_id = %rel_id, "Unresolved picture relationship");
                continue;
            };
            let name = extract_media(&mut package, &rel.target, &config.image_dir, &mut extracted)?;
            content.images.push(name);
        }

        if !config.disable_notes {
            if let Some(rel) = rels.values().find(|r| r.rel_type.ends_with("/notesSlide")) {
                let notes_xml = package.read_part(&rel.target)?;
                content.notes = slide::extract_notes_text(&notes_xml)?;
            }
        }

        slides.push(content);
    }

    let document = markdown::render(&slides);
    fs::write(&config.output_path, document)?;

    let outcome = ConversionOutcome {
        slide_count: slides.len(),
        image_count: extracted.len(),
    };
    tracing::debug!(
        slides = outcome.slide_count,
        images = outcome.image_count,
        output = %config.output_path.display(),
        "Conversion finished"
    );
    Ok(outcome)
}

/// Copy one media part out of the package. Repeated references to the same
/// part (an image reused across slides) are written once.
fn extract_media<R: std::io::Read + std::io::Seek>(
    package: &mut Package<R>,
    part_path: &str,
    image_dir: &Path,
    extracted: &mut HashSet<String>,
) -> Result<String> {
    let name = part_path
        .rsplit('/')
        .next()
        .unwrap_or(part_path)
        .to_string();

    if extracted.contains(&name) {
        return Ok(name);
    }

    let bytes = package.read_part_bytes(part_path)?;
    fs::create_dir_all(image_dir)?;
    fs::write(image_dir.join(&name), bytes)?;
    extracted.insert(name.clone());
    Ok(name)
}
