//! Markdown rendering of extracted slide content.

use crate::slide::SlideContent;

/// Deepest bullet indent the renderer will produce. The `lvl` attribute is
/// attacker-controlled input; anything deeper is flattened to this level.
const MAX_INDENT_LEVEL: usize = 8;

/// Render slides into a single Markdown document. The first slide title
/// becomes the document heading; later titles are section headings. Slides
/// are separated by a horizontal rule.
pub fn render(slides: &[SlideContent]) -> String {
    let mut out = String::new();

    for (idx, slide) in slides.iter().enumerate() {
        if idx > 0 {
            out.push_str("\n---\n\n");
        }

        if let Some(ref title) = slide.title {
            let marker = if idx == 0 { "#" } else { "##" };
            out.push_str(marker);
            out.push(' ');
            out.push_str(title);
            out.push_str("\n\n");
        }

        for paragraph in &slide.paragraphs {
            out.push_str(&"  ".repeat(paragraph.level.min(MAX_INDENT_LEVEL)));
            out.push_str("- ");
            out.push_str(&paragraph.text);
            out.push('\n');
        }
        if !slide.paragraphs.is_empty() {
            out.push('\n');
        }

        for image in &slide.images {
            out.push_str(&format!("![image](images/{})\n\n", image));
        }

        if let Some(ref notes) = slide.notes {
            for line in notes.lines() {
                out.push_str("> ");
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }
    }

    let mut document = out.trim_end().to_string();
    document.push('\n');
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::Paragraph;

    fn slide(number: usize, title: Option<&str>) -> SlideContent {
        SlideContent {
            number,
            title: title.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn first_title_is_document_heading() {
        let mut first = slide(1, Some("Intro"));
        first.paragraphs.push(Paragraph {
            text: "Welcome".to_string(),
            level: 0,
        });
        let second = slide(2, Some("Details"));

        let md = render(&[first, second]);
        assert!(md.starts_with("# Intro\n"));
        assert!(md.contains("- Welcome\n"));
        assert!(md.contains("\n---\n"));
        assert!(md.contains("## Details"));
        assert!(md.ends_with('\n'));
    }

    #[test]
    fn nested_paragraphs_are_indented() {
        let mut s = slide(1, None);
        s.paragraphs.push(Paragraph {
            text: "Top".to_string(),
            level: 0,
        });
        s.paragraphs.push(Paragraph {
            text: "Inner".to_string(),
            level: 2,
        });

        let md = render(&[s]);
        assert!(md.contains("- Top\n"));
        assert!(md.contains("    - Inner\n"));
    }

    #[test]
    fn absurd_indent_levels_are_clamped() {
        let mut s = slide(1, None);
        s.paragraphs.push(Paragraph {
            text: "Deep".to_string(),
            level: 4_000_000_000,
        });

        let md = render(&[s]);
        let expected = format!("{}- Deep\n", "  ".repeat(MAX_INDENT_LEVEL));
        assert_eq!(md, expected);
    }

    #[test]
    fn images_and_notes_are_rendered() {
        let mut s = slide(1, Some("Media"));
        s.images.push("image1.png".to_string());
        s.notes = Some("Line one\nLine two".to_string());

        let md = render(&[s]);
        assert!(md.contains("![image](images/image1.png)"));
        assert!(md.contains("> Line one\n> Line two\n"));
    }
}
