use std::io::{Cursor, Write};
use std::sync::Arc;

use axum_test::TestServer;
use deckmd_api::setup::routes::build_router;
use deckmd_api::state::AppState;
use deckmd_core::config::{Config, MAX_UPLOAD_SIZE_BYTES};
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::ZipWriter;

/// Test application with an isolated scratch root.
pub struct TestApp {
    pub server: TestServer,
    pub upload_root: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Assert that no per-request scratch directory survived.
    pub fn assert_scratch_clean(&self) {
        let leftovers: Vec<_> = std::fs::read_dir(self.upload_root.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert!(
            leftovers.is_empty(),
            "scratch root not clean: {:?}",
            leftovers
        );
    }
}

/// Setup a test application with an isolated upload root.
pub fn setup_test_app() -> TestApp {
    let upload_root = tempfile::tempdir().unwrap();
    let config = Config {
        server_port: 0,
        upload_dir: upload_root.path().to_path_buf(),
        max_upload_size_bytes: MAX_UPLOAD_SIZE_BYTES,
    };
    let server = TestServer::new(build_router(Arc::new(AppState::new(config)))).unwrap();
    TestApp {
        server,
        upload_root,
    }
}

pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

/// Build a minimal but well-formed PPTX: one slide with a title, a bullet,
/// an embedded image, and speaker notes.
pub fn build_pptx() -> Vec<u8> {
    const PRESENTATION_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/>
</Relationships>"#;

    const SLIDE_ONE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
       xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"
       xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <p:cSld><p:spTree>
    <p:sp>
      <p:nvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
      <p:txBody><a:p><a:r><a:t>Quarterly Review</a:t></a:r></a:p></p:txBody>
    </p:sp>
    <p:sp>
      <p:txBody><a:p><a:r><a:t>Revenue is up</a:t></a:r></a:p></p:txBody>
    </p:sp>
    <p:pic><p:blipFill><a:blip r:embed="rId10"/></p:blipFill></p:pic>
  </p:spTree></p:cSld>
</p:sld>"#;

    const SLIDE_ONE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId10" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png"/>
  <Relationship Id="rId11" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide" Target="../notesSlides/notesSlide1.xml"/>
</Relationships>"#;

    const NOTES_ONE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<p:notes xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
         xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld><p:spTree><p:sp><p:txBody>
    <a:p><a:r><a:t>Mention the new pipeline.</a:t></a:r></a:p>
  </p:txBody></p:sp></p:spTree></p:cSld>
</p:notes>"#;

    let mut buffer = Vec::new();
    {
        let mut writer = ZipWriter::new(Cursor::new(&mut buffer));
        let options = FileOptions::default();

        let parts: &[(&str, &[u8])] = &[
            (
                "ppt/_rels/presentation.xml.rels",
                PRESENTATION_RELS.as_bytes(),
            ),
            ("ppt/slides/slide1.xml", SLIDE_ONE.as_bytes()),
            ("ppt/slides/_rels/slide1.xml.rels", SLIDE_ONE_RELS.as_bytes()),
            ("ppt/notesSlides/notesSlide1.xml", NOTES_ONE.as_bytes()),
            ("ppt/media/image1.png", PNG_BYTES),
        ];
        for (name, content) in parts {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap();
    }
    buffer
}

/// Build a PPTX with `count` slides, each carrying a paragraph and its own
/// image, so conversion does a meaningful amount of file I/O.
pub fn build_large_pptx(count: usize) -> Vec<u8> {
    let mut presentation_rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for i in 1..=count {
        presentation_rels.push_str(&format!(
            r#"<Relationship Id="rId{i}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{i}.xml"/>"#
        ));
    }
    presentation_rels.push_str("</Relationships>");

    let mut buffer = Vec::new();
    {
        let mut writer = ZipWriter::new(Cursor::new(&mut buffer));
        let options = FileOptions::default();

        writer
            .start_file("ppt/_rels/presentation.xml.rels", options)
            .unwrap();
        writer.write_all(presentation_rels.as_bytes()).unwrap();

        for i in 1..=count {
            let slide = format!(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
       xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"
       xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <p:cSld><p:spTree>
    <p:sp><p:txBody><a:p><a:r><a:t>Slide {i} body</a:t></a:r></a:p></p:txBody></p:sp>
    <p:pic><p:blipFill><a:blip r:embed="rId1"/></p:blipFill></p:pic>
  </p:spTree></p:cSld>
</p:sld>"#
            );
            let slide_rels = format!(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image{i}.png"/>
</Relationships>"#
            );

            writer
                .start_file(format!("ppt/slides/slide{i}.xml"), options)
                .unwrap();
            writer.write_all(slide.as_bytes()).unwrap();
            writer
                .start_file(format!("ppt/slides/_rels/slide{i}.xml.rels"), options)
                .unwrap();
            writer.write_all(slide_rels.as_bytes()).unwrap();

            let mut image = PNG_BYTES.to_vec();
            image.extend_from_slice(format!("{i}").as_bytes());
            writer
                .start_file(format!("ppt/media/image{i}.png"), options)
                .unwrap();
            writer.write_all(&image).unwrap();
        }
        writer.finish().unwrap();
    }
    buffer
}
