//! ZIP packaging of conversion output.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Sanitize filename for archive entry to prevent path traversal.
/// Extracts only the base name (strips path components like `../`).
fn sanitize_archive_filename(filename: &str, fallback: &str) -> String {
    Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .unwrap_or(fallback)
        .to_string()
}

/// Build the response archive in memory: the Markdown document at the root
/// and every extracted image under an `images/` prefix. The image directory
/// may be absent when the presentation had no pictures.
pub fn build_archive(output_path: &Path, image_dir: &Path, markdown_name: &str) -> Result<Vec<u8>> {
    use zip::write::{FileOptions, ZipWriter};
    use zip::CompressionMethod;

    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(std::io::Cursor::new(&mut buffer));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        let markdown = std::fs::read_to_string(output_path)
            .with_context(|| format!("Failed to read conversion output: {}", output_path.display()))?;
        let markdown_entry = sanitize_archive_filename(markdown_name, "document.md");
        zip.start_file(&markdown_entry, options)
            .with_context(|| format!("Failed to add file to ZIP: {}", markdown_entry))?;
        zip.write_all(markdown.as_bytes())
            .with_context(|| format!("Failed to write file data to ZIP: {}", markdown_entry))?;

        if image_dir.is_dir() {
            let mut entries: Vec<_> = std::fs::read_dir(image_dir)
                .with_context(|| format!("Failed to list image directory: {}", image_dir.display()))?
                .collect::<std::io::Result<_>>()?;
            entries.sort_by_key(|e| e.file_name());

            for entry in entries {
                if !entry.file_type()?.is_file() {
                    continue;
                }
                let name = entry.file_name().to_string_lossy().to_string();
                let safe_name = sanitize_archive_filename(&name, "image");

                let data = std::fs::read(entry.path())
                    .with_context(|| format!("Failed to read image: {}", name))?;
                let entry_name = format!("images/{}", safe_name);
                zip.start_file(&entry_name, options)
                    .with_context(|| format!("Failed to add file to ZIP: {}", entry_name))?;
                zip.write_all(&data)
                    .with_context(|| format!("Failed to write file data to ZIP: {}", entry_name))?;
            }
        }

        zip.finish().context("Failed to finalize ZIP archive")?;
    }

    Ok(buffer)
}
