//! Common utilities for the upload handler

use axum::extract::Multipart;
use deckmd_core::AppError;

/// Extract file data and the declared filename from the multipart form.
/// Only one field named "file" is accepted; multiple file fields are rejected.
pub async fn extract_multipart_file(
    mut multipart: Multipart,
) -> Result<(Vec<u8>, String), AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == "file" {
            if file_data.is_some() {
                return Err(AppError::InvalidInput(
                    "Multiple file fields are not allowed; send exactly one field named 'file'"
                        .to_string(),
                ));
            }
            filename = field.file_name().map(|s: &str| s.to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

            file_data = Some(data.to_vec());
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;

    let original_filename = filename.unwrap_or_default();

    Ok((file_data, original_filename))
}

/// Validate file extension against the permitted set. The set currently
/// holds exactly one entry; the error message reflects that.
pub fn validate_file_extension(
    filename: &str,
    allowed_extensions: &[&str],
) -> Result<String, AppError> {
    let extension = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    if !filename.contains('.') || !allowed_extensions.contains(&extension.as_str()) {
        return Err(AppError::InvalidInput(
            "Only PPTX files are accepted".to_string(),
        ));
    }

    Ok(extension)
}

/// Sanitize filename to prevent path traversal and invalid characters.
/// Returns an error if the filename contains path traversal attempts.
pub fn sanitize_filename(filename: &str) -> Result<String, AppError> {
    const MAX_FILENAME_LENGTH: usize = 255;

    let path = std::path::Path::new(filename);
    let filename_only = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    // Directories were stripped above; only a basename that is itself a
    // traversal segment ("..", "...") is left to reject. Interior dots in
    // a real name are fine.
    if !filename_only.is_empty() && filename_only.chars().all(|c| c == '.') {
        return Err(AppError::InvalidInput(
            "Filename contains invalid path traversal".to_string(),
        ));
    }

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Ok("file".to_string());
    }

    Ok(sanitized)
}
