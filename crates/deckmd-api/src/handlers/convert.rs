use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, Response, StatusCode},
    response::IntoResponse,
};
use deckmd_convert::{ConversionConfig, ConversionOutcome};
use deckmd_core::AppError;

use crate::archive;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{extract_multipart_file, sanitize_filename, validate_file_extension};
use crate::workspace::ScratchWorkspace;

#[utoipa::path(
    post,
    path = "/api/convert",
    tag = "convert",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "ZIP archive with the Markdown document and extracted images", content_type = "application/zip"),
        (status = 400, description = "Missing, empty, or non-PPTX upload", body = ErrorResponse),
        (status = 413, description = "File exceeds the configured upload ceiling"),
        (status = 500, description = "Conversion failure", body = ErrorResponse)
    )
)]
pub async fn convert_presentation(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let (file_data, original_filename) = extract_multipart_file(multipart).await?;

    if original_filename.is_empty() {
        return Err(AppError::InvalidInput("No file selected".to_string()).into());
    }
    if file_data.is_empty() {
        return Err(AppError::InvalidInput("File is empty".to_string()).into());
    }
    if let Err(e) = validate_file_extension(&original_filename, state.config.allowed_extensions()) {
        tracing::warn!(
            filename = %original_filename,
            "Rejected upload with disallowed extension"
        );
        return Err(e.into());
    }

    let filename = sanitize_filename(&original_filename)?;
    let base_name = Path::new(&filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .to_string();
    let markdown_name = format!("{}.md", base_name);

    // The guard owns the scratch directory for the rest of the request;
    // dropping it removes every intermediate file on success and on error.
    let workspace = ScratchWorkspace::create(&state.config.upload_dir)?;
    let pptx_path = workspace.path().join(&filename);
    let output_path = workspace.path().join(&markdown_name);
    let image_dir = workspace.path().join("images");

    tokio::fs::write(&pptx_path, &file_data)
        .await
        .map_err(AppError::from)?;

    let conversion_config = ConversionConfig {
        pptx_path,
        output_path: output_path.clone(),
        image_dir: image_dir.clone(),
        disable_notes: false,
    };

    // Conversion and packaging are synchronous file I/O; run them off the
    // async runtime threads. The workspace guard moves into the blocking
    // task: if the request future is dropped mid-conversion, the scratch
    // directory is still removed once the task finishes.
    let markdown_entry = markdown_name.clone();
    let task_result: Result<(ConversionOutcome, Vec<u8>), AppError> =
        tokio::task::spawn_blocking(move || {
            let _workspace = workspace;
            let outcome = deckmd_convert::convert(&conversion_config)
                .map_err(|e| AppError::Conversion(e.to_string()))?;
            let bytes = archive::build_archive(&output_path, &image_dir, &markdown_entry)
                .map_err(AppError::from)?;
            Ok((outcome, bytes))
        })
        .await
        .map_err(|e| AppError::Internal(format!("Conversion task failed: {}", e)))?;

    let (outcome, archive_bytes) = match task_result {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(filename = %original_filename, error = %e, "Conversion error");
            return Err(e.into());
        }
    };

    let zip_name = format!("{}.zip", base_name);
    tracing::info!(
        filename = %original_filename,
        archive = %zip_name,
        slides = outcome.slide_count,
        images = outcome.image_count,
        "Conversion successful"
    );

    let content_disposition = format!("attachment; filename=\"{}\"", zip_name);
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/zip")
        .header(header::CONTENT_DISPOSITION, content_disposition.as_str())
        .body(Body::from(archive_bytes))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
