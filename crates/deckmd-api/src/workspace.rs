//! Request-scoped scratch workspace.
//!
//! Each request gets an isolated directory under the configured upload root.
//! The `TempDir` guard removes the directory and its contents when the
//! workspace is dropped, on every exit path including panics, so concurrent
//! requests never share paths and nothing survives the request.

use std::path::Path;

use deckmd_core::AppError;
use tempfile::TempDir;

pub struct ScratchWorkspace {
    dir: TempDir,
}

impl ScratchWorkspace {
    pub fn create(root: &Path) -> Result<Self, AppError> {
        let dir = tempfile::Builder::new()
            .prefix("deckmd-")
            .tempdir_in(root)
            .map_err(|e| {
                AppError::Internal(format!("Failed to create scratch workspace: {}", e))
            })?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
