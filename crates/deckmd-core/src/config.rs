//! Configuration module
//!
//! Configuration is an explicit object built once at startup and handed to the
//! server, never read from ambient globals inside handlers.

use std::env;
use std::path::PathBuf;

const DEFAULT_SERVER_PORT: u16 = 5000;

/// Fixed request body ceiling: 50 MiB. Oversized uploads are rejected up
/// front by the body-limit layer rather than mid-conversion.
pub const MAX_UPLOAD_SIZE_BYTES: usize = 50 * 1024 * 1024;

/// The one accepted upload extension. The service converts presentations
/// only; the narrow contract is deliberate.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pptx"];

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// Root under which per-request scratch directories are created.
    pub upload_dir: PathBuf,
    pub max_upload_size_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let server_port = match env::var("SERVER_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("Invalid SERVER_PORT '{}': {}", raw, e))?,
            Err(_) => DEFAULT_SERVER_PORT,
        };

        let upload_dir = env::var("UPLOAD_FOLDER")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir());

        Ok(Self {
            server_port,
            upload_dir,
            max_upload_size_bytes: MAX_UPLOAD_SIZE_BYTES,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.upload_dir.is_dir() {
            anyhow::bail!(
                "Upload directory does not exist or is not a directory: {}",
                self.upload_dir.display()
            );
        }
        Ok(())
    }

    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        ALLOWED_EXTENSIONS
    }
}
