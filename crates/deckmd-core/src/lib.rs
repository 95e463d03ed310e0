//! Deckmd Core Library
//!
//! This crate provides the configuration object and error types shared by the
//! deckmd components.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
