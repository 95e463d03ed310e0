use std::io;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors raised while converting a presentation. All variants are terminal;
/// the caller surfaces the message and discards any partial output.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Archive error: {0}")]
    Zip(String),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Not a valid PPTX document: {0}")]
    InvalidDocument(String),
}
