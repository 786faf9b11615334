//! Error types

use thiserror::Error;

/// Errors reported by the library.
///
/// Interactive edits never surface these into the render loop,
/// they are returned from loading and configuration calls only.
#[derive(Error, Debug)]
pub enum DvrError {
    /// One of the volume dimensions is zero.
    #[error("invalid volume dimensions {width}x{height}x{depth}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        depth: usize,
    },

    /// Less sample data than the dimensions require.
    #[error("volume data too small: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Header of a volume file could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Path does not lead to a regular file.
    #[error("'{0}' is not a file")]
    NotAFile(String),

    /// Colour string is not `#rrggbb`.
    #[error("invalid color '{0}'")]
    InvalidColor(String),

    /// Render options failed validation.
    #[error("invalid render options: {0}")]
    InvalidRenderOptions(&'static str),

    /// Framebuffer does not match the render resolution.
    #[error("framebuffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for library operations.
pub type Result<T> = std::result::Result<T, DvrError>;
