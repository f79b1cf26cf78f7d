//! Error types for the logo renderer

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors. Anything surfacing as `Error` aborts the render.
#[derive(Error, Debug)]
pub enum Error {
    /// A font file was found and read but could not be parsed
    #[error("Invalid font file: {}", .path.display())]
    InvalidFont { path: PathBuf },

    /// Geometry that cannot be drawn (empty box, zero stroke, ...)
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Failed to encode the canvas
    #[error("Encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// Failed to write the output file
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Recoverable font acquisition failures.
///
/// Callers are expected to substitute another font when they see one of
/// these; see [`crate::fonts::load_font_or`].
#[derive(Error, Debug)]
pub enum FontLoadError {
    /// No file with this name exists on any search path
    #[error("Font not found: {0}")]
    NotFound(String),

    /// The file exists but reading it failed
    #[error("Font {} could not be read: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not a usable TrueType/OpenType face
    #[error("Font {} is not a valid font file", .path.display())]
    Invalid { path: PathBuf },
}

impl FontLoadError {
    /// Classify an I/O error raised while reading `path`.
    pub fn from_io(name: &str, path: PathBuf, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            FontLoadError::NotFound(name.to_string())
        } else {
            FontLoadError::Unreadable { path, source: err }
        }
    }
}
