//! Error types for cardprep-imaging.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during image processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required external tool is not available.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// An external tool failed to execute.
    #[error("tool execution failed: {tool}: {message}")]
    ToolFailed { tool: String, message: String },

    /// The specified file was not found.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Image bytes could not be decoded.
    #[error("failed to decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: image::ImageError,
    },

    /// An image could not be encoded or written.
    #[error("failed to encode {what}: {source}")]
    Encode {
        what: String,
        #[source]
        source: image::ImageError,
    },

    /// Cropping found no pixel with a non-zero alpha value.
    #[error("no opaque pixels: image is fully transparent")]
    NoOpaquePixels,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a tool execution failed error.
    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a decode error.
    pub fn decode(what: impl Into<String>, source: image::ImageError) -> Self {
        Self::Decode {
            what: what.into(),
            source,
        }
    }

    /// Create an encode error.
    pub fn encode(what: impl Into<String>, source: image::ImageError) -> Self {
        Self::Encode {
            what: what.into(),
            source,
        }
    }
}
