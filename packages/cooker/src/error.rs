//! Error types for the cooker.
//!
//! Only the edges of the pipeline are fallible (reading sources, parsing
//! strict XML, validating configuration, serializing output). The core
//! transformation reports data-quality problems as diagnostics instead.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the cooker library.
#[derive(Debug, Error)]
pub enum CookerError {
    /// Invalid 8-digit date.
    #[error("Invalid date: '{0}'. Expected YYYYMMDD (e.g., 20161201)")]
    InvalidDate(String),

    /// Invalid comment marker.
    #[error("Invalid comment marker: {0:?}. Expected a single non-alphanumeric, non-bracket character")]
    InvalidCommentMarker(char),

    /// Invalid record-root tag name.
    #[error("Invalid root tag: '{0}'. Expected a non-empty tag name without whitespace or '<', '>'")]
    InvalidRootTag(String),

    /// Source file does not exist.
    #[error("Source file not found: {}", .path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// XML parsing failed (strict tree provider only).
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

/// Result type alias for cooker operations.
pub type Result<T> = std::result::Result<T, CookerError>;
