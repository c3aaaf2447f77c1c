//! Error types for the render and extraction pipelines
//!
//! Every failure here is fatal: the tools either produce one complete
//! output or exit non-zero with the error printed.

use std::fmt;

/// Errors that can occur while rendering a region map or extracting a
/// region config from a plugin file.
#[derive(Debug)]
pub enum MapError {
    /// Region config file missing, not valid JSON, or carrying bad fields
    Config(String),
    /// Background image or font asset missing/unreadable
    Asset(String),
    /// Degenerate viewport bounds (zero grid width or height)
    Geometry(String),
    /// Converter subprocess failed or produced unparsable output
    ExternalTool(String),
    Io(std::io::Error),
    Image(image::ImageError),
    Json(serde_json::Error),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Config(e) => write!(f, "Config error: {}", e),
            MapError::Asset(e) => write!(f, "Asset error: {}", e),
            MapError::Geometry(e) => write!(f, "Geometry error: {}", e),
            MapError::ExternalTool(e) => write!(f, "External tool error: {}", e),
            MapError::Io(e) => write!(f, "I/O error: {}", e),
            MapError::Image(e) => write!(f, "Image error: {}", e),
            MapError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Io(e) => Some(e),
            MapError::Image(e) => Some(e),
            MapError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self {
        MapError::Io(e)
    }
}

impl From<image::ImageError> for MapError {
    fn from(e: image::ImageError) -> Self {
        MapError::Image(e)
    }
}

impl From<serde_json::Error> for MapError {
    fn from(e: serde_json::Error) -> Self {
        MapError::Json(e)
    }
}
