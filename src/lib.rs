//! Region map rendering and extraction
//!
//! Renders named region overlays (grid cells with optional circle or
//! rectangle shape overrides) onto a background map image, and extracts
//! the region dataset from a game plugin file via an external converter.

pub mod color;
pub mod config;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod layers;
pub mod legend;
pub mod render;
