//! Region config data model and JSON (de)serialization
//!
//! The on-disk config is a nested JSON mapping: category name -> region
//! identifier -> region info. Shape overrides are resolved into an explicit
//! `Shape` enum at load time so rendering never re-inspects raw keys, and
//! bad entries fail the load instead of failing deep inside drawing code.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::color;
use crate::error::MapError;

/// The shape a cell renders as, decided once when the config is loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Rectangle { width: f32, height: f32 },
}

impl Default for Shape {
    fn default() -> Self {
        // One grid unit square
        Shape::Rectangle {
            width: 1.0,
            height: 1.0,
        }
    }
}

/// One grid-addressed cell belonging to a region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCell", into = "RawCell")]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub shape: Shape,
}

impl Cell {
    /// A plain 1x1 rectangular cell, the form the extractor emits.
    pub fn unit(x: i32, y: i32) -> Self {
        Cell {
            x,
            y,
            shape: Shape::default(),
        }
    }
}

/// Wire form of a cell: `cellX`/`cellY` plus either a `radius` key
/// (circle) or optional `width`/`height` keys (rectangle).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCell {
    #[serde(rename = "cellX")]
    cell_x: i32,
    #[serde(rename = "cellY")]
    cell_y: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<f32>,
}

impl TryFrom<RawCell> for Cell {
    type Error = String;

    fn try_from(raw: RawCell) -> Result<Self, Self::Error> {
        let shape = match (raw.radius, raw.width, raw.height) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                return Err(format!(
                    "cell ({}, {}) has both radius and width/height",
                    raw.cell_x, raw.cell_y
                ));
            }
            (Some(radius), None, None) => Shape::Circle { radius },
            (None, w, h) => Shape::Rectangle {
                width: w.unwrap_or(1.0),
                height: h.unwrap_or(1.0),
            },
        };
        Ok(Cell {
            x: raw.cell_x,
            y: raw.cell_y,
            shape,
        })
    }
}

impl From<Cell> for RawCell {
    fn from(cell: Cell) -> Self {
        let (radius, width, height) = match cell.shape {
            Shape::Circle { radius } => (Some(radius), None, None),
            Shape::Rectangle { width, height } => (None, Some(width), Some(height)),
        };
        RawCell {
            cell_x: cell.x,
            cell_y: cell.y,
            radius,
            width,
            height,
        }
    }
}

/// Display info and cell list for one region.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionInfo {
    /// Display name; falls back to the region identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `#RRGGBB` or `#RRGGBBAA`; falls back to a generated color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub locations: Vec<Cell>,
}

/// Category name -> region identifier -> region info, in document order.
/// Document order drives layer draw order and legend ordering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionsConfig(pub IndexMap<String, IndexMap<String, RegionInfo>>);

impl RegionsConfig {
    /// Load and validate a region config file.
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let file = File::open(path).map_err(|e| {
            MapError::Config(format!("cannot open config {}: {}", path.display(), e))
        })?;
        let config: RegionsConfig = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| MapError::Config(format!("invalid config {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject explicit colors that are not 7- or 9-char hex strings.
    fn validate(&self) -> Result<(), MapError> {
        for (category, regions) in &self.0 {
            for (region_id, info) in regions {
                if let Some(c) = &info.color {
                    color::parse_hex(c).map_err(|_| {
                        MapError::Config(format!(
                            "region {}/{} has invalid color {:?}",
                            category, region_id, c
                        ))
                    })?;
                }
            }
        }
        Ok(())
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), MapError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Total number of regions across all categories.
    pub fn region_count(&self) -> usize {
        self.0.values().map(|regions| regions.len()).sum()
    }
}
