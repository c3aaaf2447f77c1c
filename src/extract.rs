//! Region config extraction from game plugin files
//!
//! Shells out to the `tes3conv` converter for the plugin-to-JSON step,
//! then filters the entries down to exterior cells carrying a region
//! assignment and groups them by region identifier. Every malformed
//! upstream payload is fatal; there is no partial extraction.

use std::path::Path;
use std::process::Command;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::color;
use crate::config::{Cell, RegionInfo, RegionsConfig};
use crate::error::MapError;

/// Converter executable, invoked with the plugin path as sole argument.
pub const CONVERTER_COMMAND: &str = "./tes3conv";
/// Category name under which extracted regions are grouped.
pub const DEFAULT_CATEGORY: &str = "Region";

/// One record from the converter's JSON output. Only `Cell` records with
/// a region assignment matter; everything else carries free-form data.
#[derive(Debug, Clone, Deserialize)]
pub struct WorldEntry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub data: Option<EntryData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntryData {
    /// Exterior cell grid coordinates as `[x, y]`
    #[serde(default)]
    pub grid: Option<(i32, i32)>,
}

/// Run the converter and parse its stdout. Blocks until the subprocess
/// exits and captures its complete output; a non-zero exit surfaces the
/// captured stderr.
pub fn run_converter(plugin_path: &Path) -> Result<Vec<WorldEntry>, MapError> {
    run_converter_with(CONVERTER_COMMAND, plugin_path)
}

fn run_converter_with(command: &str, plugin_path: &Path) -> Result<Vec<WorldEntry>, MapError> {
    let output = Command::new(command)
        .arg(plugin_path)
        .output()
        .map_err(|e| MapError::ExternalTool(format!("failed to run {}: {}", command, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MapError::ExternalTool(format!(
            "{} failed with {}: {}",
            command,
            output.status,
            stderr.trim()
        )));
    }
    parse_entries(&output.stdout)
}

/// Parse the converter's JSON output into world entries.
pub fn parse_entries(stdout: &[u8]) -> Result<Vec<WorldEntry>, MapError> {
    serde_json::from_slice(stdout)
        .map_err(|e| MapError::ExternalTool(format!("failed to parse converter output: {}", e)))
}

/// Group cell records by region identifier, in encounter order.
///
/// Each newly-seen region gets the raw region string as its display name
/// and a generated translucent color; each surviving record contributes
/// one plain unit cell.
pub fn group_cells(entries: Vec<WorldEntry>, category: &str) -> Result<RegionsConfig, MapError> {
    let mut regions: IndexMap<String, RegionInfo> = IndexMap::new();

    for entry in entries {
        if entry.kind != "Cell" {
            continue;
        }
        let region_id = match entry.region {
            Some(r) if !r.is_empty() => r,
            _ => continue,
        };
        let grid = entry.data.as_ref().and_then(|d| d.grid).ok_or_else(|| {
            MapError::ExternalTool(format!(
                "cell record for region {:?} has no grid coordinates",
                region_id
            ))
        })?;

        let info = regions.entry(region_id.clone()).or_insert_with(|| RegionInfo {
            name: Some(region_id.clone()),
            color: Some(color::generate_layer_color(&region_id)),
            locations: Vec::new(),
        });
        info.locations.push(Cell::unit(grid.0, grid.1));
    }

    let mut categories = IndexMap::new();
    categories.insert(category.to_string(), regions);
    Ok(RegionsConfig(categories))
}

/// Full extraction: convert the plugin, then group its cells.
pub fn extract_from_plugin(plugin_path: &Path) -> Result<RegionsConfig, MapError> {
    let entries = run_converter(plugin_path)?;
    group_cells(entries, DEFAULT_CATEGORY)
}
