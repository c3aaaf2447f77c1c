//! End-to-end render pipeline
//!
//! Maps the viewport onto the background, draws every region onto its own
//! transparent layer, alpha-composites the layers in dataset order, and
//! finishes with the legend.

use ab_glyph::FontVec;
use image::RgbaImage;

use crate::config::RegionsConfig;
use crate::error::MapError;
use crate::geometry::{GridMapper, Viewport};
use crate::layers;
use crate::legend;

/// Fixed output file name, written to the working directory.
pub const OUTPUT_PATH: &str = "regions.png";

/// Composite every region onto the background, without the legend.
pub fn compose_regions(
    viewport: Viewport,
    mut background: RgbaImage,
    config: &RegionsConfig,
) -> Result<RgbaImage, MapError> {
    let (img_w, img_h) = background.dimensions();
    let mapper = GridMapper::new(viewport, img_w, img_h)?;

    println!("grid_width {}", viewport.grid_width());
    println!("grid_height {}", viewport.grid_height());
    println!("scale_x {}", mapper.scale_x());
    println!("scale_y {}", mapper.scale_y());

    let region_layers = layers::build_layers(config, &mapper, img_w, img_h)?;
    layers::composite(&mut background, &region_layers);
    Ok(background)
}

/// Render the full map: region layers plus legend.
pub fn render_map(
    viewport: Viewport,
    background: RgbaImage,
    config: &RegionsConfig,
    font: &FontVec,
) -> Result<RgbaImage, MapError> {
    let mut img = compose_regions(viewport, background, config)?;
    legend::draw_legend(&mut img, config, font)?;
    Ok(img)
}
