//! Per-region transparent layers and alpha compositing
//!
//! Every region draws its cells onto its own transparent surface sized to
//! the background; the surfaces are then alpha-blended over the background
//! in dataset order. Layers are keyed by region identifier alone, so a
//! region id appearing under two categories shares one layer.

use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_ellipse_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;
use indexmap::IndexMap;

use crate::color;
use crate::config::{Cell, RegionsConfig, Shape};
use crate::error::MapError;
use crate::geometry::GridMapper;

/// Draw a filled circle bounded by `[center - r, center + r]`.
pub fn draw_circle(layer: &mut RgbaImage, center: (f32, f32), radius: f32, fill: Rgba<u8>) {
    let r = radius.round() as i32;
    draw_filled_ellipse_mut(
        layer,
        (center.0.round() as i32, center.1.round() as i32),
        r,
        r,
        fill,
    );
}

/// Draw a filled rectangle from the anchor to `anchor + (width, height)`.
pub fn draw_rectangle(
    layer: &mut RgbaImage,
    anchor: (f32, f32),
    width: f32,
    height: f32,
    fill: Rgba<u8>,
) {
    let w = (width.round() as i64).max(1) as u32;
    let h = (height.round() as i64).max(1) as u32;
    let rect = Rect::at(anchor.0.round() as i32, anchor.1.round() as i32).of_size(w, h);
    draw_filled_rect_mut(layer, rect, fill);
}

/// Render one cell onto a layer using the mapper's pixel geometry.
pub fn draw_cell(layer: &mut RgbaImage, mapper: &GridMapper, cell: &Cell, fill: Rgba<u8>) {
    let anchor = mapper.to_pixel(cell.x, cell.y);
    match cell.shape {
        Shape::Circle { radius } => {
            draw_circle(layer, anchor, mapper.scale_radius(radius), fill);
        }
        Shape::Rectangle { width, height } => {
            let (w, h) = mapper.scale_size(width, height);
            draw_rectangle(layer, anchor, w, h, fill);
        }
    }
}

/// Build one transparent layer per region that has cells to draw.
///
/// Layers are allocated lazily on the first drawn cell, so regions with
/// empty location lists cost nothing and leave the composite untouched.
pub fn build_layers(
    config: &RegionsConfig,
    mapper: &GridMapper,
    img_w: u32,
    img_h: u32,
) -> Result<IndexMap<String, RgbaImage>, MapError> {
    let mut layers: IndexMap<String, RgbaImage> = IndexMap::new();

    for regions in config.0.values() {
        for (region_id, info) in regions {
            if info.locations.is_empty() {
                continue;
            }
            println!("region {}", region_id);
            let fill = color::resolve(region_id, info.color.as_deref())?;
            let layer = layers
                .entry(region_id.clone())
                .or_insert_with(|| RgbaImage::new(img_w, img_h));
            for cell in &info.locations {
                draw_cell(layer, mapper, cell, fill);
            }
        }
    }
    Ok(layers)
}

/// Alpha-composite every layer over the background in insertion order.
/// Where layers overlap, later layers visually dominate in proportion to
/// their alpha.
pub fn composite(background: &mut RgbaImage, layers: &IndexMap<String, RgbaImage>) {
    for layer in layers.values() {
        imageops::overlay(background, layer, 0, 0);
    }
}
