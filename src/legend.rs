//! Color-coded legend rendering
//!
//! One swatch + label row per region, stacked down the right side of the
//! image. Each category gets its own transparent overlay, composited like
//! a region layer, so regions sharing a name across categories still show
//! as separate rows.

use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::color;
use crate::config::{RegionInfo, RegionsConfig};
use crate::error::MapError;

/// Fixed TrueType font asset for legend labels.
pub const FONT_PATH: &str = "assets/ARIAL.TTF";
/// Legend text size in pixels.
pub const FONT_SIZE: f32 = 64.0;
/// Gap between the swatch and the label, and between rows.
pub const PADDING: u32 = 10;
/// Horizontal start position as a fraction of the image width.
pub const X_START_FRACTION: f32 = 0.85;
/// Vertical start position in pixels.
pub const Y_START: u32 = 100;

const TEXT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Load the legend font. A missing or invalid font file is a fatal
/// startup error.
pub fn load_font(path: &Path) -> Result<FontVec, MapError> {
    let bytes = std::fs::read(path)
        .map_err(|e| MapError::Asset(format!("cannot read font {}: {}", path.display(), e)))?;
    FontVec::try_from_vec(bytes)
        .map_err(|_| MapError::Asset(format!("invalid font file {}", path.display())))
}

/// Display name for a legend row: the region's name, or its identifier,
/// with a literal trailing " Region" stripped.
pub fn display_name<'a>(region_id: &'a str, info: &'a RegionInfo) -> &'a str {
    let name = info.name.as_deref().unwrap_or(region_id);
    name.strip_suffix(" Region").unwrap_or(name)
}

/// Top-left corner of the swatch for a given legend row.
fn row_origin(img_w: u32, row: u32) -> (i32, i32) {
    let x = (img_w as f32 * X_START_FRACTION) as i32;
    let y = Y_START + row * (FONT_SIZE as u32 + PADDING);
    (x, y as i32)
}

/// Draw the legend over the composited image, one overlay per category.
pub fn draw_legend(
    img: &mut RgbaImage,
    config: &RegionsConfig,
    font: &FontVec,
) -> Result<(), MapError> {
    let (img_w, img_h) = img.dimensions();
    let swatch = FONT_SIZE as u32;
    // Row index runs on across categories so overlays never overprint
    let mut row = 0u32;

    for regions in config.0.values() {
        let mut overlay = RgbaImage::new(img_w, img_h);
        for (region_id, info) in regions {
            let fill = color::resolve(region_id, info.color.as_deref())?;
            let (x, y) = row_origin(img_w, row);

            draw_filled_rect_mut(&mut overlay, Rect::at(x, y).of_size(swatch, swatch), fill);
            draw_text_mut(
                &mut overlay,
                TEXT_COLOR,
                x + (swatch + PADDING) as i32,
                y,
                PxScale::from(FONT_SIZE),
                font,
                display_name(region_id, info),
            );
            row += 1;
        }
        imageops::overlay(img, &overlay, 0, 0);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn info(name: Option<&str>) -> RegionInfo {
        RegionInfo {
            name: name.map(str::to_string),
            color: None,
            locations: Vec::new(),
        }
    }

    #[test]
    fn test_display_name_strips_region_suffix() {
        let i = info(Some("Ascadian Isles Region"));
        assert_eq!(display_name("AI", &i), "Ascadian Isles");
    }

    #[test]
    fn test_display_name_without_suffix_unchanged() {
        let i = info(Some("Sheogorad"));
        assert_eq!(display_name("SH", &i), "Sheogorad");
    }

    #[test]
    fn test_display_name_falls_back_to_identifier() {
        let i = info(None);
        assert_eq!(display_name("West Gash Region", &i), "West Gash");
    }

    #[test]
    fn test_rows_stack_downward_from_right_edge() {
        let (x0, y0) = row_origin(400, 0);
        let (x1, y1) = row_origin(400, 1);
        assert_eq!(x0, 340);
        assert_eq!(y0, Y_START as i32);
        assert_eq!(x1, x0);
        assert_eq!(y1, y0 + (FONT_SIZE as u32 + PADDING) as i32);
    }

    #[test]
    fn test_missing_font_is_asset_error() {
        let err = load_font(Path::new("/nonexistent/font.ttf")).unwrap_err();
        assert!(matches!(err, MapError::Asset(_)));
    }

    fn test_font() -> FontVec {
        let path =
            Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fonts/DejaVuSans.ttf");
        load_font(&path).unwrap()
    }

    fn one_region(color: &str) -> IndexMap<String, RegionInfo> {
        let mut regions = IndexMap::new();
        regions.insert(
            "R1".to_string(),
            RegionInfo {
                name: None,
                color: Some(color.to_string()),
                locations: Vec::new(),
            },
        );
        regions
    }

    #[test]
    fn test_draw_legend_renders_swatch_and_label() {
        let font = test_font();
        let mut categories = IndexMap::new();
        categories.insert("Region".to_string(), one_region("#FF0000FF"));
        let config = RegionsConfig(categories);

        let white = Rgba([255, 255, 255, 255]);
        let mut img = RgbaImage::from_pixel(1000, 600, white);
        draw_legend(&mut img, &config, &font).unwrap();

        // Row 0 swatch starts at (850, 100) for a 1000px-wide image
        let (x, y) = row_origin(1000, 0);
        assert_eq!((x, y), (850, 100));
        assert_eq!(*img.get_pixel(860, 110), Rgba([255, 0, 0, 255]));
        // Above the legend the background is untouched
        assert_eq!(*img.get_pixel(860, 50), white);

        // The "R1" label leaves dark glyph pixels right of the swatch
        let text_x0 = (x + (FONT_SIZE as u32 + PADDING) as i32) as u32;
        let label_drawn = (text_x0..1000)
            .flat_map(|px| (y as u32..y as u32 + FONT_SIZE as u32).map(move |py| (px, py)))
            .any(|(px, py)| img.get_pixel(px, py).0[0] < 128);
        assert!(label_drawn, "no glyph pixels found for the label");
    }

    #[test]
    fn test_shared_name_across_categories_gets_two_rows() {
        let font = test_font();
        let mut categories = IndexMap::new();
        categories.insert("Region".to_string(), one_region("#FF0000FF"));
        categories.insert("Zone".to_string(), one_region("#0000FFFF"));
        let config = RegionsConfig(categories);

        let mut img = RgbaImage::from_pixel(1000, 600, Rgba([255, 255, 255, 255]));
        draw_legend(&mut img, &config, &font).unwrap();

        // One row per category, stacked by a full row height
        let (x0, y0) = row_origin(1000, 0);
        let (x1, y1) = row_origin(1000, 1);
        assert_eq!((x1, y1), (x0, y0 + (FONT_SIZE as u32 + PADDING) as i32));
        assert_eq!(*img.get_pixel(860, 110), Rgba([255, 0, 0, 255]));
        assert_eq!(
            *img.get_pixel(860, y1 as u32 + 10),
            Rgba([0, 0, 255, 255])
        );
    }
}
