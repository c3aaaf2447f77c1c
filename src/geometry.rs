//! Grid-space to pixel-space coordinate mapping
//!
//! Source data addresses cells in an integer grid whose Y axis grows
//! upward; the output raster's Y axis grows downward. The mapper scales a
//! viewport of the grid onto the full image and flips Y.

use crate::error::MapError;

/// Grid-space bounds of the rendered viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub start_x: i32,
    pub start_y: i32,
    pub end_x: i32,
    pub end_y: i32,
}

impl Viewport {
    pub fn new(start_x: i32, start_y: i32, end_x: i32, end_y: i32) -> Self {
        Viewport {
            start_x,
            start_y,
            end_x,
            end_y,
        }
    }

    pub fn grid_width(&self) -> i32 {
        self.end_x - self.start_x
    }

    pub fn grid_height(&self) -> i32 {
        self.end_y - self.start_y
    }
}

/// Maps grid coordinates and shape dimensions into pixel space for a
/// fixed viewport and output resolution.
#[derive(Debug, Clone, Copy)]
pub struct GridMapper {
    viewport: Viewport,
    img_h: f32,
    scale_x: f32,
    scale_y: f32,
}

impl GridMapper {
    /// Fails fast on a degenerate viewport rather than dividing by zero.
    pub fn new(viewport: Viewport, img_w: u32, img_h: u32) -> Result<Self, MapError> {
        if viewport.grid_width() == 0 || viewport.grid_height() == 0 {
            return Err(MapError::Geometry(format!(
                "viewport ({}, {}) -> ({}, {}) has zero grid width or height",
                viewport.start_x, viewport.start_y, viewport.end_x, viewport.end_y
            )));
        }
        Ok(GridMapper {
            viewport,
            img_h: img_h as f32,
            scale_x: img_w as f32 / viewport.grid_width() as f32,
            scale_y: img_h as f32 / viewport.grid_height() as f32,
        })
    }

    pub fn scale_x(&self) -> f32 {
        self.scale_x
    }

    pub fn scale_y(&self) -> f32 {
        self.scale_y
    }

    /// Map a grid cell to pixel space. Y is inverted: the viewport's
    /// bottom edge lands at the image's bottom row.
    pub fn to_pixel(&self, cell_x: i32, cell_y: i32) -> (f32, f32) {
        let px = (cell_x - self.viewport.start_x) as f32 * self.scale_x;
        let py = self.img_h - (cell_y - self.viewport.start_y) as f32 * self.scale_y;
        (px, py)
    }

    /// Circle radii use the averaged scale, since a circle has no
    /// independent width and height.
    pub fn scale_radius(&self, radius: f32) -> f32 {
        radius * (self.scale_x + self.scale_y) / 2.0
    }

    pub fn scale_size(&self, width: f32, height: f32) -> (f32, f32) {
        (width * self.scale_x, height * self.scale_y)
    }
}
