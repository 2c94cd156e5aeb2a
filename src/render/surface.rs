// src/render/surface.rs
//
// The drawing surface the animator paints on.
// Coordinates are canvas style: origin at the top-left, y grows downward.

use nannou::prelude::*;

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Region {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn square(top_left: Vec2, size: f32) -> Self {
        Self::new(top_left.x, top_left.y, size, size)
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

pub trait DrawSurface {
    /// Wipe `region` back to whatever sits behind the pieces.
    fn clear_rect(&mut self, region: Region);

    /// Copy the `source` pixels of the image into `target`.
    /// Implementations without a loaded image draw nothing.
    fn draw_image_region(&mut self, source: Region, target: Region);

    fn stroke_rect(&mut self, region: Region, color: Rgb8);

    /// Blend `color` at `alpha` over what is already drawn in `region`.
    fn fill_rect(&mut self, region: Region, color: Rgb8, alpha: f32);
}
