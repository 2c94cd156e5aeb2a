// src/render/recording.rs
//
// Test double that keeps every draw call in order.

use nannou::prelude::*;

use super::{DrawSurface, Region};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Region),
    Image { source: Region, target: Region },
    Stroke(Region, Rgb8),
    Fill(Region, Rgb8, f32),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Image draws whose sample comes from `source`.
    pub fn images_from(&self, source: Region) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Image { source: s, .. } if *s == source))
            .count()
    }

    pub fn fills(&self) -> Vec<(Region, Rgb8, f32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Fill(region, color, alpha) => Some((*region, *color, *alpha)),
                _ => None,
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn clear_rect(&mut self, region: Region) {
        self.calls.push(DrawCall::Clear(region));
    }

    fn draw_image_region(&mut self, source: Region, target: Region) {
        self.calls.push(DrawCall::Image { source, target });
    }

    fn stroke_rect(&mut self, region: Region, color: Rgb8) {
        self.calls.push(DrawCall::Stroke(region, color));
    }

    fn fill_rect(&mut self, region: Region, color: Rgb8, alpha: f32) {
        self.calls.push(DrawCall::Fill(region, color, alpha));
    }
}
