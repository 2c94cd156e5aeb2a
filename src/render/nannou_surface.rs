// src/render/nannou_surface.rs
//
// DrawSurface on top of a nannou Draw.
// nannou puts the origin at the window centre with y pointing up, so every
// region is flipped and shifted on the way in.

use nannou::geom;
use nannou::prelude::*;
use nannou::text::{self, Font};
use std::path::Path;

use super::{DrawSurface, Region};

/// The layer underneath the pieces, painted on every clear.
#[derive(Clone)]
pub struct Backdrop {
    pub color: Rgb8,
    pub message: String,
    pub message_color: Rgb8,
    pub font_size: u32,
    pub font: Font,
}

/// Load the backdrop font, or the built-in one when there is no path or the
/// file can't be read.
pub fn load_font(path: Option<&Path>) -> Font {
    let Some(path) = path else {
        return text::font::default_notosans();
    };
    match text::font::from_file(path) {
        Ok(font) => {
            log::info!("Loaded font {}", path.display());
            font
        }
        Err(err) => {
            log::warn!(
                "Could not load font {}: {:?}; using the built-in font",
                path.display(),
                err
            );
            text::font::default_notosans()
        }
    }
}

/// Characters of `message` that `font` has no glyph for. Whitespace is skipped.
pub fn missing_glyphs(font: &Font, message: &str) -> Vec<char> {
    message
        .chars()
        .filter(|c| !c.is_whitespace())
        .filter(|c| font.glyph(*c).id().0 == 0)
        .collect()
}

pub struct NannouSurface<'a> {
    draw: &'a Draw,
    image: Option<&'a wgpu::Texture>,
    bounds: Vec2,
    backdrop: &'a Backdrop,
    outline_weight: f32,
}

impl<'a> NannouSurface<'a> {
    pub fn new(
        draw: &'a Draw,
        image: Option<&'a wgpu::Texture>,
        bounds: Vec2,
        backdrop: &'a Backdrop,
    ) -> Self {
        Self {
            draw,
            image,
            bounds,
            backdrop,
            outline_weight: 1.0,
        }
    }
}

impl DrawSurface for NannouSurface<'_> {
    fn clear_rect(&mut self, region: Region) {
        let rect = to_nannou_rect(region, self.bounds);
        self.draw
            .rect()
            .xy(rect.xy())
            .wh(rect.wh())
            .color(to_srgba(self.backdrop.color, 1.0));

        if !self.backdrop.message.is_empty() {
            self.draw
                .text(&self.backdrop.message)
                .xy(rect.xy())
                .wh(rect.wh())
                .font(self.backdrop.font.clone())
                .font_size(self.backdrop.font_size)
                .align_text_middle_y()
                .color(to_srgba(self.backdrop.message_color, 1.0));
        }
    }

    fn draw_image_region(&mut self, source: Region, target: Region) {
        // a missing image leaves the square empty
        let Some(texture) = self.image else {
            return;
        };
        let [image_w, image_h] = texture.size();
        let area = to_texture_area(source, vec2(image_w as f32, image_h as f32));
        let rect = to_nannou_rect(target, self.bounds);

        self.draw
            .texture(texture)
            .area(area)
            .xy(rect.xy())
            .wh(rect.wh());
    }

    fn stroke_rect(&mut self, region: Region, color: Rgb8) {
        let rect = to_nannou_rect(region, self.bounds);
        self.draw
            .rect()
            .xy(rect.xy())
            .wh(rect.wh())
            .no_fill()
            .stroke(to_srgba(color, 1.0))
            .stroke_weight(self.outline_weight);
    }

    fn fill_rect(&mut self, region: Region, color: Rgb8, alpha: f32) {
        let rect = to_nannou_rect(region, self.bounds);
        self.draw
            .rect()
            .xy(rect.xy())
            .wh(rect.wh())
            .color(to_srgba(color, alpha));
    }
}

fn to_srgba(color: Rgb8, alpha: f32) -> Srgba {
    srgba(
        color.red as f32 / 255.0,
        color.green as f32 / 255.0,
        color.blue as f32 / 255.0,
        alpha,
    )
}

/// Canvas region (top-left origin, y down) to a nannou rect (centred origin, y up).
pub fn to_nannou_rect(region: Region, bounds: Vec2) -> geom::Rect {
    let center = region.center();
    geom::Rect::from_x_y_w_h(
        center.x - bounds.x / 2.0,
        bounds.y / 2.0 - center.y,
        region.w,
        region.h,
    )
}

/// Image pixel region to normalised texture coordinates.
pub fn to_texture_area(source: Region, image_size: Vec2) -> geom::Rect {
    geom::Rect::from_corners(
        pt2(source.x / image_size.x, source.y / image_size.y),
        pt2(
            (source.x + source.w) / image_size.x,
            (source.y + source.h) / image_size.y,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackdropConfig;

    #[test]
    fn test_region_to_nannou_rect() {
        let bounds = vec2(100.0, 60.0);

        // Top-left square should land in the upper left quadrant
        let rect = to_nannou_rect(Region::new(0.0, 0.0, 20.0, 20.0), bounds);
        assert_eq!(rect.x(), -40.0);
        assert_eq!(rect.y(), 20.0);
        assert_eq!(rect.w(), 20.0);
        assert_eq!(rect.h(), 20.0);

        // Bottom-right square
        let rect = to_nannou_rect(Region::new(80.0, 40.0, 20.0, 20.0), bounds);
        assert_eq!(rect.x(), 40.0);
        assert_eq!(rect.y(), -20.0);

        // The full surface is centred on the origin
        let rect = to_nannou_rect(Region::new(0.0, 0.0, 100.0, 60.0), bounds);
        assert_eq!(rect.xy(), Vec2::ZERO);
        assert_eq!(rect.wh(), bounds);
    }

    #[test]
    fn test_texture_area_is_normalised() {
        let area = to_texture_area(Region::new(20.0, 40.0, 20.0, 20.0), vec2(100.0, 80.0));
        assert!((area.left() - 0.2).abs() < 1e-6);
        assert!((area.right() - 0.4).abs() < 1e-6);
        assert!((area.bottom() - 0.5).abs() < 1e-6);
        assert!((area.top() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_default_backdrop_message_has_glyphs() {
        let config = BackdropConfig::default();
        let font = load_font(None);
        assert_eq!(missing_glyphs(&font, &config.message), Vec::<char>::new());
    }

    #[test]
    fn test_missing_glyphs_reports_uncovered_characters() {
        let font = text::font::default_notosans();

        // The built-in font has no CJK glyphs
        let missing = missing_glyphs(&font, "愚人节快乐！");
        for c in ['愚', '人', '节', '快', '乐'] {
            assert!(missing.contains(&c), "Failed for {}", c);
        }
        assert_eq!(missing_glyphs(&font, "ok 愚"), vec!['愚']);
        assert!(missing_glyphs(&font, "Happy April Fools' Day!").is_empty());
    }

    #[test]
    fn test_unreadable_font_falls_back_to_built_in() {
        let path = std::env::temp_dir().join("shatter-no-such-font.ttf");
        let font = load_font(Some(&path));
        assert!(missing_glyphs(&font, "Happy").is_empty());
    }
}
