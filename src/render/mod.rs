// src/render/mod.rs
// The drawing surface abstraction and its nannou backend

pub mod nannou_surface;
pub mod surface;

#[cfg(test)]
pub(crate) mod recording;

pub use nannou_surface::{load_font, missing_glyphs, Backdrop, NannouSurface};
pub use surface::{DrawSurface, Region};
