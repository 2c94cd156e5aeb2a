// src/animation/shatter.rs
//
// The shatter animation driver.
//
// Owns the shuffled grid of pieces and the global frame counter. The host
// calls `tick` once per displayed frame; each tick clears the surface,
// activates the next slice of pieces, steps their physics and draws them.

use nannou::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::ShatterConfig;
use crate::models::Piece;
use crate::render::{DrawSurface, Region};

pub struct ShatterAnimator {
    pieces: Vec<Piece>,
    global_frame: u64,
    width: f32,
    height: f32,
    config: ShatterConfig,
}

impl ShatterAnimator {
    pub fn new<R: Rng + ?Sized>(
        width: f32,
        height: f32,
        config: ShatterConfig,
        rng: &mut R,
    ) -> Self {
        let pieces = Self::build_grid(width, height, &config, rng);
        log::info!(
            "Shattered {}x{} surface into {} pieces of {}px",
            width,
            height,
            pieces.len(),
            config.piece.size
        );

        Self {
            pieces,
            global_frame: 0,
            width,
            height,
            config,
        }
    }

    /// One piece per cell, in random order.
    ///
    /// Cells are laid out column by column; a partial trailing column or row
    /// still gets a piece so the whole surface is covered. The shuffle decides
    /// the activation order, not the layout.
    pub fn build_grid<R: Rng + ?Sized>(
        width: f32,
        height: f32,
        config: &ShatterConfig,
        rng: &mut R,
    ) -> Vec<Piece> {
        let size = config.piece.size;
        let columns = cell_count(width, size);
        let rows = cell_count(height, size);
        let mut pieces = Vec::with_capacity(columns * rows);

        for x in 0..columns {
            for y in 0..rows {
                let velocity = vec2(scatter_speed(rng), scatter_speed(rng));
                pieces.push(Piece::new(
                    x as f32 * size,
                    y as f32 * size,
                    velocity,
                    vec2(0.0, config.physics.gravity),
                    &config.piece,
                    rng,
                ));
            }
        }

        pieces.shuffle(rng);
        pieces
    }

    /// Whether the piece at `index` in the stagger order is due to switch on at `frame`.
    pub fn is_activation_due(&self, index: usize, frame: u64) -> bool {
        stagger_reached(
            index,
            self.pieces.len(),
            frame,
            self.config.timing.activation_frames,
        )
    }

    pub fn tick<S: DrawSurface>(&mut self, surface: &mut S) {
        let timing = &self.config.timing;
        let physics = &self.config.physics;
        let outline = self.config.style.outline_color();
        let frame = self.global_frame;

        surface.clear_rect(Region::new(0.0, 0.0, self.width, self.height));

        let retired_before = self.retired_count();
        let count = self.pieces.len();

        for (index, piece) in self.pieces.iter_mut().enumerate() {
            if piece.local_frame() > timing.retire_after {
                continue;
            }

            if stagger_reached(index, count, frame, timing.activation_frames) {
                piece.activate();
            }

            if piece.local_frame() > timing.fade_delay {
                piece.step(self.width, self.height, physics);
            }

            let region = piece.region();
            surface.draw_image_region(piece.source_region(), region);

            if piece.is_active() {
                // alpha comes from the clock before this frame's increment
                let alpha = timing.overlay_alpha(piece.local_frame());
                piece.advance_clock();
                surface.stroke_rect(region, outline);
                surface.fill_rect(region, piece.color(), alpha);
            }
        }

        self.global_frame += 1;

        if retired_before < self.pieces.len() && self.is_finished() {
            log::debug!("All pieces retired after {} frames", self.global_frame);
        }
    }

    pub fn global_frame(&self) -> u64 {
        self.global_frame
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn active_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_active()).count()
    }

    /// Pieces that are no longer drawn or stepped.
    pub fn retired_count(&self) -> usize {
        let retire_after = self.config.timing.retire_after;
        self.pieces
            .iter()
            .filter(|p| p.local_frame() > retire_after)
            .count()
    }

    pub fn is_finished(&self) -> bool {
        self.retired_count() == self.pieces.len()
    }

    pub fn config(&self) -> &ShatterConfig {
        &self.config
    }
}

// During the warm-up a growing prefix of the stagger order switches on:
// index < count * frame / duration. After it, everyone does.
fn stagger_reached(index: usize, count: usize, frame: u64, duration: u32) -> bool {
    let duration = duration as u64;
    if frame >= duration {
        return true;
    }
    (index as f64) < count as f64 * frame as f64 / duration as f64
}

fn cell_count(extent: f32, size: f32) -> usize {
    (extent / size).ceil().max(0.0) as usize
}

// ((r * 100) mod 50 - 25) / 10 for r in [0, 1), giving [-2.5, 2.5)
fn scatter_speed<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    ((rng.gen::<f32>() * 100.0) % 50.0 - 25.0) / 10.0
}
