// src/models/piece.rs
//
// One grid cell of the shattered image.
//
// A piece remembers where its sample came from in the image and carries
// its own position, velocity and acceleration. Physics advances one tick
// per `step`, bouncing off the walls of the bounding region.

use nannou::prelude::*;
use rand::Rng;

use crate::config::{PhysicsConfig, PieceConfig};
use crate::render::Region;

#[derive(Debug, Clone)]
pub struct Piece {
    pub position: Vec2,
    // overwritten with `position` right after every integration, nothing reads it
    pub previous_position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,

    source: Vec2,
    size: f32,
    color: Rgb8,

    active: bool,
    pub(crate) local_frame: u32,
}

impl Piece {
    pub fn new<R: Rng + ?Sized>(
        x: f32,
        y: f32,
        velocity: Vec2,
        acceleration: Vec2,
        config: &PieceConfig,
        rng: &mut R,
    ) -> Self {
        let origin = vec2(x, y);
        Self {
            position: origin,
            previous_position: origin,
            velocity,
            acceleration,
            source: origin,
            size: config.size,
            color: config.palette.pick(rng),
            active: false,
            local_frame: 0,
        }
    }

    /// Advance one tick: gravity, then walls, then velocity, then position.
    ///
    /// Walls are checked against the position from the previous tick, so a
    /// piece is drawn one tick past the floor before it bounces.
    pub fn step(&mut self, bounds_width: f32, bounds_height: f32, physics: &PhysicsConfig) {
        self.reset_acceleration(physics);
        self.resolve_collisions(bounds_width, bounds_height, physics);
        self.integrate();
    }

    pub fn reset_acceleration(&mut self, physics: &PhysicsConfig) {
        self.acceleration.y = physics.acceleration_per_tick();
    }

    pub fn resolve_collisions(
        &mut self,
        bounds_width: f32,
        bounds_height: f32,
        physics: &PhysicsConfig,
    ) {
        let floor = bounds_height - self.size;
        let right = bounds_width - self.size;

        if self.position.y >= floor {
            self.position.y = floor;
            self.velocity.y *= -physics.bounce;
            if self.velocity.y > -physics.rest_threshold
                && self.velocity.y < physics.rest_threshold
            {
                // resting on the floor, slide to a stop
                self.velocity.y = 0.0;
                self.velocity.x *= physics.surface_resistance;
                if self.velocity.x.abs() <= physics.rest_threshold {
                    self.velocity.x = 0.0;
                }
            }
        } else if self.position.y <= self.size {
            self.position.y = self.size;
            self.velocity.y *= -physics.bounce;
        }

        if self.position.x <= self.size {
            self.position.x = self.size;
            self.velocity.x *= -physics.bounce;
        } else if self.position.x >= right {
            self.position.x = right;
            self.velocity.x *= -physics.bounce;
        }
    }

    pub fn integrate(&mut self) {
        self.velocity += self.acceleration;
        self.position += self.velocity;
        self.previous_position = self.position;
    }

    /// One-way switch, never reverts.
    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn local_frame(&self) -> u32 {
        self.local_frame
    }

    pub(crate) fn advance_clock(&mut self) {
        self.local_frame += 1;
    }

    pub fn color(&self) -> Rgb8 {
        self.color
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn source(&self) -> Vec2 {
        self.source
    }

    /// Where the sample is taken from in the image.
    pub fn source_region(&self) -> Region {
        Region::square(self.source, self.size)
    }

    /// Where the piece is drawn this tick.
    pub fn region(&self) -> Region {
        Region::square(self.position, self.size)
    }
}
