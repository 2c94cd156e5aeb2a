// src/config/config_types.rs
//
// Config types for the app.
// Every field defaults to the stock animation, so a partial config.toml is valid.

use nannou::prelude::*;
use rand::Rng;
use serde::Deserialize;

use super::ConfigError;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: String::from("shatter"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PathConfig {
    pub image_file: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            image_file: String::from("image.png"),
        }
    }
}

/// What shows through wherever the pieces are not.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackdropConfig {
    pub color: [u8; 3],
    pub message: String,
    pub message_color: [u8; 3],
    pub font_size: u32,
    pub font_file: String, // empty uses the built-in font, which has Latin glyphs only
    pub dismiss_on_click: bool,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            color: [255, 255, 255],
            message: String::from("Happy April Fools' Day!"),
            message_color: [0, 0, 0],
            font_size: 64,
            font_file: String::new(),
            dismiss_on_click: true,
        }
    }
}

/************************* Shatter Configs ********************/

/// Everything the pieces and the animator share. Read-only once built.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ShatterConfig {
    pub piece: PieceConfig,
    pub physics: PhysicsConfig,
    pub timing: TimingConfig,
    pub style: StyleConfig,
}

impl ShatterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.piece.size.is_nan() || self.piece.size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "piece size must be positive, got {}",
                self.piece.size
            )));
        }
        if !self.physics.time_step_divisor.is_finite() || self.physics.time_step_divisor == 0.0 {
            return Err(ConfigError::Invalid(format!(
                "time_step_divisor must be finite and non-zero, got {}",
                self.physics.time_step_divisor
            )));
        }
        if !self.physics.gravity.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "gravity must be finite, got {}",
                self.physics.gravity
            )));
        }
        if !self.physics.bounce.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "bounce must be finite, got {}",
                self.physics.bounce
            )));
        }
        if self.timing.activation_frames == 0 {
            return Err(ConfigError::Invalid(String::from(
                "activation_frames must be at least 1",
            )));
        }
        if self.timing.fade_frames == 0 {
            return Err(ConfigError::Invalid(String::from(
                "fade_frames must be at least 1",
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PieceConfig {
    pub size: f32,
    pub palette: Palette,
}

impl Default for PieceConfig {
    fn default() -> Self {
        Self {
            size: 20.0,
            palette: Palette::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub time_step_divisor: f32, // gravity is applied as gravity / divisor per tick
    pub bounce: f32,
    pub surface_resistance: f32, // horizontal friction while resting on the floor
    pub rest_threshold: f32,
}

impl PhysicsConfig {
    pub fn acceleration_per_tick(&self) -> f32 {
        self.gravity / self.time_step_divisor
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            time_step_divisor: 20.0,
            bounce: 0.3,
            surface_resistance: 0.999,
            rest_threshold: 0.1,
        }
    }
}

/// Frame thresholds, all counted in ticks.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TimingConfig {
    pub activation_frames: u32, // global frames over which the stagger runs
    pub fade_delay: u32,        // local frames before physics and fade begin
    pub fade_frames: u32,       // local frames for the overlay to reach full alpha
    pub retire_after: u32,      // local frame past which a piece is no longer drawn
}

impl TimingConfig {
    /// Alpha of the flat color overlay for a piece at `local_frame`.
    pub fn overlay_alpha(&self, local_frame: u32) -> f32 {
        if local_frame > self.fade_delay + self.fade_frames {
            1.0
        } else if local_frame > self.fade_delay {
            (local_frame - self.fade_delay) as f32 / self.fade_frames as f32
        } else {
            0.0
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            activation_frames: 300,
            fade_delay: 30,
            fade_frames: 30,
            retire_after: 240,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StyleConfig {
    pub outline: [u8; 3],
}

impl StyleConfig {
    pub fn outline_color(&self) -> Rgb8 {
        let [r, g, b] = self.outline;
        rgb8(r, g, b)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            outline: [238, 238, 238],
        }
    }
}

/************************* Palette ********************/

/// A non-empty list of piece colors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<[u8; 3]>")]
pub struct Palette {
    colors: Vec<Rgb8>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb8>) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Uniformly pick one entry.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb8 {
        self.colors[rng.gen_range(0..self.colors.len())]
    }

    pub fn contains(&self, color: Rgb8) -> bool {
        self.colors.contains(&color)
    }

    pub fn colors(&self) -> &[Rgb8] {
        &self.colors
    }
}

impl TryFrom<Vec<[u8; 3]>> for Palette {
    type Error = ConfigError;

    fn try_from(raw: Vec<[u8; 3]>) -> Result<Self, Self::Error> {
        Palette::new(raw.into_iter().map(|[r, g, b]| rgb8(r, g, b)).collect())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                rgb8(248, 173, 42),
                rgb8(80, 180, 174),
                rgb8(26, 143, 252),
                rgb8(150, 187, 222),
                rgb8(58, 72, 151),
                rgb8(61, 107, 235),
                rgb8(105, 215, 252),
                rgb8(38, 38, 38),
                rgb8(241, 121, 73),
            ],
        }
    }
}
