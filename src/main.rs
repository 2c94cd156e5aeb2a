// src/main.rs
use nannou::prelude::*;

use shatter::{
    animation::ShatterAnimator,
    config::{BackdropConfig, Config},
    render::{load_font, missing_glyphs, Backdrop, NannouSurface},
};

struct Model {
    // Core components:
    animator: ShatterAnimator,
    backdrop: Backdrop,
    bounds: Vec2,

    // Rendering components:
    draw: nannou::Draw,
    texture: Option<wgpu::Texture>,

    dismiss_on_click: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    // Load config
    let config = Config::load().unwrap_or_else(|err| {
        log::warn!("{}; falling back to default config", err);
        Config::default()
    });

    // Create window
    app.new_window()
        .title(config.window.title.clone())
        .size(config.window.width, config.window.height)
        .view(view)
        .mouse_pressed(mouse_pressed)
        .build()
        .expect("Failed to create window");

    // The surface size is read once, the grid never follows a resize
    let bounds = app.window_rect().wh();

    // Load the image to shatter
    let image_path = config.resolve_image_path();
    let texture = match wgpu::Texture::from_path(app, &image_path) {
        Ok(texture) => {
            log::info!("Loaded image {}", image_path.display());
            Some(texture)
        }
        Err(err) => {
            log::warn!("Could not load image {}: {}", image_path.display(), err);
            None
        }
    };

    let mut rng = rand::thread_rng();
    let animator = ShatterAnimator::new(bounds.x, bounds.y, config.shatter.clone(), &mut rng);

    Model {
        animator,
        backdrop: backdrop_from_config(&config),
        bounds,
        draw: nannou::Draw::new(),
        texture,
        dismiss_on_click: config.backdrop.dismiss_on_click,
    }
}

fn backdrop_from_config(config: &Config) -> Backdrop {
    let BackdropConfig {
        color: [r, g, b],
        message_color: [mr, mg, mb],
        ..
    } = config.backdrop;

    let font = load_font(config.resolve_font_path().as_deref());
    let missing = missing_glyphs(&font, &config.backdrop.message);
    if !missing.is_empty() {
        log::warn!(
            "Backdrop font has no glyphs for {:?}; set [backdrop] font_file to a font that does",
            missing.iter().collect::<String>()
        );
    }

    Backdrop {
        color: rgb8(r, g, b),
        message: config.backdrop.message.clone(),
        message_color: rgb8(mr, mg, mb),
        font_size: config.backdrop.font_size,
        font,
    }
}

fn mouse_pressed(app: &App, model: &mut Model, _button: MouseButton) {
    if model.dismiss_on_click {
        log::info!("Dismissed after {} frames", model.animator.global_frame());
        app.quit();
    }
}

fn update(_app: &App, model: &mut Model, _update: Update) {
    model.draw.reset();

    let mut surface = NannouSurface::new(
        &model.draw,
        model.texture.as_ref(),
        model.bounds,
        &model.backdrop,
    );
    model.animator.tick(&mut surface);
}

// Draw the state of Model into the given Frame
fn view(app: &App, model: &Model, frame: Frame) {
    if let Err(err) = model.draw.to_frame(app, &frame) {
        log::error!("Failed to render frame: {:?}", err);
    }
}
