// src/config/config_load.rs
//
// loading of config.toml

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::config_types::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub paths: PathConfig,
    pub backdrop: BackdropConfig,
    pub shatter: ShatterConfig,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        // First try to load from the executable's directory
        if let Some(exe_config) = Self::load_from_exe_dir() {
            return exe_config;
        }

        // Fallback to loading from the current working directory
        log::info!("No config next to the executable, trying working directory");
        Self::load_from_path(Path::new("config.toml"))
    }

    fn load_from_exe_dir() -> Option<Result<Self, ConfigError>> {
        let config_path = exe_dir()?.join("config.toml");

        if config_path.exists() {
            log::info!("Loading config from {}", config_path.display());
            Some(Self::load_from_path(&config_path))
        } else {
            None
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.shatter.validate()?;
        Ok(config)
    }

    pub fn resolve_image_path(&self) -> PathBuf {
        resolve_path(&self.paths.image_file)
    }

    /// `None` means the built-in font.
    pub fn resolve_font_path(&self) -> Option<PathBuf> {
        if self.backdrop.font_file.is_empty() {
            None
        } else {
            Some(resolve_path(&self.backdrop.font_file))
        }
    }
}

fn resolve_path(file: &str) -> PathBuf {
    let file = Path::new(file);
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        // If path is relative, resolve it relative to the executable or working directory
        exe_dir()
            .map(|dir| dir.join(file))
            .filter(|path| path.exists())
            .unwrap_or_else(|| file.to_path_buf())
    }
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.shatter.piece.size, 20.0);
        assert_eq!(config.shatter.timing.activation_frames, 300);
        assert_eq!(config.shatter.timing.retire_after, 240);
        assert_eq!(config.shatter.physics.bounce, 0.3);
        assert_eq!(config.shatter.piece.palette.colors().len(), 9);
        assert_eq!(config.paths.image_file, "image.png");
    }

    #[test]
    fn test_partial_sections_override() {
        let content = r#"
            [window]
            width = 800

            [shatter.piece]
            size = 10.0
            palette = [[1, 2, 3]]

            [shatter.timing]
            retire_after = 120
        "#;
        let config = Config::from_toml(content).unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.shatter.piece.size, 10.0);
        assert_eq!(config.shatter.piece.palette.colors(), &[rgb8(1, 2, 3)]);
        assert_eq!(config.shatter.timing.retire_after, 120);
        assert_eq!(config.shatter.timing.fade_delay, 30);
    }

    #[test]
    fn test_empty_palette_is_rejected() {
        let content = r#"
            [shatter.piece]
            palette = []
        "#;
        assert!(matches!(
            Config::from_toml(content),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_size_is_rejected() {
        let content = r#"
            [shatter.piece]
            size = -5.0
        "#;
        assert!(matches!(
            Config::from_toml(content),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_absolute_image_path_is_kept() {
        let mut config = Config::default();
        let absolute = std::env::temp_dir().join("shatter.png");
        config.paths.image_file = absolute.to_string_lossy().into_owned();
        assert_eq!(config.resolve_image_path(), absolute);
    }

    #[test]
    fn test_font_path_resolution() {
        let mut config = Config::default();
        assert_eq!(config.resolve_font_path(), None);

        let absolute = std::env::temp_dir().join("shatter-font.ttf");
        config.backdrop.font_file = absolute.to_string_lossy().into_owned();
        assert_eq!(config.resolve_font_path(), Some(absolute));

        // A relative file that is not next to the executable stays as written
        let content = r#"
            [backdrop]
            font_file = "fonts/missing-cjk.otf"
        "#;
        let config = Config::from_toml(content).unwrap();
        assert_eq!(
            config.resolve_font_path(),
            Some(PathBuf::from("fonts/missing-cjk.otf"))
        );
    }
}
