use crate::{
    constants::{DEFAULT_FPS, DEFAULT_GIF_OUTPUT, DEFAULT_HEIGHT, DEFAULT_INPUT, DEFAULT_WIDTH},
    csv_reader::LoadOptions,
    error::{Result, VizError},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const MIN_CANVAS_PX: u32 = 200;
const MAX_FPS: u32 = 100;
const MAX_GIF_SPEED: i32 = 30;

/// Top-level settings, every table optional in the file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub animation: AnimationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    pub input: PathBuf,
    /// Treat the source "Latitude"/"Longitude" headers as transposed
    pub swap_coordinates: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            swap_coordinates: true,
        }
    }
}

impl DataConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            swap_coordinates: self.swap_coordinates,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// per-frame marker alpha is drawn from [alpha_min, alpha_max]
    pub alpha_min: f32,
    pub alpha_max: f32,
    pub line_alpha: f32,
    pub line_width: f32,
    /// multiplier on the marker radius derived from `visual`
    pub marker_scale: f32,
    /// GIF quantizer speed, 1 (best) ..= 30 (fastest)
    pub gif_speed: i32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fps: DEFAULT_FPS,
            alpha_min: 0.3,
            alpha_max: 1.0,
            line_alpha: 0.6,
            line_width: 1.0,
            marker_scale: 0.6,
            gif_speed: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub gif: PathBuf,
    /// derived cleaned table
    pub csv: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            gif: PathBuf::from(DEFAULT_GIF_OUTPUT),
            csv: None,
            json: None,
        }
    }
}

impl Config {
    /// Load from a TOML file and validate
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            VizError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            VizError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let a = &self.animation;

        if !(a.alpha_min > 0.0 && a.alpha_min <= a.alpha_max && a.alpha_max <= 1.0) {
            return Err(VizError::Config(format!(
                "alpha range must satisfy 0 < alpha_min <= alpha_max <= 1, got [{}, {}]",
                a.alpha_min, a.alpha_max
            )));
        }

        if !(a.line_alpha > 0.0 && a.line_alpha <= 1.0) {
            return Err(VizError::Config(format!(
                "line_alpha must be in (0, 1], got {}",
                a.line_alpha
            )));
        }

        if a.fps == 0 || a.fps > MAX_FPS {
            return Err(VizError::Config(format!(
                "fps must be between 1 and {}, got {}",
                MAX_FPS, a.fps
            )));
        }

        if a.width < MIN_CANVAS_PX || a.height < MIN_CANVAS_PX {
            return Err(VizError::Config(format!(
                "canvas must be at least {0}x{0}px, got {1}x{2}",
                MIN_CANVAS_PX, a.width, a.height
            )));
        }

        if !(1..=MAX_GIF_SPEED).contains(&a.gif_speed) {
            return Err(VizError::Config(format!(
                "gif_speed must be between 1 and {}, got {}",
                MAX_GIF_SPEED, a.gif_speed
            )));
        }

        if !(a.marker_scale > 0.0 && a.line_width > 0.0) {
            return Err(VizError::Config(format!(
                "marker_scale and line_width must be positive, got {} and {}",
                a.marker_scale, a.line_width
            )));
        }

        Ok(())
    }
}
