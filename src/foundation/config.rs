use anyhow::Context as _;

use crate::foundation::core::{Canvas, Fps, Rgb, SceneSize};
use crate::foundation::error::{SceneError, SceneResult};

/// Scene-wide configuration record.
///
/// Constructors that take one of these settings accept `None` to defer to the values here.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frame rate of the emitted stream.
    pub fps: Fps,
    /// Default animation duration in seconds.
    pub animation_duration: f64,
    /// Logical scene size (the SVG viewBox), centred on the origin.
    pub scene_size: SceneSize,
    /// Physical frame size in pixels (the SVG width/height).
    pub frame_size: Canvas,
    /// Frame background color.
    pub background: Rgb,
    /// Default stroke color for new drawables.
    pub stroke_color: Rgb,
    /// Default stroke width for new drawables.
    pub stroke_width: f64,
    /// Default font family for text drawables.
    pub font_family: String,
    /// Default font size for text drawables.
    pub font_size: f64,
    /// Emit one frame before any animation has advanced.
    pub print_initial: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: Fps::default(),
            animation_duration: 0.5,
            scene_size: SceneSize {
                width: 1920.0,
                height: 1080.0,
            },
            frame_size: Canvas {
                width: 1920,
                height: 1080,
            },
            background: Rgb::BLACK,
            stroke_color: Rgb::WHITE,
            stroke_width: 2.0,
            font_family: "sans-serif".to_owned(),
            font_size: 32.0,
            print_initial: true,
        }
    }
}

impl Config {
    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let cfg: Config = serde_json::from_str(json).context("parse configuration JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate ranges that the frame loop relies on.
    pub fn validate(&self) -> SceneResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if !self.animation_duration.is_finite() || self.animation_duration < 0.0 {
            return Err(SceneError::validation(
                "animation_duration must be finite and >= 0",
            ));
        }
        if !(self.scene_size.width > 0.0 && self.scene_size.height > 0.0) {
            return Err(SceneError::validation("scene_size must be positive"));
        }
        if self.frame_size.width == 0 || self.frame_size.height == 0 {
            return Err(SceneError::validation("frame_size must be non-zero"));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(SceneError::validation("stroke_width must be finite and >= 0"));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(SceneError::validation("font_size must be finite and > 0"));
        }
        Ok(())
    }

    /// Resolve an optional duration against the default and convert it to a frame count.
    pub fn frames_for(&self, duration: Option<f64>) -> SceneResult<u32> {
        let secs = duration.unwrap_or(self.animation_duration);
        if !secs.is_finite() || secs < 0.0 {
            return Err(SceneError::validation(format!(
                "duration must be finite and >= 0, got {secs}"
            )));
        }
        Ok(self.fps.frames_for_secs(secs))
    }

    /// Seconds between two emitted frames.
    pub fn dt(&self) -> f64 {
        self.fps.frame_duration_secs()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
