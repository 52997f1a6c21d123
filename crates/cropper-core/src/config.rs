//! Tunable constants for a crop session.
//!
//! The defaults reproduce the reference cropper behavior exactly. A host may
//! override individual fields; missing fields deserialize to their defaults.

use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::error::CropperError;
use crate::render::InterpolationFilter;

/// Configuration for a crop session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropperConfig {
    /// Crop circle diameter as a fraction of the viewport width.
    pub canvas_fraction: f32,
    /// Lower bound for the image scale.
    pub min_scale: f32,
    /// Upper bound for the image scale.
    pub max_scale: f32,
    /// Scale at or above which a handle drag stops shrinking the guide.
    pub handle_scale_limit: f32,
    /// Scale decrement applied when a handle drag is converted to zoom-out.
    pub handle_zoom_step: f32,
    /// Maximum handle offset as a fraction of the canvas width.
    pub max_handle_fraction: f32,
    /// Duration of the settle animation after a handle release.
    pub settle_duration_ms: u32,
    /// Easing curve of the settle animation.
    pub easing: Easing,
    /// Duration of the grid fade in/out.
    pub grid_fade_ms: u32,
    /// Sampling filter used by the renderer.
    pub interpolation: InterpolationFilter,
    /// RGBA fill painted inside the crop circle before the image.
    pub background: [u8; 4],
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self {
            canvas_fraction: 0.85,
            min_scale: 0.5,
            max_scale: 4.0,
            handle_scale_limit: 3.0,
            handle_zoom_step: 0.05,
            max_handle_fraction: 0.5,
            settle_duration_ms: 300,
            easing: Easing::default(),
            grid_fade_ms: 150,
            interpolation: InterpolationFilter::default(),
            background: [0, 0, 0, 255],
        }
    }
}

impl CropperConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every bound is finite and consistently ordered.
    pub fn validate(&self) -> Result<(), CropperError> {
        let finite = [
            ("canvas_fraction", self.canvas_fraction),
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("handle_scale_limit", self.handle_scale_limit),
            ("handle_zoom_step", self.handle_zoom_step),
            ("max_handle_fraction", self.max_handle_fraction),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CropperError::InvalidConfig(format!(
                "{name} must be finite, got {value}"
            )));
        }

        if self.canvas_fraction <= 0.0 || self.canvas_fraction > 1.0 {
            return Err(CropperError::InvalidConfig(format!(
                "canvas_fraction must be in (0, 1], got {}",
                self.canvas_fraction
            )));
        }
        if self.min_scale <= 0.0 || self.min_scale > self.max_scale {
            return Err(CropperError::InvalidConfig(format!(
                "scale bounds must satisfy 0 < min <= max, got [{}, {}]",
                self.min_scale, self.max_scale
            )));
        }
        if !(self.min_scale..=self.max_scale).contains(&1.0) {
            return Err(CropperError::InvalidConfig(format!(
                "scale bounds must include the initial scale 1.0, got [{}, {}]",
                self.min_scale, self.max_scale
            )));
        }
        if self.handle_zoom_step < 0.0 {
            return Err(CropperError::InvalidConfig(format!(
                "handle_zoom_step must not be negative, got {}",
                self.handle_zoom_step
            )));
        }
        if self.max_handle_fraction < 0.0 || self.max_handle_fraction > 0.5 {
            return Err(CropperError::InvalidConfig(format!(
                "max_handle_fraction must be in [0, 0.5], got {}",
                self.max_handle_fraction
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CropperConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.canvas_fraction, 0.85);
        assert_eq!(config.min_scale, 0.5);
        assert_eq!(config.max_scale, 4.0);
        assert_eq!(config.handle_scale_limit, 3.0);
        assert_eq!(config.handle_zoom_step, 0.05);
    }

    #[test]
    fn test_rejects_inverted_scale_bounds() {
        let mut config = CropperConfig::default();
        config.min_scale = 5.0;
        assert!(matches!(
            config.validate(),
            Err(CropperError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_bounds_excluding_initial_scale() {
        let mut config = CropperConfig::default();
        config.min_scale = 1.5;
        config.max_scale = 3.0;
        assert!(matches!(
            config.validate(),
            Err(CropperError::InvalidConfig(_))
        ));

        config.min_scale = 0.2;
        config.max_scale = 0.8;
        assert!(config.validate().is_err());

        config.max_scale = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut config = CropperConfig::default();
        config.max_scale = f32::INFINITY;
        assert!(config.validate().is_err());

        let mut config = CropperConfig::default();
        config.canvas_fraction = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_handle_fraction_past_center() {
        let mut config = CropperConfig::default();
        config.max_handle_fraction = 0.75;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CropperConfig =
            serde_json::from_str(r#"{ "max_scale": 8.0, "interpolation": "Nearest" }"#).unwrap();
        assert_eq!(config.max_scale, 8.0);
        assert_eq!(config.min_scale, 0.5);
        assert_eq!(config.interpolation, InterpolationFilter::Nearest);
        assert_eq!(config.settle_duration_ms, 300);
    }
}
