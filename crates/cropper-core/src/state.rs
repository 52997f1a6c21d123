//! Transform model for a crop session.
//!
//! [`CropState`] holds the placement of the image inside the viewport and the
//! size of the crop guide. Every mutator keeps the invariants:
//!
//! - `scale` stays within `[min_scale, max_scale]`
//! - `handle_offset` stays within `[0, canvas_width * max_handle_fraction]`
//! - at most one handle is active
//!
//! The only exception is the settle target computed on handle release, which
//! is capped at `max_scale` but has no floor. It cannot fall below the current
//! scale while the handle offset is in range.
//!
//! # Coordinate System
//!
//! - Viewport pixels, origin at the top-left of the drawing surface
//! - `offset_x`/`offset_y` place the top-left of the fit-to-width image
//! - `scale` is applied about the viewport center

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::{AnimatedValue, Easing};
use crate::config::CropperConfig;
use crate::error::CropperError;
use crate::geometry::Vec2;

/// A draggable edge of the crop guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handle {
    Top,
    Bottom,
}

impl Handle {
    /// Classify a press inside the handle area by its vertical position.
    pub fn from_press(press_y: f32, canvas_width: f32) -> Self {
        if press_y < canvas_width / 2.0 {
            Handle::Top
        } else {
            Handle::Bottom
        }
    }

    /// Sign that maps a vertical drag to "inward" for this handle.
    pub fn drag_sign(self) -> f32 {
        match self {
            Handle::Top => 1.0,
            Handle::Bottom => -1.0,
        }
    }
}

/// Scale and handle bounds captured from the config at init.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Limits {
    min_scale: f32,
    max_scale: f32,
    max_handle_offset: f32,
}

/// The mutable transform state of one crop session.
#[derive(Debug, Clone, PartialEq)]
pub struct CropState {
    viewport_width: f32,
    viewport_height: f32,
    canvas_width: f32,
    display_height: f32,
    initial_offset_x: f32,
    offset_x: f32,
    offset_y: f32,
    scale: AnimatedValue,
    handle_offset: AnimatedValue,
    active_handle: Option<Handle>,
    limits: Limits,
}

fn check_dimension(what: &'static str, value: f32) -> Result<(), CropperError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CropperError::InvalidDimension { what, value })
    }
}

impl CropState {
    /// Initialize the transform for a viewport and a source image size.
    ///
    /// The crop circle spans `canvas_fraction` of the viewport width and is
    /// centered horizontally. The image is scaled to the circle's width and
    /// centered vertically. Fails with `InvalidConfig` if the config does not
    /// validate, so the initial scale of 1.0 is always within bounds.
    pub fn new(
        viewport_width: f32,
        viewport_height: f32,
        image_width: u32,
        image_height: u32,
        config: &CropperConfig,
    ) -> Result<Self, CropperError> {
        config.validate()?;
        check_dimension("viewport width", viewport_width)?;
        check_dimension("viewport height", viewport_height)?;
        check_dimension("image width", image_width as f32)?;
        check_dimension("image height", image_height as f32)?;

        let canvas_width = viewport_width * config.canvas_fraction;
        let display_height = image_height as f32 * canvas_width / image_width as f32;
        let offset_x = viewport_width / 2.0 - canvas_width / 2.0;
        let offset_y = viewport_height / 2.0 - display_height / 2.0;

        Ok(Self {
            viewport_width,
            viewport_height,
            canvas_width,
            display_height,
            initial_offset_x: offset_x,
            offset_x,
            offset_y,
            scale: AnimatedValue::new(1.0),
            handle_offset: AnimatedValue::new(0.0),
            active_handle: None,
            limits: Limits {
                min_scale: config.min_scale,
                max_scale: config.max_scale,
                max_handle_offset: canvas_width * config.max_handle_fraction,
            },
        })
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Diameter of the crop circle, and side of the crop output.
    pub fn canvas_width(&self) -> f32 {
        self.canvas_width
    }

    /// Height of the image when scaled to `canvas_width` wide.
    pub fn display_height(&self) -> f32 {
        self.display_height
    }

    pub fn initial_offset_x(&self) -> f32 {
        self.initial_offset_x
    }

    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    pub fn offset_y(&self) -> f32 {
        self.offset_y
    }

    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    pub fn handle_offset(&self) -> f32 {
        self.handle_offset.value()
    }

    pub fn max_handle_offset(&self) -> f32 {
        self.limits.max_handle_offset
    }

    pub fn active_handle(&self) -> Option<Handle> {
        self.active_handle
    }

    /// Center of the viewport; the pivot for `scale`.
    pub fn pivot(&self) -> Vec2 {
        Vec2::new(self.viewport_width / 2.0, self.viewport_height / 2.0)
    }

    /// True while the settle animation is running.
    pub fn is_settling(&self) -> bool {
        self.scale.is_running() || self.handle_offset.is_running()
    }

    /// Copy of this state with any running settle completed.
    pub fn settled(&self) -> Self {
        let mut settled = self.clone();
        settled.finish_settle();
        settled
    }

    pub(crate) fn pan(&mut self, delta: Vec2) {
        self.offset_x += delta.x;
        self.offset_y += delta.y;
    }

    /// Multiply the scale by `factor`, clamped to the scale bounds.
    pub(crate) fn zoom_by(&mut self, factor: f32) {
        let scale = self.scale.value();
        self.scale
            .snap_to((scale * factor).clamp(self.limits.min_scale, self.limits.max_scale));
    }

    /// Reduce the scale by `step`, never below the scale floor.
    pub(crate) fn zoom_out_step(&mut self, step: f32) {
        let scale = self.scale.value();
        self.scale.snap_to((scale - step).max(self.limits.min_scale));
    }

    /// Whether `offset` is a legal handle offset.
    pub(crate) fn handle_offset_in_range(&self, offset: f32) -> bool {
        (0.0..=self.limits.max_handle_offset).contains(&offset)
    }

    pub(crate) fn set_handle_offset(&mut self, offset: f32) {
        self.handle_offset
            .snap_to(offset.clamp(0.0, self.limits.max_handle_offset));
    }

    pub(crate) fn set_active_handle(&mut self, handle: Option<Handle>) {
        self.active_handle = handle;
    }

    /// Scale that turns the shrunk guide back into the full crop circle
    /// while keeping the same image content inside it.
    pub fn renormalized_scale(&self) -> f32 {
        let guide = self.canvas_width - self.handle_offset.value() * 2.0;
        self.canvas_width / (guide / self.scale.value())
    }

    /// Start the settle toward the renormalized scale and a zero handle
    /// offset. Returns the scale target.
    pub(crate) fn begin_settle(&mut self, duration: Duration, easing: Easing) -> f32 {
        let target = self.renormalized_scale().min(self.limits.max_scale);
        self.scale.animate_to(target, duration, easing);
        self.handle_offset.animate_to(0.0, duration, easing);
        target
    }

    pub(crate) fn finish_settle(&mut self) {
        self.scale.finish();
        self.handle_offset.finish();
    }

    /// Advance the settle. Returns true while it is still running.
    pub(crate) fn tick(&mut self, dt: Duration) -> bool {
        let scale_running = self.scale.tick(dt);
        let handle_running = self.handle_offset.tick(dt);
        scale_running || handle_running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn state(vw: f32, vh: f32, iw: u32, ih: u32) -> CropState {
        CropState::new(vw, vh, iw, ih, &CropperConfig::default()).unwrap()
    }

    #[test]
    fn test_init_reference_layout() {
        let s = state(400.0, 800.0, 1000, 500);
        assert_relative_eq!(s.canvas_width(), 340.0, epsilon = 1e-3);
        assert_relative_eq!(s.offset_x(), 30.0, epsilon = 1e-3);
        assert_relative_eq!(s.display_height(), 170.0, epsilon = 1e-3);
        assert_relative_eq!(s.offset_y(), 315.0, epsilon = 1e-3);
        assert_relative_eq!(s.initial_offset_x(), s.offset_x());
        assert_eq!(s.scale(), 1.0);
        assert_eq!(s.handle_offset(), 0.0);
        assert_eq!(s.active_handle(), None);
        assert_relative_eq!(s.max_handle_offset(), 170.0, epsilon = 1e-3);
    }

    #[test]
    fn test_init_rejects_zero_dimensions() {
        let config = CropperConfig::default();
        assert!(matches!(
            CropState::new(0.0, 800.0, 10, 10, &config),
            Err(CropperError::InvalidDimension {
                what: "viewport width",
                ..
            })
        ));
        assert!(CropState::new(400.0, -1.0, 10, 10, &config).is_err());
        assert!(CropState::new(400.0, f32::NAN, 10, 10, &config).is_err());
        assert!(matches!(
            CropState::new(400.0, 800.0, 0, 10, &config),
            Err(CropperError::InvalidDimension {
                what: "image width",
                ..
            })
        ));
        assert!(CropState::new(400.0, 800.0, 10, 0, &config).is_err());
    }

    #[test]
    fn test_init_rejects_bounds_excluding_initial_scale() {
        let mut config = CropperConfig::default();
        config.min_scale = 1.5;
        config.max_scale = 3.0;
        assert!(matches!(
            CropState::new(400.0, 800.0, 10, 10, &config),
            Err(CropperError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_handle_classification() {
        assert_eq!(Handle::from_press(10.0, 340.0), Handle::Top);
        assert_eq!(Handle::from_press(169.9, 340.0), Handle::Top);
        assert_eq!(Handle::from_press(170.0, 340.0), Handle::Bottom);
        assert_eq!(Handle::from_press(300.0, 340.0), Handle::Bottom);
    }

    #[test]
    fn test_zoom_clamps() {
        let mut s = state(400.0, 800.0, 100, 100);
        s.zoom_by(10.0);
        assert_eq!(s.scale(), 4.0);
        s.zoom_by(0.01);
        assert_eq!(s.scale(), 0.5);
    }

    #[test]
    fn test_zoom_out_step_floor() {
        let mut s = state(400.0, 800.0, 100, 100);
        s.zoom_out_step(0.05);
        assert_relative_eq!(s.scale(), 0.95, epsilon = 1e-5);
        s.zoom_by(0.5);
        s.zoom_out_step(0.05);
        assert_eq!(s.scale(), 0.5);
    }

    #[test]
    fn test_renormalized_scale() {
        let mut s = state(400.0, 800.0, 100, 100);
        s.set_handle_offset(85.0);
        // Guide is half the circle, so the image must double
        assert_relative_eq!(s.renormalized_scale(), 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_settle_caps_at_max_scale() {
        let mut s = state(400.0, 800.0, 100, 100);
        s.set_handle_offset(s.max_handle_offset());
        assert!(s.renormalized_scale().is_infinite());

        let target = s.begin_settle(Duration::from_millis(300), Easing::Linear);
        assert_eq!(target, 4.0);
        assert!(s.is_settling());

        let settled = s.settled();
        assert_eq!(settled.scale(), 4.0);
        assert_eq!(settled.handle_offset(), 0.0);
        // Original is untouched
        assert!(s.is_settling());
    }

    #[test]
    fn test_settle_tick_completes() {
        let mut s = state(400.0, 800.0, 100, 100);
        s.set_handle_offset(34.0);
        s.begin_settle(Duration::from_millis(100), Easing::FastOutSlowIn);

        let mut running = true;
        for _ in 0..10 {
            running = s.tick(Duration::from_millis(16));
        }
        assert!(!running);
        assert_eq!(s.handle_offset(), 0.0);
        assert_relative_eq!(s.scale(), 340.0 / 272.0, epsilon = 1e-4);
    }

    #[test]
    fn test_set_handle_offset_clamps() {
        let mut s = state(400.0, 800.0, 100, 100);
        s.set_handle_offset(-5.0);
        assert_eq!(s.handle_offset(), 0.0);
        s.set_handle_offset(1000.0);
        assert_relative_eq!(s.handle_offset(), s.max_handle_offset());
    }
}
