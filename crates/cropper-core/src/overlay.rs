//! Live-feedback geometry for the UI layer.
//!
//! Nothing here draws. These types tell a host where to draw the scaled image
//! preview, the dimmed mask around the crop circle, the guide square and its
//! rule-of-thirds grid.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::{AnimatedValue, Easing};
use crate::geometry::{Rect, Vec2};
use crate::state::CropState;

/// Guide and mask geometry in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideGeometry {
    /// Square guide, shrunk by the handle offset, centered in the viewport.
    pub guide: Rect,
    /// Radius of the undimmed circle.
    pub mask_radius: f32,
    /// X positions of the two vertical grid lines.
    pub grid_x: [f32; 2],
    /// Y positions of the two horizontal grid lines.
    pub grid_y: [f32; 2],
    /// Grid opacity, 0.0 to 1.0.
    pub grid_alpha: f32,
}

impl GuideGeometry {
    pub fn from_state(state: &CropState, grid_alpha: f32) -> Self {
        let size = state.canvas_width() - state.handle_offset();
        let guide = Rect::centered_square(state.pivot(), size);
        let third = size / 3.0;

        Self {
            guide,
            mask_radius: size / 2.0,
            grid_x: [guide.x + third, guide.x + third * 2.0],
            grid_y: [guide.y + third, guide.y + third * 2.0],
            grid_alpha,
        }
    }
}

/// Where the host draws the image preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewPlacement {
    /// Image rect before scaling: at the offset, fit to the canvas width.
    pub image_rect: Rect,
    /// Uniform scale applied about `pivot`.
    pub scale: f32,
    /// Viewport center.
    pub pivot: Vec2,
}

impl PreviewPlacement {
    pub fn from_state(state: &CropState) -> Self {
        Self {
            image_rect: Rect::new(
                state.offset_x(),
                state.offset_y(),
                state.canvas_width(),
                state.display_height(),
            ),
            scale: state.scale(),
            pivot: state.pivot(),
        }
    }

    /// The image rect as it appears on screen after scaling.
    pub fn screen_rect(&self) -> Rect {
        self.image_rect.scaled_about(self.pivot, self.scale)
    }
}

/// Grid fade in/out, shown while the user is actively transforming.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridFade {
    alpha: AnimatedValue,
    visible: bool,
}

impl GridFade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha.value()
    }

    pub fn is_running(&self) -> bool {
        self.alpha.is_running()
    }

    /// Retarget the fade. Returns true if the visibility changed.
    pub fn set_visible(&mut self, visible: bool, fade: Duration) -> bool {
        if visible == self.visible {
            return false;
        }
        self.visible = visible;
        let target = if visible { 1.0 } else { 0.0 };
        self.alpha.animate_to(target, fade, Easing::Linear);
        true
    }

    pub fn tick(&mut self, dt: Duration) -> bool {
        self.alpha.tick(dt)
    }

    /// Hide immediately.
    pub fn reset(&mut self) {
        self.visible = false;
        self.alpha.snap_to(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CropperConfig;
    use crate::gesture;
    use approx::assert_relative_eq;

    fn state() -> CropState {
        CropState::new(400.0, 800.0, 1000, 500, &CropperConfig::default()).unwrap()
    }

    #[test]
    fn test_guide_full_circle() {
        let g = GuideGeometry::from_state(&state(), 0.0);
        assert_relative_eq!(g.guide.width, 340.0, epsilon = 1e-3);
        assert_relative_eq!(g.guide.x, 30.0, epsilon = 1e-3);
        assert_relative_eq!(g.guide.y, 230.0, epsilon = 1e-3);
        assert_relative_eq!(g.mask_radius, 170.0, epsilon = 1e-3);
        assert_relative_eq!(g.grid_x[0], 30.0 + 340.0 / 3.0, epsilon = 1e-3);
        assert_relative_eq!(g.grid_y[1], 230.0 + 680.0 / 3.0, epsilon = 1e-3);
    }

    #[test]
    fn test_guide_shrinks_with_handle() {
        let config = CropperConfig::default();
        let mut s = state();
        gesture::press(&mut s, Vec2::new(0.0, 10.0));
        gesture::drag(&mut s, Vec2::new(0.0, 40.0), &config);

        let g = GuideGeometry::from_state(&s, 1.0);
        assert_relative_eq!(g.guide.width, 300.0, epsilon = 1e-3);
        assert_relative_eq!(g.mask_radius, 150.0, epsilon = 1e-3);
        assert_eq!(g.guide.center(), s.pivot());
    }

    #[test]
    fn test_preview_placement() {
        let mut s = state();
        let p = PreviewPlacement::from_state(&s);
        assert_eq!(p.image_rect, Rect::new(30.0, 315.0, 340.0, 170.0));
        assert_eq!(p.screen_rect(), p.image_rect);

        gesture::pan_zoom(&mut s, Vec2::ZERO, 2.0);
        let screen = PreviewPlacement::from_state(&s).screen_rect();
        assert_relative_eq!(screen.width, 680.0, epsilon = 1e-3);
        assert_relative_eq!(screen.y, 230.0, epsilon = 1e-3);
        assert_relative_eq!(screen.x, -140.0, epsilon = 1e-3);
    }

    #[test]
    fn test_grid_fade() {
        let fade = Duration::from_millis(100);
        let mut grid = GridFade::new();
        assert_eq!(grid.alpha(), 0.0);

        assert!(grid.set_visible(true, fade));
        assert!(!grid.set_visible(true, fade));
        grid.tick(Duration::from_millis(50));
        assert_relative_eq!(grid.alpha(), 0.5, epsilon = 1e-4);
        grid.tick(Duration::from_millis(50));
        assert_eq!(grid.alpha(), 1.0);
        assert!(!grid.is_running());

        grid.set_visible(false, fade);
        grid.reset();
        assert_eq!(grid.alpha(), 0.0);
        assert!(!grid.is_running());
    }
}
