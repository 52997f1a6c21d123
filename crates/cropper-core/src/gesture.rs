//! Gesture interpretation.
//!
//! Translates raw gesture deltas into bounded updates of a [`CropState`].
//! Two gesture families feed the same state:
//!
//! - **Pan/zoom**: continuous two-finger transform. Pan and zoom touch disjoint
//!   fields and both apply on every tick.
//! - **Handle drag**: press selects the top or bottom handle, dragging shrinks
//!   the crop guide, release renormalizes the shrunk guide into a new scale.
//!
//! Pan/zoom and handle drag are not mutually exclusive.

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::config::CropperConfig;
use crate::geometry::Vec2;
use crate::state::{CropState, Handle};

/// What a single handle-drag tick did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// No handle was active, or the delta was not finite.
    Ignored,
    /// The guide was resized by moving the handle offset.
    Resized,
    /// The guide could not move further inward, so the image zoomed out.
    ZoomedOut,
    /// An outward drag hit the bound; nothing changed.
    Blocked,
}

impl DragOutcome {
    pub fn changed_state(self) -> bool {
        matches!(self, DragOutcome::Resized | DragOutcome::ZoomedOut)
    }
}

/// Apply one pan/zoom tick. Returns true if the state changed.
///
/// The pan is unconditional. The zoom applies only when `zoom_factor` is
/// not `1.0` and the resulting scale is clamped to the scale bounds.
pub fn pan_zoom(state: &mut CropState, pan: Vec2, zoom_factor: f32) -> bool {
    if !pan.is_finite() || !zoom_factor.is_finite() {
        warn!(?pan, zoom_factor, "Ignoring non-finite pan/zoom input");
        return false;
    }

    let before = (state.offset_x(), state.offset_y(), state.scale());

    state.pan(pan);
    if zoom_factor != 1.0 {
        state.zoom_by(zoom_factor);
    }

    before != (state.offset_x(), state.offset_y(), state.scale())
}

/// Select a handle from a press inside the handle area.
///
/// `press` is in handle-area coordinates, whose height equals the canvas
/// width. A settle still in flight is completed first so the new drag starts
/// from the renormalized state.
pub fn press(state: &mut CropState, press: Vec2) -> Option<Handle> {
    if !press.y.is_finite() {
        warn!(?press, "Ignoring non-finite handle press");
        return state.active_handle();
    }

    if state.is_settling() {
        trace!("Press during settle; completing it");
        state.finish_settle();
    }

    let handle = Handle::from_press(press.y, state.canvas_width());
    state.set_active_handle(Some(handle));
    trace!(?handle, press_y = press.y, "Handle selected");
    Some(handle)
}

/// Clear the handle selection (tap without drag, or tap outside the handles).
pub fn clear_selection(state: &mut CropState) -> bool {
    let changed = state.active_handle().is_some();
    state.set_active_handle(None);
    changed
}

/// Apply one handle-drag tick.
///
/// While the scale is below `handle_scale_limit` and the new offset stays in
/// range, the handle offset follows the drag directly. Otherwise an outward
/// drag (negative after sign correction) zooms the image out by
/// `handle_zoom_step`, so the gesture always has a visible effect.
pub fn drag(state: &mut CropState, delta: Vec2, config: &CropperConfig) -> DragOutcome {
    let Some(handle) = state.active_handle() else {
        trace!("Drag without active handle ignored");
        return DragOutcome::Ignored;
    };
    if !delta.y.is_finite() {
        warn!(?delta, "Ignoring non-finite handle drag");
        return DragOutcome::Ignored;
    }

    let signed = delta.y * handle.drag_sign();
    let proposed = state.handle_offset() + signed;

    if state.scale() < config.handle_scale_limit && state.handle_offset_in_range(proposed) {
        state.set_handle_offset(proposed);
        DragOutcome::Resized
    } else if signed < 0.0 {
        state.zoom_out_step(config.handle_zoom_step);
        DragOutcome::ZoomedOut
    } else {
        DragOutcome::Blocked
    }
}

/// Finish a handle drag.
///
/// Clears the selection and starts the settle: the scale animates toward the
/// renormalized scale (capped at `max_scale`) while the handle offset
/// animates back to zero. Returns the scale target, or `None` when no handle
/// was active.
pub fn release(state: &mut CropState, config: &CropperConfig) -> Option<f32> {
    let handle = state.active_handle()?;

    let from_scale = state.scale();
    let handle_offset = state.handle_offset();

    state.set_active_handle(None);
    let target = state.begin_settle(
        Duration::from_millis(u64::from(config.settle_duration_ms)),
        config.easing,
    );

    debug!(
        ?handle,
        from_scale, handle_offset, target_scale = target, "Handle released; settling"
    );
    Some(target)
}
