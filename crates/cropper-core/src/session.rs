//! Crop session: the single owner of a source image and its transform.
//!
//! [`Cropper`] is the interface a UI host talks to. It forwards gesture
//! events to the [`gesture`](crate::gesture) interpreter, advances the settle
//! and grid animations on [`tick`](Cropper::tick), notifies subscribers after
//! every change, and renders the final bitmap with [`crop`](Cropper::crop).
//!
//! # Lifecycle
//!
//! 1. `Cropper::new(image)` - no transform yet
//! 2. `init(width, height)` once the hosting surface is measured
//! 3. gesture events and `tick` calls from the host's frame loop
//! 4. `crop()` to produce the output, then drop the session
//!
//! Every call except `new`, `subscribe` and `unsubscribe` fails with
//! [`CropperError::UninitializedState`] before `init`.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::bitmap::Bitmap;
use crate::config::CropperConfig;
use crate::error::CropperError;
use crate::geometry::Vec2;
use crate::gesture;
use crate::overlay::{GridFade, GuideGeometry, PreviewPlacement};
use crate::render::render_crop;
use crate::state::{CropState, Handle};

/// Read-only copy of every observable value of a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropSnapshot {
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale: f32,
    pub handle_offset: f32,
    pub active_handle: Option<Handle>,
    pub canvas_width: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub grid_alpha: f32,
    /// True while the settle or grid fade is running.
    pub animating: bool,
    /// Guide square, mask and grid to draw over the preview.
    pub guide: GuideGeometry,
    /// Where to draw the scaled image.
    pub preview: PreviewPlacement,
}

/// Handle returned by [`Cropper::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&CropSnapshot)>;

/// An interactive crop session over one source image.
pub struct Cropper {
    image: Bitmap,
    config: CropperConfig,
    state: Option<CropState>,
    grid: GridFade,
    transform_in_progress: bool,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl fmt::Debug for Cropper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cropper")
            .field("image", &(self.image.width, self.image.height))
            .field("config", &self.config)
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Cropper {
    /// Create a session with the default config.
    pub fn new(image: Bitmap) -> Self {
        Self {
            image,
            config: CropperConfig::default(),
            state: None,
            grid: GridFade::new(),
            transform_in_progress: false,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create a session with a custom config.
    pub fn with_config(image: Bitmap, config: CropperConfig) -> Result<Self, CropperError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(image)
        })
    }

    pub fn image(&self) -> &Bitmap {
        &self.image
    }

    pub fn config(&self) -> &CropperConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// The transform state, or `UninitializedState` before `init`.
    pub fn state(&self) -> Result<&CropState, CropperError> {
        self.state.as_ref().ok_or(CropperError::UninitializedState)
    }

    fn state_mut(&mut self) -> Result<&mut CropState, CropperError> {
        self.state.as_mut().ok_or(CropperError::UninitializedState)
    }

    /// Lay out the crop circle and image for a measured drawing surface.
    ///
    /// Calling `init` again (for example after a resize) starts over from
    /// the initial layout and cancels running animations. Fails with
    /// `BufferSizeMismatch` if the source bitmap was built with a pixel
    /// buffer that does not match its dimensions.
    pub fn init(&mut self, viewport_width: f32, viewport_height: f32) -> Result<(), CropperError> {
        self.image.check_size()?;
        let state = CropState::new(
            viewport_width,
            viewport_height,
            self.image.width,
            self.image.height,
            &self.config,
        )?;

        debug!(
            viewport_width,
            viewport_height,
            canvas_width = state.canvas_width(),
            offset_x = state.offset_x(),
            offset_y = state.offset_y(),
            "Cropper initialized"
        );

        self.state = Some(state);
        self.grid.reset();
        self.transform_in_progress = false;
        self.notify();
        Ok(())
    }

    /// One tick of a pan/zoom transform gesture.
    pub fn on_pan_zoom(&mut self, pan: Vec2, zoom_factor: f32) -> Result<(), CropperError> {
        let changed = gesture::pan_zoom(self.state_mut()?, pan, zoom_factor);
        self.transform_in_progress = true;
        let grid_changed = self.refresh_grid()?;
        if changed || grid_changed {
            self.notify();
        }
        Ok(())
    }

    /// The pan/zoom transform gesture ended.
    pub fn on_pan_zoom_end(&mut self) -> Result<(), CropperError> {
        self.state()?;
        self.transform_in_progress = false;
        if self.refresh_grid()? {
            self.notify();
        }
        Ok(())
    }

    /// A press inside the handle area. `point` is in handle-area coordinates.
    pub fn on_handle_press(&mut self, point: Vec2) -> Result<(), CropperError> {
        gesture::press(self.state_mut()?, point);
        self.refresh_grid()?;
        self.notify();
        Ok(())
    }

    /// One tick of a handle drag. A no-op when no handle is active.
    pub fn on_handle_drag(&mut self, delta: Vec2) -> Result<(), CropperError> {
        let state = self.state.as_mut().ok_or(CropperError::UninitializedState)?;
        let outcome = gesture::drag(state, delta, &self.config);
        trace!(?outcome, "Handle drag");
        if outcome.changed_state() {
            self.notify();
        }
        Ok(())
    }

    /// The handle drag ended: clear the selection and start the settle.
    pub fn on_handle_release(&mut self) -> Result<(), CropperError> {
        let state = self.state.as_mut().ok_or(CropperError::UninitializedState)?;
        let settled = gesture::release(state, &self.config);
        let grid_changed = self.refresh_grid()?;
        if settled.is_some() || grid_changed {
            self.notify();
        }
        Ok(())
    }

    /// A press on a handle was released without dragging.
    pub fn on_handle_tap(&mut self) -> Result<(), CropperError> {
        self.clear_selection()
    }

    /// A tap landed outside the handles.
    pub fn on_tap_outside_handle(&mut self) -> Result<(), CropperError> {
        self.clear_selection()
    }

    fn clear_selection(&mut self) -> Result<(), CropperError> {
        let changed = gesture::clear_selection(self.state_mut()?);
        let grid_changed = self.refresh_grid()?;
        if changed || grid_changed {
            self.notify();
        }
        Ok(())
    }

    /// Advance running animations by `dt`.
    ///
    /// Returns true while any animation is still running, so a host can
    /// stop requesting frames once it returns false.
    pub fn tick(&mut self, dt: Duration) -> Result<bool, CropperError> {
        let state = self.state_mut()?;
        let was_settling = state.is_settling();
        let settling = state.tick(dt);

        let was_fading = self.grid.is_running();
        let fading = self.grid.tick(dt);

        if was_settling && !settling {
            if let Some(state) = self.state.as_ref() {
                debug!(scale = state.scale(), "Settle complete");
            }
        }
        if was_settling || was_fading {
            self.notify();
        }
        Ok(settling || fading)
    }

    pub fn is_animating(&self) -> bool {
        self.state.as_ref().is_some_and(CropState::is_settling) || self.grid.is_running()
    }

    /// Complete every running animation now.
    pub fn settle(&mut self) -> Result<(), CropperError> {
        let state = self.state_mut()?;
        if !state.is_settling() {
            return Ok(());
        }
        state.finish_settle();
        self.notify();
        Ok(())
    }

    /// Render the selected region.
    ///
    /// A settle still in flight is rendered at its final values; the session
    /// itself is not modified, so repeated calls yield identical bitmaps.
    pub fn crop(&self) -> Result<Bitmap, CropperError> {
        let settled = self.state()?.settled();
        Ok(render_crop(&settled, &self.image, &self.config))
    }

    pub fn offset_x(&self) -> Result<f32, CropperError> {
        Ok(self.state()?.offset_x())
    }

    pub fn offset_y(&self) -> Result<f32, CropperError> {
        Ok(self.state()?.offset_y())
    }

    pub fn scale(&self) -> Result<f32, CropperError> {
        Ok(self.state()?.scale())
    }

    pub fn handle_offset(&self) -> Result<f32, CropperError> {
        Ok(self.state()?.handle_offset())
    }

    pub fn active_handle(&self) -> Result<Option<Handle>, CropperError> {
        Ok(self.state()?.active_handle())
    }

    pub fn canvas_width(&self) -> Result<f32, CropperError> {
        Ok(self.state()?.canvas_width())
    }

    pub fn grid_alpha(&self) -> f32 {
        self.grid.alpha()
    }

    /// Every observable value at once, with the overlay geometry needed to
    /// redraw. Observers receive this, so they never need to call back into
    /// the session.
    pub fn snapshot(&self) -> Result<CropSnapshot, CropperError> {
        let state = self.state()?;
        Ok(CropSnapshot {
            offset_x: state.offset_x(),
            offset_y: state.offset_y(),
            scale: state.scale(),
            handle_offset: state.handle_offset(),
            active_handle: state.active_handle(),
            canvas_width: state.canvas_width(),
            viewport_width: state.viewport_width(),
            viewport_height: state.viewport_height(),
            grid_alpha: self.grid.alpha(),
            animating: self.is_animating(),
            guide: GuideGeometry::from_state(state, self.grid.alpha()),
            preview: PreviewPlacement::from_state(state),
        })
    }

    pub fn guide(&self) -> Result<GuideGeometry, CropperError> {
        Ok(GuideGeometry::from_state(self.state()?, self.grid.alpha()))
    }

    pub fn preview(&self) -> Result<PreviewPlacement, CropperError> {
        Ok(PreviewPlacement::from_state(self.state()?))
    }

    /// Register a callback run with a fresh snapshot after every change.
    pub fn subscribe(&mut self, observer: impl FnMut(&CropSnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        trace!(count = self.observers.len(), "Observer added");
        id
    }

    /// Remove a callback. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        let removed = self.observers.len() != before;
        if removed {
            trace!(count = self.observers.len(), "Observer removed");
        }
        removed
    }

    /// Point the grid fade at the current interaction state.
    fn refresh_grid(&mut self) -> Result<bool, CropperError> {
        let handle_active = self.state()?.active_handle().is_some();
        let visible = self.transform_in_progress || handle_active;
        let fade = Duration::from_millis(u64::from(self.config.grid_fade_ms));
        Ok(self.grid.set_visible(visible, fade))
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let Ok(snapshot) = self.snapshot() else {
            return;
        };
        for (_, observer) in self.observers.iter_mut() {
            observer(&snapshot);
        }
    }
}
