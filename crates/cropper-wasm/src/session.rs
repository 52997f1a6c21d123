//! WASM bindings for an interactive crop session.
//!
//! `JsCropper` is a thin wrapper over [`cropper_core::Cropper`]. Gesture
//! events are passed as plain numbers; structured observables (snapshot,
//! guide geometry, preview placement) cross the boundary as plain JS objects
//! via `serde-wasm-bindgen`.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const cropper = new JsCropper(new JsBitmap(w, h, rgba));
//! cropper.init(canvas.width, canvas.height);
//! cropper.subscribe((snap) => redraw(snap));
//!
//! // From the gesture recognizer
//! cropper.on_pan_zoom(dx, dy, zoom);
//!
//! // From requestAnimationFrame
//! if (cropper.tick(dtMs)) requestAnimationFrame(loop);
//!
//! const out = cropper.crop();
//! ```

use std::collections::HashMap;
use std::time::Duration;

use crate::config::CropperConfig;
use crate::types::JsBitmap;
use cropper_core::{Cropper, CropperError, SubscriptionId, Vec2};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js(err: CropperError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn serialize<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// An interactive circular crop session for JavaScript.
#[wasm_bindgen]
pub struct JsCropper {
    inner: Cropper,
    subscriptions: HashMap<u32, SubscriptionId>,
    next_subscription: u32,
}

#[wasm_bindgen]
impl JsCropper {
    /// Create a session over `image` with the default config.
    #[wasm_bindgen(constructor)]
    pub fn new(image: &JsBitmap) -> JsCropper {
        Self::from_core(Cropper::new(image.to_core()))
    }

    /// Create a session over `image` with a custom config.
    pub fn with_config(image: &JsBitmap, config: &CropperConfig) -> Result<JsCropper, JsValue> {
        Cropper::with_config(image.to_core(), config.inner().clone())
            .map(Self::from_core)
            .map_err(to_js)
    }

    /// Lay out the crop circle for a measured drawing surface.
    pub fn init(&mut self, viewport_width: f32, viewport_height: f32) -> Result<(), JsValue> {
        self.inner
            .init(viewport_width, viewport_height)
            .map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn is_initialized(&self) -> bool {
        self.inner.is_initialized()
    }

    /// One tick of a pan/zoom gesture.
    pub fn on_pan_zoom(&mut self, pan_x: f32, pan_y: f32, zoom: f32) -> Result<(), JsValue> {
        self.inner
            .on_pan_zoom(Vec2::new(pan_x, pan_y), zoom)
            .map_err(to_js)
    }

    pub fn on_pan_zoom_end(&mut self) -> Result<(), JsValue> {
        self.inner.on_pan_zoom_end().map_err(to_js)
    }

    /// A press at `(x, y)` in handle-area coordinates.
    pub fn on_handle_press(&mut self, x: f32, y: f32) -> Result<(), JsValue> {
        self.inner.on_handle_press(Vec2::new(x, y)).map_err(to_js)
    }

    pub fn on_handle_drag(&mut self, dx: f32, dy: f32) -> Result<(), JsValue> {
        self.inner.on_handle_drag(Vec2::new(dx, dy)).map_err(to_js)
    }

    pub fn on_handle_release(&mut self) -> Result<(), JsValue> {
        self.inner.on_handle_release().map_err(to_js)
    }

    pub fn on_handle_tap(&mut self) -> Result<(), JsValue> {
        self.inner.on_handle_tap().map_err(to_js)
    }

    pub fn on_tap_outside_handle(&mut self) -> Result<(), JsValue> {
        self.inner.on_tap_outside_handle().map_err(to_js)
    }

    /// Advance animations by `dt_ms` milliseconds.
    ///
    /// Returns true while another frame is needed.
    pub fn tick(&mut self, dt_ms: f64) -> Result<bool, JsValue> {
        let dt = Duration::try_from_secs_f64(dt_ms / 1000.0)
            .map_err(|e| JsValue::from_str(&format!("Invalid frame time {dt_ms}: {e}")))?;
        self.inner.tick(dt).map_err(to_js)
    }

    /// Complete all running animations now.
    pub fn settle(&mut self) -> Result<(), JsValue> {
        self.inner.settle().map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn is_animating(&self) -> bool {
        self.inner.is_animating()
    }

    /// Render the crop result as a square RGBA bitmap.
    pub fn crop(&self) -> Result<JsBitmap, JsValue> {
        self.inner.crop().map(JsBitmap::from_core).map_err(to_js)
    }

    pub fn offset_x(&self) -> Result<f32, JsValue> {
        self.inner.offset_x().map_err(to_js)
    }

    pub fn offset_y(&self) -> Result<f32, JsValue> {
        self.inner.offset_y().map_err(to_js)
    }

    pub fn scale(&self) -> Result<f32, JsValue> {
        self.inner.scale().map_err(to_js)
    }

    pub fn handle_offset(&self) -> Result<f32, JsValue> {
        self.inner.handle_offset().map_err(to_js)
    }

    pub fn canvas_width(&self) -> Result<f32, JsValue> {
        self.inner.canvas_width().map_err(to_js)
    }

    /// `"Top"`, `"Bottom"` or `null`.
    pub fn active_handle(&self) -> Result<JsValue, JsValue> {
        serialize(&self.inner.active_handle().map_err(to_js)?)
    }

    #[wasm_bindgen(getter)]
    pub fn grid_alpha(&self) -> f32 {
        self.inner.grid_alpha()
    }

    /// All observables as one object.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serialize(&self.inner.snapshot().map_err(to_js)?)
    }

    /// Guide square, mask radius and grid lines.
    pub fn guide(&self) -> Result<JsValue, JsValue> {
        serialize(&self.inner.guide().map_err(to_js)?)
    }

    /// Where to draw the scaled image preview.
    pub fn preview(&self) -> Result<JsValue, JsValue> {
        serialize(&self.inner.preview().map_err(to_js)?)
    }

    /// Call `callback(snapshot)` after every change. Returns an id for
    /// `unsubscribe`.
    ///
    /// The snapshot includes `guide` and `preview`, so a redraw needs nothing
    /// else. The callback runs while this cropper is borrowed and must not
    /// call back into it. Exceptions thrown by the callback are logged to the
    /// console and do not interrupt the session.
    pub fn subscribe(&mut self, callback: js_sys::Function) -> u32 {
        let id = self.inner.subscribe(move |snapshot| {
            let arg = match serde_wasm_bindgen::to_value(snapshot) {
                Ok(arg) => arg,
                Err(e) => JsValue::from_str(&e.to_string()),
            };
            if let Err(err) = callback.call1(&JsValue::NULL, &arg) {
                web_sys::console::error_2(&JsValue::from_str("Cropper observer threw:"), &err);
            }
        });

        let handle = self.next_subscription;
        self.next_subscription = self.next_subscription.wrapping_add(1);
        self.subscriptions.insert(handle, id);
        handle
    }

    /// Remove a callback. Returns false for an unknown id.
    pub fn unsubscribe(&mut self, handle: u32) -> bool {
        match self.subscriptions.remove(&handle) {
            Some(id) => self.inner.unsubscribe(id),
            None => false,
        }
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the session and its callbacks
    }
}

impl JsCropper {
    fn from_core(inner: Cropper) -> Self {
        Self {
            inner,
            subscriptions: HashMap::new(),
            next_subscription: 0,
        }
    }
}
