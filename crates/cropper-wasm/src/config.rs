//! Cropper configuration WASM bindings.
//!
//! Exposes the tunable session constants to TypeScript. Numeric fields have
//! getters and setters; the easing curve, interpolation filter and
//! background color are set through `from_json`.

use wasm_bindgen::prelude::*;

/// Cropper configuration wrapper for JavaScript
#[wasm_bindgen]
pub struct CropperConfig {
    inner: cropper_core::CropperConfig,
}

#[wasm_bindgen]
impl CropperConfig {
    /// Create a config with default values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: cropper_core::CropperConfig::new(),
        }
    }

    /// Get crop circle diameter as a fraction of viewport width
    #[wasm_bindgen(getter)]
    pub fn canvas_fraction(&self) -> f32 {
        self.inner.canvas_fraction
    }

    /// Set crop circle diameter as a fraction of viewport width
    #[wasm_bindgen(setter)]
    pub fn set_canvas_fraction(&mut self, value: f32) {
        self.inner.canvas_fraction = value;
    }

    /// Get minimum scale
    #[wasm_bindgen(getter)]
    pub fn min_scale(&self) -> f32 {
        self.inner.min_scale
    }

    /// Set minimum scale
    #[wasm_bindgen(setter)]
    pub fn set_min_scale(&mut self, value: f32) {
        self.inner.min_scale = value;
    }

    /// Get maximum scale
    #[wasm_bindgen(getter)]
    pub fn max_scale(&self) -> f32 {
        self.inner.max_scale
    }

    /// Set maximum scale
    #[wasm_bindgen(setter)]
    pub fn set_max_scale(&mut self, value: f32) {
        self.inner.max_scale = value;
    }

    /// Get the scale at which handle drags turn into zoom-out
    #[wasm_bindgen(getter)]
    pub fn handle_scale_limit(&self) -> f32 {
        self.inner.handle_scale_limit
    }

    /// Set the scale at which handle drags turn into zoom-out
    #[wasm_bindgen(setter)]
    pub fn set_handle_scale_limit(&mut self, value: f32) {
        self.inner.handle_scale_limit = value;
    }

    /// Get settle animation duration in milliseconds
    #[wasm_bindgen(getter)]
    pub fn settle_duration_ms(&self) -> u32 {
        self.inner.settle_duration_ms
    }

    /// Set settle animation duration in milliseconds
    #[wasm_bindgen(setter)]
    pub fn set_settle_duration_ms(&mut self, value: u32) {
        self.inner.settle_duration_ms = value;
    }

    /// Get grid fade duration in milliseconds
    #[wasm_bindgen(getter)]
    pub fn grid_fade_ms(&self) -> u32 {
        self.inner.grid_fade_ms
    }

    /// Set grid fade duration in milliseconds
    #[wasm_bindgen(setter)]
    pub fn set_grid_fade_ms(&mut self, value: u32) {
        self.inner.grid_fade_ms = value;
    }

    /// Check that all bounds are consistent
    pub fn validate(&self) -> Result<(), JsValue> {
        self.inner
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Serialize to a plain JS object
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from a plain JS object. Missing fields take their defaults.
    pub fn from_json(value: JsValue) -> Result<CropperConfig, JsValue> {
        let inner: cropper_core::CropperConfig =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CropperConfig {
    pub(crate) fn inner(&self) -> &cropper_core::CropperConfig {
        &self.inner
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_json_partial_fields() {
        let value = js_sys::Object::new();
        js_sys::Reflect::set(&value, &"max_scale".into(), &JsValue::from_f64(8.0)).unwrap();
        let config = CropperConfig::from_json(value.into()).unwrap();
        assert_eq!(config.max_scale(), 8.0);
        assert_eq!(config.min_scale(), 0.5);
    }

    #[wasm_bindgen_test]
    fn test_validate_rejects_inverted_bounds() {
        let mut config = CropperConfig::new();
        config.set_min_scale(5.0);
        assert!(config.validate().is_err());
    }
}
