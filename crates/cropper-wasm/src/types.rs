//! WASM-compatible wrapper types for bitmap data.
//!
//! This module provides JavaScript-friendly types that wrap the core cropper
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use cropper_core::Bitmap;
use wasm_bindgen::prelude::*;

/// An RGBA bitmap wrapper for JavaScript.
///
/// Used both for the source image handed to a cropper and for the crop
/// output. The layout matches `ImageData.data`, so a result can be drawn
/// with `new ImageData(new Uint8ClampedArray(bmp.pixels()), bmp.width)`.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsBitmap {
    inner: Bitmap,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create a new JsBitmap from dimensions and RGBA pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsBitmap, JsValue> {
        Bitmap::new(width, height, pixels)
            .map(JsBitmap::from_core)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Create a JsBitmap from RGB pixel data (3 bytes per pixel).
    pub fn from_rgb(width: u32, height: u32, pixels: &[u8]) -> Result<JsBitmap, JsValue> {
        Bitmap::from_rgb(width, height, pixels)
            .map(JsBitmap::from_core)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsBitmap {
    /// Wrap a core bitmap.
    pub(crate) fn from_core(inner: Bitmap) -> Self {
        Self { inner }
    }

    /// Copy out the core bitmap.
    pub(crate) fn to_core(&self) -> Bitmap {
        self.inner.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_bitmap_from_core() {
        let img = JsBitmap::from_core(Bitmap::transparent(100, 50));
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 20000);
    }

    #[test]
    fn test_js_bitmap_pixels() {
        let pixels = vec![255u8, 128, 64, 255, 32, 16, 8, 255];
        let img = JsBitmap::from_core(Bitmap::new(2, 1, pixels.clone()).unwrap());
        assert_eq!(img.pixels(), pixels);
    }

    #[test]
    fn test_to_core() {
        let img = JsBitmap::from_core(Bitmap::transparent(50, 25));
        let core = img.to_core();
        assert_eq!(core.width, 50);
        assert_eq!(core.height, 25);
        assert_eq!(core.pixels.len(), 5000);
    }

    #[test]
    fn test_constructor_valid_buffer() {
        // Ok path never constructs a JsValue, so it runs on any target
        let img = JsBitmap::new(2, 2, vec![0u8; 16]).ok().unwrap();
        assert_eq!(img.width(), 2);
    }

    #[test]
    fn test_from_rgb_valid_buffer() {
        let img = JsBitmap::from_rgb(1, 1, &[1, 2, 3]).ok().unwrap();
        assert_eq!(img.pixels(), vec![1, 2, 3, 255]);
    }
}
