//! Cropper WASM - WebAssembly bindings for the crop engine
//!
//! This crate exposes the cropper-core session to JavaScript/TypeScript
//! hosts. The host owns the canvas and the gesture recognizers; this module
//! owns the transform, the settle animation and the final render.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for RGBA bitmaps
//! - `config` - Tunable session constants
//! - `session` - The interactive crop session
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsBitmap, JsCropper } from '@cropper/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const source = new JsBitmap(img.width, img.height, rgba);
//! const cropper = new JsCropper(source);
//! cropper.init(canvas.width, canvas.height);
//! const avatar = cropper.crop();
//! ```

use wasm_bindgen::prelude::*;

mod config;
mod session;
mod types;

// Re-export public types
pub use config::CropperConfig;
pub use session::JsCropper;
pub use types::JsBitmap;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
