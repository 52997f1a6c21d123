//! Rendering of the selected crop region.
//!
//! The renderer is a pure function of a [`CropState`](crate::CropState), the
//! source [`Bitmap`](crate::Bitmap) and the config. It composites the image
//! into a square buffer the size of the crop circle, clipped to that circle.
//!
//! # Pipeline
//!
//! Expressed as canvas operations on the output, applied in this order:
//! 1. Shift the origin up by `viewport_height/2 - canvas_width/2`
//! 2. Clip to the disc at `(canvas_width/2, viewport_height/2)`, radius `canvas_width/2`
//! 3. Fill the disc with the background color
//! 4. Scale by `scale` about `(canvas_width/2, viewport_height/2)`
//! 5. Translate by `(offset_x - initial_offset_x, offset_y)`
//! 6. Draw the image fit to `canvas_width` wide
//!
//! The implementation walks output pixels and inverts this mapping, so every
//! output pixel is sampled exactly once.

mod crop;
mod sample;

use serde::{Deserialize, Serialize};

pub use crop::render_crop;

/// Interpolation filter for sampling the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationFilter {
    /// Nearest neighbor - hard pixel edges, exact source colors.
    Nearest,
    /// Bilinear interpolation - smooth when zoomed in.
    #[default]
    Bilinear,
}
