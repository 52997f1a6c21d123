//! Circular crop rendering.

use tracing::debug;

use super::sample::{composite_over, sample_bilinear, sample_nearest};
use super::InterpolationFilter;
use crate::bitmap::{Bitmap, CHANNELS};
use crate::config::CropperConfig;
use crate::state::CropState;

/// Render the region under the crop circle into a new square bitmap.
///
/// The output side is `canvas_width` rounded to whole pixels. Pixels whose
/// centers fall outside the crop circle are fully transparent; pixels inside
/// it show the image over `config.background`.
///
/// # Arguments
///
/// * `state` - Transform to render. Callers pass a settled state.
/// * `source` - Source image, read only
/// * `config` - Supplies the interpolation filter and background color
///
/// # Behavior
///
/// - Deterministic: identical inputs produce bit-identical output
/// - The horizontal placement is relative to `initial_offset_x`; the vertical
///   placement uses `offset_y` directly
/// - An empty source, or one whose buffer does not match its dimensions,
///   renders only the background disc
pub fn render_crop(state: &CropState, source: &Bitmap, config: &CropperConfig) -> Bitmap {
    let side = state.canvas_width().round().max(1.0) as u32;
    let mut output = Bitmap::transparent(side, side);

    let canvas = state.canvas_width() as f64;
    let viewport_h = state.viewport_height() as f64;
    let scale = state.scale() as f64;

    // Step 1: origin shift that re-centers the viewport into the square
    let shift_y = canvas / 2.0 - viewport_h / 2.0;

    // Steps 2-3: clip disc, in output coordinates
    let radius = canvas / 2.0;
    let (disc_x, disc_y) = (canvas / 2.0, viewport_h / 2.0 + shift_y);

    // Steps 4-5: scale pivot and translation
    let (pivot_x, pivot_y) = (canvas / 2.0, viewport_h / 2.0);
    let tx = (state.offset_x() - state.initial_offset_x()) as f64;
    let ty = state.offset_y() as f64;

    // Step 6: destination rect of the image and its mapping to source pixels
    let dst_w = canvas;
    let dst_h = state.display_height() as f64;
    let has_image = !source.is_empty() && source.check_size().is_ok();
    let to_src_x = source.width as f64 / dst_w;
    let to_src_y = source.height as f64 / dst_h;

    for v in 0..side {
        let oy = v as f64 + 0.5;
        let row = v as usize * side as usize;

        for u in 0..side {
            let ox = u as f64 + 0.5;

            let (dx, dy) = (ox - disc_x, oy - disc_y);
            if dx * dx + dy * dy > radius * radius {
                continue;
            }

            let idx = (row + u as usize) * CHANNELS;
            let dst = &mut output.pixels[idx..idx + CHANNELS];
            dst.copy_from_slice(&config.background);

            if !has_image {
                continue;
            }

            // Invert steps 1, 4 and 5 to find the point in image-rect space
            let rx = ox;
            let ry = oy - shift_y;
            let px = pivot_x + (rx - pivot_x) / scale - tx;
            let py = pivot_y + (ry - pivot_y) / scale - ty;

            if px < 0.0 || px >= dst_w || py < 0.0 || py >= dst_h {
                continue;
            }

            let (sx, sy) = (px * to_src_x, py * to_src_y);
            let pixel = match config.interpolation {
                InterpolationFilter::Nearest => sample_nearest(source, sx, sy),
                InterpolationFilter::Bilinear => sample_bilinear(source, sx, sy),
            };
            composite_over(dst, pixel);
        }
    }

    debug!(
        side,
        scale,
        offset_x = state.offset_x(),
        offset_y = state.offset_y(),
        "Rendered crop"
    );
    output
}


// ============================================================================
// Property-Based Tests
// ============================================================================
