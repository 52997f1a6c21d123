//! Pixel sampling and compositing helpers for the renderer.
//!
//! Sample coordinates are continuous source-pixel coordinates where pixel
//! `(i, j)` covers `[i, i+1) x [j, j+1)` and its center is at `(i+0.5, j+0.5)`.

use crate::bitmap::{Bitmap, CHANNELS};

/// Get a pixel as [f64; 4] from an image at the given coordinates.
#[inline]
fn get_pixel_f64(image: &Bitmap, px: usize, py: usize) -> [f64; 4] {
    let idx = (py * image.width as usize + px) * CHANNELS;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
        image.pixels[idx + 3] as f64,
    ]
}

/// Sample the pixel whose area contains `(x, y)`.
///
/// Coordinates outside the image clamp to the nearest edge pixel.
pub(super) fn sample_nearest(image: &Bitmap, x: f64, y: f64) -> [u8; 4] {
    let max_x = image.width as i64 - 1;
    let max_y = image.height as i64 - 1;
    let px = (x.floor() as i64).clamp(0, max_x) as usize;
    let py = (y.floor() as i64).clamp(0, max_y) as usize;

    let idx = (py * image.width as usize + px) * CHANNELS;
    [
        image.pixels[idx],
        image.pixels[idx + 1],
        image.pixels[idx + 2],
        image.pixels[idx + 3],
    ]
}

/// Sample a pixel using bilinear interpolation between the 4 nearest pixel
/// centers.
///
/// Color channels are weighted by alpha so transparent pixels do not bleed
/// their color into neighbors. Edges clamp.
pub(super) fn sample_bilinear(image: &Bitmap, x: f64, y: f64) -> [u8; 4] {
    let max_x = (image.width - 1) as f64;
    let max_y = (image.height - 1) as f64;

    // Shift to pixel-center space
    let cx = (x - 0.5).clamp(0.0, max_x);
    let cy = (y - 0.5).clamp(0.0, max_y);

    let x0 = cx.floor() as usize;
    let y0 = cy.floor() as usize;
    let x1 = (x0 + 1).min(image.width as usize - 1);
    let y1 = (y0 + 1).min(image.height as usize - 1);

    // Fractional distances
    let fx = cx - x0 as f64;
    let fy = cy - y0 as f64;

    let taps = [
        (get_pixel_f64(image, x0, y0), (1.0 - fx) * (1.0 - fy)),
        (get_pixel_f64(image, x1, y0), fx * (1.0 - fy)),
        (get_pixel_f64(image, x0, y1), (1.0 - fx) * fy),
        (get_pixel_f64(image, x1, y1), fx * fy),
    ];

    let mut color = [0.0f64; 3];
    let mut alpha = 0.0f64;
    for (p, w) in taps {
        let aw = p[3] * w;
        color[0] += p[0] * aw;
        color[1] += p[1] * aw;
        color[2] += p[2] * aw;
        alpha += aw;
    }

    if alpha <= 0.0 {
        return [0, 0, 0, 0];
    }

    [
        (color[0] / alpha).clamp(0.0, 255.0).round() as u8,
        (color[1] / alpha).clamp(0.0, 255.0).round() as u8,
        (color[2] / alpha).clamp(0.0, 255.0).round() as u8,
        alpha.clamp(0.0, 255.0).round() as u8,
    ]
}

/// Composite `src` over `dst` in place (straight alpha, source-over).
pub(super) fn composite_over(dst: &mut [u8], src: [u8; 4]) {
    if src[3] == 255 {
        dst.copy_from_slice(&src);
        return;
    }
    if src[3] == 0 {
        return;
    }

    let sa = src[3] as f64 / 255.0;
    let da = dst[3] as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    for i in 0..3 {
        let c = (src[i] as f64 * sa + dst[i] as f64 * da * (1.0 - sa)) / out_a;
        dst[i] = c.clamp(0.0, 255.0).round() as u8;
    }
    dst[3] = (out_a * 255.0).clamp(0.0, 255.0).round() as u8;
}
