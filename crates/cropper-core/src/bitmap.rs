//! RGBA pixel buffers used for the source image and the crop output.

use crate::error::CropperError;

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// An RGBA8 bitmap.
///
/// The source image handed to the cropper and the [`crop`](crate::Cropper::crop)
/// output share this type. The crop engine only ever reads the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Create a bitmap from RGBA pixel data.
    ///
    /// Fails if `pixels.len() != width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, CropperError> {
        let bitmap = Self {
            width,
            height,
            pixels,
        };
        bitmap.check_size()?;
        Ok(bitmap)
    }

    /// Create a fully transparent bitmap.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * CHANNELS],
        }
    }

    /// Create an opaque bitmap from RGB pixel data (3 bytes per pixel).
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8]) -> Result<Self, CropperError> {
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(CropperError::BufferSizeMismatch {
                expected,
                actual: rgb.len(),
            });
        }

        let mut pixels = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for px in rgb.chunks_exact(3) {
            pixels.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a bitmap from an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Create a bitmap from any decoded `image::DynamicImage`.
    pub fn from_dynamic(img: &image::DynamicImage) -> Self {
        Self::from_rgba_image(img.to_rgba8())
    }

    /// Convert to an `image::RgbaImage` for further processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let px = self.pixels.get(idx..idx + CHANNELS)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Number of bytes `pixels` must hold for the declared dimensions.
    pub fn expected_byte_size(&self) -> usize {
        self.width as usize * self.height as usize * CHANNELS
    }

    /// Fails if the pixel buffer does not match the declared dimensions.
    ///
    /// The fields are public, so a bitmap built by hand can skip the check
    /// in [`Bitmap::new`].
    pub fn check_size(&self) -> Result<(), CropperError> {
        let expected = self.expected_byte_size();
        if self.pixels.len() != expected {
            return Err(CropperError::BufferSizeMismatch {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Check if this is an empty/invalid bitmap.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_buffer_size() {
        assert!(Bitmap::new(2, 2, vec![0u8; 16]).is_ok());

        let err = Bitmap::new(2, 2, vec![0u8; 12]).unwrap_err();
        assert_eq!(
            err,
            CropperError::BufferSizeMismatch {
                expected: 16,
                actual: 12
            }
        );
    }

    #[test]
    fn test_from_rgb_is_opaque() {
        let bmp = Bitmap::from_rgb(2, 1, &[10, 20, 30, 40, 50, 60]).unwrap();
        assert_eq!(bmp.pixel(0, 0), Some([10, 20, 30, 255]));
        assert_eq!(bmp.pixel(1, 0), Some([40, 50, 60, 255]));
        assert_eq!(bmp.byte_size(), 8);
    }

    #[test]
    fn test_check_size_catches_hand_built_bitmap() {
        let bmp = Bitmap {
            width: 10,
            height: 10,
            pixels: vec![255; 4],
        };
        assert_eq!(
            bmp.check_size(),
            Err(CropperError::BufferSizeMismatch {
                expected: 400,
                actual: 4
            })
        );
        assert!(Bitmap::transparent(3, 2).check_size().is_ok());
    }

    #[test]
    fn test_from_rgb_size_mismatch() {
        assert!(Bitmap::from_rgb(2, 2, &[0u8; 4]).is_err());
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let bmp = Bitmap::transparent(3, 3);
        assert_eq!(bmp.pixel(2, 2), Some([0, 0, 0, 0]));
        assert_eq!(bmp.pixel(3, 0), None);
        assert_eq!(bmp.pixel(0, 3), None);
    }

    #[test]
    fn test_image_crate_interop() {
        let mut img = image::RgbaImage::new(4, 2);
        img.put_pixel(3, 1, image::Rgba([1, 2, 3, 4]));

        let bmp = Bitmap::from_rgba_image(img);
        assert_eq!(bmp.width, 4);
        assert_eq!(bmp.height, 2);
        assert_eq!(bmp.pixel(3, 1), Some([1, 2, 3, 4]));

        let back = bmp.to_rgba_image().unwrap();
        assert_eq!(back.get_pixel(3, 1), &image::Rgba([1, 2, 3, 4]));
    }

    #[test]
    fn test_from_dynamic_rgb() {
        let rgb = image::RgbImage::from_pixel(2, 2, image::Rgb([9, 8, 7]));
        let bmp = Bitmap::from_dynamic(&image::DynamicImage::ImageRgb8(rgb));
        assert_eq!(bmp.pixel(1, 1), Some([9, 8, 7, 255]));
    }

    #[test]
    fn test_empty() {
        assert!(Bitmap::transparent(0, 5).is_empty());
        assert!(!Bitmap::transparent(1, 1).is_empty());
    }
}
