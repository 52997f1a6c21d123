//! Error types for the crop engine.

use thiserror::Error;

/// Errors raised by the crop engine.
///
/// All variants describe caller contract violations. Out-of-range values for
/// clamped fields (scale, handle offset) are never errors, and drag events
/// without an active handle are silently ignored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropperError {
    /// A viewport or image dimension was zero, negative, or not finite.
    #[error("Invalid {what} dimension: {value}")]
    InvalidDimension {
        /// Which dimension was rejected (e.g. "viewport width").
        what: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// A gesture, observable, or crop call was made before `init`.
    #[error("Cropper used before init")]
    UninitializedState,

    /// A pixel buffer does not match its declared dimensions.
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        /// Bytes required by the dimensions.
        expected: usize,
        /// Bytes actually supplied.
        actual: usize,
    },

    /// A configuration value is out of range.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
